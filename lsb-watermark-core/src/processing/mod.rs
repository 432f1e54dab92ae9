pub mod embedder;
pub mod extractor;
pub mod wav_format;
