pub mod metadata;
pub mod sealed_writer;
pub mod wav_decoder;
