pub mod config;
pub mod detection;
pub mod error;
pub mod sample_buffer;
pub mod watermark_result;
