pub mod bit_codec;
pub mod marker;
