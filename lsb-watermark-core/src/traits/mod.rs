pub mod pcm_decoder;
