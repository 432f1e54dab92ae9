pub mod watermark_session;
