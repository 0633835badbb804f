pub const DEFAULT_LOG_DIRECTIVE: &str = "slugguessr_server=info";
pub const DEFAULT_LOGGING_BUFFER_SIZE: usize = 100;
pub const QUICKWIT_LOGGING_CHANNEL_CAPACITY: usize = 1024;
