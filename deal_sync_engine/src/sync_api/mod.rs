pub mod deal_sync_api;
pub mod errors;
pub mod request_logger;
