#[cfg(test)]
pub mod log_capture;
pub mod logger;
pub mod request_id;
