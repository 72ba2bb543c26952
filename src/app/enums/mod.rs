pub mod log_level;
