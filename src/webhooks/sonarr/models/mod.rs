pub mod event_summary;
