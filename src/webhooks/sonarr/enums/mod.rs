pub mod sonarr_event_type;
