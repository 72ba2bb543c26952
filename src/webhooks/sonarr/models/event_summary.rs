use crate::webhooks::sonarr::enums::sonarr_event_type::SonarrEventType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// The log line a webhook produces, and the level it is written at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub event_type: SonarrEventType,
    pub severity: Severity,
    pub message: String,
}
