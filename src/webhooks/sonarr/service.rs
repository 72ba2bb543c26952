use crate::app::envy::Envy;

use super::{
    dtos::sonarr_webhook_dto::SonarrWebhookDto,
    enums::sonarr_event_type::SonarrEventType,
    models::event_summary::{EventSummary, Severity},
};

const UNKNOWN_SERIES: &str = "unknown series";

pub fn handle_webhook(dto: &SonarrWebhookDto, envy: &Envy) -> EventSummary {
    let summary = summarize(dto);

    if summary.event_type != SonarrEventType::Missing {
        tracing::info!(
            sonarr_url = %envy.sonarr_url,
            "Received Sonarr webhook event: {}",
            summary.event_type.value()
        );
    }
    tracing::debug!("Event data: {}", dto.0);

    match summary.severity {
        Severity::Info => tracing::info!("{}", summary.message),
        Severity::Warning => tracing::warn!("{}", summary.message),
    }

    summary
}

pub fn summarize(dto: &SonarrWebhookDto) -> EventSummary {
    let event_type = SonarrEventType::from_discriminator(dto.event_type());
    let series = dto.series_title().unwrap_or(UNKNOWN_SERIES);

    let (severity, message) = match &event_type {
        SonarrEventType::Download => {
            let mut message = format!("Download event for {}", series);
            push_episodes(&mut message, dto);
            if dto.is_upgrade() {
                message.push_str(" (upgrade)");
            }
            (Severity::Info, message)
        }
        SonarrEventType::Grab => {
            let mut message = format!("Grab event for {}", series);
            push_episodes(&mut message, dto);
            if let Some(release_title) = dto.release_title() {
                message.push_str(&format!(" [{}]", release_title));
            }
            (Severity::Info, message)
        }
        SonarrEventType::Rename => (Severity::Info, format!("Rename event for {}", series)),
        SonarrEventType::Unknown(other) => {
            (Severity::Warning, format!("Unhandled event type: {}", other))
        }
        SonarrEventType::Missing => (
            Severity::Warning,
            "Received webhook with no eventType".to_string(),
        ),
    };

    EventSummary {
        event_type,
        severity,
        message,
    }
}

fn push_episodes(message: &mut String, dto: &SonarrWebhookDto) {
    let labels: Vec<String> = dto.episodes().iter().filter_map(|e| e.label()).collect();
    if !labels.is_empty() {
        message.push_str(" - ");
        message.push_str(&labels.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::app::{envy::test_envy, util::log_capture::LogCapture};

    fn dto(value: Value) -> SonarrWebhookDto {
        SonarrWebhookDto(value)
    }

    fn handle_captured(value: Value) -> (EventSummary, LogCapture) {
        let capture = LogCapture::default();
        let summary = tracing::subscriber::with_default(capture.subscriber(), || {
            handle_webhook(&dto(value), &test_envy())
        });

        (summary, capture)
    }

    #[test]
    fn grab_names_the_series() {
        let summary = summarize(&dto(json!({
            "eventType": "Grab",
            "series": { "title": "Example" }
        })));

        assert_eq!(summary.event_type, SonarrEventType::Grab);
        assert_eq!(summary.severity, Severity::Info);
        assert_eq!(summary.message, "Grab event for Example");
    }

    #[test]
    fn grab_includes_episodes_and_release() {
        let summary = summarize(&dto(json!({
            "eventType": "Grab",
            "series": { "title": "Example" },
            "episodes": [
                { "seasonNumber": 1, "episodeNumber": 1, "title": "Pilot" },
                { "seasonNumber": 1, "episodeNumber": 2, "title": "Second" }
            ],
            "release": { "releaseTitle": "Example.S01.720p", "indexer": "nzb" }
        })));

        assert_eq!(
            summary.message,
            "Grab event for Example - S01E01 Pilot, S01E02 Second [Example.S01.720p]"
        );
    }

    #[test]
    fn download_marks_upgrades() {
        let summary = summarize(&dto(json!({
            "eventType": "Download",
            "isUpgrade": true,
            "series": { "title": "Example" },
            "episodes": [{ "seasonNumber": 3, "episodeNumber": 9, "title": "Finale" }]
        })));

        assert_eq!(summary.event_type, SonarrEventType::Download);
        assert_eq!(
            summary.message,
            "Download event for Example - S03E09 Finale (upgrade)"
        );
    }

    #[test]
    fn rename_only_mentions_series() {
        let summary = summarize(&dto(json!({
            "eventType": "Rename",
            "series": { "title": "Example", "path": "/tv/Example" },
            "episodes": [{ "seasonNumber": 1, "episodeNumber": 1 }]
        })));

        assert_eq!(summary.message, "Rename event for Example");
        assert_eq!(summary.severity, Severity::Info);
    }

    #[test]
    fn missing_or_mistyped_series_falls_back() {
        let missing = summarize(&dto(json!({ "eventType": "Download" })));
        let mistyped = summarize(&dto(json!({ "eventType": "Grab", "series": "Example" })));

        assert_eq!(missing.message, "Download event for unknown series");
        assert_eq!(mistyped.message, "Grab event for unknown series");
    }

    #[test]
    fn unknown_type_is_a_warning() {
        let summary = summarize(&dto(json!({ "eventType": "Health", "level": "warning" })));

        assert_eq!(
            summary.event_type,
            SonarrEventType::Unknown("Health".to_string())
        );
        assert_eq!(summary.severity, Severity::Warning);
        assert_eq!(summary.message, "Unhandled event type: Health");
    }

    #[test]
    fn missing_type_is_a_warning() {
        let summary = summarize(&dto(json!({ "series": { "title": "Example" } })));

        assert_eq!(summary.event_type, SonarrEventType::Missing);
        assert_eq!(summary.severity, Severity::Warning);
        assert_eq!(summary.message, "Received webhook with no eventType");
    }

    #[test]
    fn grab_is_logged_at_info() {
        let (_, logs) = handle_captured(json!({
            "eventType": "Grab",
            "series": { "title": "Example" }
        }));

        let line = logs.line_containing("Grab event for Example").unwrap();
        assert!(line.contains("INFO"), "unexpected line: {}", line);

        let received = logs
            .line_containing("Received Sonarr webhook event: Grab")
            .unwrap();
        assert!(received.contains("sonarr_url=http://sonarr.local:8989"));
    }

    #[test]
    fn unknown_type_is_logged_at_warn() {
        let (_, logs) = handle_captured(json!({ "eventType": "Health" }));

        let line = logs.line_containing("Unhandled event type: Health").unwrap();
        assert!(line.contains("WARN"), "unexpected line: {}", line);
    }

    #[test]
    fn missing_type_skips_received_line() {
        let (_, logs) = handle_captured(json!({}));

        let line = logs
            .line_containing("Received webhook with no eventType")
            .unwrap();
        assert!(line.contains("WARN"), "unexpected line: {}", line);
        assert!(logs.line_containing("Received Sonarr webhook event").is_none());
    }

    #[test]
    fn payload_is_logged_at_debug() {
        let (_, logs) = handle_captured(json!({ "eventType": "Rename", "instanceName": "Sonarr" }));

        let line = logs.line_containing("Event data:").unwrap();
        assert!(line.contains("DEBUG"), "unexpected line: {}", line);
        assert!(line.contains("\"instanceName\":\"Sonarr\""));
    }

    #[test]
    fn handle_returns_the_logged_summary() {
        let payload = json!({ "eventType": "Rename", "series": { "title": "Example" } });
        let (summary, _) = handle_captured(payload.clone());

        assert_eq!(summary, summarize(&dto(payload)));
    }
}
