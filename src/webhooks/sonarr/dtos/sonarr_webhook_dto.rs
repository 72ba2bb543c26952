use serde::Deserialize;
use serde_json::Value;

/// Notification body posted by Sonarr's webhook connection.
///
/// The shape belongs to the sender, so the body is kept as raw JSON and the
/// handful of fields used for logging are read on demand. A field that is
/// absent or of an unexpected type reads as `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SonarrWebhookDto(pub Value);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SonarrEpisode {
    pub season_number: Option<u64>,
    pub episode_number: Option<u64>,
    pub title: Option<String>,
}

impl SonarrWebhookDto {
    pub fn event_type(&self) -> Option<&Value> {
        self.0.get("eventType")
    }

    pub fn series_title(&self) -> Option<&str> {
        self.0.pointer("/series/title").and_then(Value::as_str)
    }

    pub fn episodes(&self) -> Vec<SonarrEpisode> {
        self.0
            .get("episodes")
            .and_then(Value::as_array)
            .map(|episodes| episodes.iter().map(SonarrEpisode::from_value).collect())
            .unwrap_or_default()
    }

    pub fn release_title(&self) -> Option<&str> {
        self.0
            .pointer("/release/releaseTitle")
            .and_then(Value::as_str)
    }

    pub fn is_upgrade(&self) -> bool {
        self.0
            .get("isUpgrade")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl SonarrEpisode {
    fn from_value(value: &Value) -> Self {
        Self {
            season_number: value.get("seasonNumber").and_then(Value::as_u64),
            episode_number: value.get("episodeNumber").and_then(Value::as_u64),
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// `S01E02 Title`, degrading to whichever half is known.
    pub fn label(&self) -> Option<String> {
        let code = match (self.season_number, self.episode_number) {
            (Some(season), Some(episode)) => Some(format!("S{:02}E{:02}", season, episode)),
            _ => None,
        };

        match (code, self.title.as_deref()) {
            (Some(code), Some(title)) => Some(format!("{} {}", code, title)),
            (Some(code), None) => Some(code),
            (None, Some(title)) => Some(title.to_string()),
            (None, None) => None,
        }
    }
}
