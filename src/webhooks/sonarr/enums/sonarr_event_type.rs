use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SonarrEventType {
    Download,
    Grab,
    Rename,
    Unknown(String),
    Missing,
}

impl SonarrEventType {
    /// Matches the `eventType` discriminator exactly. Absent, `null` and `""`
    /// count as missing; any other non-string value is unknown.
    pub fn from_discriminator(discriminator: Option<&Value>) -> Self {
        match discriminator {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::String(s)) => match s.as_str() {
                "" => Self::Missing,
                "Download" => Self::Download,
                "Grab" => Self::Grab,
                "Rename" => Self::Rename,
                other => Self::Unknown(other.to_string()),
            },
            Some(other) => Self::Unknown(other.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Download => "Download",
            Self::Grab => "Grab",
            Self::Rename => "Rename",
            Self::Unknown(other) => other,
            Self::Missing => "",
        }
    }
}
