use serde::Deserialize;

/// A channel as listed by the remote service. The wire format calls these
/// streams.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    #[serde(rename = "stream_id")]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
