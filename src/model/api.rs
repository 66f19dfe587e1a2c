use serde::{Deserialize, Serialize};

use crate::model::{leave::RecordStatusChangedDto, stats::StatsDto};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Frames pushed over the live WebSocket.
///
/// Serialized as `{"event": "stats", "data": {...}}` or
/// `{"event": "record-status-changed", "data": {...}}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum LiveEventDto {
    Stats(StatsDto),
    RecordStatusChanged(RecordStatusChangedDto),
}
