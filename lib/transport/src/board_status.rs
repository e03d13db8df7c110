use serde::{Deserialize, Serialize};

/// Wake state reported by the controller board. `time` is the board's own
/// report of when it went to sleep.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BoardStatus {
    Awake,
    Sleep {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },
}
