use serde::{Deserialize, Serialize};
use transport::{BoardStatus, Command, Moisture};

/// One frame of the viewer protocol. The server pushes `update` and
/// `boardStatus`; viewers send `pumpCommand`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum Event {
    Update(Moisture),
    BoardStatus(BoardStatus),
    PumpCommand(Command),
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use transport::{Action, Zone};

    #[test]
    fn test_serialization() {
        let event = Event::Update(Moisture {
            zones: HashMap::from([(Zone::Zone1, 42.0)]),
        });
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"update","data":{"zones":{"zone1":42.0}}}"#
        );

        let event = Event::BoardStatus(BoardStatus::Sleep {
            time: Some("2024-01-01T00:00:00Z".to_string()),
        });
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"boardStatus","data":{"status":"sleep","time":"2024-01-01T00:00:00Z"}}"#
        );
    }

    #[test]
    fn test_pump_command_deserialization() {
        let event: Event =
            serde_json::from_str(r#"{"event":"pumpCommand","data":{"zone":2,"action":"on"}}"#)
                .unwrap();

        assert_eq!(
            event,
            Event::PumpCommand(Command {
                zone: Zone::Zone2,
                action: Action::On,
            })
        );
    }

    #[test]
    fn test_rejects_malformed_frames() {
        assert!(serde_json::from_str::<Event>("not-json").is_err());
        assert!(serde_json::from_str::<Event>(r#"{"event":"reboot","data":{}}"#).is_err());
        assert!(serde_json::from_str::<Event>(
            r#"{"event":"pumpCommand","data":{"zone":"garbage","action":"explode"}}"#
        )
        .is_err());
    }
}
