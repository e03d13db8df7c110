use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Zone;

/// Latest moisture readings per zone, replaced wholesale on every update.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Moisture {
    pub zones: HashMap<Zone, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization() {
        let moisture: Moisture = serde_json::from_str(
            r#"{"zones":{"zone1":42,"zone2":10,"zone3":5,"zone4":99}}"#,
        )
        .unwrap();

        assert_eq!(moisture.zones[&Zone::Zone1], 42.0);
        assert_eq!(moisture.zones[&Zone::Zone2], 10.0);
        assert_eq!(moisture.zones[&Zone::Zone3], 5.0);
        assert_eq!(moisture.zones[&Zone::Zone4], 99.0);
    }

    #[test]
    fn test_round_trip() {
        let payload = r#"{"zones":{"zone1":42.5,"zone2":10,"zone3":5,"zone4":99}}"#;

        let moisture: Moisture = serde_json::from_str(payload).unwrap();
        let encoded = serde_json::to_string(&moisture).unwrap();
        let decoded: Moisture = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, moisture);

        for zone in Zone::all_zones() {
            assert_eq!(decoded.zones[&zone], moisture.zones[&zone]);
        }
    }

    #[test]
    fn test_rejects_malformed_payloads() {
        assert!(serde_json::from_str::<Moisture>("not-json").is_err());
        assert!(serde_json::from_str::<Moisture>("{}").is_err());
        assert!(serde_json::from_str::<Moisture>(r#"{"zones":{"zone5":1}}"#).is_err());
        assert!(serde_json::from_str::<Moisture>(r#"{"zones":{"zone1":"wet"}}"#).is_err());
    }
}
