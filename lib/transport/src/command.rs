use serde::{Deserialize, Serialize};

use crate::Zone;

/// A pump command issued by a viewer. The controller addresses zones by
/// index, so the wire form carries the zone as a small integer.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Command {
    #[serde(with = "zone_index")]
    pub zone: Zone,
    pub action: Action,
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    On,
    Off,
}

mod zone_index {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Zone;

    pub fn serialize<S: Serializer>(zone: &Zone, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(zone.index())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Zone, D::Error> {
        let index = u8::deserialize(deserializer)?;

        Zone::from_index(index).ok_or_else(|| D::Error::custom(format!("unknown zone {}", index)))
    }
}
