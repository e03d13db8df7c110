mod board_status;
mod command;
mod moisture;
mod topic;

pub use board_status::BoardStatus;
pub use command::{Action, Command};
pub use moisture::Moisture;
pub use topic::Topic;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Zone1,
    Zone2,
    Zone3,
    Zone4,
}

impl Zone {
    pub const fn all_zones() -> [Zone; 4] {
        [Zone::Zone1, Zone::Zone2, Zone::Zone3, Zone::Zone4]
    }

    pub const fn index(&self) -> u8 {
        match self {
            Zone::Zone1 => 1,
            Zone::Zone2 => 2,
            Zone::Zone3 => 3,
            Zone::Zone4 => 4,
        }
    }

    pub const fn from_index(index: u8) -> Option<Zone> {
        match index {
            1 => Some(Zone::Zone1),
            2 => Some(Zone::Zone2),
            3 => Some(Zone::Zone3),
            4 => Some(Zone::Zone4),
            _ => None,
        }
    }
}
