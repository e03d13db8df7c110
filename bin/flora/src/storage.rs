use log::debug;
use transport::{BoardStatus, Moisture};

// Invalid payloads are rejected before they get here, so a cached value
// is only ever replaced by another valid one.
#[derive(Default)]
pub struct Storage {
    moisture: Option<Moisture>,
    board_status: Option<BoardStatus>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub moisture: Option<Moisture>,
    pub board_status: Option<BoardStatus>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            moisture: None,
            board_status: None,
        }
    }

    pub fn apply_moisture(&mut self, moisture: &Moisture) -> bool {
        if self.moisture.as_ref() != Some(moisture) {
            debug!("moisture changed: {:?}", moisture);

            self.moisture = Some(moisture.clone());
            true
        } else {
            false
        }
    }

    pub fn apply_board_status(&mut self, status: &BoardStatus) -> bool {
        if self.board_status.as_ref() != Some(status) {
            debug!("board status changed: {:?}", status);

            self.board_status = Some(status.clone());
            true
        } else {
            false
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            moisture: self.moisture.clone(),
            board_status: self.board_status.clone(),
        }
    }
}
