mod error;
mod event;
mod sessions;
mod storage;
mod update;
pub mod web_service;

pub use error::Error;
pub use event::Event;
pub use sessions::Sessions;
pub use storage::{Snapshot, Storage};
pub use update::handle_message;

pub type Result<T> = std::result::Result<T, Error>;
