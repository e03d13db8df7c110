use std::fmt;

#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    Mqtt(paho_mqtt::Error),
    Ws(axum::Error),
    Io(std::io::Error),
    Port(std::num::ParseIntError),
    Join(tokio::task::JoinError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<paho_mqtt::Error> for Error {
    fn from(err: paho_mqtt::Error) -> Self {
        Self::Mqtt(err)
    }
}

impl From<axum::Error> for Error {
    fn from(err: axum::Error) -> Self {
        Self::Ws(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Self::Port(err)
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Mqtt(err) => write!(f, "mqtt error: {err}"),
            Self::Ws(err) => write!(f, "websocket error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Port(err) => write!(f, "port parse error: {err}"),
            Self::Join(err) => write!(f, "join error: {err}"),
        }
    }
}

impl std::error::Error for Error {}
