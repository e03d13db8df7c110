use std::fmt;
use std::str::FromStr;

use serde::de::{value, Error};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Topic {
    Moisture,
    BoardStatus,
    Command,
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Topic::Moisture => write!(f, "irrigation/moisture"),
            Topic::BoardStatus => write!(f, "irrigation/boardstatus"),
            Topic::Command => write!(f, "irrigation/command"),
        }
    }
}

impl FromStr for Topic {
    type Err = value::Error;

    fn from_str(s: &str) -> std::result::Result<Topic, Self::Err> {
        const ERROR_MSG: &str = "supported topics are irrigation/moisture, \
            irrigation/boardstatus and irrigation/command";

        match s {
            "irrigation/moisture" => Ok(Topic::Moisture),
            "irrigation/boardstatus" => Ok(Topic::BoardStatus),
            "irrigation/command" => Ok(Topic::Command),
            _ => Err(value::Error::custom(ERROR_MSG)),
        }
    }
}
