use reqwest;
use serde::{Deserialize, Serialize};
use serde_json;
use std::{error::Error, fmt};

#[derive(Serialize, Deserialize, Default, Debug)]
pub enum Status {
    #[default]
    Ok,

    Internal(String),
    NotFound(String),
    Unavailable(String),
}

impl Status {
    pub fn new(msg: &str, err: impl Error) -> Self {
        Status::Internal(format!("{msg}: '{err}'"))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Status::Internal(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Status::NotFound(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Status::Unavailable(msg.into())
    }
}

impl From<std::io::Error> for Status {
    fn from(err: std::io::Error) -> Self {
        Self::new("IO error", err)
    }
}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Self::new("serde error", err)
    }
}

// Every outbound request in this crate targets the upstream XML API, so
// transport errors land in the service-unavailable bucket.
impl From<reqwest::Error> for Status {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(format!("upstream request failed: '{err}'"))
    }
}

impl Error for Status {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "Ok"),
            Status::Internal(msg) => write!(f, "Internal error: {msg}"),
            Status::NotFound(msg) => write!(f, "Not found error: {msg}"),
            Status::Unavailable(msg) => write!(f, "Unavailable error: {msg}"),
        }
    }
}
