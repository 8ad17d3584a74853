//! Streamer identifiers and ordered streamer lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid streamer identifier {0:?}")]
pub struct InvalidStreamerId(pub String);

/// A channel name: non-empty, alphanumeric plus `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamerId(String);

impl StreamerId {
    pub fn parse(name: &str) -> Result<Self, InvalidStreamerId> {
        if is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidStreamerId(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

impl TryFrom<String> for StreamerId {
    type Error = InvalidStreamerId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidStreamerId(value))
        }
    }
}

impl From<StreamerId> for String {
    fn from(id: StreamerId) -> Self {
        id.0
    }
}

impl fmt::Display for StreamerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of streamers. Order is the miner's priority order and
/// duplicates are preserved as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamerList(Vec<StreamerId>);

impl StreamerList {
    pub fn new(ids: Vec<StreamerId>) -> Self {
        Self(ids)
    }

    pub fn single(id: StreamerId) -> Self {
        Self(vec![id])
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(StreamerId::as_str).collect()
    }
}

impl Deref for StreamerList {
    type Target = [StreamerId];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<StreamerId> for StreamerList {
    fn from_iter<I: IntoIterator<Item = StreamerId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for StreamerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.names().join(", "))
    }
}
