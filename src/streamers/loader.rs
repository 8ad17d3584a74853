//! Streamer list loading from the CSV file.
//!
//! Loading never fails: a missing, unreadable or empty file all end in a
//! single-element list holding the default streamer.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::streamers::identifier::{StreamerId, StreamerList};

/// Split file content into valid identifiers and rejected tokens, both in
/// input order. Empty tokens are neither.
pub fn parse_streamers(content: &str) -> (Vec<StreamerId>, Vec<String>) {
    let mut valid = Vec::new();
    let mut rejected = Vec::new();

    for token in content.trim().split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }
        match StreamerId::parse(token) {
            Ok(id) => valid.push(id),
            Err(_) => rejected.push(token.to_string()),
        }
    }

    (valid, rejected)
}

/// Load the streamer list from `path`, creating the file with `default` when
/// it does not exist.
pub fn load_streamers(path: &Path, default: &StreamerId) -> StreamerList {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Streamer file not found, creating it with the default streamer");
            if let Err(e) = fs::write(path, default.as_str()) {
                tracing::error!(path = %path.display(), error = %e, "Failed to create streamer file");
            }
            return StreamerList::single(default.clone());
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read streamer file, using default streamer");
            return StreamerList::single(default.clone());
        }
    };

    let (valid, rejected) = parse_streamers(&content);
    for token in &rejected {
        tracing::warn!(token = %token, "Ignoring invalid streamer");
    }
    for id in &valid {
        tracing::info!(streamer = %id, "Valid streamer");
    }

    if valid.is_empty() {
        tracing::warn!(default = %default, "No valid streamers, using default");
        return StreamerList::single(default.clone());
    }

    let list = StreamerList::new(valid);
    tracing::info!(count = list.len(), streamers = %list, "Loaded streamers");
    list
}

/// What `load_streamers` would produce for `path`, without creating the
/// file or logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub list: StreamerList,
    pub rejected: Vec<String>,
    /// The file does not exist; loading would create it with the default.
    pub missing: bool,
}

pub fn preview_streamers(path: &Path, default: &StreamerId) -> std::io::Result<Preview> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Ok(Preview {
                list: StreamerList::single(default.clone()),
                rejected: Vec::new(),
                missing: true,
            });
        }
        Err(e) => return Err(e),
    };

    let (valid, rejected) = parse_streamers(&content);
    let list = if valid.is_empty() {
        StreamerList::single(default.clone())
    } else {
        StreamerList::new(valid)
    };
    Ok(Preview {
        list,
        rejected,
        missing: false,
    })
}
