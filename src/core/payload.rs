//! HTTP payload envelope

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way a payload travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Sent,
    Received,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Sent => write!(f, "Sent"),
            Direction::Received => write!(f, "Received"),
        }
    }
}

/// HTTP method of the request that carried the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Get,
    Delete,
    Post,
    Patch,
    Put,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestKind::Get => "Get",
            RequestKind::Delete => "Delete",
            RequestKind::Post => "Post",
            RequestKind::Patch => "Patch",
            RequestKind::Put => "Put",
        };
        write!(f, "{}", name)
    }
}

/// One payload on its way into the log. Lives for a single logging call.
#[derive(Debug, Clone, Copy)]
pub struct PayloadEnvelope<'a> {
    pub direction: Direction,
    pub request_kind: RequestKind,
    pub raw_json: &'a str,
}

impl<'a> PayloadEnvelope<'a> {
    pub fn new(direction: Direction, request_kind: RequestKind, raw_json: &'a str) -> Self {
        Self {
            direction,
            request_kind,
            raw_json,
        }
    }

    /// Compose the log message for already serialized JSON.
    ///
    /// A line break goes in front of the first `{` so multi-line JSON starts
    /// on its own line below the tag.
    #[must_use]
    pub fn compose(&self, serialized: &str) -> String {
        let mut message = format!("[{}]({}): {}", self.direction, self.request_kind, serialized);
        let tag_len = message.len() - serialized.len();
        if let Some(pos) = serialized.find('{') {
            message.insert(tag_len + pos, '\n');
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_breaks_before_first_brace() {
        let envelope = PayloadEnvelope::new(Direction::Sent, RequestKind::Post, "");
        let message = envelope.compose("{\n  \"a\": {}\n}");
        assert_eq!(message, "[Sent](Post): \n{\n  \"a\": {}\n}");
    }

    #[test]
    fn test_compose_without_object() {
        let envelope = PayloadEnvelope::new(Direction::Received, RequestKind::Get, "");
        assert_eq!(envelope.compose("[1,2]"), "[Received](Get): [1,2]");
    }
}
