//! Inbound transcript request

use serde::{Deserialize, Serialize};

/// Body of an analysis request.
///
/// The transcript is forwarded verbatim; it may be empty or arbitrarily long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

impl TranscriptRequest {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}
