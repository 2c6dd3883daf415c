//! Extraction pipeline: one transcript, one profile, one oracle call

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::analysis::{AnalysisResult, PromptProfile};

use super::ports::{ChatMessage, CompletionOracle, CompletionRequest, OracleError};

/// Errors from the extraction pipeline
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The oracle call failed. Transient and permanent causes are not told apart.
    #[error("{cause}")]
    OracleUnavailable {
        #[from]
        cause: OracleError,
    },
}

/// Builds the oracle request for a profile and relays the raw completion.
#[derive(Clone)]
pub struct ExtractionPipeline {
    oracle: Arc<dyn CompletionOracle>,
}

impl ExtractionPipeline {
    pub fn new(oracle: Arc<dyn CompletionOracle>) -> Self {
        Self { oracle }
    }

    /// Build the two-message exchange: profile instruction, then the transcript verbatim
    pub fn build_request(transcript: &str, profile: &PromptProfile) -> CompletionRequest {
        CompletionRequest {
            model: profile.model().to_string(),
            response_mode: profile.response_mode(),
            messages: vec![
                ChatMessage::system(profile.system_instruction()),
                ChatMessage::user(transcript),
            ],
        }
    }

    /// Run the oracle for `transcript` under `profile` and return its raw text.
    ///
    /// The output is not parsed here. No retry is attempted.
    pub async fn run(
        &self,
        transcript: &str,
        profile: &PromptProfile,
    ) -> Result<AnalysisResult, PipelineError> {
        let request = Self::build_request(transcript, profile);
        let oracle = Arc::clone(&self.oracle);

        debug!(
            profile = %profile.id(),
            model = %request.model,
            transcript_len = transcript.len(),
            "Calling completion oracle"
        );

        // Detached: dropping this future (client disconnect) does not cancel the call.
        let handle = tokio::spawn(async move { oracle.complete(&request).await });

        let raw = match handle.await {
            Ok(result) => result?,
            Err(e) => return Err(OracleError::RequestFailed(e.to_string()).into()),
        };

        info!(profile = %profile.id(), output = %raw, "Oracle output");

        Ok(AnalysisResult::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MessageRole;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and answers with a fixed result
    struct RecordingOracle {
        response: Result<String, OracleError>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingOracle {
        fn answering(response: Result<String, OracleError>) -> Arc<Self> {
            Arc::new(Self {
                response,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionOracle for RecordingOracle {
        async fn complete(&self, request: &CompletionRequest) -> Result<String, OracleError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone()
        }
    }

    #[test]
    fn build_request_has_system_then_user() {
        let profile = PromptProfile::overview();
        let request = ExtractionPipeline::build_request("  raw text \n", &profile);

        assert_eq!(request.model, "chatgpt-4o-latest");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[0].content, profile.system_instruction());
        assert_eq!(request.messages[1].role, MessageRole::User);
        assert_eq!(request.messages[1].content, "  raw text \n");
    }

    #[test]
    fn long_transcripts_are_not_truncated() {
        let transcript = "x".repeat(200_000);
        let request = ExtractionPipeline::build_request(&transcript, &PromptProfile::detailed());
        assert_eq!(request.messages[1].content.len(), 200_000);
    }

    #[tokio::test]
    async fn run_returns_oracle_text_unmodified() {
        let oracle = RecordingOracle::answering(Ok("not even json".to_string()));
        let pipeline = ExtractionPipeline::new(oracle.clone());

        let result = pipeline
            .run("Unit Alpha", &PromptProfile::overview())
            .await
            .unwrap();

        assert_eq!(result.raw(), "not even json");
        let requests = oracle.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[1].content, "Unit Alpha");
    }

    #[tokio::test]
    async fn run_maps_oracle_failure() {
        let oracle = RecordingOracle::answering(Err(OracleError::InvalidApiKey(
            "Incorrect API key provided".to_string(),
        )));
        let pipeline = ExtractionPipeline::new(oracle.clone());

        let err = pipeline
            .run("Unit Alpha", &PromptProfile::overview())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::OracleUnavailable {
                cause: OracleError::InvalidApiKey(_)
            }
        ));
        assert_eq!(err.to_string(), "Invalid API key: Incorrect API key provided");
        assert_eq!(oracle.requests.lock().unwrap().len(), 1);
    }
}
