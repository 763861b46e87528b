// Resume-to-job analysis pipeline.
// Stage order: skill extraction → skill matching → category aggregation →
// qualitative report. All LLM calls go through llm_client; every
// oracle-dependent stage carries its own deterministic fallback.

pub mod handlers;
pub mod markdown;
pub mod matching;
pub mod prompts;
pub mod report;
pub mod skills;

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;

    use crate::llm_client::{Oracle, OracleError};

    /// Oracle stub returning a canned response, or a transport error if none.
    pub(crate) struct StubOracle(pub Option<&'static str>);

    #[async_trait]
    impl Oracle for StubOracle {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, OracleError> {
            match self.0 {
                Some(text) => Ok(text.to_string()),
                None => Err(OracleError::Api {
                    status: 503,
                    message: "oracle unavailable".to_string(),
                }),
            }
        }
    }
}
