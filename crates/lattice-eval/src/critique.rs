//! Optional model critique of a produced answer.

use std::time::Duration;

use lattice_core::llm_json::{string_list, LlmJson};
use lattice_core::traits::ITextCompletion;
use tracing::warn;

const CRITIQUE_TEMPERATURE: f64 = 0.2;

pub fn build_critique_prompt(question: &str, answer: &str) -> String {
    format!(
        "You are a critical scientific reviewer.\n\
         Evaluate the answer quality. Do NOT rewrite the answer.\n\
         Return short issues and recommendations.\n\n\
         Question:\n{question}\n\n\
         Answer:\n{answer}\n\n\
         Return JSON ONLY:\n\
         {{\n  \"issues\": [\"...\"],\n  \"recommendations\": [\"...\"]\n}}"
    )
}

/// Ask the model for issues/recommendations. Transport failures and
/// malformed replies both degrade to empty lists; critique is advisory and
/// never fails the evaluation.
pub fn run_critique(
    llm: &dyn ITextCompletion,
    question: &str,
    answer: &str,
    timeout: Duration,
) -> (Vec<String>, Vec<String>) {
    let raw = match llm.complete(&build_critique_prompt(question, answer), CRITIQUE_TEMPERATURE, timeout)
    {
        Ok(raw) => raw,
        Err(err) => {
            warn!(provider = llm.name(), %err, "critique call failed, continuing without it");
            return (Vec::new(), Vec::new());
        }
    };

    match LlmJson::parse(&raw).into_value() {
        Some(v) => (string_list(&v, "issues"), string_list(&v, "recommendations")),
        None => {
            warn!(provider = llm.name(), "critique reply was not JSON, continuing without it");
            (Vec::new(), Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_core::errors::ExternalCallError;

    struct Scripted(Result<String, ()>);

    impl ITextCompletion for Scripted {
        fn complete(
            &self,
            _prompt: &str,
            _temperature: f64,
            _timeout: Duration,
        ) -> Result<String, ExternalCallError> {
            self.0.clone().map_err(|_| ExternalCallError::EmptyResponse {
                service: "llm".to_string(),
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    #[test]
    fn parses_issue_lists() {
        let llm = Scripted(Ok(
            r#"{"issues": ["vague claim"], "recommendations": ["cite the passage"]}"#.to_string(),
        ));
        let (issues, recs) = run_critique(&llm, "q", "a", Duration::from_secs(1));
        assert_eq!(issues, vec!["vague claim"]);
        assert_eq!(recs, vec!["cite the passage"]);
    }

    #[test]
    fn malformed_reply_degrades_to_empty() {
        let llm = Scripted(Ok("I refuse to answer in JSON".to_string()));
        let (issues, recs) = run_critique(&llm, "q", "a", Duration::from_secs(1));
        assert!(issues.is_empty());
        assert!(recs.is_empty());
    }

    #[test]
    fn transport_failure_degrades_to_empty() {
        let llm = Scripted(Err(()));
        let (issues, recs) = run_critique(&llm, "q", "a", Duration::from_secs(1));
        assert!(issues.is_empty());
        assert!(recs.is_empty());
    }
}
