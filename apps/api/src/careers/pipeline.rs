//! Career pipeline — one linear pass per request.
//!
//! Flow: validate fields → render prompt → call model (bounded) → normalize → return.
//! Validation failures return before the model is touched.

use std::time::Duration;

use anyhow::anyhow;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::careers::use_cases::UseCase;
use crate::errors::AppError;
use crate::llm_client::normalize::normalize;
use crate::llm_client::{LanguageModel, LlmError};

pub async fn run(
    use_case: &UseCase,
    body: &Value,
    llm: &dyn LanguageModel,
    timeout: Duration,
) -> Result<Value, AppError> {
    let object = body
        .as_object()
        .ok_or_else(|| anyhow!("{} request body is not a JSON object", use_case.name))?;

    let values = use_case.collect(object).ok_or_else(|| {
        debug!("{} rejected: required fields missing", use_case.name);
        AppError::MissingField(use_case.missing_message)
    })?;

    let prompt = use_case.render(&values);

    let reply = match tokio::time::timeout(timeout, llm.generate(&prompt)).await {
        Ok(reply) => reply?,
        Err(_) => {
            return Err(LlmError::Timeout {
                secs: timeout.as_secs(),
            }
            .into())
        }
    };

    let parsed = normalize(&reply).map_err(|failure| {
        error!(
            "{} reply failed to parse ({}). Raw output: {}",
            use_case.name, failure.reason, failure.cleaned
        );
        AppError::MalformedJson {
            message: use_case.parse_failure_message,
            raw: use_case.expose_raw.then_some(failure.cleaned),
        }
    })?;

    let missing = use_case.missing_keys(&parsed);
    if !missing.is_empty() {
        warn!("{} reply lacks expected keys: {:?}", use_case.name, missing);
    }

    info!("{} completed", use_case.name);
    Ok(parsed)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::careers::use_cases::{CAREER_ADVICE, COVER_LETTER, RESUME_ANALYSIS, SKILLS_ANALYSIS};

    /// Canned-reply model that records every prompt it receives.
    pub(crate) struct FakeModel {
        reply: Result<String, fn() -> LlmError>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
        /// Prompts containing this text never get a reply.
        stall_on: Option<&'static str>,
    }

    impl FakeModel {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
                stall_on: None,
            }
        }

        pub(crate) fn failing(err: fn() -> LlmError) -> Self {
            Self {
                reply: Err(err),
                ..Self::replying("")
            }
        }

        pub(crate) fn stalling() -> Self {
            Self::stalling_on("", "{}")
        }

        pub(crate) fn stalling_on(marker: &'static str, reply: &str) -> Self {
            Self {
                stall_on: Some(marker),
                ..Self::replying(reply)
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LanguageModel for FakeModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.stall_on.is_some_and(|marker| prompt.contains(marker)) {
                std::future::pending::<()>().await;
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(30);

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let model = FakeModel::replying(
            "```json\n{\"advice\":\"x\",\"tips\":[\"a\"],\"questions\":[\"b\"]}\n```",
        );
        let result = run(
            &CAREER_ADVICE,
            &json!({"role": "Software Engineer"}),
            &model,
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(result, json!({"advice": "x", "tips": ["a"], "questions": ["b"]}));
        assert_eq!(model.call_count(), 1);
        assert!(model.prompts.lock().unwrap()[0].contains("Software Engineer"));
    }

    #[tokio::test]
    async fn test_missing_field_makes_no_model_call() {
        let model = FakeModel::replying("{}");
        let err = run(&COVER_LETTER, &json!({"resume": "r", "role": "x"}), &model, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::MissingField("Resume, company, and role are required")
        ));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_non_object_body_is_unhandled() {
        let model = FakeModel::replying("{}");
        let err = run(&RESUME_ANALYSIS, &json!(["resume"]), &model, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unhandled(_)));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prose_reply_is_malformed_with_raw() {
        let model = FakeModel::replying("  I'd be happy to help with that!  ");
        let err = run(
            &SKILLS_ANALYSIS,
            &json!({"skills": ["Rust"], "interestedJobRoles": ["Backend Engineer"]}),
            &model,
            TIMEOUT,
        )
        .await
        .unwrap_err();

        match err {
            AppError::MalformedJson { message, raw } => {
                assert_eq!(message, "Failed to parse analysis response");
                assert_eq!(raw.as_deref(), Some("I'd be happy to help with that!"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cover_letter_parse_failure_hides_raw() {
        let model = FakeModel::replying("Dear hiring manager,");
        let err = run(
            &COVER_LETTER,
            &json!({"resume": "r", "company": "Acme", "role": "Engineer"}),
            &model,
            TIMEOUT,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::MalformedJson { raw: None, .. }));
    }

    #[tokio::test]
    async fn test_provider_error_is_model_call_failure() {
        let model = FakeModel::failing(|| LlmError::Api {
            status: 429,
            message: "quota exceeded".to_string(),
        });
        let err = run(&CAREER_ADVICE, &json!({"role": "Nurse"}), &model, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::ModelCallFailed(LlmError::Api { status: 429, .. })
        ));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_model_times_out() {
        let model = FakeModel::stalling();
        let err = run(&CAREER_ADVICE, &json!({"role": "Nurse"}), &model, TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::ModelCallFailed(LlmError::Timeout { secs: 30 })
        ));
    }

    #[tokio::test]
    async fn test_reply_missing_keys_is_still_returned() {
        let model = FakeModel::replying(r#"{"coverLetter": "Dear Acme", "extra": 1}"#);
        let result = run(
            &COVER_LETTER,
            &json!({"resume": "r", "company": "Acme", "role": "Engineer"}),
            &model,
            TIMEOUT,
        )
        .await
        .unwrap();

        assert_eq!(result, json!({"coverLetter": "Dear Acme", "extra": 1}));

        let partial = FakeModel::replying(r#"{"summary": "s"}"#);
        let result = run(&RESUME_ANALYSIS, &json!({"resume": "r"}), &partial, TIMEOUT)
            .await
            .unwrap();
        assert_eq!(result, json!({"summary": "s"}));
    }
}
