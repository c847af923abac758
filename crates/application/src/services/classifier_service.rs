//! Classifier service
//!
//! Routes a free-form prompt to one of the two email assistants.

use std::{fmt, sync::Arc};

use domain::Category;
use tracing::{debug, instrument, warn};

use crate::{
    ports::{CompletionCall, CompletionPort},
    prompts::{CLASSIFIER_MAX_TOKENS, CLASSIFIER_SYSTEM_PROMPT, CLASSIFIER_TEMPERATURE},
};

/// Classifier service routing prompts to an assistant category
pub struct ClassifierService {
    completion: Arc<dyn CompletionPort>,
}

impl fmt::Debug for ClassifierService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifierService").finish_non_exhaustive()
    }
}

impl ClassifierService {
    /// Create a new classifier service
    pub fn new(completion: Arc<dyn CompletionPort>) -> Self {
        Self { completion }
    }

    /// Classify a prompt into a category
    ///
    /// Makes exactly one completion call. The response is normalized before
    /// matching, and any failure routes to [`Category::FollowUp`] so the
    /// caller always gets a category back.
    #[instrument(skip(self, prompt))]
    pub async fn classify(&self, prompt: &str) -> Category {
        let call = CompletionCall::new(CLASSIFIER_SYSTEM_PROMPT, prompt)
            .with_max_tokens(CLASSIFIER_MAX_TOKENS)
            .with_temperature(CLASSIFIER_TEMPERATURE);

        match self.completion.complete(call).await {
            Ok(response) => {
                let category = Category::parse_lenient(&response);
                debug!(raw = %response.trim(), %category, "Classified prompt");
                category
            },
            Err(err) => {
                warn!(error = %err, "Classification failed, routing to follow-up");
                Category::FollowUp
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use async_trait::async_trait;

    use super::*;
    use crate::{ApplicationError, ports::CompletionStream};

    struct MockCompletion {
        response: Result<String, String>,
        calls: AtomicU32,
        last_call: Mutex<Option<CompletionCall>>,
    }

    impl MockCompletion {
        fn new(response: Result<String, String>) -> Self {
            Self {
                response,
                calls: AtomicU32::new(0),
                last_call: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl CompletionPort for MockCompletion {
        async fn complete(&self, call: CompletionCall) -> Result<String, ApplicationError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            *self.last_call.lock().unwrap() = Some(call);
            match &self.response {
                Ok(content) => Ok(content.clone()),
                Err(message) => Err(ApplicationError::Completion(message.clone())),
            }
        }

        async fn complete_stream(
            &self,
            _call: CompletionCall,
        ) -> Result<CompletionStream, ApplicationError> {
            Ok(Box::pin(futures::stream::empty()))
        }
    }

    #[tokio::test]
    async fn classifies_sales_response() {
        let completion = Arc::new(MockCompletion::new(Ok("sales".to_string())));
        let service = ClassifierService::new(Arc::clone(&completion) as Arc<dyn CompletionPort>);

        assert_eq!(service.classify("Sell our new product").await, Category::Sales);
        assert_eq!(completion.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn normalizes_response_before_matching() {
        let completion = Arc::new(MockCompletion::new(Ok("  SALES\n".to_string())));
        let service = ClassifierService::new(Arc::clone(&completion) as Arc<dyn CompletionPort>);

        assert_eq!(service.classify("anything").await, Category::Sales);
    }

    #[tokio::test]
    async fn unexpected_response_routes_to_follow_up() {
        let completion = Arc::new(MockCompletion::new(Ok("marketing".to_string())));
        let service = ClassifierService::new(Arc::clone(&completion) as Arc<dyn CompletionPort>);

        assert_eq!(service.classify("anything").await, Category::FollowUp);
    }

    #[tokio::test]
    async fn completion_error_routes_to_follow_up() {
        let completion = Arc::new(MockCompletion::new(Err("boom".to_string())));
        let service = ClassifierService::new(Arc::clone(&completion) as Arc<dyn CompletionPort>);

        assert_eq!(service.classify("anything").await, Category::FollowUp);
        assert_eq!(completion.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn sends_classifier_prompt_and_tuning() {
        let completion = Arc::new(MockCompletion::new(Ok("sales".to_string())));
        let service = ClassifierService::new(Arc::clone(&completion) as Arc<dyn CompletionPort>);

        service.classify("Pitch our widget").await;

        let call = completion.last_call.lock().unwrap().clone().unwrap();
        assert_eq!(call.system, CLASSIFIER_SYSTEM_PROMPT);
        assert_eq!(call.user, "Pitch our widget");
        assert_eq!(call.max_tokens, Some(CLASSIFIER_MAX_TOKENS));
        assert_eq!(call.temperature, Some(CLASSIFIER_TEMPERATURE));
    }
}
