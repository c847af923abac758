//! Draft service
//!
//! Generates email drafts in blocking or streaming mode, resolving the
//! assistant category through the classifier when the caller did not pick
//! one. Category resolution happens here and nowhere else.

use std::{fmt, pin::Pin, sync::Arc};

use domain::{Category, Draft, DraftChunk, DraftRequest, Recipient};
use futures::{Stream, StreamExt, future};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{CompletionCall, CompletionPort},
    prompts::{
        self, FOLLOW_UP_MAX_TOKENS, FOLLOW_UP_SYSTEM_PROMPT, FOLLOW_UP_TEMPERATURE,
        SALES_MAX_TOKENS, SALES_SYSTEM_PROMPT, SALES_TEMPERATURE,
    },
    services::ClassifierService,
};

/// Ordered draft chunks from a streaming generation
pub type DraftStream = Pin<Box<dyn Stream<Item = Result<DraftChunk, ApplicationError>> + Send>>;

/// Draft service producing generated emails
pub struct DraftService {
    completion: Arc<dyn CompletionPort>,
    classifier: ClassifierService,
}

impl fmt::Debug for DraftService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftService").finish_non_exhaustive()
    }
}

impl DraftService {
    /// Create a new draft service
    pub fn new(completion: Arc<dyn CompletionPort>, classifier: ClassifierService) -> Self {
        Self {
            completion,
            classifier,
        }
    }

    /// Generate a complete draft for the request.
    ///
    /// The blocking flow never fails outward: when the completion call or
    /// its response cannot be used, a locally built fallback draft is
    /// returned instead.
    #[instrument(skip(self, request))]
    pub async fn draft(&self, request: &DraftRequest) -> Draft {
        let category = self.resolve_category(request).await;
        self.generate(request.prompt(), request.recipient(), category)
            .await
    }

    /// Generate a complete draft for an already-resolved category
    #[instrument(skip(self, prompt))]
    pub async fn generate(
        &self,
        prompt: &str,
        recipient: &Recipient,
        category: Category,
    ) -> Draft {
        let call = build_draft_call(category, prompt, recipient);

        match self.completion.complete(call).await {
            Ok(content) => match parse_draft(&content) {
                Ok(draft) => {
                    debug!(%category, subject = %draft.subject, "Generated draft");
                    draft
                },
                Err(err) => {
                    warn!(error = %err, "Draft response was not valid JSON, using fallback");
                    prompts::fallback_draft(category, prompt, recipient)
                },
            },
            Err(err) => {
                warn!(error = %err, "Draft generation failed, using fallback");
                prompts::fallback_draft(category, prompt, recipient)
            },
        }
    }

    /// Generate a draft as an ordered chunk stream.
    ///
    /// Setup failures surface as an error before any chunk is produced.
    /// Once the stream is open there is no fallback: a mid-stream error is
    /// yielded to the consumer and the stream ends. Dropping the stream
    /// cancels the upstream call.
    #[instrument(skip(self, request))]
    pub async fn draft_stream(
        &self,
        request: &DraftRequest,
    ) -> Result<DraftStream, ApplicationError> {
        let category = self.resolve_category(request).await;
        self.generate_stream(request.prompt(), request.recipient(), category)
            .await
    }

    /// Stream a draft for an already-resolved category
    #[instrument(skip(self, prompt))]
    pub async fn generate_stream(
        &self,
        prompt: &str,
        recipient: &Recipient,
        category: Category,
    ) -> Result<DraftStream, ApplicationError> {
        let call = build_draft_call(category, prompt, recipient);
        let stream = self.completion.complete_stream(call).await?;

        debug!(%category, "Opened draft stream");

        // Empty deltas carry nothing for the consumer; errors pass through.
        let chunks = stream
            .filter(|delta| {
                future::ready(!matches!(delta, Ok(content) if content.is_empty()))
            })
            .map(|delta| delta.map(DraftChunk::from));

        Ok(Box::pin(chunks))
    }

    async fn resolve_category(&self, request: &DraftRequest) -> Category {
        match request.category() {
            Some(category) => category,
            None => self.classifier.classify(request.prompt()).await,
        }
    }
}

/// Build the completion call for a category.
///
/// Blocking and streaming generation both go through here, so the two modes
/// always send identical instructions for the same inputs.
fn build_draft_call(category: Category, prompt: &str, recipient: &Recipient) -> CompletionCall {
    match category {
        Category::Sales => CompletionCall::new(
            SALES_SYSTEM_PROMPT,
            prompts::format_sales_input(prompt, recipient),
        )
        .with_max_tokens(SALES_MAX_TOKENS)
        .with_temperature(SALES_TEMPERATURE),
        Category::FollowUp => CompletionCall::new(
            FOLLOW_UP_SYSTEM_PROMPT,
            prompts::format_follow_up_input(prompt, recipient),
        )
        .with_max_tokens(FOLLOW_UP_MAX_TOKENS)
        .with_temperature(FOLLOW_UP_TEMPERATURE),
    }
}

/// Parse a completion response into a draft
fn parse_draft(content: &str) -> Result<Draft, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;
    use futures::stream;

    use super::*;
    use crate::ports::CompletionStream;
    use crate::prompts::CLASSIFIER_SYSTEM_PROMPT;

    /// Scripted completion port recording every call it receives
    struct MockCompletion {
        responses: Mutex<VecDeque<Result<String, String>>>,
        stream_deltas: Mutex<Vec<Result<String, String>>>,
        fail_stream: bool,
        calls: Mutex<Vec<CompletionCall>>,
        stream_calls: Mutex<Vec<CompletionCall>>,
    }

    impl MockCompletion {
        fn new(responses: Vec<Result<String, String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                stream_deltas: Mutex::new(Vec::new()),
                fail_stream: false,
                calls: Mutex::new(Vec::new()),
                stream_calls: Mutex::new(Vec::new()),
            }
        }

        fn with_stream(mut self, deltas: Vec<Result<String, String>>) -> Self {
            self.stream_deltas = Mutex::new(deltas);
            self
        }

        fn with_failing_stream(mut self) -> Self {
            self.fail_stream = true;
            self
        }

        fn calls(&self) -> Vec<CompletionCall> {
            self.calls.lock().unwrap().clone()
        }

        fn stream_calls(&self) -> Vec<CompletionCall> {
            self.stream_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionPort for MockCompletion {
        async fn complete(&self, call: CompletionCall) -> Result<String, ApplicationError> {
            self.calls.lock().unwrap().push(call);
            let scripted = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            scripted.map_err(ApplicationError::Completion)
        }

        async fn complete_stream(
            &self,
            call: CompletionCall,
        ) -> Result<CompletionStream, ApplicationError> {
            self.stream_calls.lock().unwrap().push(call);
            if self.fail_stream {
                return Err(ApplicationError::Completion("stream setup failed".to_string()));
            }
            let deltas: Vec<Result<String, ApplicationError>> = self
                .stream_deltas
                .lock()
                .unwrap()
                .iter()
                .map(|delta| {
                    delta
                        .clone()
                        .map_err(ApplicationError::Completion)
                })
                .collect();
            Ok(Box::pin(stream::iter(deltas)))
        }
    }

    fn service_over(completion: &Arc<MockCompletion>) -> DraftService {
        let port: Arc<dyn CompletionPort> = Arc::clone(completion) as Arc<dyn CompletionPort>;
        DraftService::new(Arc::clone(&port), ClassifierService::new(port))
    }

    fn sales_request() -> DraftRequest {
        DraftRequest::new("Pitch our widget", "alice@acme.com", Some(Category::Sales)).unwrap()
    }

    fn unrouted_request() -> DraftRequest {
        DraftRequest::new("Pitch our widget", "alice@acme.com", None).unwrap()
    }

    const DRAFT_JSON: &str = r#"{"subject": "Widget pitch", "body": "Short and sharp."}"#;

    // ========================================================================
    // Category resolution
    // ========================================================================

    #[tokio::test]
    async fn explicit_category_skips_classification() {
        let completion = Arc::new(MockCompletion::new(vec![Ok(DRAFT_JSON.to_string())]));
        let service = service_over(&completion);

        let draft = service.draft(&sales_request()).await;

        assert_eq!(draft.subject, "Widget pitch");
        let calls = completion.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, SALES_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn absent_category_classifies_first() {
        let completion = Arc::new(MockCompletion::new(vec![
            Ok("sales".to_string()),
            Ok(DRAFT_JSON.to_string()),
        ]));
        let service = service_over(&completion);

        let draft = service.draft(&unrouted_request()).await;

        assert_eq!(draft.subject, "Widget pitch");
        let calls = completion.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].system, CLASSIFIER_SYSTEM_PROMPT);
        assert_eq!(calls[1].system, SALES_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn classifier_failure_falls_back_to_follow_up_generation() {
        let completion = Arc::new(MockCompletion::new(vec![
            Err("router down".to_string()),
            Ok(DRAFT_JSON.to_string()),
        ]));
        let service = service_over(&completion);

        service.draft(&unrouted_request()).await;

        let calls = completion.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].system, FOLLOW_UP_SYSTEM_PROMPT);
    }

    // ========================================================================
    // Blocking generation
    // ========================================================================

    #[tokio::test]
    async fn parses_draft_from_json_response() {
        let completion = Arc::new(MockCompletion::new(vec![Ok(DRAFT_JSON.to_string())]));
        let service = service_over(&completion);

        let draft = service.draft(&sales_request()).await;

        assert_eq!(draft, Draft::new("Widget pitch", "Short and sharp."));
    }

    #[tokio::test]
    async fn completion_error_yields_sales_fallback() {
        let completion = Arc::new(MockCompletion::new(vec![Err("model offline".to_string())]));
        let service = service_over(&completion);

        let draft = service.draft(&sales_request()).await;

        assert_eq!(draft.subject, "Quick question about acme.com");
        assert_eq!(
            draft.body,
            "Hi,\n\nRegarding: Pitch our widget\n\nWould love to discuss this further.\n\nBest regards"
        );
    }

    #[tokio::test]
    async fn malformed_response_yields_fallback() {
        let completion = Arc::new(MockCompletion::new(vec![Ok(
            "Sure! Here's your email:".to_string()
        )]));
        let service = service_over(&completion);

        let draft = service.draft(&sales_request()).await;

        // Nothing from the unusable response leaks into the fallback.
        assert_eq!(draft.subject, "Quick question about acme.com");
        assert!(!draft.body.contains("Sure!"));
    }

    #[tokio::test]
    async fn follow_up_fallback_has_generic_subject() {
        let completion = Arc::new(MockCompletion::new(vec![Err("timeout".to_string())]));
        let service = service_over(&completion);
        let request =
            DraftRequest::new("our call", "bob@widgets.io", Some(Category::FollowUp)).unwrap();

        let draft = service.draft(&request).await;

        assert_eq!(draft.subject, "Following up");
        assert!(draft.body.contains("our call"));
    }

    #[tokio::test]
    async fn fallback_uses_placeholder_for_missing_domain() {
        let completion = Arc::new(MockCompletion::new(vec![Err("down".to_string())]));
        let service = service_over(&completion);
        let request =
            DraftRequest::new("Pitch", "no-at-sign", Some(Category::Sales)).unwrap();

        let draft = service.draft(&request).await;

        assert_eq!(draft.subject, "Quick question about your business");
    }

    #[tokio::test]
    async fn sales_call_carries_domain_and_tuning() {
        let completion = Arc::new(MockCompletion::new(vec![Ok(DRAFT_JSON.to_string())]));
        let service = service_over(&completion);

        service.draft(&sales_request()).await;

        let call = &completion.calls()[0];
        assert!(call.user.contains("Generate a sales email about: Pitch our widget"));
        assert!(call.user.contains("Recipient domain: acme.com"));
        assert!(call.user.contains("Recipient email: alice@acme.com"));
        assert_eq!(call.max_tokens, Some(SALES_MAX_TOKENS));
        assert_eq!(call.temperature, Some(SALES_TEMPERATURE));
    }

    #[tokio::test]
    async fn follow_up_call_carries_address_and_tuning() {
        let completion = Arc::new(MockCompletion::new(vec![Ok(DRAFT_JSON.to_string())]));
        let service = service_over(&completion);
        let request =
            DraftRequest::new("our call", "bob@widgets.io", Some(Category::FollowUp)).unwrap();

        service.draft(&request).await;

        let call = &completion.calls()[0];
        assert_eq!(call.system, FOLLOW_UP_SYSTEM_PROMPT);
        assert_eq!(
            call.user,
            "Generate a follow-up email about: our call\nRecipient: bob@widgets.io"
        );
        assert_eq!(call.max_tokens, Some(FOLLOW_UP_MAX_TOKENS));
        assert_eq!(call.temperature, Some(FOLLOW_UP_TEMPERATURE));
    }

    // ========================================================================
    // Streaming generation
    // ========================================================================

    #[tokio::test]
    async fn stream_preserves_order_and_drops_empty_deltas() {
        let completion = Arc::new(
            MockCompletion::new(vec![]).with_stream(vec![
                Ok("Hel".to_string()),
                Ok(String::new()),
                Ok("lo".to_string()),
                Ok(String::new()),
                Ok(" world".to_string()),
            ]),
        );
        let service = service_over(&completion);

        let stream = service.draft_stream(&sales_request()).await.unwrap();
        let chunks: Vec<_> = stream.collect().await;

        let texts: Vec<&str> = chunks
            .iter()
            .map(|chunk| chunk.as_ref().unwrap().as_str())
            .collect();
        assert_eq!(texts, vec!["Hel", "lo", " world"]);
    }

    #[tokio::test]
    async fn stream_setup_failure_surfaces_before_any_chunk() {
        let completion = Arc::new(MockCompletion::new(vec![]).with_failing_stream());
        let service = service_over(&completion);

        let result = service.draft_stream(&sales_request()).await;

        assert!(matches!(result, Err(ApplicationError::Completion(_))));
    }

    #[tokio::test]
    async fn mid_stream_error_is_yielded_not_swallowed() {
        let completion = Arc::new(
            MockCompletion::new(vec![]).with_stream(vec![
                Ok("partial".to_string()),
                Err("connection reset".to_string()),
            ]),
        );
        let service = service_over(&completion);

        let stream = service.draft_stream(&sales_request()).await.unwrap();
        let chunks: Vec<_> = stream.collect().await;

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].as_ref().unwrap().as_str(), "partial");
        assert!(chunks[1].is_err());
    }

    #[tokio::test]
    async fn stream_resolves_category_before_opening() {
        let completion = Arc::new(
            MockCompletion::new(vec![Ok("sales".to_string())])
                .with_stream(vec![Ok("chunk".to_string())]),
        );
        let service = service_over(&completion);

        let stream = service.draft_stream(&unrouted_request()).await.unwrap();
        drop(stream);

        assert_eq!(completion.calls().len(), 1);
        assert_eq!(completion.calls()[0].system, CLASSIFIER_SYSTEM_PROMPT);
        let stream_calls = completion.stream_calls();
        assert_eq!(stream_calls.len(), 1);
        assert_eq!(stream_calls[0].system, SALES_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn streaming_and_blocking_build_the_same_call() {
        let completion = Arc::new(
            MockCompletion::new(vec![Ok(DRAFT_JSON.to_string())])
                .with_stream(vec![Ok("chunk".to_string())]),
        );
        let service = service_over(&completion);
        let request = sales_request();

        service.draft(&request).await;
        let stream = service.draft_stream(&request).await.unwrap();
        drop(stream);

        assert_eq!(completion.calls()[0], completion.stream_calls()[0]);
    }
}
