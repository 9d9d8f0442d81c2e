/*!
 * Tests for chat-completion provider implementations
 */

use lingopress::errors::ProviderError;
use lingopress::providers::mock::MockProvider;
use lingopress::providers::{ChatProvider, ChatRequest};

fn request(system: &str, user: &str) -> ChatRequest {
    ChatRequest {
        model: "test-model".to_string(),
        system: system.to_string(),
        user: user.to_string(),
        temperature: 0.5,
        max_tokens: 100,
    }
}

#[tokio::test]
async fn test_working_mock_shouldEchoUserText() {
    let provider = MockProvider::working();

    let completion = provider
        .complete(request("system prompt", "Translate this title: Welcome"))
        .await
        .unwrap();

    assert_eq!(completion, "Translate this title: Welcome");
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_failing_mock_shouldReturnHttpError() {
    let provider = MockProvider::failing();

    let result = provider.complete(request("system", "user")).await;

    assert!(matches!(result, Err(ProviderError::Http { status: 500, .. })));
    assert_eq!(provider.request_count(), 1);
}

#[tokio::test]
async fn test_failing_when_contains_shouldFailOnlyOnMatchingPrompts() {
    let provider = MockProvider::failing_when_contains("Spanish");

    let ok = provider
        .complete(request("Translate into French (fr)", "Hello"))
        .await;
    assert!(ok.is_ok());

    let err = provider
        .complete(request("Translate into Spanish (es)", "Hello"))
        .await;
    assert!(matches!(err, Err(ProviderError::Http { .. })));

    assert_eq!(provider.request_count(), 2);
}

#[tokio::test]
async fn test_empty_mock_shouldReturnEmptyCompletion() {
    let provider = MockProvider::empty();

    let completion = provider.complete(request("system", "user")).await.unwrap();
    assert_eq!(completion, "");
}

#[tokio::test]
async fn test_custom_response_shouldOverrideEcho() {
    let provider =
        MockProvider::working().with_custom_response(|req| format!("[{}] translated", req.user));

    let completion = provider.complete(request("system", "Welcome")).await.unwrap();
    assert_eq!(completion, "[Welcome] translated");
}

#[tokio::test]
async fn test_counter_handle_shouldTrackRequestsAfterMove() {
    let provider = MockProvider::working();
    let counter = provider.counter();

    provider.complete(request("system", "one")).await.unwrap();
    provider.complete(request("system", "two")).await.unwrap();

    assert_eq!(counter.load(std::sync::atomic::Ordering::SeqCst), 2);
}
