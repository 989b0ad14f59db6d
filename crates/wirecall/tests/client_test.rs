//! End-to-end tests: executor + client + classifiers over a mock server

use async_trait::async_trait;
use futures::future::BoxFuture;
use mockall::mock;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wirecall::classifier::{ExceptionClassifier, ResultClassifier};
use wirecall::client::ApiClient;
use wirecall::code::ErrorCode;
use wirecall::error::NetworkError;
use wirecall::executor::NetworkExecutor;
use wirecall::operation::Operation;
use wirecall::state::ErrorStateHandler;
use wirecall_transport::{ApiRequest, ConnectivityProbe, HttpTransport, Transport};

mock! {
    Probe {}

    #[async_trait]
    impl ConnectivityProbe for Probe {
        async fn is_connection_available(&self) -> bool;
    }
}

#[derive(Debug, PartialEq, Deserialize)]
struct Account {
    id: u64,
}

/// Collaborator that records states and plays along with renewal.
#[derive(Default)]
struct Handler {
    states: Mutex<Vec<String>>,
}

#[async_trait]
impl ErrorStateHandler for Handler {
    async fn handle_error_entity_state(&self, _error: &NetworkError) {
        self.states.lock().unwrap().push("entity_state".into());
    }

    async fn handle_refresh_token_state(
        &self,
        _scope: CancellationToken,
        on_renewed: BoxFuture<'_, ()>,
    ) {
        self.states.lock().unwrap().push("refresh_token".into());
        on_renewed.await;
    }

    async fn handle_global_action(&self, code: &ErrorCode, _message: &str) {
        self.states
            .lock()
            .unwrap()
            .push(format!("global_action:{}", code.raw()));
    }
}

fn client_over(server_uri: &str, probe: Arc<dyn ConnectivityProbe>) -> (ApiClient, Arc<Handler>) {
    let handler = Arc::new(Handler::default());
    let transport: Arc<dyn Transport> =
        Arc::new(HttpTransport::new().expect("create transport"));
    let client = ApiClient::new(
        transport,
        server_uri.to_string(),
        ResultClassifier::new(handler.clone()),
        ExceptionClassifier::new(probe),
    );
    (client, handler)
}

fn online_probe() -> Arc<dyn ConnectivityProbe> {
    let mut probe = MockProbe::new();
    probe.expect_is_connection_available().return_const(true);
    Arc::new(probe)
}

#[tokio::test]
async fn test_legacy_success_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": {"type": "success", "message": "ok"}, "data": {"id": 7}}"#,
        ))
        .mount(&server)
        .await;

    let (client, _) = client_over(&server.uri(), online_probe());
    let url = client.endpoint("/accounts/7").unwrap();

    let account: Account = client.call(ApiRequest::new("GET", url)).await.unwrap();
    assert_eq!(account, Account { id: 7 });
}

#[tokio::test]
async fn test_legacy_unauthorized_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/accounts/7"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (client, _) = client_over(&server.uri(), online_probe());
    let url = client.endpoint("/accounts/7").unwrap();

    let err = client
        .call::<Account>(ApiRequest::new("GET", url))
        .await
        .unwrap_err();
    assert!(matches!(err, NetworkError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_modern_error_body_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/transfers"))
        .respond_with(ResponseTemplate::new(426).set_body_string(
            r#"{"traceId": "tr-1", "type": "UpdateRequired", "detail": "too old"}"#,
        ))
        .mount(&server)
        .await;

    let (client, _) = client_over(&server.uri(), online_probe());
    let url = client.endpoint("/transfers").unwrap();

    let err = client
        .call_v2::<Account>(ApiRequest::new("POST", url))
        .await
        .unwrap_err();

    match err {
        NetworkError::UpdateRequired { data } => {
            assert_eq!(data.trace_id.as_deref(), Some("tr-1"));
            assert_eq!(data.error_message(), "too old");
        }
        other => panic!("expected UpdateRequired, got {other:?}"),
    }
}

#[tokio::test]
async fn test_strong_authentication_headers_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("AuthenticatedActionId", "action-77")
                .set_body_string(
                    r#"{"status": {"type": "AUTHENTICATION_CODE_REQUIRED", "message": "confirm"}}"#,
                ),
        )
        .mount(&server)
        .await;

    let (client, _) = client_over(&server.uri(), online_probe());
    let url = client.endpoint("/payments").unwrap();

    let err = client
        .call::<Account>(ApiRequest::new("POST", url))
        .await
        .unwrap_err();

    match err {
        NetworkError::StrongAuthentication { auth_id, .. } => {
            assert_eq!(auth_id, "action-77");
        }
        other => panic!("expected StrongAuthentication, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_consults_probe_once() {
    let mut probe = MockProbe::new();
    probe
        .expect_is_connection_available()
        .times(1)
        .return_const(false);

    // Nothing listens on port 9; the send fails below the protocol layer.
    let (client, _) = client_over("http://127.0.0.1:9", Arc::new(probe));
    let url = client.endpoint("/ping").unwrap();

    let err = client
        .call::<Account>(ApiRequest::new("GET", url))
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::NoConnection { .. }));
}

#[tokio::test]
async fn test_renewal_end_to_end() {
    let server = MockServer::start().await;

    // First call is rejected with a stale session; the renewed retry
    // succeeds.
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"status": {"type": "success", "message": "ok"}, "data": {"id": 5}}"#,
        ))
        .mount(&server)
        .await;

    let (client, handler) = client_over(&server.uri(), online_probe());
    let client = Arc::new(client);
    let url = client.endpoint("/profile").unwrap();

    let executor = NetworkExecutor::new(
        ExceptionClassifier::new(online_probe()),
        handler.clone(),
    );

    let received = Arc::new(Mutex::new(None));
    let operation = Operation::<Account>::builder()
        .execute({
            let client = Arc::clone(&client);
            let url = url.clone();
            move || {
                let client = Arc::clone(&client);
                let url = url.clone();
                async move { Ok(client.call(ApiRequest::new("GET", url)).await?) }
            }
        })
        .on_success({
            let received = Arc::clone(&received);
            move |account: &Account| {
                *received.lock().unwrap() = Some(account.id);
            }
        })
        .build();

    executor
        .run(CancellationToken::new(), &operation)
        .await
        .unwrap();

    assert_eq!(*received.lock().unwrap(), Some(5));
    assert_eq!(
        handler.states.lock().unwrap().as_slice(),
        &["refresh_token".to_string()]
    );
}
