use sitechat_core::lead::PushoverNotifier;
use sitechat_core::{
    ChatError, ChatSession, ContextDocuments, LlmClient, Message, Notifier, OpenAIClient,
    PromptAssembler,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one HTTP request on a local port with a canned response.
/// The handle resolves to the raw request (head and body).
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];

        // Read the head, then as much body as Content-Length announces.
        let head_end = loop {
            let n = stream.read(&mut buf).await.unwrap();
            assert!(n > 0, "connection closed before request head");
            request.extend_from_slice(&buf[..n]);
            if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while request.len() < head_end + content_length {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\n\
             Content-Type: application/json\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8_lossy(&request).into_owned()
    });

    (url, handle)
}

fn assembler() -> PromptAssembler {
    PromptAssembler::new("Ada", ContextDocuments::new("Summary.", "Profile."))
}

// ========================================================================
// OpenAIClient against a local server (llm/openai.rs)
// ========================================================================

#[tokio::test]
async fn test_openai_client_posts_chat_completion() {
    let (url, server) = serve_once(
        "200 OK",
        concat!(
            r#"{"choices":[{"message":{"role":"assistant","content":"I write Rust."}}],"#,
            r#""usage":{"prompt_tokens":12,"completion_tokens":4}}"#,
        ),
    )
    .await;
    let client = OpenAIClient::new("test-key").with_base_url(url);

    let response = client.chat(&[Message::user("Hi")]).await.unwrap();
    assert_eq!(response.message, Message::assistant("I write Rust."));

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /v1/chat/completions "));
    assert!(request.to_lowercase().contains("authorization: bearer test-key"));
    assert!(request.contains(r#""content":"Hi""#));
}

#[tokio::test]
async fn test_server_error_is_completion_failure() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        r#"{"error":{"message":"model overloaded"}}"#,
    )
    .await;
    let llm = OpenAIClient::new("test-key").with_base_url(url);
    let mut session = ChatSession::new(Box::new(llm), assembler());

    let err = session.respond("Hi").await.unwrap_err();
    server.await.unwrap();

    assert!(matches!(err, ChatError::Completion(_)));
    assert!(err.to_string().contains("500"));
    assert!(err.to_string().contains("model overloaded"));
    assert!(session.transcript().is_empty());
}

// ========================================================================
// PushoverNotifier against a local server (lead/notify.rs)
// ========================================================================

#[tokio::test]
async fn test_pushover_notifier_posts_form() {
    let (url, server) = serve_once("200 OK", r#"{"status":1}"#).await;
    let notifier = PushoverNotifier::new("app-token", "user-key").with_endpoint(url);

    notifier
        .notify("New lead: Grace (grace@example.com) interacted with the assistant.")
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST / "));
    assert!(request
        .to_lowercase()
        .contains("content-type: application/x-www-form-urlencoded"));
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    assert!(body.contains("token=app-token"));
    assert!(body.contains("user=user-key"));
    assert!(body.contains("message=New+lead%3A+Grace"));
}

#[tokio::test]
async fn test_pushover_rejection_is_lead_capture_error() {
    let (url, server) = serve_once(
        "400 Bad Request",
        r#"{"status":0,"errors":["user key is invalid"]}"#,
    )
    .await;
    let notifier = PushoverNotifier::new("app-token", "bad-user").with_endpoint(url);

    let err = notifier.notify("New lead").await.unwrap_err();
    server.await.unwrap();

    assert!(err.is_lead_capture());
    assert!(err.to_string().contains("400"));
    assert!(err.to_string().contains("user key is invalid"));
}
