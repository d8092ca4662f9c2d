use jokebox::gateway::{FetchError, HttpJokeSource, JokeSource, Language, SearchRequest};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers a single HTTP request with a canned response and yields the
/// request line it received.
async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let read = socket.read(&mut buf).await.unwrap();
            if read == 0 {
                break;
            }
            request.extend_from_slice(&buf[..read]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    (format!("http://{addr}/joke/Any"), handle)
}

async fn search_against(status: &str, body: &str, query: &str) -> (jokebox::gateway::FetchOutcome, String) {
    let (url, server) = serve_once(status, body).await;
    let source = HttpJokeSource::new(url, None).unwrap();
    let outcome = source.search(&SearchRequest::new(query, Language::En)).await;
    (outcome, server.await.unwrap())
}

#[tokio::test]
async fn request_carries_fixed_parameters() {
    let body = r#"{"error":false,"amount":1,"jokes":[
        {"id":7,"type":"single","joke":"A cat walks into a bar","category":"Misc",
         "flags":{"nsfw":false,"religious":false,"political":false,"racist":false,"sexist":false,"explicit":false},
         "safe":true,"lang":"en"}
    ]}"#;
    let (outcome, request_line) = search_against("200 OK", body, "  cats  ").await;

    let jokes = outcome.unwrap();
    assert_eq!(jokes.len(), 1);
    assert_eq!(jokes[0].id, 7);

    assert!(request_line.starts_with("GET /joke/Any?"), "{request_line}");
    assert!(request_line.contains("amount=10"));
    assert!(request_line.contains("lang=en"));
    assert!(request_line.contains("blacklistFlags=nsfw%2Creligious%2Cpolitical%2Cracist%2Csexist%2Cexplicit"));
    assert!(request_line.contains("contains=cats "), "{request_line}");
}

#[tokio::test]
async fn blank_query_sends_no_filter() {
    let (outcome, request_line) = search_against("200 OK", r#"{"error":false,"amount":0,"jokes":[]}"#, "   ").await;

    assert_eq!(outcome, Ok(vec![]));
    assert!(!request_line.contains("contains="));
}

#[tokio::test]
async fn server_error_status_is_service_unavailable() {
    let (outcome, _) = search_against("503 Service Unavailable", "{}", "cats").await;
    assert_eq!(outcome, Err(FetchError::ServiceUnavailable));
}

#[tokio::test]
async fn client_error_status_is_invalid_request() {
    let (outcome, _) = search_against("404 Not Found", "{}", "cats").await;
    assert_eq!(outcome, Err(FetchError::InvalidRequest));
}

#[tokio::test]
async fn api_no_match_is_not_found() {
    let body = r#"{"error":true,"internalError":false,"code":106,"message":"No matching joke found"}"#;
    let (outcome, _) = search_against("200 OK", body, "zzzzqqq").await;
    assert_eq!(outcome, Err(FetchError::NotFound));
}

#[tokio::test]
async fn undecodable_body_is_unknown() {
    let (outcome, _) = search_against("200 OK", "<html>not json</html>", "cats").await;
    assert_eq!(outcome, Err(FetchError::Unknown));
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let source = HttpJokeSource::new("http://127.0.0.1:1/joke/Any", None).unwrap();
    let outcome = source.search(&SearchRequest::new("cats", Language::En)).await;

    let error = outcome.unwrap_err();
    assert_eq!(error, FetchError::Unreachable);
    assert_eq!(
        error.user_message(),
        "Unable to connect to the joke service. Please check your internet connection."
    );
}
