use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Path clients POST JSON-RPC messages to, announced on the SSE stream.
pub const MESSAGE_PATH: &str = "/message";

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);

    if global.verbose {
        eprintln!("Starting MCP server with SSE transport on {addr}...");
        eprintln!("SSE endpoint: http://{addr}/sse");
        eprintln!("Message endpoint: http://{addr}{MESSAGE_PATH}");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;
    log::info!("MCP server listening on http://{addr}");

    axum::serve(listener, router(global))
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: crate::Global) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", get(sse_handler))
        .route(MESSAGE_PATH, post(message_handler))
        .layer(cors)
        .with_state(Arc::new(global))
}

async fn sse_handler() -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let endpoint = Event::default().event("endpoint").data(MESSAGE_PATH);
    Sse::new(stream::once(async move { Ok(endpoint) }))
}

/// The body is taken as raw text so malformed JSON gets a JSON-RPC parse
/// error instead of an HTTP rejection.
async fn message_handler(
    State(global): State<Arc<crate::Global>>,
    body: String,
) -> Json<super::JsonRpcResponse> {
    Json(super::handle_request(&body, &global).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tests::global;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve the router on an ephemeral port and send one raw HTTP/1.1
    /// request, returning the whole response.
    async fn exchange(request: String) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(global())).await.unwrap();
        });

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    fn post_message(body: &str) -> String {
        format!(
            "POST {MESSAGE_PATH} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn test_message_handler_dispatches() {
        let body = serde_json::json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"});
        let Json(response) = message_handler(State(Arc::new(global())), body.to_string()).await;
        let response = serde_json::to_value(response).unwrap();

        assert_eq!(response["id"], 7);
        assert_eq!(
            response["result"]["tools"][0]["name"],
            "pdf_extract_questions"
        );
    }

    #[tokio::test]
    async fn test_message_handler_reports_parse_error() {
        let Json(response) = message_handler(State(Arc::new(global())), "{oops".into()).await;
        let response = serde_json::to_value(response).unwrap();

        assert_eq!(response["error"]["code"], crate::mcp::PARSE_ERROR);
    }

    #[tokio::test]
    async fn test_router_serves_tools_list() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let response = exchange(post_message(body)).await;

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("mindmap_parse"));
    }

    #[tokio::test]
    async fn test_router_announces_message_endpoint() {
        let request =
            "GET /sse HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string();
        let response = exchange(request).await;

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("text/event-stream"));
        assert!(response.contains("event: endpoint"));
        assert!(response.contains("data: /message"));
    }
}
