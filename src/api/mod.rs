// REST endpoints wrapped around the tool router

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use rmcp::model::JsonObject;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::tools::ToolRouter;

const SERVICE_NAME: &str = "malaylanguage-mcp-server";

pub type AppState = Arc<ToolRouter>;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))
        .route("/tools/call", post(call_tool))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn service_info() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "mcp_endpoint": "/mcp",
        "health_endpoint": "/health",
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    let tools = state.list_tools();
    Json(json!({
        "tools": tools,
        "count": tools.len(),
    }))
}

/// Direct tool execution: `{"name": ..., "arguments": {...}}`.
///
/// Unlike the MCP path, a missing or unknown tool name is a 400 here.
async fn call_tool(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let name = payload
        .get("name")
        .and_then(|n| n.as_str())
        .ok_or_else(|| bad_request("Missing tool name"))?
        .to_string();

    if !state.contains(&name) {
        return Err(bad_request(format!("Unknown tool: {}", name)));
    }

    let arguments = match payload.get("arguments") {
        None | Some(Value::Null) => JsonObject::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(_) => return Err(bad_request("`arguments` must be an object")),
    };

    match state.call_tool(&name, &arguments).await {
        Ok(result) => {
            let items = serde_json::to_value(&result.content)
                .map_err(|e| internal_error(e.to_string()))?;
            Ok(Json(json!({
                "tool": name,
                "result": items,
            })))
        }
        Err(e) => Err(internal_error(e.to_string())),
    }
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.into() })))
}

fn internal_error(message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message.into() })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelCache;
    use crate::models::testing::StubProvider;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        let provider = Arc::new(StubProvider::default());
        let router = Arc::new(ToolRouter::new(Arc::new(ModelCache::new(provider))));
        create_router(router)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_healthy() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], SERVICE_NAME);
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mcp_endpoint"], "/mcp");
        assert_eq!(body["health_endpoint"], "/health");
    }

    #[tokio::test]
    async fn test_list_tools_returns_catalog() {
        let request = Request::builder().uri("/tools").body(Body::empty()).unwrap();
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 7);
        assert_eq!(body["tools"][0]["name"], "detect_language");
    }

    #[tokio::test]
    async fn test_call_tool_executes() {
        let request = post_json(
            "/tools/call",
            json!({"name": "normalize_malay", "arguments": {"text": "Saya SUKA Makanan"}}),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tool"], "normalize_malay");
        let text = body["result"][0]["text"].as_str().unwrap();
        assert!(text.contains("Normalized: saya suka makanan"), "{}", text);
        assert_eq!(body["result"][0]["type"], "text");
    }

    #[tokio::test]
    async fn test_call_tool_unknown_name_is_400() {
        let request = post_json("/tools/call", json!({"name": "nope", "arguments": {}}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn test_call_tool_missing_name_is_400() {
        let request = post_json("/tools/call", json!({"arguments": {}}));
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing tool name");
    }

    #[tokio::test]
    async fn test_call_tool_validation_error_is_200() {
        // Handler-level validation failures are payload content, not HTTP errors.
        let request = post_json(
            "/tools/call",
            json!({"name": "translate", "arguments": {"text": "hi", "source_lang": "en", "target_lang": "en"}}),
        );
        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["result"][0]["text"],
            "Error: Source and target languages must be different"
        );
    }
}
