//! tiny_http server adapter
//!
//! Handles routing, body reading, and response conversion for tiny_http.

use std::io::{Cursor, Read as _};

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use geopush::api::{self, ApiError, ApiResponse, PushQuery};
use geopush::config::GeopushConfig;
use geopush::core::ports::MessageStore;

type HttpResponse = Response<Cursor<Vec<u8>>>;

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve the push API on `bind` until the process is stopped
///
/// Requests are handled one at a time, in arrival order.
pub fn serve(bind: &str, store: &dyn MessageStore, config: &GeopushConfig) -> anyhow::Result<()> {
    let server = Server::http(bind)
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP server on {bind}: {e}"))?;
    log::info!("listening on http://{bind}");

    for mut request in server.incoming_requests() {
        let response = handle_api_request(&mut request, store, config);
        let status = response.status_code().0;
        log::debug!("{} {} -> {status}", request.method(), request.url());
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
///
/// Maps URL paths to handlers. Both `/api/v1/...` and `/api/...` are accepted.
pub fn handle_api_request(
    request: &mut Request,
    store: &dyn MessageStore,
    config: &GeopushConfig,
) -> HttpResponse {
    let url = request.url().to_string();
    let method = request.method().clone();

    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);

    match (&method, api_path) {
        (&Method::Get, "/status") => success_response(api::get_status()),

        (&Method::Post, "/push.json") => {
            let client_host = request
                .remote_addr()
                .map_or_else(|| "unknown".to_string(), |addr| addr.ip().to_string());
            let query = PushQuery::from_query_string(query);
            match read_body(request) {
                Ok(body) => push_response(api::handle_push(
                    store,
                    config,
                    &body,
                    &query,
                    &client_host,
                )),
                Err(e) => error_response(&e),
            }
        },

        _ => not_found_response(&format!("API endpoint not found: {method} {api_path}")),
    }
}

// =============================================================================
// BODY PARSING
// =============================================================================

/// Read the raw request body
fn read_body(request: &mut Request) -> Result<String, ApiError> {
    let mut body = String::new();
    request
        .as_reader()
        .read_to_string(&mut body)
        .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {e}")))?;
    Ok(body)
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

/// Push documents are sent as-is; JSONP callbacks need a script content type
fn push_response(result: Result<String, ApiError>) -> HttpResponse {
    match result {
        Ok(document) => {
            let content_type = if document.ends_with(");") {
                "application/javascript"
            } else {
                "application/json"
            };
            body_response(document, content_type, 200)
        },
        Err(e) => {
            log::warn!("push rejected: {e}");
            error_response(&e)
        },
    }
}

/// Create a successful JSON response
fn success_response<T: Serialize>(data: T) -> HttpResponse {
    let response = ApiResponse::success(data);
    json_response(&response, 200)
}

/// Create an error JSON response with appropriate status code
fn error_response(error: &ApiError) -> HttpResponse {
    let response = ApiResponse::error(error);
    json_response(&response, error.status_code())
}

/// Create a 404 not found response
fn not_found_response(message: &str) -> HttpResponse {
    error_response(&ApiError::not_found(message))
}

/// Serialize data to JSON response with status code
fn json_response<T: Serialize>(data: &T, status: u16) -> HttpResponse {
    let json = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    body_response(json, "application/json", status)
}

fn body_response(body: String, content_type: &str, status: u16) -> HttpResponse {
    let response = Response::from_data(body.into_bytes()).with_status_code(StatusCode(status));
    match Header::from_bytes("Content-Type", content_type) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
