use axum::response::Response;
use http::StatusCode;
use http_body_util::BodyExt;
use uuid::Uuid;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Assert the fixed content type and CORS headers are present
pub fn assert_envelope_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,POST,PUT,OPTIONS"
    );
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

/// Assert an error envelope with the given status and message, returning its `error` text
pub async fn assert_error_envelope(
    response: Response,
    status: StatusCode,
    message: &str,
) -> String {
    assert_eq!(response.status(), status);
    assert_envelope_headers(&response);

    let body = parse_response_body(response).await;
    assert_eq!(body["message"], message);
    body["error"]
        .as_str()
        .expect("error field must be a string")
        .to_string()
}

/// Parses `properties/<uuid>.<ext>` into the UUID and extension
pub fn split_upload_key(key: &str) -> (Uuid, String) {
    let rest = key
        .strip_prefix("properties/")
        .unwrap_or_else(|| panic!("key {key} is outside the properties namespace"));
    let (id, extension) = rest
        .split_once('.')
        .unwrap_or_else(|| panic!("key {key} has no extension separator"));
    let id = Uuid::parse_str(id).unwrap_or_else(|_| panic!("key {key} does not contain a UUID"));
    (id, extension.to_string())
}
