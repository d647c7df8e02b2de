//! Request routing and the response envelope
//!
//! Both entry points (the axum server and the Lambda handler) normalize
//! their input into an [`ApiRequest`] and hand it to [`Dispatcher::dispatch`],
//! which always answers with an [`ApiResponse`].

use std::sync::Arc;

use http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use listing_storage::property::PropertyStore;
use serde::Serialize;
use serde_json::{json, Value};

use crate::media_storage::UploadSigner;
use crate::routes::{properties, uploads};
use crate::types::AppError;

/// Path suffix of the upload authorization route
pub const PRESIGN_PATH_SUFFIX: &str = "/uploads/presign";

/// Path suffix of the property creation route
pub const PROPERTIES_PATH_SUFFIX: &str = "/properties";

/// Methods advertised to browsers in preflight responses
const ALLOWED_METHODS: &str = "GET,POST,PUT,OPTIONS";

/// Normalized inbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Request path, including any stage or proxy prefix
    pub path: String,
    /// Raw request body, `None` when empty
    pub body: Option<String>,
}

impl ApiRequest {
    /// Creates a request, treating an empty body as absent
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, body: Option<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: body.filter(|body| !body.is_empty()),
        }
    }
}

/// Normalized response envelope
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// JSON body, always an object
    pub body: Value,
}

impl ApiResponse {
    /// Creates a response with the given status and body
    #[must_use]
    pub const fn new(status: StatusCode, body: Value) -> Self {
        Self { status, body }
    }

    /// Response whose body is `{ "message": message }`
    #[must_use]
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self::new(status, json!({ "message": message }))
    }

    /// Response whose body is the JSON form of `payload`
    ///
    /// # Errors
    ///
    /// Returns `AppError::Internal` if `payload` cannot be serialized
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> Result<Self, AppError> {
        let body = serde_json::to_value(payload)
            .map_err(|e| AppError::Internal(format!("Failed to serialize response: {e}")))?;
        Ok(Self::new(status, body))
    }

    /// Content type and CORS headers attached to every response
    #[must_use]
    pub fn headers() -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(4);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        headers
    }

    /// Renders the envelope as an HTTP response with a serialized body
    #[must_use]
    pub fn into_http(self) -> http::Response<String> {
        let mut response = http::Response::new(self.body.to_string());
        *response.status_mut() = self.status;
        *response.headers_mut() = Self::headers();
        response
    }
}

/// Handler selected for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight, answered without touching any handler
    Preflight,
    /// `POST …/uploads/presign`
    PresignUpload,
    /// `POST …/properties`
    CreateProperty,
    /// Nothing matched
    NotFound,
}

impl Route {
    /// Picks the route for `method` and `path`, first match wins
    ///
    /// Paths are matched by suffix so that stage or proxy prefixes such as
    /// `/prod` or `/api` are accepted transparently.
    #[must_use]
    pub fn resolve(method: &Method, path: &str) -> Self {
        if *method == Method::OPTIONS {
            Self::Preflight
        } else if *method == Method::POST && path.ends_with(PRESIGN_PATH_SUFFIX) {
            Self::PresignUpload
        } else if *method == Method::POST && path.ends_with(PROPERTIES_PATH_SUFFIX) {
            Self::CreateProperty
        } else {
            Self::NotFound
        }
    }
}

/// Routes requests to the upload and property handlers
///
/// Holds the collaborator handles for the lifetime of the process; it has no
/// per-request state and can be shared freely between concurrent requests.
pub struct Dispatcher {
    signer: Arc<dyn UploadSigner>,
    store: Arc<dyn PropertyStore>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given collaborators
    #[must_use]
    pub fn new(signer: Arc<dyn UploadSigner>, store: Arc<dyn PropertyStore>) -> Self {
        Self { signer, store }
    }

    /// Handles one request
    ///
    /// Never fails: handler errors are logged and rendered as error envelopes
    /// here.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        let route = Route::resolve(&request.method, &request.path);
        tracing::info!(method = %request.method, path = %request.path, ?route, "Dispatching request");

        let body = request.body.as_deref();
        let result = match route {
            Route::Preflight => Ok(ApiResponse::message(StatusCode::OK, "CORS OK")),
            Route::PresignUpload => {
                uploads::create_presigned_upload_url(self.signer.as_ref(), body).await
            }
            Route::CreateProperty => properties::create_property(self.store.as_ref(), body).await,
            Route::NotFound => Ok(ApiResponse::message(
                StatusCode::NOT_FOUND,
                "Route not found",
            )),
        };

        result.unwrap_or_else(AppError::into_api_response)
    }
}
