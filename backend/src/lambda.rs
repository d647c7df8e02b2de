//! AWS Lambda adapter for the dispatcher

use lambda_http::{Body, Error, Request, Response};

use crate::dispatcher::{ApiRequest, Dispatcher};

/// Converts an API Gateway event into a normalized request
#[must_use]
pub fn api_request(event: Request) -> ApiRequest {
    let (parts, body) = event.into_parts();

    let body = match body {
        Body::Empty => None,
        Body::Text(text) => Some(text),
        Body::Binary(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
    };

    ApiRequest::new(parts.method, parts.uri.path(), body)
}

/// Handles one Lambda invocation
///
/// # Errors
///
/// Never returns an error; failures are rendered as error envelopes
pub async fn handle(dispatcher: &Dispatcher, event: Request) -> Result<Response<Body>, Error> {
    let response = dispatcher.dispatch(api_request(event)).await;
    Ok(response.into_http().map(Body::from))
}
