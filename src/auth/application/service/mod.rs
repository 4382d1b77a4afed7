pub mod confirmation_service;
pub mod login_service;
pub mod logout_service;
pub mod register_service;

use crate::{
    AuthFormError, AuthFormResult, SubmitOutcome,
    auth::application::response::{auth_response::AuthResponse, error_body::ErrorBody},
    core::infrastructure::api_client::RawResponse,
};
use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
};

/// Whether a 2xx answer must carry a JSON body to count as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SuccessBody {
    Required,
    Ignored,
}

/// Which failure bodies count as carrying a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorShape {
    /// `messages` or `msg` only.
    Messages,
    /// Also `{"<field>": "..."}` and `{"<field>": ["..."]}`.
    FieldKeyed,
}

/// `Content-Type` and `Accept` both set to JSON.
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Maps a raw response onto the response contract.
///
/// 204 is a success without a body even where one is required. A failure
/// status must carry a JSON object with at least one message of the given
/// shape; anything else is `MalformedResponse`.
pub(crate) fn interpret(
    raw: RawResponse,
    success_body: SuccessBody,
    error_shape: ErrorShape,
) -> AuthFormResult<SubmitOutcome> {
    let status = raw.status.as_u16();

    if raw.status == StatusCode::NO_CONTENT {
        return Ok(SubmitOutcome::Succeeded(AuthResponse::default()));
    }

    if raw.status.is_success() {
        return match success_body {
            SuccessBody::Required => AuthResponse::from_slice(&raw.body)
                .map(SubmitOutcome::Succeeded)
                .map_err(|e| AuthFormError::MalformedResponse {
                    status,
                    reason: format!("Failed to parse response: {}", e),
                }),
            SuccessBody::Ignored => Ok(SubmitOutcome::Succeeded(
                AuthResponse::from_slice(&raw.body).unwrap_or_default(),
            )),
        };
    }

    let error_body =
        ErrorBody::from_slice(&raw.body).map_err(|e| AuthFormError::MalformedResponse {
            status,
            reason: format!("Failed to parse error body: {}", e),
        })?;

    let message = match error_shape {
        ErrorShape::Messages => error_body.first_message(),
        ErrorShape::FieldKeyed => error_body
            .first_message()
            .or_else(|| error_body.first_field_message()),
    };
    match message {
        Some(message) => Ok(SubmitOutcome::Rejected {
            status,
            message: message.to_string(),
        }),
        None => Err(AuthFormError::MalformedResponse {
            status,
            reason: "response carries no messages".to_string(),
        }),
    }
}
