//! Internal HTTP client that sends form requests and attaches the anti-forgery header.

use crate::{
    AuthFormConfig, AuthFormError, AuthFormResult, CsrfTokenSource, EndpointUrl, ValidationError,
};
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::{
    Client, Method, StatusCode,
    header::{HeaderMap, HeaderName},
};
use serde::Serialize;
use std::sync::Arc;
use url::Origin;

const SAFE_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::OPTIONS, Method::TRACE];

/// Status and body of a response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Internal HTTP client used by the form services.
///
/// Every request whose method is not GET, HEAD, OPTIONS or TRACE carries the
/// CSRF header when a token source is configured and the target shares the
/// login URL's origin. Cross-origin requests never see the token. A
/// configured source that has no token fails a same-origin request before
/// it is sent.
pub struct ApiClient {
    http_client: Client,
    csrf_header: HeaderName,
    csrf_source: Option<Arc<dyn CsrfTokenSource>>,
    csrf_origin: Origin,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl ApiClient {
    /// Creates a new `ApiClient`.
    ///
    /// # Errors
    /// Returns `AuthFormError::Config` if the header name is invalid and
    /// `AuthFormError::Connection` if the HTTP client cannot be built.
    pub fn new(
        config: &AuthFormConfig,
        csrf_source: Option<Arc<dyn CsrfTokenSource>>,
    ) -> AuthFormResult<Self> {
        let csrf_header = HeaderName::from_bytes(config.csrf_header.as_bytes()).map_err(|e| {
            AuthFormError::Config(format!("Invalid CSRF header '{}': {}", config.csrf_header, e))
        })?;

        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder
            .build()
            .map_err(|e| AuthFormError::Connection(e.to_string()))?;

        let rate_limiter = config.rate_limit.map(|rl| {
            let quota = Quota::per_second(rl.requests_per_second).allow_burst(rl.burst_size);
            DefaultDirectRateLimiter::direct(quota)
        });

        Ok(Self {
            http_client,
            csrf_header,
            csrf_source,
            csrf_origin: config.login_url.as_url().origin(),
            rate_limiter,
        })
    }

    /// Sends a GET request without a body.
    pub async fn get(&self, url: &EndpointUrl) -> AuthFormResult<RawResponse> {
        self.send(Method::GET, url, HeaderMap::new(), None::<&()>)
            .await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json<B>(
        &self,
        url: &EndpointUrl,
        headers: HeaderMap,
        body: &B,
    ) -> AuthFormResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, headers, Some(body)).await
    }

    async fn send<B>(
        &self,
        method: Method,
        url: &EndpointUrl,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> AuthFormResult<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let mut req_builder = self
            .http_client
            .request(method.clone(), url.as_url().clone())
            .headers(headers);

        if is_state_changing(&method) {
            if let Some(source) = self.csrf_source_for(url) {
                let token = source.csrf_token().await.ok_or_else(|| ValidationError::Field {
                    field: "csrf_token".to_string(),
                    message: "No CSRF token available for a state-changing request".to_string(),
                })?;
                req_builder = req_builder.header(self.csrf_header.clone(), token.header_value()?);
            }
        }

        if let Some(body) = body {
            req_builder = req_builder.json(body);
        }

        tracing::debug!(%method, url = %url, "dispatching request");
        let response = req_builder
            .send()
            .await
            .map_err(|e| AuthFormError::Connection(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AuthFormError::Connection(format!("Failed to read response: {}", e)))?
            .to_vec();
        tracing::debug!(%method, url = %url, status = status.as_u16(), "response received");

        Ok(RawResponse { status, body })
    }

    fn csrf_source_for(&self, url: &EndpointUrl) -> Option<&Arc<dyn CsrfTokenSource>> {
        let source = self.csrf_source.as_ref()?;
        if url.as_url().origin() == self.csrf_origin {
            Some(source)
        } else {
            tracing::debug!(url = %url, "cross-origin request, CSRF token withheld");
            None
        }
    }
}

fn is_state_changing(method: &Method) -> bool {
    !SAFE_METHODS.contains(method)
}
