use crate::{
    AuthFormResult, EndpointUrl, SubmitOutcome,
    auth::application::{
        request::confirmation_request::ConfirmationRequest,
        service::{ErrorShape, SuccessBody, interpret, json_headers},
    },
    core::infrastructure::api_client::ApiClient,
};
use reqwest::header::HeaderMap;

/// Asks the server to send the account confirmation email again.
pub struct ConfirmationService<'a> {
    api_client: &'a ApiClient,
    default_headers: HeaderMap,
}

impl<'a> ConfirmationService<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self {
            api_client,
            default_headers: json_headers(),
        }
    }

    pub async fn execute(&self, url: &EndpointUrl, email: &str) -> AuthFormResult<SubmitOutcome> {
        let request = ConfirmationRequest { email };
        let raw = self
            .api_client
            .post_json(url, self.default_headers.clone(), &request)
            .await?;
        interpret(raw, SuccessBody::Required, ErrorShape::FieldKeyed)
    }
}
