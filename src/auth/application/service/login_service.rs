use crate::{
    AuthFormResult, Credentials, EndpointUrl, SubmitOutcome,
    auth::application::{
        request::login_request::LoginRequest,
        service::{ErrorShape, SuccessBody, interpret, json_headers},
    },
    core::infrastructure::api_client::ApiClient,
};
use reqwest::header::HeaderMap;

pub struct LoginService<'a> {
    api_client: &'a ApiClient,
    default_headers: HeaderMap,
}

impl<'a> LoginService<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self {
            api_client,
            default_headers: json_headers(),
        }
    }

    /// Posts the credentials as JSON. A 2xx answer must carry a JSON body.
    pub async fn execute(
        &self,
        url: &EndpointUrl,
        credentials: &Credentials,
    ) -> AuthFormResult<SubmitOutcome> {
        let request = self.build_login_request(credentials);
        let raw = self
            .api_client
            .post_json(url, self.default_headers.clone(), &request)
            .await?;
        interpret(raw, SuccessBody::Required, ErrorShape::Messages)
    }

    fn build_login_request<'c>(&self, credentials: &'c Credentials) -> LoginRequest<'c> {
        LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        }
    }
}
