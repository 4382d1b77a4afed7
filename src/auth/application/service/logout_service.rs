use crate::{
    AuthFormResult, EndpointUrl, SubmitOutcome,
    auth::application::service::{ErrorShape, SuccessBody, interpret},
    core::infrastructure::api_client::ApiClient,
};

pub struct LogoutService<'a> {
    api_client: &'a ApiClient,
}

impl<'a> LogoutService<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self { api_client }
    }

    /// Issues a body-less GET. Any 2xx counts as success, whatever the body.
    pub async fn execute(&self, url: &EndpointUrl) -> AuthFormResult<SubmitOutcome> {
        let raw = self.api_client.get(url).await?;
        interpret(raw, SuccessBody::Ignored, ErrorShape::Messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AuthFormConfig, AuthFormError};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn create_test_client(server_url: &str) -> (AuthFormConfig, ApiClient) {
        let config = AuthFormConfig::new(
            EndpointUrl::parse(format!("{}/api/user/login", server_url)).unwrap(),
            EndpointUrl::parse(format!("{}/api/user/logout", server_url)).unwrap(),
        );
        let client = ApiClient::new(&config, None).unwrap();
        (config, client)
    }

    #[tokio::test]
    async fn test_logout_empty_success() {
        let mock_server = MockServer::start().await;
        let (config, client) = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/user/logout"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = LogoutService::new(&client)
            .execute(&config.logout_url)
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_logout_failure_without_messages() {
        let mock_server = MockServer::start().await;
        let (config, client) = create_test_client(&mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/api/user/logout"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&mock_server)
            .await;

        let result = LogoutService::new(&client).execute(&config.logout_url).await;
        assert!(matches!(
            result,
            Err(AuthFormError::MalformedResponse { status: 503, .. })
        ));
    }
}
