use crate::{
    AuthFormResult, EndpointUrl, Registration, SubmitOutcome,
    auth::application::{
        request::register_request::RegisterRequest,
        service::{ErrorShape, SuccessBody, interpret, json_headers},
    },
    core::infrastructure::api_client::ApiClient,
};
use reqwest::header::HeaderMap;

pub struct RegisterService<'a> {
    api_client: &'a ApiClient,
    default_headers: HeaderMap,
}

impl<'a> RegisterService<'a> {
    pub fn new(api_client: &'a ApiClient) -> Self {
        Self {
            api_client,
            default_headers: json_headers(),
        }
    }

    pub async fn execute(
        &self,
        url: &EndpointUrl,
        registration: &Registration,
    ) -> AuthFormResult<SubmitOutcome> {
        let credentials = registration.credentials();
        let request = RegisterRequest {
            username: credentials.username(),
            email: registration.email(),
            password: credentials.password(),
        };
        let raw = self
            .api_client
            .post_json(url, self.default_headers.clone(), &request)
            .await?;
        interpret(raw, SuccessBody::Required, ErrorShape::FieldKeyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AuthFormConfig, FieldLocator, FieldSelector, InMemoryPage,
        core::domain::model::form_layout::REGISTER_FORM,
    };
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    #[tokio::test]
    async fn test_register_created() {
        let mock_server = MockServer::start().await;
        let config = AuthFormConfig::new(
            EndpointUrl::parse(format!("{}/api/user/login", mock_server.uri())).unwrap(),
            EndpointUrl::parse(format!("{}/api/user/logout", mock_server.uri())).unwrap(),
        );
        let register_url =
            EndpointUrl::parse(format!("{}/api/user/create_user", mock_server.uri())).unwrap();
        let client = ApiClient::new(&config, None).unwrap();

        Mock::given(method("POST"))
            .and(path("/api/user/create_user"))
            .and(body_json(serde_json::json!({
                "username": "carol",
                "email": "carol@example.org",
                "password": "pw"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "msg": "A confirmation email has been sent to carol@example.org."
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = InMemoryPage::new()
            .with_field(FieldSelector::new(REGISTER_FORM, FieldLocator::Id, "username"), "carol")
            .with_field(
                FieldSelector::new(REGISTER_FORM, FieldLocator::Id, "email"),
                "carol@example.org",
            )
            .with_field(FieldSelector::new(REGISTER_FORM, FieldLocator::Id, "password"), "pw");
        let registration = Registration::read(&page, FieldLocator::Id).unwrap();

        let outcome = RegisterService::new(&client)
            .execute(&register_url, &registration)
            .await
            .unwrap();
        match outcome {
            SubmitOutcome::Succeeded(response) => assert_eq!(
                response.first_message(),
                Some("A confirmation email has been sent to carol@example.org.")
            ),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
