use serde::Serialize;

/// JSON body of `POST <confirmation_url>`.
#[derive(Debug, Serialize)]
pub struct ConfirmationRequest<'a> {
    pub email: &'a str,
}
