use serde::Serialize;

/// JSON body of `POST <login_url>`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
