pub mod auth_response;
pub mod error_body;
