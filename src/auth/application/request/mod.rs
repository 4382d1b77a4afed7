pub mod confirmation_request;
pub mod login_request;
pub mod register_request;
