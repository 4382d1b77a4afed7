mod csrf_token;
mod endpoint_url;

pub use csrf_token::CsrfToken;
pub use endpoint_url::EndpointUrl;
