pub mod credentials;
pub mod form_layout;
pub mod submit_outcome;
