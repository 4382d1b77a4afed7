use crate::auth::application::response::auth_response::AuthResponse;

/// The result of one form interaction that reached the server and got a
/// usable answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx answer.
    Succeeded(AuthResponse),
    /// Non-2xx answer carrying a message for the user.
    Rejected { status: u16, message: String },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

/// The controller's interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AwaitingResponse,
}
