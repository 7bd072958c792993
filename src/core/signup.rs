//! Client-side state machine of the newsletter signup widget.

/// `user@domain.tld` where the local part is non-empty, the domain has a dot
/// after its first character, and the TLD has at least two characters.
pub fn is_valid_email(email: &str) -> bool {
    let Some(at) = email.find('@') else {
        return false;
    };
    if at < 1 {
        return false;
    }
    let domain = &email[at + 1..];
    let Some(dot) = domain.rfind('.') else {
        return false;
    };
    if dot < 1 {
        return false;
    }
    domain[dot + 1..].chars().count() >= 2
}

pub const MSG_SUBMITTING: &str = "Storing at the speed of light";
pub const MSG_SUCCESS: &str = "Welcome aboard";
pub const MSG_FAILURE: &str = "Something went wrong";

/// Milliseconds the failure message stays up before the form reopens.
pub const FAILURE_RESET_MS: i32 = 2000;
/// Milliseconds the input takes to fade out on submit.
pub const SUBMIT_FADE_MS: i32 = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupState {
    /// Nothing typed; placeholder visible.
    Empty,
    /// Text present but not a valid address.
    Invalid,
    /// Valid address; submit button visible.
    Valid,
    Submitting,
    Succeeded,
    Failed,
}

impl SignupState {
    pub fn from_input(value: &str) -> Self {
        if value.is_empty() {
            SignupState::Empty
        } else if is_valid_email(value) {
            SignupState::Valid
        } else {
            SignupState::Invalid
        }
    }

    /// Input edits are ignored while a request is in flight or after success.
    pub fn on_input(self, value: &str) -> Self {
        match self {
            SignupState::Submitting | SignupState::Succeeded => self,
            _ => Self::from_input(value),
        }
    }

    /// Returns `Some(Submitting)` when a submit should be sent.
    pub fn on_submit(self) -> Option<Self> {
        (self == SignupState::Valid).then_some(SignupState::Submitting)
    }

    pub fn on_response(self, ok: bool) -> Self {
        match (self, ok) {
            (SignupState::Submitting, true) => SignupState::Succeeded,
            (SignupState::Submitting, false) => SignupState::Failed,
            (other, _) => other,
        }
    }

    /// After the failure message times out the form is editable again.
    pub fn on_failure_timeout(self, value: &str) -> Self {
        match self {
            SignupState::Failed => Self::from_input(value),
            other => other,
        }
    }

    pub fn submit_visible(self) -> bool {
        self == SignupState::Valid
    }

    pub fn message(self) -> Option<&'static str> {
        match self {
            SignupState::Submitting => Some(MSG_SUBMITTING),
            SignupState::Succeeded => Some(MSG_SUCCESS),
            SignupState::Failed => Some(MSG_FAILURE),
            _ => None,
        }
    }
}

/// Request body the endpoint expects.
pub fn request_body(email: &str) -> String {
    let escaped: String = email
        .chars()
        .flat_map(|c| match c {
            '"' => vec!['\\', '"'],
            '\\' => vec!['\\', '\\'],
            c => vec![c],
        })
        .collect();
    format!("{{\"email\":\"{}\"}}", escaped)
}
