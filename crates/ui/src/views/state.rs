use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    LoadFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_failure(failure: Option<&SessionError>) -> Self {
        match failure {
            Some(SessionError::FallbackUnavailable(_)) => ViewError::LoadFailed,
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::LoadFailed => "Something went wrong loading the data.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}
