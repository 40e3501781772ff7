//! Domain error types.

/// Top-level error type for pipsim.
#[derive(Debug, thiserror::Error)]
pub enum PipsimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("bad bar data: {reason}")]
    Data { reason: String },

    #[error("insufficient data: have {bars} bars, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PipsimError> for std::process::ExitCode {
    fn from(err: &PipsimError) -> Self {
        let code: u8 = match err {
            PipsimError::Io(_) => 1,
            PipsimError::ConfigParse { .. }
            | PipsimError::ConfigMissing { .. }
            | PipsimError::ConfigInvalid { .. } => 2,
            PipsimError::Data { .. } => 3,
            PipsimError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
