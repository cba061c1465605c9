use distla_abi::WorkType;
use thiserror::Error;

/// Errors raised by the marshaling layer itself.
///
/// Native status codes are not errors at this level; they come back as
/// `Ok(status)` and are left for the caller to interpret.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LowlevelError {
    #[error("workspace query not yet performed")]
    InvalidState,

    #[error("argument {position}: {text:?} contains non-ASCII character {character:?}")]
    Encoding {
        position: usize,
        text: String,
        character: char,
    },

    #[error("unknown workspace type code '{0}' (expected one of I, S, D, C, Z)")]
    UnknownWorkType(char),

    #[error("workspace query returned unusable length {value} for a '{work_type}' array")]
    InvalidWorkLength { work_type: WorkType, value: f64 },

    #[error("unknown routine '{0}'")]
    UnknownRoutine(String),

    #[error("{routine}: cannot marshal call: {reason}")]
    CallShape { routine: String, reason: String },

    #[error("{0}")]
    Library(String),
}

impl LowlevelError {
    pub fn call_shape(routine: impl Into<String>, reason: impl Into<String>) -> Self {
        LowlevelError::CallShape {
            routine: routine.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LowlevelError>;
