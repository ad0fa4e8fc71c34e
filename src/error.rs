//! Application-level error type.
//!
//! Every fallible path in the binary funnels into `AppError`, which pairs a
//! process exit code with a human-readable message. Exit codes:
//! - 2: usage or input problems (bad arguments, unreadable CSV, bad columns)
//! - 3: not enough usable data, or no candidate produced a usable fit
//! - 4: internal failures (filesystem writes, serialization)

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_message_only() {
        let err = AppError::new(3, "no usable fit");
        assert_eq!(err.to_string(), "no usable fit");
        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.message(), "no usable fit");
    }
}
