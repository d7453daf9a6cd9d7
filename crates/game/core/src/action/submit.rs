//! Validation for new funeral applications.
use crate::config::GameConfig;

/// Rejected application. Raised before any record exists.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmissionError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("cause of death must not be empty")]
    EmptyCause,

    #[error("name is {len} characters long (max {max})")]
    NameTooLong { len: usize, max: usize },

    #[error("cause of death is {len} characters long (max {max})")]
    CauseTooLong { len: usize, max: usize },
}

/// A trimmed, length-checked application for a funeral.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Submission {
    name: String,
    cause: String,
}

impl Submission {
    pub fn new(name: &str, cause: &str) -> Result<Self, SubmissionError> {
        let name = name.trim();
        let cause = cause.trim();

        if name.is_empty() {
            return Err(SubmissionError::EmptyName);
        }
        if cause.is_empty() {
            return Err(SubmissionError::EmptyCause);
        }

        let len = name.chars().count();
        if len > GameConfig::MAX_NAME_CHARS {
            return Err(SubmissionError::NameTooLong {
                len,
                max: GameConfig::MAX_NAME_CHARS,
            });
        }
        let len = cause.chars().count();
        if len > GameConfig::MAX_CAUSE_CHARS {
            return Err(SubmissionError::CauseTooLong {
                len,
                max: GameConfig::MAX_CAUSE_CHARS,
            });
        }

        Ok(Self {
            name: name.to_string(),
            cause: cause.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub fn into_parts(self) -> (String, String) {
        (self.name, self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let submission = Submission::new("  Test ", "\tBoredom\n").unwrap();
        assert_eq!(submission.name(), "Test");
        assert_eq!(submission.cause(), "Boredom");
    }

    #[test]
    fn blank_fields_are_rejected() {
        assert_eq!(Submission::new("   ", "x"), Err(SubmissionError::EmptyName));
        assert_eq!(Submission::new("x", ""), Err(SubmissionError::EmptyCause));
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let name = "é".repeat(GameConfig::MAX_NAME_CHARS);
        assert!(Submission::new(&name, "x").is_ok());

        let name = "a".repeat(GameConfig::MAX_NAME_CHARS + 1);
        assert_eq!(
            Submission::new(&name, "x"),
            Err(SubmissionError::NameTooLong { len: 26, max: 25 })
        );

        let cause = "a".repeat(GameConfig::MAX_CAUSE_CHARS + 1);
        assert_eq!(
            Submission::new("x", &cause),
            Err(SubmissionError::CauseTooLong { len: 41, max: 40 })
        );
    }
}
