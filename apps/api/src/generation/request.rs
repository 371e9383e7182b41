use crate::errors::AppError;

/// Pasted job requirements, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest(String);

impl UserRequest {
    /// `Ok(None)` for empty or whitespace-only input: the action is a no-op.
    /// Input longer than `max_chars` characters is a validation error.
    pub fn parse(raw: &str, max_chars: usize) -> Result<Option<Self>, AppError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let len = raw.chars().count();
        if len > max_chars {
            return Err(AppError::Validation(format!(
                "Job requirements are too long ({len} characters, limit is {max_chars})"
            )));
        }
        Ok(Some(Self(raw.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_are_noop() {
        assert_eq!(UserRequest::parse("", 100).unwrap(), None);
        assert_eq!(UserRequest::parse("  \n\t  ", 100).unwrap(), None);
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let request = UserRequest::parse("  Rust developer\n", 100).unwrap().unwrap();
        assert_eq!(request.as_str(), "  Rust developer\n");
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(UserRequest::parse("ééééé", 5).unwrap().is_some());
        assert!(matches!(
            UserRequest::parse("éééééé", 5),
            Err(AppError::Validation(_))
        ));
    }
}
