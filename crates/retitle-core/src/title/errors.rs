use crate::errors::RetitleError;

#[derive(Debug, thiserror::Error)]
pub enum TitleError {
    #[error("Unclosed '{{' at byte {position} in template")]
    UnclosedPlaceholder { position: usize },
}

impl RetitleError for TitleError {
    fn error_code(&self) -> &'static str {
        match self {
            TitleError::UnclosedPlaceholder { .. } => "TEMPLATE_UNCLOSED_PLACEHOLDER",
        }
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unclosed_placeholder_display() {
        let error = TitleError::UnclosedPlaceholder { position: 3 };
        assert_eq!(error.to_string(), "Unclosed '{' at byte 3 in template");
        assert_eq!(error.error_code(), "TEMPLATE_UNCLOSED_PLACEHOLDER");
        assert!(error.is_user_error());
    }
}
