use std::fmt;
use thiserror::Error;

/// Which side of a section pair was missing when the parser gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionErrorKind {
    /// A close tag with no open section.
    Unopened,
    /// An open section that was not closed by the next close tag (or by end of input).
    Unclosed,
}

impl fmt::Display for SectionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionErrorKind::Unopened => f.write_str("unopened"),
            SectionErrorKind::Unclosed => f.write_str("unclosed"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Invalid Template: template must be a non-empty string")]
    InvalidTemplate,
    #[error("Parse Error: {kind} section \"{name}\"")]
    Section { kind: SectionErrorKind, name: String },
    #[error("Serialization Error: {0}")]
    SerializationError(String),
}

impl TemplateError {
    pub(crate) fn unopened(name: &str) -> Self {
        TemplateError::Section {
            kind: SectionErrorKind::Unopened,
            name: name.to_string(),
        }
    }

    pub(crate) fn unclosed(name: &str) -> Self {
        TemplateError::Section {
            kind: SectionErrorKind::Unclosed,
            name: name.to_string(),
        }
    }

    /// The section name carried by a parse error, if any.
    pub fn section_name(&self) -> Option<&str> {
        match self {
            TemplateError::Section { name, .. } => Some(name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;

impl serde::ser::Error for TemplateError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        TemplateError::SerializationError(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_error_message() {
        let err = TemplateError::unclosed("items");
        assert_eq!(err.to_string(), "Parse Error: unclosed section \"items\"");
        assert_eq!(err.section_name(), Some("items"));

        let err = TemplateError::unopened("a");
        assert_eq!(err.to_string(), "Parse Error: unopened section \"a\"");
    }
}
