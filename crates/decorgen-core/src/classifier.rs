//! Sensitive field detection.
//!
//! A field is sensitive when its declared name contains any block-listed
//! token (case-sensitive substring match). Sensitive fields never reach a log
//! line or an analytics payload; the projection simply omits them.

/// Block-list used when no `sensitive=` parameter is given.
pub const DEFAULT_SENSITIVE_TOKENS: &[&str] = &["password", "token", "secret", "auth"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClassifier {
    tokens: Vec<String>,
}

impl Default for FieldClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_TOKENS.iter().copied())
    }
}

impl FieldClassifier {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_sensitive(&self, field_name: &str) -> bool {
        self.tokens
            .iter()
            .any(|token| field_name.contains(token.as_str()))
    }
}
