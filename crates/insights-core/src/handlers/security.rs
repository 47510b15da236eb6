//! Anti-forgery session token
//!
//! Issued once per app session and checked before every action.

use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn from_value(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn verify(&self, presented: &str) -> DomainResult<()> {
        if constant_time_eq(self.0.as_bytes(), presented.as_bytes()) {
            Ok(())
        } else {
            Err(DomainError::Security("invalid session token".to_string()))
        }
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify() {
        let token = SessionToken::from_value("abc123");
        assert!(token.verify("abc123").is_ok());
        assert!(matches!(token.verify("abc124"), Err(DomainError::Security(_))));
        assert!(token.verify("").is_err());
    }

    #[test]
    fn test_new_tokens_differ() {
        let a = SessionToken::new();
        assert_eq!(a.value().len(), 32);
        assert_ne!(a, SessionToken::new());
    }
}
