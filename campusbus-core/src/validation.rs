use crate::{CoreError, CoreResult};

/// Fail on the first blank field, naming it. Whitespace-only counts as blank.
pub fn require_fields(fields: &[(&str, &str)]) -> CoreResult<()> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(CoreError::Validation(format!("{} is required", name))),
        None => Ok(()),
    }
}

/// Loose shape check; the backend does the real verification.
pub fn require_email(email: &str) -> CoreResult<()> {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(CoreError::Validation(format!("{} is not a valid email address", email))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_names_first_blank() {
        assert!(require_fields(&[("Email", "a@b.c"), ("Password", "x")]).is_ok());

        let err = require_fields(&[("Email", "a@b.c"), ("Password", "  "), ("Room", "")]).unwrap_err();
        assert_eq!(err, CoreError::Validation("Password is required".to_string()));
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("student@campus.edu").is_ok());
        assert!(require_email("student").is_err());
        assert!(require_email("@campus.edu").is_err());
        assert!(require_email("student@localhost").is_err());
    }
}
