//! Sign-in form rules.

use validator::ValidateEmail;

pub const EMAIL_INVALID: &str = "Enter a valid email";
pub const SIGN_IN_FAILED: &str = "Failed to sign in. Please enter a valid email.";

/// Trim `raw` and check it is a well-formed email address.
pub fn validate_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if email.validate_email() {
        Ok(email.to_string())
    } else {
        Err(EMAIL_INVALID)
    }
}

/// Label of the sign-in button.
pub fn sign_in_label(busy: bool) -> &'static str {
    if busy {
        "Signing in..."
    } else {
        "Sign in"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("  ada@example.com ").unwrap(), "ada@example.com");
        assert_eq!(validate_email(""), Err(EMAIL_INVALID));
        assert_eq!(validate_email("ada"), Err(EMAIL_INVALID));
        assert_eq!(validate_email("ada@"), Err(EMAIL_INVALID));
        assert_eq!(validate_email("a da@example.com"), Err(EMAIL_INVALID));
    }
}
