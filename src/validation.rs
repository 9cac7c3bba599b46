//! Free-text sanitization and password rules applied before anything
//! leaves the client.


/// Symbols the password policy accepts as "special characters".
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Strip angle brackets and HTML-escape the remaining risky characters in
/// a free-text field.
///
/// Never applied to passwords: escaping would corrupt user-chosen special
/// characters the backend expects verbatim.
pub fn sanitize_input(input: &str) -> String {
    input
        .replace(['<', '>'], "")
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('/', "&#x2F;")
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PasswordCheck {
    pub is_valid: bool,
    /// User-visible explanation, also set on success.
    pub message: &'static str,
}

/// Check a candidate password against the account policy. The first
/// failing rule wins.
pub fn validate_password(password: &str) -> PasswordCheck {
    if password.chars().count() < 8 {
        return invalid("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return invalid("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return invalid("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return invalid("Password must contain at least one number");
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return invalid(
            "Password must contain at least one special character (!@#$%^&*)",
        );
    }
    PasswordCheck {
        is_valid: true,
        message: "Password is valid",
    }
}

fn invalid(message: &'static str) -> PasswordCheck {
    PasswordCheck {
        is_valid: false,
        message,
    }
}
