//! Format validators for user-supplied identity fields. Each returns `None`
//! when the value is acceptable, or a short reason string that surfaces
//! verbatim inside the corresponding invalid-format error description.

const USERNAME_MIN_LENGTH: usize = 3;
const USERNAME_MAX_LENGTH: usize = 64;
const COMMON_NAME_MIN_LENGTH: usize = 3;
const COMMON_NAME_MAX_LENGTH: usize = 128;
const DISPLAY_NAME_MAX_LENGTH: usize = 128;
const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

/// The recordable account history actions.
pub const ACCOUNT_ACTIONS: &[&str] = &[
    "register",
    "activate",
    "deactivate",
    "limbo",
    "update",
    "password-change",
    "group-change",
    "tag-change",
];

pub fn validate_username(username: &str) -> Option<&'static str> {
    let length = username.chars().count();
    if length < USERNAME_MIN_LENGTH {
        return Some("too short");
    }
    if length > USERNAME_MAX_LENGTH {
        return Some("too long");
    }
    if username.chars().any(char::is_whitespace) {
        return Some("space is not available");
    }
    if !username.chars().all(|ch| ch.is_ascii_graphic()) {
        return Some("only keyboard characters are available");
    }
    None
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.chars().count() < 5 {
        return Some("too short");
    }
    if email.chars().any(char::is_whitespace) {
        return Some("space is not available");
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            if local.is_empty() || domain.is_empty() || !domain.contains('.') {
                return Some("malformed address");
            }
        }
        _ => return Some("malformed address"),
    }
    None
}

pub fn validate_phone(phone: &str) -> Option<&'static str> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Some("only digits are available");
    }
    let length = digits.chars().count();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&length) {
        return Some("incorrect length");
    }
    None
}

pub fn validate_display_name(display_name: &str) -> Option<&'static str> {
    if display_name.trim().is_empty() {
        return Some("empty");
    }
    if display_name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
        return Some("too long");
    }
    None
}

/// Organization names allow interior spaces, unlike usernames.
pub fn validate_common_name(name: &str) -> Option<&'static str> {
    let length = name.trim().chars().count();
    if length < COMMON_NAME_MIN_LENGTH {
        return Some("too short");
    }
    if name.chars().count() > COMMON_NAME_MAX_LENGTH {
        return Some("too long");
    }
    if !name.chars().all(|ch| ch.is_ascii_graphic() || ch == ' ') {
        return Some("only keyboard characters are available");
    }
    None
}

pub fn validate_account_action(action: &str) -> bool {
    ACCOUNT_ACTIONS.contains(&action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert_eq!(validate_username("tien"), None);
        assert_eq!(validate_username("ab"), Some("too short"));
        assert_eq!(validate_username("with space"), Some("space is not available"));
        assert_eq!(
            validate_username("accénted"),
            Some("only keyboard characters are available"),
        );
    }

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("user@example.com"), None);
        assert_eq!(validate_email("a@b"), Some("too short"));
        assert_eq!(validate_email("no-at-sign.com"), Some("malformed address"));
        assert_eq!(validate_email("two@at@signs.com"), Some("malformed address"));
        assert_eq!(validate_email("user@nodomain"), Some("malformed address"));
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(validate_phone("+14155551234"), None);
        assert_eq!(validate_phone("5551234"), None);
        assert_eq!(validate_phone("555-1234"), Some("only digits are available"));
        assert_eq!(validate_phone("123"), Some("incorrect length"));
    }

    #[test]
    fn test_common_name_allows_spaces() {
        assert_eq!(validate_common_name("Phosphorus Labs"), None);
        assert_eq!(validate_common_name("  "), Some("too short"));
    }

    #[test]
    fn test_account_actions_closed_set() {
        assert!(validate_account_action("limbo"));
        assert!(validate_account_action("password-change"));
        assert!(!validate_account_action("promote"));
    }
}
