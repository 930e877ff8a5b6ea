use std::sync::LazyLock;

use regex_lite::Regex;
use skyway_shared::models::{ChangePasswordRequest, Feedback, LoginRequest, RegisterRequest};

use crate::{CoreError, CoreResult};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[\d\s-]{10,}$").unwrap());
static PASSPORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,9}$").unwrap());

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const WEAK_PASSWORD: &str =
    "Password must be at least 8 letters or digits, with an upper-case letter, a lower-case letter and a digit";
pub const INVALID_PHONE: &str = "Please enter a valid mobile number";
pub const INVALID_PASSPORT: &str = "Please enter a valid passport number";

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// At least 8 ASCII letters/digits with one lower-case, one upper-case and
/// one digit.
pub fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn is_valid_passport(passport: &str) -> bool {
    PASSPORT.is_match(passport)
}

fn require(value: &str, field: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_login(request: &LoginRequest) -> CoreResult<()> {
    require(&request.email, "Email")?;
    require(request.password.expose(), "Password")
}

pub fn validate_registration(request: &RegisterRequest) -> CoreResult<()> {
    require(&request.first_name, "First name")?;
    require(&request.last_name, "Last name")?;
    require(&request.email, "Email")?;
    require(request.passport_number.expose(), "Passport number")?;
    require(&request.mobile_no, "Mobile number")?;
    require(&request.country, "Country")?;
    require(request.password.expose(), "Password")?;

    if request.password != request.confirm_password {
        return Err(CoreError::validation(PASSWORD_MISMATCH));
    }
    if !is_valid_email(&request.email) {
        return Err(CoreError::validation("Please enter a valid email address"));
    }
    if !is_valid_phone(&request.mobile_no) {
        return Err(CoreError::validation(INVALID_PHONE));
    }
    if !is_valid_passport(request.passport_number.expose()) {
        return Err(CoreError::validation(INVALID_PASSPORT));
    }
    if !is_strong_password(request.password.expose()) {
        return Err(CoreError::validation(WEAK_PASSWORD));
    }
    Ok(())
}

pub fn validate_password_change(request: &ChangePasswordRequest) -> CoreResult<()> {
    require(request.current_password.expose(), "Current password")?;
    require(request.new_password.expose(), "New password")?;
    if request.new_password != request.confirm_password {
        return Err(CoreError::validation(PASSWORD_MISMATCH));
    }
    if !is_strong_password(request.new_password.expose()) {
        return Err(CoreError::validation(WEAK_PASSWORD));
    }
    Ok(())
}

pub fn validate_feedback(feedback: &Feedback) -> CoreResult<()> {
    if !(1..=5).contains(&feedback.rating) {
        return Err(CoreError::validation("Rating must be between 1 and 5"));
    }
    require(&feedback.comment, "Comment")
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyway_shared::Masked;

    fn registration() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            passport_number: Masked::from("X1234567"),
            mobile_no: "+44 20 7946 0000".to_string(),
            country: "UK".to_string(),
            password: Masked::from("Secret123"),
            confirm_password: Masked::from("Secret123"),
            ..Default::default()
        }
    }

    #[test]
    fn test_field_validators() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("missing-at.example.com"));

        assert!(is_strong_password("Secret123"));
        assert!(!is_strong_password("secret123"));
        assert!(!is_strong_password("Secret12!"));
        assert!(!is_strong_password("Sec1"));

        assert!(is_valid_phone("+1 555-123-4567"));
        assert!(!is_valid_phone("555-1234"));

        assert!(is_valid_passport("X1234567"));
        assert!(!is_valid_passport("x1234567"));
        assert!(!is_valid_passport("X12"));
    }

    #[test]
    fn test_registration() {
        assert!(validate_registration(&registration()).is_ok());

        let mut mismatch = registration();
        mismatch.confirm_password = Masked::from("Other123");
        let err = validate_registration(&mismatch).unwrap_err();
        assert_eq!(err.user_message(), PASSWORD_MISMATCH);

        let mut missing = registration();
        missing.country = "  ".to_string();
        assert_eq!(validate_registration(&missing).unwrap_err().user_message(), "Country is required");
    }

    #[test]
    fn test_registration_field_formats() {
        let mut phone = registration();
        phone.mobile_no = "555-1234".to_string();
        assert_eq!(validate_registration(&phone).unwrap_err().user_message(), INVALID_PHONE);

        let mut passport = registration();
        passport.passport_number = Masked::from("x12");
        assert_eq!(validate_registration(&passport).unwrap_err().user_message(), INVALID_PASSPORT);

        let mut weak = registration();
        weak.password = Masked::from("password");
        weak.confirm_password = Masked::from("password");
        assert_eq!(validate_registration(&weak).unwrap_err().user_message(), WEAK_PASSWORD);
    }

    #[test]
    fn test_password_change() {
        let request = ChangePasswordRequest {
            current_password: Masked::from("OldPass1"),
            new_password: Masked::from("NewPass1"),
            confirm_password: Masked::from("NewPass2"),
        };
        assert_eq!(validate_password_change(&request).unwrap_err().user_message(), PASSWORD_MISMATCH);

        let weak = ChangePasswordRequest {
            current_password: Masked::from("OldPass1"),
            new_password: Masked::from("newpass1"),
            confirm_password: Masked::from("newpass1"),
        };
        assert_eq!(validate_password_change(&weak).unwrap_err().user_message(), WEAK_PASSWORD);
    }

    #[test]
    fn test_feedback() {
        assert!(validate_feedback(&Feedback::new(5, "Great crew")).is_ok());
        assert!(validate_feedback(&Feedback::new(0, "Great crew")).is_err());
        assert!(validate_feedback(&Feedback::new(3, "")).is_err());
    }
}
