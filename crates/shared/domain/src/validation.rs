//! User input validation rules.
//!
//! Each check is independent and side-effect free. Lengths are counted in
//! characters, not bytes, so multi-byte text is measured correctly.

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::constants::{
    DEFAULT_EMAIL_PATTERN, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH,
};
use crate::error::{ConfigError, DomainError, DomainResult, ValidationKind};

/// Tunable validation limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRules {
    pub username_min_chars: usize,
    pub username_max_chars: usize,
    pub password_min_chars: usize,
    pub email_pattern: String,
}

impl Default for UserRules {
    fn default() -> Self {
        Self {
            username_min_chars: MIN_USERNAME_LENGTH,
            username_max_chars: MAX_USERNAME_LENGTH,
            password_min_chars: MIN_PASSWORD_LENGTH,
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
        }
    }
}

/// Validator for the raw strings that make up a user.
#[derive(Debug, Clone)]
pub struct UserValidator {
    rules: UserRules,
    email_regex: Regex,
}

impl UserValidator {
    /// Build a validator, compiling the email pattern once.
    pub fn new(rules: UserRules) -> Result<Self, ConfigError> {
        if rules.username_min_chars > rules.username_max_chars {
            return Err(ConfigError::UsernameBounds {
                min: rules.username_min_chars,
                max: rules.username_max_chars,
            });
        }

        let email_regex = Regex::new(&rules.email_pattern)?;
        Ok(Self { rules, email_regex })
    }

    /// Username must be within the configured character range.
    pub fn validate_username(&self, username: &str) -> DomainResult<()> {
        let len = username.chars().count();
        if len < self.rules.username_min_chars || len > self.rules.username_max_chars {
            return Err(DomainError::validation(
                ValidationKind::UsernameLength,
                format!(
                    "Username must be between {} and {} characters",
                    self.rules.username_min_chars, self.rules.username_max_chars
                ),
            ));
        }
        Ok(())
    }

    /// Email must match the configured address shape. Syntactic check only.
    pub fn validate_email(&self, email: &str) -> DomainResult<()> {
        if !self.email_regex.is_match(email) {
            return Err(DomainError::validation(
                ValidationKind::EmailFormat,
                "Email address is invalid",
            ));
        }
        Ok(())
    }

    /// Password must be long enough and mix letters with digits.
    pub fn validate_password(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.rules.password_min_chars {
            return Err(DomainError::validation(
                ValidationKind::PasswordLength,
                format!(
                    "Password must be at least {} characters",
                    self.rules.password_min_chars
                ),
            ));
        }

        let has_letter = password.chars().any(is_letter);
        let has_number = password.chars().any(char::is_numeric);

        if !has_letter || !has_number {
            return Err(DomainError::validation(
                ValidationKind::PasswordStrength,
                "Password must contain both letters and numbers",
            ));
        }
        Ok(())
    }
}

/// General Category L only. Letter-numbers such as Roman numerals and
/// combining marks are alphabetic in Unicode but are not letters.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn validator() -> UserValidator {
        UserValidator::new(UserRules::default()).unwrap()
    }

    #[test]
    fn test_valid_username() {
        assert!(validator().validate_username("testuser").is_ok());
    }

    #[test]
    fn test_username_too_short() {
        let err = validator().validate_username("te").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::UsernameLength));
    }

    #[test]
    fn test_username_too_long() {
        let err = validator()
            .validate_username("testuser12345678901234567890")
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::UsernameLength));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        // 3 characters, 9 bytes
        assert!(validator().validate_username("山田太").is_ok());
        // 20 characters, 60 bytes
        assert!(validator().validate_username(&"あ".repeat(20)).is_ok());
        assert!(validator().validate_username(&"あ".repeat(21)).is_err());
        assert!(validator().validate_username("山田").is_err());
    }

    #[test]
    fn test_valid_emails() {
        let v = validator();
        assert!(v.validate_email("test@example.com").is_ok());
        assert!(v.validate_email("test.email@example.com").is_ok());
        assert!(v.validate_email("first+tag@mail.example.co.jp").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        let v = validator();
        for email in ["testexample.com", "test@", "", "test@example", "@example.com", "test@example.c"] {
            let err = v.validate_email(email).unwrap_err();
            assert_eq!(err.validation_kind(), Some(ValidationKind::EmailFormat), "{email}");
        }
    }

    #[test]
    fn test_valid_passwords() {
        let v = validator();
        assert!(v.validate_password("password123").is_ok());
        assert!(v.validate_password("pass123a").is_ok());
    }

    #[test]
    fn test_password_too_short() {
        let err = validator().validate_password("pass123").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordLength));
    }

    #[test]
    fn test_password_without_digit() {
        let err = validator().validate_password("password").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordStrength));
    }

    #[test]
    fn test_password_without_letter() {
        let err = validator().validate_password("12345678").unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordStrength));
    }

    #[test]
    fn test_password_classification_is_unicode_aware() {
        // Kana letters and a full-width digit
        assert!(validator().validate_password("パスワードです１").is_ok());
        assert!(validator().validate_password("パスワードですよ").is_err());
    }

    #[test]
    fn test_letter_numbers_and_marks_are_not_letters() {
        let v = validator();
        for password in ["ⅠⅡⅢⅣⅤⅥⅦⅧ", "12345678\u{0345}", "１２３４５６７８"] {
            let err = v.validate_password(password).unwrap_err();
            assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordStrength), "{password}");
        }
        // Roman numerals still count as numbers
        assert!(v.validate_password("passwordⅫ").is_ok());
    }

    #[test]
    fn test_custom_rules() {
        let v = UserValidator::new(UserRules {
            username_min_chars: 5,
            username_max_chars: 8,
            password_min_chars: 12,
            email_pattern: r"^[^@]+@corp\.example$".to_string(),
        })
        .unwrap();

        assert!(v.validate_username("abcd").is_err());
        assert!(v.validate_username("abcde").is_ok());
        assert!(v.validate_password("password123").is_err());
        assert!(v.validate_password("password1234").is_ok());
        assert!(v.validate_email("a@corp.example").is_ok());
        assert!(v.validate_email("a@example.com").is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let rules = UserRules {
            email_pattern: "([a-z".to_string(),
            ..UserRules::default()
        };
        assert!(matches!(
            UserValidator::new(rules),
            Err(ConfigError::EmailPattern(_))
        ));
    }

    #[test]
    fn test_inverted_username_bounds_rejected() {
        let rules = UserRules {
            username_min_chars: 10,
            username_max_chars: 5,
            ..UserRules::default()
        };
        assert!(matches!(
            UserValidator::new(rules),
            Err(ConfigError::UsernameBounds { min: 10, max: 5 })
        ));
    }

    proptest! {
        #[test]
        fn prop_username_within_bounds_accepted(name in "\\PC{3,20}") {
            prop_assert!(validator().validate_username(&name).is_ok());
        }

        #[test]
        fn prop_username_too_short_rejected(name in "\\PC{0,2}") {
            prop_assert!(validator().validate_username(&name).is_err());
        }

        #[test]
        fn prop_username_too_long_rejected(name in "\\PC{21,40}") {
            prop_assert!(validator().validate_username(&name).is_err());
        }

        #[test]
        fn prop_short_password_rejected(password in "\\PC{0,7}") {
            let err = validator().validate_password(&password).unwrap_err();
            prop_assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordLength));
        }

        #[test]
        fn prop_password_without_digit_rejected(password in "[a-zA-Z]{8,32}") {
            prop_assert!(validator().validate_password(&password).is_err());
        }

        #[test]
        fn prop_password_without_letter_rejected(
            password in "[0-9\u{0660}-\u{0669}\u{2160}-\u{2182}\u{0300}-\u{036F}!@#$%^&*]{8,32}"
        ) {
            let err = validator().validate_password(&password).unwrap_err();
            prop_assert_eq!(err.validation_kind(), Some(ValidationKind::PasswordStrength));
        }
    }
}
