use serde::Deserialize;
use validator::Validate;

use crate::forms::validate_password_strength;

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    /// One-time form token issued with the login page.
    pub token: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct ChangePasswordForm {
    pub token: String,
    /// Current password, re-checked before the update.
    pub password: String,
    #[validate(custom(function = validate_password_strength))]
    #[validate(must_match(
        other = re_password,
        message = "Password baru yang diinput tidak sama"
    ))]
    pub new_password: String,
    pub re_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_passwords_fail_validation() {
        let form = ChangePasswordForm {
            token: "t".to_string(),
            password: "old".to_string(),
            new_password: "Aa1!aaaaaa".to_string(),
            re_password: "Aa1!aaaaab".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn strong_matching_passwords_pass() {
        let form = ChangePasswordForm {
            token: "t".to_string(),
            password: "old".to_string(),
            new_password: "Aa1!aaaaaa".to_string(),
            re_password: "Aa1!aaaaaa".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
