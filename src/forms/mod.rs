//! Form payloads and the field validators shared between them.

use validator::ValidationError;

pub mod auth;
pub mod events;
pub mod users;

/// Letters, whitespace, apostrophes and hyphens; event titles additionally
/// allow a colon ("Workshop: Rust").
fn is_title_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '\'' || c == '-' || c == ':'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '\'' || c == '-'
}

pub fn validate_title(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(is_title_char) {
        Ok(())
    } else {
        Err(ValidationError::new("title_chars")
            .with_message("Title only letters and white space allowed".into()))
    }
}

pub fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(is_name_char) {
        Ok(())
    } else {
        Err(ValidationError::new("name_chars")
            .with_message("Only letters and white space allowed".into()))
    }
}

pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if !value.trim().is_empty() && value.trim().parse::<i32>().is_ok() {
        Ok(())
    } else {
        Err(ValidationError::new("numeric")
            .with_message("Number of participant must be numeric".into()))
    }
}

/// Minimal password policy: 10+ chars with at least one lowercase letter,
/// one uppercase letter, one digit and one special character.
pub fn validate_password_strength(value: &str) -> Result<(), ValidationError> {
    let strong = value.len() >= 10
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| !c.is_ascii_alphanumeric());

    if strong {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password minimal 10 karakter dengan huruf besar, huruf kecil, angka, dan karakter khusus"
                .into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_allows_colon_but_name_does_not() {
        assert!(validate_title("Workshop: Intro to Rust").is_ok());
        assert!(validate_person_name("Workshop: Intro").is_err());
        assert!(validate_person_name("Siti Nur-Aini").is_ok());
    }

    #[test]
    fn title_rejects_digits_and_markup() {
        assert!(validate_title("Event <b>1</b>").is_err());
    }

    #[test]
    fn numeric_accepts_integers_only() {
        assert!(validate_numeric("120").is_ok());
        assert!(validate_numeric("").is_err());
        assert!(validate_numeric("12x").is_err());
    }

    #[test]
    fn password_policy_requires_all_classes() {
        assert!(validate_password_strength("Aa1!aaaaaa").is_ok());
        assert!(validate_password_strength("aa1!aaaaaa").is_err());
        assert!(validate_password_strength("Aa1!aaa").is_err());
        assert!(validate_password_strength("Aa1aaaaaaa").is_err());
    }
}
