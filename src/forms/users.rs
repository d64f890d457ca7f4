use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::forms::validate_person_name;
use crate::listing::ParamSource;

#[derive(Deserialize, Validate)]
/// Form data for creating an admin account. The password is generated
/// server-side and mailed to the new admin.
pub struct AddUserForm {
    pub token: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Name can not be empty"))]
    #[validate(custom(function = validate_person_name))]
    pub name: String,
}

#[derive(Deserialize, Validate)]
/// Form data for updating an account's name and active flag.
pub struct EditUserForm {
    pub token: String,
    pub id: i32,
    #[validate(length(min = 1, message = "Name can not be empty"))]
    #[validate(custom(function = validate_person_name))]
    pub name: String,
    /// `"1"` activates the account, anything else deactivates it.
    pub is_actived: String,
}

impl EditUserForm {
    pub fn is_actived(&self) -> bool {
        self.is_actived == "1"
    }
}

#[derive(Deserialize)]
/// Delete confirmation posted from the listing page.
pub struct DeleteUserForm {
    pub token: String,
    pub id: i32,
}

#[derive(Deserialize, Serialize, Default)]
/// Raw query parameters of the users listing.
pub struct UserListParams {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub role: Option<String>,
    pub is_actived: Option<String>,
    pub is_verified_email: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

impl ParamSource for UserListParams {
    fn param(&self, name: &str) -> Option<&str> {
        match name {
            "search" => self.search.as_deref(),
            "role" => self.role.as_deref(),
            "is_actived" => self.is_actived.as_deref(),
            "is_verified_email" => self.is_verified_email.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_rejects_bad_email() {
        let form = AddUserForm {
            token: "t".to_string(),
            email: "not-an-email".to_string(),
            name: "Budi".to_string(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn edit_form_parses_active_flag() {
        let form = EditUserForm {
            token: "t".to_string(),
            id: 1,
            name: "Budi".to_string(),
            is_actived: "1".to_string(),
        };
        assert!(form.is_actived());
    }
}
