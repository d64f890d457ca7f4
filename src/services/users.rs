//! Services handling admin-account administration workflows.

use validator::Validate;

use crate::DEFAULT_PAGE_SIZE;
use crate::domain::user::{NewUser, UpdateUser, User, UserRole};
use crate::dto::users::UsersPageData;
use crate::forms::users::{AddUserForm, DeleteUserForm, EditUserForm, UserListParams};
use crate::listing::{PageRequest, SortSpec, build_filters};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::user::{USER_FILTERS, USER_SORT_FIELDS};
use crate::repository::{ListQuery, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, auth, ensure_admin};

/// Loads one page of accounts honoring the request's filters and sort.
pub fn list_users<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: &UserListParams,
) -> ServiceResult<UsersPageData>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    let clause = build_filters(USER_FILTERS, params);
    let sort = SortSpec::resolve(
        params.sort_field.as_deref(),
        params.sort_order.as_deref(),
        USER_SORT_FIELDS,
        "id",
    );
    let page = PageRequest::new(params.page, DEFAULT_PAGE_SIZE);

    let active_filters = clause
        .active()
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();

    let list = repo.list_users(&ListQuery { clause, sort, page })?;

    Ok(UsersPageData {
        users: Paginated::new(list.rows, list.page, list.last_page, list.total),
        sort,
        active_filters,
    })
}

/// Loads one account for the edit page.
pub fn get_user<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;
    repo.get_user_by_id(id)?.ok_or(ServiceError::NotFound)
}

/// Creates an admin account with a generated password. Returns the new
/// account together with the plain password so the caller can mail it; the
/// plain password is never stored.
pub fn add_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddUserForm,
) -> ServiceResult<(User, String)>
where
    R: UserWriter + ?Sized,
{
    ensure_admin(user)?;
    form.validate()?;

    let password = auth::generate_password();
    let hash = auth::hash_password(&password)?;

    let new_user = NewUser::new(form.email, form.name, hash, UserRole::Admin);
    let created = repo.create_user(&new_user)?;

    Ok((created, password))
}

/// Updates an account's display name and active flag.
pub fn update_user<R>(repo: &R, user: &AuthenticatedUser, form: EditUserForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_admin(user)?;
    form.validate()?;

    let updates = UpdateUser {
        name: form.name.trim().to_string(),
        is_actived: form.is_actived(),
    };
    repo.update_user(form.id, &updates)?;

    Ok(())
}

/// Removes an account.
pub fn delete_user<R>(repo: &R, user: &AuthenticatedUser, form: &DeleteUserForm) -> ServiceResult<()>
where
    R: UserWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_user(form.id)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::listing::ListPage;
    use crate::repository::mock::MockRepository;
    use crate::services::auth::verify_password;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@himatika.org".to_string(),
            name: "Admin".to_string(),
            role: UserRole::Admin,
            exp: 0,
        }
    }

    fn stored(id: i32) -> User {
        let now = Utc::now().naive_utc();
        User {
            id,
            email: format!("user{id}@himatika.org"),
            username: format!("user{id}@himatika.org"),
            name: format!("User {id}"),
            password: "hash".to_string(),
            role: UserRole::Admin,
            is_actived: true,
            is_verified_email: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn add_user_generates_and_hashes_a_password() {
        let mut repo = MockRepository::new();
        repo.expect_create_user()
            .withf(|new_user| {
                new_user.email == "budi@himatika.org" && new_user.role == UserRole::Admin
            })
            .return_once(|new_user| {
                let mut created = stored(9);
                created.password = new_user.password.clone();
                Ok(created)
            });

        let form = AddUserForm {
            token: "t".to_string(),
            email: "Budi@himatika.org".to_string(),
            name: "Budi".to_string(),
        };
        let (created, password) = add_user(&repo, &admin(), form).unwrap();
        assert_eq!(password.len(), 8);
        assert!(verify_password(&password, &created.password));
    }

    #[test]
    fn add_user_rejects_invalid_email() {
        let repo = MockRepository::new();
        let form = AddUserForm {
            token: "t".to_string(),
            email: "nope".to_string(),
            name: "Budi".to_string(),
        };
        let err = add_user(&repo, &admin(), form).unwrap_err();
        assert!(matches!(err, ServiceError::Form(m) if m == "Invalid email format"));
    }

    #[test]
    fn list_users_passes_the_role_filter_through() {
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .withf(|query| query.clause.sql() == " WHERE role = ?")
            .return_once(|_| {
                Ok(ListPage {
                    rows: vec![stored(1)],
                    total: 1,
                    page: 1,
                    last_page: 1,
                })
            });

        let params = UserListParams {
            role: Some("A".to_string()),
            ..Default::default()
        };
        let data = list_users(&repo, &admin(), &params).unwrap();
        assert_eq!(data.users.items.len(), 1);
    }

    #[test]
    fn update_user_parses_the_active_flag() {
        let mut repo = MockRepository::new();
        repo.expect_update_user()
            .withf(|id, updates| *id == 3 && !updates.is_actived && updates.name == "Sri")
            .return_once(|id, _| Ok(stored(id)));

        let form = EditUserForm {
            token: "t".to_string(),
            id: 3,
            name: " Sri ".to_string(),
            is_actived: "0".to_string(),
        };
        update_user(&repo, &admin(), form).unwrap();
    }
}
