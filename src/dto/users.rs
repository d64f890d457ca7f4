use crate::domain::user::User;
use crate::listing::SortSpec;
use crate::pagination::Paginated;

/// Everything the users listing template needs.
pub struct UsersPageData {
    pub users: Paginated<User>,
    pub sort: SortSpec,
    pub active_filters: Vec<(String, String)>,
}
