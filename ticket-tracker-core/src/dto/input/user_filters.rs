use crate::auth::Role;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct UserFilters {
    pub role: Option<Role>,
    pub search: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}
