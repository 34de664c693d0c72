//!
//! All roles used within application
//!

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

impl Role {
    ///
    /// Managers and admins have access to every ticket
    ///
    pub fn is_privileged(self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }
}
