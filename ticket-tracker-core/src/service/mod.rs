pub mod auth_service;
pub mod password_hasher;
pub mod references;
pub mod tickets_service;
pub mod users_service;
pub mod validation;
