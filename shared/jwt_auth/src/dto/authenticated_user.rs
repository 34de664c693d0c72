///
/// Identity taken from a validated JWT.
///
/// Only the subject is known at this point,
/// loading the rest of the user is up to the application.
///
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
}
