pub mod access_policy;

mod caller;
mod role;

pub use caller::Caller;
pub use role::Role;
