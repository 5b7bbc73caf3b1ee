mod middleware;
mod password;

pub use middleware::{UserId, Viewer, reject_anonymous_users};
pub use password::{AuthError, Credentials, compute_password_hash, validate_credentials};
