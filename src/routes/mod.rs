mod comments;
mod health_check;
mod posts;
mod users;

pub use comments::*;
pub use health_check::*;
pub use posts::*;
pub use users::*;
