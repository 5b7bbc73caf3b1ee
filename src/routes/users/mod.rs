mod login;
mod register;
mod routes;
mod user;

pub use login::*;
pub use register::*;
pub use routes::*;
pub use user::*;
