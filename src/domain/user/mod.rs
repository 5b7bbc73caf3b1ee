mod password;
mod types;
mod user_name;

pub use password::UserPassword;
pub use types::*;
pub use user_name::UserName;

#[derive(Debug)]
pub struct NewUser {
    pub user_name: UserName,
    pub password: UserPassword,
}

impl NewUser {
    pub fn new(user_name: String, password: String) -> Result<Self, String> {
        Ok(Self {
            user_name: UserName::parse(user_name)?,
            password: UserPassword::parse(password)?,
        })
    }
}
