use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::authentication::Credentials;
use crate::domain::{NewUser, UserName};

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub user_name: String,
}

#[derive(Deserialize)]
pub struct LoginData {
    user_name: String,
    password: Secret<String>,
}

impl TryFrom<LoginData> for Credentials {
    type Error = String;

    fn try_from(payload: LoginData) -> Result<Self, Self::Error> {
        let user_name = UserName::parse(payload.user_name)?;

        Ok(Credentials {
            user_name: user_name.as_ref().to_string(),
            password: payload.password,
        })
    }
}

#[derive(Deserialize)]
pub struct RegisterData {
    user_name: String,
    password: Secret<String>,
}

impl TryFrom<RegisterData> for NewUser {
    type Error = String;

    fn try_from(payload: RegisterData) -> Result<Self, Self::Error> {
        NewUser::new(
            payload.user_name,
            payload.password.expose_secret().to_string(),
        )
    }
}
