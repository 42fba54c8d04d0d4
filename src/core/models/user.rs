use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub salt: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub username: String,
    pub password: String,
    pub salt: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub token: String,
}
