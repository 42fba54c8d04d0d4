use crate::context::UserInfo;
use crate::core::tokener::{Payload, Tokener};
use crate::error::Error;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub struct JWT {
    secret: Vec<u8>,
}

impl JWT {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<P> Tokener<P> for JWT
where
    P: Payload,
{
    fn gen_token(&self, payload: &P) -> Result<String, Error> {
        let header = Header::new(Algorithm::HS256);
        let key = EncodingKey::from_secret(&self.secret);
        let token = encode(&header, payload, &key)?;
        Ok(token)
    }
    fn verify_token(&self, token: &str) -> Result<P, Error> {
        let key = DecodingKey::from_secret(&self.secret);
        let validation = Validation::new(Algorithm::HS256);
        let payload = decode(token, &key, &validation)?;
        Ok(payload.claims)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Claim {
    pub user: String,
    pub is_staff: bool,
    pub exp: i64,
}

impl Claim {
    pub fn new(uid: i32, is_staff: bool, ttl: Duration) -> Self {
        Self {
            user: uid.to_string(),
            is_staff,
            exp: (Utc::now() + ttl).timestamp(),
        }
    }
}

impl Payload for Claim {
    fn user_info(&self) -> Result<UserInfo, Error> {
        let id = self.user.parse::<i32>()?;
        Ok(UserInfo { id, is_staff: self.is_staff })
    }
}
