use crate::context::UserInfo;
use crate::error::Error;
use serde::{de::DeserializeOwned, Serialize};

/// Claims carried by an access token.
pub trait Payload: Serialize + DeserializeOwned {
    /// The identity the token was issued to.
    fn user_info(&self) -> Result<UserInfo, Error>;
}

pub trait Tokener<P: Payload> {
    fn gen_token(&self, payload: &P) -> Result<String, Error>;
    fn verify_token(&self, token: &str) -> Result<P, Error>;
}
