use crate::actix_web::{
    http::StatusCode,
    web::{Data, Json},
    HttpResponse,
};
use crate::config::Config;
use crate::core::models::user::{Credentials, Token};
use crate::core::ports::repository::Manager;
use crate::core::services::user;
use crate::core::tokener::Tokener;
use crate::error::Error;
use crate::impls::tokener::jwt::{Claim, JWT};
use crate::response::CreateResponse;

pub async fn signup<M>(Json(credentials): Json<Credentials>, manager: Data<M>) -> Result<HttpResponse, Error>
where
    M: Manager + 'static,
{
    let tx = manager.tx().await?;
    let id = user::signup(tx, credentials).await?;
    Ok(HttpResponse::build(StatusCode::CREATED).json(CreateResponse { id }))
}

pub async fn login<M>(Json(credentials): Json<Credentials>, manager: Data<M>, tokener: Data<JWT>, config: Data<Config>) -> Result<Json<Token>, Error>
where
    M: Manager + 'static,
{
    let mut db = manager.db().await?;
    let user = user::authenticate(&mut db, &credentials).await?;
    let claim = Claim::new(user.id, user.is_staff, chrono::Duration::days(config.token_ttl_days));
    let token = tokener.gen_token(&claim)?;
    log::info!("user {} ({}) logged in", user.username, user.id);
    Ok(Json(Token { token }))
}
