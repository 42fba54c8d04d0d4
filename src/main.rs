extern crate actix_web;
extern crate chrono;
extern crate dotenv;
extern crate env_logger;
extern crate hex;
extern crate itertools;
extern crate jsonwebtoken;
extern crate rand;
extern crate serde;
extern crate serde_json;
extern crate sha2;
extern crate sqlx;
extern crate thiserror;
extern crate tokio;

mod config;
mod context;
mod core;
mod database;
mod error;
mod handlers;
mod impls;
mod middlewares;
pub mod request;
pub mod response;

use crate::config::Config;
use crate::core::models::user::Credentials;
use crate::core::ports::repository::Manager;
use crate::core::services::user::ensure_admin;
use crate::database::sqlx::PgSqlxManager;
use crate::impls::tokener::jwt::JWT;
use crate::middlewares::jwt::JWTMiddleware;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::from_env().context("failed to read configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!().run(&pool).await.context("failed to run migrations")?;

    let manager = PgSqlxManager::new(pool);
    if let Some(admin) = &config.admin {
        let credentials = Credentials {
            username: admin.username.clone(),
            password: admin.password.clone(),
        };
        let id = ensure_admin(manager.tx().await?, credentials).await?;
        log::info!("admin account {} ready", id);
    }

    let secret = config.jwt_secret.as_bytes().to_vec();
    let addr = (config.bind_host.clone(), config.bind_port);
    log::info!("listening on {}:{}", addr.0, addr.1);
    HttpServer::new(move || {
        App::new()
            .wrap(JWTMiddleware::new(secret.clone()))
            .wrap(NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(Data::new(manager.clone()))
            .app_data(Data::new(JWT::new(secret.clone())))
            .app_data(Data::new(config.clone()))
            .configure(handlers::configure::<PgSqlxManager>)
    })
    .bind(addr)?
    .run()
    .await?;
    Ok(())
}
