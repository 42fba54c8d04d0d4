use crate::actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use crate::core::tokener::{Payload, Tokener};
use crate::error::Error as AppError;
use crate::impls::tokener::jwt::{Claim, JWT};
use std::future::Future;
use std::pin::Pin;

pub static BEARER: &str = "Bearer ";

/// Resolves the `Authorization: Bearer <token>` header into a `UserInfo`
/// request extension. Requests without the header pass through as anonymous;
/// a header that does not verify is rejected with 401.
pub struct JWTMiddleware {
    secret: Vec<u8>,
}

impl JWTMiddleware {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for JWTMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Error = Error;
    type Response = S::Response;
    type Transform = JWTService<S>;
    type InitError = ();
    type Future = Pin<Box<dyn Future<Output = Result<Self::Transform, Self::InitError>>>>;
    fn new_transform(&self, service: S) -> Self::Future {
        let secret = self.secret.clone();
        Box::pin(async move {
            Ok(JWTService {
                tokener: JWT::new(secret),
                next_service: service,
            })
        })
    }
}

pub struct JWTService<S> {
    tokener: JWT,
    next_service: S,
}

impl<S> JWTService<S> {
    fn verify(&self, header: &str) -> Result<Claim, AppError> {
        let token = header.strip_prefix(BEARER).ok_or(AppError::Unauthorized)?.trim();
        <JWT as Tokener<Claim>>::verify_token(&self.tokener, token).map_err(|e| {
            log::debug!("rejected token: {}", e);
            AppError::Unauthorized
        })
    }
}

impl<S> Service<ServiceRequest> for JWTService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(header) = req.headers().get(AUTHORIZATION) {
            let user_info = header
                .to_str()
                .map_err(|_| AppError::Unauthorized)
                .and_then(|h| self.verify(h))
                .and_then(|claim| claim.user_info().map_err(|_| AppError::Unauthorized));
            match user_info {
                Ok(user_info) => {
                    req.extensions_mut().insert(user_info);
                }
                Err(e) => return Box::pin(async move { Ok(req.error_response(e)) }),
            }
        }

        let res_fut = self.next_service.call(req);
        Box::pin(async move {
            let resp = res_fut.await?;
            Ok(resp)
        })
    }
}
