use crate::context::UserInfo;
use crate::core::access::{authorize, Action, Actor, Rule};
use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    HttpMessage,
};
use std::future::Future;
use std::future::{ready, Ready};
use std::pin::Pin;
use std::rc::Rc;
use std::task::Poll;

/// Applies an access rule to every request reaching the wrapped resource.
///
/// For `Rule::AdminOrSelf` the target identity is read from the path
/// parameter named with [`Author::target`].
pub struct Author {
    rule: Rule,
    path_arg_name: Option<Rc<str>>,
}

impl Author {
    pub fn new(rule: Rule) -> Self {
        Self { rule, path_arg_name: None }
    }

    pub fn target(mut self, path_arg_name: &str) -> Self {
        self.path_arg_name = Some(path_arg_name.into());
        self
    }
}

impl<S> Transform<S, ServiceRequest> for Author
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static,
{
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type Response = S::Response;
    type Error = S::Error;
    type InitError = ();
    type Transform = AuthorMiddleware<S>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthorMiddleware {
            rule: self.rule,
            path_arg_name: self.path_arg_name.clone(),
            service,
        }))
    }
}

pub struct AuthorMiddleware<S> {
    rule: Rule,
    path_arg_name: Option<Rc<str>>,
    service: S,
}

impl<S> Service<ServiceRequest> for AuthorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = actix_web::Error>,
    S::Future: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<ServiceResponse, Self::Error>>>>;
    fn poll_ready(&self, ctx: &mut std::task::Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }
    fn call(&self, req: ServiceRequest) -> Self::Future {
        let actor = Actor::from(req.extensions().get::<UserInfo>());
        let action = Action::from_method(req.method());
        let target = self
            .path_arg_name
            .as_deref()
            .and_then(|name| req.match_info().get(name))
            .and_then(|v| v.parse::<i32>().ok());
        if let Err(e) = authorize(self.rule, actor, action, target) {
            return Box::pin(async move { Ok(req.error_response(e)) });
        }
        let next = self.service.call(req);
        Box::pin(next)
    }
}
