//! Access rules for the HTTP resources.
//!
//! Every rule is a plain predicate over the acting identity, the requested
//! action and, for [`Rule::AdminOrSelf`], the identity the request targets.
//! Rules are composed with boolean operators rather than layered objects, so
//! a rule can be read off its match arm.

use crate::context::UserInfo;
use crate::error::Error;
use actix_web::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User { id: i32, is_staff: bool },
}

impl From<Option<&UserInfo>> for Actor {
    fn from(user: Option<&UserInfo>) -> Self {
        match user {
            Some(u) => Actor::User { id: u.id, is_staff: u.is_staff },
            None => Actor::Anonymous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn from_method(method: &Method) -> Self {
        if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
            Action::Read
        } else if method == Method::POST {
            Action::Create
        } else if method == Method::PUT || method == Method::PATCH {
            Action::Update
        } else {
            Action::Delete
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    AdminOnly,
    AdminOrSelf,
    AdminWriteElseReadOnly,
}

pub fn is_admin(actor: Actor) -> bool {
    matches!(actor, Actor::User { is_staff: true, .. })
}

pub fn is_self(actor: Actor, target: Option<i32>) -> bool {
    match (actor, target) {
        (Actor::User { id, .. }, Some(target)) => id == target,
        _ => false,
    }
}

pub fn is_read_only(action: Action) -> bool {
    action == Action::Read
}

pub fn permits(rule: Rule, actor: Actor, action: Action, target: Option<i32>) -> bool {
    match rule {
        Rule::AdminOnly => is_admin(actor),
        Rule::AdminOrSelf => is_admin(actor) || is_self(actor, target),
        Rule::AdminWriteElseReadOnly => is_admin(actor) || is_read_only(action),
    }
}

pub fn authorize(rule: Rule, actor: Actor, action: Action, target: Option<i32>) -> Result<(), Error> {
    if permits(rule, actor, action, target) {
        Ok(())
    } else {
        log::debug!("{:?} denied {:?} under {:?}", actor, action, rule);
        Err(Error::PermissionDenied)
    }
}
