//! Authorization middleware, applied per route with
//! `axum::middleware::from_fn_with_state` in the router.
//!
//! Admins may touch everything. Clients may only touch projects they own and
//! the answers and reports that hang off them.

pub(crate) mod answers;
pub(crate) mod projects;

use crate::{extractors::authenticated_user::AuthenticatedUser, AppState};
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::Id;
use log::*;

/// Trait representing a single authorization rule.
///
/// Implementors answer **“is the authenticated user allowed to proceed?”**.
/// The rule receives:
/// * shared application state (`AppState`)
/// * the authenticated [`domain::users::Model`]
/// * any additional [`Id`] parameters supplied by the caller.
#[async_trait]
pub trait Check: Send + Sync {
    async fn eval(&self, app: &AppState, user: &domain::users::Model, args: Vec<Id>) -> bool;
}

/// Pairs a [`Check`] implementation with the concrete arguments that the rule
/// should receive when evaluated.
///
/// Most callers will create predicates with the convenience constructor
/// [`Predicate::new`]:
/// ```rust,ignore
/// let checks = vec![Predicate::new(UserOwnsProject, vec![project_id])];
/// ```
/// The vector of predicates can then be passed to [`authorize`] middleware.
pub(crate) struct Predicate {
    predicate: Box<dyn Check>,
    args: Vec<Id>,
}

impl Predicate {
    pub(crate) fn new<C: Check + 'static>(predicate: C, args: Vec<Id>) -> Self {
        Self {
            predicate: Box::new(predicate),
            args,
        }
    }

    pub(crate) async fn check(&self, app_state: &AppState, user: &domain::users::Model) -> bool {
        self.predicate
            .eval(app_state, user, self.args.clone())
            .await
    }
}

/// Axum middleware that enforces one or more [`Predicate`]s.
///
/// Each predicate is evaluated in the order supplied; if any rule returns
/// `false` the request is aborted with **403 FORBIDDEN**.  When all rules
/// pass the wrapped handler (`next`) is executed.
pub(crate) async fn authorize(
    app_state: &AppState,
    authenticated_user: domain::users::Model,
    request: Request,
    next: Next,
    checks: Vec<Predicate>,
) -> impl IntoResponse {
    for check in checks {
        if !check.check(app_state, &authenticated_user).await {
            warn!(
                "User {} is not allowed to {} {}",
                authenticated_user.id,
                request.method(),
                request.uri().path()
            );
            return (StatusCode::FORBIDDEN, "FORBIDDEN").into_response();
        }
    }
    next.run(request).await
}

/// Response for a failed lookup of the record a route is guarded by: 404 when
/// it doesn't exist, the regular error mapping for anything else.
pub(crate) fn lookup_failed(
    err: impl Into<domain::error::Error>,
    record: &str,
    id: Id,
) -> Response {
    let err = err.into();
    if err.is_not_found() {
        debug!("{record} not found with ID {id}");
        (StatusCode::NOT_FOUND, "NOT FOUND").into_response()
    } else {
        error!("Failed to look up {record} {id}");
        crate::Error::from(err).into_response()
    }
}

/// Lets only admins through.
/// Intended to be given to axum::middleware::from_fn_with_state in the router
pub(crate) async fn admin(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    request: Request,
    next: Next,
) -> impl IntoResponse {
    let checks = vec![Predicate::new(UserIsAdmin, vec![])];
    authorize(&app_state, user, request, next, checks).await
}

pub struct UserIsAdmin;

#[async_trait]
impl Check for UserIsAdmin {
    async fn eval(
        &self,
        _app_state: &AppState,
        authenticated_user: &domain::users::Model,
        _args: Vec<Id>,
    ) -> bool {
        authenticated_user.role == domain::users::Role::Admin
    }
}

/// Passes when the authenticated user is the owner given as the first argument.
pub struct UserIsOwner;

#[async_trait]
impl Check for UserIsOwner {
    async fn eval(
        &self,
        _app_state: &AppState,
        authenticated_user: &domain::users::Model,
        args: Vec<Id>,
    ) -> bool {
        args.first()
            .is_some_and(|owner_id| *owner_id == authenticated_user.id)
    }
}
