//! Help Desk Router
//!
//! Mounted by the binary under `/api`. Everything requires a bearer token
//! except the public request form: `GET /request-types` and `POST /requests`.

use std::sync::Arc;

use auth::domain::repository::AccountRepository;
use auth::{AuthConfig, AuthLayerState, PgAccountRepository, require_auth};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use platform::mail::{MailDelivery, Mailer};

use crate::application::config::HelpdeskConfig;
use crate::domain::repository::HelpdeskStore;
use crate::infra::postgres::PgHelpdeskRepository;
use crate::presentation::handlers::{self, HelpdeskAppState};

/// Create the Help Desk router with PostgreSQL repositories
pub fn helpdesk_router(
    repo: PgHelpdeskRepository,
    accounts: PgAccountRepository,
    mailer: MailDelivery,
    config: HelpdeskConfig,
    auth_config: Arc<AuthConfig>,
) -> Router {
    helpdesk_router_generic(repo, accounts, mailer, config, auth_config)
}

/// Create a generic Help Desk router for any store and mailer
pub fn helpdesk_router_generic<R, A, M>(
    repo: R,
    accounts: A,
    mailer: M,
    config: HelpdeskConfig,
    auth_config: Arc<AuthConfig>,
) -> Router
where
    R: HelpdeskStore,
    A: AccountRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = HelpdeskAppState {
        repo: Arc::new(repo),
        accounts: Arc::new(accounts),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route(
            "/incident-types",
            get(handlers::list_incident_types::<R, A, M>)
                .post(handlers::create_incident_type::<R, A, M>),
        )
        .route(
            "/incident-types/{id}",
            put(handlers::update_incident_type::<R, A, M>)
                .delete(handlers::delete_incident_type::<R, A, M>),
        )
        .route(
            "/technicians",
            get(handlers::list_technicians::<R, A, M>)
                .post(handlers::create_technician::<R, A, M>),
        )
        .route(
            "/technicians/{id}",
            get(handlers::get_technician::<R, A, M>)
                .put(handlers::update_technician::<R, A, M>)
                .delete(handlers::delete_technician::<R, A, M>),
        )
        .route(
            "/tickets",
            get(handlers::list_tickets::<R, A, M>).post(handlers::create_ticket::<R, A, M>),
        )
        .route(
            "/tickets/{id}",
            put(handlers::update_ticket::<R, A, M>).delete(handlers::delete_ticket::<R, A, M>),
        )
        .route(
            "/kpis",
            get(handlers::list_kpis::<R, A, M>).post(handlers::create_kpi::<R, A, M>),
        )
        .route(
            "/kpis/{id}",
            get(handlers::get_kpi::<R, A, M>).delete(handlers::delete_kpi::<R, A, M>),
        )
        .route(
            "/request-types",
            post(handlers::create_request_type::<R, A, M>),
        )
        .route("/requests", get(handlers::list_requests::<R, A, M>))
        .route_layer(middleware::from_fn_with_state(
            AuthLayerState::new(auth_config),
            require_auth,
        ));

    Router::new()
        .route(
            "/request-types",
            get(handlers::list_request_types::<R, A, M>),
        )
        .route("/requests", post(handlers::submit_request::<R, A, M>))
        .merge(protected)
        .with_state(state)
}
