//! Directory Router

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{GroupRepository, MembershipRepository, UserRepository};
use crate::infra::postgres::PgDirectoryRepository;
use crate::presentation::handlers::{self, DirectoryAppState};

/// Create the directory router with the PostgreSQL repository
pub fn directory_router(repo: PgDirectoryRepository, config: AuthConfig) -> Router {
    directory_router_generic(repo, config)
}

/// Create a directory router for any repository implementation
pub fn directory_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + GroupRepository + MembershipRepository + Clone + Send + Sync + 'static,
{
    let state = DirectoryAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        // Public: registration and sign-in
        .route(
            "/users",
            post(handlers::sign_up::<R>).get(handlers::list_users::<R>),
        )
        .route("/users/sign-in", post(handlers::sign_in::<R>))
        // Users
        .route(
            "/users/{user_id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route("/users/{user_id}/groups", get(handlers::user_groups::<R>))
        // Groups
        .route(
            "/groups",
            get(handlers::list_groups::<R>).post(handlers::create_group::<R>),
        )
        .route(
            "/groups/{group_id}",
            get(handlers::get_group::<R>)
                .put(handlers::update_group::<R>)
                .delete(handlers::delete_group::<R>),
        )
        .route("/groups/{group_id}/users", get(handlers::group_users::<R>))
        // Memberships
        .route(
            "/groups/{group_id}/users/{user_id}",
            put(handlers::attach_member::<R>).delete(handlers::detach_member::<R>),
        )
        .with_state(state)
}
