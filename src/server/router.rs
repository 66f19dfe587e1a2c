use axum::{
    routing::{get, post, put},
    Router,
};

use crate::server::{
    controller::{
        auth::{callback, get_user, login, logout},
        config::{get_config, update_config},
        leave::{create_leave_record, get_leave_records, update_leave_record},
        live::live_socket,
        stats::get_stats,
        user_role::{get_user_roles, update_user_role},
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", get(login))
        .route("/api/auth/callback", get(callback))
        .route("/api/auth/logout", get(logout))
        .route("/api/auth/user", get(get_user))
        .route(
            "/api/leave-records",
            get(get_leave_records).post(create_leave_record),
        )
        .route(
            "/api/leave-records/{id}/{action}",
            post(update_leave_record),
        )
        .route("/api/config", get(get_config).post(update_config))
        .route("/api/user-roles", get(get_user_roles))
        .route("/api/user-roles/{user_id}", put(update_user_role))
        .route("/api/stats", get(get_stats))
        .route("/api/live", get(live_socket))
}
