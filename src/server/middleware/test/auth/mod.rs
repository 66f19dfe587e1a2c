use crate::server::{
    data::store::JsonStore,
    error::{auth::AuthError, AppError},
    middleware::{auth::AuthGuard, session::AuthSession},
    model::user_permission::{DashboardRole, Permission},
    service::user_permission::PermissionService,
};
use test_utils::{builder::TestBuilder, factory, fixture};
