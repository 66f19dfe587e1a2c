use chrono::Utc;

use crate::server::{
    data::{store::JsonStore, user_permission::UserPermissionRepository},
    error::store::StoreError,
    model::user_permission::{DashboardRole, UserPermission},
};
use test_utils::{
    builder::TestBuilder,
    factory,
    fixture::discord::{ADMIN_USER_ID, APPROVER_ID, REQUESTER_ID},
};

mod set;
