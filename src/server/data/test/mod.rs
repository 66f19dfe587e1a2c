mod leave;
mod user_permission;
