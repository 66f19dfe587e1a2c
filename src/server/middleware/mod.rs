//! Session wrappers and the permission guard used by dashboard controllers.

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
