//! Repository layer over the JSON collection store.
//!
//! `store` owns the collection files and the per-collection write locks. Each repository
//! wraps the store for one collection and converts the raw collection shape into domain
//! models for usage within services. Repositories never apply business rules; they only
//! read, rewrite and prune.

pub mod history;
pub mod leave;
pub mod message_link;
pub mod role_config;
pub mod store;
pub mod sweep_ledger;
pub mod user_permission;

#[cfg(test)]
mod test;
