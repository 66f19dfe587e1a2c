//! Everything that runs: the Discord bot, the dashboard API and the jobs behind both.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP handlers, access control and DTO conversion
//! - **Bot** (`bot/`) - Gateway events, slash commands, buttons and modals
//! - **Service Layer** (`service/`) - The leave workflow, authorization policy, notification
//!   queue, caches and live fan-out
//! - **Platform** (`platform/`) - The chat platform boundary used for every outbound effect
//! - **Data Layer** (`data/`) - JSON collection files and the repositories over them
//! - **Model Layer** (`model/`) - Domain models and operation parameters
//! - **Error Layer** (`error/`) - Error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and the permission guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based configuration
//! - **State** (`state`) - Shared dashboard state
//! - **Startup** (`startup`) - Tracing, store seeding, HTTP clients, sessions and CORS
//! - **Router** (`router`) - Axum route table
//! - **Scheduler** (`scheduler/`) - Expiry sweep, statistics publication and queue drains
//!
//! # Request Flow
//!
//! Dashboard requests and bot interactions both end in the same service calls:
//!
//! 1. **Router** or the bot's interaction handler receives the request
//! 2. The caller's identity is resolved into an `Actor`
//! 3. **Service** authorizes the actor, commits the change to the data layer and
//!    publishes the transition
//! 4. Platform effects run inline when this process has a platform, otherwise they are
//!    queued for the bot
//! 5. The result is converted into a DTO or a chat reply

pub mod bot;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod platform;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
