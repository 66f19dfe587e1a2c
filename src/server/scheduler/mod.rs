//! Background jobs.
//!
//! Cron jobs run through `tokio-cron-scheduler`; queue drains poll on tokio intervals.

pub mod bot_stats;
pub mod leave_sweep;
pub mod queue_drain;

#[cfg(test)]
mod test;
