//! Slash commands of the leave workflow.
//!
//! Each command module exposes its `CreateCommand` definition and a `run` function that
//! turns the parsed options into a `LeaveService` call and an ephemeral reply.

pub mod staff_loa;
pub mod staff_return;
pub mod staff_role;

use serenity::all::{CreateCommand, ResolvedOption, ResolvedValue};
use std::collections::HashMap;

use crate::server::error::leave::LeaveError;

/// Every command the bot registers in its guild.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        staff_loa::definition(),
        staff_return::definition(),
        staff_role::definition(),
    ]
}

/// Option values of one (sub)command, keyed by option name.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CommandArgs {
    /// Selected subcommand, if the command has subcommands.
    pub subcommand: Option<String>,
    strings: HashMap<String, String>,
    booleans: HashMap<String, bool>,
    /// Role and channel options.
    ids: HashMap<String, u64>,
}

impl CommandArgs {
    /// Flattens resolved options, descending into a subcommand.
    pub fn from_resolved(options: &[ResolvedOption<'_>]) -> Self {
        let mut args = Self::default();
        args.collect(options);
        args
    }

    fn collect(&mut self, options: &[ResolvedOption<'_>]) {
        for option in options {
            match &option.value {
                ResolvedValue::SubCommand(inner) => {
                    self.subcommand = Some(option.name.to_string());
                    self.collect(inner);
                }
                ResolvedValue::String(value) => {
                    self.strings.insert(option.name.to_string(), value.to_string());
                }
                ResolvedValue::Boolean(value) => {
                    self.booleans.insert(option.name.to_string(), *value);
                }
                ResolvedValue::Role(role) => {
                    self.ids.insert(option.name.to_string(), role.id.get());
                }
                ResolvedValue::Channel(channel) => {
                    self.ids.insert(option.name.to_string(), channel.id.get());
                }
                _ => {}
            }
        }
    }

    pub fn with_string(mut self, name: &str, value: &str) -> Self {
        self.strings.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_bool(mut self, name: &str, value: bool) -> Self {
        self.booleans.insert(name.to_string(), value);
        self
    }

    pub fn with_id(mut self, name: &str, id: u64) -> Self {
        self.ids.insert(name.to_string(), id);
        self
    }

    pub fn id(&self, name: &str) -> Option<u64> {
        self.ids.get(name).copied()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.strings.get(name).map(String::as_str)
    }

    /// A required string option.
    ///
    /// Discord enforces required options client side; a missing one is still reported
    /// as a validation error rather than trusted.
    pub fn required(&self, name: &str) -> Result<&str, LeaveError> {
        self.string(name)
            .ok_or_else(|| LeaveError::Validation(format!("Missing option '{}'.", name)))
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        self.booleans.get(name).copied()
    }
}
