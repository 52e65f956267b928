//! Operator CLI around [`farmhand`]: inspect resolved configuration, list
//! farm sessions, push manual status updates, and replay start-time
//! correlation against live data.

pub mod cli;
pub mod commands;
pub mod logging;
