#![allow(unused_crate_dependencies)]

#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/scheduler.rs"]
mod scheduler;

#[path = "integration/commands.rs"]
mod commands;

#[path = "integration/plugins.rs"]
mod plugins;
