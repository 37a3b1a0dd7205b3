#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod app;
pub use app::{ActionError, App};

mod cli;
pub use cli::Cli;

mod config;
pub use config::{AppConfig, DemoConfig};

pub mod console;
pub mod demo;
pub mod menu;
pub mod screens;
pub mod table;
