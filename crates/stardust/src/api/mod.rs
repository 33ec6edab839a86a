pub mod config;
pub mod error;
pub mod stage;
pub mod simulator;
