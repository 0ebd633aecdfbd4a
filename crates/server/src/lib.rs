//! Server crate for the activity voting engine.
//!
//! This crate contains the `VotingService` facade that coordinates ballot
//! storage, the ranking methods and the recommender, plus the engine
//! configuration file.

pub mod config;
pub mod service;

pub use config::EngineConfig;
pub use service::{ActivityScoreReport, VotingService};
