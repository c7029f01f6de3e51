pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod storage;

// Domain data shapes shared across layers
pub mod domain;

// Application use cases and infrastructure adapters
pub mod app;
pub mod infra;

pub mod observability;

// Collaborators around the record pipeline
pub mod extract;
pub mod generator;
pub mod ranking;
