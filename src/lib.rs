pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod llm;
pub mod shutdown;
pub mod workflow;
