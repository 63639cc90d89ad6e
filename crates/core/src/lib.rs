pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod issue;
pub mod pipeline;
pub mod processors;
pub mod repr;
