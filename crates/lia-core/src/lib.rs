pub mod agent;
pub mod config;
pub mod links;
pub mod markdown;
pub mod pipeline;
pub mod prompts;
pub mod referral;
pub mod safety;
pub mod tables;
pub mod topics;
pub mod types;

pub use types::*;
