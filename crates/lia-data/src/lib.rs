pub mod cache;
pub mod fallback;
pub mod hubspot;
pub mod models;
pub mod service;
pub mod sheets;

pub use models::{Article, ConditionSearch, LawFirm, SettlementData};
pub use service::DataService;
