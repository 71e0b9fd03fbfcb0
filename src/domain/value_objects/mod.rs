pub mod analytics;
pub mod catalog;
pub mod enums;
pub mod money;
pub mod subscriptions;
