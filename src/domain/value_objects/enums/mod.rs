pub mod billing_cycles;
pub mod subscription_statuses;
