pub mod money;
pub mod odds;
