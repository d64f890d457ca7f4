pub mod event;
pub mod types;
pub mod user;
