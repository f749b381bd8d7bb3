pub mod cache;
pub mod user;
