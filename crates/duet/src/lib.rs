pub mod conversation;
pub mod errors;
pub mod models;
pub mod providers;
