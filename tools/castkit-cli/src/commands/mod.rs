pub mod check;
pub mod config;
pub mod permission;
pub mod record;
pub mod sources;
