pub mod session;
pub mod endpoint;
pub mod auth;
