pub mod auth;
pub mod evaluation;
pub mod session;
