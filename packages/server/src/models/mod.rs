pub mod auth;
pub mod evaluation;
pub mod session;
pub mod shared;
