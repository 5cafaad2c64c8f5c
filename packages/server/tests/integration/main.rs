mod auth;
mod evaluation;
