pub mod agent;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pattern;
pub mod routes;
pub mod state;
pub mod util;
