pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod types;
