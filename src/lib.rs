pub mod api;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod http;
pub mod runtime;
