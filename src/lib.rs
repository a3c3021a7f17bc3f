pub mod api;
pub mod app;
pub mod authz;
pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod pages;
pub mod repos;
pub mod services;
pub mod session;
pub mod state;
