pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod processor;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
