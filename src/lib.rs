pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod payments;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
