pub mod errors;
pub mod models;
pub mod phone;
pub mod ports;
pub mod service;
