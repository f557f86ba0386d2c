// src/services/mod.rs

pub mod auth;
pub mod client_service;
pub mod contract_service;
pub mod import;
pub mod payment_service;
