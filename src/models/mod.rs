// src/models/mod.rs

pub mod auth;
pub mod certificate;
pub mod client;
pub mod contract;
pub mod dashboard;
pub mod import;
pub mod message;
pub mod partner;
pub mod payment;
