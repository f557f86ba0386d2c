// src/handlers/mod.rs

pub mod auth;
pub mod certificates;
pub mod clients;
pub mod contracts;
pub mod dashboard;
pub mod import;
pub mod messages;
pub mod partners;
pub mod payments;
