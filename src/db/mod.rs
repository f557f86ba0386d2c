// src/db/mod.rs

pub mod certificate_repo;
pub mod client_repo;
pub mod contract_repo;
pub mod dashboard_repo;
pub mod message_repo;
pub mod partner_repo;
pub mod payment_repo;
pub mod user_repo;
