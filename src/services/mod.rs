pub mod auth_service;
pub mod rules_service;
