pub mod application;
pub mod candidate;
pub mod company;
pub mod user;
pub mod vacancy;
