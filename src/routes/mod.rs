pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod profiles;
pub mod uploads;
pub mod users;
pub mod vacancies;
