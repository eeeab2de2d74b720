pub mod application_dto;
pub mod auth_dto;
pub mod profile_dto;
pub mod user_dto;
pub mod vacancy_dto;
