pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use crate::repositories::{ApplicationRepo, CandidateRepo, CompanyRepo, UserRepo, VacancyRepo};
use crate::services::{auth_service::AuthService, rules_service::RulesService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub users: UserRepo,
    pub companies: CompanyRepo,
    pub candidates: CandidateRepo,
    pub vacancies: VacancyRepo,
    pub applications: ApplicationRepo,
    pub rules: RulesService,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let users = UserRepo::new(pool.clone());
        let companies = CompanyRepo::new(pool.clone());
        let candidates = CandidateRepo::new(pool.clone());
        let vacancies = VacancyRepo::new(pool.clone());
        let applications = ApplicationRepo::new(pool.clone());
        let rules = RulesService::new(pool.clone());
        let auth = AuthService::new(pool.clone(), config.two_factor_mode);

        Self {
            pool,
            users,
            companies,
            candidates,
            vacancies,
            applications,
            rules,
            auth,
        }
    }
}
