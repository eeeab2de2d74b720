pub mod application_repo;
pub mod candidate_repo;
pub mod company_repo;
pub mod user_repo;
pub mod vacancy_repo;

pub use application_repo::ApplicationRepo;
pub use candidate_repo::CandidateRepo;
pub use company_repo::CompanyRepo;
pub use user_repo::UserRepo;
pub use vacancy_repo::VacancyRepo;
