pub mod crypto;
pub mod files;
