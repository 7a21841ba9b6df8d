pub mod assign;
pub mod projects;
pub mod types;
