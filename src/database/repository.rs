pub mod games_repository;
pub mod settings_repository;
pub mod threads_repository;
