//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Methods that take part in
//! multi-table transactions accept any `PgExecutor` instead, so callers can
//! pass either the pool or `&mut *tx`.

pub mod adoption_repo;
pub mod animal_repo;
pub mod breed_repo;
pub mod daily_task_repo;
pub mod default_entry_repo;
pub mod event_repo;
pub mod password_reset_repo;
pub mod refresh_token_repo;
pub mod shelter_configuration_repo;
pub mod species_repo;
pub mod user_repo;

pub use adoption_repo::AdoptionRepo;
pub use animal_repo::AnimalRepo;
pub use breed_repo::BreedRepo;
pub use daily_task_repo::DailyTaskRepo;
pub use default_entry_repo::DefaultEntryRepo;
pub use event_repo::EventRepo;
pub use password_reset_repo::PasswordResetRepo;
pub use refresh_token_repo::RefreshTokenRepo;
pub use shelter_configuration_repo::ShelterConfigurationRepo;
pub use species_repo::SpeciesRepo;
pub use user_repo::UserRepo;
