pub mod flight;
pub mod passenger;
pub mod user;
pub mod repository;
pub mod vault;
pub mod policy;
pub mod guard;
pub mod flight_service;
pub mod passenger_service;
pub mod user_service;

pub use flight::Flight;
pub use passenger::Passenger;
pub use user::{Principal, Role, User, UserRecord};
pub use vault::{CredentialVault, PasswordEncoder, VaultError};
pub use policy::AuthorizationPolicy;
pub use flight_service::FlightService;
pub use passenger_service::PassengerService;
pub use user_service::UserService;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error(transparent)]
    Vault(#[from] VaultError),
}

pub type CoreResult<T> = Result<T, CoreError>;
