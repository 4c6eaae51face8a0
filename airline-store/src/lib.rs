pub mod app_config;
pub mod flight_repo;
pub mod passenger_repo;
pub mod user_repo;

pub use flight_repo::InMemoryFlightRepository;
pub use passenger_repo::InMemoryPassengerRepository;
pub use user_repo::InMemoryUserRepository;
