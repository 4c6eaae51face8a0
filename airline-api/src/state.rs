use std::sync::Arc;

use airline_core::{AuthorizationPolicy, CredentialVault, FlightService, PassengerService, UserService};
use airline_store::{InMemoryFlightRepository, InMemoryPassengerRepository, InMemoryUserRepository};

#[derive(Clone)]
pub struct AppState {
    pub flights: FlightService,
    pub passengers: PassengerService,
    pub users: UserService,
    pub policy: AuthorizationPolicy,
}

impl AppState {
    /// Fresh, empty in-memory stores. Nothing survives a restart.
    pub fn in_memory() -> Self {
        let flight_repo = Arc::new(InMemoryFlightRepository::new());
        let passenger_repo = Arc::new(InMemoryPassengerRepository::new());
        let user_repo = Arc::new(InMemoryUserRepository::new());

        Self {
            flights: FlightService::new(flight_repo.clone()),
            passengers: PassengerService::new(flight_repo, passenger_repo),
            users: UserService::new(user_repo, CredentialVault::new()),
            policy: AuthorizationPolicy::standard(),
        }
    }
}
