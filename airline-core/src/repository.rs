use async_trait::async_trait;
use chrono::NaiveDate;

use crate::flight::Flight;
use crate::passenger::Passenger;
use crate::user::UserRecord;

/// Repository trait for flight data access.
///
/// Absence and key collisions are reported through `bool`/`Option`; services decide
/// what they mean for the caller.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Inserts unless the code is taken. Never overwrites.
    async fn add(&self, flight: Flight) -> bool;

    /// Removes the record under `code` and inserts `flight` under its own code,
    /// which may differ from `code`. `false` when `code` is absent.
    async fn replace(&self, code: &str, flight: Flight) -> bool;

    async fn delete(&self, code: &str) -> bool;

    async fn get_by_key(&self, code: &str) -> Option<Flight>;

    /// First flight whose secondary id and calendar date both match.
    async fn find_by_id_and_date(&self, id: &str, date: NaiveDate) -> Option<Flight>;

    async fn list(&self, origin: Option<&str>, destination: Option<&str>) -> Vec<Flight>;
}

/// Repository trait for passengers, grouped per flight code.
///
/// Touching a flight's passenger set creates an empty one when missing, so reads on
/// an unknown flight look like reads on an empty flight. Whether the flight exists is
/// decided by [`crate::guard::ConsistencyGuard`].
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    /// `false` when `(flight_code, nif)` is already present.
    async fn add(&self, passenger: Passenger) -> bool;

    async fn get(&self, flight_code: &str, nif: &str) -> Option<Passenger>;

    async fn exists(&self, flight_code: &str, nif: &str) -> bool;

    async fn delete(&self, flight_code: &str, nif: &str) -> bool;

    /// Unconditional: drops `nif` from the passenger's flight and inserts the passenger
    /// under its own nif. Callers check [`PassengerRepository::exists`] first, otherwise
    /// this creates a new entry.
    async fn replace(&self, nif: &str, passenger: Passenger);

    async fn list_for_flight(&self, flight_code: &str) -> Vec<Passenger>;

    async fn list_all(&self) -> Vec<Passenger>;

    /// Forgets the whole passenger set of a flight. Idempotent.
    async fn drop_flight(&self, flight_code: &str);
}

/// Repository trait for users in their stored (encrypted) form.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `false` when the username is taken.
    async fn create(&self, user: UserRecord) -> bool;

    /// Overwrites the record with the same username. `false` when absent.
    async fn update(&self, user: UserRecord) -> bool;

    async fn delete(&self, username: &str) -> bool;

    async fn get(&self, username: &str) -> Option<UserRecord>;

    async fn exists(&self, username: &str) -> bool;
}
