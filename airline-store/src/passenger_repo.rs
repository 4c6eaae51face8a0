use airline_core::repository::PassengerRepository;
use airline_core::Passenger;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

type PassengerSet = HashMap<String, Passenger>;

/// Passengers grouped by flight code, then by nif.
///
/// Writers create a flight's set on first use. Readers treat a missing set as empty
/// rather than creating it, which is indistinguishable from the outside and keeps
/// reads on the shared lock.
#[derive(Default)]
pub struct InMemoryPassengerRepository {
    flights: RwLock<HashMap<String, PassengerSet>>,
}

impl InMemoryPassengerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of flight codes with a passenger set on file, empty sets included.
    pub async fn tracked_flights(&self) -> usize {
        self.flights.read().await.len()
    }
}

#[async_trait]
impl PassengerRepository for InMemoryPassengerRepository {
    async fn add(&self, passenger: Passenger) -> bool {
        let mut flights = self.flights.write().await;
        let set = flights.entry(passenger.flight_code.clone()).or_default();
        if set.contains_key(&passenger.nif) {
            return false;
        }
        set.insert(passenger.nif.clone(), passenger);
        true
    }

    async fn get(&self, flight_code: &str, nif: &str) -> Option<Passenger> {
        self.flights
            .read()
            .await
            .get(flight_code)
            .and_then(|set| set.get(nif))
            .cloned()
    }

    async fn exists(&self, flight_code: &str, nif: &str) -> bool {
        self.flights
            .read()
            .await
            .get(flight_code)
            .is_some_and(|set| set.contains_key(nif))
    }

    async fn delete(&self, flight_code: &str, nif: &str) -> bool {
        self.flights
            .write()
            .await
            .get_mut(flight_code)
            .is_some_and(|set| set.remove(nif).is_some())
    }

    async fn replace(&self, nif: &str, passenger: Passenger) {
        let mut flights = self.flights.write().await;
        let set = flights.entry(passenger.flight_code.clone()).or_default();
        set.remove(nif);
        set.insert(passenger.nif.clone(), passenger);
    }

    async fn list_for_flight(&self, flight_code: &str) -> Vec<Passenger> {
        self.flights
            .read()
            .await
            .get(flight_code)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default()
    }

    async fn list_all(&self) -> Vec<Passenger> {
        self.flights
            .read()
            .await
            .values()
            .flat_map(|set| set.values().cloned())
            .collect()
    }

    async fn drop_flight(&self, flight_code: &str) {
        if self.flights.write().await.remove(flight_code).is_some() {
            tracing::debug!("Dropped passenger set of flight {}", flight_code);
        }
    }
}
