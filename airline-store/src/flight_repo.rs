use airline_core::repository::FlightRepository;
use airline_core::Flight;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Flights keyed by code. Writers serialize on the lock; readers never see a
/// half-applied replace.
#[derive(Default)]
pub struct InMemoryFlightRepository {
    flights: RwLock<HashMap<String, Flight>>,
}

impl InMemoryFlightRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightRepository {
    async fn add(&self, flight: Flight) -> bool {
        let mut flights = self.flights.write().await;
        if flights.contains_key(&flight.code) {
            return false;
        }
        flights.insert(flight.code.clone(), flight);
        true
    }

    async fn replace(&self, code: &str, flight: Flight) -> bool {
        let mut flights = self.flights.write().await;
        if flights.remove(code).is_none() {
            return false;
        }
        flights.insert(flight.code.clone(), flight);
        true
    }

    async fn delete(&self, code: &str) -> bool {
        self.flights.write().await.remove(code).is_some()
    }

    async fn get_by_key(&self, code: &str) -> Option<Flight> {
        self.flights.read().await.get(code).cloned()
    }

    async fn find_by_id_and_date(&self, id: &str, date: NaiveDate) -> Option<Flight> {
        // Duplicate (id, date) pairs are not rejected on insert; first hit wins.
        self.flights
            .read()
            .await
            .values()
            .find(|f| f.id == id && f.date == date)
            .cloned()
    }

    async fn list(&self, origin: Option<&str>, destination: Option<&str>) -> Vec<Flight> {
        self.flights
            .read()
            .await
            .values()
            .filter(|f| f.matches_route(origin, destination))
            .cloned()
            .collect()
    }
}
