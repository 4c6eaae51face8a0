use std::sync::Arc;

use tracing::{debug, info};

use crate::guard::ConsistencyGuard;
use crate::passenger::Passenger;
use crate::repository::{FlightRepository, PassengerRepository};
use crate::{CoreError, CoreResult};

/// Passenger use cases. Every operation resolves the owning flight through the
/// [`ConsistencyGuard`] before touching passenger state.
#[derive(Clone)]
pub struct PassengerService {
    guard: ConsistencyGuard,
    passengers: Arc<dyn PassengerRepository>,
}

impl PassengerService {
    pub fn new(flights: Arc<dyn FlightRepository>, passengers: Arc<dyn PassengerRepository>) -> Self {
        Self {
            guard: ConsistencyGuard::new(flights, passengers.clone()),
            passengers,
        }
    }

    pub async fn add(&self, passenger: Passenger) -> CoreResult<()> {
        self.guard.resolve_flight(&passenger.flight_code).await?;

        let (code, nif) = (passenger.flight_code.clone(), passenger.nif.clone());
        if !self.passengers.add(passenger).await {
            return Err(CoreError::Conflict(format!("Passenger {} on flight {}", nif, code)));
        }
        info!("Passenger {} added to flight {}", nif, code);
        Ok(())
    }

    pub async fn get(&self, flight_code: &str, nif: &str) -> CoreResult<Passenger> {
        self.guard.resolve_flight(flight_code).await?;

        self.passengers
            .get(flight_code, nif)
            .await
            .ok_or_else(|| CoreError::NotFound(format!("Passenger {} on flight {}", nif, flight_code)))
    }

    pub async fn exists(&self, flight_code: &str, nif: &str) -> CoreResult<bool> {
        self.guard.resolve_flight(flight_code).await?;
        Ok(self.passengers.exists(flight_code, nif).await)
    }

    pub async fn list(&self, flight_code: &str) -> CoreResult<Vec<Passenger>> {
        self.guard.resolve_flight(flight_code).await?;

        let passengers = self.passengers.list_for_flight(flight_code).await;
        debug!("Flight {} has {} passengers", flight_code, passengers.len());
        Ok(passengers)
    }

    pub async fn delete(&self, flight_code: &str, nif: &str) -> CoreResult<()> {
        self.guard.resolve_flight(flight_code).await?;

        if !self.passengers.delete(flight_code, nif).await {
            return Err(CoreError::NotFound(format!("Passenger {} on flight {}", nif, flight_code)));
        }
        info!("Passenger {} removed from flight {}", nif, flight_code);
        Ok(())
    }

    /// Replaces passenger `nif` on `passenger.flight_code`. The payload may carry a new
    /// nif; an existing passenger under that nif is overwritten.
    pub async fn update(&self, nif: &str, passenger: Passenger) -> CoreResult<()> {
        let code = passenger.flight_code.clone();
        self.guard.resolve_flight(&code).await?;

        if !self.passengers.exists(&code, nif).await {
            return Err(CoreError::NotFound(format!("Passenger {} on flight {}", nif, code)));
        }
        self.passengers.replace(nif, passenger).await;
        info!("Passenger {} updated on flight {}", nif, code);
        Ok(())
    }
}
