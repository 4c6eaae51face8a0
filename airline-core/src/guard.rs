use std::sync::Arc;

use crate::flight::Flight;
use crate::repository::{FlightRepository, PassengerRepository};
use crate::{CoreError, CoreResult};

/// Keeps passenger sets from outliving their flight.
///
/// Deleting a flight does not cascade. Instead every passenger-path operation runs
/// [`ConsistencyGuard::resolve_flight`] first: look the flight up, and if it is gone,
/// drop whatever passenger set is still filed under its code and report the flight as
/// missing. The two steps are not atomic across stores; a flight delete racing a
/// passenger add on the same code can leave a set that is pruned on the next access.
#[derive(Clone)]
pub struct ConsistencyGuard {
    flights: Arc<dyn FlightRepository>,
    passengers: Arc<dyn PassengerRepository>,
}

enum FlightCheck {
    Present(Flight),
    OrphanPassengerSet,
}

impl ConsistencyGuard {
    pub fn new(flights: Arc<dyn FlightRepository>, passengers: Arc<dyn PassengerRepository>) -> Self {
        Self { flights, passengers }
    }

    async fn check(&self, flight_code: &str) -> FlightCheck {
        match self.flights.get_by_key(flight_code).await {
            Some(flight) => FlightCheck::Present(flight),
            None => FlightCheck::OrphanPassengerSet,
        }
    }

    pub async fn resolve_flight(&self, flight_code: &str) -> CoreResult<Flight> {
        match self.check(flight_code).await {
            FlightCheck::Present(flight) => Ok(flight),
            FlightCheck::OrphanPassengerSet => {
                self.passengers.drop_flight(flight_code).await;
                tracing::warn!("Flight {} not found, pruned its passenger set", flight_code);
                Err(CoreError::NotFound(format!("Flight {}", flight_code)))
            }
        }
    }
}
