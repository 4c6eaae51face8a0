use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::flight::Flight;
use crate::repository::FlightRepository;
use crate::{CoreError, CoreResult};

/// Flight use cases over a [`FlightRepository`].
#[derive(Clone)]
pub struct FlightService {
    repo: Arc<dyn FlightRepository>,
}

impl FlightService {
    pub fn new(repo: Arc<dyn FlightRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, origin: Option<&str>, destination: Option<&str>) -> Vec<Flight> {
        let flights = self.repo.list(origin, destination).await;
        debug!(?origin, ?destination, "Listed {} flights", flights.len());
        flights
    }

    pub async fn get(&self, code: &str) -> CoreResult<Flight> {
        self.repo
            .get_by_key(code)
            .await
            .ok_or_else(|| CoreError::NotFound(format!("Flight {}", code)))
    }

    pub async fn find_by_id_and_date(&self, id: &str, date: NaiveDate) -> CoreResult<Flight> {
        self.repo
            .find_by_id_and_date(id, date)
            .await
            .ok_or_else(|| CoreError::NotFound(format!("Flight {} on {}", id, date)))
    }

    /// `/flights/{segment}` lookup: by secondary id when a date is given, else by code.
    pub async fn get_or_find(&self, segment: &str, date: Option<NaiveDate>) -> CoreResult<Flight> {
        match date {
            Some(date) => self.find_by_id_and_date(segment, date).await,
            None => self.get(segment).await,
        }
    }

    pub async fn add(&self, flight: Flight) -> CoreResult<()> {
        let code = flight.code.clone();
        if !self.repo.add(flight).await {
            return Err(CoreError::Conflict(format!("Flight {}", code)));
        }
        info!("Flight {} created", code);
        Ok(())
    }

    /// The record may move: it is stored under `flight.code`, not under `code`.
    pub async fn update(&self, code: &str, flight: Flight) -> CoreResult<()> {
        let new_code = flight.code.clone();
        if !self.repo.replace(code, flight).await {
            return Err(CoreError::NotFound(format!("Flight {}", code)));
        }
        info!("Flight {} updated (now {})", code, new_code);
        Ok(())
    }

    /// Passengers of the flight are left in place and pruned on their next access.
    pub async fn delete(&self, code: &str) -> CoreResult<()> {
        if !self.repo.delete(code).await {
            return Err(CoreError::NotFound(format!("Flight {}", code)));
        }
        info!("Flight {} deleted", code);
        Ok(())
    }
}
