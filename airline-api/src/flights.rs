use airline_core::Flight;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState, validation::validate};

#[derive(Debug, Deserialize)]
pub struct FlightListQuery {
    pub ori: Option<String>,
    pub des: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FlightLookupQuery {
    pub date: Option<NaiveDate>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights).post(create_flight))
        .route(
            "/flights/{code}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
}

async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightListQuery>,
) -> Json<Vec<Flight>> {
    Json(
        state
            .flights
            .list(query.ori.as_deref(), query.des.as_deref())
            .await,
    )
}

/// `/flights/{id}?date=2024-01-12` searches by secondary id and day; without a date
/// the segment is taken as the flight code.
async fn get_flight(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(query): Query<FlightLookupQuery>,
) -> Result<Json<Flight>, AppError> {
    let flight = state.flights.get_or_find(&segment, query.date).await?;
    Ok(Json(flight))
}

async fn create_flight(
    State(state): State<AppState>,
    Json(flight): Json<Flight>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate(&flight)?;
    let code = flight.code.clone();
    state.flights.add(flight).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("Flight {} created", code) })),
    ))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(flight): Json<Flight>,
) -> Result<Json<Value>, AppError> {
    validate(&flight)?;
    state.flights.update(&code, flight).await?;
    Ok(Json(json!({ "message": format!("Flight {} updated", code) })))
}

async fn delete_flight(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, AppError> {
    state.flights.delete(&code).await?;
    Ok(Json(json!({ "message": format!("Flight {} deleted", code) })))
}
