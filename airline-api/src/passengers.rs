use airline_core::Passenger;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::{error::AppError, state::AppState, validation::validate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/flights/{code}/passengers",
            get(list_passengers).post(add_passenger),
        )
        .route(
            "/flights/{code}/passengers/{nif}",
            get(get_passenger).put(update_passenger).delete(delete_passenger),
        )
}

fn check_same_flight(path_code: &str, passenger: &Passenger) -> Result<(), AppError> {
    if passenger.flight_code != path_code {
        return Err(AppError::ValidationError(format!(
            "flightIdCode {} does not match flight {}",
            passenger.flight_code, path_code
        )));
    }
    Ok(())
}

async fn add_passenger(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(passenger): Json<Passenger>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    validate(&passenger)?;
    check_same_flight(&code, &passenger)?;

    let message = format!("Passenger {} added to flight {}", passenger.nif, code);
    state.passengers.add(passenger).await?;
    Ok((StatusCode::CREATED, Json(json!({ "message": message }))))
}

async fn list_passengers(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(state.passengers.list(&code).await?))
}

async fn get_passenger(
    State(state): State<AppState>,
    Path((code, nif)): Path<(String, String)>,
) -> Result<Json<Passenger>, AppError> {
    Ok(Json(state.passengers.get(&code, &nif).await?))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path((code, nif)): Path<(String, String)>,
    Json(passenger): Json<Passenger>,
) -> Result<Json<Value>, AppError> {
    validate(&passenger)?;
    check_same_flight(&code, &passenger)?;

    state.passengers.update(&nif, passenger).await?;
    Ok(Json(json!({
        "message": format!("Passenger {} updated on flight {}", nif, code)
    })))
}

async fn delete_passenger(
    State(state): State<AppState>,
    Path((code, nif)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    state.passengers.delete(&code, &nif).await?;
    Ok(Json(json!({
        "message": format!("Passenger {} removed from flight {}", nif, code)
    })))
}
