use serde::{Deserialize, Serialize};

/// A passenger booked on one flight. `(flight_code, nif)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub nif: String,
    #[serde(rename = "flightIdCode")]
    pub flight_code: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub seat_number: i32,
}
