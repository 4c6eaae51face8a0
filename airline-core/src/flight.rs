use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

/// A scheduled flight, keyed by its unique flight code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Primary key ("IB100").
    #[serde(rename = "idCode")]
    pub code: String,
    /// Secondary, non-unique identifier. Paired with `date` for lookups.
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate, // Calendar day only, never a timestamp
}

impl Flight {
    pub fn new(
        code: impl Into<String>,
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            code: code.into(),
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            date,
        }
    }

    /// Origin/destination filter used by listings. `None` matches any value.
    pub fn matches_route(&self, origin: Option<&str>, destination: Option<&str>) -> bool {
        origin.map_or(true, |o| o == self.origin)
            && destination.map_or(true, |d| d == self.destination)
    }
}
