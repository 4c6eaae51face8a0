use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for personal data (national ids, emails, password material) that masks
/// its value in Debug and Display output.
///
/// Serialization passes the inner value through untouched: API payloads need the real
/// value, log macros like `tracing::info!("{:?}", user)` must not see it.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the real value. Call sites are the places PII leaves the mask.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_hide_value() {
        let nif = Masked::new("12345678A".to_string());
        assert_eq!(format!("{:?}", nif), "********");
        assert_eq!(format!("{}", nif), "********");
        assert_eq!(nif.expose(), "12345678A");
    }

    #[test]
    fn test_serde_is_transparent() {
        let email: Masked<String> = serde_json::from_str("\"ana@example.com\"").unwrap();
        assert_eq!(email.expose(), "ana@example.com");
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"ana@example.com\"");
    }
}
