//! Custom serde helpers for market-data wire formats.

/// Deserializes a JSON number (integer or float) into Unix milliseconds/seconds as `i64`.
pub mod timestamp_number {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        if !raw.is_finite() {
            return Err(serde::de::Error::custom(format!("Invalid timestamp: {}", raw)));
        }
        Ok(raw.round() as i64)
    }
}
