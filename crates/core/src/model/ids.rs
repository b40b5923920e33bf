use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Habit
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitId(u64);

impl HabitId {
    /// Creates a new `HabitId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Unique identifier for a HabitLog row
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HabitLogId(u64);

impl HabitLogId {
    /// Creates a new `HabitLogId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying u64 value
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HabitId({})", self.0)
    }
}

impl fmt::Debug for HabitLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HabitLogId({})", self.0)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for HabitLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing an ID from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for HabitId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(HabitId::new)
            .map_err(|_| ParseIdError {
                kind: "HabitId".to_string(),
            })
    }
}

impl FromStr for HabitLogId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(HabitLogId::new)
            .map_err(|_| ParseIdError {
                kind: "HabitLogId".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_id_display() {
        let id = HabitId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_habit_id_from_str() {
        let id: HabitId = "123".parse().unwrap();
        assert_eq!(id, HabitId::new(123));
    }

    #[test]
    fn test_habit_id_from_str_invalid() {
        let result = "not-a-number".parse::<HabitId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_habit_log_id_display() {
        let id = HabitLogId::new(99);
        assert_eq!(id.to_string(), "99");
    }

    #[test]
    fn test_id_roundtrip() {
        let original = HabitId::new(42);
        let serialized = original.to_string();
        let deserialized: HabitId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }
}
