//! Participant identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a participant, unique within one draw.
///
/// Wraps the integer key the surrounding application already assigned
/// (typically a database primary key); the engine never mints ids itself.
/// Serializes as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub i64);

impl ParticipantId {
    /// Wraps a raw integer key.
    #[inline]
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the underlying integer key.
    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for ParticipantId {
    #[inline]
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<ParticipantId> for i64 {
    #[inline]
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One person in the draw.
///
/// Callers pass the eligible set already filtered by their own membership
/// rules (for example, only people who paid the event contribution). The
/// engine treats the list as final and applies no filtering of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Caller-assigned identifier, expected to be unique within the list.
    pub id: ParticipantId,
    /// Display name, used verbatim in error messages shown to organizers.
    pub name: String,
}

impl Participant {
    /// Builds a participant from any id-like and name-like values.
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_round_trips_raw_value() {
        let id = ParticipantId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(ParticipantId::from(42), id);
    }

    #[test]
    fn test_participant_id_serializes_as_bare_integer() {
        let id = ParticipantId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let back: ParticipantId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_participant_id_display() {
        assert_eq!(ParticipantId::new(123).to_string(), "123");
    }

    #[test]
    fn test_participant_constructor_accepts_raw_id() {
        let p = Participant::new(1, "Alice");
        assert_eq!(p.id, ParticipantId::new(1));
        assert_eq!(p.name, "Alice");
    }
}
