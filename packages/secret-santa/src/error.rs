//! Structured error types for the draw engine.
//!
//! Every failure here is terminal for the call that produced it: no partial
//! assignment is ever returned, and no rule is silently dropped to force a
//! result. Messages are written for end users (the organizer relaxes a rule
//! or adds a participant and tries again), so callers can surface them
//! directly.

use thiserror::Error;

/// A participant who cannot be matched under the current rules.
///
/// Returned by [`validate_feasibility`](crate::validate_feasibility) and
/// wrapped by [`DrawError::Infeasible`] when at least one participant has
/// zero allowed receivers. Carries the participant's display name so the
/// organizer knows exactly whose rules to relax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} has nobody left to draw under these rules")]
pub struct FeasibilityError {
    /// Display name of the first participant found with no allowed receiver.
    pub name: String,
}

/// Failure modes of [`draw`](crate::draw) and [`plan_round`](crate::plan_round).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Fewer than three participants were supplied.
    ///
    /// Two people would always draw each other, which makes the pairing
    /// public knowledge. Rejected before any randomness is consumed.
    #[error("a draw needs at least 3 participants, got {actual}")]
    TooFewParticipants {
        /// How many participants were actually supplied.
        actual: usize,
    },

    /// At least one participant has zero allowed receivers.
    ///
    /// Detected by the deterministic pre-check, never by exhausting random
    /// attempts.
    #[error(transparent)]
    Infeasible(#[from] FeasibilityError),

    /// No valid single-cycle assignment was found within the attempt budget.
    ///
    /// Every participant individually had someone to draw, but no shuffle
    /// within the budget produced a rule-respecting single cycle. Rule sets
    /// whose only remaining permutations split into sub-cycles always end
    /// here; this error is not proof that no valid cycle exists.
    #[error("no valid draw found after {attempts} attempts; try relaxing the exclusion rules")]
    ExhaustedAttempts {
        /// The attempt budget that was spent.
        attempts: u32,
    },
}

/// Rejected reveal-token text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Input is not exactly [`TOKEN_LEN`](crate::TOKEN_LEN) characters long.
    #[error("a reveal token is exactly {expected} characters, got {actual}")]
    WrongLength {
        /// Expected token length.
        expected: usize,
        /// Character count of the rejected input.
        actual: usize,
    },

    /// Input contains a character outside the token alphabet.
    #[error("reveal tokens contain only digits and letters, found {found:?}")]
    InvalidCharacter {
        /// First offending character, after uppercasing.
        found: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feasibility_error_names_the_participant() {
        let err = FeasibilityError {
            name: "Dora".to_string(),
        };
        assert!(err.to_string().contains("Dora"));
        assert!(err.to_string().contains("nobody left to draw"));
    }

    #[test]
    fn test_too_few_participants_display() {
        let err = DrawError::TooFewParticipants { actual: 2 };
        assert!(err.to_string().contains("at least 3"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_infeasible_is_transparent() {
        let inner = FeasibilityError {
            name: "Ana".to_string(),
        };
        let err = DrawError::from(inner.clone());

        // Transparent wrapping keeps the inner message as the whole message.
        assert_eq!(err.to_string(), inner.to_string());
        match err {
            DrawError::Infeasible(f) => assert_eq!(f.name, "Ana"),
            other => panic!("expected Infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_exhausted_attempts_display() {
        let err = DrawError::ExhaustedAttempts { attempts: 1000 };
        assert!(err.to_string().contains("1000"));
        assert!(err.to_string().contains("relaxing"));
    }

    #[test]
    fn test_token_error_display() {
        let err = TokenError::WrongLength {
            expected: 8,
            actual: 5,
        };
        assert!(err.to_string().contains('8'));
        assert!(err.to_string().contains('5'));

        let err = TokenError::InvalidCharacter { found: '!' };
        assert!(err.to_string().contains('!'));
    }
}
