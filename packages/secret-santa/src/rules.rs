//! Exclusion rules and the pairing compatibility matrix.
//!
//! Rules express who must not draw whom. They compile into a dense n×n
//! boolean matrix that the draw consults on its hot path, and the same
//! matrix backs the standalone feasibility pre-check organizers run while
//! editing rules.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FeasibilityError;
use crate::participant::{Participant, ParticipantId};

/// A pairing restriction between two participants.
///
/// Rules are symmetric: one rule between A and B forbids A drawing B and B
/// drawing A. A rule naming an id absent from the participant list is
/// skipped, and duplicate or order-swapped rules are idempotent.
///
/// Serializes with an explicit `kind` tag so stored rule lists stay
/// readable and extensible:
///
/// ```json
/// {"kind": "cannot_draw", "participant_a": 1, "participant_b": 2}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionRule {
    /// The two participants must not draw each other, in either direction.
    ///
    /// The typical use is couples who already exchange gifts privately.
    CannotDraw {
        participant_a: ParticipantId,
        participant_b: ParticipantId,
    },
}

impl ExclusionRule {
    /// Convenience constructor for [`ExclusionRule::CannotDraw`].
    pub fn cannot_draw(a: impl Into<ParticipantId>, b: impl Into<ParticipantId>) -> Self {
        Self::CannotDraw {
            participant_a: a.into(),
            participant_b: b.into(),
        }
    }

    /// The pair of ids the rule restricts.
    pub fn endpoints(&self) -> (ParticipantId, ParticipantId) {
        match *self {
            Self::CannotDraw {
                participant_a,
                participant_b,
            } => (participant_a, participant_b),
        }
    }
}

/// Dense n×n grid of allowed giver-to-receiver pairings.
///
/// Row `i` answers "who may participant `i` draw": `true` everywhere except
/// the diagonal (nobody draws themself) and the cells cleared by exclusion
/// rules. Positions follow the order of the participant slice the matrix
/// was built from. Stored row-major in a single allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityMatrix {
    n: usize,
    allowed: Vec<bool>,
}

impl CompatibilityMatrix {
    /// Builds the matrix for the given participants and rules.
    ///
    /// Rule ids resolve to positions through the participant list. Rules
    /// whose ids are not both present are skipped with a debug log rather
    /// than rejected.
    pub fn build(participants: &[Participant], rules: &[ExclusionRule]) -> Self {
        let n = participants.len();
        let mut allowed = vec![true; n * n];

        // Nobody draws themself.
        for i in 0..n {
            allowed[i * n + i] = false;
        }

        for rule in rules {
            let (a, b) = rule.endpoints();
            let pos_a = participants.iter().position(|p| p.id == a);
            let pos_b = participants.iter().position(|p| p.id == b);
            match (pos_a, pos_b) {
                (Some(ia), Some(ib)) => {
                    allowed[ia * n + ib] = false;
                    allowed[ib * n + ia] = false;
                }
                _ => {
                    debug!(?rule, "exclusion rule names an unknown participant, skipping");
                }
            }
        }

        Self { n, allowed }
    }

    /// Number of participants the matrix covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    /// True when built over an empty participant list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Whether the participant at position `giver` may draw the one at
    /// position `receiver`.
    #[inline]
    pub fn allows(&self, giver: usize, receiver: usize) -> bool {
        self.allowed[giver * self.n + receiver]
    }

    /// How many receivers remain allowed for the participant at `giver`.
    pub fn receiver_count(&self, giver: usize) -> usize {
        self.allowed[giver * self.n..(giver + 1) * self.n]
            .iter()
            .filter(|&&open| open)
            .count()
    }

    /// Position of the first participant with no allowed receiver, if any.
    fn first_blocked(&self) -> Option<usize> {
        (0..self.n).find(|&giver| self.receiver_count(giver) == 0)
    }

    /// Errors with the blocked participant's name if any row is all-false.
    pub(crate) fn check_feasible(
        &self,
        participants: &[Participant],
    ) -> Result<(), FeasibilityError> {
        match self.first_blocked() {
            Some(giver) => Err(FeasibilityError {
                name: participants[giver].name.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Checks that every participant still has at least one allowed receiver.
///
/// Deterministic and cheap, so organizers can run it on every rule edit for
/// immediate feedback before anyone commits to a draw. The check is
/// necessary but not sufficient: rule sets whose only remaining
/// permutations split into disjoint sub-cycles pass here and surface later
/// as [`DrawError::ExhaustedAttempts`](crate::DrawError::ExhaustedAttempts).
///
/// Does not enforce the minimum group size; [`draw`](crate::draw) does.
pub fn validate_feasibility(
    participants: &[Participant],
    rules: &[ExclusionRule],
) -> Result<(), FeasibilityError> {
    CompatibilityMatrix::build(participants, rules).check_feasible(participants)
}
