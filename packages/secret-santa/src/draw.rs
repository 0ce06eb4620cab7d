//! The randomized draw: uniform shuffles filtered down to a rule-respecting
//! single cycle.
//!
//! The draw is generate-and-test. Each attempt shuffles the receiver slots
//! with an unbiased Fisher-Yates shuffle, then rejects the permutation
//! unless every pairing is allowed by the compatibility matrix and the
//! whole permutation forms one cycle over the group. Rejection sampling
//! keeps accepted outcomes uniform over the valid cycles, which is what
//! makes the result fair and unguessable.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DrawError;
use crate::participant::{Participant, ParticipantId};
use crate::rules::{CompatibilityMatrix, ExclusionRule};

/// Attempt budget for one draw invocation.
///
/// Feasible rule sets succeed within a handful of attempts in practice;
/// spending the whole budget is the signal that the rules leave no single
/// cycle to find.
pub const MAX_ATTEMPTS: u32 = 1000;

/// Smallest group a draw accepts.
///
/// With two people each would always draw the other, so the pairing would
/// be public knowledge.
pub const MIN_PARTICIPANTS: usize = 3;

/// One giver-to-receiver pairing in a completed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// The participant who gives the gift.
    pub giver_id: ParticipantId,
    /// The participant they drew.
    pub receiver_id: ParticipantId,
}

/// Draws a secret santa assignment for every participant.
///
/// The result contains exactly one assignment per participant, in the order
/// the participants were supplied. Nobody draws themself, every exclusion
/// rule is respected, and following giver to receiver from any starting
/// participant walks through the entire group before returning to the
/// start.
///
/// Uses the thread-local RNG; [`draw_with_rng`] accepts an explicit one.
///
/// # Errors
///
/// - [`DrawError::TooFewParticipants`] for groups smaller than
///   [`MIN_PARTICIPANTS`], before any randomness is consumed.
/// - [`DrawError::Infeasible`] when some participant has no allowed
///   receiver at all, before any randomness is consumed.
/// - [`DrawError::ExhaustedAttempts`] when [`MAX_ATTEMPTS`] shuffles
///   produced no rule-respecting single cycle.
///
/// # Example
///
/// ```
/// use secret_santa::{draw, ExclusionRule, Participant};
///
/// let family = vec![
///     Participant::new(1, "Alice"),
///     Participant::new(2, "Bruno"),
///     Participant::new(3, "Carla"),
///     Participant::new(4, "Dora"),
/// ];
/// // Alice and Bruno already exchange gifts privately.
/// let rules = vec![ExclusionRule::cannot_draw(1, 2)];
///
/// let assignments = draw(&family, &rules).unwrap();
/// assert_eq!(assignments.len(), family.len());
/// ```
pub fn draw(
    participants: &[Participant],
    rules: &[ExclusionRule],
) -> Result<Vec<Assignment>, DrawError> {
    draw_with_rng(participants, rules, &mut rand::thread_rng())
}

/// [`draw`] with a caller-supplied randomness source.
///
/// A seeded RNG makes the whole draw reproducible, which the test suites
/// rely on; production callers normally go through [`draw`].
pub fn draw_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    rules: &[ExclusionRule],
    rng: &mut R,
) -> Result<Vec<Assignment>, DrawError> {
    let n = participants.len();
    if n < MIN_PARTICIPANTS {
        return Err(DrawError::TooFewParticipants { actual: n });
    }

    let matrix = CompatibilityMatrix::build(participants, rules);
    matrix.check_feasible(participants)?;

    // receiver_of[giver position] = receiver position. Reshuffling the
    // previous attempt in place is still uniform over permutations, so the
    // buffer is allocated once.
    let mut receiver_of: Vec<usize> = (0..n).collect();

    for attempt in 1..=MAX_ATTEMPTS {
        receiver_of.shuffle(rng);

        if !respects_matrix(&receiver_of, &matrix) {
            continue;
        }
        if !is_single_cycle(&receiver_of) {
            continue;
        }

        debug!(attempt, participants = n, "draw accepted");
        return Ok(receiver_of
            .iter()
            .enumerate()
            .map(|(giver, &receiver)| Assignment {
                giver_id: participants[giver].id,
                receiver_id: participants[receiver].id,
            })
            .collect());
    }

    Err(DrawError::ExhaustedAttempts {
        attempts: MAX_ATTEMPTS,
    })
}

/// Whether every giver-to-receiver edge of the permutation is allowed.
///
/// The diagonal of the matrix is always blocked, so this also rejects any
/// permutation with a fixed point.
fn respects_matrix(receiver_of: &[usize], matrix: &CompatibilityMatrix) -> bool {
    receiver_of
        .iter()
        .enumerate()
        .all(|(giver, &receiver)| matrix.allows(giver, receiver))
}

/// Whether the permutation is one cycle covering every position.
///
/// Walks from position 0 for exactly `len` steps. Revisiting any position
/// early means the permutation splits into smaller cycles; a full-length
/// walk that returns to 0 visits everyone exactly once.
pub(crate) fn is_single_cycle(receiver_of: &[usize]) -> bool {
    let n = receiver_of.len();
    let mut visited = vec![false; n];
    let mut current = 0;

    for _ in 0..n {
        if visited[current] {
            return false;
        }
        visited[current] = true;
        current = receiver_of[current];
    }

    current == 0
}
