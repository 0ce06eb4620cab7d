//! # Secret Santa
//!
//! A draw engine for secret santa rounds: random single-cycle assignments
//! under pairwise exclusion rules, with reveal tokens for handing each
//! giver their result privately.
//!
//! ## Core Concepts
//!
//! The engine separates **configuration** from **outcome**:
//! - [`Participant`] + [`ExclusionRule`] = who takes part and who must not
//!   draw whom
//! - [`Assignment`] = one giver-to-receiver pairing of a completed draw
//! - [`PlannedRound`] = a whole drawn round, each assignment sealed behind
//!   a [`RevealToken`]
//!
//! A valid draw always forms **one single cycle** across the whole group:
//! following giver to receiver from anyone walks through every participant
//! before returning to the start. Two disjoint sub-cycles would let a
//! subgroup deduce its own pairings, so they are rejected outright.
//!
//! ## Key Invariants
//!
//! 1. **Nobody draws themself** - the diagonal is always excluded
//! 2. **Rules are symmetric** - one rule blocks both directions of a pair
//! 3. **Single cycle** - every draw is one cycle over all participants
//! 4. **Uniform among valid outcomes** - unbiased shuffles plus rejection
//!    sampling, never a biased repair step
//! 5. **Errors over fallbacks** - an impossible draw is reported, rules are
//!    never silently dropped
//!
//! ## Example
//!
//! ```
//! use secret_santa::{plan_round, ExclusionRule, Participant, RoundSpec};
//!
//! let family = vec![
//!     Participant::new(1, "Alice"),
//!     Participant::new(2, "Bruno"),
//!     Participant::new(3, "Carla"),
//!     Participant::new(4, "Dora"),
//! ];
//! let spec = RoundSpec {
//!     rules: vec![ExclusionRule::cannot_draw(1, 2)],
//!     ..RoundSpec::default()
//! };
//!
//! let round = plan_round(&family, &spec).unwrap();
//! assert_eq!(round.assignments.len(), family.len());
//!
//! // Each giver looks their receiver up with their own token.
//! let token = round.assignments[0].token.clone();
//! let sealed = round.find_by_token(&token).unwrap();
//! assert_eq!(sealed.assignment.giver_id, family[0].id);
//! ```
//!
//! ## What This Is Not
//!
//! The engine is **not**:
//! - A web API or a UI
//! - A persistence layer (rounds come back as plain data to store)
//! - A notification system
//!
//! It **is** the part everyone argues about at the dinner table: who drew
//! whom, fairly, with the couples' rules respected.

// Core modules
mod draw;
mod error;
mod participant;
mod round;
mod rules;
mod token;


// Re-export draw entry points
pub use crate::draw::{draw, draw_with_rng, Assignment, MAX_ATTEMPTS, MIN_PARTICIPANTS};

// Re-export error types
pub use crate::error::{DrawError, FeasibilityError, TokenError};

// Re-export participant types
pub use crate::participant::{Participant, ParticipantId};

// Re-export round planning
pub use crate::round::{
    plan_round, plan_round_with_rng, GiftRange, PlannedRound, RoundSpec, SealedAssignment,
};

// Re-export rules and the feasibility pre-check
pub use crate::rules::{validate_feasibility, CompatibilityMatrix, ExclusionRule};

// Re-export reveal tokens
pub use crate::token::{RevealToken, TOKEN_LEN};
