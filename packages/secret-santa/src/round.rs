//! Round planning: one draw plus the metadata a round carries.
//!
//! A round bundles what the organizer configured (exclusion rules, gift
//! budget, reveal date) with the sealed result of the draw. The engine
//! hands back a fully planned round as plain data; persisting it, and
//! making sure only one round is active at a time, stays with the caller.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::draw::{draw_with_rng, Assignment};
use crate::error::DrawError;
use crate::participant::Participant;
use crate::rules::ExclusionRule;
use crate::token::RevealToken;

/// Advisory gift budget for a round.
///
/// Bounds are shown to participants ("spend between 50 and 100"); the
/// engine never checks anything against them, and `min > max` is the
/// organizer's mistake to notice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftRange {
    /// Suggested minimum gift value.
    pub min: Option<Decimal>,
    /// Suggested maximum gift value.
    pub max: Option<Decimal>,
}

/// Everything the organizer configures for one secret santa round.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundSpec {
    /// Pairing restrictions applied to the draw.
    #[serde(default)]
    pub rules: Vec<ExclusionRule>,
    /// Advisory gift budget.
    #[serde(default)]
    pub gift_range: GiftRange,
    /// The day assignments are meant to be revealed, usually the party date.
    #[serde(default)]
    pub reveal_date: Option<NaiveDate>,
}

/// One assignment sealed behind its reveal token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SealedAssignment {
    /// The giver-to-receiver pairing being kept secret.
    pub assignment: Assignment,
    /// Token the giver uses to look the pairing up.
    pub token: RevealToken,
    /// When the giver first looked it up, if they have.
    pub revealed_at: Option<DateTime<Utc>>,
}

impl SealedAssignment {
    /// Records that the giver looked up their receiver. Last write wins.
    pub fn mark_revealed(&mut self, at: DateTime<Utc>) {
        self.revealed_at = Some(at);
    }

    /// Whether the giver has looked up their receiver.
    #[inline]
    pub fn is_revealed(&self) -> bool {
        self.revealed_at.is_some()
    }
}

/// A complete, ready-to-persist round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRound {
    /// The configuration the round was drawn under.
    pub spec: RoundSpec,
    /// One sealed assignment per participant, in participant order.
    pub assignments: Vec<SealedAssignment>,
}

impl PlannedRound {
    /// Looks up a sealed assignment by its token.
    ///
    /// Expects the canonical token form; run user input through
    /// [`RevealToken::parse`] first.
    pub fn find_by_token(&self, token: &RevealToken) -> Option<&SealedAssignment> {
        self.assignments.iter().find(|sealed| &sealed.token == token)
    }

    /// Mutable variant of [`find_by_token`](Self::find_by_token), for
    /// marking a reveal.
    pub fn find_by_token_mut(&mut self, token: &RevealToken) -> Option<&mut SealedAssignment> {
        self.assignments
            .iter_mut()
            .find(|sealed| &sealed.token == token)
    }
}

/// Plans a full round: draws under `spec.rules`, then seals every
/// assignment behind a fresh reveal token, unique within the round.
///
/// Fails with the same errors as [`draw`](crate::draw); `spec`'s gift range
/// and reveal date are carried through untouched.
pub fn plan_round(
    participants: &[Participant],
    spec: &RoundSpec,
) -> Result<PlannedRound, DrawError> {
    plan_round_with_rng(participants, spec, &mut rand::thread_rng())
}

/// [`plan_round`] with a caller-supplied randomness source.
///
/// The RNG must keep producing fresh values; duplicate tokens are resolved
/// by regenerating until the round has no collision.
pub fn plan_round_with_rng<R: Rng + ?Sized>(
    participants: &[Participant],
    spec: &RoundSpec,
    rng: &mut R,
) -> Result<PlannedRound, DrawError> {
    let drawn = draw_with_rng(participants, &spec.rules, rng)?;

    let mut issued = HashSet::with_capacity(drawn.len());
    let assignments = drawn
        .into_iter()
        .map(|assignment| {
            let mut token = RevealToken::generate_with_rng(rng);
            while !issued.insert(token.clone()) {
                token = RevealToken::generate_with_rng(rng);
            }
            SealedAssignment {
                assignment,
                token,
                revealed_at: None,
            }
        })
        .collect::<Vec<_>>();

    info!(
        participants = participants.len(),
        rules = spec.rules.len(),
        "secret santa round planned"
    );

    Ok(PlannedRound {
        spec: spec.clone(),
        assignments,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn family() -> Vec<Participant> {
        vec![
            Participant::new(1, "Alice"),
            Participant::new(2, "Bruno"),
            Participant::new(3, "Carla"),
            Participant::new(4, "Dora"),
            Participant::new(5, "Enzo"),
        ]
    }

    fn christmas_spec() -> RoundSpec {
        RoundSpec {
            rules: vec![ExclusionRule::cannot_draw(1, 2)],
            gift_range: GiftRange {
                min: Some(Decimal::new(5000, 2)),
                max: Some(Decimal::new(10000, 2)),
            },
            reveal_date: NaiveDate::from_ymd_opt(2024, 12, 25),
        }
    }

    #[test]
    fn test_planned_round_seals_every_participant() {
        let people = family();
        let spec = christmas_spec();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let round = plan_round_with_rng(&people, &spec, &mut rng).unwrap();

        assert_eq!(round.spec, spec);
        assert_eq!(round.assignments.len(), people.len());
        for (sealed, person) in round.assignments.iter().zip(&people) {
            assert_eq!(sealed.assignment.giver_id, person.id);
            assert!(!sealed.is_revealed());
        }
    }

    #[test]
    fn test_tokens_are_unique_within_a_round() {
        let round =
            plan_round_with_rng(&family(), &RoundSpec::default(), &mut ChaCha8Rng::seed_from_u64(8))
                .unwrap();

        let mut seen = HashSet::new();
        for sealed in &round.assignments {
            assert!(seen.insert(sealed.token.clone()), "duplicate token issued");
        }
    }

    #[test]
    fn test_draw_errors_pass_through_planning() {
        let two = vec![Participant::new(1, "Alice"), Participant::new(2, "Bruno")];
        let err = plan_round(&two, &RoundSpec::default()).unwrap_err();
        assert_eq!(err, DrawError::TooFewParticipants { actual: 2 });
    }

    #[test]
    fn test_reveal_flow_marks_one_assignment() {
        let mut round =
            plan_round_with_rng(&family(), &christmas_spec(), &mut ChaCha8Rng::seed_from_u64(4))
                .unwrap();
        let token = round.assignments[2].token.clone();
        let revealed_at = Utc.with_ymd_and_hms(2024, 12, 25, 18, 0, 0).unwrap();

        // Organizer-side lookup does not mutate anything.
        assert!(round.find_by_token(&token).is_some());
        assert!(!round.find_by_token(&token).unwrap().is_revealed());

        round
            .find_by_token_mut(&token)
            .expect("token was issued by this round")
            .mark_revealed(revealed_at);

        assert_eq!(round.assignments[2].revealed_at, Some(revealed_at));
        // Everyone else stays sealed.
        let untouched = round
            .assignments
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .all(|(_, sealed)| !sealed.is_revealed());
        assert!(untouched);
    }

    #[test]
    fn test_unknown_token_finds_nothing() {
        let mut round =
            plan_round_with_rng(&family(), &RoundSpec::default(), &mut ChaCha8Rng::seed_from_u64(6))
                .unwrap();
        let stranger = RevealToken::parse("ZZZZZZZZ").unwrap();
        assert!(round.find_by_token(&stranger).is_none());
        assert!(round.find_by_token_mut(&stranger).is_none());
    }

    #[test]
    fn test_same_seed_reproduces_the_whole_round() {
        let people = family();
        let spec = christmas_spec();

        let a = plan_round_with_rng(&people, &spec, &mut ChaCha8Rng::seed_from_u64(13)).unwrap();
        let b = plan_round_with_rng(&people, &spec, &mut ChaCha8Rng::seed_from_u64(13)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_round_survives_a_serde_round_trip() {
        let round =
            plan_round_with_rng(&family(), &christmas_spec(), &mut ChaCha8Rng::seed_from_u64(17))
                .unwrap();

        let json = serde_json::to_string(&round).unwrap();
        let back: PlannedRound = serde_json::from_str(&json).unwrap();
        assert_eq!(back, round);
    }

    #[test]
    fn test_round_spec_defaults_are_fully_open() {
        let spec = RoundSpec::default();
        assert!(spec.rules.is_empty());
        assert_eq!(spec.gift_range, GiftRange::default());
        assert!(spec.reveal_date.is_none());

        // Missing fields deserialize to the same defaults.
        let parsed: RoundSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, spec);
    }
}
