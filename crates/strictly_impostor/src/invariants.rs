//! First-class invariants for a dealt round.
//!
//! Invariants are logical properties that must hold for the whole life of a
//! round. They are checked in debug builds after every transition that
//! touches the round and can be tested independently.

use tracing::{instrument, warn};

use crate::{MAX_PLAYERS, MIN_PLAYERS, Role, Round};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together. Implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the impostor set has the requested size, lies inside the
/// seat range, and agrees with every seat's role.
pub struct ImpostorSetInvariant;

impl Invariant<Round> for ImpostorSetInvariant {
    fn holds(round: &Round) -> bool {
        let indices = round.impostor_indices();
        indices.len() == round.impostor_count()
            && indices.iter().all(|i| *i < round.player_count())
            && round
                .players()
                .iter()
                .enumerate()
                .all(|(i, p)| (p.role() == Role::Impostor) == indices.contains(&i))
    }

    fn description() -> &'static str {
        "Impostor set matches the requested count and the seat roles"
    }
}

/// Invariant: at least one civilian sits at the table.
pub struct CivilianPresentInvariant;

impl Invariant<Round> for CivilianPresentInvariant {
    fn holds(round: &Round) -> bool {
        round.players().iter().any(|p| p.role() == Role::Civilian)
    }

    fn description() -> &'static str {
        "At least one civilian is present"
    }
}

/// Invariant: seat ordinals are exactly `1..=player_count` in order, and
/// the seat count is within bounds.
pub struct SeatOrdinalsInvariant;

impl Invariant<Round> for SeatOrdinalsInvariant {
    fn holds(round: &Round) -> bool {
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&round.player_count())
            && round
                .players()
                .iter()
                .enumerate()
                .all(|(i, p)| p.index() == i + 1)
    }

    fn description() -> &'static str {
        "Seat ordinals run 1..=player_count"
    }
}

/// All round invariants as a composable set.
pub type RoundInvariants = (
    ImpostorSetInvariant,
    CivilianPresentInvariant,
    SeatOrdinalsInvariant,
);

/// Postcondition of an acknowledgment: exactly one more seat is revealed,
/// and no seat went back to unrevealed.
#[instrument(skip(before, after))]
pub fn reveal_is_monotonic(before: &Round, after: &Round) -> bool {
    let grew_by_one = after.revealed_count() == before.revealed_count() + 1;
    let none_reset = before
        .players()
        .iter()
        .zip(after.players())
        .all(|(b, a)| !b.revealed() || a.revealed());

    let valid = grew_by_one && none_reset;
    if !valid {
        warn!(
            before = before.revealed_count(),
            after = after.revealed_count(),
            "Reveal monotonicity violated"
        );
    }
    valid
}

/// Asserts the round invariants (panics on violation in debug builds).
#[instrument(skip(round))]
pub fn assert_invariants(round: &Round) {
    if let Err(violations) = RoundInvariants::check_all(round) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Round invariants violated");
        debug_assert!(false, "Round invariants violated: {}", descriptions);
    }
}
