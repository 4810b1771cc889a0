use arrayvec::ArrayVec;

use crate::{
    EventLocation, InconsistentState, MissingField, ReconstructError,
    core::{Base, BaseState, Destination, Movement, Player},
};

/// Upper bound of distinct movers in one sub-event: the batter plus three runners.
pub const MAX_MOVERS: usize = 4;

/// A runner's net transition within one sub-event after duplicates were collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerMove {
    pub origin: Option<Base>,
    pub start: Option<Base>,
    pub end: Destination,
}

/// Failure of a single base-runner step, before it is attributed to a sub-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum StepFault {
    Missing(MissingField),
    Inconsistent(InconsistentState),
}

impl StepFault {
    #[must_use]
    pub fn at(self, location: EventLocation) -> ReconstructError {
        match self {
            Self::Missing(field) => ReconstructError::MissingField { location, field },
            Self::Inconsistent(kind) => ReconstructError::InconsistentState { location, kind },
        }
    }
}

/// Outcome of [`advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub post: BaseState,
    /// Number of movers that crossed home plate.
    pub runs_scored: u32,
}

/// Collapses the movements of one sub-event into one net move per runner.
///
/// Entries are keyed by origin (the batter is its own key). The first entry for an origin
/// fixes the base the runner departs from; later entries overwrite the destination. Feeds
/// occasionally split one runner's advance into several entries on the same pitch.
pub fn collapse_movements(
    movements: &[Movement],
) -> Result<ArrayVec<RunnerMove, MAX_MOVERS>, MissingField> {
    let mut moves = ArrayVec::<RunnerMove, MAX_MOVERS>::new();
    for movement in movements {
        let end = movement.end.ok_or(MissingField::MovementEnd)?;
        if movement.origin.is_some() && movement.start.is_none() {
            return Err(MissingField::MovementStart);
        }
        if let Some(existing) = moves.iter_mut().find(|m| m.origin == movement.origin) {
            existing.end = end;
        } else {
            // at most one entry per origin key, so capacity is never exceeded
            moves.push(RunnerMove {
                origin: movement.origin,
                start: movement.start,
                end,
            });
        }
    }
    Ok(moves)
}

/// Folds one sub-event's runner movements into the post-event base state.
///
/// When `is_new_half` is set the carried `pre` state is discarded and the sub-event starts
/// from empty bases. Every departing base is vacated before any mover is placed, so a runner
/// may advance into a base vacated in the same sub-event. Bases no movement touches keep
/// their occupant.
pub fn advance(
    pre: &BaseState,
    movements: &[Movement],
    batter: &Player,
    is_new_half: bool,
) -> Result<Advance, StepFault> {
    let mut post = if is_new_half {
        BaseState::EMPTY
    } else {
        pre.clone()
    };

    let moves = collapse_movements(movements)?;

    let mut movers = ArrayVec::<(Player, Destination), MAX_MOVERS>::new();
    for m in &moves {
        let player = match m.start {
            None => batter.clone(),
            Some(base) => post
                .take(base)
                .ok_or(InconsistentState::EmptyDeparture { base })?,
        };
        movers.push((player, m.end));
    }

    let mut runs_scored = 0;
    for (player, end) in movers {
        match end {
            Destination::Base(base) => {
                let slot = post.slot_mut(base);
                if slot.is_some() {
                    return Err(InconsistentState::ConflictingOccupants { base }.into());
                }
                *slot = Some(player);
            }
            Destination::Score => runs_scored += 1,
            Destination::Out => {}
        }
    }

    check_unique_runners(&post)?;

    Ok(Advance { post, runs_scored })
}

fn check_unique_runners(state: &BaseState) -> Result<(), InconsistentState> {
    let runners = state.runners().collect::<ArrayVec<_, 3>>();
    for (i, (_, a)) in runners.iter().enumerate() {
        if runners[i + 1..].iter().any(|(_, b)| a.id == b.id) {
            return Err(InconsistentState::DuplicateRunner { player: a.id });
        }
    }
    Ok(())
}
