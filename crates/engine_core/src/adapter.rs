// =============================================================================
// Search adapter: implemented by every engine a harness can drive
// =============================================================================

use std::time::Duration;

use serde_json::Value;
use shakmaty::{Chess, Move};

use crate::error::EngineError;
use crate::relay::NotificationRelay;
use crate::time_budget::{TimeBudget, TimeControl};

/// What an adapter decided to do in the position it was given.
///
/// On success exactly one of `best_move` or `resigned` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveDecision {
    /// The move to play (None when resigning)
    pub best_move: Option<Move>,
    /// Expected reply, if the adapter wants to ponder on it
    pub ponder_move: Option<Move>,
    /// The adapter concedes the game
    pub resigned: bool,
    /// The adapter offers (or accepts) a draw along with its move
    pub draw_offered: bool,
}

impl MoveDecision {
    pub fn play(mv: Move) -> Self {
        Self {
            best_move: Some(mv),
            ..Default::default()
        }
    }

    pub fn play_with_ponder(mv: Move, ponder: Move) -> Self {
        Self {
            best_move: Some(mv),
            ponder_move: Some(ponder),
            ..Default::default()
        }
    }

    pub fn resign() -> Self {
        Self {
            resigned: true,
            ..Default::default()
        }
    }

    /// Attach a draw offer to this decision.
    pub fn offer_draw(mut self) -> Self {
        self.draw_offered = true;
        self
    }
}

/// Trait that all engines a harness can play with must implement.
///
/// Only `search` and `name` are required. The remaining hooks default to
/// forwarding into `notify`, which itself does nothing, so a homemade
/// engine can ignore every harness event it does not care about.
pub trait SearchAdapter {
    /// Name reported to the harness and used in results.
    fn name(&self) -> &str;

    /// Pick a move in `position` within `budget`.
    ///
    /// `position` is borrowed for this call only and must have at least one
    /// legal move. `ponder` says whether thinking on the opponent's time is
    /// allowed; `draw_offered` says the opponent has a draw offer pending.
    fn search(
        &mut self,
        position: &Chess,
        budget: &TimeBudget,
        ponder: bool,
        draw_offered: bool,
    ) -> Result<MoveDecision, EngineError>;

    /// Side-channel event from the harness (`ping`, `quit`, game results, ...).
    ///
    /// Best-effort: callers going through [`NotificationRelay`] discard any
    /// error returned here.
    fn notify(&mut self, _method: &str, _args: &[Value]) -> anyhow::Result<()> {
        Ok(())
    }

    /// The first move of a game, searched with a flat move time.
    fn first_search(
        &mut self,
        position: &Chess,
        movetime: Duration,
        draw_offered: bool,
    ) -> Result<MoveDecision, EngineError> {
        let movetime_ms = u64::try_from(movetime.as_millis()).unwrap_or(u64::MAX);
        NotificationRelay::new(self).call("first_search", &[Value::from(movetime_ms)]);
        self.search(position, &TimeBudget::fixed(movetime), false, draw_offered)
    }

    /// Announcement of the game's time control before the first move.
    fn time_control(&mut self, announcement: &TimeControl) {
        let args: Vec<Value> = serde_json::to_value(announcement).into_iter().collect();
        NotificationRelay::new(self).call("time_control", &args);
    }

    /// A stand-in "engine" object that turns any harness call into `notify`.
    fn relay(&mut self) -> NotificationRelay<'_, Self>
    where
        Self: Sized,
    {
        NotificationRelay::new(self)
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod adapter_tests;
