use tracing::debug;

use crate::error::RoundError;
use crate::participant::Participant;
use crate::shoe::Shoe;

use super::{RoundState, Table, TurnPosition};

impl Table {
    /// Resets the table after a settled round and opens the next one.
    ///
    /// Every hand is cleared, wagers and insurance return to zero, and any
    /// player left below the minimum wager is marked bankrupt for good. A
    /// fresh shoe is shuffled for the next round.
    ///
    /// Returns `false` once the round target is passed or no solvent player
    /// remains; the session is then over.
    ///
    /// # Errors
    ///
    /// Returns an error if the current round has not been fully settled or
    /// the session is already over.
    pub fn next_round(&mut self) -> Result<bool, RoundError> {
        match self.state {
            RoundState::RoundOver => {}
            RoundState::SessionOver => return Err(RoundError::SessionOver),
            _ => return Err(RoundError::RoundInProgress),
        }

        let min_wager = self.options.min_wager;
        for player in &mut self.players {
            player.finish_round(min_wager);
        }
        self.dealer.reset_hands();
        self.insurance_taken.fill(None);
        self.settled.fill(false);
        self.results.clear();
        self.current_turn = TurnPosition::START;
        self.current_round += 1;
        self.shoe = Shoe::standard(self.options.decks, &mut self.rng);

        if self.current_round > self.total_rounds || self.all_bankrupt() {
            self.state = RoundState::SessionOver;
            debug!(rounds = self.current_round - 1, "session over");
            return Ok(false);
        }

        self.state = RoundState::Betting;
        debug!(round = self.current_round, "round started");
        Ok(true)
    }

    /// Ends the session early.
    pub fn end_session(&mut self) {
        self.state = RoundState::SessionOver;
        debug!(round = self.current_round, "session ended");
    }
}
