use alloc::vec::Vec;

use crate::error::{ActionError, BetError, PlayError};
use crate::hand::Hand;
use crate::participant::{Participant, PlayerKind};
use crate::result::RoundResult;

use super::{Action, RoundState, Table, TurnPosition};

/// Supplies decisions for caller-driven players.
///
/// A console front end prompts for each value; a GUI forwards what the user
/// clicked. CPU players never reach the provider.
pub trait ActionProvider {
    /// Returns the wager for the player at `player_index`.
    fn wager(&mut self, table: &Table, player_index: usize) -> usize;

    /// Returns the insurance to take; 0 declines.
    fn insurance(&mut self, table: &Table, player_index: usize) -> usize;

    /// Returns the action for the hand at `turn`, chosen from `legal`.
    fn action(&mut self, table: &Table, turn: TurnPosition, legal: &[Action]) -> Action;

    /// Called when the table rejected the last value; it will be asked again.
    fn rejected(&mut self, _table: &Table, _error: &PlayError) {}
}

/// The scripted CPU decision: hit below `stands_on`, stand otherwise.
#[must_use]
pub fn scripted_action(hand: &Hand, stands_on: u8) -> Action {
    if hand.score() < stands_on {
        Action::Hit
    } else {
        Action::Stand
    }
}

impl Table {
    /// Plays one full round, from betting to payout.
    ///
    /// Human decisions come from `provider`; a rejected value is reported
    /// through [`ActionProvider::rejected`] and asked for again. CPU players
    /// follow the script. The table is left in [`RoundState::RoundOver`];
    /// call [`Table::next_round`] to continue the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, or a step fails for
    /// a reason the provider cannot fix (such as an empty shoe).
    pub fn play_round<P: ActionProvider>(
        &mut self,
        provider: &mut P,
    ) -> Result<RoundResult, PlayError> {
        if self.state != RoundState::Betting {
            return Err(BetError::InvalidState.into());
        }

        for index in self.human_seats() {
            loop {
                let amount = provider.wager(self, index);
                match self.place_wager(index, amount) {
                    Ok(()) => break,
                    Err(err) => provider.rejected(self, &err.into()),
                }
            }
        }
        self.place_cpu_wagers()?;
        self.deal()?;

        if self.state == RoundState::Insurance {
            for index in self.human_seats() {
                if !self.is_insurance_eligible(index) {
                    continue;
                }
                loop {
                    let amount = provider.insurance(self, index);
                    let decided = if amount == 0 {
                        self.decline_insurance(index)
                    } else {
                        self.take_insurance(index, amount)
                    };
                    match decided {
                        Ok(()) => break,
                        Err(err) => provider.rejected(self, &err.into()),
                    }
                }
            }
            self.place_cpu_insurance()?;
            if self.resolve_insurance()? {
                return Ok(self.showdown()?);
            }
        }

        while self.state == RoundState::PlayerTurns {
            let turn = self.current_turn;
            let player = &self.players[turn.player_index];
            match player.kind() {
                PlayerKind::Cpu => {
                    let hand = &player.hands()[turn.hand_index];
                    let action = scripted_action(hand, self.options.dealer_stands_on);
                    self.act(turn.player_index, turn.hand_index, action)?;
                }
                PlayerKind::Human => {
                    let legal = self.legal_actions(turn.player_index, turn.hand_index);
                    let action = provider.action(self, turn, &legal);
                    match self.act(turn.player_index, turn.hand_index, action) {
                        Ok(()) => {}
                        Err(err @ ActionError::EmptyShoe(_)) => return Err(err.into()),
                        Err(err) => provider.rejected(self, &err.into()),
                    }
                }
            }
        }

        self.dealer_play()?;
        Ok(self.showdown()?)
    }

    fn human_seats(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| self.in_round(i) && self.players[i].kind() == PlayerKind::Human)
            .collect()
    }
}
