use tracing::debug;

use crate::error::{BetError, DealError, WagerError};
use crate::participant::{Participant, Player, PlayerKind};

use super::{RoundState, Table, TurnPosition};

/// Cards each seat receives on the deal.
const INITIAL_CARDS: usize = 2;

impl Table {
    /// Places (or replaces) a player's wager for the coming round.
    ///
    /// Only the difference to an earlier wager this round moves money.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the player cannot be
    /// found or is bankrupt, the amount falls outside the table limits, or
    /// the player lacks funds.
    pub fn place_wager(&mut self, index: usize, amount: usize) -> Result<(), BetError> {
        if self.state != RoundState::Betting {
            return Err(BetError::InvalidState);
        }

        let (min, max) = (self.options.min_wager, self.options.max_wager);
        let player = self
            .players
            .get_mut(index)
            .ok_or(BetError::PlayerNotFound(index))?;

        if player.is_bankrupt() {
            return Err(BetError::Bankrupt(index));
        }
        if amount < min || amount > max {
            return Err(WagerError::InvalidWager { amount, min, max }.into());
        }

        player.set_wager(amount)?;
        player.hands_mut()[0].set_bet(amount);

        debug!(player = index, amount, money = player.money(), "wager placed");
        Ok(())
    }

    /// Returns the wager the script would place for `player`.
    ///
    /// The scripted wager is lowered to the table maximum and to what the
    /// player can afford. Returns `None` if that falls below the minimum.
    #[must_use]
    pub fn scripted_wager(&self, player: &Player) -> Option<usize> {
        let amount = self
            .options
            .cpu_wager
            .min(self.options.max_wager)
            .min(player.money());
        (amount >= self.options.min_wager).then_some(amount)
    }

    /// Places the scripted wager for every solvent CPU player.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, or a CPU player can
    /// no longer cover the minimum wager.
    pub fn place_cpu_wagers(&mut self) -> Result<(), BetError> {
        if self.state != RoundState::Betting {
            return Err(BetError::InvalidState);
        }

        for index in 0..self.players.len() {
            let player = &self.players[index];
            if player.kind() != PlayerKind::Cpu || player.is_bankrupt() {
                continue;
            }
            let amount = self
                .scripted_wager(player)
                .ok_or(BetError::Wager(WagerError::InsufficientFunds))?;
            self.place_wager(index, amount)?;
        }

        Ok(())
    }

    /// Deals two cards to every solvent player and the dealer.
    ///
    /// Cards go round-robin: one to each seat, then a second to each seat.
    /// The dealer's second card is dealt face down. If the dealer shows an
    /// Ace the round moves to insurance; otherwise straight to the player
    /// turns.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, a solvent player has
    /// not wagered, or there are not enough cards in the shoe.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != RoundState::Betting {
            return Err(DealError::InvalidState);
        }

        let seats: alloc::vec::Vec<usize> = (0..self.players.len())
            .filter(|&i| self.in_round(i))
            .collect();

        if let Some(&missing) = seats.iter().find(|&&i| self.players[i].wager() == 0) {
            return Err(DealError::MissingWager(missing));
        }

        let cards_needed = (seats.len() + 1) * INITIAL_CARDS;
        if self.cards_remaining() < cards_needed {
            return Err(DealError::NotEnoughCards);
        }

        self.dealer.reset_hands();
        for pass in 0..INITIAL_CARDS {
            for &index in &seats {
                let card = self.draw().map_err(|_| DealError::NotEnoughCards)?;
                self.players[index].hands_mut()[0].add_card(card);
            }

            let card = self.draw().map_err(|_| DealError::NotEnoughCards)?;
            if pass == 0 {
                self.dealer.add_card(card);
            } else {
                self.dealer.add_hole_card(card);
            }
        }

        self.insurance_taken.fill(None);
        self.settled.fill(false);
        self.results.clear();

        let dealer_shows_ace = self.dealer.up_card().is_some_and(|c| c.is_ace());
        debug!(
            round = self.current_round,
            players = seats.len(),
            up_card = self.dealer.hand().score(),
            "cards dealt"
        );

        if dealer_shows_ace {
            self.state = RoundState::Insurance;
        } else {
            self.state = RoundState::PlayerTurns;
            self.seek_turn(TurnPosition::START);
        }

        Ok(())
    }
}
