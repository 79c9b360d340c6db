//! The round engine and session state.

use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::card::Card;
use crate::error::{ConfigError, EmptyShoeError, IndexError};
use crate::hand::HandStatus;
use crate::options::TableOptions;
use crate::participant::{Dealer, Participant, Player, PlayerKind, Seat};
use crate::result::PlayerResult;
use crate::shoe::Shoe;

mod actions;
mod bet;
mod dealer;
mod insurance;
mod provider;
mod round;
pub mod state;

pub use provider::{ActionProvider, scripted_action};
pub use state::{Action, RoundState, TurnPosition};

/// A blackjack table that owns the shoe, the players, and the dealer.
///
/// One `Table` is one game session. Every command mutates it through
/// `&mut self` and returns before the next is accepted; every query hands
/// back a detached copy, so callers cannot reach engine state through it.
///
/// # Example
///
/// ```
/// use bjtable::{RoundState, Table, TableOptions};
///
/// let mut table = Table::new(TableOptions::default(), 42).unwrap();
/// table.create_players(1, 2).unwrap();
/// table.set_total_rounds(5).unwrap();
/// assert_eq!(table.state(), RoundState::Betting);
/// assert_eq!(table.player_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    options: TableOptions,
    shoe: Shoe,
    /// Seated players, in fixed order. The dealer sits after them.
    players: Vec<Player>,
    dealer: Dealer,
    state: RoundState,
    current_round: u32,
    total_rounds: u32,
    current_turn: TurnPosition,
    /// Per seat: `None` while undecided, `Some(0)` when declined.
    insurance_taken: Vec<Option<usize>>,
    settled: Vec<bool>,
    results: Vec<PlayerResult>,
    rng: ChaCha8Rng,
}

impl Table {
    /// Creates an empty table with the given options and RNG seed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the options are inconsistent.
    pub fn new(options: TableOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let shoe = Shoe::new(options.decks, &mut rng)?;

        Ok(Self {
            options,
            shoe,
            players: Vec::new(),
            dealer: Dealer::new(),
            state: RoundState::WaitingForPlayers,
            current_round: 1,
            total_rounds: 1,
            current_turn: TurnPosition::START,
            insurance_taken: Vec::new(),
            settled: Vec::new(),
            results: Vec::new(),
            rng,
        })
    }

    /// Seats `humans` caller-driven players followed by `cpus` scripted ones.
    ///
    /// Humans are named "Player 1", "Player 2", ...; scripted players
    /// "CPU 1", "CPU 2", .... Betting opens once they are seated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPlayerCount`] if the total falls outside
    /// the configured seat limits, or [`ConfigError::PlayersAlreadySeated`]
    /// if called twice.
    pub fn create_players(&mut self, humans: usize, cpus: usize) -> Result<(), ConfigError> {
        if self.state != RoundState::WaitingForPlayers {
            return Err(ConfigError::PlayersAlreadySeated);
        }

        let count = humans + cpus;
        let (min, max) = (self.options.min_players, self.options.max_players);
        if count < min || count > max {
            return Err(ConfigError::InvalidPlayerCount { count, min, max });
        }

        let money = self.options.starting_money;
        self.players = (1..=humans)
            .map(|n| Player::new(format!("Player {n}"), PlayerKind::Human, money))
            .chain((1..=cpus).map(|n| Player::new(format!("CPU {n}"), PlayerKind::Cpu, money)))
            .collect();
        self.insurance_taken = vec![None; count];
        self.settled = vec![false; count];
        self.state = RoundState::Betting;

        debug!(humans, cpus, "players seated");
        Ok(())
    }

    /// Sets how many rounds the session lasts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRoundTarget`] if `rounds` is zero.
    pub fn set_total_rounds(&mut self, rounds: u32) -> Result<(), ConfigError> {
        if rounds == 0 {
            return Err(ConfigError::InvalidRoundTarget);
        }
        self.total_rounds = rounds;
        Ok(())
    }

    /// Renames a player.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if no player sits at `index`.
    pub fn set_player_name(
        &mut self,
        index: usize,
        name: impl Into<String>,
    ) -> Result<(), IndexError> {
        let len = self.players.len();
        self.players
            .get_mut(index)
            .ok_or(IndexError { index, len })?
            .set_name(name);
        Ok(())
    }

    /// Replaces the shoe for the current round.
    ///
    /// The next round still starts from a fresh shuffled shoe.
    pub fn set_shoe(&mut self, shoe: Shoe) {
        self.shoe = shoe;
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the current round number, starting at 1.
    #[must_use]
    pub const fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Returns the number of rounds in the session.
    #[must_use]
    pub const fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Returns the number of decks the shoe is built from.
    #[must_use]
    pub const fn deck_count(&self) -> u8 {
        self.shoe.decks()
    }

    /// Returns the number of cards remaining in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.shoe.len()
    }

    /// Returns the number of seated players, dealer excluded.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns a copy of the player at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if no player sits at `index`.
    pub fn player(&self, index: usize) -> Result<Player, IndexError> {
        self.players.get(index).cloned().ok_or(IndexError {
            index,
            len: self.players.len(),
        })
    }

    /// Returns a copy of the dealer.
    #[must_use]
    pub fn dealer(&self) -> Dealer {
        self.dealer.clone()
    }

    /// Returns a copy of any seat. Index [`player_count`] is the dealer.
    ///
    /// [`player_count`]: Self::player_count
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index` is past the dealer.
    pub fn participant(&self, index: usize) -> Result<Seat, IndexError> {
        if index == self.players.len() {
            return Ok(Seat::Dealer(self.dealer.clone()));
        }
        self.players
            .get(index)
            .cloned()
            .map(Seat::Player)
            .ok_or(IndexError {
                index,
                len: self.players.len() + 1,
            })
    }

    /// Returns whether every seated player is bankrupt.
    #[must_use]
    pub fn all_bankrupt(&self) -> bool {
        self.players.iter().all(Player::is_bankrupt)
    }

    /// Returns whether the session has ended.
    #[must_use]
    pub fn is_session_over(&self) -> bool {
        self.state == RoundState::SessionOver
    }

    /// Returns the current turn position.
    #[must_use]
    pub const fn current_turn(&self) -> TurnPosition {
        self.current_turn
    }

    /// Returns the index of the player whose turn it is.
    ///
    /// Returns `None` outside the player turns.
    #[must_use]
    pub fn current_player(&self) -> Option<usize> {
        (self.state == RoundState::PlayerTurns).then_some(self.current_turn.player_index)
    }

    /// Returns the results settled so far this round, in settlement order.
    #[must_use]
    pub fn round_results(&self) -> Vec<PlayerResult> {
        self.results.clone()
    }

    /// Draws a card from the shoe.
    fn draw(&mut self) -> Result<Card, EmptyShoeError> {
        let card = self.shoe.draw()?;
        trace!(%card, remaining = self.shoe.len(), "card drawn");
        Ok(card)
    }

    /// Returns whether the seat takes part in the current round.
    fn in_round(&self, index: usize) -> bool {
        self.players.get(index).is_some_and(|p| !p.is_bankrupt())
    }

    fn is_playable(&self, pos: TurnPosition) -> bool {
        self.players.get(pos.player_index).is_some_and(|p| {
            !p.is_bankrupt()
                && !p.is_surrendered()
                && p
                    .hands()
                    .get(pos.hand_index)
                    .is_some_and(|h| h.status() == HandStatus::Active)
        })
    }

    /// Moves the turn to the first playable hand at or after `pos`.
    ///
    /// Hands at 21 from the deal, busted or finished hands, bankrupt and
    /// surrendered players are skipped. Once every hand is done the round
    /// moves on to the dealer.
    fn seek_turn(&mut self, mut pos: TurnPosition) {
        while pos.player_index < self.players.len() {
            let hand_count = self.players[pos.player_index].hands().len();
            while pos.hand_index < hand_count {
                if self.is_playable(pos) {
                    self.current_turn = pos;
                    return;
                }
                pos.hand_index += 1;
            }
            pos.player_index += 1;
            pos.hand_index = 0;
        }

        self.current_turn = pos;
        self.state = RoundState::DealerTurn;
        debug!(round = self.current_round, "player turns finished");
    }
}
