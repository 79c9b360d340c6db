//! Seated participants: the dealer and the players.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::WagerError;
use crate::hand::{Hand, HandStatus};

/// Capabilities shared by everyone holding cards at the table.
pub trait Participant {
    /// Returns the display name.
    fn name(&self) -> &str;

    /// Returns the hands held this round (at least one).
    fn hands(&self) -> &[Hand];

    /// Returns whether the participant wagers (players do, the dealer does not).
    fn is_wagering(&self) -> bool;

    /// Drops all hands and starts over with one empty hand.
    fn reset_hands(&mut self);
}

/// Whether a player's decisions come from outside or from the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    /// Decisions are supplied by the caller.
    Human,
    /// Decisions follow the fixed scripted strategy.
    Cpu,
}

/// Lifetime statistics for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    /// Hands won at even money.
    pub wins: u32,
    /// Hands lost.
    pub losses: u32,
    /// Hands pushed.
    pub pushes: u32,
    /// Hands paid at the blackjack rate.
    pub blackjacks: u32,
    /// Hands busted.
    pub busts: u32,
    /// Rounds surrendered.
    pub surrenders: u32,
}

/// A wagering player, human or scripted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    kind: PlayerKind,
    hands: Vec<Hand>,
    wager: usize,
    insurance: usize,
    money: usize,
    opening_money: usize,
    bankrupt: bool,
    surrendered: bool,
    stats: PlayerStats,
}

impl Player {
    /// Creates a player with `money` to play with.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PlayerKind, money: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            hands: vec![Hand::new()],
            wager: 0,
            insurance: 0,
            money,
            opening_money: money,
            bankrupt: false,
            surrendered: false,
            stats: PlayerStats::default(),
        }
    }

    /// Renames the player.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns whether decisions come from the caller or the script.
    #[must_use]
    pub const fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Returns the money not currently at stake.
    #[must_use]
    pub const fn money(&self) -> usize {
        self.money
    }

    /// Returns the money held when the current round began.
    #[must_use]
    pub const fn opening_money(&self) -> usize {
        self.opening_money
    }

    /// Returns the total wager at stake this round, across all hands.
    #[must_use]
    pub const fn wager(&self) -> usize {
        self.wager
    }

    /// Returns the insurance side bet.
    #[must_use]
    pub const fn insurance(&self) -> usize {
        self.insurance
    }

    /// Returns whether the player has gone bankrupt.
    #[must_use]
    pub const fn is_bankrupt(&self) -> bool {
        self.bankrupt
    }

    /// Returns whether every hand the player holds is bust.
    #[must_use]
    pub fn is_busted(&self) -> bool {
        !self.hands.is_empty() && self.hands.iter().all(|h| h.status() == HandStatus::Bust)
    }

    /// Returns whether the player surrendered this round.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Returns the player's statistics.
    #[must_use]
    pub const fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Sets the total wager, moving only the difference to or from `money`.
    ///
    /// Raising an existing wager (doubling, splitting) debits just the
    /// increase; lowering it credits the decrease.
    ///
    /// # Errors
    ///
    /// Returns [`WagerError::InsufficientFunds`] if the increase exceeds the
    /// money on hand. Nothing changes in that case.
    pub fn set_wager(&mut self, amount: usize) -> Result<(), WagerError> {
        if amount >= self.wager {
            let delta = amount - self.wager;
            self.debit(delta)?;
        } else {
            self.money += self.wager - amount;
        }
        self.wager = amount;
        Ok(())
    }

    /// Places an insurance bet of `amount`.
    ///
    /// The amount is debited in full and replaces any earlier insurance
    /// value without refunding it.
    ///
    /// # Errors
    ///
    /// Returns [`WagerError::InsufficientFunds`] if `amount` exceeds the
    /// money on hand.
    pub fn set_insurance(&mut self, amount: usize) -> Result<(), WagerError> {
        self.debit(amount)?;
        self.insurance = amount;
        Ok(())
    }

    /// Appends a new empty hand.
    pub fn add_hand(&mut self) {
        self.hands.push(Hand::new());
    }

    /// Returns whether `amount` could be debited right now.
    #[must_use]
    pub const fn can_afford(&self, amount: usize) -> bool {
        self.money >= amount
    }

    fn debit(&mut self, amount: usize) -> Result<(), WagerError> {
        self.money = self
            .money
            .checked_sub(amount)
            .ok_or(WagerError::InsufficientFunds)?;
        Ok(())
    }

    pub(crate) const fn credit(&mut self, amount: usize) {
        self.money += amount;
    }

    pub(crate) const fn clear_insurance(&mut self) {
        self.insurance = 0;
    }

    pub(crate) fn hands_mut(&mut self) -> &mut Vec<Hand> {
        &mut self.hands
    }

    pub(crate) const fn stats_mut(&mut self) -> &mut PlayerStats {
        &mut self.stats
    }

    pub(crate) const fn mark_surrendered(&mut self) {
        self.surrendered = true;
        self.stats.surrenders += 1;
    }

    /// Clears round state and applies the bankruptcy check.
    ///
    /// Bankruptcy is permanent once set.
    pub(crate) fn finish_round(&mut self, min_wager: usize) {
        self.reset_hands();
        self.wager = 0;
        self.insurance = 0;
        self.surrendered = false;
        if self.money < min_wager {
            self.bankrupt = true;
        }
        self.opening_money = self.money;
    }
}

impl Participant for Player {
    fn name(&self) -> &str {
        &self.name
    }

    fn hands(&self) -> &[Hand] {
        &self.hands
    }

    fn is_wagering(&self) -> bool {
        true
    }

    fn reset_hands(&mut self) {
        self.hands.clear();
        self.hands.push(Hand::new());
    }
}

/// The dealer: one hand, no wager, fixed drawing strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dealer {
    name: String,
    hands: [Hand; 1],
}

impl Dealer {
    /// Index of the hole card within the dealer's hand.
    pub const HOLE_INDEX: usize = 1;

    /// Creates a dealer with an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: String::from("Dealer"),
            hands: [Hand::new()],
        }
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hands[0]
    }

    /// Adds a face-up card.
    pub fn add_card(&mut self, card: Card) {
        self.hands[0].add_card(card);
    }

    /// Adds a card face down.
    pub fn add_hole_card(&mut self, mut card: Card) {
        if card.is_face_up() {
            card.flip();
        }
        self.hands[0].add_card(card);
    }

    /// Returns the first card, which is always dealt face up.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.hand().cards().first()
    }

    /// Returns the second card.
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.hand().cards().get(Self::HOLE_INDEX)
    }

    /// Returns whether the hole card is still face down.
    #[must_use]
    pub fn is_hole_hidden(&self) -> bool {
        self.hole_card().is_some_and(|c| !c.is_face_up())
    }

    /// Turns the hole card face up. Returns `false` if it already was, or
    /// if there is no hole card yet.
    pub fn flip_hole_card(&mut self) -> bool {
        if !self.is_hole_hidden() {
            return false;
        }
        self.hands[0].flip_card_at(Self::HOLE_INDEX).is_ok()
    }

    /// Turns the hole card up only if it is worth 10.
    ///
    /// Returns whether the card was turned.
    pub fn reveal_hole_if_ten(&mut self) -> bool {
        let is_ten = self.hole_card().is_some_and(|c| c.value() == 10);
        is_ten && self.flip_hole_card()
    }

    /// Returns whether the dealer must draw at `stands_on`.
    #[must_use]
    pub fn must_draw(&self, stands_on: u8) -> bool {
        self.hand().score() < stands_on
    }
}

impl Default for Dealer {
    fn default() -> Self {
        Self::new()
    }
}

impl Participant for Dealer {
    fn name(&self) -> &str {
        &self.name
    }

    fn hands(&self) -> &[Hand] {
        &self.hands
    }

    fn is_wagering(&self) -> bool {
        false
    }

    fn reset_hands(&mut self) {
        self.hands = [Hand::new()];
    }
}

/// A detached copy of one seat, as returned by [`Table::participant`].
///
/// [`Table::participant`]: crate::Table::participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seat {
    /// A player's seat.
    Player(Player),
    /// The dealer, always the last seat.
    Dealer(Dealer),
}

impl Participant for Seat {
    fn name(&self) -> &str {
        match self {
            Self::Player(p) => p.name(),
            Self::Dealer(d) => d.name(),
        }
    }

    fn hands(&self) -> &[Hand] {
        match self {
            Self::Player(p) => p.hands(),
            Self::Dealer(d) => d.hands(),
        }
    }

    fn is_wagering(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    fn reset_hands(&mut self) {
        match self {
            Self::Player(p) => p.reset_hands(),
            Self::Dealer(d) => d.reset_hands(),
        }
    }
}
