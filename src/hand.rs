//! Hands and blackjack scoring.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::IndexError;

/// The best possible score.
pub const BLACKJACK: u8 = 21;

const ACE_HIGH: u8 = 11;
const ACE_LOW: u8 = 1;
const ACE_SWING: u8 = ACE_HIGH - ACE_LOW;

fn face_up_total(cards: &[Card]) -> u8 {
    cards
        .iter()
        .filter(|c| c.is_face_up())
        .fold(0u8, |total, c| total.saturating_add(c.value()))
}

/// Re-derives every face-up Ace's value after the hand changed.
///
/// Over 21, the leftmost high Ace drops to 1, repeatedly. Under 21, the
/// leftmost low Ace climbs back to 11 while that keeps the total at or
/// below 21. Face-down Aces are left untouched.
fn settle_aces(cards: &mut [Card]) {
    let mut total = face_up_total(cards);

    while total > BLACKJACK {
        let Some(ace) = cards
            .iter_mut()
            .find(|c| c.is_face_up() && c.is_ace() && c.value() == ACE_HIGH)
        else {
            break;
        };
        ace.set_value(ACE_LOW);
        total -= ACE_SWING;
    }

    while total < BLACKJACK && total + ACE_SWING <= BLACKJACK {
        let Some(ace) = cards
            .iter_mut()
            .find(|c| c.is_face_up() && c.is_ace() && c.value() == ACE_LOW)
        else {
            break;
        };
        ace.set_value(ACE_HIGH);
        total += ACE_SWING;
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood (or the hand was forced to end).
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand reached 21 on the deal.
    Blackjack,
    /// Player has surrendered.
    Surrendered,
}

/// An ordered sequence of cards belonging to one bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
    status: HandStatus,
    bet: usize,
    split: bool,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet: 0,
            split: false,
        }
    }

    /// Creates a hand produced by a split, holding the moved card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        let mut hand = Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            split: true,
        };
        hand.add_card(card);
        hand
    }

    /// Adds a card to the hand and re-scores it.
    ///
    /// A hand that goes over 21 is marked bust; an unsplit two-card 21 is
    /// marked blackjack.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.rescore();

        if self.score() > BLACKJACK {
            self.status = HandStatus::Bust;
        } else if self.is_blackjack() {
            self.status = HandStatus::Blackjack;
        }
    }

    /// Removes the card at `index`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index` is out of bounds.
    pub fn remove_card_at(&mut self, index: usize) -> Result<Card, IndexError> {
        if index >= self.cards.len() {
            return Err(IndexError {
                index,
                len: self.cards.len(),
            });
        }
        let card = self.cards.remove(index);
        self.rescore();
        Ok(card)
    }

    /// Turns over the card at `index` and re-scores the hand.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index` is out of bounds.
    pub fn flip_card_at(&mut self, index: usize) -> Result<(), IndexError> {
        let len = self.cards.len();
        let card = self.cards.get_mut(index).ok_or(IndexError { index, len })?;
        card.flip();
        self.rescore();
        Ok(())
    }

    fn rescore(&mut self) {
        settle_aces(&mut self.cards);
    }

    /// Returns the sum of the face-up cards' current values.
    ///
    /// A hand with no face-up cards scores 0.
    #[must_use]
    pub fn score(&self) -> u8 {
        face_up_total(&self.cards)
    }

    /// Returns whether a face-up Ace is currently counted as 11.
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.cards
            .iter()
            .any(|c| c.is_face_up() && c.is_ace() && c.value() == ACE_HIGH)
    }

    /// Returns whether the hand is an unsplit two-card 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        !self.split && self.cards.len() == 2 && self.score() == BLACKJACK
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score() > BLACKJACK
    }

    /// Returns whether the two starting cards may be split.
    ///
    /// Both cards must carry the same value, or both be Aces (whose values
    /// differ once the hand is scored).
    #[must_use]
    pub fn can_split(&self) -> bool {
        match self.cards.as_slice() {
            [first, second] => {
                (first.is_ace() && second.is_ace()) || first.value() == second.value()
            }
            _ => false,
        }
    }

    /// Removes and returns the second card (for splitting).
    pub fn take_split_card(&mut self) -> Option<Card> {
        if self.cards.len() == 2 {
            let card = self.cards.pop();
            self.rescore();
            card
        } else {
            None
        }
    }

    /// Returns the cards in the hand, in deal order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards, face up or not.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Sets the hand status.
    pub const fn set_status(&mut self, status: HandStatus) {
        self.status = status;
    }

    /// Returns the stake riding on this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    pub(crate) const fn set_bet(&mut self, bet: usize) {
        self.bet = bet;
    }

    /// Returns whether this hand came out of a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.split
    }

    /// Marks the hand as produced by a split.
    pub const fn mark_split(&mut self) {
        self.split = true;
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}
