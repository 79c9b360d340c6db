//! The shoe: one or more shuffled decks cards are drawn from.

use alloc::vec::Vec;

use rand::Rng;

use crate::card::{Card, DECK_SIZE, Face, Suit};
use crate::error::{ConfigError, EmptyShoeError};
use crate::options::MAX_DECKS;

/// An ordered pool of cards for 1 to 8 standard decks.
///
/// Cards are drawn from the back. A table builds a fresh shoe every round.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
}

impl Shoe {
    /// Builds and shuffles a shoe of `decks` standard decks.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDeckCount`] if `decks` is outside 1..=8.
    pub fn new<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Result<Self, ConfigError> {
        if decks == 0 || decks > MAX_DECKS {
            return Err(ConfigError::InvalidDeckCount(decks));
        }
        Ok(Self::standard(decks, rng))
    }

    /// Builds and shuffles a shoe from an already validated deck count.
    pub(crate) fn standard<R: Rng + ?Sized>(decks: u8, rng: &mut R) -> Self {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);
        for _ in 0..decks {
            for suit in Suit::ALL {
                for face in Face::ALL {
                    cards.push(Card::new(suit, face));
                }
            }
        }

        let mut shoe = Self { cards, decks };
        shoe.shuffle(rng);
        shoe
    }

    /// Builds an unshuffled shoe that deals `draws` in order, first card first.
    ///
    /// Useful for replaying a known sequence of cards.
    #[must_use]
    pub fn from_draws(draws: &[Card]) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        let decks = draws.len().div_ceil(DECK_SIZE).clamp(1, MAX_DECKS as usize) as u8;
        Self { cards, decks }
    }

    /// Shuffles the shoe.
    ///
    /// Each position in the lower half is swapped with a random position in
    /// the upper half. The upper half is never shuffled among itself, so this
    /// reaches far fewer orderings than a full Fisher-Yates pass.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let half = self.cards.len() / 2;
        let len = self.cards.len();
        if half == 0 {
            return;
        }
        for i in 0..half {
            let j = rng.random_range(half..len);
            self.cards.swap(i, j);
        }
    }

    /// Draws the next card.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyShoeError`] once every card has been drawn.
    pub fn draw(&mut self) -> Result<Card, EmptyShoeError> {
        self.cards.pop().ok_or(EmptyShoeError)
    }

    /// Returns the number of decks the shoe was built from.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards. The last element is drawn next.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
