//! Table configuration options.

use crate::error::ConfigError;

/// Largest shoe the table accepts, in decks.
pub const MAX_DECKS: u8 = 8;

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(6)
///     .with_wager_limits(10, 500)
///     .with_starting_money(2_000);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Number of decks in the shoe (1..=8).
    pub decks: u8,
    /// Fewest seated players.
    pub min_players: usize,
    /// Most seated players.
    pub max_players: usize,
    /// Smallest accepted wager. Players below it go bankrupt.
    pub min_wager: usize,
    /// Largest accepted wager.
    pub max_wager: usize,
    /// Money each player sits down with.
    pub starting_money: usize,
    /// Blackjack payout ratio (1.5 credits 2.5 times the bet).
    pub blackjack_pays: f64,
    /// Insurance payout ratio (2 credits 3 times the insurance).
    pub insurance_pays: usize,
    /// Dealer stands on this score or higher.
    pub dealer_stands_on: u8,
    /// Wager a scripted CPU player tries first.
    pub cpu_wager: usize,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for surrender refunds.
    pub rounding_surrender: RoundingMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            min_players: 1,
            max_players: 6,
            min_wager: 25,
            max_wager: 1000,
            starting_money: 1000,
            blackjack_pays: 1.5,
            insurance_pays: 2,
            dealer_stands_on: 17,
            cpu_wager: 50,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
        }
    }
}

impl TableOptions {
    /// Checks the options for consistency.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the deck count is outside 1..=8, the
    /// player or wager limits are inconsistent, or the starting money cannot
    /// cover the minimum wager.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{ConfigError, TableOptions};
    ///
    /// let options = TableOptions::default().with_decks(9);
    /// assert_eq!(options.validate(), Err(ConfigError::InvalidDeckCount(9)));
    /// ```
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.decks == 0 || self.decks > MAX_DECKS {
            return Err(ConfigError::InvalidDeckCount(self.decks));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(ConfigError::InvalidPlayerLimits);
        }
        if self.min_wager == 0 || self.min_wager > self.max_wager {
            return Err(ConfigError::InvalidWagerLimits);
        }
        if self.starting_money < self.min_wager {
            return Err(ConfigError::InsufficientStartingMoney);
        }
        Ok(())
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the seat limits.
    #[must_use]
    pub const fn with_player_limits(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Sets the wager limits.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_wager_limits(5, 100);
    /// assert_eq!((options.min_wager, options.max_wager), (5, 100));
    /// ```
    #[must_use]
    pub const fn with_wager_limits(mut self, min: usize, max: usize) -> Self {
        self.min_wager = min;
        self.max_wager = max;
        self
    }

    /// Sets the money each player starts with.
    #[must_use]
    pub const fn with_starting_money(mut self, money: usize) -> Self {
        self.starting_money = money;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the insurance payout ratio.
    #[must_use]
    pub const fn with_insurance_pays(mut self, ratio: usize) -> Self {
        self.insurance_pays = ratio;
        self
    }

    /// Sets the score the dealer stands on.
    #[must_use]
    pub const fn with_dealer_stands_on(mut self, score: u8) -> Self {
        self.dealer_stands_on = score;
        self
    }

    /// Sets the scripted CPU wager.
    #[must_use]
    pub const fn with_cpu_wager(mut self, wager: usize) -> Self {
        self.cpu_wager = wager;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{RoundingMode, TableOptions};
    ///
    /// let options = TableOptions::default().with_rounding_surrender(RoundingMode::Down);
    /// assert_eq!(options.rounding_surrender, RoundingMode::Down);
    /// ```
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }
}
