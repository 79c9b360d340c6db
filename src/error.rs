//! Error types for table operations.

use thiserror::Error;

/// Errors raised while configuring a table, before any round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Deck count outside 1..=8.
    #[error("deck count {0} is outside 1..=8")]
    InvalidDeckCount(u8),
    /// Player count outside the configured range.
    #[error("player count {count} is outside {min}..={max}")]
    InvalidPlayerCount {
        /// Requested number of players.
        count: usize,
        /// Minimum seats.
        min: usize,
        /// Maximum seats.
        max: usize,
    },
    /// Player seat limits are inconsistent.
    #[error("invalid player limits")]
    InvalidPlayerLimits,
    /// Wager limits are inconsistent (zero minimum, or minimum above maximum).
    #[error("invalid wager limits")]
    InvalidWagerLimits,
    /// Starting money cannot cover the minimum wager.
    #[error("starting money is below the minimum wager")]
    InsufficientStartingMoney,
    /// Round target must be at least one.
    #[error("round target must be at least one")]
    InvalidRoundTarget,
    /// Players have already been seated.
    #[error("players have already been seated")]
    PlayersAlreadySeated,
}

/// The shoe has no cards left to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cards left in the shoe")]
pub struct EmptyShoeError;

/// An index did not refer to an existing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of bounds (len {len})")]
pub struct IndexError {
    /// The rejected index.
    pub index: usize,
    /// The length of the indexed collection.
    pub len: usize,
}

/// Errors raised by a player's own wager bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WagerError {
    /// Amount is outside the allowed range.
    #[error("wager {amount} is outside {min}..={max}")]
    InvalidWager {
        /// Rejected amount.
        amount: usize,
        /// Smallest accepted amount.
        min: usize,
        /// Largest accepted amount.
        max: usize,
    },
    /// Player cannot cover the amount.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid round state for betting.
    #[error("invalid round state for betting")]
    InvalidState,
    /// Player not found.
    #[error("player {0} not found")]
    PlayerNotFound(usize),
    /// Player is bankrupt and sits out.
    #[error("player {0} is bankrupt")]
    Bankrupt(usize),
    /// Wager was rejected.
    #[error(transparent)]
    Wager(#[from] WagerError),
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid round state for dealing.
    #[error("invalid round state for dealing")]
    InvalidState,
    /// A seated, solvent player has not wagered yet.
    #[error("player {0} has not placed a wager")]
    MissingWager(usize),
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
}

/// Errors that can occur during insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Invalid round state for insurance.
    #[error("invalid round state for insurance")]
    InvalidState,
    /// Player not found.
    #[error("player {0} not found")]
    PlayerNotFound(usize),
    /// Player is not eligible (bankrupt, or already holding 21).
    #[error("player {0} cannot take insurance")]
    NotEligible(usize),
    /// Player already made an insurance decision.
    #[error("player {0} already made an insurance decision")]
    AlreadyDecided(usize),
    /// Insurance amount was rejected.
    #[error(transparent)]
    Wager(#[from] WagerError),
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid round state for this action.
    #[error("invalid round state for this action")]
    InvalidState,
    /// Not this player's (or hand's) turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player {0} not found")]
    PlayerNotFound(usize),
    /// Hand not found.
    #[error("hand {0} not found")]
    HandNotFound(usize),
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error(transparent)]
    EmptyShoe(#[from] EmptyShoeError),
}

/// Errors that can occur during the dealer's turn and payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid round state for this step.
    #[error("invalid round state for showdown")]
    InvalidState,
    /// Player not found.
    #[error("player {0} not found")]
    PlayerNotFound(usize),
    /// Player is bankrupt and took no part in the round.
    #[error("player {0} is not in this round")]
    NotInRound(usize),
    /// Player's hands were already settled this round.
    #[error("player {0} already settled")]
    AlreadySettled(usize),
    /// No cards left in the shoe.
    #[error(transparent)]
    EmptyShoe(#[from] EmptyShoeError),
}

/// Errors that can occur when moving between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The current round has not been fully settled.
    #[error("the current round is not over")]
    RoundInProgress,
    /// The session has already ended.
    #[error("the session is over")]
    SessionOver,
}

/// Any error raised while a provider drives a full round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Betting failed.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// Dealing failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// Insurance failed.
    #[error(transparent)]
    Insurance(#[from] InsuranceError),
    /// A player action failed.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// Dealer play or payout failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
    /// Advancing the round failed.
    #[error(transparent)]
    Round(#[from] RoundError),
}
