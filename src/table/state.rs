//! Round state types.

/// Round state.
///
/// Dealing and the end-of-round reset happen atomically inside
/// [`Table::deal`](crate::Table::deal) and
/// [`Table::next_round`](crate::Table::next_round), so neither has a state of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for players to be seated.
    WaitingForPlayers,
    /// Accepting wagers for the next round.
    Betting,
    /// Offering insurance decisions.
    Insurance,
    /// Waiting for player actions.
    PlayerTurns,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Hands are being compared and paid.
    Payout,
    /// Every player has been settled.
    RoundOver,
    /// No further rounds will be played.
    SessionOver,
}

/// Represents the current turn position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnPosition {
    /// Index of the player's seat.
    pub player_index: usize,
    /// Index into the player's hands (for splits).
    pub hand_index: usize,
}

impl TurnPosition {
    /// The first hand of the first seat.
    pub const START: Self = Self {
        player_index: 0,
        hand_index: 0,
    };
}

/// A decision on one hand during the player turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// End the hand.
    Stand,
    /// Draw one card.
    Hit,
    /// Double the stake, draw exactly one card, and end the hand.
    DoubleDown,
    /// Split a pair into two hands.
    Split,
    /// Give up the hand for half the stake back.
    Surrender,
}
