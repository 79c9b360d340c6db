//! Settlement records produced at the end of a round.

extern crate alloc;

use alloc::vec::Vec;

/// How one hand was settled against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Paid at even money.
    Win,
    /// Bust, or beaten by the dealer.
    Lose,
    /// Tied with the dealer; the bet came back.
    Push,
    /// A 21 paid at the blackjack rate.
    Blackjack,
    /// Given up; half the bet was refunded during play.
    Surrendered,
}

impl HandOutcome {
    /// Returns whether the hand was paid more than its bet.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win | Self::Blackjack)
    }
}

/// Settlement of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// Position of the hand within the player's hands.
    pub hand_index: usize,
    /// How the hand was settled.
    pub outcome: HandOutcome,
    /// Stake riding on the hand when it was settled.
    pub bet: usize,
    /// Amount credited for the hand, stake included.
    pub payout: usize,
    /// The hand's final score.
    pub player_score: u8,
    /// The dealer's final score.
    pub dealer_score: u8,
}

/// The insurance side bet of one player.
///
/// Both fields are zero when insurance was declined or never offered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsuranceResult {
    /// Amount staked.
    pub bet: usize,
    /// Amount credited, stake included; zero unless the dealer had blackjack.
    pub payout: usize,
}

impl InsuranceResult {
    /// Returns whether insurance was taken.
    #[must_use]
    pub const fn is_taken(&self) -> bool {
        self.bet > 0
    }

    /// Returns whether the side bet paid out.
    #[must_use]
    pub const fn paid(&self) -> bool {
        self.payout > 0
    }
}

/// Settlement of one player for the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    /// The player's seat.
    pub player_index: usize,
    /// One entry per hand; two after a split.
    pub hands: Vec<HandResult>,
    /// The insurance side bet.
    pub insurance: InsuranceResult,
    /// Everything credited at settlement, hands and insurance together.
    pub total_payout: usize,
    /// Money after settling minus money when the round opened.
    pub net: isize,
}

impl PlayerResult {
    /// Returns the outcome of the hand at `hand_index`, if it exists.
    #[must_use]
    pub fn outcome(&self, hand_index: usize) -> Option<HandOutcome> {
        self.hands.get(hand_index).map(|h| h.outcome)
    }
}

/// The dealer's final hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DealerResult {
    /// Final score.
    pub score: u8,
    /// Whether the dealer went over 21.
    pub bust: bool,
    /// Whether the dealer held a two-card 21.
    pub blackjack: bool,
}

/// Settlement of a whole round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Settled players in seat order; bankrupt seats are absent.
    pub players: Vec<PlayerResult>,
    /// The dealer's hand.
    pub dealer: DealerResult,
}
