use alloc::vec::Vec;

use tracing::debug;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::{BLACKJACK, HandStatus};
use crate::options::RoundingMode;
use crate::participant::Participant;
use crate::result::{
    DealerResult, HandOutcome, HandResult, InsuranceResult, PlayerResult, RoundResult,
};

use super::{RoundState, Table};

#[cfg(feature = "std")]
pub(super) fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub(super) fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Compares one player hand against the dealer's final score.
///
/// Any player 21 is paid at the blackjack rate unless the dealer also holds
/// 21, which pushes.
const fn hand_outcome(player: u8, dealer: u8) -> HandOutcome {
    if player > BLACKJACK {
        HandOutcome::Lose
    } else if dealer > BLACKJACK {
        if player == BLACKJACK {
            HandOutcome::Blackjack
        } else {
            HandOutcome::Win
        }
    } else if dealer == BLACKJACK {
        if player == BLACKJACK {
            HandOutcome::Push
        } else {
            HandOutcome::Lose
        }
    } else if player == BLACKJACK {
        HandOutcome::Blackjack
    } else if player > dealer {
        HandOutcome::Win
    } else if player == dealer {
        HandOutcome::Push
    } else {
        HandOutcome::Lose
    }
}

impl Table {
    /// Turns the dealer's hole card face up.
    ///
    /// Returns `false` if it was already showing.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the dealer turn.
    pub fn flip_hole_card(&mut self) -> Result<bool, ShowdownError> {
        if self.state != RoundState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }
        Ok(self.dealer.flip_hole_card())
    }

    /// Dealer plays their hand.
    ///
    /// The dealer reveals the hole card and draws while under the stand
    /// score (17 by default), soft totals included. Returns the cards drawn.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the dealer turn or the shoe
    /// runs out while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.state != RoundState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        self.dealer.flip_hole_card();

        let mut drawn = Vec::new();
        while self.dealer.must_draw(self.options.dealer_stands_on) {
            let card = self.draw()?;
            self.dealer.add_card(card);
            drawn.push(card);
        }

        let score = self.dealer.hand().score();
        debug!(round = self.current_round, score, drawn = drawn.len(), "dealer stands");

        self.state = RoundState::Payout;
        self.settle_absentees();
        Ok(drawn)
    }

    /// Marks bankrupt seats settled so the round can close without them.
    fn settle_absentees(&mut self) {
        for index in 0..self.players.len() {
            if !self.in_round(index) {
                self.settled[index] = true;
            }
        }
        self.close_if_settled();
    }

    fn close_if_settled(&mut self) {
        if self.settled.iter().all(|&s| s) {
            self.state = RoundState::RoundOver;
        }
    }

    fn payout_for(&self, outcome: HandOutcome, bet: usize) -> usize {
        match outcome {
            HandOutcome::Blackjack => {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "f64 has sufficient precision for monetary values"
                )]
                let winnings = (bet as f64) * self.options.blackjack_pays;
                bet + round_amount(winnings, self.options.rounding_blackjack)
            }
            HandOutcome::Win => bet * 2,
            HandOutcome::Push => bet,
            HandOutcome::Lose | HandOutcome::Surrendered => 0,
        }
    }

    /// Compares the player's hands against the dealer and pays them.
    ///
    /// Every hand is judged on its own, so both halves of a split are paid
    /// and counted separately. A surrendered player is settled with nothing
    /// further paid.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the payout state, or the
    /// player cannot be found, sat out the round, or was already settled.
    pub fn settle_player(&mut self, index: usize) -> Result<PlayerResult, ShowdownError> {
        if self.state != RoundState::Payout {
            return Err(ShowdownError::InvalidState);
        }
        if index >= self.players.len() {
            return Err(ShowdownError::PlayerNotFound(index));
        }
        if !self.in_round(index) {
            return Err(ShowdownError::NotInRound(index));
        }
        if self.settled[index] {
            return Err(ShowdownError::AlreadySettled(index));
        }

        let dealer_score = self.dealer.hand().score();
        let surrendered = self.players[index].is_surrendered();

        let mut hands = Vec::new();
        let mut total_payout = 0;
        for (hand_index, hand) in self.players[index].hands().iter().enumerate() {
            let player_score = hand.score();
            let outcome = if surrendered || hand.status() == HandStatus::Surrendered {
                HandOutcome::Surrendered
            } else {
                hand_outcome(player_score, dealer_score)
            };
            let payout = self.payout_for(outcome, hand.bet());
            total_payout += payout;
            hands.push(HandResult {
                hand_index,
                outcome,
                bet: hand.bet(),
                payout,
                player_score,
                dealer_score,
            });
        }

        let player = &mut self.players[index];
        player.credit(total_payout);
        let stats = player.stats_mut();
        for hand in &hands {
            match hand.outcome {
                HandOutcome::Win => stats.wins += 1,
                HandOutcome::Lose => stats.losses += 1,
                HandOutcome::Push => stats.pushes += 1,
                HandOutcome::Blackjack => stats.blackjacks += 1,
                HandOutcome::Surrendered => {}
            }
        }

        #[expect(clippy::cast_possible_wrap, reason = "money values fit in isize")]
        let net = player.money() as isize - player.opening_money() as isize;

        let result = PlayerResult {
            player_index: index,
            hands,
            total_payout,
            net,
            insurance: InsuranceResult {
                bet: self.insurance_taken[index].unwrap_or(0),
                payout: 0,
            },
        };
        debug!(player = index, total_payout, net, "player settled");

        self.results.push(result.clone());
        self.settled[index] = true;
        self.close_if_settled();
        Ok(result)
    }

    /// Settles every remaining player and returns the whole round's result.
    ///
    /// Once the round is over this only reports the stored results.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is in neither the payout state nor the
    /// round-over state.
    pub fn showdown(&mut self) -> Result<RoundResult, ShowdownError> {
        match self.state {
            RoundState::Payout => {
                for index in 0..self.players.len() {
                    if !self.settled[index] {
                        self.settle_player(index)?;
                    }
                }
            }
            RoundState::RoundOver => {}
            _ => return Err(ShowdownError::InvalidState),
        }

        let mut players = self.results.clone();
        players.sort_by_key(|r| r.player_index);

        let hand = self.dealer.hand();
        Ok(RoundResult {
            players,
            dealer: DealerResult {
                score: hand.score(),
                bust: hand.is_bust(),
                blackjack: hand.is_blackjack(),
            },
        })
    }
}
