use alloc::vec;
use alloc::vec::Vec;

use tracing::debug;

use crate::error::{InsuranceError, WagerError};
use crate::hand::{BLACKJACK, HandStatus};
use crate::participant::{Participant, PlayerKind};
use crate::result::{HandOutcome, HandResult, InsuranceResult, PlayerResult};

use super::{RoundState, Table, TurnPosition};

impl Table {
    /// Returns whether insurance is currently being offered.
    #[must_use]
    pub fn is_insurance_offered(&self) -> bool {
        self.state == RoundState::Insurance
    }

    /// Returns whether the player at `index` may take insurance.
    ///
    /// Solvent players whose two-card hand is under 21 are eligible.
    #[must_use]
    pub fn is_insurance_eligible(&self, index: usize) -> bool {
        self.in_round(index)
            && self.players[index]
                .hands()
                .first()
                .is_some_and(|h| h.score() < BLACKJACK)
    }

    /// Returns the largest insurance the player at `index` may take.
    #[must_use]
    pub fn max_insurance(&self, index: usize) -> usize {
        self.players.get(index).map_or(0, |p| p.wager() / 2)
    }

    /// Takes insurance of `amount` for the player at `index`.
    ///
    /// The amount must be between 1 and half the player's wager.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered, the player cannot
    /// be found, is not eligible or already decided, the amount is out of
    /// range, or the player lacks funds.
    pub fn take_insurance(&mut self, index: usize, amount: usize) -> Result<(), InsuranceError> {
        self.ensure_undecided(index)?;

        let max = self.max_insurance(index);
        if amount == 0 || amount > max {
            return Err(WagerError::InvalidWager {
                amount,
                min: 1,
                max,
            }
            .into());
        }

        self.players[index].set_insurance(amount)?;
        self.insurance_taken[index] = Some(amount);

        debug!(player = index, amount, "insurance taken");
        Ok(())
    }

    /// Declines insurance for the player at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered, or the player
    /// cannot be found, is not eligible, or already decided.
    pub fn decline_insurance(&mut self, index: usize) -> Result<(), InsuranceError> {
        self.ensure_undecided(index)?;
        self.insurance_taken[index] = Some(0);
        Ok(())
    }

    /// Takes half-wager insurance for every eligible CPU player that can
    /// afford it, and declines for the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered.
    pub fn place_cpu_insurance(&mut self) -> Result<(), InsuranceError> {
        if self.state != RoundState::Insurance {
            return Err(InsuranceError::InvalidState);
        }

        for index in 0..self.players.len() {
            if self.players[index].kind() != PlayerKind::Cpu
                || !self.is_insurance_eligible(index)
                || self.insurance_taken[index].is_some()
            {
                continue;
            }

            let amount = self.max_insurance(index);
            if amount > 0 && self.players[index].can_afford(amount) {
                self.take_insurance(index, amount)?;
            } else {
                self.decline_insurance(index)?;
            }
        }

        Ok(())
    }

    /// Closes the insurance phase and checks the dealer for blackjack.
    ///
    /// Undecided players are treated as having declined. If the hole card is
    /// worth 10 it is turned up and the dealer has blackjack: insurance pays
    /// 2:1, players holding 21 without insurance push, and everyone else loses.
    /// The round is then over. Otherwise every insurance bet is forfeited, the
    /// hole card stays down, and play moves to the player turns.
    ///
    /// Returns `true` if the dealer has blackjack.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the insurance state.
    pub fn resolve_insurance(&mut self) -> Result<bool, InsuranceError> {
        if self.state != RoundState::Insurance {
            return Err(InsuranceError::InvalidState);
        }

        self.dealer.reveal_hole_if_ten();
        let dealer_blackjack =
            !self.dealer.is_hole_hidden() && self.dealer.hand().score() == BLACKJACK;

        if dealer_blackjack {
            self.settle_dealer_blackjack();
            self.state = RoundState::RoundOver;
            debug!(round = self.current_round, "dealer blackjack under an ace");
        } else {
            for player in &mut self.players {
                player.clear_insurance();
            }
            self.state = RoundState::PlayerTurns;
            self.seek_turn(TurnPosition::START);
            debug!(round = self.current_round, "insurance forfeited");
        }

        Ok(dealer_blackjack)
    }

    /// Turns the dealer's second card up if it is worth 10.
    ///
    /// Under an Ace that card completes a blackjack, so turning it early
    /// only shows what [`resolve_insurance`] will find. Returns whether the
    /// card was turned by this call.
    ///
    /// [`resolve_insurance`]: Self::resolve_insurance
    ///
    /// # Errors
    ///
    /// Returns an error if insurance is not being offered.
    pub fn reveal_hole_if_ten(&mut self) -> Result<bool, InsuranceError> {
        if self.state != RoundState::Insurance {
            return Err(InsuranceError::InvalidState);
        }
        Ok(self.dealer.reveal_hole_if_ten())
    }

    fn ensure_undecided(&self, index: usize) -> Result<(), InsuranceError> {
        if self.state != RoundState::Insurance {
            return Err(InsuranceError::InvalidState);
        }
        if index >= self.players.len() {
            return Err(InsuranceError::PlayerNotFound(index));
        }
        if !self.is_insurance_eligible(index) {
            return Err(InsuranceError::NotEligible(index));
        }
        if self.insurance_taken[index].is_some() {
            return Err(InsuranceError::AlreadyDecided(index));
        }
        Ok(())
    }

    /// Settles every solvent player against a dealer blackjack revealed
    /// during insurance.
    fn settle_dealer_blackjack(&mut self) {
        let dealer_score = self.dealer.hand().score();
        let insurance_pays = self.options.insurance_pays;

        for index in 0..self.players.len() {
            if !self.in_round(index) {
                continue;
            }

            let player = &mut self.players[index];
            let insurance_bet = player.insurance();
            let insurance_payout = insurance_bet * (1 + insurance_pays);
            player.credit(insurance_payout);
            player.clear_insurance();

            let hand = &mut player.hands_mut()[0];
            let bet = hand.bet();
            let player_score = hand.score();
            let pushes = insurance_bet == 0 && hand.status() == HandStatus::Blackjack;
            hand.set_status(HandStatus::Stand);

            let (outcome, payout) = if pushes {
                player.stats_mut().pushes += 1;
                (HandOutcome::Push, bet)
            } else {
                player.stats_mut().losses += 1;
                (HandOutcome::Lose, 0)
            };
            player.credit(payout);

            #[expect(clippy::cast_possible_wrap, reason = "money values fit in isize")]
            let net = player.money() as isize - player.opening_money() as isize;

            self.results.push(PlayerResult {
                player_index: index,
                hands: vec![HandResult {
                    hand_index: 0,
                    outcome,
                    bet,
                    payout,
                    player_score,
                    dealer_score,
                }],
                insurance: InsuranceResult {
                    bet: insurance_bet,
                    payout: insurance_payout,
                },
                total_payout: payout + insurance_payout,
                net,
            });
            self.settled[index] = true;
        }
    }

    /// Returns the insurance each player staked this round (0 if declined).
    #[must_use]
    pub fn insurance_bets(&self) -> Vec<usize> {
        self.insurance_taken
            .iter()
            .map(|taken| taken.unwrap_or(0))
            .collect()
    }
}
