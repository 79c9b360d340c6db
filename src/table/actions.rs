use alloc::vec::Vec;

use tracing::debug;

use crate::card::Card;
use crate::error::{ActionError, EmptyShoeError};
use crate::hand::{BLACKJACK, Hand, HandStatus};
use crate::participant::{Participant, Player};

use super::dealer::round_amount;
use super::{Action, RoundState, Table, TurnPosition};

const SPLIT_DRAWS: usize = 2;

fn can_double(player: &Player, hand: &Hand) -> bool {
    hand.len() == 2 && player.can_afford(hand.bet())
}

fn can_split(player: &Player, hand: &Hand) -> bool {
    player.hands().len() == 1 && !hand.is_split() && hand.can_split()
}

fn can_surrender(player: &Player, hand: &Hand) -> bool {
    player.hands().len() == 1 && !hand.is_split() && hand.len() == 2
}

impl Table {
    fn ensure_player_turn(&self, player_index: usize, hand_index: usize) -> Result<(), ActionError> {
        if self.state != RoundState::PlayerTurns {
            return Err(ActionError::InvalidState);
        }

        let player = self
            .players
            .get(player_index)
            .ok_or(ActionError::PlayerNotFound(player_index))?;
        let hand = player
            .hands()
            .get(hand_index)
            .ok_or(ActionError::HandNotFound(hand_index))?;

        if self.current_turn
            != (TurnPosition {
                player_index,
                hand_index,
            })
        {
            return Err(ActionError::NotYourTurn);
        }

        if hand.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }

        Ok(())
    }

    fn advance_after_hand(&mut self, player_index: usize, hand_index: usize) {
        self.seek_turn(TurnPosition {
            player_index,
            hand_index: hand_index + 1,
        });
    }

    /// Ends the hand if it is no longer playable, counting a bust.
    fn finish_if_done(&mut self, player_index: usize, hand_index: usize) {
        let player = &mut self.players[player_index];
        let hand = &mut player.hands_mut()[hand_index];

        match hand.status() {
            HandStatus::Bust => {
                player.stats_mut().busts += 1;
                debug!(player = player_index, hand = hand_index, "hand busted");
            }
            HandStatus::Active if hand.score() == BLACKJACK => {
                hand.set_status(HandStatus::Stand);
            }
            HandStatus::Active => return,
            _ => {}
        }

        self.advance_after_hand(player_index, hand_index);
    }

    /// Returns the actions the player may take on a hand right now.
    ///
    /// Empty unless it is that hand's turn.
    #[must_use]
    pub fn legal_actions(&self, player_index: usize, hand_index: usize) -> Vec<Action> {
        if self.ensure_player_turn(player_index, hand_index).is_err() {
            return Vec::new();
        }

        let player = &self.players[player_index];
        let hand = &player.hands()[hand_index];

        let mut actions = alloc::vec![Action::Stand, Action::Hit];
        if can_double(player, hand) {
            actions.push(Action::DoubleDown);
        }
        if can_split(player, hand) && player.can_afford(hand.bet()) {
            actions.push(Action::Split);
        }
        if can_surrender(player, hand) {
            actions.push(Action::Surrender);
        }
        actions
    }

    /// Applies `action` to the given hand.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn act(
        &mut self,
        player_index: usize,
        hand_index: usize,
        action: Action,
    ) -> Result<(), ActionError> {
        match action {
            Action::Stand => self.stand(player_index, hand_index),
            Action::Hit => self.hit(player_index, hand_index).map(|_| ()),
            Action::DoubleDown => self.double_down(player_index, hand_index).map(|_| ()),
            Action::Split => self.split(player_index, hand_index),
            Action::Surrender => self.surrender(player_index, hand_index).map(|_| ()),
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A hand that busts, or reaches 21, ends automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the player turns, it is not
    /// this hand's turn, the player or hand cannot be found, or the shoe is
    /// empty.
    pub fn hit(&mut self, player_index: usize, hand_index: usize) -> Result<Card, ActionError> {
        self.ensure_player_turn(player_index, hand_index)?;

        let card = self.draw()?;
        self.players[player_index].hands_mut()[hand_index].add_card(card);
        debug!(player = player_index, hand = hand_index, %card, "hit");

        self.finish_if_done(player_index, hand_index);
        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the player turns, it is not
    /// this hand's turn, or the player or hand cannot be found.
    pub fn stand(&mut self, player_index: usize, hand_index: usize) -> Result<(), ActionError> {
        self.ensure_player_turn(player_index, hand_index)?;

        self.players[player_index].hands_mut()[hand_index].set_status(HandStatus::Stand);
        debug!(player = player_index, hand = hand_index, "stand");

        self.advance_after_hand(player_index, hand_index);
        Ok(())
    }

    /// Player action: Double down (double the stake, draw one card, stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the player turns, it is not
    /// this hand's turn, the player or hand cannot be found, the hand does
    /// not hold exactly two cards, the player lacks funds, or the shoe is
    /// empty.
    pub fn double_down(
        &mut self,
        player_index: usize,
        hand_index: usize,
    ) -> Result<Card, ActionError> {
        self.ensure_player_turn(player_index, hand_index)?;

        let player = &self.players[player_index];
        let hand = &player.hands()[hand_index];
        if hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }
        if !can_double(player, hand) {
            return Err(ActionError::InsufficientFunds);
        }
        let bet = hand.bet();

        let card = self.draw()?;

        let player = &mut self.players[player_index];
        player
            .set_wager(player.wager() + bet)
            .map_err(|_| ActionError::InsufficientFunds)?;
        let hand = &mut player.hands_mut()[hand_index];
        hand.set_bet(bet * 2);
        hand.add_card(card);
        if hand.status() == HandStatus::Active {
            hand.set_status(HandStatus::Stand);
        }
        debug!(player = player_index, hand = hand_index, %card, "double down");

        self.finish_if_done(player_index, hand_index);
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second card moves to a new hand after the current one, the stake
    /// is matched, and each hand is dealt one more card. Both hands are
    /// marked as split and cannot be split again or surrendered.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the player turns, it is not
    /// this hand's turn, the player or hand cannot be found, the hand is not
    /// a splittable pair, the player lacks funds, or the shoe cannot cover
    /// the two new cards.
    pub fn split(&mut self, player_index: usize, hand_index: usize) -> Result<(), ActionError> {
        self.ensure_player_turn(player_index, hand_index)?;

        let player = &self.players[player_index];
        let hand = &player.hands()[hand_index];
        if !can_split(player, hand) {
            return Err(ActionError::CannotSplit);
        }
        let bet = hand.bet();
        if !player.can_afford(bet) {
            return Err(ActionError::InsufficientFunds);
        }
        if self.cards_remaining() < SPLIT_DRAWS {
            return Err(EmptyShoeError.into());
        }

        let player = &mut self.players[player_index];
        player
            .set_wager(player.wager() + bet)
            .map_err(|_| ActionError::InsufficientFunds)?;

        let hand = &mut player.hands_mut()[hand_index];
        let moved = hand.take_split_card().ok_or(ActionError::CannotSplit)?;
        hand.mark_split();
        let new_hand = Hand::from_split(moved, bet);
        player.hands_mut().insert(hand_index + 1, new_hand);

        for offset in 0..SPLIT_DRAWS {
            let card = self.draw()?;
            let hand = &mut self.players[player_index].hands_mut()[hand_index + offset];
            hand.add_card(card);
            if hand.score() == BLACKJACK {
                hand.set_status(HandStatus::Stand);
            }
        }
        debug!(player = player_index, hand = hand_index, bet, "split");

        // Stay on this hand if it is still live; otherwise move on.
        self.seek_turn(TurnPosition {
            player_index,
            hand_index,
        });
        Ok(())
    }

    /// Player action: Surrender (forfeit half the stake).
    ///
    /// Only allowed as the first decision on an unsplit hand. Half the stake
    /// is returned at once and the player sits out the payout.
    ///
    /// Returns the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not in the player turns, it is not
    /// this hand's turn, the player or hand cannot be found, or the hand is
    /// not eligible to surrender.
    pub fn surrender(
        &mut self,
        player_index: usize,
        hand_index: usize,
    ) -> Result<usize, ActionError> {
        self.ensure_player_turn(player_index, hand_index)?;

        let player = &self.players[player_index];
        let hand = &player.hands()[hand_index];
        if !can_surrender(player, hand) {
            return Err(ActionError::CannotSurrender);
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for monetary values"
        )]
        let refund = round_amount(
            (hand.bet() as f64) * 0.5,
            self.options.rounding_surrender,
        );

        let player = &mut self.players[player_index];
        player.hands_mut()[hand_index].set_status(HandStatus::Surrendered);
        player.credit(refund);
        player.mark_surrendered();
        debug!(player = player_index, refund, "surrender");

        self.advance_after_hand(player_index, hand_index);
        Ok(refund)
    }
}
