//! Round engine integration tests.

use bjtable::{
    Action, ActionError, ActionProvider, BetError, Card, ConfigError, DealError, EmptyShoeError,
    Face, HandOutcome, HandStatus, IndexError, InsuranceError, InsuranceResult, Participant,
    PlayError, RoundError, RoundState, Seat, Shoe, ShowdownError, Suit, Table, TableOptions,
    TurnPosition, WagerError,
};

const fn card(suit: Suit, face: Face) -> Card {
    Card::new(suit, face)
}

fn seated(humans: usize, cpus: usize, options: TableOptions) -> Table {
    let mut table = Table::new(options, 42).unwrap();
    table.create_players(humans, cpus).unwrap();
    table
}

fn stack(table: &mut Table, draws: &[Card]) {
    table.set_shoe(Shoe::from_draws(draws));
}

fn money(table: &Table, index: usize) -> usize {
    table.player(index).unwrap().money()
}

#[test]
fn setup_errors() {
    assert_eq!(
        Table::new(TableOptions::default().with_decks(0), 1).unwrap_err(),
        ConfigError::InvalidDeckCount(0)
    );
    assert_eq!(
        Table::new(TableOptions::default().with_wager_limits(100, 50), 1).unwrap_err(),
        ConfigError::InvalidWagerLimits
    );

    let mut table = Table::new(TableOptions::default(), 1).unwrap();
    assert_eq!(table.state(), RoundState::WaitingForPlayers);
    assert_eq!(
        table.create_players(0, 0).unwrap_err(),
        ConfigError::InvalidPlayerCount {
            count: 0,
            min: 1,
            max: 6
        }
    );
    assert_eq!(
        table.create_players(4, 3).unwrap_err(),
        ConfigError::InvalidPlayerCount {
            count: 7,
            min: 1,
            max: 6
        }
    );
    table.create_players(2, 1).unwrap();
    assert_eq!(
        table.create_players(1, 0).unwrap_err(),
        ConfigError::PlayersAlreadySeated
    );
    assert_eq!(
        table.set_total_rounds(0).unwrap_err(),
        ConfigError::InvalidRoundTarget
    );

    assert_eq!(table.player(0).unwrap().name(), "Player 1");
    assert_eq!(table.player(2).unwrap().name(), "CPU 1");
    table.set_player_name(1, "Ada").unwrap();
    assert_eq!(table.player(1).unwrap().name(), "Ada");
    assert_eq!(
        table.set_player_name(3, "Nobody").unwrap_err(),
        IndexError { index: 3, len: 3 }
    );
    assert_eq!(table.deck_count(), 1);
}

#[test]
fn bet_errors_and_rewager() {
    let mut table = Table::new(TableOptions::default(), 1).unwrap();
    assert_eq!(table.place_wager(0, 100).unwrap_err(), BetError::InvalidState);

    table.create_players(1, 0).unwrap();
    assert_eq!(
        table.place_wager(0, 10).unwrap_err(),
        BetError::Wager(WagerError::InvalidWager {
            amount: 10,
            min: 25,
            max: 1000
        })
    );
    assert_eq!(
        table.place_wager(5, 100).unwrap_err(),
        BetError::PlayerNotFound(5)
    );

    table.place_wager(0, 100).unwrap();
    assert_eq!(money(&table, 0), 900);
    table.place_wager(0, 50).unwrap();
    assert_eq!(money(&table, 0), 950);
    assert_eq!(table.player(0).unwrap().wager(), 50);

    let mut poor = seated(1, 0, TableOptions::default().with_starting_money(150));
    poor.place_wager(0, 100).unwrap();
    assert_eq!(
        poor.place_wager(0, 200).unwrap_err(),
        BetError::Wager(WagerError::InsufficientFunds)
    );
    assert_eq!(money(&poor, 0), 50);
}

#[test]
fn deal_errors() {
    let mut table = seated(1, 0, TableOptions::default());
    assert_eq!(table.deal().unwrap_err(), DealError::MissingWager(0));

    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Nine),
            card(Suit::Clubs, Face::Five),
            card(Suit::Diamonds, Face::Seven),
        ],
    );
    assert_eq!(table.deal().unwrap_err(), DealError::NotEnoughCards);
}

#[test]
fn cpu_wagers_follow_script() {
    let mut table = seated(0, 2, TableOptions::default());
    table.place_cpu_wagers().unwrap();
    assert_eq!(table.player(0).unwrap().wager(), 50);
    assert_eq!(money(&table, 1), 950);

    let mut short = seated(0, 1, TableOptions::default().with_starting_money(40));
    short.place_cpu_wagers().unwrap();
    assert_eq!(short.player(0).unwrap().wager(), 40);
    assert_eq!(money(&short, 0), 0);
}

#[test]
fn deal_hides_dealer_hole_card() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Queen),
        ],
    );
    table.deal().unwrap();

    let dealer = table.dealer();
    assert!(dealer.is_hole_hidden());
    assert_eq!(dealer.hand().score(), 10);
    assert_eq!(table.state(), RoundState::PlayerTurns);
    assert_eq!(table.current_player(), Some(0));

    assert_eq!(table.flip_hole_card().unwrap_err(), ShowdownError::InvalidState);
    assert_eq!(
        table.reveal_hole_if_ten().unwrap_err(),
        InsuranceError::InvalidState
    );
    assert!(table.dealer().is_hole_hidden());
    assert_eq!(table.dealer().hand().score(), 10);
}

#[test]
fn hole_card_reveal_only_during_insurance() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Nine),
            card(Suit::Spades, Face::Ace),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Clubs, Face::Seven),
        ],
    );
    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::Insurance);

    assert!(!table.reveal_hole_if_ten().unwrap());
    assert!(table.dealer().is_hole_hidden());

    table.decline_insurance(0).unwrap();
    assert!(!table.resolve_insurance().unwrap());
    assert_eq!(
        table.reveal_hole_if_ten().unwrap_err(),
        InsuranceError::InvalidState
    );
}

#[test]
fn revealed_blackjack_still_pays_insurance() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Hearts, Face::Ace),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Diamonds, Face::King),
        ],
    );
    table.deal().unwrap();
    table.take_insurance(0, 50).unwrap();

    assert!(table.reveal_hole_if_ten().unwrap());
    assert!(!table.dealer().is_hole_hidden());
    assert_eq!(table.dealer().hand().score(), 21);

    assert!(table.resolve_insurance().unwrap());
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(money(&table, 0), 1000);

    let round = table.showdown().unwrap();
    assert!(round.dealer.blackjack);
    let player = &round.players[0];
    assert_eq!(player.outcome(0), Some(HandOutcome::Lose));
    assert_eq!(
        player.insurance,
        InsuranceResult {
            bet: 50,
            payout: 150
        }
    );
    assert!(player.insurance.paid());
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Six),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Ace),
            card(Suit::Hearts, Face::Four),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();

    let drawn = table.dealer_play().unwrap();
    assert!(drawn.is_empty());
    let dealer = table.dealer();
    assert_eq!(dealer.hand().score(), 17);
    assert!(dealer.hand().is_soft());
    assert_eq!(table.cards_remaining(), 1);

    let round = table.showdown().unwrap();
    assert_eq!(round.players[0].outcome(0), Some(HandOutcome::Win));
    assert_eq!(money(&table, 0), 1100);
}

#[test]
fn stand_and_lose_to_higher_dealer() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Queen),
        ],
    );
    table.deal().unwrap();

    table.stand(0, 0).unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert!(table.dealer_play().unwrap().is_empty());
    assert_eq!(table.state(), RoundState::Payout);

    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.hands[0].player_score, 19);
    assert_eq!(result.hands[0].dealer_score, 20);
    assert_eq!(result.total_payout, 0);
    assert_eq!(result.net, -100);
    assert_eq!(money(&table, 0), 900);
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(table.player(0).unwrap().stats().losses, 1);

    assert_eq!(
        table.settle_player(0).unwrap_err(),
        ShowdownError::InvalidState
    );
}

#[test]
fn dealer_bust_pays_even_money() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Hearts, Face::King),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();

    let drawn = table.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);

    let round = table.showdown().unwrap();
    assert!(round.dealer.bust);
    assert!(round.players[0].hands[0].outcome.is_win());
    assert_eq!(round.dealer.score, 26);
    assert_eq!(round.players[0].hands[0].outcome, HandOutcome::Win);
    assert_eq!(round.players[0].total_payout, 200);
    assert_eq!(money(&table, 0), 1100);
}

#[test]
fn blackjack_pays_three_to_two_and_skips_turn() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ace),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Spades, Face::King),
            card(Suit::Diamonds, Face::Eight),
        ],
    );
    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert_eq!(table.current_player(), None);

    table.dealer_play().unwrap();
    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.total_payout, 250);
    assert_eq!(result.net, 150);
    assert_eq!(table.player(0).unwrap().stats().blackjacks, 1);
}

#[test]
fn equal_scores_push() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Eight),
            card(Suit::Diamonds, Face::Eight),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();
    table.dealer_play().unwrap();

    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Push);
    assert_eq!(result.total_payout, 100);
    assert_eq!(result.net, 0);
    assert_eq!(table.player(0).unwrap().stats().pushes, 1);
}

#[test]
fn hit_to_bust_and_hit_to_twenty_one() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Hearts, Face::Six),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Diamonds, Face::King),
        ],
    );
    table.deal().unwrap();

    let drawn = table.hit(0, 0).unwrap();
    assert_eq!(drawn.face(), Face::King);
    assert_eq!(table.state(), RoundState::DealerTurn);
    let player = table.player(0).unwrap();
    assert!(player.is_busted());
    assert_eq!(player.stats().busts, 1);

    table.dealer_play().unwrap();
    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);

    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Hearts, Face::Six),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Diamonds, Face::Five),
        ],
    );
    table.deal().unwrap();
    table.hit(0, 0).unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert_eq!(
        table.player(0).unwrap().hands()[0].status(),
        HandStatus::Stand
    );
}

#[test]
fn hit_with_empty_shoe_returns_error() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Five),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Spades, Face::Six),
            card(Suit::Diamonds, Face::Seven),
        ],
    );
    table.deal().unwrap();

    assert_eq!(
        table.hit(0, 0).unwrap_err(),
        ActionError::EmptyShoe(EmptyShoeError)
    );
}

#[test]
fn double_down_doubles_stake_and_ends_hand() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Five),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Spades, Face::Eight),
            card(Suit::Hearts, Face::Nine),
        ],
    );
    table.deal().unwrap();
    assert!(table.legal_actions(0, 0).contains(&Action::DoubleDown));

    let drawn = table.double_down(0, 0).unwrap();
    assert_eq!(drawn.face(), Face::Nine);
    assert_eq!(table.state(), RoundState::DealerTurn);

    let player = table.player(0).unwrap();
    assert_eq!(player.wager(), 200);
    assert_eq!(player.hands()[0].bet(), 200);
    assert_eq!(player.money(), 800);

    table.dealer_play().unwrap();
    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Win);
    assert_eq!(result.total_payout, 400);
    assert_eq!(money(&table, 0), 1200);
}

#[test]
fn double_down_rejections() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Two),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Diamonds, Face::Three),
            card(Suit::Spades, Face::Eight),
            card(Suit::Clubs, Face::Four),
        ],
    );
    table.deal().unwrap();
    table.hit(0, 0).unwrap();
    assert_eq!(
        table.double_down(0, 0).unwrap_err(),
        ActionError::CannotDouble
    );

    let mut poor = seated(1, 0, TableOptions::default().with_starting_money(150));
    poor.place_wager(0, 100).unwrap();
    stack(
        &mut poor,
        &[
            card(Suit::Hearts, Face::Five),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Spades, Face::Eight),
        ],
    );
    poor.deal().unwrap();
    assert!(!poor.legal_actions(0, 0).contains(&Action::DoubleDown));
    assert_eq!(
        poor.double_down(0, 0).unwrap_err(),
        ActionError::InsufficientFunds
    );
}

#[test]
fn split_plays_and_pays_each_hand() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Eight),
            card(Suit::Clubs, Face::Five),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Spades, Face::Nine),
            card(Suit::Hearts, Face::Two),
            card(Suit::Clubs, Face::Three),
            card(Suit::Diamonds, Face::Ten),
        ],
    );
    table.deal().unwrap();
    assert!(table.legal_actions(0, 0).contains(&Action::Split));

    table.split(0, 0).unwrap();
    let player = table.player(0).unwrap();
    assert_eq!(player.hands().len(), 2);
    assert_eq!(player.hands()[0].score(), 10);
    assert_eq!(player.hands()[1].score(), 11);
    assert!(player.hands().iter().all(bjtable::Hand::is_split));
    assert_eq!(player.wager(), 200);
    assert_eq!(player.money(), 800);

    let legal = table.legal_actions(0, 0);
    assert!(!legal.contains(&Action::Split));
    assert!(!legal.contains(&Action::Surrender));

    table.stand(0, 0).unwrap();
    assert_eq!(
        table.current_turn(),
        TurnPosition {
            player_index: 0,
            hand_index: 1
        }
    );
    table.stand(0, 1).unwrap();

    table.dealer_play().unwrap();
    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands.len(), 2);
    assert!(result.hands.iter().all(|h| h.outcome == HandOutcome::Win));
    assert_eq!(result.total_payout, 400);
    assert_eq!(money(&table, 0), 1200);
    assert_eq!(table.player(0).unwrap().stats().wins, 2);
}

#[test]
fn split_aces_and_twenty_one_moves_on() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ace),
            card(Suit::Clubs, Face::Five),
            card(Suit::Diamonds, Face::Ace),
            card(Suit::Spades, Face::Nine),
            card(Suit::Hearts, Face::King),
            card(Suit::Clubs, Face::Two),
        ],
    );
    table.deal().unwrap();
    table.split(0, 0).unwrap();

    let player = table.player(0).unwrap();
    assert_eq!(player.hands()[0].score(), 21);
    assert_eq!(player.hands()[0].status(), HandStatus::Stand);
    assert_eq!(player.hands()[1].score(), 13);
    assert_eq!(table.current_turn().hand_index, 1);
}

#[test]
fn split_rejected_for_unpaired_hand() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Five),
            card(Suit::Diamonds, Face::Nine),
            card(Suit::Spades, Face::Nine),
        ],
    );
    table.deal().unwrap();
    assert_eq!(table.split(0, 0).unwrap_err(), ActionError::CannotSplit);
}

#[test]
fn surrender_refunds_half_and_skips_payout() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Ten),
            card(Suit::Clubs, Face::Seven),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Spades, Face::Eight),
            card(Suit::Clubs, Face::Two),
        ],
    );
    table.deal().unwrap();

    let refund = table.surrender(0, 0).unwrap();
    assert_eq!(refund, 50);
    assert_eq!(money(&table, 0), 950);
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert!(table.player(0).unwrap().is_surrendered());

    table.dealer_play().unwrap();
    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.total_payout, 0);
    assert_eq!(result.net, -50);
    assert_eq!(table.player(0).unwrap().stats().surrenders, 1);
}

#[test]
fn turn_order_is_enforced() {
    let mut table = seated(2, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    table.place_wager(1, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Clubs, Face::Seven),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Diamonds, Face::Five),
            card(Suit::Spades, Face::Ten),
        ],
    );
    table.deal().unwrap();

    assert_eq!(table.stand(1, 0).unwrap_err(), ActionError::NotYourTurn);
    assert_eq!(table.stand(0, 3).unwrap_err(), ActionError::HandNotFound(3));
    assert_eq!(table.stand(9, 0).unwrap_err(), ActionError::PlayerNotFound(9));
    assert!(table.legal_actions(1, 0).is_empty());

    table.stand(0, 0).unwrap();
    assert_eq!(table.current_player(), Some(1));
    table.stand(1, 0).unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);
}

#[test]
fn insurance_pays_when_dealer_has_blackjack() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Nine),
            card(Suit::Spades, Face::Ace),
            card(Suit::Diamonds, Face::Seven),
            card(Suit::Clubs, Face::King),
        ],
    );
    table.deal().unwrap();
    assert!(table.is_insurance_offered());

    assert_eq!(
        table.take_insurance(0, 60).unwrap_err(),
        InsuranceError::Wager(WagerError::InvalidWager {
            amount: 60,
            min: 1,
            max: 50
        })
    );
    table.take_insurance(0, 50).unwrap();
    assert_eq!(money(&table, 0), 850);
    assert_eq!(
        table.decline_insurance(0).unwrap_err(),
        InsuranceError::AlreadyDecided(0)
    );

    assert!(table.resolve_insurance().unwrap());
    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(money(&table, 0), 1000);

    let round = table.showdown().unwrap();
    assert!(round.dealer.blackjack);
    let player = &round.players[0];
    assert_eq!(player.insurance.bet, 50);
    assert_eq!(player.insurance.payout, 150);
    assert_eq!(player.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(player.net, 0);
}

#[test]
fn uninsured_blackjack_pushes_against_dealer_blackjack() {
    let mut table = seated(2, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    table.place_wager(1, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Ace),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Spades, Face::Ace),
            card(Suit::Hearts, Face::King),
            card(Suit::Diamonds, Face::Seven),
            card(Suit::Clubs, Face::Queen),
        ],
    );
    table.deal().unwrap();

    assert!(!table.is_insurance_eligible(0));
    assert_eq!(
        table.take_insurance(0, 50).unwrap_err(),
        InsuranceError::NotEligible(0)
    );
    table.decline_insurance(1).unwrap();
    assert!(table.resolve_insurance().unwrap());

    assert_eq!(money(&table, 0), 1000);
    assert_eq!(money(&table, 1), 900);
    assert_eq!(table.player(0).unwrap().stats().pushes, 1);
    assert_eq!(table.player(1).unwrap().stats().losses, 1);
}

#[test]
fn insurance_is_forfeited_without_dealer_blackjack() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Nine),
            card(Suit::Spades, Face::Ace),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Clubs, Face::Seven),
        ],
    );
    table.deal().unwrap();
    table.take_insurance(0, 50).unwrap();

    assert!(!table.resolve_insurance().unwrap());
    assert_eq!(table.state(), RoundState::PlayerTurns);
    assert!(table.dealer().is_hole_hidden());
    assert_eq!(table.player(0).unwrap().insurance(), 0);

    table.stand(0, 0).unwrap();
    table.dealer_play().unwrap();
    assert_eq!(table.dealer().hand().score(), 18);

    let result = table.settle_player(0).unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.insurance.bet, 50);
    assert!(result.insurance.is_taken());
    assert!(!result.insurance.paid());
    assert_eq!(result.net, -150);
    assert_eq!(money(&table, 0), 850);
}

#[test]
fn cpu_takes_half_wager_insurance() {
    let mut table = seated(0, 1, TableOptions::default());
    table.place_cpu_wagers().unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Nine),
            card(Suit::Spades, Face::Ace),
            card(Suit::Diamonds, Face::Eight),
            card(Suit::Clubs, Face::Seven),
        ],
    );
    table.deal().unwrap();
    table.place_cpu_insurance().unwrap();
    assert_eq!(table.player(0).unwrap().insurance(), 25);
    assert_eq!(table.insurance_bets(), vec![25]);
}

#[test]
fn bankrupt_player_sits_out() {
    let options = TableOptions::default().with_starting_money(45);
    let mut table = seated(2, 0, options);
    table.set_total_rounds(3).unwrap();
    table.place_wager(0, 25).unwrap();
    table.place_wager(1, 25).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Hearts, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Diamonds, Face::Six),
            card(Suit::Diamonds, Face::Ten),
            card(Suit::Clubs, Face::Eight),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();
    table.stand(1, 0).unwrap();
    table.dealer_play().unwrap();
    table.showdown().unwrap();
    assert_eq!(money(&table, 0), 20);
    assert_eq!(money(&table, 1), 70);

    assert!(table.next_round().unwrap());
    assert_eq!(table.current_round(), 2);
    assert!(table.player(0).unwrap().is_bankrupt());
    assert!(!table.all_bankrupt());

    assert_eq!(table.place_wager(0, 25).unwrap_err(), BetError::Bankrupt(0));
    table.place_wager(1, 25).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Hearts, Face::Ten),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Diamonds, Face::Nine),
            card(Suit::Clubs, Face::Eight),
        ],
    );
    table.deal().unwrap();
    assert!(table.player(0).unwrap().hands()[0].is_empty());
    assert_eq!(table.current_player(), Some(1));

    table.stand(1, 0).unwrap();
    table.dealer_play().unwrap();
    assert_eq!(
        table.settle_player(0).unwrap_err(),
        ShowdownError::NotInRound(0)
    );
    let round = table.showdown().unwrap();
    assert_eq!(round.players.len(), 1);
    assert_eq!(round.players[0].player_index, 1);
}

#[test]
fn session_ends_when_everyone_is_bankrupt() {
    let options = TableOptions::default().with_starting_money(30);
    let mut table = seated(1, 0, options);
    table.set_total_rounds(10).unwrap();
    table.place_wager(0, 25).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Six),
            card(Suit::Diamonds, Face::Nine),
        ],
    );
    table.deal().unwrap();
    assert_eq!(table.next_round().unwrap_err(), RoundError::RoundInProgress);

    table.stand(0, 0).unwrap();
    table.dealer_play().unwrap();
    table.showdown().unwrap();

    assert!(!table.next_round().unwrap());
    assert!(table.is_session_over());
    assert!(table.all_bankrupt());
    assert_eq!(table.next_round().unwrap_err(), RoundError::SessionOver);
}

#[test]
fn session_ends_after_round_target() {
    let mut table = seated(1, 0, TableOptions::default());
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Nine),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();
    table.dealer_play().unwrap();
    table.showdown().unwrap();

    assert!(!table.next_round().unwrap());
    assert_eq!(table.state(), RoundState::SessionOver);
    assert_eq!(table.player(0).unwrap().wager(), 0);
}

#[test]
fn next_round_resets_hands_and_shoe() {
    let mut table = seated(1, 0, TableOptions::default().with_decks(2));
    table.set_total_rounds(2).unwrap();
    table.place_wager(0, 100).unwrap();
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Clubs, Face::Ten),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Nine),
        ],
    );
    table.deal().unwrap();
    table.stand(0, 0).unwrap();
    table.dealer_play().unwrap();
    table.showdown().unwrap();

    assert!(table.next_round().unwrap());
    assert_eq!(table.state(), RoundState::Betting);
    assert_eq!(table.cards_remaining(), 104);
    assert_eq!(table.deck_count(), 2);
    assert!(table.round_results().is_empty());
    let player = table.player(0).unwrap();
    assert_eq!(player.hands().len(), 1);
    assert!(player.hands()[0].is_empty());
    assert!(table.dealer().hand().is_empty());
}

#[test]
fn snapshots_are_detached() {
    let table = seated(2, 0, TableOptions::default());

    let mut copy = table.player(0).unwrap();
    copy.set_name("Changed");
    copy.add_hand();
    assert_eq!(table.player(0).unwrap().name(), "Player 1");
    assert_eq!(table.player(0).unwrap().hands().len(), 1);

    match table.participant(2).unwrap() {
        Seat::Dealer(dealer) => assert_eq!(dealer.name(), "Dealer"),
        Seat::Player(_) => panic!("seat 2 should be the dealer"),
    }
    assert!(table.participant(1).unwrap().is_wagering());
    assert_eq!(
        table.participant(3).unwrap_err(),
        IndexError { index: 3, len: 3 }
    );
}

#[derive(Default)]
struct ScriptedHuman {
    wagers: Vec<usize>,
    rejections: Vec<PlayError>,
}

impl ActionProvider for ScriptedHuman {
    fn wager(&mut self, _table: &Table, _player_index: usize) -> usize {
        self.wagers.pop().unwrap_or(100)
    }

    fn insurance(&mut self, _table: &Table, _player_index: usize) -> usize {
        0
    }

    fn action(&mut self, _table: &Table, _turn: TurnPosition, legal: &[Action]) -> Action {
        assert!(legal.contains(&Action::Stand));
        Action::Stand
    }

    fn rejected(&mut self, _table: &Table, error: &PlayError) {
        self.rejections.push(*error);
    }
}

#[test]
fn provider_drives_a_full_round() {
    let mut table = seated(1, 1, TableOptions::default());
    stack(
        &mut table,
        &[
            card(Suit::Spades, Face::Ten),
            card(Suit::Hearts, Face::Ten),
            card(Suit::Clubs, Face::Nine),
            card(Suit::Hearts, Face::Nine),
            card(Suit::Diamonds, Face::Seven),
            card(Suit::Diamonds, Face::Nine),
        ],
    );

    let mut provider = ScriptedHuman {
        wagers: vec![5],
        ..ScriptedHuman::default()
    };
    let round = table.play_round(&mut provider).unwrap();

    assert_eq!(provider.rejections.len(), 1);
    assert!(matches!(
        provider.rejections[0],
        PlayError::Bet(BetError::Wager(WagerError::InvalidWager { amount: 5, .. }))
    ));

    assert_eq!(table.state(), RoundState::RoundOver);
    assert_eq!(round.dealer.score, 18);
    assert_eq!(round.players.len(), 2);
    assert_eq!(round.players[0].hands[0].outcome, HandOutcome::Win);
    assert_eq!(round.players[1].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(money(&table, 0), 1100);
    assert_eq!(money(&table, 1), 950);
}
