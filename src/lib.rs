//! A multi-seat blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Table`] that owns the shoe, the players, and the
//! dealer, and drives each round from betting through insurance, player
//! turns, dealer play, payout, and reset. Presentation is left to the caller:
//! it issues commands, reads detached snapshots, and can hand a whole round
//! to [`Table::play_round`] through an [`ActionProvider`].
//!
//! Events are emitted through `tracing`; install a subscriber to see them.
//!
//! # Example
//!
//! ```
//! use bjtable::{Table, TableOptions};
//!
//! let mut table = Table::new(TableOptions::default(), 42).unwrap();
//! table.create_players(1, 1).unwrap();
//! table.place_wager(0, 100).unwrap();
//! table.place_cpu_wagers().unwrap();
//! table.deal().unwrap();
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod hand;
pub mod options;
pub mod participant;
pub mod result;
pub mod shoe;
pub mod table;

// Re-export main types
pub use card::{Card, Colour, DECK_SIZE, Face, Suit};
pub use error::{
    ActionError, BetError, ConfigError, DealError, EmptyShoeError, IndexError, InsuranceError,
    PlayError, RoundError, ShowdownError, WagerError,
};
pub use hand::{BLACKJACK, Hand, HandStatus};
pub use options::{RoundingMode, TableOptions};
pub use participant::{Dealer, Participant, Player, PlayerKind, PlayerStats, Seat};
pub use result::{
    DealerResult, HandOutcome, HandResult, InsuranceResult, PlayerResult, RoundResult,
};
pub use shoe::Shoe;
pub use table::{Action, ActionProvider, RoundState, Table, TurnPosition, scripted_action};
