//! Card types and their blackjack point values.

use core::fmt;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
}

impl Suit {
    /// All four suits, in shoe-building order.
    pub const ALL: [Self; 4] = [Self::Clubs, Self::Spades, Self::Hearts, Self::Diamonds];

    /// Returns the colour of the suit.
    #[must_use]
    pub const fn colour(self) -> Colour {
        match self {
            Self::Clubs | Self::Spades => Colour::Black,
            Self::Hearts | Self::Diamonds => Colour::Red,
        }
    }

    const fn symbol(self) -> char {
        match self {
            Self::Clubs => '♣',
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
        }
    }
}

/// Card colour, derived from the suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    /// Clubs and spades.
    Black,
    /// Hearts and diamonds.
    Red,
}

/// Card face (rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// Ace, worth 11 or 1.
    Ace,
    /// Two.
    Two,
    /// Three.
    Three,
    /// Four.
    Four,
    /// Five.
    Five,
    /// Six.
    Six,
    /// Seven.
    Seven,
    /// Eight.
    Eight,
    /// Nine.
    Nine,
    /// Ten.
    Ten,
    /// Jack.
    Jack,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl Face {
    /// All thirteen faces, Ace first.
    pub const ALL: [Self; 13] = [
        Self::Ace,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
    ];

    /// Returns the rank (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the value a freshly built card of this face carries.
    ///
    /// Aces start at 11; the holding [`Hand`](crate::Hand) lowers them to 1
    /// when needed.
    #[must_use]
    pub const fn base_value(self) -> u8 {
        match self {
            Self::Ace => 11,
            Self::Jack | Self::Queen | Self::King => 10,
            other => other.rank(),
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Ace => "A",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
        }
    }
}

/// A playing card.
///
/// Suit and face never change after construction. The face-up flag belongs
/// to whoever holds the card, and an Ace's value is re-derived in place by
/// the hand it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    suit: Suit,
    face: Face,
    value: u8,
    face_up: bool,
}

impl Card {
    /// Creates a new face-up card.
    #[must_use]
    pub const fn new(suit: Suit, face: Face) -> Self {
        Self {
            suit,
            face,
            value: face.base_value(),
            face_up: true,
        }
    }

    /// Returns the suit of the card.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the face of the card.
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }

    /// Returns the colour of the card.
    #[must_use]
    pub const fn colour(&self) -> Colour {
        self.suit.colour()
    }

    /// Returns the card's current point value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Returns whether the card is an Ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        matches!(self.face, Face::Ace)
    }

    /// Returns whether the card is face up.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Turns the card over.
    pub const fn flip(&mut self) {
        self.face_up = !self.face_up;
    }

    /// Returns whether two cards share suit and face, ignoring table state.
    #[must_use]
    pub fn same_card(&self, other: &Self) -> bool {
        self.suit == other.suit && self.face == other.face
    }

    pub(crate) const fn set_value(&mut self, value: u8) {
        self.value = value;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.label(), self.suit.symbol())
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
