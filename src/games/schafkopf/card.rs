use std::fmt;
use std::str::FromStr;

use enum_iterator::{all, Sequence};
use once_cell::sync::Lazy;
use rand::prelude::SliceRandom;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DECK_SIZE: usize = 32;
pub const HAND_SIZE: usize = 8;
pub const DEAL_PACKET: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Sequence)]
#[serde(rename_all = "camelCase")]
pub enum Color {
    Acorn = 3,
    Leaf = 2,
    Heart = 1,
    Bell = 0,
}

impl Color {
    pub fn tier(&self) -> i32 {
        *self as i32
    }

    pub fn id(&self) -> char {
        match self {
            Color::Acorn => 'e',
            Color::Leaf => 'g',
            Color::Heart => 'h',
            Color::Bell => 's',
        }
    }

    fn from_id(id: char) -> Option<Color> {
        match id {
            'e' => Some(Color::Acorn),
            'g' => Some(Color::Leaf),
            'h' => Some(Color::Heart),
            's' => Some(Color::Bell),
            _ => None,
        }
    }
}

// Declared in ascending base order, the in-color order when no rank is
// elevated to trump. Note the Ten sits between King and Ace.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Sequence,
    PartialOrd,
    Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum Rank {
    Seven = 0,
    Eight = 1,
    Nine = 2,
    Under = 3,
    Over = 4,
    King = 5,
    Ten = 6,
    Ace = 7,
}

impl Rank {
    pub fn base_tier(&self) -> i32 {
        *self as i32
    }

    pub fn points(&self) -> i32 {
        match self {
            Rank::Seven | Rank::Eight | Rank::Nine => 0,
            Rank::Under => 2,
            Rank::Over => 3,
            Rank::King => 4,
            Rank::Ten => 10,
            Rank::Ace => 11,
        }
    }

    // "1" is the Ten, "s" the Sau (Ace)
    pub fn id(&self) -> char {
        match self {
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => '1',
            Rank::Under => 'u',
            Rank::Over => 'o',
            Rank::King => 'k',
            Rank::Ace => 's',
        }
    }

    fn from_id(id: char) -> Option<Rank> {
        match id {
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            '1' => Some(Rank::Ten),
            'u' => Some(Rank::Under),
            'o' => Some(Rank::Over),
            'k' => Some(Rank::King),
            's' => Some(Rank::Ace),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    pub fn points(&self) -> i32 {
        self.rank.points()
    }

    pub fn id(&self) -> String {
        format!("{}{}", self.color.id(), self.rank.id())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.color.id(), self.rank.id())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("unknown card id `{0}`")]
    UnknownId(String),
    #[error("duplicate card `{0}`")]
    DuplicateCard(Card),
}

impl FromStr for Card {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let card = match (chars.next(), chars.next(), chars.next()) {
            (Some(color), Some(rank), None) => Color::from_id(color)
                .zip(Rank::from_id(rank))
                .map(|(color, rank)| Card { color, rank }),
            _ => None,
        };
        card.ok_or_else(|| DeckError::UnknownId(s.to_string()))
    }
}

/// The 32 physical cards, built once. All hands and stacks hold copies of
/// entries from this table.
pub static DECK: Lazy<Vec<Card>> = Lazy::new(|| {
    all::<Color>()
        .flat_map(|color| all::<Rank>().map(move |rank| Card { color, rank }))
        .collect()
});

pub fn card_by_id(id: &str) -> Option<Card> {
    id.parse().ok()
}

pub fn shuffled_stack() -> Vec<Card> {
    let mut stack = DECK.clone();
    stack.shuffle(&mut thread_rng());
    stack
}

/// Builds a stack from four predefined hands (Bottom, Left, Top, Right) given
/// as card ids. Dealing packets of four in seating order reproduces exactly
/// these hands.
pub fn stack_from_hands(hands: &[[&str; HAND_SIZE]; 4]) -> Result<Vec<Card>, DeckError> {
    let mut stack: Vec<Card> = Vec::with_capacity(DECK_SIZE);
    for packet in 0..(HAND_SIZE / DEAL_PACKET) {
        for hand in hands {
            for id in &hand[packet * DEAL_PACKET..(packet + 1) * DEAL_PACKET] {
                let card: Card = id.parse()?;
                if stack.contains(&card) {
                    return Err(DeckError::DuplicateCard(card));
                }
                stack.push(card);
            }
        }
    }
    Ok(stack)
}
