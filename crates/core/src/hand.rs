use serde::{Deserialize, Serialize};

/// The hand type is an input: whoever builds the [`crate::ScoringContext`]
/// has already decided what was played. This module only names the closed
/// set of kinds and their stable ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandKind {
    HighCard,
    Pair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    RoyalFlush,
    FiveOfAKind,
    FlushHouse,
    FlushFive,
}

impl HandKind {
    pub const ALL: [HandKind; 13] = [
        HandKind::HighCard,
        HandKind::Pair,
        HandKind::TwoPair,
        HandKind::ThreeOfAKind,
        HandKind::Straight,
        HandKind::Flush,
        HandKind::FullHouse,
        HandKind::FourOfAKind,
        HandKind::StraightFlush,
        HandKind::RoyalFlush,
        HandKind::FiveOfAKind,
        HandKind::FlushHouse,
        HandKind::FlushFive,
    ];

    pub fn id(self) -> &'static str {
        match self {
            HandKind::HighCard => "high_card",
            HandKind::Pair => "pair",
            HandKind::TwoPair => "two_pair",
            HandKind::ThreeOfAKind => "three_of_a_kind",
            HandKind::Straight => "straight",
            HandKind::Flush => "flush",
            HandKind::FullHouse => "full_house",
            HandKind::FourOfAKind => "four_of_a_kind",
            HandKind::StraightFlush => "straight_flush",
            HandKind::RoyalFlush => "royal_flush",
            HandKind::FiveOfAKind => "five_of_a_kind",
            HandKind::FlushHouse => "flush_house",
            HandKind::FlushFive => "flush_five",
        }
    }

    pub fn from_id(id: &str) -> Option<HandKind> {
        HandKind::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            HandKind::HighCard => "High Card",
            HandKind::Pair => "Pair",
            HandKind::TwoPair => "Two Pair",
            HandKind::ThreeOfAKind => "Three of a Kind",
            HandKind::Straight => "Straight",
            HandKind::Flush => "Flush",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
            HandKind::RoyalFlush => "Royal Flush",
            HandKind::FiveOfAKind => "Five of a Kind",
            HandKind::FlushHouse => "Flush House",
            HandKind::FlushFive => "Flush Five",
        }
    }
}
