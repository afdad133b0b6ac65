use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// A flat (chips, mult, x_mult) contribution. The empty triple is the
/// identity: no chips, no mult, multiplier of one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectTriple {
    pub chips: i64,
    pub mult: f64,
    pub x_mult: f64,
}

impl EffectTriple {
    pub const NONE: EffectTriple = EffectTriple {
        chips: 0,
        mult: 0.0,
        x_mult: 1.0,
    };
}

impl Default for EffectTriple {
    fn default() -> Self {
        Self::NONE
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Enhancement {
    Bonus,
    Mult,
    Wild,
    Glass,
    Steel,
    Stone,
    Gold,
    Lucky,
}

impl Enhancement {
    /// Static scoring contribution. Lucky's random payout is approximated
    /// upstream as catalog data, so its static triple is empty.
    pub fn effect(self) -> EffectTriple {
        match self {
            Enhancement::Bonus => EffectTriple {
                chips: 30,
                ..EffectTriple::NONE
            },
            Enhancement::Mult => EffectTriple {
                mult: 4.0,
                ..EffectTriple::NONE
            },
            Enhancement::Glass => EffectTriple {
                x_mult: 2.0,
                ..EffectTriple::NONE
            },
            Enhancement::Steel => EffectTriple {
                x_mult: 1.5,
                ..EffectTriple::NONE
            },
            Enhancement::Stone => EffectTriple {
                chips: 50,
                ..EffectTriple::NONE
            },
            Enhancement::Wild | Enhancement::Gold | Enhancement::Lucky => EffectTriple::NONE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Enhancement::Bonus => "Bonus",
            Enhancement::Mult => "Mult",
            Enhancement::Wild => "Wild",
            Enhancement::Glass => "Glass",
            Enhancement::Steel => "Steel",
            Enhancement::Stone => "Stone",
            Enhancement::Gold => "Gold",
            Enhancement::Lucky => "Lucky",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Foil,
    Holographic,
    Polychrome,
}

impl Edition {
    pub fn effect(self) -> EffectTriple {
        match self {
            Edition::Foil => EffectTriple {
                chips: 50,
                ..EffectTriple::NONE
            },
            Edition::Holographic => EffectTriple {
                mult: 10.0,
                ..EffectTriple::NONE
            },
            Edition::Polychrome => EffectTriple {
                x_mult: 1.5,
                ..EffectTriple::NONE
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Edition::Foil => "Foil",
            Edition::Holographic => "Holographic",
            Edition::Polychrome => "Polychrome",
        }
    }
}

/// Seals are carried for card identity only; none of them scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Seal {
    Gold,
    Red,
    Blue,
    Purple,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    #[serde(default)]
    pub enhancement: Option<Enhancement>,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default)]
    pub seal: Option<Seal>,
    #[serde(default = "default_scoring")]
    pub scoring: bool,
}

fn default_scoring() -> bool {
    true
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            enhancement: None,
            edition: None,
            seal: None,
            scoring: true,
        }
    }

    pub fn is_stone(&self) -> bool {
        matches!(self.enhancement, Some(Enhancement::Stone))
    }

    pub fn enhancement_effect(&self) -> EffectTriple {
        self.enhancement.map(Enhancement::effect).unwrap_or_default()
    }

    pub fn edition_effect(&self) -> EffectTriple {
        self.edition.map(Edition::effect).unwrap_or_default()
    }
}
