use crate::{Edition, HandKind, Rank, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum JokerRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl JokerRarity {
    pub const ALL: [JokerRarity; 4] = [
        JokerRarity::Common,
        JokerRarity::Uncommon,
        JokerRarity::Rare,
        JokerRarity::Legendary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            JokerRarity::Common => "Common",
            JokerRarity::Uncommon => "Uncommon",
            JokerRarity::Rare => "Rare",
            JokerRarity::Legendary => "Legendary",
        }
    }
}

/// Which accumulator bucket a resolved magnitude lands in. `Conditional` is
/// reserved by the catalog format and currently resolves to nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    AdditiveChips,
    AdditiveMult,
    MultiplicativeMult,
    Conditional,
}

/// Which evaluation rule computes an effect's magnitude. `PerCard` has no
/// rule yet; effects carrying it evaluate to nothing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EffectTrigger {
    Always,
    OnScored,
    PerCard,
    PerSuit,
    PerRank,
    PerDiscard,
    HandPlayed,
    HeldInHand,
    Economy,
}

/// Optional filter narrowing what an effect's trigger counts. Absent fields
/// mean "no filter". `min_cards` is accepted for catalog compatibility but
/// no current trigger rule reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EffectCondition {
    #[serde(default)]
    pub suits: Vec<Suit>,
    #[serde(default)]
    pub ranks: Vec<Rank>,
    #[serde(default)]
    pub hand_types: Vec<HandKind>,
    #[serde(default)]
    pub min_cards: Option<u8>,
    #[serde(default)]
    pub max_cards: Option<u8>,
    #[serde(default)]
    pub per_card: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerEffect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub trigger: EffectTrigger,
    pub value: f64,
    #[serde(default)]
    pub condition: Option<EffectCondition>,
}

/// Closed set of per-joker evaluation overrides for the `Always` trigger.
/// Carried as catalog data on the joker itself; adding a behavior that the
/// generic trigger table cannot express means adding a variant here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRule {
    /// Scale an additive-mult magnitude by the number of active jokers.
    PerJokerCount,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Joker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rarity: JokerRarity,
    #[serde(default)]
    pub effects: Vec<JokerEffect>,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Accumulated state supplied by the caller (e.g. "+4 chips per hand
    /// played so far"). The engine reads it; it never writes it.
    #[serde(default)]
    pub counter: Option<f64>,
    #[serde(default)]
    pub special: Option<SpecialRule>,
}

fn default_active() -> bool {
    true
}
