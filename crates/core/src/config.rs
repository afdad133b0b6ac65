use crate::Rank;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRule {
    pub id: String,
    pub display_name: String,
    pub base_chips: i64,
    pub base_mult: f64,
    #[serde(default)]
    pub level_chips: i64,
    #[serde(default)]
    pub level_mult: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankRule {
    pub rank: Rank,
    pub chips: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub hands: Vec<HandRule>,
    pub ranks: Vec<RankRule>,
}
