use anyhow::{bail, Context};
use chipfold_core::{Catalog, GameConfig, HandKind, HandRule, JokerDef, RankRule};

const HANDS_JSON: &[u8] = include_bytes!("../hands.json");
const RANKS_JSON: &[u8] = include_bytes!("../ranks.json");
const JOKERS_JSON: &[u8] = include_bytes!("../jokers.json");

/// Load the embedded hand/rank value tables.
pub fn load_game_config() -> GameConfig {
    parse_game_config(HANDS_JSON, RANKS_JSON).expect("built-in game config must be valid")
}

/// Load the embedded joker catalog.
pub fn load_catalog() -> Catalog {
    parse_catalog(JOKERS_JSON).expect("built-in joker catalog must be valid")
}

/// Parse replacement table JSON, e.g. for rebalanced content. Every hand id
/// must name a known hand kind.
pub fn parse_game_config(hands_json: &[u8], ranks_json: &[u8]) -> anyhow::Result<GameConfig> {
    let hands: Vec<HandRule> =
        serde_json::from_slice(hands_json).context("parse hands JSON")?;
    for hand in &hands {
        if HandKind::from_id(&hand.id).is_none() {
            bail!("unknown hand id '{}'", hand.id);
        }
    }
    let ranks: Vec<RankRule> =
        serde_json::from_slice(ranks_json).context("parse ranks JSON")?;
    Ok(GameConfig { hands, ranks })
}

/// Parse replacement catalog JSON. Ids must be unique; conditions are
/// enum-checked during deserialization.
pub fn parse_catalog(bytes: &[u8]) -> anyhow::Result<Catalog> {
    let defs: Vec<JokerDef> = serde_json::from_slice(bytes).context("parse jokers JSON")?;
    let catalog = Catalog::new(defs).context("validate joker catalog")?;
    Ok(catalog)
}
