use crate::{
    Card, EffectKind, EffectTrigger, GameConfig, HandKind, Joker, JokerEffect, Rank, RuleEffect,
    Score, ScoreTraceStep, SpecialRule,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ScoreTables {
    hand_rules: HashMap<HandKind, (i64, f64)>,
    hand_level_rules: HashMap<HandKind, (i64, f64)>,
    rank_chips: HashMap<Rank, i64>,
}

impl ScoreTables {
    pub fn from_config(config: &GameConfig) -> Self {
        let mut hand_rules = HashMap::new();
        let mut hand_level_rules = HashMap::new();
        for hand in &config.hands {
            if let Some(kind) = HandKind::from_id(&hand.id) {
                hand_rules.insert(kind, (hand.base_chips, hand.base_mult));
                hand_level_rules.insert(kind, (hand.level_chips, hand.level_mult));
            }
        }
        let mut rank_chips = HashMap::new();
        for rank in &config.ranks {
            rank_chips.insert(rank.rank, rank.chips);
        }
        Self {
            hand_rules,
            hand_level_rules,
            rank_chips,
        }
    }

    pub fn hand_base(&self, kind: HandKind) -> (i64, f64) {
        self.hand_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_hand_base(kind))
    }

    pub fn level_bonus(&self, kind: HandKind) -> (i64, f64) {
        self.hand_level_rules
            .get(&kind)
            .copied()
            .unwrap_or_else(|| default_level_bonus(kind))
    }

    /// Base pair scaled by hand level. A level of 0 is a caller error; the
    /// bonus term goes negative and the arithmetic is performed as-is.
    pub fn hand_base_for_level(&self, kind: HandKind, level: u32) -> (i64, f64) {
        let (base_chips, base_mult) = self.hand_base(kind);
        let (level_chips, level_mult) = self.level_bonus(kind);
        let extra = level as i64 - 1;
        let chips = base_chips.saturating_add(level_chips.saturating_mul(extra));
        let mult = base_mult + level_mult * extra as f64;
        (chips, mult)
    }

    pub fn rank_chips(&self, rank: Rank) -> i64 {
        self.rank_chips
            .get(&rank)
            .copied()
            .unwrap_or_else(|| default_rank_chips(rank))
    }
}

/// Everything the engine needs for one scoring call. Callers rebuild it each
/// time; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringContext {
    #[serde(default)]
    pub played: Vec<Card>,
    #[serde(default)]
    pub held: Vec<Card>,
    #[serde(default)]
    pub jokers: Vec<Joker>,
    pub hand: HandKind,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub discards: u8,
    #[serde(default)]
    pub money: i64,
}

fn default_level() -> u32 {
    1
}

impl ScoringContext {
    pub fn new(hand: HandKind) -> Self {
        Self {
            played: Vec::new(),
            held: Vec::new(),
            jokers: Vec::new(),
            hand,
            level: 1,
            discards: 0,
            money: 0,
        }
    }
}

/// The game-state slice a single effect evaluation may read.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext<'a> {
    pub scoring: &'a [Card],
    pub held: &'a [Card],
    pub hand: HandKind,
    pub discards: u8,
    pub money: i64,
    pub active_jokers: usize,
}

/// Resolved magnitudes for one effect. Components at their identity value
/// (0 chips, 0 mult, x1) are skipped by the fold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectOutcome {
    pub chips: i64,
    pub mult: f64,
    pub x_mult: f64,
}

impl EffectOutcome {
    pub const NONE: EffectOutcome = EffectOutcome {
        chips: 0,
        mult: 0.0,
        x_mult: 1.0,
    };
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub hand: HandKind,
    pub level: u32,
    pub base: Score,
    pub card_chips: i64,
    pub card_mult: f64,
    pub joker_chips: i64,
    pub joker_mult: f64,
    pub joker_x_mult: f64,
    pub final_chips: i64,
    /// Running mult rounded to 2 decimals, for display only. The total is
    /// always computed from the unrounded value.
    pub final_mult: f64,
    pub total_score: i64,
    pub steps: Vec<ScoreTraceStep>,
}

/// Score one hand: base values, per-card contributions, held-card effects,
/// then the joker list in strict left-to-right order. Every non-trivial
/// sub-effect is folded into the running totals immediately and recorded as
/// one trace step, so the step list replays the exact evaluation order.
pub fn score_hand(ctx: &ScoringContext, tables: &ScoreTables) -> ScoreBreakdown {
    let scoring: Vec<Card> = ctx.played.iter().copied().filter(|c| c.scoring).collect();
    let active: Vec<&Joker> = ctx.jokers.iter().filter(|j| j.active).collect();

    let mut steps = Vec::new();

    let (base_chips, base_mult) = tables.hand_base_for_level(ctx.hand, ctx.level);
    let base = Score {
        chips: base_chips,
        mult: base_mult,
    };
    let mut score = Score {
        chips: 0,
        mult: base_mult,
    };
    apply_step(
        &mut steps,
        &mut score,
        format!("{} (Lvl {})", ctx.hand.display_name(), ctx.level),
        RuleEffect::AddChips(base_chips),
    );

    let (card_chips, card_mult) = resolve_cards(&scoring, &ctx.held, tables, &mut score, &mut steps);

    let mut joker_chips = 0i64;
    let mut joker_mult = 0.0f64;
    let mut joker_x_mult = 1.0f64;

    let effect_ctx = EffectContext {
        scoring: &scoring,
        held: &ctx.held,
        hand: ctx.hand,
        discards: ctx.discards,
        money: ctx.money,
        active_jokers: active.len(),
    };

    for joker in &active {
        for effect in &joker.effects {
            let outcome = evaluate_effect(joker, effect, &effect_ctx);
            if outcome.chips > 0 {
                joker_chips += outcome.chips;
                apply_step(
                    &mut steps,
                    &mut score,
                    joker.name.clone(),
                    RuleEffect::AddChips(outcome.chips),
                );
            }
            if outcome.mult > 0.0 {
                joker_mult += outcome.mult;
                apply_step(
                    &mut steps,
                    &mut score,
                    joker.name.clone(),
                    RuleEffect::AddMult(outcome.mult),
                );
            }
            if outcome.x_mult > 1.0 {
                joker_x_mult *= outcome.x_mult;
                apply_step(
                    &mut steps,
                    &mut score,
                    joker.name.clone(),
                    RuleEffect::MultiplyMult(outcome.x_mult),
                );
            }
        }

        if let Some(edition) = joker.edition {
            let triple = edition.effect();
            let label = format!("{} ({})", joker.name, edition.name());
            if triple.chips > 0 {
                joker_chips += triple.chips;
                apply_step(
                    &mut steps,
                    &mut score,
                    label.clone(),
                    RuleEffect::AddChips(triple.chips),
                );
            }
            if triple.mult > 0.0 {
                joker_mult += triple.mult;
                apply_step(
                    &mut steps,
                    &mut score,
                    label.clone(),
                    RuleEffect::AddMult(triple.mult),
                );
            }
            if triple.x_mult > 1.0 {
                joker_x_mult *= triple.x_mult;
                apply_step(
                    &mut steps,
                    &mut score,
                    label,
                    RuleEffect::MultiplyMult(triple.x_mult),
                );
            }
        }
    }

    ScoreBreakdown {
        hand: ctx.hand,
        level: ctx.level,
        base,
        card_chips,
        card_mult,
        joker_chips,
        joker_mult,
        joker_x_mult,
        final_chips: score.chips,
        final_mult: (score.mult * 100.0).round() / 100.0,
        total_score: score.total(),
        steps,
    }
}

/// Per-card contributions: rank chips for every scoring card, then each
/// card's enhancement/edition effects in list order, then held-card steel.
/// Returns the card chip and flat-mult subtotals.
fn resolve_cards(
    scoring: &[Card],
    held: &[Card],
    tables: &ScoreTables,
    score: &mut Score,
    steps: &mut Vec<ScoreTraceStep>,
) -> (i64, f64) {
    let mut card_chips = 0i64;
    let mut card_mult = 0.0f64;

    // Rank chips first, stone cards excepted.
    for card in scoring {
        if card.is_stone() {
            continue;
        }
        let chips = tables.rank_chips(card.rank);
        card_chips += chips;
        apply_step(
            steps,
            score,
            format!("{} card", card.rank.label()),
            RuleEffect::AddChips(chips),
        );
    }

    // Enhancement and edition effects, card by card. Both axes apply; order
    // within a card is chips, mult, then multipliers.
    for card in scoring {
        let enhancement = card.enhancement_effect();
        let edition = card.edition_effect();
        let enhancement_name = card.enhancement.map(|e| e.name()).unwrap_or("");
        let edition_name = card.edition.map(|e| e.name()).unwrap_or("");

        if enhancement.chips > 0 {
            card_chips += enhancement.chips;
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), enhancement_name),
                RuleEffect::AddChips(enhancement.chips),
            );
        }
        if edition.chips > 0 {
            card_chips += edition.chips;
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), edition_name),
                RuleEffect::AddChips(edition.chips),
            );
        }
        if enhancement.mult > 0.0 {
            card_mult += enhancement.mult;
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), enhancement_name),
                RuleEffect::AddMult(enhancement.mult),
            );
        }
        if edition.mult > 0.0 {
            card_mult += edition.mult;
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), edition_name),
                RuleEffect::AddMult(edition.mult),
            );
        }
        if enhancement.x_mult > 1.0 {
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), enhancement_name),
                RuleEffect::MultiplyMult(enhancement.x_mult),
            );
        }
        if edition.x_mult > 1.0 {
            apply_step(
                steps,
                score,
                format!("{} {}", card.rank.label(), edition_name),
                RuleEffect::MultiplyMult(edition.x_mult),
            );
        }
    }

    // Held-card effects ignore the scoring flag and the played cards
    // entirely. Steel is the only enhancement that scores from the hand.
    for card in held {
        if card.enhancement == Some(crate::Enhancement::Steel) {
            let x_mult = crate::Enhancement::Steel.effect().x_mult;
            apply_step(
                steps,
                score,
                format!("{} Steel (held)", card.rank.label()),
                RuleEffect::MultiplyMult(x_mult),
            );
        }
    }

    (card_chips, card_mult)
}

fn apply_step(
    steps: &mut Vec<ScoreTraceStep>,
    score: &mut Score,
    source: String,
    effect: RuleEffect,
) {
    let before = score.clone();
    score.apply(&effect);
    steps.push(ScoreTraceStep {
        source,
        effect,
        before,
        after: score.clone(),
    });
}

/// Resolve one effect against the context. Pure; any trigger/kind pairing
/// without a rule falls through to the identity outcome rather than failing.
pub fn evaluate_effect(
    joker: &Joker,
    effect: &JokerEffect,
    ctx: &EffectContext<'_>,
) -> EffectOutcome {
    let mut out = EffectOutcome::NONE;
    let condition = effect.condition.as_ref();

    match effect.trigger {
        EffectTrigger::Always => {
            if joker.special == Some(SpecialRule::PerJokerCount) {
                // Special rules own the trigger outright; a kind they do not
                // cover contributes nothing.
                if effect.kind == EffectKind::AdditiveMult {
                    out.mult = effect.value * ctx.active_jokers as f64;
                }
            } else if let Some(counter) = joker
                .counter
                .filter(|_| effect.kind == EffectKind::AdditiveChips)
            {
                out.chips = to_chips(counter);
            } else if let Some(counter) = joker
                .counter
                .filter(|_| effect.kind == EffectKind::MultiplicativeMult)
            {
                out.x_mult = counter;
            } else {
                apply_direct(&mut out, effect.kind, effect.value);
            }
        }
        EffectTrigger::HandPlayed => {
            let matched = condition.is_some_and(|c| c.hand_types.contains(&ctx.hand));
            if matched {
                apply_direct(&mut out, effect.kind, effect.value);
            }
        }
        EffectTrigger::PerSuit => {
            if let Some(cond) = condition.filter(|c| c.per_card && !c.suits.is_empty()) {
                let count = ctx
                    .scoring
                    .iter()
                    .filter(|card| cond.suits.contains(&card.suit))
                    .count();
                apply_per_card(&mut out, effect.kind, effect.value, count);
            }
        }
        EffectTrigger::PerRank => {
            if let Some(cond) = condition.filter(|c| c.per_card && !c.ranks.is_empty()) {
                let count = ctx
                    .scoring
                    .iter()
                    .filter(|card| cond.ranks.contains(&card.rank))
                    .count();
                apply_per_card(&mut out, effect.kind, effect.value, count);
            }
        }
        EffectTrigger::PerDiscard => {
            if condition.and_then(|c| c.max_cards) == Some(0) {
                // Pays out only once the discards are spent.
                if ctx.discards == 0 && effect.kind == EffectKind::AdditiveMult {
                    out.mult = effect.value;
                }
            } else if effect.kind == EffectKind::AdditiveChips {
                out.chips = to_chips(effect.value * ctx.discards as f64);
            }
        }
        EffectTrigger::OnScored => {
            if let Some(max) = condition.and_then(|c| c.max_cards) {
                if ctx.scoring.len() <= max as usize && effect.kind == EffectKind::AdditiveMult {
                    out.mult = effect.value;
                }
            }
        }
        EffectTrigger::HeldInHand => {
            if let Some(cond) = condition {
                if cond.per_card && !cond.ranks.is_empty() {
                    let count = ctx
                        .held
                        .iter()
                        .filter(|card| cond.ranks.contains(&card.rank))
                        .count();
                    if effect.kind == EffectKind::MultiplicativeMult && count > 0 {
                        out.x_mult = effect.value.powi(count as i32);
                    }
                } else if !cond.suits.is_empty() {
                    let all_match = !ctx.held.is_empty()
                        && ctx.held.iter().all(|card| cond.suits.contains(&card.suit));
                    if all_match && effect.kind == EffectKind::MultiplicativeMult {
                        out.x_mult = effect.value;
                    }
                }
            }
        }
        EffectTrigger::Economy => {
            if effect.kind == EffectKind::AdditiveChips {
                out.chips = to_chips(effect.value * ctx.money as f64);
            }
        }
        EffectTrigger::PerCard => {}
    }

    out
}

fn apply_direct(out: &mut EffectOutcome, kind: EffectKind, value: f64) {
    match kind {
        EffectKind::AdditiveChips => out.chips = to_chips(value),
        EffectKind::AdditiveMult => out.mult = value,
        EffectKind::MultiplicativeMult => out.x_mult = value,
        EffectKind::Conditional => {}
    }
}

fn apply_per_card(out: &mut EffectOutcome, kind: EffectKind, value: f64, count: usize) {
    match kind {
        EffectKind::AdditiveChips => out.chips = to_chips(value * count as f64),
        EffectKind::AdditiveMult => out.mult = value * count as f64,
        EffectKind::MultiplicativeMult => {
            // Multiplicative per-card effects compound.
            if count > 0 {
                out.x_mult = value.powi(count as i32);
            }
        }
        EffectKind::Conditional => {}
    }
}

fn to_chips(value: f64) -> i64 {
    value.floor() as i64
}

fn default_hand_base(kind: HandKind) -> (i64, f64) {
    match kind {
        HandKind::HighCard => (5, 1.0),
        HandKind::Pair => (10, 2.0),
        HandKind::TwoPair => (20, 2.0),
        HandKind::ThreeOfAKind => (30, 3.0),
        HandKind::Straight => (30, 4.0),
        HandKind::Flush => (35, 4.0),
        HandKind::FullHouse => (40, 4.0),
        HandKind::FourOfAKind => (60, 7.0),
        HandKind::StraightFlush | HandKind::RoyalFlush => (100, 8.0),
        HandKind::FiveOfAKind => (120, 12.0),
        HandKind::FlushHouse => (140, 14.0),
        HandKind::FlushFive => (160, 16.0),
    }
}

fn default_level_bonus(kind: HandKind) -> (i64, f64) {
    match kind {
        HandKind::HighCard => (10, 1.0),
        HandKind::Pair => (15, 1.0),
        HandKind::TwoPair => (20, 1.0),
        HandKind::ThreeOfAKind => (20, 2.0),
        HandKind::Straight => (30, 3.0),
        HandKind::Flush => (15, 2.0),
        HandKind::FullHouse => (25, 2.0),
        HandKind::FourOfAKind => (30, 3.0),
        HandKind::StraightFlush | HandKind::RoyalFlush => (40, 4.0),
        HandKind::FiveOfAKind => (35, 3.0),
        HandKind::FlushHouse => (40, 4.0),
        HandKind::FlushFive => (40, 3.0),
    }
}

fn default_rank_chips(rank: Rank) -> i64 {
    match rank {
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        Rank::Ace => 11,
    }
}
