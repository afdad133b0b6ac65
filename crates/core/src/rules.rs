use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Score {
    pub chips: i64,
    pub mult: f64,
}

impl Score {
    pub fn total_raw(&self) -> f64 {
        self.chips as f64 * self.mult
    }

    pub fn total(&self) -> i64 {
        self.total_raw().floor() as i64
    }

    pub fn apply(&mut self, effect: &RuleEffect) {
        match effect {
            RuleEffect::AddChips(value) => self.chips += value,
            RuleEffect::AddMult(value) => self.mult += value,
            RuleEffect::MultiplyMult(value) => self.mult *= value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RuleEffect {
    AddChips(i64),
    AddMult(f64),
    MultiplyMult(f64),
}

/// One applied effect with the running totals around it. The step list is a
/// replayable audit trail: applying each step's effect to its `before`
/// snapshot yields its `after` snapshot, in evaluation order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreTraceStep {
    pub source: String,
    pub effect: RuleEffect,
    pub before: Score,
    pub after: Score,
}
