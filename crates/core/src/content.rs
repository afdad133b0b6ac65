use crate::{Edition, Joker, JokerEffect, JokerRarity, SpecialRule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown joker '{0}'")]
    UnknownJoker(String),
    #[error("duplicate joker id '{0}'")]
    DuplicateJoker(String),
}

/// A catalog entry: the template a [`Joker`] instance is stamped from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JokerDef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rarity: JokerRarity,
    #[serde(default)]
    pub effects: Vec<JokerEffect>,
    #[serde(default)]
    pub edition: Option<Edition>,
    #[serde(default)]
    pub counter: Option<f64>,
    #[serde(default)]
    pub special: Option<SpecialRule>,
}

impl JokerDef {
    pub fn instantiate(&self) -> Joker {
        Joker {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            rarity: self.rarity,
            effects: self.effects.clone(),
            edition: self.edition,
            active: true,
            counter: self.counter,
            special: self.special,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    jokers: Vec<JokerDef>,
}

impl Catalog {
    pub fn new(jokers: Vec<JokerDef>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for def in &jokers {
            if !seen.insert(def.id.as_str()) {
                return Err(CatalogError::DuplicateJoker(def.id.clone()));
            }
        }
        Ok(Self { jokers })
    }

    pub fn get(&self, id: &str) -> Option<&JokerDef> {
        self.jokers.iter().find(|def| def.id == id)
    }

    pub fn instantiate(&self, id: &str) -> Result<Joker, CatalogError> {
        self.get(id)
            .map(JokerDef::instantiate)
            .ok_or_else(|| CatalogError::UnknownJoker(id.to_string()))
    }

    pub fn by_rarity(&self, rarity: JokerRarity) -> impl Iterator<Item = &JokerDef> {
        self.jokers.iter().filter(move |def| def.rarity == rarity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &JokerDef> {
        self.jokers.iter()
    }

    pub fn len(&self) -> usize {
        self.jokers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jokers.is_empty()
    }
}
