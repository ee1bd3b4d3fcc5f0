use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::catalog::{TraitCategory, TRAIT_KEYS};

pub const TRAIT_MIN: i32 = 0;
pub const TRAIT_MAX: i32 = 100;

fn clamp_score(value: i64) -> i32 {
    value.clamp(TRAIT_MIN as i64, TRAIT_MAX as i64) as i32
}

/// Full fine-grained personality profile.
///
/// Holds every catalog key at all times; writes to unknown keys are ignored and
/// every write is clamped to `[0, 100]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(into = "BTreeMap<String, i64>", from = "BTreeMap<String, i64>")]
pub struct TraitVector {
    values: BTreeMap<&'static str, i32>,
}

impl TraitVector {
    pub fn new() -> Self {
        let values = TRAIT_KEYS
            .into_iter()
            .map(|key| {
                let default = TraitCategory::of_key(key)
                    .map(|c| c.default_value())
                    .unwrap_or(50);
                (key, default)
            })
            .collect();
        Self { values }
    }

    /// Rebuild from a persisted map. Missing keys keep their defaults, unknown keys are dropped.
    pub fn from_map(map: &BTreeMap<String, i64>) -> Self {
        let mut vector = Self::new();
        for (key, value) in map {
            vector.set(key, *value);
        }
        vector
    }

    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.values
            .iter()
            .map(|(k, v)| (k.to_string(), *v as i64))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.values.get(key).copied()
    }

    /// Current value, or 0 for a key outside the catalog
    pub fn value(&self, key: &str) -> i32 {
        self.get(key).unwrap_or(0)
    }

    /// Overwrite a variable. Returns false when `key` is not in the catalog.
    pub fn set(&mut self, key: &str, value: i64) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = clamp_score(value);
                true
            }
            None => false,
        }
    }

    /// Add `amount` to a variable and clamp. Returns false when `key` is not in the catalog.
    pub fn apply_delta(&mut self, key: &str, amount: i32) -> bool {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = clamp_score(*slot as i64 + amount as i64);
                true
            }
            None => false,
        }
    }

    /// Mean of every variable whose key starts with `prefix`; 0.0 when nothing matches.
    pub fn category_average(&self, prefix: &str) -> f64 {
        let (sum, count) = self
            .values
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .fold((0i64, 0usize), |(sum, count), (_, v)| (sum + *v as i64, count + 1));

        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }

    pub fn average_of(&self, category: TraitCategory) -> f64 {
        self.category_average(category.prefix())
    }

    /// Mean over an explicit key list, ignoring unknown keys; 0.0 when none are known.
    pub fn mean_of(&self, keys: &[&str]) -> f64 {
        let known: Vec<i32> = keys.iter().filter_map(|k| self.get(k)).collect();
        if known.is_empty() {
            0.0
        } else {
            known.iter().map(|v| *v as f64).sum::<f64>() / known.len() as f64
        }
    }

    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.values
            .keys()
            .copied()
            .filter(move |k| k.starts_with(prefix))
    }

    /// Highest `n` variables under `prefix`, ties broken by key order.
    pub fn top(&self, prefix: &str, n: usize) -> Vec<(&'static str, i32)> {
        let mut matching: Vec<(&'static str, i32)> = self
            .values
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (*k, *v))
            .collect();
        matching.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        matching.truncate(n);
        matching
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for TraitVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, i64>> for TraitVector {
    fn from(map: BTreeMap<String, i64>) -> Self {
        TraitVector::from_map(&map)
    }
}

impl From<TraitVector> for BTreeMap<String, i64> {
    fn from(vector: TraitVector) -> Self {
        vector.to_map()
    }
}
