//! This module provides the deterministic weighted sampler behind the `fact` command.
//!
//! A `FactDeck` picks one fact per seed. The same seed always yields the same
//! fact, so seeding with the day number rotates the fact once a day.
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// A single fun fact with its relative selection weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// The text printed to the terminal.
    pub text: String,
    /// Relative weight. Zero means the fact is never picked.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl Fact {
    pub fn new(text: impl Into<String>, weight: u32) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

/// An ordered collection of facts that can be sampled deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactDeck {
    facts: Vec<Fact>,
}

impl FactDeck {
    pub fn new(facts: Vec<Fact>) -> Self {
        Self { facts }
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// Picks a fact for `seed`, weighted by each fact's `weight`.
    ///
    /// Returns `None` when the deck is empty or every weight is zero.
    pub fn pick(&self, seed: u64) -> Option<&Fact> {
        let distribution = WeightedIndex::new(self.facts.iter().map(|fact| fact.weight)).ok()?;
        let mut rng = StdRng::seed_from_u64(seed);
        self.facts.get(distribution.sample(&mut rng))
    }
}

/// The facts shipped with the terminal when the config provides none.
pub fn default_facts() -> Vec<Fact> {
    vec![
        Fact::new("This terminal is a few hundred lines of Rust pretending to be a shell.", 3),
        Fact::new("Every chart thumbnail on the site is rendered from live data.", 2),
        Fact::new("The holo theme was the first one designed and is still the default.", 2),
        Fact::new("Type 'theme light' if the neon is too much.", 1),
        Fact::new("Tab completes command names; press it twice to see every match.", 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_fact() {
        let deck = FactDeck::new(default_facts());
        for seed in 0..50 {
            assert_eq!(deck.pick(seed), deck.pick(seed));
        }
    }

    #[test]
    fn zero_weight_facts_are_never_picked() {
        let deck = FactDeck::new(vec![
            Fact::new("never", 0),
            Fact::new("always", 5),
            Fact::new("also never", 0),
        ]);
        for seed in 0..200 {
            assert_eq!(deck.pick(seed).map(|f| f.text.as_str()), Some("always"));
        }
    }

    #[test]
    fn empty_or_weightless_deck_picks_nothing() {
        assert!(FactDeck::default().pick(7).is_none());
        let deck = FactDeck::new(vec![Fact::new("a", 0), Fact::new("b", 0)]);
        assert!(deck.pick(7).is_none());
    }

    #[test]
    fn heavier_facts_are_picked_more_often() {
        let deck = FactDeck::new(vec![Fact::new("light", 1), Fact::new("heavy", 9)]);
        let heavy = (0..1000)
            .filter(|seed| deck.pick(*seed).map(|f| f.text.as_str()) == Some("heavy"))
            .count();
        assert!(heavy > 700, "heavy picked only {heavy} times");
    }

    #[test]
    fn weight_defaults_to_one_when_missing() {
        let fact: Fact = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(fact.weight, 1);
    }
}
