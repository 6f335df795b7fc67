//! This module contains the `fact` command handler.
use anyhow::Result;
use chrono::{Datelike, Local};

use crate::engine::CommandOutput;
use crate::facts::FactDeck;

/// Seed that changes once per local calendar day.
pub(super) fn day_seed() -> u64 {
    Local::now().date_naive().num_days_from_ce().unsigned_abs() as u64
}

/// Prints the fact the deck picks for `seed`.
pub async fn show_fact(deck: &FactDeck, seed: u64) -> Result<CommandOutput> {
    Ok(match deck.pick(seed) {
        Some(fact) => CommandOutput::line(fact.text.clone()),
        None => CommandOutput::line("no facts today"),
    })
}
