//! Deck aggregates, status indicators, and the save gate.
//!
//! Everything here is recomputed from the card sequence on demand. Nothing
//! keeps a running total.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, Catalog, Category};
use crate::core::DeckRules;

/// Where an aggregate sits relative to its constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Indicator {
    Under,
    Met,
    Over,
}

/// Aggregates over a card sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Sequence length, dangling references included.
    pub card_count: usize,
    pub total_cost: u32,
    pub unit_count: usize,
    pub leader_count: usize,
}

impl DeckStats {
    /// Aggregate a card sequence. Ids missing from the catalog count toward
    /// `card_count` only.
    pub fn compute<'a, I>(cards: I, catalog: &Catalog) -> Self
    where
        I: IntoIterator<Item = &'a CardId>,
    {
        let mut stats = Self::default();
        for id in cards {
            stats.card_count += 1;
            let Some(card) = catalog.get(id) else {
                continue;
            };
            stats.total_cost += card.cost;
            match card.category {
                Category::Unit => stats.unit_count += 1,
                Category::Leader => stats.leader_count += 1,
                Category::Spell => {}
            }
        }
        stats
    }

    #[must_use]
    pub fn size_indicator(&self, rules: &DeckRules) -> Indicator {
        compare(self.card_count, rules.deck_size)
    }

    #[must_use]
    pub fn leader_indicator(&self, rules: &DeckRules) -> Indicator {
        compare(self.leader_count, rules.leaders_required)
    }

    #[must_use]
    pub fn unit_indicator(&self, rules: &DeckRules) -> Indicator {
        if self.unit_count >= rules.min_units {
            Indicator::Met
        } else {
            Indicator::Under
        }
    }

    #[must_use]
    pub fn cost_indicator(&self, rules: &DeckRules) -> Indicator {
        if self.total_cost > rules.cost_limit {
            Indicator::Over
        } else {
            Indicator::Met
        }
    }
}

fn compare(value: usize, target: usize) -> Indicator {
    match value.cmp(&target) {
        std::cmp::Ordering::Less => Indicator::Under,
        std::cmp::Ordering::Equal => Indicator::Met,
        std::cmp::Ordering::Greater => Indicator::Over,
    }
}

/// A reason the save action is disabled.
///
/// Size and unit count are deliberately absent: they are advisory
/// indicators only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveBlocker {
    MissingName,
    NoCards,
    LeaderCount { found: usize, required: usize },
    CostExceeded { total: u32, limit: u32 },
}

impl std::fmt::Display for SaveBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveBlocker::MissingName => write!(f, "deck needs a name"),
            SaveBlocker::NoCards => write!(f, "deck has no cards"),
            SaveBlocker::LeaderCount { found, required } => {
                write!(f, "deck has {found} leaders, needs {required}")
            }
            SaveBlocker::CostExceeded { total, limit } => {
                write!(f, "deck costs {total}, limit is {limit}")
            }
        }
    }
}

/// Every reason a deck named `name` with `stats` can't be saved.
/// Empty means saveable.
#[must_use]
pub fn save_blockers(name: &str, stats: &DeckStats, rules: &DeckRules) -> Vec<SaveBlocker> {
    let mut blockers = Vec::new();
    if name.trim().is_empty() {
        blockers.push(SaveBlocker::MissingName);
    }
    if stats.card_count == 0 {
        blockers.push(SaveBlocker::NoCards);
    }
    if stats.leader_count != rules.leaders_required {
        blockers.push(SaveBlocker::LeaderCount {
            found: stats.leader_count,
            required: rules.leaders_required,
        });
    }
    if stats.total_cost > rules.cost_limit {
        blockers.push(SaveBlocker::CostExceeded {
            total: stats.total_cost,
            limit: rules.cost_limit,
        });
    }
    blockers
}
