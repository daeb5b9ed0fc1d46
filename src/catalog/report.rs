//! Per-item outcomes of a seed run
//!
//! Seeding is lenient: one bad effect does not stop its card and one bad card
//! does not stop the batch. Every attempt is recorded here instead.

use crate::core::{CardId, EffectId, LinkId, WrapperId};
use crate::SeedError;

/// What happened to one effect input
#[derive(Debug)]
pub enum EffectOutcome {
    Linked { effect_id: EffectId, link_id: LinkId },
    Skipped { index: usize, error: SeedError },
}

impl EffectOutcome {
    pub fn is_linked(&self) -> bool {
        matches!(self, EffectOutcome::Linked { .. })
    }
}

/// Result of attaching an effect bundle to one card
#[derive(Debug)]
pub struct AttachReport {
    pub wrapper_id: WrapperId,
    /// One outcome per effect input, in input order
    pub outcomes: Vec<EffectOutcome>,
}

impl AttachReport {
    pub fn linked(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_linked()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.linked()
    }

    pub fn link_ids(&self) -> Vec<LinkId> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                EffectOutcome::Linked { link_id, .. } => Some(*link_id),
                EffectOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}

/// What happened to one card
#[derive(Debug)]
pub enum CardOutcome {
    Created {
        name: String,
        card_id: CardId,
        attach: AttachReport,
    },
    /// Card was written but its effect wrapper could not be
    Incomplete {
        name: String,
        card_id: CardId,
        error: SeedError,
    },
    /// Name already in the catalog; nothing was written
    Duplicate { name: String },
    Failed { name: String, error: SeedError },
}

impl CardOutcome {
    pub fn name(&self) -> &str {
        match self {
            CardOutcome::Created { name, .. }
            | CardOutcome::Incomplete { name, .. }
            | CardOutcome::Duplicate { name }
            | CardOutcome::Failed { name, .. } => name,
        }
    }

    pub fn card_id(&self) -> Option<CardId> {
        match self {
            CardOutcome::Created { card_id, .. } | CardOutcome::Incomplete { card_id, .. } => {
                Some(*card_id)
            }
            CardOutcome::Duplicate { .. } | CardOutcome::Failed { .. } => None,
        }
    }
}

/// Outcome of a whole batch
#[derive(Debug, Default)]
pub struct SeedReport {
    pub outcomes: Vec<CardOutcome>,
    /// Source rows rejected before reaching the builder
    pub rejected_rows: usize,
}

impl SeedReport {
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Created { .. }))
    }

    pub fn incomplete(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Incomplete { .. }))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Duplicate { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CardOutcome::Failed { .. }))
    }

    /// Effects linked across every created card
    pub fn effects_linked(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                CardOutcome::Created { attach, .. } => attach.linked(),
                _ => 0,
            })
            .sum()
    }

    pub fn effects_skipped(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                CardOutcome::Created { attach, .. } => attach.skipped(),
                _ => 0,
            })
            .sum()
    }

    /// Ids of cards that made it into the catalog
    pub fn card_ids(&self) -> Vec<CardId> {
        self.outcomes.iter().filter_map(CardOutcome::card_id).collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} created, {} incomplete, {} duplicates skipped, {} failed, {} rows rejected; {} effects linked, {} skipped",
            self.created(),
            self.incomplete(),
            self.duplicates(),
            self.failed(),
            self.rejected_rows,
            self.effects_linked(),
            self.effects_skipped(),
        )
    }

    fn count(&self, pred: impl Fn(&CardOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let report = SeedReport {
            outcomes: vec![
                CardOutcome::Created {
                    name: "Warg Rider".into(),
                    card_id: CardId::new(),
                    attach: AttachReport {
                        wrapper_id: WrapperId::new(),
                        outcomes: vec![
                            EffectOutcome::Linked {
                                effect_id: EffectId::new(),
                                link_id: LinkId::new(),
                            },
                            EffectOutcome::Skipped {
                                index: 1,
                                error: SeedError::UnrecognizedEffectKind("Unknown".into()),
                            },
                        ],
                    },
                },
                CardOutcome::Duplicate {
                    name: "Blizzard".into(),
                },
            ],
            rejected_rows: 2,
        };

        assert_eq!(report.created(), 1);
        assert_eq!(report.duplicates(), 1);
        assert_eq!(report.failed(), 0);
        assert_eq!(report.effects_linked(), 1);
        assert_eq!(report.effects_skipped(), 1);
        assert_eq!(report.card_ids().len(), 1);
        assert!(report.summary().contains("2 rows rejected"));
    }
}
