//! # Extraction Orchestrator
//!
//! Runs the strategies in order and merges their partial results. The merge
//! is a two-slot accumulator: once a title has been found, later strategies
//! are only consulted for a description. It never looks backwards, so a
//! description found by an earlier strategy that produced no title is lost.

use crate::strategies::{ExtractionResult, Strategy};
use tracing::{info, warn};

/// The title and description slots filled while walking the strategy chain.
#[derive(Debug, Default)]
struct Accumulator {
    title: Option<String>,
    description: Option<String>,
    /// The description that came with the title, used if nothing better turns up.
    fallback_description: Option<String>,
}

impl Accumulator {
    fn is_complete(&self) -> bool {
        self.title.is_some() && self.description.is_some()
    }

    fn finish(self) -> ExtractionResult {
        match self.title {
            Some(title) => ExtractionResult::from_fields(
                Some(title),
                self.description.or(self.fallback_description),
            ),
            None => ExtractionResult::all_failed(),
        }
    }
}

/// Sequences strategies and merges their outcomes.
pub struct Orchestrator {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Orchestrator {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extracts title and description for `url`. Never fails: strategy errors
    /// are logged and skipped, and total failure yields the failure sentinels.
    pub async fn extract(&self, url: &str) -> ExtractionResult {
        let mut slots = Accumulator::default();

        for strategy in &self.strategies {
            let name = strategy.name();
            let outcome = match strategy.extract(url).await {
                Ok(result) => result.outcome(),
                Err(e) => {
                    warn!("Strategy '{name}' failed: {e}");
                    continue;
                }
            };

            if slots.title.is_none() {
                if outcome.is_complete() {
                    info!("Strategy '{name}' extracted both fields");
                    return outcome.result;
                }
                if outcome.title_found {
                    info!("Strategy '{name}' found a title only, looking further for a description");
                    slots.title = Some(outcome.result.title);
                    slots.fallback_description = Some(outcome.result.description);
                } else {
                    info!("Strategy '{name}' found no title");
                }
                continue;
            }

            if outcome.description_found {
                info!("Strategy '{name}' supplied the missing description");
                slots.description = Some(outcome.result.description);
            }
            if slots.is_complete() {
                break;
            }
        }

        if slots.title.is_none() {
            warn!("All extraction strategies failed for {url}");
        }
        slots.finish()
    }
}
