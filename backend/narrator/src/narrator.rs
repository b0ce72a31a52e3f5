//! Transition narration.
//!
//! Pure lookups over the catalog: the ordered pair's narrative when one exists,
//! otherwise the generic fallback. No narrative when the state did not change.

use std::sync::Arc;

use garden_catalog::Catalog;
use garden_core::{EmotionalState, TransitionInsight};
use tracing::debug;

/// Result of narrating a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narration<'a> {
    /// The table has a narrative for this exact pair.
    Specific(&'a TransitionInsight),
    /// No pair entry; the generic record applies.
    Fallback(&'a TransitionInsight),
}

impl<'a> Narration<'a> {
    pub fn insight(&self) -> &'a TransitionInsight {
        match self {
            Narration::Specific(insight) | Narration::Fallback(insight) => insight,
        }
    }

    pub fn is_specific(&self) -> bool {
        matches!(self, Narration::Specific(_))
    }
}

#[derive(Debug, Clone)]
pub struct Narrator {
    catalog: Arc<Catalog>,
}

impl Narrator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Narrate `from -> to`. `None` on a first turn or when nothing changed.
    pub fn narrate(
        &self,
        from: Option<EmotionalState>,
        to: EmotionalState,
    ) -> Option<Narration<'_>> {
        let from = from?;
        if from == to {
            return None;
        }

        match self.catalog.transition(from, to) {
            Some(insight) => Some(Narration::Specific(insight)),
            None => {
                debug!(%from, %to, "No specific transition; using fallback");
                Some(Narration::Fallback(self.catalog.fallback()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrator() -> Narrator {
        Narrator::new(Arc::new(Catalog::embedded().unwrap()))
    }

    #[test]
    fn test_first_turn_has_no_narration() {
        assert!(narrator().narrate(None, EmotionalState::Anxious).is_none());
    }

    #[test]
    fn test_unchanged_state_has_no_narration() {
        let narrator = narrator();
        for state in EmotionalState::ALL {
            assert!(narrator.narrate(Some(state), state).is_none());
        }
    }

    #[test]
    fn test_every_change_is_narrated() {
        let narrator = narrator();
        for from in EmotionalState::ALL {
            for to in EmotionalState::ALL.into_iter().filter(|to| *to != from) {
                let narration = narrator.narrate(Some(from), to).unwrap();
                assert!(!narration.insight().insight.is_empty());
            }
        }
    }

    #[test]
    fn test_specific_pair_and_fallback() {
        let narrator = narrator();

        let specific = narrator
            .narrate(Some(EmotionalState::Processing), EmotionalState::Grateful)
            .unwrap();
        assert!(specific.is_specific());
        assert_eq!(specific.insight().prompt, "What gifts has this journey revealed?");

        let fallback = narrator
            .narrate(Some(EmotionalState::Peaceful), EmotionalState::Anxious)
            .unwrap();
        assert!(!fallback.is_specific());
        assert_eq!(
            fallback.insight().insight,
            "Like seasons in the garden, one state flows into another"
        );
    }
}
