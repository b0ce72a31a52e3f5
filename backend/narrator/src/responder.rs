//! Canned response and follow-up selection.

use std::sync::Arc;

use garden_catalog::Catalog;
use garden_core::{EmotionalState, RandomSource};

/// Picks a response from a state's pool through an injected random source.
#[derive(Clone)]
pub struct ResponseSelector {
    catalog: Arc<Catalog>,
    random: Arc<dyn RandomSource>,
}

impl ResponseSelector {
    pub fn new(catalog: Arc<Catalog>, random: Arc<dyn RandomSource>) -> Self {
        Self { catalog, random }
    }

    /// A uniformly chosen member of the state's pool, or `None` if it has no pool.
    pub fn pick_response(&self, state: EmotionalState) -> Option<&str> {
        let pool = self.catalog.responses(state);
        if pool.is_empty() {
            return None;
        }
        pool.get(self.random.index(pool.len())).map(String::as_str)
    }

    /// The state's fixed follow-up prompt.
    pub fn follow_up(&self, state: EmotionalState) -> Option<&str> {
        self.catalog.follow_up(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::SeededRandom;

    struct LastIndex;

    impl RandomSource for LastIndex {
        fn index(&self, len: usize) -> usize {
            len - 1
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::embedded().unwrap())
    }

    #[test]
    fn test_response_is_member_of_pool() {
        let catalog = catalog();
        let selector = ResponseSelector::new(catalog.clone(), Arc::new(SeededRandom::new(3)));
        for state in EmotionalState::ALL {
            for _ in 0..10 {
                let response = selector.pick_response(state).unwrap();
                assert!(catalog.responses(state).iter().any(|r| r == response));
            }
        }
    }

    #[test]
    fn test_injected_source_decides_index() {
        let catalog = catalog();
        let selector = ResponseSelector::new(catalog.clone(), Arc::new(LastIndex));
        assert_eq!(
            selector.pick_response(EmotionalState::Hopeful).unwrap(),
            "Each seed holds potential, just waiting to grow. What hopes are you nurturing?"
        );
    }

    #[test]
    fn test_follow_up_is_deterministic() {
        let selector = ResponseSelector::new(catalog(), Arc::new(SeededRandom::new(1)));
        assert_eq!(
            selector.follow_up(EmotionalState::Overwhelmed),
            Some("Among all that's present, what needs your attention most?")
        );
        assert_eq!(
            selector.follow_up(EmotionalState::Overwhelmed),
            selector.follow_up(EmotionalState::Overwhelmed)
        );
    }
}
