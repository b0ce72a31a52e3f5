//! Catalog model and YAML loading.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use garden_core::{EmotionalState, StateMeta, TransitionInsight};
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::validation::validate;

/// The catalog shipped with the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../catalog.yaml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// On-disk layout of a catalog file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogFile {
    states: BTreeMap<EmotionalState, StateMeta>,
    #[serde(default)]
    transitions: Vec<TransitionEntry>,
    fallback: TransitionInsight,
    #[serde(default)]
    responses: BTreeMap<EmotionalState, Vec<String>>,
    #[serde(default)]
    follow_ups: BTreeMap<EmotionalState, String>,
}

#[derive(Debug, Deserialize)]
struct TransitionEntry {
    from: EmotionalState,
    to: EmotionalState,
    #[serde(flatten)]
    insight: TransitionInsight,
}

/// State metadata, transition narratives, and canned responses.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub(crate) states: BTreeMap<EmotionalState, StateMeta>,
    pub(crate) transitions: HashMap<(EmotionalState, EmotionalState), TransitionInsight>,
    pub(crate) fallback: TransitionInsight,
    pub(crate) responses: BTreeMap<EmotionalState, Vec<String>>,
    pub(crate) follow_ups: BTreeMap<EmotionalState, String>,
    /// Pairs listed more than once in the source file.
    pub(crate) duplicate_pairs: Vec<(EmotionalState, EmotionalState)>,
}

impl Catalog {
    /// Parse and validate the embedded default catalog.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog from YAML text.
    pub fn from_yaml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(raw)?;
        let catalog = Self::from_file(file);

        let report = validate(&catalog);
        for warning in &report.warnings {
            warn!(path = %warning.path, message = %warning.message, "Catalog warning");
        }
        if !report.is_valid() {
            let joined = report
                .errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CatalogError::Invalid(joined));
        }
        Ok(catalog)
    }

    /// Load a catalog from `path`, or the embedded default when `path` is `None`.
    pub async fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let Some(path) = path else {
            debug!("No catalog path configured; using embedded catalog");
            return Self::embedded();
        };

        let raw = fs::read_to_string(path).await.map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&raw)?;
        info!(
            path = %path.display(),
            transitions = catalog.transition_count(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Self {
        let mut transitions = HashMap::with_capacity(file.transitions.len());
        let mut duplicate_pairs = Vec::new();
        for entry in file.transitions {
            if transitions
                .insert((entry.from, entry.to), entry.insight)
                .is_some()
            {
                duplicate_pairs.push((entry.from, entry.to));
            }
        }

        Self {
            states: file.states,
            transitions,
            fallback: file.fallback,
            responses: file.responses,
            follow_ups: file.follow_ups,
            duplicate_pairs,
        }
    }

    /// The full metadata table, ordered by state.
    pub fn states(&self) -> &BTreeMap<EmotionalState, StateMeta> {
        &self.states
    }

    pub fn state(&self, state: EmotionalState) -> Option<&StateMeta> {
        self.states.get(&state)
    }

    /// The specific narrative for `from -> to`, if the table has one.
    pub fn transition(
        &self,
        from: EmotionalState,
        to: EmotionalState,
    ) -> Option<&TransitionInsight> {
        self.transitions.get(&(from, to))
    }

    pub fn fallback(&self) -> &TransitionInsight {
        &self.fallback
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// The response pool for `state`; empty when none is configured.
    pub fn responses(&self, state: EmotionalState) -> &[String] {
        self.responses
            .get(&state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn follow_up(&self, state: EmotionalState) -> Option<&str> {
        self.follow_ups.get(&state).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_is_complete() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.states().len(), EmotionalState::ALL.len());
        for state in EmotionalState::ALL {
            assert!(catalog.state(state).is_some(), "missing metadata for {state}");
            assert_eq!(catalog.responses(state).len(), 4, "pool size for {state}");
            assert!(catalog.follow_up(state).is_some(), "missing follow-up for {state}");
        }
        assert_eq!(catalog.transition_count(), 18);
    }

    #[test]
    fn test_transition_lookup_is_ordered() {
        let catalog = Catalog::embedded().unwrap();
        let forward = catalog
            .transition(EmotionalState::Anxious, EmotionalState::Peaceful)
            .unwrap();
        assert_eq!(forward.metaphor, "🌧️ → 🍃");
        assert!(catalog
            .transition(EmotionalState::Peaceful, EmotionalState::Anxious)
            .is_none());
    }

    #[test]
    fn test_state_metadata_fields() {
        let catalog = Catalog::embedded().unwrap();
        let meta = catalog.state(EmotionalState::Uncertain).unwrap();
        assert_eq!(meta.name, "Uncertain");
        assert_eq!(meta.color, "#f5f5f5");
        assert_eq!(meta.particle_effect, "moderate count with subtle presence");

        let json = serde_json::to_value(catalog.states()).unwrap();
        assert_eq!(json["peaceful"]["particleEffect"], "gentle leaves and soft lights");
    }

    #[test]
    fn test_unknown_state_key_is_parse_error() {
        let raw = r#"
states:
  ecstatic: { name: "E", description: "d", icon: "i", color: "c" }
fallback: { insight: "a", prompt: "b", metaphor: "c", affirmation: "d" }
"#;
        assert!(matches!(
            Catalog::from_yaml_str(raw),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_incomplete_catalog_is_rejected() {
        let raw = r#"
states:
  peaceful: { name: "P", description: "d", icon: "i", color: "c" }
fallback: { insight: "a", prompt: "b", metaphor: "c", affirmation: "d" }
"#;
        let err = Catalog::from_yaml_str(raw).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(ref msg) if msg.contains("states.anxious")));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_embedded() {
        let catalog = Catalog::load(None).await.unwrap();
        assert_eq!(catalog.transition_count(), 18);
    }

    #[tokio::test]
    async fn test_load_missing_file_reports_path() {
        let path = Path::new("/nonexistent/garden/catalog.yaml");
        let err = Catalog::load(Some(path)).await.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/garden/catalog.yaml"));
    }
}
