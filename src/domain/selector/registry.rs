//! Name-to-factory lookup for selectors.

use crate::domain::selector::builtin;
use crate::domain::selector::config::{is_inactive, parse_entry};
use crate::domain::selector::{NamedSelector, Selector, SelectorError, SelectorParams};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{error, info};

pub type SelectorFactory = fn(&SelectorParams) -> Result<Box<dyn Selector>, SelectorError>;

#[derive(Clone)]
pub struct SelectorRegistry {
    factories: BTreeMap<String, SelectorFactory>,
}

#[derive(Debug)]
pub struct SkippedEntry {
    pub index: usize,
    pub entry: Value,
    pub reason: SelectorError,
}

#[derive(Debug, Default)]
pub struct BuildResult {
    pub selectors: Vec<NamedSelector>,
    pub inactive: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Registry pre-populated with the built-in selectors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtin::register_all(&mut registry);
        registry
    }

    /// Later registrations under the same name replace earlier ones.
    pub fn register(&mut self, name: &str, factory: SelectorFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(
        &self,
        implementation: &str,
        params: &SelectorParams,
    ) -> Result<Box<dyn Selector>, SelectorError> {
        let factory = self
            .factories
            .get(implementation)
            .ok_or_else(|| SelectorError::UnknownImplementation(implementation.to_string()))?;
        factory(params)
    }

    /// Build one selector per active entry, in entry order. Entries that
    /// cannot be parsed, resolved or constructed are logged and skipped.
    pub fn build(&self, entries: &[Value]) -> BuildResult {
        let mut result = BuildResult::default();

        for (index, entry) in entries.iter().enumerate() {
            if is_inactive(entry) {
                info!("selector entry #{index} is deactivated");
                result.inactive += 1;
                continue;
            }

            let built = parse_entry(entry).and_then(|cfg| {
                let selector = self.create(&cfg.implementation, &cfg.params)?;
                Ok(NamedSelector {
                    alias: cfg.alias,
                    implementation: cfg.implementation,
                    selector,
                })
            });

            match built {
                Ok(named) => result.selectors.push(named),
                Err(reason) => {
                    error!("skipping selector entry #{index} {entry}: {reason}");
                    result.skipped.push(SkippedEntry {
                        index,
                        entry: entry.clone(),
                        reason,
                    });
                }
            }
        }

        result
    }
}

impl Default for SelectorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
