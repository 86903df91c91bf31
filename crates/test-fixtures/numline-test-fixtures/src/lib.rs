//! Authored JSON fixtures shared by the numline test suites.
//!
//! `fixtures/manifest.json` at the workspace root names every fixture by kind.
//! Each kind gets a module with `keys`, `json`, `load` and `path`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

/// Fixture name to path relative to `fixtures/`, per kind.
#[derive(Debug, Deserialize)]
struct Manifest {
    diagnostics: BTreeMap<String, String>,
    questions: BTreeMap<String, String>,
    #[serde(default)]
    configs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Diagnostic,
    Question,
    Config,
}

impl Kind {
    fn entries(self) -> &'static BTreeMap<String, String> {
        match self {
            Kind::Diagnostic => &MANIFEST.diagnostics,
            Kind::Question => &MANIFEST.questions,
            Kind::Config => &MANIFEST.configs,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Kind::Diagnostic => "diagnostic",
            Kind::Question => "question set",
            Kind::Config => "round config",
        }
    }

    fn keys(self) -> Vec<String> {
        self.entries().keys().cloned().collect()
    }

    fn path(self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label()))?;
        Ok(PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn json(self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read fixture at {}", path.display()))
    }

    fn load<T: DeserializeOwned>(self, name: &str) -> Result<T> {
        let text = self.json(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {} fixture '{name}'", self.label()))
    }
}

macro_rules! fixture_module {
    ($(#[$doc:meta])* $module:ident => $kind:expr) => {
        $(#[$doc])*
        pub mod $module {
            use super::*;

            /// Fixture names in sorted order.
            pub fn keys() -> Vec<String> {
                $kind.keys()
            }

            pub fn json(name: &str) -> Result<String> {
                $kind.json(name)
            }

            pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
                $kind.load(name)
            }

            pub fn path(name: &str) -> Result<PathBuf> {
                $kind.path(name)
            }
        }
    };
}

fixture_module!(
    /// Placement graphs, one per topic.
    diagnostics => Kind::Diagnostic
);
fixture_module!(
    /// Arrays of authored questions.
    questions => Kind::Question
);
fixture_module!(
    /// Flat `RoundConfig` objects.
    configs => Kind::Config
);
