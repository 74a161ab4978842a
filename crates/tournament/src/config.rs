//! Engine selection and `tournament.toml` loading

use anyhow::Context;
use engine_core::{EngineError, SearchAdapter};
use external_engine::{ExternalEngine, ExternalEngineConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strategy_engines::{Alphabetical, FirstMove, RandomMove};

use crate::match_runner::MatchConfig;

/// One side of a match
///
/// In TOML the variant is picked by `kind`:
///
/// ```toml
/// [engine1]
/// kind = "external"
/// command = "~/bin/engine"
///
/// [engine2]
/// kind = "random"
/// seed = 7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineSpec {
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    Alphabetical,
    FirstMove,
    External(ExternalEngineConfig),
}

impl EngineSpec {
    pub fn build(&self) -> Result<Box<dyn SearchAdapter>, EngineError> {
        Ok(match self {
            EngineSpec::Random { seed: Some(seed) } => Box::new(RandomMove::with_seed(*seed)),
            EngineSpec::Random { seed: None } => Box::new(RandomMove::new()),
            EngineSpec::Alphabetical => Box::new(Alphabetical),
            EngineSpec::FirstMove => Box::new(FirstMove),
            EngineSpec::External(config) => Box::new(ExternalEngine::new(config.clone())?),
        })
    }
}

/// Short command-line form: `random`, `random:<seed>`, `alphabetical`,
/// `first_move`, `external` or `external:<path>`.
impl FromStr for EngineSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((kind, arg)) => (kind, Some(arg)),
            None => (s, None),
        };
        match (kind.to_lowercase().replace('-', "_").as_str(), arg) {
            ("random", None) => Ok(EngineSpec::Random { seed: None }),
            ("random", Some(seed)) => seed
                .parse()
                .map(|seed| EngineSpec::Random { seed: Some(seed) })
                .map_err(|e| format!("bad seed `{seed}`: {e}")),
            ("alphabetical", None) => Ok(EngineSpec::Alphabetical),
            ("first_move" | "first", None) => Ok(EngineSpec::FirstMove),
            ("external", None) => Ok(EngineSpec::External(ExternalEngineConfig::default())),
            ("external", Some(path)) => Ok(EngineSpec::External(
                ExternalEngineConfig::with_command(path),
            )),
            _ => Err(format!("unknown engine `{s}`")),
        }
    }
}

/// Contents of a `tournament.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentFile {
    pub engine1: EngineSpec,
    pub engine2: EngineSpec,
    #[serde(default, rename = "match")]
    pub settings: MatchConfig,
    /// Where to write the JSON results
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl TournamentFile {
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid tournament file")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
