//! Configuration for extracting and normalizing a statement.
//!
//! Every setting has a default, so a configuration file only needs to mention what it changes.

use std::{fs::File, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Currency of the account that proceeds are paid into, unless configured otherwise.
pub const DEFAULT_HOME_CURRENCY: &str = "CHF";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Currency code that marks an entry in the "Cash / Units" column as net proceeds. Any other
    /// entry in that column must be a bare number of units.
    pub home_currency: String,
    /// Tabula extraction algorithm.
    pub extraction_method: TabulaExtractionMethod,
    /// Whether Tabula guesses the table areas on each page.
    pub guess: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_currency: DEFAULT_HOME_CURRENCY.to_string(),
            extraction_method: TabulaExtractionMethod::Guess,
            guess: true,
        }
    }
}

impl Config {
    /// Reads a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening configuration file {path:?}"))?;
        serde_yaml_ng::from_reader(file)
            .with_context(|| format!("parsing configuration file {path:?}"))
    }

    /// Reads the configuration at `path` if given, otherwise uses the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Extraction algorithm for Tabula to use.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TabulaExtractionMethod {
    Guess,
    Lattice,
    Stream,
}

impl TabulaExtractionMethod {
    pub fn to_tabula_extraction_method(self) -> tabula::ExtractionMethod {
        match self {
            TabulaExtractionMethod::Stream => tabula::ExtractionMethod::Basic,
            TabulaExtractionMethod::Guess => tabula::ExtractionMethod::Decide,
            TabulaExtractionMethod::Lattice => tabula::ExtractionMethod::Spreadsheet,
        }
    }
}
