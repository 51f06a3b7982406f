//! Flat named-parameter mapping.
//!
//! Every tuning knob of a run — temperatures, step sizes, chain lengths,
//! budgets — travels through a single read-only `String -> f64` map that is
//! loaded once and passed by reference into every policy call. Problems
//! declare which keys they need and the engine validates them before the
//! run starts, so a missing key is a construction-time error rather than a
//! silent zero in the middle of the search.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::ops::Index;
use std::path::Path;

/// Read-only mapping from parameter names to numeric values.
///
/// Boolean knobs are encoded as floats (`>= 1.0` means "on"), matching the
/// flat-JSON configuration format:
///
/// ```json
/// { "initial temperature": 100.0, "alpha": 0.1, "print results": 1 }
/// ```
///
/// # Examples
///
/// ```
/// use adaptive_anneal::params::Params;
///
/// let params = Params::from_json_str(r#"{"alpha": 0.1, "w": 1.0}"#).unwrap();
/// assert_eq!(params.require("alpha").unwrap(), 0.1);
/// assert!(params.get("beta").is_none());
/// ```
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: HashMap<String, f64>,
}

impl Params {
    /// Parses a flat JSON object of numbers.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let values: HashMap<String, f64> =
            serde_json::from_str(text).context("parameter file must be a flat JSON object of numbers")?;
        Ok(Self { values })
    }

    /// Reads and parses a JSON parameter file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read parameter file {}", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("cannot parse parameter file {}", path.display()))
    }

    /// Builds a map from literal pairs. Mostly useful in tests.
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            values: pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect(),
        }
    }

    /// Looks up an optional parameter.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Looks up a mandatory parameter, failing with the offending key name.
    pub fn require(&self, key: &str) -> Result<f64> {
        match self.get(key) {
            Some(v) => Ok(v),
            None => bail!("missing parameter {key:?}"),
        }
    }

    /// Reads a boolean-as-float flag. Absent keys read as `false`.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v >= 1.0)
    }

    /// Checks that every listed key is present, reporting all missing ones.
    pub fn validate(&self, required: &[&str]) -> Result<()> {
        let missing: Vec<&str> = required
            .iter()
            .copied()
            .filter(|k| !self.values.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            bail!("missing parameters: {missing:?}");
        }
        Ok(())
    }

    /// Number of entries in the map.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Index<&str> for Params {
    type Output = f64;

    /// Direct read for keys that [`Params::validate`] already guaranteed.
    ///
    /// # Panics
    ///
    /// Panics on a missing key; hot-loop callers must validate first.
    fn index(&self, key: &str) -> &f64 {
        match self.values.get(key) {
            Some(v) => v,
            None => panic!("missing parameter {key:?}"),
        }
    }
}

impl FromIterator<(String, f64)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
