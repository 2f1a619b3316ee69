//! Reading the recorded simulation document.
//!
//! The document is loaded as a generic JSON tree rather than a typed struct so that a
//! single malformed element (a boolean where a number string belongs, say) degrades to
//! one failed conversion later on instead of rejecting the whole file. Only the
//! top-level shape is validated here: the file must exist, be JSON, be an object, and
//! carry every required field as an array.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::constants::fields;

/// Fatal problems with the input document. Any of these ends the run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not find simulation data file at {path:?} (run the DEX simulation first)")]
    NotFound { path: PathBuf },

    #[error("failed to read simulation data file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("simulation data is not valid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("simulation data must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("simulation data is missing expected field '{field}'")]
    MissingField { field: String },

    #[error("field '{field}' must be an array, found {found}")]
    FieldNotArray { field: String, found: &'static str },

    #[error(
        "simulation data is missing expected field '{}' (or '{}')",
        fields::SPOT_PRICES_A,
        fields::SPOT_PRICES_B
    )]
    MissingSpotPrices,
}

/// Which way round the recorded spot price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceQuote {
    /// `spotPricesA`: price of token A in units of B
    BPerA,
    /// `spotPricesB`: price of token B in units of A
    APerB,
}

impl PriceQuote {
    /// Document field the series was read from
    pub fn field(&self) -> &'static str {
        match self {
            PriceQuote::BPerA => fields::SPOT_PRICES_A,
            PriceQuote::APerB => fields::SPOT_PRICES_B,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriceQuote::BPerA => "Spot Price A (B per A)",
            PriceQuote::APerB => "Spot Price B (A per B)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpotPriceField {
    pub quote: PriceQuote,
    pub values: Vec<Value>,
}

/// The raw, shape-checked simulation document. Elements are still untouched JSON.
#[derive(Debug, Clone)]
pub struct SimulationDocument {
    pub timestamps: Vec<Value>,
    pub reserve_ratios: Vec<Value>,
    pub spot_prices: SpotPriceField,
    pub total_values_locked_a: Vec<Value>,
    pub total_values_locked_b: Vec<Value>,
    pub cumulative_swap_volume_a: Vec<Value>,
    pub cumulative_swap_volume_b: Vec<Value>,
    pub slippages: Vec<Value>,
    pub cumulative_fees_a: Vec<Value>,
    pub cumulative_fees_b: Vec<Value>,
    pub lp_distribution_snapshots: Vec<Value>,
}

impl SimulationDocument {
    /// Length of the transaction axis every series is measured against.
    pub fn transaction_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(LoadError::InvalidJson)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let mut map = match value {
            Value::Object(map) => map,
            other => {
                return Err(LoadError::NotAnObject {
                    found: json_type_name(&other),
                });
            }
        };

        // Report the first missing field in a stable order
        if let Some(missing) = fields::REQUIRED.iter().find(|f| !map.contains_key(**f)) {
            return Err(LoadError::MissingField {
                field: missing.to_string(),
            });
        }

        let spot_prices = if map.contains_key(fields::SPOT_PRICES_A) {
            SpotPriceField {
                quote: PriceQuote::BPerA,
                values: take_array(&mut map, fields::SPOT_PRICES_A)?,
            }
        } else if map.contains_key(fields::SPOT_PRICES_B) {
            SpotPriceField {
                quote: PriceQuote::APerB,
                values: take_array(&mut map, fields::SPOT_PRICES_B)?,
            }
        } else {
            return Err(LoadError::MissingSpotPrices);
        };

        Ok(Self {
            timestamps: take_array(&mut map, fields::TIMESTAMPS)?,
            reserve_ratios: take_array(&mut map, fields::RESERVE_RATIOS)?,
            spot_prices,
            total_values_locked_a: take_array(&mut map, fields::TVL_A)?,
            total_values_locked_b: take_array(&mut map, fields::TVL_B)?,
            cumulative_swap_volume_a: take_array(&mut map, fields::SWAP_VOLUME_A)?,
            cumulative_swap_volume_b: take_array(&mut map, fields::SWAP_VOLUME_B)?,
            slippages: take_array(&mut map, fields::SLIPPAGES)?,
            cumulative_fees_a: take_array(&mut map, fields::FEES_A)?,
            cumulative_fees_b: take_array(&mut map, fields::FEES_B)?,
            lp_distribution_snapshots: take_array(&mut map, fields::LP_SNAPSHOTS)?,
        })
    }
}

/// Reads and shape-checks the simulation document at `path`.
pub fn load_simulation_document(path: &Path) -> Result<SimulationDocument, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    SimulationDocument::from_json_str(&text)
}

/// The textual form of one raw element, or `None` for JSON null.
///
/// Strings are passed through, numbers use their JSON spelling (recorders that emit
/// block timestamps or small counters as numbers are common). Anything else is
/// rendered as JSON text so that it fails numeric parsing downstream.
pub fn raw_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn take_array(map: &mut Map<String, Value>, field: &str) -> Result<Vec<Value>, LoadError> {
    match map.remove(field) {
        Some(Value::Array(values)) => Ok(values),
        Some(other) => Err(LoadError::FieldNotArray {
            field: field.to_string(),
            found: json_type_name(&other),
        }),
        None => Err(LoadError::MissingField {
            field: field.to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
