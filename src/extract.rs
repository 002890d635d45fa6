// src/extract.rs

//! Turning solver stdout into a cost.
//!
//! The solver prints `<label>:<cost>`. Everything after the first `:` is the
//! cost, with surrounding whitespace removed. The text is kept verbatim so
//! that the result file reproduces exactly what the solver printed.

use std::fmt;

use thiserror::Error;

/// Cost reported by one solver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cost(String);

impl Cost {
    /// The cost text as it will appear in the result file.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric view of the cost, if the solver printed a number.
    pub fn value(&self) -> Option<f64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a solver's output could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no ':' delimiter in solver output")]
    MissingDelimiter,

    #[error("nothing after ':' in solver output")]
    EmptyCost,
}

/// Extract the cost from captured solver stdout.
pub fn extract_cost(stdout: &str) -> Result<Cost, ParseError> {
    let raw = split_after_delimiter(stdout).ok_or(ParseError::MissingDelimiter)?;
    if raw.is_empty() {
        return Err(ParseError::EmptyCost);
    }
    Ok(Cost(raw.to_string()))
}

fn split_after_delimiter(text: &str) -> Option<&str> {
    text.split_once(':').map(|(_, rest)| rest.trim())
}
