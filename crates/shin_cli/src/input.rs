//! Parsing of odds given on the command line

use crate::error::{CliError, Result};

/// Odds as typed by the user
#[derive(Debug, Clone, PartialEq)]
pub enum OddsInput {
    /// `2.6 2.4 4.3`
    Ordered(Vec<f64>),
    /// `HOME=2.6 AWAY=2.4 DRAW=4.3`
    Labelled(Vec<(String, f64)>),
}

impl OddsInput {
    /// Parse tokens; either all plain numbers or all `KEY=ODDS` pairs.
    ///
    /// Values are not range-checked here; shin_core rejects odds below 1.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let labelled = tokens.iter().filter(|t| t.as_ref().contains('=')).count();

        if labelled == 0 {
            let odds = tokens
                .iter()
                .map(|t| parse_odds(t.as_ref()))
                .collect::<Result<Vec<_>>>()?;
            return Ok(OddsInput::Ordered(odds));
        }

        if labelled != tokens.len() {
            return Err(CliError::InvalidArgument(
                "cannot mix labelled (KEY=ODDS) and plain odds".to_string(),
            ));
        }

        let mut pairs = Vec::with_capacity(tokens.len());
        for token in tokens {
            let (key, value) = token
                .as_ref()
                .split_once('=')
                .ok_or_else(|| CliError::InvalidArgument(token.as_ref().to_string()))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::InvalidArgument(format!(
                    "missing label in '{}'",
                    token.as_ref()
                )));
            }
            if pairs.iter().any(|(k, _): &(String, f64)| k == key) {
                return Err(CliError::InvalidArgument(format!(
                    "duplicate label '{}'",
                    key
                )));
            }
            pairs.push((key.to_string(), parse_odds(value)?));
        }

        Ok(OddsInput::Labelled(pairs))
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        match self {
            OddsInput::Ordered(odds) => odds.len(),
            OddsInput::Labelled(pairs) => pairs.len(),
        }
    }

    /// True when no odds were given
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain odds values, in input order
    pub fn values(&self) -> Vec<f64> {
        match self {
            OddsInput::Ordered(odds) => odds.clone(),
            OddsInput::Labelled(pairs) => pairs.iter().map(|(_, o)| *o).collect(),
        }
    }

    /// Label per outcome; positions are labelled by index
    pub fn labels(&self) -> Vec<String> {
        match self {
            OddsInput::Ordered(odds) => (0..odds.len()).map(|i| i.to_string()).collect(),
            OddsInput::Labelled(pairs) => pairs.iter().map(|(k, _)| k.clone()).collect(),
        }
    }
}

fn parse_odds(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| CliError::InvalidArgument(format!("not a decimal odds value: '{}'", s)))
}
