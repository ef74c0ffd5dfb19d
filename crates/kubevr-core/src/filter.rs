//! Object filters restricting which entities a cursor can target.
//!
//! Grammar: comma-separated selectors, each one of
//! - `.class` — the entity carries that class
//! - `#name`  — the entity's name equals `name`
//! - `*`      — anything
//!
//! An empty (or all-whitespace) filter matches everything.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    Any,
    Class(String),
    Name(String),
}

/// A parsed object filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectFilter {
    selectors: Vec<Selector>,
}

impl ObjectFilter {
    /// Filter that accepts every entity.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn parse(source: &str) -> Result<Self, FilterError> {
        if source.trim().is_empty() {
            return Ok(Self::any());
        }

        let mut selectors = Vec::new();
        for token in source.split(',').map(str::trim) {
            if token.is_empty() {
                return Err(FilterError::EmptySelector(source.to_string()));
            }
            selectors.push(parse_selector(token)?);
        }
        Ok(Self { selectors })
    }

    pub fn matches_everything(&self) -> bool {
        self.selectors.is_empty() || self.selectors.contains(&Selector::Any)
    }

    /// Test an entity described by its classes and optional name.
    pub fn matches<S: AsRef<str>>(&self, classes: &[S], name: Option<&str>) -> bool {
        if self.matches_everything() {
            return true;
        }
        self.selectors.iter().any(|selector| match selector {
            Selector::Any => true,
            Selector::Class(class) => classes.iter().any(|c| c.as_ref() == class),
            Selector::Name(wanted) => name == Some(wanted.as_str()),
        })
    }
}

fn parse_selector(token: &str) -> Result<Selector, FilterError> {
    if token == "*" {
        return Ok(Selector::Any);
    }
    let invalid = || FilterError::InvalidSelector(token.to_string());

    let mut chars = token.chars();
    let kind = chars.next();
    let body = chars.as_str();
    if body.is_empty() || body.contains(char::is_whitespace) {
        return Err(invalid());
    }
    match kind {
        Some('.') => Ok(Selector::Class(body.to_string())),
        Some('#') => Ok(Selector::Name(body.to_string())),
        _ => Err(invalid()),
    }
}

impl FromStr for ObjectFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ObjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match selector {
                Selector::Any => f.write_str("*")?,
                Selector::Class(c) => write!(f, ".{c}")?,
                Selector::Name(n) => write!(f, "#{n}")?,
            }
        }
        Ok(())
    }
}
