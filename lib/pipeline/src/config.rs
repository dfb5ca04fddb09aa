//! Pipeline configuration resolved from the process environment.
//!
//! The deployment contract fixes the variable names, including the
//! mixed-case `Query`: `URL` (source graph), `Query` (SPARQL text),
//! `STORE` (destination graph store) and `METHOD` (`PUT` or `POST`).

use crate::error::ConfigError;
use std::env;
use std::fmt;
use url::Url;

/// Environment variable naming the source graph URL.
pub const SOURCE_URL_VAR: &str = "URL";
/// Environment variable holding the SPARQL query text.
pub const QUERY_VAR: &str = "Query";
/// Environment variable naming the destination graph store URL.
pub const STORE_URL_VAR: &str = "STORE";
/// Environment variable selecting the write method (`PUT` or `POST`).
pub const METHOD_VAR: &str = "METHOD";

/// Write semantics for the destination graph store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMethod {
    /// `PUT`: replace the addressed graph's contents.
    Replace,
    /// `POST`: merge the payload into the addressed graph.
    Append,
}

impl fmt::Display for WriteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMethod::Replace => "PUT",
            WriteMethod::Append => "POST",
        })
    }
}

/// Immutable parameters of a single pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute URL the source graph is fetched from. Also used as the base
    /// IRI when parsing the fetched document.
    pub source_url: Url,
    /// SPARQL CONSTRUCT or DESCRIBE query evaluated against the source graph.
    pub query: String,
    /// Absolute URL of the destination graph store endpoint.
    pub store_url: Url,
    /// Write semantics for the destination graph.
    pub method: WriteMethod,
}

impl Config {
    /// Resolves the configuration from the process environment.
    ///
    /// Fails with a [`ConfigError`] naming the offending variable when a
    /// required variable is unset or blank, a URL is not absolute, or
    /// `METHOD` is set to something other than `PUT` or `POST`
    /// (case-insensitive, default `POST`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolves the configuration from an arbitrary variable lookup.
    ///
    /// [`Self::from_env`] is this function applied to [`env::var`]; tests
    /// supply their own lookup to stay independent of process-global state.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let source_url = parse_url(SOURCE_URL_VAR, &required(&lookup, SOURCE_URL_VAR)?)?;
        let query = required(&lookup, QUERY_VAR)?;
        let store_url = parse_url(STORE_URL_VAR, &required(&lookup, STORE_URL_VAR)?)?;
        let method = match lookup(METHOD_VAR) {
            None => WriteMethod::Append,
            Some(value) => {
                let value = value.trim();
                if value.is_empty() || value.eq_ignore_ascii_case("POST") {
                    WriteMethod::Append
                } else if value.eq_ignore_ascii_case("PUT") {
                    WriteMethod::Replace
                } else {
                    return Err(ConfigError::InvalidMethod(value.to_owned()));
                }
            }
        };
        Ok(Self {
            source_url,
            query,
            store_url,
            method,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or(ConfigError::Missing(name))?;
    if value.trim().is_empty() {
        return Err(ConfigError::Blank(name));
    }
    Ok(value)
}

fn parse_url(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|error| ConfigError::InvalidUrl { name, error })
}
