//! One-shot RDF ETL pipeline.
//!
//! Fetches an RDF graph from a URL with content negotiation, materializes
//! it into an in-memory quad store, evaluates a single SPARQL CONSTRUCT or
//! DESCRIBE query against it, serializes the resulting quads to Turtle and
//! uploads the document to a graph store endpoint, either replacing (PUT)
//! or appending to (POST) the addressed graph.
//!
//! Parsing, query evaluation and serialization are delegated to
//! [oxigraph](https://crates.io/crates/oxigraph); this crate owns the
//! orchestration, the HTTP boundaries and the error taxonomy.
//!
//! ```no_run
//! use quadpipe::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let report = quadpipe::run(&config, |stage| eprintln!("starting {stage:?}"))?;
//! eprintln!("published {} quads", report.published);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod pipeline;
pub mod publish;
pub mod query;

pub use config::{Config, WriteMethod};
pub use error::{
    ConfigError, FetchError, ParseError, PipelineError, PublishError, QueryError,
};
pub use pipeline::{run, Report, Stage};
