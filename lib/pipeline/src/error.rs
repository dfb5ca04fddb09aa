//! Error taxonomy of the pipeline.
//!
//! Each stage has its own error type; [`PipelineError`] is what
//! [`crate::pipeline::run`] surfaces. Every error is terminal for the run:
//! nothing is retried and no stage continues with partial data.

use oxigraph::model::IriParseError;
use oxigraph::sparql::EvaluationError;
use oxigraph::store::LoaderError;
use reqwest::StatusCode;
use std::io;

/// A required operational parameter is absent or malformed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required variable {0} is not set")]
    Missing(&'static str),
    #[error("variable {0} must not be blank")]
    Blank(&'static str),
    #[error("variable {name} is not an absolute URL: {error}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        error: url::ParseError,
    },
    #[error("variable METHOD must be PUT or POST, got '{0}'")]
    InvalidMethod(String),
}

/// Fetching the source graph failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request could not be performed at all.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The source answered with a non-2xx status.
    #[error("GET {url} answered with status {status}")]
    Status { url: String, status: StatusCode },
}

/// The fetched document could not be turned into a quad store.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no RDF parser available for content type '{0}'")]
    UnsupportedContentType(String),
    #[error("invalid base IRI '{iri}': {error}")]
    InvalidBaseIri {
        iri: String,
        #[source]
        error: IriParseError,
    },
    /// Syntax error or storage fault while draining the parser.
    #[error(transparent)]
    Load(#[from] LoaderError),
}

/// The SPARQL query could not be parsed or evaluated.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The engine rejected the query text or failed during evaluation.
    #[error("query evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),
    /// The query evaluated to solutions or a boolean instead of quads.
    #[error("query must be a CONSTRUCT or DESCRIBE query producing quads")]
    NotGraphResults,
}

/// Writing the result to the destination graph store failed.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("failed to serialize query results to Turtle: {0}")]
    Serialization(#[from] io::Error),
    /// The request could not be performed at all.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    /// The store answered with a non-2xx status. `body` is the response
    /// body text when it was retrievable, empty otherwise.
    #[error("{method} {url} answered with status {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: StatusCode,
        body: String,
    },
}

/// Failure of a pipeline run, wrapping the failed stage's error.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to fetch the source graph: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to parse the source graph: {0}")]
    Parse(#[from] ParseError),
    #[error("failed to run the query: {0}")]
    Query(#[from] QueryError),
    #[error("failed to publish the results: {0}")]
    Publish(#[from] PublishError),
}
