//! Orchestration of a single pipeline run.

use crate::config::Config;
use crate::error::{FetchError, ParseError, PipelineError};
use crate::fetch::fetch;
use crate::ingest::ingest;
use crate::publish::publish;
use crate::query::run_query;
use oxigraph::store::LoaderError;
use reqwest::blocking::Client;

/// A user-visible pipeline step, reported just before the step begins.
///
/// Fetching and parsing share a step: the body stream is only consumed by
/// the parser, so there is no observable boundary between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fetch the source graph and materialize it into the store.
    Fetch,
    /// Evaluate the SPARQL query.
    Query,
    /// Serialize the results and write them to the graph store.
    Publish,
}

/// Quad counts of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Quads materialized from the source graph.
    pub loaded: usize,
    /// Quads produced by the query and published.
    pub published: usize,
}

/// Runs the whole pipeline once: fetch, ingest, query, publish.
///
/// The stages run strictly sequentially; the first failure aborts the run
/// and nothing is retried. `on_stage` is invoked before each step so
/// callers can report progress.
///
/// Side effects: one GET against `config.source_url` and, if everything
/// before it succeeded, one PUT or POST against `config.store_url`.
pub fn run(
    config: &Config,
    mut on_stage: impl FnMut(Stage),
) -> Result<Report, PipelineError> {
    let client = Client::builder()
        .user_agent(concat!("quadpipe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(FetchError::from)?;

    on_stage(Stage::Fetch);
    let content = fetch(&client, config.source_url.as_str())?;
    let store = ingest(
        content.body,
        &content.content_type,
        config.source_url.as_str(),
    )?;
    let loaded = store
        .len()
        .map_err(|error| ParseError::from(LoaderError::from(error)))?;
    tracing::info!(loaded, "source graph materialized");

    on_stage(Stage::Query);
    let quads = run_query(&config.query, &store)?;
    tracing::info!(quads = quads.len(), "query evaluated");

    on_stage(Stage::Publish);
    publish(&client, &quads, config.store_url.as_str(), config.method)?;

    Ok(Report {
        loaded,
        published: quads.len(),
    })
}
