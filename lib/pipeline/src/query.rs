//! SPARQL evaluation over the materialized source store.

use crate::error::QueryError;
use oxigraph::model::{GraphName, Quad};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;

/// Evaluates `query` against `store` and fully materializes the resulting
/// quads.
///
/// Only quad-producing evaluation is accepted: CONSTRUCT and DESCRIBE
/// queries. SELECT and ASK evaluate to solutions or a boolean and fail
/// with [`QueryError::NotGraphResults`]. The returned order is whatever
/// the engine yields; the store is not mutated.
pub fn run_query(query: &str, store: &Store) -> Result<Vec<Quad>, QueryError> {
    match store.query(query)? {
        QueryResults::Graph(triples) => {
            let mut quads = Vec::new();
            for triple in triples {
                quads.push(triple?.in_graph(GraphName::DefaultGraph));
            }
            tracing::debug!(quads = quads.len(), "materialized query results");
            Ok(quads)
        }
        QueryResults::Solutions(_) | QueryResults::Boolean(_) => {
            Err(QueryError::NotGraphResults)
        }
    }
}
