//! Parsing the fetched byte stream into an in-memory quad store.

use crate::error::ParseError;
use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::store::{LoaderError, Store};
use std::io::Read;

/// Parses `body` as `content_type` and materializes every quad into a
/// fresh in-memory [`Store`].
///
/// `base_iri` (the source URL) resolves relative IRIs in the document.
/// The parser is drained to exhaustion before this returns: query
/// evaluation downstream needs the whole source graph at once.
///
/// Empty input is a valid (empty) document for every format oxigraph
/// supports, so an empty body yields an empty store rather than an error.
pub fn ingest(
    body: impl Read,
    content_type: &str,
    base_iri: &str,
) -> Result<Store, ParseError> {
    let format = RdfFormat::from_media_type(content_type)
        .ok_or_else(|| ParseError::UnsupportedContentType(content_type.to_owned()))?;
    let parser = RdfParser::from_format(format)
        .with_base_iri(base_iri)
        .map_err(|error| ParseError::InvalidBaseIri {
            iri: base_iri.to_owned(),
            error,
        })?
        .rename_blank_nodes();
    let store = Store::new().map_err(LoaderError::from)?;
    store.load_from_reader(parser, body)?;
    Ok(store)
}
