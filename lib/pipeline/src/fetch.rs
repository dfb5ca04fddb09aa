//! Content-negotiated fetch of the source graph.

use crate::error::FetchError;
use oxigraph::io::RdfFormat;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

/// Accept header sent with the fetch request.
///
/// Structured RDF formats come first, in descending preference. The
/// low-preference `application/octet-stream` and wildcard entries keep
/// servers that ignore q-values and pick the first acceptable type from
/// answering with raw octet streams.
pub const ACCEPT_HEADER: &str = "text/turtle, application/n-triples, \
     application/ld+json, application/rdf+xml, application/trig, \
     application/n-quads, application/octet-stream;q=0.1, */*;q=0.01";

/// A fetched response body together with its negotiated content type.
///
/// The body is handed over as a byte stream, not a buffer: it is only
/// consumed when the parser drains it.
pub struct NegotiatedContent {
    /// Media type of `body`, without parameters. Defaults to
    /// `text/turtle` when the source sent no usable content-type header.
    pub content_type: String,
    /// The undrained response body. [`Response`] implements
    /// [`std::io::Read`].
    pub body: Response,
}

/// Performs the single content-negotiated GET against the source URL.
///
/// A non-2xx answer fails with [`FetchError::Status`]; there are no
/// retries.
pub fn fetch(client: &Client, source_url: &str) -> Result<NegotiatedContent, FetchError> {
    let response = client
        .get(source_url)
        .header(ACCEPT, ACCEPT_HEADER)
        .send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: source_url.to_owned(),
            status,
        });
    }
    let content_type = normalize_content_type(
        response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
    );
    tracing::debug!(url = source_url, content_type = %content_type, "fetched source graph");
    Ok(NegotiatedContent {
        content_type,
        body: response,
    })
}

/// Strips media type parameters (e.g. `charset`) and surrounding
/// whitespace; an absent or blank header falls back to Turtle.
fn normalize_content_type(header: Option<&str>) -> String {
    let media_type = header
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());
    match media_type {
        Some(value) => value.to_owned(),
        None => RdfFormat::Turtle.media_type().to_owned(),
    }
}
