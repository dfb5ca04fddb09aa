//! Serializing result quads to Turtle and writing them to the graph store.

use crate::config::WriteMethod;
use crate::error::PublishError;
use oxigraph::io::{RdfFormat, RdfSerializer};
use oxigraph::model::Quad;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

/// Serializes a finite quad sequence to a Turtle document.
///
/// The empty sequence produces an empty (still valid) document.
pub fn serialize_turtle(quads: &[Quad]) -> Result<Vec<u8>, PublishError> {
    let mut serializer = RdfSerializer::from_format(RdfFormat::Turtle).for_writer(Vec::new());
    for quad in quads {
        serializer.serialize_quad(quad)?;
    }
    Ok(serializer.finish()?)
}

/// Performs the single write against the destination graph store.
///
/// `Replace` issues a `PUT` (replace the addressed graph's contents),
/// `Append` a `POST` (merge into the addressed graph), both with
/// `Content-Type: text/turtle`. A non-2xx answer fails with
/// [`PublishError::Status`] carrying the response body text when it could
/// be read; there are no retries.
pub fn publish(
    client: &Client,
    quads: &[Quad],
    store_url: &str,
    method: WriteMethod,
) -> Result<(), PublishError> {
    let document = serialize_turtle(quads)?;
    let request = match method {
        WriteMethod::Replace => client.put(store_url),
        WriteMethod::Append => client.post(store_url),
    };
    let response = request
        .header(CONTENT_TYPE, RdfFormat::Turtle.media_type())
        .body(document)
        .send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(PublishError::Status {
            method: match method {
                WriteMethod::Replace => "PUT",
                WriteMethod::Append => "POST",
            },
            url: store_url.to_owned(),
            status,
            body: response.text().unwrap_or_default(),
        });
    }
    tracing::debug!(url = store_url, %method, quads = quads.len(), "published query results");
    Ok(())
}
