#![allow(clippy::print_stderr)]
use crate::cli::Args;
use anyhow::anyhow;
use clap::Parser;
use quadpipe::{Config, Stage};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> ExitCode {
    Args::parse();
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ERROR: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize logging: {error}"))?;

    let config = Config::from_env()?;
    let report = quadpipe::run(&config, |stage| match stage {
        Stage::Fetch => eprintln!("[1/3] Fetching {}", config.source_url),
        Stage::Query => eprintln!("[2/3] Evaluating query"),
        Stage::Publish => {
            eprintln!("[3/3] Publishing to {} ({})", config.store_url, config.method);
        }
    })?;
    eprintln!(
        "Loaded {} quads, published {} quads.",
        report.loaded, report.published
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic_in_result_fn)]
mod tests {
    use super::*;
    use assert_cmd::Command;
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use axum::response::Response;
    use axum::routing::{get, post};
    use axum::Router;
    use oxigraph::io::{RdfFormat, RdfParser};
    use oxigraph::model::{GraphName, NamedNode, Quad};
    use predicates::prelude::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    const IDENTITY_QUERY: &str = "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }";

    fn cli_command() -> Command {
        let mut command = Command::new(env!("CARGO"));
        command
            .arg("run")
            .arg("--quiet")
            .arg("--bin")
            .arg("quadpipe")
            .arg("--");
        for name in ["URL", "Query", "STORE", "METHOD"] {
            command.env_remove(name);
        }
        command
    }

    #[derive(Debug, Clone)]
    struct RecordedWrite {
        method: &'static str,
        body: String,
    }

    type Writes = Arc<Mutex<Vec<RecordedWrite>>>;

    async fn serve_turtle() -> Response {
        // A single triple with relative IRIs, to be resolved against the
        // source URL.
        Response::builder()
            .header(CONTENT_TYPE, "text/turtle")
            .body(Body::from("<a> <b> <c> ."))
            .unwrap()
    }

    async fn capture_append(State(writes): State<Writes>, body: String) -> StatusCode {
        writes.lock().unwrap().push(RecordedWrite {
            method: "POST",
            body,
        });
        StatusCode::NO_CONTENT
    }

    async fn capture_replace(State(writes): State<Writes>, body: String) -> StatusCode {
        writes.lock().unwrap().push(RecordedWrite {
            method: "PUT",
            body,
        });
        StatusCode::NO_CONTENT
    }

    fn spawn_server(writes: Writes) -> String {
        let app = Router::new()
            .route("/data.ttl", get(serve_turtle))
            .route("/store", post(capture_append).put(capture_replace))
            .with_state(writes);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            runtime.block_on(async move {
                axum::serve(listener, app).await.unwrap();
            });
        });
        format!("http://{addr}")
    }

    fn published_quads(write: &RecordedWrite) -> Vec<Quad> {
        RdfParser::from_format(RdfFormat::Turtle)
            .for_reader(write.body.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn missing_url_fails_with_a_named_variable() {
        cli_command()
            .env("Query", IDENTITY_QUERY)
            .env("STORE", "https://example.org/store")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("ERROR:").and(predicate::str::contains("URL")));
    }

    #[test]
    fn unknown_method_fails_before_any_stage_runs() {
        cli_command()
            .env("URL", "https://example.invalid/data.ttl")
            .env("Query", IDENTITY_QUERY)
            .env("STORE", "https://example.invalid/store")
            .env("METHOD", "DELETE")
            .assert()
            .failure()
            .code(1)
            .stderr(
                predicate::str::contains("METHOD")
                    .and(predicate::str::contains("[1/3]").not()),
            );
    }

    #[test]
    fn help_documents_the_environment_contract() {
        cli_command()
            .arg("--help")
            .assert()
            .success()
            .stdout(
                predicate::str::contains("URL")
                    .and(predicate::str::contains("Query"))
                    .and(predicate::str::contains("STORE"))
                    .and(predicate::str::contains("METHOD")),
            );
    }

    #[test]
    fn end_to_end_append_publishes_the_resolved_triple() {
        let writes: Writes = Writes::default();
        let base = spawn_server(writes.clone());

        cli_command()
            .env("URL", format!("{base}/data.ttl"))
            .env("Query", IDENTITY_QUERY)
            .env("STORE", format!("{base}/store"))
            .env("METHOD", "POST")
            .assert()
            .success()
            .stderr(
                predicate::str::contains("[1/3]")
                    .and(predicate::str::contains("[2/3]"))
                    .and(predicate::str::contains("[3/3]")),
            );

        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].method, "POST");
        let expected = Quad::new(
            NamedNode::new(format!("{base}/a")).unwrap(),
            NamedNode::new(format!("{base}/b")).unwrap(),
            NamedNode::new(format!("{base}/c")).unwrap(),
            GraphName::DefaultGraph,
        );
        assert_eq!(published_quads(&writes[0]), vec![expected]);
    }

    #[test]
    fn lowercase_put_replaces_the_target_graph() {
        let writes: Writes = Writes::default();
        let base = spawn_server(writes.clone());

        cli_command()
            .env("URL", format!("{base}/data.ttl"))
            .env("Query", IDENTITY_QUERY)
            .env("STORE", format!("{base}/store"))
            .env("METHOD", "put")
            .assert()
            .success();

        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].method, "PUT");
    }

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert();
    }
}
