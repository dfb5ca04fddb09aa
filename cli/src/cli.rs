use clap::Parser;

/// One-shot RDF ETL pipeline.
///
/// Fetches the RDF graph at URL, evaluates the SPARQL CONSTRUCT or DESCRIBE
/// query in Query against it and writes the serialized result to the graph
/// store at STORE. All operational input comes from the environment; the
/// command line only exposes `--help` and `--version`.
#[derive(Parser)]
#[command(about, version, name = "quadpipe", after_help = ENV_HELP)]
pub struct Args {}

const ENV_HELP: &str = "\
Environment variables:
  URL     source graph URL (required)
  Query   SPARQL CONSTRUCT or DESCRIBE query text (required)
  STORE   destination graph store URL (required)
  METHOD  PUT to replace the target graph, POST to append (default: POST)

Exit status is 0 when the pipeline ran to completion and 1 on the first
failed stage; progress and diagnostics are written to stderr.
";
