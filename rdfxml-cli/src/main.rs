use anyhow::Context;
use clap::{Parser, ValueHint};
use oxiri::Iri;
use rdfxml::RdfXmlParser;
use std::fs::File;
use std::io::{stdin, stdout, BufWriter, Read, Write};
use std::path::PathBuf;

/// Converts a RDF/XML document into N-Quads.
#[derive(Parser)]
#[command(about, version, name = "rdfxml")]
struct Args {
    /// RDF/XML file to read.
    ///
    /// If not present, stdin is read instead.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    file: Option<PathBuf>,

    /// Base IRI used to resolve relative IRIs in the document.
    #[arg(long, value_hint = ValueHint::Url)]
    base: Option<String>,

    /// Graph name quads are emitted into, written using N-Quads IRI/blank node syntax.
    ///
    /// Defaults to the default graph.
    #[arg(long)]
    graph_name: Option<String>,

    /// Output file. If not present, stdout is used instead.
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Skips IRI, language tag and NCName validation to speed up parsing.
    ///
    /// Only use this on documents already known to be valid.
    #[arg(long)]
    unchecked: bool,

    /// Reports the line and column of syntax errors.
    #[arg(long)]
    track_position: bool,

    /// Tolerates `rdf:ID` values reused across the document instead of failing.
    #[arg(long = "allow-duplicate-ids")]
    allow_duplicate_rdf_ids: bool,
}

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut parser = RdfXmlParser::new();
    if let Some(base) = args.base {
        parser = parser
            .with_base_iri(base)
            .context("invalid --base IRI")?;
    }
    if let Some(graph_name) = &args.graph_name {
        parser = parser.with_default_graph_name(parse_graph_name(graph_name)?);
    }
    if args.unchecked {
        parser = parser.unchecked();
    }
    parser = parser
        .with_track_position(args.track_position)
        .with_allow_duplicate_rdf_ids(args.allow_duplicate_rdf_ids);

    let input: Box<dyn Read> = match &args.file {
        Some(file) => Box::new(File::open(file).with_context(|| {
            format!("could not open input file {}", file.display())
        })?),
        None => Box::new(stdin()),
    };

    let output: Box<dyn Write> = match &args.output {
        Some(file) => Box::new(BufWriter::new(File::create(file).with_context(|| {
            format!("could not create output file {}", file.display())
        })?)),
        None => Box::new(BufWriter::new(stdout())),
    };
    convert(parser, input, output)
}

fn convert(
    parser: RdfXmlParser,
    input: impl Read,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let mut count = 0_u64;
    for quad in parser.parse_read(input) {
        let quad = quad.context("error while parsing RDF/XML")?;
        writeln!(output, "{quad} .").context("error while writing N-Quads output")?;
        count += 1;
    }
    tracing::debug!(quads = count, "parsing finished");
    Ok(())
}

fn parse_graph_name(value: &str) -> anyhow::Result<oxrdf::GraphName> {
    if let Some(id) = value.strip_prefix("_:") {
        return Ok(oxrdf::BlankNode::new(id)
            .context("invalid blank node graph name")?
            .into());
    }
    let iri = Iri::parse(value.to_owned()).context("invalid graph name IRI")?;
    Ok(oxrdf::NamedNode::new_unchecked(iri.into_inner()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_minimal_document() -> anyhow::Result<()> {
        let input = br#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/">
  <ex:Thing rdf:about="http://example.com/a"/>
</rdf:RDF>"#;
        let mut output = Vec::new();
        convert(RdfXmlParser::new(), &input[..], &mut output)?;
        let output = String::from_utf8(output)?;
        assert!(output.contains("http://example.com/a"));
        assert!(output.contains(
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type"
        ));
        Ok(())
    }

    #[test]
    fn reports_syntax_errors() {
        let input = b"<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">" as &[u8];
        let mut output = Vec::new();
        assert!(convert(RdfXmlParser::new(), input, &mut output).is_err());
    }

    #[test]
    fn parse_graph_name_accepts_blank_node_and_iri() {
        assert!(parse_graph_name("_:b1").is_ok());
        assert!(parse_graph_name("http://example.com/g").is_ok());
        assert!(parse_graph_name("not an iri").is_err());
    }
}
