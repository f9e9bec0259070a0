#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_json;
#[macro_use]
extern crate lazy_static;
#[cfg(test)]
#[macro_use]
extern crate maplit;
extern crate slog;
extern crate slog_term;
extern crate url;
extern crate regex;
extern crate clap;
extern crate payload_query;

mod logger;
mod params;
mod mapping;
mod documents;
mod debug;
mod query_parser;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use slog::{Drain, Logger};
use serde_json::Value as Json;
use payload_query::{Query, Similarity};
use payload_query::store::MemoryIndex;
use payload_query::collectors::TopScoreCollector;

use crate::params::RequestParams;
use crate::mapping::{Mapping, FieldType};
use crate::debug::DebugInfo;
use crate::query_parser::payload_dismax::PayloadDisMaxQParser;


#[derive(Debug, Parser)]
#[command(
    version,
    about = "Parses a dismax request with payload fields and optionally runs it over a set of documents"
)]
struct Args {
    /// Request parameters, URL encoded (`q=red+shoes&qf=category_en&plf=category_en`)
    #[arg(value_name = "PARAMS")]
    params: String,

    /// Index and search this field as a single keyword
    #[arg(long = "keyword-field", value_name = "FIELD")]
    keyword_fields: Vec<String>,

    /// Index and search this field as word-segmented text without payloads
    #[arg(long = "text-field", value_name = "FIELD")]
    text_fields: Vec<String>,

    /// JSON file of documents to search
    #[arg(long, value_name = "FILE")]
    docs: Option<PathBuf>,

    /// Number of hits to print
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Include parser debug information in the output
    #[arg(long)]
    debug: bool,

    /// Log library debug messages to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}


impl Args {
    fn mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();

        for field in self.keyword_fields.iter() {
            mapping = mapping.with_field(field, FieldType::Keyword);
        }

        for field in self.text_fields.iter() {
            mapping = mapping.with_field(field, FieldType::Text);
        }

        mapping
    }
}


fn search(log: &Logger, path: &Path, mapping: &Mapping, query: &Query, rows: usize) -> Result<Json, String> {
    let data = fs::read_to_string(path).map_err(|e| format!("couldn't read {}: {}", path.display(), e))?;
    let docs = documents::parse_documents(mapping, &data)?;

    let mut index = MemoryIndex::new();
    for doc in docs {
        index.insert_document(doc);
    }

    let mut collector = TopScoreCollector::new(rows);
    index.search(&mut collector, query, &Similarity::default());
    let total_hits = collector.total_hits();

    let hits = collector.into_sorted_vec().iter().filter_map(|doc_match| {
        index.get_document_by_id(doc_match.doc_id()).map(|doc| {
            json!({
                "key": doc.key,
                "score": doc_match.score(),
            })
        })
    }).collect::<Vec<_>>();

    slog::info!(log, "search finished"; "total_hits" => total_hits, "returned" => hits.len());

    Ok(json!({
        "total": total_hits,
        "hits": hits,
    }))
}


fn run(log: &Logger, args: &Args) -> Result<Json, String> {
    let params = RequestParams::from_query_string(&args.params);
    let mapping = args.mapping();

    let mut parser = PayloadDisMaxQParser::new(&params, &mapping);
    let query = parser.parse().map_err(|e| e.to_string())?;

    slog::info!(log, "parsed request";
        "payload_fields" => parser.payload_fields().len(),
        "has_query" => query.is_some());

    let mut output = json!({
        "query": query.as_ref().map(|query| query.to_string()),
    });

    if args.debug {
        let mut debug_info = DebugInfo::new();
        parser.add_debug_info(&mut debug_info);
        output["debug"] = debug_info.to_json();
    }

    if let (Some(path), Some(query)) = (args.docs.as_ref(), query.as_ref()) {
        output["results"] = search(log, path, &mapping, query, args.rows)?;
    }

    Ok(output)
}


fn main() {
    let args = Args::parse();

    let decorator = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let log = Logger::root(drain, slog::o!("version" => env!("CARGO_PKG_VERSION")));

    if let Err(e) = logger::init(args.verbose) {
        slog::warn!(log, "couldn't install the log backend"; "error" => e.to_string());
    }

    match run(&log, &args) {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(output) => println!("{}", output),
                Err(e) => {
                    slog::error!(log, "couldn't serialise output"; "error" => e.to_string());
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            slog::error!(log, "request failed"; "error" => e);
            process::exit(1);
        }
    }
}
