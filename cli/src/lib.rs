pub mod load;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use search_core::{remove_duplicates, DocumentStatus, SearchError, SearchServer};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "searchctl")]
#[command(about = "Query an in-memory TF-IDF index built from JSON/JSONL documents", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub corpus: CorpusArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct CorpusArgs {
    /// Input path (file or directory)
    #[arg(long, global = true, default_value = "./docs")]
    pub input: PathBuf,
    /// Space-separated stop words; falls back to SEARCH_STOP_WORDS
    #[arg(long, global = true)]
    pub stop_words: Option<String>,
    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the top documents for a query
    Search {
        query: String,
        /// Only documents with this status (actual, irrelevant, banned, removed)
        #[arg(long, conflicts_with = "min_rating")]
        status: Option<DocumentStatus>,
        /// Only documents rated at least this, any status
        #[arg(long)]
        min_rating: Option<i32>,
    },
    /// Print the query words found in one document
    Match {
        query: String,
        #[arg(long)]
        id: i32,
    },
    /// Remove documents with identical word sets, keeping the first
    Dedup,
    /// Print document count and ids in insertion order
    Stats,
}

impl CorpusArgs {
    fn stop_words(&self) -> String {
        self.stop_words
            .clone()
            .or_else(|| std::env::var("SEARCH_STOP_WORDS").ok())
            .unwrap_or_default()
    }

    pub fn build_server(&self) -> Result<SearchServer> {
        let mut server = SearchServer::from_stop_words_text(&self.stop_words())?;
        load::load_corpus(&mut server, &self.input)?;
        Ok(server)
    }
}

/// Stable code of the engine error behind `err`, if there is one.
pub fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SearchError>())
        .map(SearchError::code)
}

/// Run one command and return what should be printed.
pub fn run(cli: Cli) -> Result<String> {
    let mut server = cli.corpus.build_server()?;
    let json = cli.corpus.json;
    let mut out = String::new();

    match cli.command {
        Commands::Search { query, status, min_rating } => {
            let docs = match (status, min_rating) {
                (_, Some(min)) => server.find_top_documents_with(&query, |_, _, rating| rating >= min)?,
                (Some(status), None) => server.find_top_documents_by_status(&query, status)?,
                (None, None) => server.find_top_documents(&query)?,
            };
            if json {
                out.push_str(&serde_json::to_string_pretty(&docs)?);
                out.push('\n');
            } else {
                for doc in docs {
                    writeln!(out, "{doc}")?;
                }
            }
        }
        Commands::Match { query, id } => {
            let (words, status) = server.match_document(&query, id)?;
            if json {
                let value = serde_json::json!({ "id": id, "words": words, "status": status });
                out.push_str(&serde_json::to_string_pretty(&value)?);
                out.push('\n');
            } else {
                writeln!(out, "{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "))?;
            }
        }
        Commands::Dedup => {
            let removed = remove_duplicates(&mut server);
            if json {
                let value = serde_json::json!({ "removed": removed, "remaining": server.document_count() });
                out.push_str(&serde_json::to_string_pretty(&value)?);
                out.push('\n');
            } else {
                for id in &removed {
                    writeln!(out, "Found duplicate document id {id}")?;
                }
                writeln!(out, "{} documents remaining", server.document_count())?;
            }
        }
        Commands::Stats => {
            let ids: Vec<_> = server.document_ids().collect();
            if json {
                let value = serde_json::json!({ "count": server.document_count(), "ids": ids });
                out.push_str(&serde_json::to_string_pretty(&value)?);
                out.push('\n');
            } else {
                writeln!(out, "{} documents", server.document_count())?;
                for id in ids {
                    writeln!(out, "{id}")?;
                }
            }
        }
    }
    Ok(out)
}
