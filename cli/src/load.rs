use anyhow::{Context, Result};
use search_core::{DocumentId, DocumentStatus, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One document as it appears in a corpus file.
#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// `.json` and `.jsonl` files under `input` (or `input` itself), sorted by path.
pub fn corpus_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

/// Add every document found under `input` to `server`. Returns the number added.
pub fn load_corpus(server: &mut SearchServer, input: &Path) -> Result<usize> {
    let files = corpus_files(input);
    if files.is_empty() {
        anyhow::bail!("no .json or .jsonl files found at {}", input.display());
    }
    let mut added = 0;
    for file in files {
        added += if extension(&file) == Some("jsonl") {
            load_jsonl(server, &file)?
        } else {
            load_json(server, &file)?
        };
    }
    tracing::info!(documents = added, input = %input.display(), "corpus loaded");
    Ok(added)
}

fn load_jsonl(server: &mut SearchServer, file: &Path) -> Result<usize> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut added = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), lineno + 1))?;
        let location = format!("{}:{}", file.display(), lineno + 1);
        add(server, doc, &location)?;
        added += 1;
    }
    Ok(added)
}

fn load_json(server: &mut SearchServer, file: &Path) -> Result<usize> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parsing {}", file.display()))?;
    let docs: Vec<InputDoc> = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)
            .with_context(|| format!("parsing {}", file.display()))?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)
            .with_context(|| format!("parsing {}", file.display()))?],
        _ => anyhow::bail!("{}: expected a document or an array of documents", file.display()),
    };
    let count = docs.len();
    let location = file.display().to_string();
    for doc in docs {
        add(server, doc, &location)?;
    }
    Ok(count)
}

fn add(server: &mut SearchServer, doc: InputDoc, location: &str) -> Result<()> {
    server
        .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
        .with_context(|| format!("{location}: document {}", doc.id))
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}
