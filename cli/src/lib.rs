use anyhow::{anyhow, bail, Context, Result};
use search_core::{Document, DocumentId, DocumentStatus, SearchServer};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One document record in a JSON or JSONL input file.
#[derive(Debug, Clone, Deserialize)]
pub struct InputDoc {
    pub id: DocumentId,
    #[serde(alias = "body")]
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Read one line without its line terminator. Returns an empty string at end of input.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line).context("failed to read line")?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') { line.pop(); }
    }
    Ok(line)
}

fn read_document_line<R: BufRead>(reader: &mut R, id: DocumentId) -> Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line).context("failed to read line")? == 0 {
        bail!("unexpected end of input while reading document {id}");
    }
    let line = line.strip_suffix('\n').unwrap_or(&line);
    Ok(line.strip_suffix('\r').unwrap_or(line).to_string())
}

/// Read a line and parse its first whitespace-separated field as a number; the rest of the line is discarded.
pub fn read_line_with_number<R: BufRead>(reader: &mut R) -> Result<usize> {
    let line = read_line(reader)?;
    let field = line.split_whitespace().next().ok_or_else(|| anyhow!("expected a number, got an empty line"))?;
    field.parse().with_context(|| format!("expected a number, got {field:?}"))
}

/// Parse a ratings line of the form `<count> r1 r2 ... rN`.
pub fn parse_ratings(line: &str) -> Result<Vec<i32>> {
    let mut fields = line.split_whitespace();
    let count: usize = match fields.next() {
        Some(f) => f.parse().with_context(|| format!("invalid ratings count {f:?}"))?,
        None => return Ok(Vec::new()),
    };
    let ratings = fields
        .take(count)
        .map(|f| f.parse::<i32>().with_context(|| format!("invalid rating {f:?}")))
        .collect::<Result<Vec<_>>>()?;
    if ratings.len() != count {
        bail!("expected {count} ratings, got {}", ratings.len());
    }
    Ok(ratings)
}

/// Format a relevance with six significant digits, trimming trailing zeros.
pub fn format_relevance(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    // Exponent after rounding to six significant digits, so 999999.7 becomes 1e+06.
    let sci = format!("{value:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exp.parse().unwrap_or(0);
    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_fraction(mantissa), exponent.abs());
    }
    let decimals = (5 - exponent).max(0) as usize;
    trim_fraction(&format!("{value:.decimals$}")).to_string()
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}

pub fn render_document(document: &Document) -> String {
    format!(
        "{{ document_id = {}, relevance = {}, rating = {} }}",
        document.id,
        format_relevance(document.relevance),
        document.rating
    )
}

/// Collect `.json` / `.jsonl` files under `input` (a file or a directory).
pub fn input_files(input: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    }
    files
}

pub fn load_input_docs(input: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in input_files(input) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut docs)?;
        } else {
            load_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn load_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("failed to open {}", file.display()))?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document record", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("failed to open {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader).with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document record", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("{}: invalid document record", file.display()))?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping JSON file without document records"),
    }
    Ok(())
}

/// Build an index from input records. Records the index rejects are logged and skipped.
pub fn build_server(stop_words: &str, docs: Vec<InputDoc>) -> Result<SearchServer> {
    let mut server = SearchServer::from_stop_words_text(stop_words)?;
    let mut rejected = 0usize;
    for doc in docs {
        if let Err(err) = server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
            tracing::warn!(document_id = doc.id, error = %err, "document rejected");
            rejected += 1;
        }
    }
    tracing::info!(num_docs = server.document_count(), rejected, "index built");
    Ok(server)
}

/// Line protocol: stop words, document count, then a text line and a ratings
/// line per document, then the query. Documents get ids `0..count`.
pub fn run_console<R: BufRead, W: Write>(reader: &mut R, out: &mut W) -> Result<()> {
    let stop_words = read_line(reader)?;
    let count = read_line_with_number(reader)?;
    let count = DocumentId::try_from(count).with_context(|| format!("document count {count} is too large"))?;
    let mut docs = Vec::new();
    for id in 0..count {
        let text = read_document_line(reader, id)?;
        let ratings = parse_ratings(&read_document_line(reader, id)?)?;
        docs.push(InputDoc { id, text, status: DocumentStatus::Actual, ratings });
    }
    let server = build_server(&stop_words, docs)?;
    let query = read_line(reader)?;
    for document in server.find_top_documents(&query)? {
        writeln!(out, "{}", render_document(&document))?;
    }
    Ok(())
}
