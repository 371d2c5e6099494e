use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DataLoadError;
use super::model::{RawPaperRow, RecordStore, SourceSchema};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a paper metadata file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row; any of `title`, `journal`, `abstract`, `publish_time`
/// * `.json`    – `[{ "title": ..., "journal": ..., ... }, ...]`
/// * `.parquet` – columns of the same names, string or date/number typed
///
/// Other columns are ignored.
pub fn load_file(path: &Path) -> Result<RecordStore, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let store = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }?;

    log::info!(
        "Loaded {} papers from {} (columns {}, {} rows without title dropped)",
        store.len(),
        path.display(),
        store.schema(),
        store.dropped_rows()
    );
    let undated = store
        .records()
        .iter()
        .filter(|r| r.publish_year().is_none())
        .count();
    if undated > 0 {
        log::warn!("{undated} papers have no parseable publish_time");
    }

    Ok(store)
}

fn open(path: &Path) -> Result<File, DataLoadError> {
    File::open(path).map_err(|e| DataLoadError::io(path, e))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions of the recognised fields in a CSV header.
#[derive(Debug, Default)]
struct CsvColumns {
    title: Option<usize>,
    journal: Option<usize>,
    abstract_text: Option<usize>,
    publish_time: Option<usize>,
}

impl CsvColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        CsvColumns {
            title: find("title"),
            journal: find("journal"),
            abstract_text: find("abstract"),
            publish_time: find("publish_time"),
        }
    }
}

fn load_csv(path: &Path) -> Result<RecordStore, DataLoadError> {
    read_csv(open(path)?)
}

/// Parse CSV text from any reader. Split out so tests can feed in-memory data.
fn read_csv<R: std::io::Read>(input: R) -> Result<RecordStore, DataLoadError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let schema = SourceSchema::from_columns(headers.iter());
    let cols = CsvColumns::from_headers(&headers);

    let cell = |record: &csv::StringRecord, idx: Option<usize>| {
        idx.and_then(|i| record.get(i)).map(str::to_string)
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(RawPaperRow {
            title: cell(&record, cols.title),
            journal: cell(&record, cols.journal),
            abstract_text: cell(&record, cols.abstract_text),
            publish_time: cell(&record, cols.publish_time),
        });
    }

    Ok(RecordStore::from_rows(rows, schema))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "…", "journal": "…", "abstract": "…", "publish_time": "2020-03-15" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RecordStore, DataLoadError> {
    let objects: Vec<Map<String, JsonValue>> =
        serde_json::from_reader(BufReader::new(open(path)?))?;
    Ok(records_from_json(objects))
}

fn records_from_json(objects: Vec<Map<String, JsonValue>>) -> RecordStore {
    let schema = objects.iter().fold(SourceSchema::default(), |acc, obj| {
        let s = SourceSchema::from_columns(obj.keys().map(String::as_str));
        SourceSchema {
            has_title: acc.has_title || s.has_title,
            has_journal: acc.has_journal || s.has_journal,
            has_abstract: acc.has_abstract || s.has_abstract,
            has_publish_time: acc.has_publish_time || s.has_publish_time,
        }
    });

    let rows = objects.iter().map(|obj| RawPaperRow {
        title: json_cell(obj.get("title")),
        journal: json_cell(obj.get("journal")),
        abstract_text: json_cell(obj.get("abstract")),
        publish_time: json_cell(obj.get("publish_time")),
    });
    RecordStore::from_rows(rows, schema)
}

fn json_cell(val: Option<&JsonValue>) -> Option<String> {
    match val? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of paper metadata.
///
/// Recognised columns may be any type Arrow can cast to UTF-8 (strings,
/// integers, `Date32`, timestamps); the text form is then cleaned exactly
/// like a CSV cell.
fn load_parquet(path: &Path) -> Result<RecordStore, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let schema = SourceSchema::from_columns(
        builder.schema().fields().iter().map(|f| f.name().as_str()),
    );
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let column = |name: &str| -> Result<Option<ArrayRef>, DataLoadError> {
            match batch.schema().index_of(name) {
                Ok(idx) => utf8_column(name, batch.column(idx)).map(Some),
                Err(_) => Ok(None),
            }
        };
        let title = column("title")?;
        let journal = column("journal")?;
        let abstract_text = column("abstract")?;
        let publish_time = column("publish_time")?;

        for row in 0..batch.num_rows() {
            rows.push(RawPaperRow {
                title: string_at(title.as_ref(), row),
                journal: string_at(journal.as_ref(), row),
                abstract_text: string_at(abstract_text.as_ref(), row),
                publish_time: string_at(publish_time.as_ref(), row),
            });
        }
    }

    Ok(RecordStore::from_rows(rows, schema))
}

// -- Parquet / Arrow helpers --

/// Cast a column to `Utf8` so every recognised field reads the same way.
fn utf8_column(name: &str, col: &ArrayRef) -> Result<ArrayRef, DataLoadError> {
    if col.data_type() == &DataType::Utf8 {
        return Ok(col.clone());
    }
    cast(col.as_ref(), &DataType::Utf8).map_err(|_| DataLoadError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    })
}

fn string_at(col: Option<&ArrayRef>, row: usize) -> Option<String> {
    let col = col?;
    if col.is_null(row) {
        return None;
    }
    Some(col.as_string::<i32>().value(row).to_string())
}
