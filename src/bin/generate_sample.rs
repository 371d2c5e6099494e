use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

const JOURNALS: &[&str] = &[
    "PLoS One",
    "Lancet",
    "BMJ",
    "Nature",
    "Journal of Virology",
    "Emerging Infectious Diseases",
    "Viruses",
    "Scientific Reports",
    "The New England Journal of Medicine",
    "International Journal of Environmental Research and Public Health",
    "Clinical Infectious Diseases",
    "Eurosurveillance",
];

const SUBJECTS: &[&str] = &[
    "COVID-19", "SARS-CoV-2", "coronavirus", "influenza", "MERS-CoV", "pneumonia",
    "respiratory infections", "viral shedding",
];

const TEMPLATES: &[&str] = &[
    "Clinical characteristics of {} patients",
    "The spread of {} in urban populations",
    "Transmission dynamics of {}: a modelling study",
    "Epidemiology and outcomes of {} in children",
    "Vaccine development against {}",
    "Risk factors for severe {} (a cohort study)",
    "Genomic surveillance of {} variants",
    "Impact of {} on healthcare workers",
];

const ABSTRACT_WORDS: &[&str] = &[
    "we", "report", "patients", "infection", "analysis", "results", "suggest", "cohort",
    "transmission", "model", "data", "significant", "clinical", "outcomes", "study",
];

/// One synthetic metadata row; `None` marks a missing cell.
struct Row {
    title: Option<String>,
    journal: Option<String>,
    abstract_text: Option<String>,
    publish_time: Option<String>,
}

fn generate_row(rng: &mut StdRng) -> Row {
    let title = if rng.random_bool(0.02) {
        None
    } else {
        let template = TEMPLATES.choose(rng).copied().unwrap_or("{}");
        let subject = SUBJECTS.choose(rng).copied().unwrap_or("COVID-19");
        Some(template.replace("{}", subject))
    };

    let journal = if rng.random_bool(0.1) {
        None
    } else {
        JOURNALS.choose(rng).map(|j| j.to_string())
    };

    let abstract_text = if rng.random_bool(0.15) {
        None
    } else {
        let n = rng.random_range(20..120);
        let words: Vec<&str> = (0..n)
            .filter_map(|_| ABSTRACT_WORDS.choose(rng).copied())
            .collect();
        Some(words.join(" "))
    };

    // Skewed towards recent years, with a few unparseable and partial dates.
    let publish_time = match rng.random_range(0..100) {
        0..=2 => Some("unknown".to_string()),
        3..=5 => None,
        6..=9 => Some(format!("{}", rng.random_range(1990..2019))),
        10..=29 => Some(format!(
            "{}-{:02}-{:02}",
            rng.random_range(2000..2019),
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        )),
        _ => Some(format!(
            "{}-{:02}-{:02}",
            rng.random_range(2019..=2022),
            rng.random_range(1..=12),
            rng.random_range(1..=28)
        )),
    };

    Row {
        title,
        journal,
        abstract_text,
        publish_time,
    }
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(["cord_uid", "title", "journal", "abstract", "publish_time"])?;
    for (i, row) in rows.iter().enumerate() {
        writer.write_record([
            format!("uid{i:06}").as_str(),
            row.title.as_deref().unwrap_or(""),
            row.journal.as_deref().unwrap_or(""),
            row.abstract_text.as_deref().unwrap_or(""),
            row.publish_time.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let column = |f: fn(&Row) -> Option<&str>| -> StringArray {
        rows.iter().map(f).collect()
    };
    let title = column(|r| r.title.as_deref());
    let journal = column(|r| r.journal.as_deref());
    let abstract_text = column(|r| r.abstract_text.as_deref());
    let publish_time = column(|r| r.publish_time.as_deref());

    let schema = Arc::new(Schema::new(vec![
        Field::new("title", DataType::Utf8, true),
        Field::new("journal", DataType::Utf8, true),
        Field::new("abstract", DataType::Utf8, true),
        Field::new("publish_time", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(title),
            Arc::new(journal),
            Arc::new(abstract_text),
            Arc::new(publish_time),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

/// Usage: `generate_sample [OUTPUT] [ROWS]`
///
/// Writes CSV unless OUTPUT ends in `.parquet`.
fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "metadata.csv".to_string()));
    let n_rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 20_000,
    };

    let mut rng = StdRng::seed_from_u64(42);
    let rows: Vec<Row> = (0..n_rows).map(|_| generate_row(&mut rng)).collect();

    let is_parquet = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&output, &rows)?;
    } else {
        write_csv(&output, &rows)?;
    }

    log::info!("Wrote {n_rows} synthetic papers to {}", output.display());
    println!("Wrote {n_rows} papers to {}", output.display());
    Ok(())
}
