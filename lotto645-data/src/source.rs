use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{validate_history, Draw, DrawRecord, RawNumber};

/// Parses a JSON array of `{"draw_no": .., "numbers": [..]}` records.
/// The first invalid record aborts the whole load.
pub fn parse_json(text: &str) -> Result<Vec<Draw>> {
    let records: Vec<DrawRecord> =
        serde_json::from_str(text).context("Invalid draw JSON")?;

    let draws = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            Draw::try_from(record).with_context(|| format!("Invalid draw record at index {}", i))
        })
        .collect::<Result<Vec<_>>>()?;

    validate_history(&draws)?;
    Ok(draws)
}

pub fn load_json(path: &Path) -> Result<Vec<Draw>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {:?}", path))?;
    parse_json(&text).with_context(|| format!("Cannot load draws from {:?}", path))
}

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let raw_draw_no = record.get(0).context("Missing draw_no column")?;
    let draw_no: u32 = raw_draw_no
        .parse()
        .with_context(|| format!("Cannot parse draw_no '{}'", raw_draw_no))?;

    // Blank cells stay in place and fail to parse; only trailing blanks are ignored.
    let mut cells: Vec<&str> = record.iter().skip(1).collect();
    while cells.last().is_some_and(|s| s.is_empty()) {
        cells.pop();
    }
    let numbers = cells
        .into_iter()
        .map(|s| RawNumber::Text(s.to_string()))
        .collect();

    Ok(Draw::try_from(DrawRecord { draw_no, numbers })?)
}

/// Comma-separated rows `draw_no,n1,n2,n3,n4,n5,n6` after a header line.
/// Rows are flexible so a wrong number count surfaces as a validation error.
pub fn parse_csv<R: Read>(input: R) -> Result<Vec<Draw>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let mut draws = Vec::new();
    for (i, record_result) in reader.records().enumerate() {
        let line = i + 1;
        let record = record_result.with_context(|| format!("Cannot read CSV record {}", line))?;
        let draw = parse_record(&record).with_context(|| format!("Invalid CSV record {}", line))?;
        draws.push(draw);
    }

    validate_history(&draws)?;
    Ok(draws)
}

pub fn load_csv(path: &Path) -> Result<Vec<Draw>> {
    let file = File::open(path).with_context(|| format!("Cannot open {:?}", path))?;
    parse_csv(file).with_context(|| format!("Cannot load draws from {:?}", path))
}
