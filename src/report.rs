use std::collections::BTreeMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet};
use serde::Serialize;

use crate::document::{DocumentRecord, Outcome};
use crate::error::{Error, Result};
use crate::stats::{self, ScoreStats};
use crate::vocab::Vocabulary;

/// Aggregate statistics for one input folder.
#[derive(Debug, Clone, Serialize)]
pub struct FolderSummary {
    pub folder: String,
    #[serde(flatten)]
    pub stats: ScoreStats,
}

/// The two tables handed to the spreadsheet writer. Pure shaping of data
/// already computed; nothing here recounts or rescores.
#[derive(Debug, Serialize)]
pub struct Report {
    /// Term column order, fixed for every row (vocabulary load order).
    pub terms: Vec<String>,
    pub results: Vec<DocumentRecord>,
    pub summary: Vec<FolderSummary>,
}

impl Report {
    /// Group records by folder and compute per-folder score statistics.
    /// Failed documents keep their Results row but are left out of the
    /// statistics, so one unreadable file does not drag a folder's mean down.
    pub fn build(records: Vec<DocumentRecord>, vocab: &Vocabulary) -> Self {
        let mut by_folder: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for rec in &records {
            if !matches!(rec.outcome, Outcome::Failed(_)) {
                by_folder.entry(rec.folder.clone()).or_default().push(rec.score);
            }
        }
        let summary = by_folder
            .into_iter()
            .filter_map(|(folder, scores)| {
                stats::summarize(&scores).map(|stats| FolderSummary { folder, stats })
            })
            .collect();
        Report {
            terms: vocab.terms().to_vec(),
            results: records,
            summary,
        }
    }

    fn results_header(&self) -> Vec<String> {
        let mut header = vec!["Folder".to_string(), "Article".to_string()];
        header.extend(self.terms.iter().cloned());
        header.extend(["Total", "Words", "Score", "Status"].map(String::from));
        header
    }

    fn results_row(&self, rec: &DocumentRecord) -> Vec<Cell> {
        let mut row = vec![Cell::Text(rec.folder.clone()), Cell::Text(rec.file.clone())];
        for term in &self.terms {
            row.push(Cell::Int(rec.counts.get(term).copied().unwrap_or(0)));
        }
        row.push(Cell::Int(rec.total));
        row.push(Cell::Int(rec.words));
        row.push(Cell::Float(round2(rec.score)));
        row.push(Cell::Text(rec.outcome.label()));
        row
    }
}

enum Cell {
    Text(String),
    Int(usize),
    Float(f64),
}

impl Cell {
    fn display_width(&self) -> usize {
        match self {
            Cell::Text(s) => s.len(),
            Cell::Int(n) => n.to_string().len(),
            Cell::Float(f) => format!("{f:.2}").len(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Report(e.to_string())
}

fn write_table(
    sheet: &mut Worksheet,
    header: &[String],
    rows: &[Vec<Cell>],
    header_format: &Format,
) -> Result<()> {
    for (col, name) in header.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, name.as_str(), header_format)
            .map_err(xlsx_err)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (row_idx, col_idx) = ((r + 1) as u32, c as u16);
            match cell {
                Cell::Text(s) => sheet.write_string(row_idx, col_idx, s.as_str()),
                Cell::Int(n) => sheet.write_number(row_idx, col_idx, *n as f64),
                Cell::Float(f) => sheet.write_number(row_idx, col_idx, *f),
            }
            .map_err(xlsx_err)?;
        }
    }
    // Fit columns to their content, capped so one long path cannot blow up
    // the layout.
    for (col, name) in header.iter().enumerate() {
        let content = rows
            .iter()
            .map(|row| row.get(col).map(Cell::display_width).unwrap_or(0))
            .max()
            .unwrap_or(0);
        let width = (content.max(name.len()) + 2).min(50);
        sheet
            .set_column_width(col as u16, width as f64)
            .map_err(xlsx_err)?;
    }
    Ok(())
}

/// Write the two-sheet workbook: per-document rows on "Results", per-folder
/// statistics on "Statistics".
pub fn write_xlsx(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Config(format!("cannot create output directory {}: {e}", parent.display()))
        })?;
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xE8E8E8))
        .set_border(FormatBorder::Thin);

    let results = workbook
        .add_worksheet()
        .set_name("Results")
        .map_err(xlsx_err)?;
    let rows: Vec<Vec<Cell>> = report
        .results
        .iter()
        .map(|rec| report.results_row(rec))
        .collect();
    write_table(results, &report.results_header(), &rows, &header_format)?;

    let statistics = workbook
        .add_worksheet()
        .set_name("Statistics")
        .map_err(xlsx_err)?;
    let header: Vec<String> =
        ["Folder", "Documents", "Mean Score", "Min", "Max", "Std Dev"]
            .map(String::from)
            .to_vec();
    let rows: Vec<Vec<Cell>> = report
        .summary
        .iter()
        .map(|s| {
            vec![
                Cell::Text(s.folder.clone()),
                Cell::Int(s.stats.count),
                Cell::Float(round2(s.stats.mean)),
                Cell::Float(round2(s.stats.min)),
                Cell::Float(round2(s.stats.max)),
                Cell::Float(round2(s.stats.std_dev)),
            ]
        })
        .collect();
    write_table(statistics, &header, &rows, &header_format)?;

    workbook
        .save(path)
        .map_err(|e| Error::Report(format!("cannot write {}: {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::TermCounter;

    fn records() -> (Vec<DocumentRecord>, Vocabulary) {
        let vocab: Vocabulary = "novel\nrobust".parse().unwrap();
        let counter = TermCounter::new(&vocab);
        let recs = vec![
            DocumentRecord::from_text("a", "one.pdf", "a robust result", &counter, None),
            DocumentRecord::from_text("a", "two.pdf", "nothing here", &counter, None),
            DocumentRecord::failed("b", "bad.pdf", &vocab, "encrypted".into()),
        ];
        (recs, vocab)
    }

    #[test]
    fn failed_rows_stay_in_results_but_not_in_summary() {
        let (recs, vocab) = records();
        let report = Report::build(recs, &vocab);
        assert_eq!(report.results.len(), 3);
        assert_eq!(report.summary.len(), 1);
        assert_eq!(report.summary[0].folder, "a");
        assert_eq!(report.summary[0].stats.count, 2);
    }

    #[test]
    fn rows_have_uniform_width() {
        let (recs, vocab) = records();
        let report = Report::build(recs, &vocab);
        let width = report.results_header().len();
        for rec in &report.results {
            assert_eq!(report.results_row(rec).len(), width);
        }
    }

    #[test]
    fn workbook_is_written_to_disk() {
        let (recs, vocab) = records();
        let report = Report::build(recs, &vocab);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("results.xlsx");
        write_xlsx(&report, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let (recs, vocab) = records();
        let report = Report::build(recs, &vocab);
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("results").is_some());
        assert!(json.get("summary").is_some());
        assert_eq!(json["terms"].as_array().unwrap().len(), 2);
    }
}
