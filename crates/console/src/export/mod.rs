//! Spreadsheet export of report views.
//!
//! An export re-runs the view's current filters without paging, lays the
//! rows out as a [`SheetLayout`], renders it with `rust_xlsxwriter` and hands
//! the bytes to an [`ExportSink`] as `<ReportName>_<YYYY-MM-DD>.xlsx`.

pub mod reports;
pub mod sheet;
pub mod sink;
pub mod xlsx;

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use qms_client::ApiError;
use qms_core::datetime::DATE_FORMAT;

use crate::notice::Notifier;
use crate::view::{ListView, ViewSpec};

pub use sheet::{CellValue, Column, SheetLayout};
pub use sink::{DirectorySink, ExportSink};

/// A view whose rows can be exported as a report.
pub trait ExportSpec: ViewSpec {
    /// File-name stem, e.g. `DefectReport`.
    const REPORT_NAME: &'static str;

    fn layout(rows: &[Self::Row], exported_at: NaiveDateTime) -> SheetLayout;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The filters matched nothing; no file was written.
    NothingToExport,
    Saved(PathBuf),
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] ApiError),

    #[error("Failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to save workbook: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Fetch(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// `<report>_<YYYY-MM-DD>.xlsx`
pub fn file_name(report_name: &str, date: NaiveDate) -> String {
    format!("{report_name}_{}.xlsx", date.format(DATE_FORMAT))
}

/// Lay out, render and save `rows`, emitting the outcome as a notice.
pub fn export_rows<R>(
    notifier: &Notifier,
    report_name: &str,
    rows: &[R],
    layout: impl FnOnce(&[R], NaiveDateTime) -> SheetLayout,
    sink: &dyn ExportSink,
) -> Result<ExportOutcome, ExportError> {
    if rows.is_empty() {
        notifier.warning("Nothing to export");
        return Ok(ExportOutcome::NothingToExport);
    }

    let now = Local::now().naive_local();
    let saved = xlsx::render(&layout(rows, now))
        .map_err(ExportError::from)
        .and_then(|bytes| Ok(sink.save(&file_name(report_name, now.date()), &bytes)?));

    match saved {
        Ok(path) => {
            tracing::info!(report = report_name, rows = rows.len(), path = %path.display(), "Report exported");
            notifier.success("Export succeeded");
            Ok(ExportOutcome::Saved(path))
        }
        Err(e) => Err(fail(notifier, e)),
    }
}

fn fail(notifier: &Notifier, e: ExportError) -> ExportError {
    notifier.error(format!("Export failed: {}", e.user_message()));
    e
}

impl<V: ExportSpec> ListView<V> {
    /// Export every row matching the current filters.
    pub async fn export_to_excel(&self, sink: &dyn ExportSink) -> Result<ExportOutcome, ExportError> {
        let query = self.unpaginated_query().await;
        let rows = match V::fetch(&self.api, &query).await {
            Ok(page) => page.items,
            Err(e) => return Err(fail(&self.notifier, e.into())),
        };
        export_rows(&self.notifier, V::REPORT_NAME, &rows, V::layout, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::{drain, NoticeLevel};

    #[test]
    fn file_name_carries_the_date() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(file_name("DefectReport", day), "DefectReport_2024-05-01.xlsx");
    }

    #[test]
    fn empty_rows_warn_and_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        let outcome = export_rows::<u8>(
            &notifier,
            "CostReport",
            &[],
            |_, _| SheetLayout::new("Cost Report", vec![]),
            &DirectorySink::new(dir.path()),
        )
        .unwrap();

        assert_eq!(outcome, ExportOutcome::NothingToExport);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        let notices = drain(&mut rx);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Warning);
        assert_eq!(notices[0].message, "Nothing to export");
    }

    #[test]
    fn render_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();

        let result = export_rows(
            &notifier,
            "CostReport",
            &[1u8],
            |_, _| SheetLayout::new("bad[name]", vec![Column::new("A", 10.0)]),
            &DirectorySink::new(dir.path()),
        );

        assert!(matches!(result, Err(ExportError::Workbook(_))));
        let notices = drain(&mut rx);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("Export failed: "));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
