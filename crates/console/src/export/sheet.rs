//! Workbook layout as plain data.
//!
//! A [`SheetLayout`] is built from report rows without touching any
//! spreadsheet library, then rendered by [`super::xlsx`]. The sheet reads,
//! top to bottom: summary rows, one blank row, the header row, data rows.

/// One data cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn number(value: impl Into<f64>) -> Self {
        CellValue::Number(value.into())
    }

    /// Counts come back as `i64`; they fit in an `f64` for any real report.
    pub fn count(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: f64,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// A `label: value` line above the table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheet_name: String,
    pub columns: Vec<Column>,
    pub summary: Vec<SummaryRow>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetLayout {
    pub fn new(sheet_name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            columns,
            summary: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_summary(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.summary.push(SummaryRow {
            label: label.into(),
            value: value.into(),
        });
        self
    }

    /// Append a data row. Short rows are padded with blanks.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len().max(cells.len()), CellValue::Blank);
        self.rows.push(cells);
    }

    /// Zero-based index of the header row.
    pub fn header_row(&self) -> usize {
        self.summary.len() + 1
    }

    pub fn first_data_row(&self) -> usize {
        self.header_row() + 1
    }

    /// Rows the rendered sheet occupies.
    pub fn row_count(&self) -> usize {
        self.first_data_row() + self.rows.len()
    }

    pub fn last_column(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }
}
