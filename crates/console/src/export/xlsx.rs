//! Render a [`SheetLayout`] with `rust_xlsxwriter`.

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, XlsxError};

use super::sheet::{CellValue, SheetLayout};

const SUMMARY_ROW_HEIGHT: f64 = 22.0;
const HEADER_ROW_HEIGHT: f64 = 25.0;
const DATA_ROW_HEIGHT: f64 = 20.0;
const HEADER_FILL: u32 = 0xE6F3FF;

/// Serialize `layout` into the bytes of an `.xlsx` file.
pub fn render(layout: &SheetLayout) -> Result<Vec<u8>, XlsxError> {
    let summary_label = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_align(FormatAlign::Right)
        .set_align(FormatAlign::VerticalCenter);
    let summary_value = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);
    let header = Format::new()
        .set_bold()
        .set_font_size(12)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let data = Format::new()
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::VerticalCenter);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&layout.sheet_name)?;

    for (col, column) in layout.columns.iter().enumerate() {
        sheet.set_column_width(col as u16, column.width)?;
    }

    let last_col = layout.last_column() as u16;
    for (i, summary) in layout.summary.iter().enumerate() {
        let row = i as u32;
        sheet.set_row_height(row, SUMMARY_ROW_HEIGHT)?;
        sheet.write_string_with_format(row, 0, &summary.label, &summary_label)?;
        if last_col > 1 {
            sheet.merge_range(row, 1, row, last_col, &summary.value, &summary_value)?;
        } else {
            sheet.write_string_with_format(row, 1, &summary.value, &summary_value)?;
        }
    }

    let header_row = layout.header_row() as u32;
    sheet.set_row_height(header_row, HEADER_ROW_HEIGHT)?;
    for (col, column) in layout.columns.iter().enumerate() {
        sheet.write_string_with_format(header_row, col as u16, &column.header, &header)?;
    }

    let first = layout.first_data_row() as u32;
    for (i, cells) in layout.rows.iter().enumerate() {
        let row = first + i as u32;
        sheet.set_row_height(row, DATA_ROW_HEIGHT)?;
        for (col, cell) in cells.iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(text) => {
                    sheet.write_string_with_format(row, col, text, &data)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number_with_format(row, col, *n, &data)?;
                }
                CellValue::Blank => {
                    sheet.write_blank(row, col, &data)?;
                }
            }
        }
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sheet::Column;

    #[test]
    fn renders_a_zip_container() {
        let mut layout = SheetLayout::new("Report", vec![Column::new("A", 10.0), Column::new("B", 12.0)])
            .with_summary("Total:", "1 pcs");
        layout.push_row(vec![CellValue::text("a"), CellValue::number(1.5)]);

        let bytes = render(&layout).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn invalid_sheet_name_is_an_error() {
        let layout = SheetLayout::new("bad[name]", vec![Column::new("A", 10.0)]);
        assert!(render(&layout).is_err());
    }
}
