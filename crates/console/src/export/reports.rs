//! Sheet layouts of the four exported reports.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use qms_core::datetime::{format_date_str, format_date_time, format_date_time_str, DATE_TIME_FORMAT};
use qms_models::product::Product;
use qms_models::report::{CostReportItem, DefectReportItem, InspectionReportItem};

use super::sheet::{CellValue, Column, SheetLayout};

const EXPORT_DATE: &str = "Export date:";
const QUALIFIED_SPLIT: &str = "Qualified / unqualified:";

fn stamp(at: NaiveDateTime) -> String {
    at.format(DATE_TIME_FORMAT).to_string()
}

pub fn defect_report(rows: &[DefectReportItem], exported_at: NaiveDateTime) -> SheetLayout {
    let columns = vec![
        Column::new("Supplier", 20.0),
        Column::new("Quality date", 20.0),
        Column::new("Product SN", 25.0),
        Column::new("Model SAP", 20.0),
        Column::new("Batch", 15.0),
        Column::new("Defect reason", 20.0),
    ];
    let mut layout = SheetLayout::new("Defect Report", columns)
        .with_summary("Total:", format!("{} pcs", rows.len()))
        .with_summary(EXPORT_DATE, stamp(exported_at));

    for item in rows {
        layout.push_row(vec![
            CellValue::text(&item.supplier_name),
            CellValue::text(format_date_time_str(&item.quality_date)),
            CellValue::text(&item.product_sn),
            CellValue::text(&item.product_model_sn),
            CellValue::text(&item.batch_number),
            CellValue::text(&item.defect_reason),
        ]);
    }
    layout
}

pub fn inspection_report(rows: &[InspectionReportItem], exported_at: NaiveDateTime) -> SheetLayout {
    let inspected: i64 = rows.iter().map(|r| r.inspection_count).sum();
    let qualified: i64 = rows.iter().map(|r| r.qualified_count).sum();
    let unqualified: i64 = rows.iter().map(|r| r.unqualified_count).sum();

    let columns = vec![
        Column::new("Model SN / batch", 25.0),
        Column::new("Description", 20.0),
        Column::new("Inspected", 12.0),
        Column::new("Qualified", 12.0),
        Column::new("Unqualified", 12.0),
        Column::new("Supplier", 25.0),
        Column::new("Inspection date", 15.0),
    ];
    let mut layout = SheetLayout::new("Inspection Report", columns)
        .with_summary("Inspected total:", inspected.to_string())
        .with_summary(QUALIFIED_SPLIT, format!("{qualified} / {unqualified}"))
        .with_summary(EXPORT_DATE, stamp(exported_at));

    for item in rows {
        layout.push_row(vec![
            CellValue::text(item.model_and_batch()),
            CellValue::text(item.description.as_deref().unwrap_or_default()),
            CellValue::count(item.inspection_count),
            CellValue::count(item.qualified_count),
            CellValue::count(item.unqualified_count),
            CellValue::text(&item.supplier_name),
            CellValue::text(format_date_str(&item.inspection_date)),
        ]);
    }
    layout
}

pub fn cost_report(rows: &[CostReportItem], exported_at: NaiveDateTime) -> SheetLayout {
    let tested: i64 = rows.iter().map(|r| r.total_count).sum();
    let qualified: i64 = rows.iter().map(|r| r.qualified_count).sum();
    let unqualified: i64 = rows.iter().map(|r| r.unqualified_count).sum();

    let columns = vec![
        Column::new("Supplier", 25.0),
        Column::new("Model SN", 15.0),
        Column::new("Motor type", 20.0),
        Column::new("Qualified", 12.0),
        Column::new("Unqualified", 12.0),
        Column::new("Tested", 12.0),
        Column::new("Test date", 15.0),
    ];
    let mut layout = SheetLayout::new("Cost Report", columns)
        .with_summary("Tested total:", tested.to_string())
        .with_summary(QUALIFIED_SPLIT, format!("{qualified} / {unqualified}"))
        .with_summary(EXPORT_DATE, stamp(exported_at));

    for item in rows {
        layout.push_row(vec![
            CellValue::text(&item.supplier_name),
            CellValue::text(&item.product_model_sn),
            CellValue::text(&item.motor_type),
            CellValue::count(item.qualified_count),
            CellValue::count(item.unqualified_count),
            CellValue::count(item.total_count),
            CellValue::text(format_date_str(&item.test_date)),
        ]);
    }
    layout
}

/// Products stored on one or more pallets.
pub fn traceability(rows: &[Product], exported_at: NaiveDateTime) -> SheetLayout {
    let pallets: BTreeSet<&str> = rows.iter().filter_map(Product::pallet_sn).collect();
    let pallets = if pallets.is_empty() {
        "none".to_string()
    } else {
        pallets.into_iter().collect::<Vec<_>>().join(", ")
    };

    let columns = vec![
        Column::new("ID", 10.0),
        Column::new("Product SN", 25.0),
        Column::new("Stored at", 20.0),
        Column::new("Pallet SN", 20.0),
        Column::new("Product line", 15.0),
    ];
    let mut layout = SheetLayout::new("Traceability", columns)
        .with_summary("Total:", format!("{} pcs", rows.len()))
        .with_summary("Pallets:", pallets)
        .with_summary(EXPORT_DATE, stamp(exported_at));

    for product in rows {
        layout.push_row(vec![
            CellValue::count(product.id),
            CellValue::text(&product.sn),
            CellValue::text(
                product
                    .created_at
                    .as_ref()
                    .map(format_date_time)
                    .unwrap_or_default(),
            ),
            CellValue::text(product.pallet_sn().unwrap_or_default()),
            CellValue::text(product.product_line_name().unwrap_or_default()),
        ]);
    }
    layout
}
