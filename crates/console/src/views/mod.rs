//! Per-table view specs.

pub mod entity;
pub mod product;
pub mod report;

pub use entity::{
    ApiCredentialView, EntitySpec, KeywordFilters, Listed, PalletView, ProductLineView, ProductModelView,
    ProductionPlanView, SupplierView, UserView,
};
pub use product::{ProductFilters, ProductSearchSpec, ProductSearchView};
pub use report::{
    CostReportFilters, CostReportSpec, CostReportView, DefectReportFilters, DefectReportSpec,
    DefectReportView, InspectionReportFilters, InspectionReportSpec, InspectionReportView,
};
