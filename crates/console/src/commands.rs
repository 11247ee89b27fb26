//! Subcommand handlers of the `qms-console` binary.

use anyhow::{bail, Context as _};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tokio::sync::broadcast;

use qms_client::resource::MutableResource;
use qms_client::Route;
use qms_core::filters::DateRange;
use qms_core::types::DbId;
use qms_models::api_credential::ApiCredential;
use qms_models::auth::LoginRequest;
use qms_models::pallet::Pallet;
use qms_models::product_line::ProductLine;
use qms_models::product_model::ProductModel;
use qms_models::production_plan::ProductionPlan;
use qms_models::response::Page;
use qms_models::supplier::Supplier;
use qms_models::user::User;

use qms_console::config::ConsoleConfig;
use qms_console::context::Console;
use qms_console::dashboard::DashboardView;
use qms_console::export::{DirectorySink, ExportOutcome, ExportSpec};
use qms_console::login::LoginFlow;
use qms_console::notice::{drain, Notice, NoticeLevel};
use qms_console::pallet::PalletProducts;
use qms_console::view::{ListView, ViewSpec};
use qms_console::views::{
    CostReportFilters, CostReportSpec, DefectReportFilters, DefectReportSpec, EntitySpec,
    InspectionReportFilters, InspectionReportSpec, Listed, ProductFilters, ProductSearchView,
};

use crate::{Command, ReportKind, Table};

impl Table {
    fn route(self) -> Route {
        match self {
            Table::Suppliers => Route::Supplier,
            Table::ProductModels => Route::ProductModel,
            Table::ProductionPlans => Route::ProductionPlan,
            Table::ProductLines => Route::ProductLine,
            Table::Pallets => Route::Pallet,
            Table::Users => Route::User,
            Table::Apis => Route::Api,
        }
    }
}

impl ReportKind {
    fn route(self) -> Route {
        match self {
            ReportKind::Defect => Route::DefectReport,
            ReportKind::Inspection => Route::InspectionReport,
            ReportKind::Cost => Route::CostReport,
        }
    }
}

pub(crate) async fn run(console: &Console, config: &ConsoleConfig, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => {
            let flow = LoginFlow::new(console);
            flow.handle_login(&LoginRequest::new(username, password)).await?;
            console.navigate(Route::Dashboard);
            Ok(())
        }

        Command::Logout => {
            console.session().clear_auth();
            console.navigate(Route::Login);
            println!("Logged out");
            Ok(())
        }

        Command::List {
            resource,
            keyword,
            page,
            page_size,
        } => {
            enter(console, resource.route())?;
            match resource {
                Table::Suppliers => list::<Supplier>(console, keyword, page, page_size).await,
                Table::ProductModels => list::<ProductModel>(console, keyword, page, page_size).await,
                Table::ProductionPlans => list::<ProductionPlan>(console, keyword, page, page_size).await,
                Table::ProductLines => list::<ProductLine>(console, keyword, page, page_size).await,
                Table::Pallets => list::<Pallet>(console, keyword, page, page_size).await,
                Table::Users => list::<User>(console, keyword, page, page_size).await,
                Table::Apis => list::<ApiCredential>(console, keyword, page, page_size).await,
            }
        }

        Command::Delete { resource, ids } => {
            enter(console, resource.route())?;
            match resource {
                Table::Suppliers => delete::<Supplier>(console, &ids).await,
                Table::ProductModels => delete::<ProductModel>(console, &ids).await,
                Table::ProductionPlans => delete::<ProductionPlan>(console, &ids).await,
                Table::ProductLines => delete::<ProductLine>(console, &ids).await,
                Table::Users => delete::<User>(console, &ids).await,
                Table::Apis => delete::<ApiCredential>(console, &ids).await,
                Table::Pallets => bail!("pallets are read-only"),
            }
        }

        Command::Products {
            keyword,
            line,
            defect,
            reason,
            from,
            to,
            page,
            page_size,
        } => {
            enter(console, Route::Product)?;
            let filters = ProductFilters {
                keyword,
                product_line_id: line,
                has_defect: defect,
                defect_reason: reason,
                created: date_range(from, to)?,
            };
            let view = ProductSearchView::new(console);
            view.update_filters(|f| *f = filters).await;
            view.set_page(page, page_size).await;
            view.list().await?;
            print_snapshot(&view).await
        }

        Command::PalletProducts { pallet_id, export } => {
            enter(console, Route::Pallet)?;
            let detail = PalletProducts::new(console);
            detail.load(pallet_id).await?;
            if export {
                let sink = DirectorySink::new(&config.export_dir);
                print_outcome(detail.export(&sink).await?);
                Ok(())
            } else {
                print_json(&detail.products().await)
            }
        }

        Command::Report {
            kind,
            from,
            to,
            supplier_id,
            supplier,
            description,
            model_sn,
            batch,
            motor_type,
            page,
            page_size,
            export,
        } => {
            enter(console, kind.route())?;
            let range = date_range(from, to)?;
            let paging = Paging {
                page,
                page_size,
                export,
            };
            match kind {
                ReportKind::Defect => {
                    let filters = DefectReportFilters {
                        range,
                        supplier_id,
                        model_description: description,
                    };
                    report::<DefectReportSpec>(console, config, filters, paging).await
                }
                ReportKind::Inspection => {
                    let filters = InspectionReportFilters {
                        range,
                        product_model_sn: model_sn,
                        batch_number: batch,
                        supplier_name: supplier,
                    };
                    report::<InspectionReportSpec>(console, config, filters, paging).await
                }
                ReportKind::Cost => {
                    let filters = CostReportFilters {
                        range,
                        supplier_name: supplier,
                        product_model_sn: model_sn,
                        motor_type,
                    };
                    report::<CostReportSpec>(console, config, filters, paging).await
                }
            }
        }

        Command::Dashboard { from, to } => {
            enter(console, Route::Dashboard)?;
            let view = DashboardView::new(console);
            if let Some(range) = date_range(from, to)? {
                view.set_range(range).await;
            }
            view.fetch().await?;
            print_json(&view.snapshot().await.data)
        }

        Command::PlansOn { date } => {
            enter(console, Route::ProductionPlan)?;
            let plans = console.api.production_plans_on(date).await?;
            print_json(&plans)
        }
    }
}

/// Pass the navigation guard or fail with a hint to log in.
fn enter(console: &Console, route: Route) -> anyhow::Result<()> {
    if console.navigate(route) != route {
        bail!("Not logged in; run `qms-console login` first");
    }
    Ok(())
}

/// `--from` alone runs through today; `--to` alone is rejected.
fn date_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> anyhow::Result<Option<DateRange>> {
    let range = match (from, to) {
        (None, None) => return Ok(None),
        (Some(from), Some(to)) => DateRange::days(from, to),
        (Some(from), None) => DateRange::days(from, Local::now().date_naive()),
        (None, Some(_)) => bail!("--to requires --from"),
    };
    Ok(Some(range.context("Invalid date range")?))
}

async fn list<R>(console: &Console, keyword: String, page: u32, page_size: i32) -> anyhow::Result<()>
where
    R: Listed + Serialize,
{
    let view = ListView::<EntitySpec<R>>::new(console);
    view.update_filters(|f| f.keyword = keyword).await;
    view.set_page(page, page_size).await;
    view.list().await?;
    print_snapshot(&view).await
}

async fn delete<R>(console: &Console, ids: &[DbId]) -> anyhow::Result<()>
where
    R: Listed + MutableResource,
{
    let view = ListView::<EntitySpec<R>>::new(console);
    view.remove(ids).await?;
    Ok(())
}

struct Paging {
    page: u32,
    page_size: i32,
    export: bool,
}

async fn report<V>(
    console: &Console,
    config: &ConsoleConfig,
    filters: V::Filters,
    paging: Paging,
) -> anyhow::Result<()>
where
    V: ExportSpec,
    V::Row: Serialize,
{
    let view = ListView::<V>::new(console);
    view.update_filters(|f| *f = filters).await;

    if paging.export {
        let sink = DirectorySink::new(&config.export_dir);
        print_outcome(view.export_to_excel(&sink).await?);
        return Ok(());
    }

    view.set_page(paging.page, paging.page_size).await;
    view.list().await?;
    print_snapshot(&view).await
}

async fn print_snapshot<V>(view: &ListView<V>) -> anyhow::Result<()>
where
    V: ViewSpec,
    V::Row: Serialize,
{
    let snapshot = view.snapshot().await;
    print_json(&Page {
        items: snapshot.data,
        total: snapshot.pagination.total,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome(outcome: ExportOutcome) {
    if let ExportOutcome::Saved(path) = outcome {
        println!("{}", path.display());
    }
}

/// Echo queued notices on stderr, one per line.
pub(crate) fn print_notices(rx: &mut broadcast::Receiver<Notice>) {
    for notice in drain(rx) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}", notice.message);
    }
}
