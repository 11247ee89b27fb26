//! Dashboard: quality statistics reshaped into chart series.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate};
use qms_client::{ApiError, ManagementApi};
use qms_core::datetime::parse_lenient;
use qms_core::filters::DateRange;
use qms_models::dashboard::{DashboardQuery, DefectType, QualityStats};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::context::Console;

/// Days before today covered by the default range.
pub const DEFAULT_RANGE_DAYS: u64 = 7;

/// One value per charted defect type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerType<T> {
    pub terminal: T,
    pub tag: T,
    pub appearance: T,
    pub noise: T,
}

impl<T> PerType<T> {
    pub fn get(&self, kind: DefectType) -> &T {
        match kind {
            DefectType::Terminal => &self.terminal,
            DefectType::Tag => &self.tag,
            DefectType::Appearance => &self.appearance,
            DefectType::Noise => &self.noise,
        }
    }

    pub fn get_mut(&mut self, kind: DefectType) -> &mut T {
        match kind {
            DefectType::Terminal => &mut self.terminal,
            DefectType::Tag => &mut self.tag,
            DefectType::Appearance => &mut self.appearance,
            DefectType::Noise => &mut self.noise,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualitySplit {
    /// Percent.
    pub qualified: f64,
    pub unqualified: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionStats {
    pub total_completed: i64,
    pub qualified_count: i64,
    pub unqualified_count: i64,
}

/// Defect rate of one supplier, one value per axis day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub quality_rate: QualitySplit,
    pub defect_types: PerType<f64>,
    pub manufacturer_trends: Vec<SupplierSeries>,
    pub defect_trends: PerType<Vec<i64>>,
    pub stats: CompletionStats,
    /// Axis labels, `M/D`, one per day of the range.
    pub date_range: Vec<String>,
}

impl DashboardData {
    pub fn from_stats(stats: &QualityStats, range: &DateRange) -> Self {
        let days = range.each_day();
        let start = range.start_date();
        let slot = |raw: &str| -> Option<usize> {
            let day = parse_lenient(raw)?.date();
            let offset = usize::try_from((day - start).num_days()).ok()?;
            (offset < days.len()).then_some(offset)
        };

        let mut defect_types = PerType::<f64>::default();
        for share in stats.defect_type_distribution.iter().flatten() {
            if let Some(kind) = DefectType::from_label(&share.defect_type) {
                *defect_types.get_mut(kind) = share.rate;
            }
        }

        let manufacturer_trends = stats
            .supplier_defect_trend
            .iter()
            .flatten()
            .map(|supplier| {
                let mut values = vec![0.0; days.len()];
                for day in &supplier.daily_data {
                    if let Some(i) = slot(&day.date) {
                        values[i] = day.defect_rate;
                    }
                }
                SupplierSeries {
                    name: supplier.supplier_name.clone(),
                    values,
                }
            })
            .collect();

        let mut defect_trends = PerType {
            terminal: vec![0; days.len()],
            tag: vec![0; days.len()],
            appearance: vec![0; days.len()],
            noise: vec![0; days.len()],
        };
        for kind in DefectType::ALL {
            let series = defect_trends.get_mut(kind);
            for point in stats.defect_trend_by_type.series(kind) {
                if let Some(i) = slot(&point.date) {
                    series[i] = point.count;
                }
            }
        }

        let rate = &stats.quality_rate;
        Self {
            quality_rate: QualitySplit {
                qualified: rate.quality_rate,
                unqualified: 100.0 - rate.quality_rate,
            },
            defect_types,
            manufacturer_trends,
            defect_trends,
            stats: CompletionStats {
                total_completed: rate.total_count,
                qualified_count: rate.qualified_count,
                unqualified_count: rate.defect_count,
            },
            date_range: days.iter().map(|d| d.format("%-m/%-d").to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub loading: bool,
    pub error: Option<String>,
    pub range: DateRange,
    pub data: DashboardData,
}

pub struct DashboardView {
    api: ManagementApi,
    state: RwLock<DashboardState>,
    generation: AtomicU64,
}

impl DashboardView {
    pub fn new(console: &Console) -> Self {
        Self::with_today(console, Local::now().date_naive())
    }

    /// A view whose default range ends on `today`.
    pub fn with_today(console: &Console, today: NaiveDate) -> Self {
        Self {
            api: console.api.clone(),
            state: RwLock::new(DashboardState {
                loading: false,
                error: None,
                range: DateRange::last_days(DEFAULT_RANGE_DAYS, today),
                data: DashboardData::default(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn set_range(&self, range: DateRange) {
        self.state.write().await.range = range;
    }

    /// Fetch statistics for the selected range and rebuild the chart data.
    ///
    /// Only the latest call updates the state; an overtaken response is
    /// dropped and reported as `Ok(())`.
    pub async fn fetch(&self) -> Result<(), ApiError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let range = {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.range
        };
        let (start_date, end_date) = range.day_bounds();
        let query = DashboardQuery { start_date, end_date };

        let result = self.api.dashboard_stats(&query).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "Discarding superseded dashboard response");
            return Ok(());
        }
        state.loading = false;
        match result {
            Ok(stats) => {
                state.data = DashboardData::from_stats(&stats, &range);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch dashboard data");
                state.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.state.read().await.clone()
    }
}
