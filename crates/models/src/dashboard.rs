//! Quality statistics served by the dashboard endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityStats {
    #[serde(default)]
    pub quality_rate: QualityRate,
    #[serde(default)]
    pub defect_type_distribution: Option<Vec<DefectTypeShare>>,
    #[serde(default)]
    pub supplier_defect_trend: Option<Vec<SupplierTrend>>,
    #[serde(default)]
    pub defect_trend_by_type: DefectTrendByType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRate {
    #[serde(default)]
    pub qualified_count: i64,
    #[serde(default)]
    pub defect_count: i64,
    #[serde(default)]
    pub total_count: i64,
    /// Percentage of qualified products, 0..=100.
    #[serde(default)]
    pub quality_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectTypeShare {
    #[serde(rename = "type")]
    pub defect_type: String,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierTrend {
    pub supplier_name: String,
    #[serde(default)]
    pub daily_data: Vec<SupplierDailyDefects>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDailyDefects {
    pub date: String,
    #[serde(default)]
    pub defect_rate: f64,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub defect_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefectTrendByType {
    #[serde(default)]
    pub terminal_data: Option<Vec<DailyCount>>,
    #[serde(default)]
    pub tag_data: Option<Vec<DailyCount>>,
    #[serde(default)]
    pub appearance_data: Option<Vec<DailyCount>>,
    #[serde(default)]
    pub noise_data: Option<Vec<DailyCount>>,
}

impl DefectTrendByType {
    pub fn series(&self, kind: DefectType) -> &[DailyCount] {
        let data = match kind {
            DefectType::Terminal => &self.terminal_data,
            DefectType::Tag => &self.tag_data,
            DefectType::Appearance => &self.appearance_data,
            DefectType::Noise => &self.noise_data,
        };
        data.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    #[serde(default)]
    pub count: i64,
}

/// The defect categories charted on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectType {
    Terminal,
    Tag,
    Appearance,
    Noise,
}

impl DefectType {
    pub const ALL: [DefectType; 4] = [
        DefectType::Terminal,
        DefectType::Tag,
        DefectType::Appearance,
        DefectType::Noise,
    ];

    /// The label the backend uses in `defectTypeDistribution`.
    pub fn label(self) -> &'static str {
        match self {
            DefectType::Terminal => "端子变形",
            DefectType::Tag => "铭牌不良",
            DefectType::Appearance => "外观不良",
            DefectType::Noise => "轴承噪音",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Query for `quality_stats`; both bounds are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: String,
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sections_deserialize_as_absent() {
        let json = r#"{
            "qualityRate": {"qualifiedCount": 9, "defectCount": 1, "totalCount": 10, "qualityRate": 90.0},
            "defectTypeDistribution": null,
            "supplierDefectTrend": null,
            "defectTrendByType": {"terminalData": null, "tagData": [{"date": "2024-05-01", "count": 2}],
                                  "appearanceData": null, "noiseData": null}
        }"#;
        let stats: QualityStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.quality_rate.total_count, 10);
        assert!(stats.defect_type_distribution.is_none());
        assert!(stats.defect_trend_by_type.series(DefectType::Terminal).is_empty());
        assert_eq!(stats.defect_trend_by_type.series(DefectType::Tag)[0].count, 2);
    }

    #[test]
    fn labels_map_back_to_types() {
        for kind in DefectType::ALL {
            assert_eq!(DefectType::from_label(kind.label()), Some(kind));
        }
        assert_eq!(DefectType::from_label("绝缘耐压不良"), None);
    }
}
