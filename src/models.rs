use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
}

/// Headline counts shown on the landing page.
///
/// These are fixed figures; nothing is counted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_families: u32,
    pub total_members: u32,
    pub completion_rate: u32,
    pub active_sectors: u32,
}

impl StatsResponse {
    pub fn current() -> Self {
        StatsResponse {
            total_families: 156,
            total_members: 623,
            completion_rate: 75,
            active_sectors: 2,
        }
    }
}

/// One labelled series as a chart library expects it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub labels: Vec<String>,
    pub data: Vec<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Registration,
    ImihigoCompleted,
    Verification,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub family: String,
    pub time: String,
}

/// Body of `GET /api/dashboard/stats`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub progress: ChartSeries,
    pub sectors: ChartSeries,
    pub recent_activities: Vec<Activity>,
}

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl DashboardStats {
    pub fn current() -> Self {
        DashboardStats {
            progress: ChartSeries {
                label: "Imihigo Completion Rate".to_string(),
                labels: labels(&["Jan", "Feb", "Mar", "Apr", "May", "Jun"]),
                data: vec![65, 70, 75, 78, 82, 85],
            },
            sectors: ChartSeries {
                label: "Families per Sector".to_string(),
                labels: labels(&["Kibungo", "Bumbogo", "Other Sectors"]),
                data: vec![156, 89, 45],
            },
            recent_activities: vec![
                Activity {
                    kind: ActivityKind::Registration,
                    family: "Uwimana Family".to_string(),
                    time: "2 hours ago".to_string(),
                },
                Activity {
                    kind: ActivityKind::ImihigoCompleted,
                    family: "Ndayisaba Family".to_string(),
                    time: "5 hours ago".to_string(),
                },
                Activity {
                    kind: ActivityKind::Verification,
                    family: "Mukamana Family".to_string(),
                    time: "1 day ago".to_string(),
                },
                Activity {
                    kind: ActivityKind::Registration,
                    family: "Habyarimana Family".to_string(),
                    time: "2 days ago".to_string(),
                },
            ],
        }
    }
}

/// Body of `GET /api/catalog`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogResponse {
    pub sectors: Vec<String>,
    pub relations: Vec<String>,
}
