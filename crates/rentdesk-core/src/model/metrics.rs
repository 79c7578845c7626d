// ── Dashboard metrics and activity reports ──
//
// Display-only aggregates. The alerting path never reads these; they feed
// the dashboard tiles and the staff report screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::operator::{OperatorId, OperatorRole};

/// Aggregate business metrics for the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_revenue: f64,
    pub revenue_per_minute: f64,
    pub active_rentals: u64,
    pub total_users: u64,
    pub total_consoles: u64,
    pub available_consoles: u64,
    pub activity: Vec<ActivityEntry>,
}

/// One row of the dashboard's recent-activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub title: String,
    pub subtitle: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}

/// Per-operator processed-review counters for the daily report. Computed
/// by the backend as a review side effect; the console only renders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatorActivity {
    pub id: OperatorId,
    pub full_name: String,
    pub role: OperatorRole,
    pub today_actions: u64,
    pub total_requests: u64,
    pub total_kyc: u64,
}
