//! Sample data behind the dashboard views.
//!
//! Nothing here is fetched or persisted; each view builds its data when it
//! is entered.
//!
//! - `StatCard`: headline figures with a trend
//! - `DataPoint`, `Series`: the monthly analytics line chart
//! - `Activity`: the recent activity table
//! - `SessionsChart`, `MonthlyTraffic`: traffic charts
//! - `CollapsiblePanel`, `SparkLayout`: the Spark workspace panels
//! - `Rgb`, `Tone`: colours shared by the views

pub mod activity;
pub mod analytics;
pub mod panel;
pub mod stats;
pub mod theme;
pub mod traffic;

pub use activity::{page_count, page_slice, recent_activity, Activity, ActivityType, ACTIVITY_PAGE_SIZE};
pub use analytics::{analytics_data, analytics_series, x_labels, DataPoint, Series};
pub use panel::{CollapsiblePanel, PanelPosition, SparkLayout};
pub use stats::{stats_overview, StatCard, StatIcon, Trend};
pub use theme::{Rgb, Tone};
pub use traffic::{page_views_dataset, page_views_series, sessions_chart, MonthlyTraffic, SessionsChart};
