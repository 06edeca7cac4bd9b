use rand::Rng;

use super::analytics::Series;
use super::theme::{Rgb, Tone};

/// Days covered by the sessions chart
const SESSION_DAYS: usize = 30;

/// Upper bound (exclusive) of the per-day random jitter
const SESSION_JITTER: f64 = 500.0;

/// Stacked daily sessions by acquisition channel
#[derive(Debug, Clone, PartialEq)]
pub struct SessionsChart {
    pub headline: String,
    pub change: String,
    pub change_tone: Tone,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl SessionsChart {
    /// Running totals per day, bottom series first, for drawing a stack
    pub fn stacked(&self) -> Vec<Vec<u32>> {
        let mut totals = vec![0u32; self.labels.len()];
        self.series
            .iter()
            .map(|series| {
                for (total, value) in totals.iter_mut().zip(&series.data) {
                    *total = total.saturating_add(*value);
                }
                totals.clone()
            })
            .collect()
    }
}

/// `floor(base + i * base * 0.1 + jitter)` for each day `i`, jitter in [0, 500)
pub fn generate_mock_data<R: Rng>(base: u32, days: usize, rng: &mut R) -> Vec<u32> {
    let base = f64::from(base);
    (0..days)
        .map(|i| {
            let jitter = rng.gen::<f64>() * SESSION_JITTER;
            (base + i as f64 * base * 0.1 + jitter).floor() as u32
        })
        .collect()
}

pub fn sessions_chart<R: Rng>(rng: &mut R) -> SessionsChart {
    let labels = (1..=SESSION_DAYS).map(|day| format!("Apr {}", day)).collect();
    let channel = |label: &str, base: u32, color: Rgb, rng: &mut R| Series {
        label: label.to_string(),
        color,
        data: generate_mock_data(base, SESSION_DAYS, rng),
    };

    SessionsChart {
        headline: "13,277".to_string(),
        change: "+35%".to_string(),
        change_tone: Tone::Success,
        labels,
        series: vec![
            channel("Direct", 2000, Rgb::PRIMARY_LIGHT, &mut *rng),
            channel("Referral", 3000, Rgb::PRIMARY, &mut *rng),
            channel("Organic", 4000, Rgb::PRIMARY_DARK, &mut *rng),
        ],
    }
}

/// Page views, downloads and conversions for one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTraffic {
    pub month: String,
    pub page_views: u32,
    pub downloads: u32,
    pub conversions: u32,
}

impl MonthlyTraffic {
    pub fn total(&self) -> u32 {
        self.page_views + self.downloads + self.conversions
    }
}

pub fn page_views_dataset() -> Vec<MonthlyTraffic> {
    [
        ("Jan", 2234, 3098, 4051),
        ("Feb", 3872, 4215, 2275),
        ("Mar", 2998, 2384, 3129),
        ("Apr", 4125, 2101, 4693),
        ("May", 3357, 4752, 3904),
        ("Jun", 2789, 3593, 2038),
        ("Jul", 2998, 2384, 2275),
    ]
    .into_iter()
    .map(|(month, page_views, downloads, conversions)| MonthlyTraffic {
        month: month.to_string(),
        page_views,
        downloads,
        conversions,
    })
    .collect()
}

/// One series per measure, in stacking order
pub fn page_views_series(dataset: &[MonthlyTraffic]) -> Vec<Series> {
    let series = |label: &str, color: Rgb, pick: fn(&MonthlyTraffic) -> u32| Series {
        label: label.to_string(),
        color,
        data: dataset.iter().map(pick).collect(),
    };

    vec![
        series("Page views", Rgb::PRIMARY_DARK, |m| m.page_views),
        series("Downloads", Rgb::PRIMARY, |m| m.downloads),
        series("Conversions", Rgb::PRIMARY_LIGHT, |m| m.conversions),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_mock_data_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_mock_data(2000, 30, &mut rng);

        assert_eq!(data.len(), 30);
        for (i, value) in data.iter().enumerate() {
            let floor = 2000 + i as u32 * 200;
            assert!(*value >= floor, "day {} below trend: {}", i, value);
            assert!(*value < floor + 500, "day {} above jitter: {}", i, value);
        }
    }

    #[test]
    fn test_sessions_chart_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let chart = sessions_chart(&mut rng);

        assert_eq!(chart.labels.len(), 30);
        assert_eq!(chart.labels[0], "Apr 1");
        assert_eq!(chart.labels[29], "Apr 30");

        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Direct", "Referral", "Organic"]);
        assert!(chart.series.iter().all(|s| s.data.len() == 30));
    }

    #[test]
    fn test_stacked_totals() {
        let mut rng = StdRng::seed_from_u64(3);
        let chart = sessions_chart(&mut rng);
        let stacked = chart.stacked();

        assert_eq!(stacked.len(), 3);
        assert_eq!(stacked[0], chart.series[0].data);
        let day0: u32 = chart.series.iter().map(|s| s.data[0]).sum();
        assert_eq!(stacked[2][0], day0);
    }

    #[test]
    fn test_page_views_series() {
        let dataset = page_views_dataset();
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset[0].total(), 2234 + 3098 + 4051);

        let series = page_views_series(&dataset);
        assert_eq!(series[0].label, "Page views");
        assert_eq!(series[1].data[1], 4215);
        assert_eq!(series[2].data[6], 2275);
    }
}
