use super::theme::Rgb;

/// One month of site analytics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoint {
    pub date: String,
    pub users: u32,
    pub revenue: u32,
    pub sessions: u32,
}

/// A named, coloured chart series
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Rgb,
    pub data: Vec<u32>,
}

impl Series {
    pub fn max(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Points as (index, value) pairs for plotting
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, f64::from(*v)))
            .collect()
    }
}

pub fn analytics_data() -> Vec<DataPoint> {
    [
        ("2024-01", 1200, 25000, 450),
        ("2024-02", 1500, 28000, 520),
        ("2024-03", 1800, 32000, 580),
        ("2024-04", 2100, 35000, 620),
        ("2024-05", 2300, 34252, 573),
    ]
    .into_iter()
    .map(|(date, users, revenue, sessions)| DataPoint {
        date: date.to_string(),
        users,
        revenue,
        sessions,
    })
    .collect()
}

/// Users and sessions series for the analytics chart
pub fn analytics_series(data: &[DataPoint]) -> Vec<Series> {
    vec![
        Series {
            label: "Users".to_string(),
            color: Rgb::PRIMARY,
            data: data.iter().map(|d| d.users).collect(),
        },
        Series {
            label: "Sessions".to_string(),
            color: Rgb::SECONDARY,
            data: data.iter().map(|d| d.sessions).collect(),
        },
    ]
}

pub fn x_labels(data: &[DataPoint]) -> Vec<String> {
    data.iter().map(|d| d.date.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_series_maps_columns() {
        let data = analytics_data();
        let series = analytics_series(&data);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label, "Users");
        assert_eq!(series[0].data, vec![1200, 1500, 1800, 2100, 2300]);
        assert_eq!(series[1].label, "Sessions");
        assert_eq!(series[1].data, vec![450, 520, 580, 620, 573]);
        assert_eq!(series[0].max(), 2300);
    }

    #[test]
    fn test_x_labels() {
        let labels = x_labels(&analytics_data());
        assert_eq!(labels.first().map(String::as_str), Some("2024-01"));
        assert_eq!(labels.last().map(String::as_str), Some("2024-05"));
    }

    #[test]
    fn test_points() {
        let series = Series {
            label: "x".to_string(),
            color: Rgb::PRIMARY,
            data: vec![3, 5],
        };
        assert_eq!(series.points(), vec![(0.0, 3.0), (1.0, 5.0)]);
        assert_eq!(Series { data: vec![], ..series }.max(), 0);
    }
}
