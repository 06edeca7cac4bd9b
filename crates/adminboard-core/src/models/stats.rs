use super::theme::Tone;

/// Icon shown in the corner of a stat card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatIcon {
    People,
    Money,
    Chart,
    Trending,
}

impl StatIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            StatIcon::People => "☻",
            StatIcon::Money => "$",
            StatIcon::Chart => "∿",
            StatIcon::Trending => "↗",
        }
    }
}

/// Percentage change attached to a stat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    /// e.g. "12% increase", "2.5% decrease"
    pub fn label(&self) -> String {
        let direction = if self.is_positive { "increase" } else { "decrease" };
        format!("{}% {}", self.value, direction)
    }

    pub fn arrow(&self) -> &'static str {
        if self.is_positive {
            "▲"
        } else {
            "▼"
        }
    }

    pub fn tone(&self) -> Tone {
        Tone::for_change(self.is_positive)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: String,
    pub value: String,
    pub icon: StatIcon,
    pub trend: Option<Trend>,
}

impl StatCard {
    fn new(title: &str, value: &str, icon: StatIcon, trend: Option<Trend>) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            icon,
            trend,
        }
    }
}

/// The four headline cards on the overview
pub fn stats_overview() -> Vec<StatCard> {
    let up = |value| Some(Trend { value, is_positive: true });
    let down = |value| Some(Trend { value, is_positive: false });

    vec![
        StatCard::new("Total Users", "2,300", StatIcon::People, up(12.0)),
        StatCard::new("Revenue", "$34,252", StatIcon::Money, up(4.0)),
        StatCard::new("Active Sessions", "573", StatIcon::Chart, down(2.5)),
        StatCard::new("Conversion Rate", "2.39%", StatIcon::Trending, up(8.0)),
    ]
}
