//! Dashboard overview - stat cards, traffic charts and recent activity.
//!
//! Layout, top to bottom:
//! - four stat cards
//! - analytics line chart | recent activity table
//! - stacked sessions chart | page views bar chart

use adminboard_core::models::{page_slice, Series, StatCard, Tone, ACTIVITY_PAGE_SIZE};
use adminboard_core::utils::{format_thousands, truncate_string};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph,
        Row, Table,
    },
    Frame,
};

use crate::app::{App, OverviewData};
use crate::ui::styles;

/// Headline and change chip for the page views chart
const PAGE_VIEWS_HEADLINE: &str = "1.3M";
const PAGE_VIEWS_CHANGE: &str = "-8%";

/// Longest action text shown in the activity table
const MAX_ACTION_WIDTH: usize = 24;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.overview else {
        let paragraph = Paragraph::new(Span::styled(" Loading...", styles::muted_style()));
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Min(8),
        ])
        .split(area);

    render_stat_cards(frame, &data.stats, rows[0]);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);
    render_analytics_chart(frame, data, middle[0]);
    render_activity_table(frame, app, data, middle[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_sessions_chart(frame, data, bottom[0]);
    render_page_views_chart(frame, data, bottom[1]);
}

// ============================================================================
// Stat cards
// ============================================================================

fn render_stat_cards(frame: &mut Frame, cards: &[StatCard], area: Rect) {
    if cards.is_empty() {
        return;
    }

    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        render_stat_card(frame, card, *column);
    }
}

fn render_stat_card(frame: &mut Frame, card: &StatCard, area: Rect) {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!(" {}", card.value), styles::value_style()),
        Span::raw("  "),
        Span::styled(card.icon.glyph(), styles::title_style()),
    ])];

    if let Some(trend) = card.trend {
        lines.push(Line::from(Span::styled(
            format!(" {} {}", trend.arrow(), trend.label()),
            styles::tone_style(trend.tone()),
        )));
    }

    let block = Block::default()
        .title(format!(" {} ", card.title))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Charts
// ============================================================================

/// `[0, max/2, max]` labels for a y axis whose upper bound is `max`
fn y_labels(max: f64) -> Vec<Span<'static>> {
    [0.0, max / 2.0, max]
        .iter()
        .map(|v| Span::styled(format_thousands(*v as u64), styles::muted_style()))
        .collect()
}

/// Upper y bound with some headroom above the tallest point
fn y_bound<'a>(series: impl Iterator<Item = &'a Series>) -> f64 {
    let max = series.map(Series::max).max().unwrap_or(0);
    (f64::from(max) * 1.1).max(1.0)
}

fn line_datasets<'a>(series: &'a [Series], points: &'a [Vec<(f64, f64)>]) -> Vec<Dataset<'a>> {
    series
        .iter()
        .zip(points)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(styles::rgb(s.color)))
                .data(data)
        })
        .collect()
}

fn chart_title(title: &str, headline: &str, change: &str, tone: Tone) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {} ", title), styles::title_style()),
        Span::styled(format!("{} ", headline), styles::value_style()),
        Span::styled(format!("{} ", change), styles::tone_style(tone)),
    ])
}

fn render_analytics_chart(frame: &mut Frame, data: &OverviewData, area: Rect) {
    let series = adminboard_core::models::analytics_series(&data.analytics);
    let points: Vec<Vec<(f64, f64)>> = series.iter().map(Series::points).collect();
    let labels = adminboard_core::models::x_labels(&data.analytics);
    let max_y = y_bound(series.iter());

    let x_labels: Vec<Span> = labels
        .iter()
        .map(|l| Span::styled(l.clone(), styles::muted_style()))
        .collect();

    let chart = Chart::new(line_datasets(&series, &points))
        .block(
            Block::default()
                .title(" Analytics Overview ")
                .title_style(styles::title_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, labels.len().saturating_sub(1) as f64])
                .labels(x_labels),
        )
        .y_axis(Axis::default().bounds([0.0, max_y]).labels(y_labels(max_y)));

    frame.render_widget(chart, area);
}

fn render_sessions_chart(frame: &mut Frame, data: &OverviewData, area: Rect) {
    let sessions = &data.sessions;

    // Each line is the running total up to its channel, so they draw as a stack
    let stacked: Vec<Series> = sessions
        .series
        .iter()
        .zip(sessions.stacked())
        .map(|(s, totals)| Series {
            label: s.label.clone(),
            color: s.color,
            data: totals,
        })
        .collect();
    let points: Vec<Vec<(f64, f64)>> = stacked.iter().map(Series::points).collect();
    let max_y = y_bound(stacked.iter());

    let days = sessions.labels.len();
    let x_labels: Vec<Span> = [0, days / 2, days.saturating_sub(1)]
        .iter()
        .filter_map(|i| sessions.labels.get(*i))
        .map(|l| Span::styled(l.clone(), styles::muted_style()))
        .collect();

    let chart = Chart::new(line_datasets(&stacked, &points))
        .block(
            Block::default()
                .title(chart_title(
                    "Sessions",
                    &sessions.headline,
                    &sessions.change,
                    sessions.change_tone,
                ))
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, days.saturating_sub(1) as f64])
                .labels(x_labels),
        )
        .y_axis(Axis::default().bounds([0.0, max_y]).labels(y_labels(max_y)));

    frame.render_widget(chart, area);
}

fn render_page_views_chart(frame: &mut Frame, data: &OverviewData, area: Rect) {
    let series = adminboard_core::models::page_views_series(&data.page_views);

    let groups: Vec<BarGroup> = data
        .page_views
        .iter()
        .enumerate()
        .map(|(month_index, month)| {
            let bars: Vec<Bar> = series
                .iter()
                .filter_map(|s| {
                    let value = *s.data.get(month_index)?;
                    Some(
                        Bar::default()
                            .value(u64::from(value))
                            .text_value(String::new())
                            .style(Style::default().fg(styles::rgb(s.color))),
                    )
                })
                .collect();
            BarGroup::default()
                .label(Line::from(month.month.clone()))
                .bars(&bars)
        })
        .collect();

    let legend: Vec<Span> = series
        .iter()
        .flat_map(|s| {
            [
                Span::styled(" ■ ", Style::default().fg(styles::rgb(s.color))),
                Span::styled(s.label.clone(), styles::muted_style()),
            ]
        })
        .collect();

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(chart_title(
                    "Page views and downloads",
                    PAGE_VIEWS_HEADLINE,
                    PAGE_VIEWS_CHANGE,
                    Tone::Error,
                ))
                .title_bottom(Line::from(legend))
                .borders(Borders::ALL)
                .border_style(styles::border_style(false)),
        )
        .bar_width(1)
        .bar_gap(0)
        .group_gap(2);

    for group in groups {
        chart = chart.data(group);
    }

    frame.render_widget(chart, area);
}

// ============================================================================
// Recent activity
// ============================================================================

fn render_activity_table(frame: &mut Frame, app: &App, data: &OverviewData, area: Rect) {
    let header = Row::new([
        Cell::from("User"),
        Cell::from("Action"),
        Cell::from("Type"),
        Cell::from("Time"),
    ])
    .style(styles::title_style())
    .height(1);

    let page = page_slice(&data.activity, app.activity_page, ACTIVITY_PAGE_SIZE);
    let rows: Vec<Row> = page
        .iter()
        .map(|activity| {
            Row::new(vec![
                Cell::from(activity.user.clone()),
                Cell::from(truncate_string(&activity.action, MAX_ACTION_WIDTH)),
                Cell::from(Span::styled(
                    activity.kind.as_str(),
                    styles::tone_style(activity.kind.tone()),
                )),
                Cell::from(activity.timestamp_display()),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Fill(2),
        Constraint::Fill(3),
        Constraint::Length(6),
        Constraint::Length(16),
    ];

    let title = format!(
        " Recent Activity ({}/{}) ",
        app.activity_page + 1,
        app.activity_pages()
    );

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .title_style(styles::title_style())
            .borders(Borders::ALL)
            .border_style(styles::border_style(false)),
    );

    frame.render_widget(table, area);
}
