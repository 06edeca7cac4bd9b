use adminboard_core::Route;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::styles;

/// Screens that exist in the navigation but have no content yet
pub fn render(frame: &mut Frame, route: Route, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Page (Coming Soon)", route.title()),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(route.path(), styles::muted_style())),
    ];

    let block = Block::default()
        .title(format!(" {} ", route.title()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}
