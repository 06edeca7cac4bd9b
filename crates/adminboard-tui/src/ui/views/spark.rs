//! Spark workspace - three collapsible panels around a chat area.

use adminboard_core::models::{CollapsiblePanel, PanelPosition};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::styles;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let spark = &app.spark;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(spark.notebooks.columns()),
            Constraint::Length(spark.sources.columns()),
            Constraint::Min(20),
            Constraint::Length(spark.studio.columns()),
        ])
        .split(area);

    render_panel(frame, &spark.notebooks, 'n', chunks[0]);
    render_panel(frame, &spark.sources, 's', chunks[1]);
    render_chat_area(frame, chunks[2]);
    render_panel(frame, &spark.studio, 't', chunks[3]);
}

fn render_panel(frame: &mut Frame, panel: &CollapsiblePanel, key: char, area: Rect) {
    let toggle = Span::styled(
        format!("[{}]{}", key, panel.toggle_glyph()),
        styles::help_key_style(),
    );

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(!panel.collapsed));

    // The toggle sits on the edge facing the main area
    let toggle_line = match panel.position {
        PanelPosition::Left => Line::from(toggle).alignment(Alignment::Right),
        PanelPosition::Right => Line::from(toggle).alignment(Alignment::Left),
    };
    block = block.title(toggle_line);

    if panel.collapsed {
        frame.render_widget(block, area);
        return;
    }

    let block = block.title(Line::from(Span::styled(
        format!(" {} ", panel.title),
        styles::title_style(),
    )));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!(" {}", panel.title), styles::list_item_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!(" [{}] {}", key, panel.toggle_label()),
            styles::muted_style(),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chat_area(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(" Chat Area", styles::list_item_style())),
    ])
    .block(block);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminboard_core::{ApiClient, Config, Route, Session};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 20)).unwrap();
        terminal.draw(|f| render(f, app, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_collapsed_panel_hides_title() {
        let api = ApiClient::new("http://127.0.0.1:9", Session::in_memory()).unwrap();
        let mut app = App::with_client(Config::default(), api);
        app.api.session().store_pair("A", "R");
        app.navigate(Route::Spark);

        let screen = draw(&app);
        assert!(screen.contains("Notebooks"));
        assert!(screen.contains("Studio"));
        assert!(screen.contains("Chat Area"));

        app.spark.studio.toggle();
        let screen = draw(&app);
        assert!(!screen.contains("Studio"));
        assert!(screen.contains("Notebooks"));
    }
}
