use adminboard_core::Route;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoginFocus};

use super::styles;
use super::views::{overview, placeholder, spark};

/// Section labels for the navigation bar, in `Route::SECTIONS` order
const SECTION_KEYS: [&str; 5] = ["[1]", "[2]", "[3]", "[4]", "[5]"];

pub fn render(frame: &mut Frame, app: &App) {
    if app.route == Route::Login {
        render_login_screen(frame, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Sections
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_sections(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Admin Dashboard";
    let path = format!("  {}", app.route.path());
    let help_hint = "[?] Help";
    let used = title.len() + path.len() + help_hint.len() + 4;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(path, styles::muted_style()),
        Span::raw(" ".repeat((area.width as usize).saturating_sub(used))),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_sections(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.route.section();

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, section)) in SECTION_KEYS.iter().zip(Route::SECTIONS).enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("{} {}", key, section.title());
        if section == current {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    // Report pages on the right while in the Reports section
    if current == Route::Reports {
        let report_tabs = [
            ("[c]urrent", Route::ReportsCurrent),
            ("[l]ast quarter", Route::ReportsLastQuarter),
            ("[y]ear end", Route::ReportsYearEnd),
        ];

        let main_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let report_width: usize = report_tabs.iter().map(|(l, _)| l.len()).sum::<usize>()
            + (report_tabs.len() - 1) * 3; // " | " separators
        let padding = (area.width as usize).saturating_sub(main_width + report_width + 2);
        spans.push(Span::raw(" ".repeat(padding)));

        for (i, (label, route)) in report_tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", styles::muted_style()));
            }
            if app.route == *route {
                spans.push(Span::styled(*label, styles::tab_style(true)));
            } else {
                spans.push(Span::styled(*label, styles::muted_style()));
            }
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.route {
        Route::Overview => overview::render(frame, app, area),
        Route::Spark => spark::render(frame, app, area),
        Route::Users
        | Route::Reports
        | Route::ReportsCurrent
        | Route::ReportsLastQuarter
        | Route::ReportsYearEnd
        | Route::Integrations => placeholder::render(frame, app.route, area),
        // Drawn full-screen by `render`
        Route::Login => {}
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if matches!(app.state, AppState::EnteringPath) {
        let prompt = Line::from(vec![
            Span::styled(" Go to: ", styles::prompt_style()),
            Span::styled(format!("{}▌", app.path_input), styles::list_item_style()),
            Span::styled("   [Enter] go  [Esc] cancel", styles::muted_style()),
        ]);
        let paragraph = Paragraph::new(prompt).style(styles::status_bar_style());
        frame.render_widget(paragraph, area);
        return;
    }

    let left_text = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", app.route.title()),
    };
    let right_text = " [g]o to | [L]ogout | [q]uit ";

    let width = area.width as usize;
    let padding_len = width
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 24, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Admin Dashboard", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("1-5", "Switch section"),
        help_line("←/→", "Previous/next section"),
        help_line("g", "Go to a path (e.g. /dashboard/users)"),
        help_line("c/l/y", "Current/last quarter/year end report"),
        help_line("Esc", "Back to Reports from a report page"),
        Line::from(""),
        Line::from(Span::styled(" Dashboard", styles::highlight_style())),
        help_line("[ / ]", "Previous/next activity page"),
        Line::from(""),
        Line::from(Span::styled(" Spark", styles::highlight_style())),
        help_line("n/s/t", "Toggle Notebooks/Sources/Studio"),
        Line::from(""),
        Line::from(Span::styled(" Session", styles::highlight_style())),
        help_line("L", "Log out"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Text input shown as `Label: [value▌]`
fn form_field<'a>(label: &'a str, value: String, focused: bool) -> Line<'a> {
    let style = if focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if focused { "▌" } else { "" };
    Line::from(vec![
        Span::raw("      "),
        Span::styled(label, styles::muted_style()),
        Span::styled(" [", styles::muted_style()),
        Span::styled(format!("{:<20}{}", value, cursor), style),
        Span::styled("]", styles::muted_style()),
    ])
}

fn render_login_screen(frame: &mut Frame, app: &App) {
    let height = if app.login_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(50, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("              Admin Dashboard", styles::title_style())),
        Line::from(Span::styled("             Sign in to continue", styles::muted_style())),
        Line::from(""),
    ];

    lines.push(form_field(
        "Username:",
        app.login_username.chars().take(20).collect(),
        app.login_focus == LoginFocus::Username,
    ));

    let masked = "*".repeat(app.login_password.chars().count().min(20));
    lines.push(form_field(
        "Password:",
        masked,
        app.login_focus == LoginFocus::Password,
    ));

    lines.push(Line::from(""));
    let button_focused = app.login_focus == LoginFocus::Button;
    let (button_text, button_style) = if button_focused {
        (" ▶ Login ◀ ", styles::selected_style())
    } else {
        ("   Login   ", styles::list_item_style())
    };
    lines.push(Line::from(vec![
        Span::raw("               ["),
        Span::styled(button_text, button_style),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!(" {}", error), styles::error_style())));
    }

    let footer = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => " [Tab] next field  [Enter] submit  [Esc] quit ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title_bottom(Line::from(Span::styled(footer, styles::muted_style())));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
