//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use adminboard_core::Route;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_password_char, can_add_path_char, can_add_username_char, App, AppState, LoginFocus,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(app.state, AppState::LoggingIn) {
        return handle_login_input(app, key).await;
    }

    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    if matches!(app.state, AppState::EnteringPath) {
        handle_path_input(app, key);
        return Ok(false);
    }

    // Any key press clears a stale status message
    app.status_message = None;

    // Global keys
    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::ConfirmingQuit;
            return Ok(false);
        }
        KeyCode::Char('?') => {
            app.state = AppState::ShowingHelp;
            return Ok(false);
        }
        KeyCode::Char('g') => {
            app.start_path_input();
            return Ok(false);
        }
        KeyCode::Char('L') => {
            app.logout();
            return Ok(false);
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            if let Some(section) = Route::SECTIONS.get(index) {
                app.navigate(*section);
            }
            return Ok(false);
        }
        KeyCode::Left => {
            app.navigate(app.route.prev());
            return Ok(false);
        }
        KeyCode::Right => {
            app.navigate(app.route.next());
            return Ok(false);
        }
        _ => {}
    }

    // Screen-specific keys
    match app.route.section() {
        Route::Overview => handle_overview_input(app, key),
        Route::Reports => handle_reports_input(app, key),
        Route::Spark => handle_spark_input(app, key),
        _ => {}
    }

    Ok(false)
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Nothing behind the login screen to go back to
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => {
                // Failure leaves the form up with login_error set
                app.attempt_login().await;
            }
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.chars().count(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.chars().count(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

fn handle_path_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_path_input(),
        KeyCode::Enter => app.submit_path_input(),
        KeyCode::Backspace => {
            app.path_input.pop();
        }
        KeyCode::Char(c) => {
            if can_add_path_char(app.path_input.len(), c) {
                app.path_input.push(c);
            }
        }
        _ => {}
    }
}

fn handle_overview_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('[') | KeyCode::PageUp => app.prev_activity_page(),
        KeyCode::Char(']') | KeyCode::PageDown => app.next_activity_page(),
        _ => {}
    }
}

fn handle_reports_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('c') => app.navigate(Route::ReportsCurrent),
        KeyCode::Char('l') => app.navigate(Route::ReportsLastQuarter),
        KeyCode::Char('y') => app.navigate(Route::ReportsYearEnd),
        KeyCode::Esc if app.route != Route::Reports => app.navigate(Route::Reports),
        _ => {}
    }
}

fn handle_spark_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') => app.spark.notebooks.toggle(),
        KeyCode::Char('s') => app.spark.sources.toggle(),
        KeyCode::Char('t') => app.spark.studio.toggle(),
        _ => {}
    }
}
