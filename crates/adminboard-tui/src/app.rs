//! Application state management for Adminboard.
//!
//! This module contains the `App` struct holding the UI state, the API client
//! (and through it the session), and the navigation logic that runs every
//! screen change through the login guard.

use std::path::PathBuf;
use std::sync::Arc;

use adminboard_core::models::{
    analytics_data, page_count, page_views_dataset, recent_activity, sessions_chart,
    stats_overview, Activity, DataPoint, MonthlyTraffic, SessionsChart, SparkLayout, StatCard,
    ACTIVITY_PAGE_SIZE,
};
use adminboard_core::routes::{self, Navigation};
use adminboard_core::{
    ApiClient, Config, FileTokenStore, MemoryTokenStore, Route, Session, TokenStore,
};
use anyhow::Result;
use rand::Rng;
use tracing::{debug, info, warn};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for username input.
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum length for the go-to-path prompt
const MAX_PATH_LENGTH: usize = 64;

/// Pre-fills the login username
const USERNAME_ENV: &str = "ADMINBOARD_USERNAME";

/// Pre-fills the login password
const PASSWORD_ENV: &str = "ADMINBOARD_PASSWORD";

// ============================================================================
// UI State Types
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    LoggingIn,
    EnteringPath,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Sample data behind the Overview screen
pub struct OverviewData {
    pub stats: Vec<StatCard>,
    pub analytics: Vec<DataPoint>,
    pub activity: Vec<Activity>,
    pub sessions: SessionsChart,
    pub page_views: Vec<MonthlyTraffic>,
}

impl OverviewData {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            stats: stats_overview(),
            analytics: analytics_data(),
            activity: recent_activity(),
            sessions: sessions_chart(rng),
            page_views: page_views_dataset(),
        }
    }
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    pub api: ApiClient,
    /// Where config is saved; `None` means the user's config directory
    config_file: Option<PathBuf>,

    // UI State
    pub state: AppState,
    pub route: Route,
    /// Protected route the guard turned away, restored after login
    pub return_to: Option<Route>,
    pub path_input: String,
    pub status_message: Option<String>,

    // Login form state
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Screen state
    pub overview: Option<OverviewData>,
    pub activity_page: usize,
    pub spark: SparkLayout,
}

impl App {
    /// Create the application with a file-backed session.
    ///
    /// Falls back to an in-memory token store if the data directory is
    /// unusable, so the dashboard still works for this run.
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn TokenStore> = match open_token_store(&config) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                warn!(error = %e, "Token file unavailable, tokens will not persist");
                Arc::new(MemoryTokenStore::new())
            }
        };

        let api = ApiClient::from_config(&config, Session::new(store))?;
        let mut app = Self::with_client(config, api);

        app.login_username = std::env::var(USERNAME_ENV)
            .ok()
            .or_else(|| app.config.last_username.clone())
            .unwrap_or_default();
        app.login_password = std::env::var(PASSWORD_ENV).unwrap_or_default();

        Ok(app)
    }

    /// Create the application around an existing client. Starts on the
    /// login screen; call `navigate` to pick the first real screen.
    pub fn with_client(config: Config, api: ApiClient) -> Self {
        Self {
            config,
            api,
            config_file: None,
            state: AppState::LoggingIn,
            route: Route::Login,
            return_to: None,
            path_input: String::new(),
            status_message: None,
            login_username: String::new(),
            login_password: String::new(),
            login_focus: LoginFocus::Username,
            login_error: None,
            overview: None,
            activity_page: 0,
            spark: SparkLayout::default(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `requested`, subject to the login guard
    pub fn navigate(&mut self, requested: Route) {
        match routes::resolve(requested, self.api.session()) {
            Navigation::Render(route) => self.show(route),
            Navigation::Redirect { to, from } => {
                debug!(from = from.path(), "Not authenticated, redirecting to login");
                self.return_to = Some(from);
                self.show(to);
            }
        }
    }

    /// Navigate to a typed path. Unknown paths leave the screen unchanged.
    pub fn navigate_path(&mut self, path: &str) {
        match Route::parse(path) {
            Some(route) => self.navigate(route),
            None => {
                debug!(path = path, "Unknown path");
                self.status_message = Some(format!("No such page: {}", path.trim()));
            }
        }
    }

    fn show(&mut self, route: Route) {
        if route == Route::Overview && (self.route != Route::Overview || self.overview.is_none()) {
            self.overview = Some(OverviewData::sample(&mut rand::thread_rng()));
            self.activity_page = 0;
        }

        self.route = route;
        if route == Route::Login {
            self.start_login();
        } else {
            self.state = AppState::Normal;
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn start_login(&mut self) {
        self.state = AppState::LoggingIn;
        self.login_focus = if self.login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };
        self.login_error = None;
    }

    /// Submit the login form. On success, continues to the screen the guard
    /// turned away, or the Overview.
    pub async fn attempt_login(&mut self) -> bool {
        let username = self.login_username.clone();
        let password = self.login_password.clone();

        if username.is_empty() || password.is_empty() {
            self.login_error = Some("Username and password required".to_string());
            return false;
        }

        self.login_error = None;

        if !self.api.login(&username, &password).await {
            self.login_error = Some("Login failed. Check your username and password.".to_string());
            return false;
        }

        self.config.last_username = Some(username);
        if let Err(e) = self.save_config() {
            warn!(error = %e, "Failed to save config");
        }

        self.login_password.clear();
        self.status_message = None;

        let target = self.return_to.take().unwrap_or(Route::Overview);
        info!(route = target.path(), "Login successful");
        self.navigate(target);
        true
    }

    /// Clear the tokens and re-run the guard on the current screen
    pub fn logout(&mut self) {
        self.api.logout();
        self.status_message = Some("Logged out".to_string());
        self.navigate(self.route);
    }

    fn save_config(&self) -> Result<()> {
        match &self.config_file {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        }
    }

    // =========================================================================
    // Go-to prompt
    // =========================================================================

    pub fn start_path_input(&mut self) {
        self.path_input = self.route.path().to_string();
        self.state = AppState::EnteringPath;
    }

    pub fn submit_path_input(&mut self) {
        let path = std::mem::take(&mut self.path_input);
        self.state = AppState::Normal;
        self.navigate_path(&path);
    }

    pub fn cancel_path_input(&mut self) {
        self.path_input.clear();
        self.state = AppState::Normal;
    }

    // =========================================================================
    // Screen actions
    // =========================================================================

    pub fn activity_pages(&self) -> usize {
        let rows = self.overview.as_ref().map(|o| o.activity.len()).unwrap_or(0);
        page_count(rows, ACTIVITY_PAGE_SIZE)
    }

    pub fn next_activity_page(&mut self) {
        if self.activity_page + 1 < self.activity_pages() {
            self.activity_page += 1;
        }
    }

    pub fn prev_activity_page(&mut self) {
        self.activity_page = self.activity_page.saturating_sub(1);
    }
}

fn open_token_store(config: &Config) -> Result<FileTokenStore> {
    let dir = config.data_dir()?;
    Ok(FileTokenStore::in_dir(&dir)?)
}

// ============================================================================
// Input Validation
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

/// Paths are plain ASCII without spaces
pub fn can_add_path_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PATH_LENGTH && c.is_ascii_graphic()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline_app() -> App {
        let api = ApiClient::new("http://127.0.0.1:9", Session::in_memory()).unwrap();
        App::with_client(Config::default(), api)
    }

    fn app_for(server: &MockServer, config_dir: &TempDir) -> App {
        let api = ApiClient::new(&server.uri(), Session::in_memory()).unwrap();
        let mut app = App::with_client(Config::default(), api);
        app.config_file = Some(config_dir.path().join("config.json"));
        app
    }

    async fn mount_login(server: &MockServer, status: u16) {
        let response = if status == 200 {
            ResponseTemplate::new(200).set_body_json(json!({ "access": "A", "refresh": "R" }))
        } else {
            ResponseTemplate::new(status)
        };
        Mock::given(method("POST"))
            .and(path("/api/token/"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    // -------------------------------------------------------------------------
    // Navigation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_unauthenticated_navigation_redirects_to_login() {
        let mut app = offline_app();
        app.navigate(Route::Reports);

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.state, AppState::LoggingIn);
        assert_eq!(app.return_to, Some(Route::Reports));
    }

    #[test]
    fn test_authenticated_navigation_renders() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");

        app.navigate(Route::Spark);
        assert_eq!(app.route, Route::Spark);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.return_to, None);
    }

    #[test]
    fn test_overview_loads_sample_data_on_entry() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");
        assert!(app.overview.is_none());

        app.navigate(Route::Overview);
        let overview = app.overview.as_ref().unwrap();
        assert_eq!(overview.stats.len(), 4);
        assert_eq!(overview.sessions.series.len(), 3);
        assert_eq!(overview.page_views.len(), 7);
    }

    #[test]
    fn test_navigate_path() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");

        app.navigate_path("/dashboard/reports/year-end/");
        assert_eq!(app.route, Route::ReportsYearEnd);

        app.navigate_path("/nowhere");
        assert_eq!(app.route, Route::ReportsYearEnd);
        assert_eq!(app.status_message.as_deref(), Some("No such page: /nowhere"));

        app.navigate_path("/");
        assert_eq!(app.route, Route::Overview);
    }

    #[test]
    fn test_path_prompt() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");
        app.navigate(Route::Users);

        app.start_path_input();
        assert_eq!(app.state, AppState::EnteringPath);
        assert_eq!(app.path_input, "/dashboard/users");

        app.path_input = "/dashboard/integrations".to_string();
        app.submit_path_input();
        assert_eq!(app.route, Route::Integrations);
        assert!(app.path_input.is_empty());

        app.start_path_input();
        app.cancel_path_input();
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.route, Route::Integrations);
    }

    #[test]
    fn test_logout_redirects_and_remembers_screen() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");
        app.navigate(Route::Integrations);

        app.logout();
        assert!(!app.api.is_authenticated());
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.return_to, Some(Route::Integrations));
    }

    #[test]
    fn test_activity_paging_stays_in_range() {
        let mut app = offline_app();
        app.api.session().store_pair("A", "R");
        app.navigate(Route::Overview);

        // Four sample rows fit on one page
        assert_eq!(app.activity_pages(), 1);
        app.next_activity_page();
        assert_eq!(app.activity_page, 0);
        app.prev_activity_page();
        assert_eq!(app.activity_page, 0);
    }

    // -------------------------------------------------------------------------
    // Login Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_start_login_focus() {
        let mut app = offline_app();
        app.start_login();
        assert_eq!(app.login_focus, LoginFocus::Username);

        app.login_username = "admin".to_string();
        app.start_login();
        assert_eq!(app.login_focus, LoginFocus::Password);
    }

    #[tokio::test]
    async fn test_attempt_login_requires_both_fields() {
        let mut app = offline_app();
        app.login_username = "admin".to_string();

        assert!(!app.attempt_login().await);
        assert_eq!(app.login_error.as_deref(), Some("Username and password required"));
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_attempt_login_returns_to_requested_screen() {
        let server = MockServer::start().await;
        mount_login(&server, 200).await;
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&server, &dir);

        app.navigate(Route::ReportsCurrent);
        assert_eq!(app.route, Route::Login);

        app.login_username = "admin".to_string();
        app.login_password = "secret".to_string();
        assert!(app.attempt_login().await);

        assert_eq!(app.route, Route::ReportsCurrent);
        assert_eq!(app.state, AppState::Normal);
        assert_eq!(app.return_to, None);
        assert!(app.login_password.is_empty());

        let saved = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(saved.last_username.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_attempt_login_defaults_to_overview() {
        let server = MockServer::start().await;
        mount_login(&server, 200).await;
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&server, &dir);

        app.login_username = "admin".to_string();
        app.login_password = "secret".to_string();
        assert!(app.attempt_login().await);
        assert_eq!(app.route, Route::Overview);
        assert!(app.overview.is_some());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_form() {
        let server = MockServer::start().await;
        mount_login(&server, 401).await;
        let dir = TempDir::new().unwrap();
        let mut app = app_for(&server, &dir);

        app.navigate(Route::Users);
        app.login_username = "admin".to_string();
        app.login_password = "wrong".to_string();

        assert!(!app.attempt_login().await);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.return_to, Some(Route::Users));
        assert!(app.login_error.is_some());
        assert_eq!(app.login_password, "wrong");
        assert!(!dir.path().join("config.json").exists());
    }

    // -------------------------------------------------------------------------
    // Input Validation Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\x00'));
        assert!(!can_add_username_char(0, '\n'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_path_char() {
        assert!(can_add_path_char(0, '/'));
        assert!(can_add_path_char(0, '-'));
        assert!(!can_add_path_char(0, ' '));
        assert!(!can_add_path_char(64, 'a'));
    }
}
