//! Screen table and login guard.
//!
//! Every screen has a path. All `/dashboard` screens are protected: asking for
//! one without an access token redirects to `/login` and remembers where the
//! user was headed. The guard is evaluated on each navigation only.

use crate::auth::Session;

/// A navigable screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Overview,
    Users,
    Reports,
    ReportsCurrent,
    ReportsLastQuarter,
    ReportsYearEnd,
    Integrations,
    Spark,
}

impl Route {
    /// Every route, in table order
    pub const ALL: [Route; 9] = [
        Route::Login,
        Route::Overview,
        Route::Users,
        Route::Reports,
        Route::ReportsCurrent,
        Route::ReportsLastQuarter,
        Route::ReportsYearEnd,
        Route::Integrations,
        Route::Spark,
    ];

    /// Top-level dashboard sections, in navigation-bar order
    pub const SECTIONS: [Route; 5] = [
        Route::Overview,
        Route::Users,
        Route::Reports,
        Route::Integrations,
        Route::Spark,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Overview => "/dashboard",
            Route::Users => "/dashboard/users",
            Route::Reports => "/dashboard/reports",
            Route::ReportsCurrent => "/dashboard/reports/current",
            Route::ReportsLastQuarter => "/dashboard/reports/last-quarter",
            Route::ReportsYearEnd => "/dashboard/reports/year-end",
            Route::Integrations => "/dashboard/integrations",
            Route::Spark => "/dashboard/spark",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Overview => "Dashboard",
            Route::Users => "Users",
            Route::Reports => "Reports",
            Route::ReportsCurrent => "Current Month Report",
            Route::ReportsLastQuarter => "Last Quarter Report",
            Route::ReportsYearEnd => "Year End Report",
            Route::Integrations => "Integrations",
            Route::Spark => "Spark",
        }
    }

    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Resolve a path. `/` redirects to the dashboard; unknown paths are `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim();
        if path == "/" {
            return Some(Route::Overview);
        }
        let path = path.trim_end_matches('/');
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// The navigation-bar section this route belongs to
    pub fn section(&self) -> Route {
        match self {
            Route::ReportsCurrent | Route::ReportsLastQuarter | Route::ReportsYearEnd => {
                Route::Reports
            }
            other => *other,
        }
    }

    /// Next section in the navigation bar (wrapping around)
    pub fn next(&self) -> Route {
        let sections = Route::SECTIONS;
        match sections.iter().position(|r| *r == self.section()) {
            Some(i) => sections[(i + 1) % sections.len()],
            None => Route::Overview,
        }
    }

    /// Previous section in the navigation bar (wrapping around)
    pub fn prev(&self) -> Route {
        let sections = Route::SECTIONS;
        match sections.iter().position(|r| *r == self.section()) {
            Some(i) => sections[(i + sections.len() - 1) % sections.len()],
            None => Route::Overview,
        }
    }
}

/// The guard's two states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn of(session: &Session) -> Self {
        if session.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// Show `to` instead; `from` is where the user was headed
    Redirect { to: Route, from: Route },
}

/// Decide what a navigation to `requested` shows in the given state
pub fn guard(requested: Route, state: AuthState) -> Navigation {
    if requested.is_protected() && state == AuthState::Unauthenticated {
        Navigation::Redirect {
            to: Route::Login,
            from: requested,
        }
    } else {
        Navigation::Render(requested)
    }
}

/// `guard` evaluated against the session's current token state
pub fn resolve(requested: Route, session: &Session) -> Navigation {
    guard(requested, AuthState::of(session))
}
