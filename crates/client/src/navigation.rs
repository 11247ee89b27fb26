//! Console routes and the authentication guard in front of them.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::broadcast;

use crate::session::Session;

/// Buffer capacity of the navigation channel.
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Dashboard,
    Product,
    DefectReport,
    InspectionReport,
    CostReport,
    ProductLine,
    ProductModel,
    ProductionPlan,
    Pallet,
    Supplier,
    User,
    Api,
    Login,
}

impl Route {
    pub const ALL: [Route; 13] = [
        Route::Dashboard,
        Route::Product,
        Route::DefectReport,
        Route::InspectionReport,
        Route::CostReport,
        Route::ProductLine,
        Route::ProductModel,
        Route::ProductionPlan,
        Route::Pallet,
        Route::Supplier,
        Route::User,
        Route::Api,
        Route::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Product => "/product",
            Route::DefectReport => "/defect-report",
            Route::InspectionReport => "/inspection-report",
            Route::CostReport => "/cost-report",
            Route::ProductLine => "/product-line",
            Route::ProductModel => "/product-model",
            Route::ProductionPlan => "/production-plan",
            Route::Pallet => "/pallet",
            Route::Supplier => "/supplier",
            Route::User => "/user",
            Route::Api => "/api",
            Route::Login => "/login",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login)
    }

    /// Resolve a path; `/` is an alias of the dashboard.
    pub fn from_path(path: &str) -> Option<Route> {
        if path == "/" {
            return Some(Route::Dashboard);
        }
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// Tracks the current route and tells subscribers about every change.
pub struct Navigator {
    sender: broadcast::Sender<Route>,
    current: Mutex<Option<Route>>,
}

impl Navigator {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self {
            sender,
            current: Mutex::new(None),
        }
    }

    /// Enter `route`, or the login route when it needs a session that is
    /// not there. Returns the route actually entered.
    pub fn navigate(&self, route: Route, session: &Session) -> Route {
        let target = if route.requires_auth() && !session.is_authenticated() {
            tracing::debug!(requested = route.path(), "Not signed in, redirecting to login");
            Route::Login
        } else {
            route
        };
        self.enter(target);
        target
    }

    pub fn redirect_to_login(&self) {
        self.enter(Route::Login);
    }

    pub fn current(&self) -> Option<Route> {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Route> {
        self.sender.subscribe()
    }

    fn enter(&self, route: Route) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
        // No receivers is fine.
        let _ = self.sender.send(route);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
