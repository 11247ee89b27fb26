//! Wiring of session, navigator, HTTP client and notices.

use std::sync::Arc;
use std::time::Duration;

use qms_client::navigation::{Navigator, Route};
use qms_client::{ApiError, FileTokenStore, HttpClient, ManagementApi, Session, TokenStore};

use crate::config::ConsoleConfig;
use crate::notice::Notifier;

/// Everything a view needs, cheap to clone.
#[derive(Clone)]
pub struct Console {
    pub api: ManagementApi,
    pub notifier: Notifier,
}

impl Console {
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, ApiError> {
        let store = Arc::new(FileTokenStore::new(&config.token_file));
        Self::connect(&config.api_base_url, config.request_timeout(), store)
    }

    pub fn connect(
        base_url: &str,
        timeout: Duration,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let navigator = Arc::new(Navigator::new());
        let session = Arc::new(Session::new(store, navigator));
        let http = HttpClient::new(base_url, timeout, session)?;
        Ok(Self {
            api: ManagementApi::new(Arc::new(http)),
            notifier: Notifier::default(),
        })
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.http().session()
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        self.session().navigator()
    }

    /// Enter `route` through the authentication guard.
    pub fn navigate(&self, route: Route) -> Route {
        self.navigator().navigate(route, self.session())
    }
}
