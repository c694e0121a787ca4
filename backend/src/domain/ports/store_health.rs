//! Port for probing the backing store from the health endpoint.

use async_trait::async_trait;

/// Connection state reported by a store probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    /// The last ping succeeded.
    Connected,
    /// The last ping failed.
    Disconnected,
}

impl StoreState {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

/// Outcome of a single store probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreProbe {
    /// Connection state.
    pub state: StoreState,
    /// Failure description when the ping failed.
    pub error: Option<String>,
}

impl StoreProbe {
    /// Successful probe.
    pub fn connected() -> Self {
        Self {
            state: StoreState::Connected,
            error: None,
        }
    }

    /// Failed probe carrying the cause.
    pub fn disconnected(cause: impl Into<String>) -> Self {
        Self {
            state: StoreState::Disconnected,
            error: Some(cause.into()),
        }
    }

    /// Whether the service can be considered up.
    pub fn is_healthy(&self) -> bool {
        self.state == StoreState::Connected
    }
}

/// Liveness probe against the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Ping the store. Never fails; failures are reported in the probe.
    async fn probe(&self) -> StoreProbe;
}

/// Probe that always reports a healthy store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStoreHealth;

#[async_trait]
impl StoreHealth for FixtureStoreHealth {
    async fn probe(&self) -> StoreProbe {
        StoreProbe::connected()
    }
}
