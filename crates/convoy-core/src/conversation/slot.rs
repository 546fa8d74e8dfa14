//! Construct-once holder for the process-wide [`AccessGateway`].
//!
//! The binary keeps one `static` slot and hands the resulting `Arc` to the
//! HTTP state, so handlers receive the gateway by injection instead of
//! reaching for a global.

use std::sync::{Arc, OnceLock};

use tracing::info;

use super::gateway::AccessGateway;
use super::store::StoreConnector;

pub struct GatewaySlot<C: StoreConnector> {
    cell: OnceLock<Arc<AccessGateway<C>>>,
}

impl<C: StoreConnector> GatewaySlot<C> {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the gateway, building it with `init` on the first call.
    ///
    /// Concurrent first callers block until the single construction finishes;
    /// `init` runs exactly once per slot and every caller gets the same `Arc`.
    pub fn get_or_init(&self, init: impl FnOnce() -> AccessGateway<C>) -> Arc<AccessGateway<C>> {
        let gateway = self.cell.get_or_init(|| {
            info!("Initializing conversation access gateway");
            Arc::new(init())
        });
        Arc::clone(gateway)
    }

    /// The gateway, if it has been built.
    pub fn get(&self) -> Option<Arc<AccessGateway<C>>> {
        self.cell.get().cloned()
    }
}

impl<C: StoreConnector> Default for GatewaySlot<C> {
    fn default() -> Self {
        Self::new()
    }
}
