//! Bridge construction and backend selection.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use fb_core::ports::{
    ClockPort, DesktopDialogPort, FallbackHostPort, HandleHostPort, MobileFsPort, PlatformAdapter,
    RecentStorePort,
};
use fb_core::{BackendId, BridgeConfig};
use fb_infra::store::paths::store_path_in;
use fb_infra::{LocalStore, SystemClock};
use fb_platform::{
    detect_host_environment, DesktopBackend, FallbackBackend, MobileBackend, ScopedHandleBackend,
};

use crate::bridge::FileBridge;
use crate::deps::BridgeDeps;

/// Builder wiring config and host ports into a [`FileBridge`].
///
/// The store and clock default to the SQLite-backed store (located per the
/// config) and the system clock; tests substitute their own.
pub struct FileBridgeBuilder {
    config: BridgeConfig,
    store: Option<Arc<dyn RecentStorePort>>,
    clock: Option<Arc<dyn ClockPort>>,
    desktop_dialog: Option<Arc<dyn DesktopDialogPort>>,
    handle_host: Option<Arc<dyn HandleHostPort>>,
    mobile_fs: Option<Arc<dyn MobileFsPort>>,
    fallback_host: Option<Arc<dyn FallbackHostPort>>,
}

impl FileBridgeBuilder {
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            store: None,
            clock: None,
            desktop_dialog: None,
            handle_host: None,
            mobile_fs: None,
            fallback_host: None,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn RecentStorePort>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_desktop_dialog(mut self, port: Arc<dyn DesktopDialogPort>) -> Self {
        self.desktop_dialog = Some(port);
        self
    }

    pub fn with_handle_host(mut self, port: Arc<dyn HandleHostPort>) -> Self {
        self.handle_host = Some(port);
        self
    }

    pub fn with_mobile_fs(mut self, port: Arc<dyn MobileFsPort>) -> Self {
        self.mobile_fs = Some(port);
        self
    }

    pub fn with_fallback_host(mut self, port: Arc<dyn FallbackHostPort>) -> Self {
        self.fallback_host = Some(port);
        self
    }

    /// Open the store, evaluate backend selection once and produce the
    /// facade bound to the winning backend.
    pub fn build(self) -> Result<FileBridge> {
        let config = self.config;

        let store: Arc<dyn RecentStorePort> = match self.store {
            Some(store) => store,
            None => {
                let store = match &config.store_dir {
                    Some(dir) => LocalStore::open_at(&store_path_in(dir), config.max_recent)?,
                    None => LocalStore::open(&config.app_id, config.max_recent)?,
                };
                Arc::new(store)
            }
        };
        let clock: Arc<dyn ClockPort> = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let fallback_host = self
            .fallback_host
            .context("a fallback host port is required")?;

        let deps = BridgeDeps {
            store,
            clock,
            desktop_dialog: self.desktop_dialog,
            handle_host: self.handle_host,
            mobile_fs: self.mobile_fs,
            fallback_host,
        };

        let environment = detect_host_environment();
        info!(?environment, "selecting file-access backend");
        let adapter = select_backend(&config, &deps);
        info!(backend = %adapter.id(), "file-access backend selected");
        Ok(FileBridge::new(adapter))
    }
}

fn candidate(
    id: BackendId,
    config: &BridgeConfig,
    deps: &BridgeDeps,
) -> Option<Arc<dyn PlatformAdapter>> {
    let persist = config.persist_by_default;
    match id {
        BackendId::Desktop => deps.desktop_dialog.clone().map(|dialog| {
            Arc::new(DesktopBackend::new(
                dialog,
                deps.store.clone(),
                deps.clock.clone(),
                persist,
            )) as Arc<dyn PlatformAdapter>
        }),
        BackendId::Mobile => deps.mobile_fs.clone().map(|fs| {
            Arc::new(MobileBackend::new(
                fs,
                deps.store.clone(),
                deps.clock.clone(),
                persist,
            )) as Arc<dyn PlatformAdapter>
        }),
        BackendId::ScopedHandle => deps.handle_host.clone().map(|host| {
            Arc::new(ScopedHandleBackend::new(
                host,
                deps.store.clone(),
                deps.clock.clone(),
                persist,
            )) as Arc<dyn PlatformAdapter>
        }),
        BackendId::Fallback => Some(Arc::new(FallbackBackend::new(
            deps.fallback_host.clone(),
            deps.store.clone(),
            deps.clock.clone(),
            persist,
        ))),
    }
}

/// Evaluated once at build time. A forced backend wins when its self-test
/// passes; otherwise the fixed probe order applies, with the fallback
/// backend as the guaranteed terminal state.
fn select_backend(config: &BridgeConfig, deps: &BridgeDeps) -> Arc<dyn PlatformAdapter> {
    if let Some(forced) = config.forced_backend {
        match candidate(forced, config, deps) {
            Some(adapter) if adapter.is_supported() => return adapter,
            Some(_) => {
                warn!(backend = %forced, "forced backend failed its self-test, probing instead")
            }
            None => {
                warn!(backend = %forced, "forced backend has no host port wired, probing instead")
            }
        }
    }

    let mut order = vec![BackendId::Desktop, BackendId::Mobile];
    if config.prefer_scoped_handles {
        order.push(BackendId::ScopedHandle);
    }
    for id in order {
        if let Some(adapter) = candidate(id, config, deps) {
            if adapter.is_supported() {
                return adapter;
            }
        }
    }

    // Unconditionally constructible and always supported.
    Arc::new(FallbackBackend::new(
        deps.fallback_host.clone(),
        deps.store.clone(),
        deps.clock.clone(),
        config.persist_by_default,
    ))
}
