//! Playback engines: the tasks that actually play a mounted video or audio item.
//!
//! The app talks to an engine through a cloneable `EngineHandle`:
//!
//! ```text
//!   App ── EngineRequest ──▶ engine task ── EngineNotice ──▶ forwarder ──▶ AppMessage
//! ```
//!
//! Every `Load` starts a new session.  Notices carry the session they were
//! produced for, and the app drops any notice whose session is no longer
//! mounted.

pub mod mpv;
pub mod simulated;

use gallery_core::config::EngineKind;
use gallery_core::player::{EngineCommand, EngineEvent, PlayerDefaults};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineRequest {
    /// Replace whatever is loaded with `path`, paused at 0.
    Load {
        session: u64,
        path: String,
        /// Length from the catalog, if it has one.
        duration_hint: Option<f64>,
    },
    Command { session: u64, cmd: EngineCommand },
    Unload,
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineNotice {
    pub session: u64,
    pub event: EngineEvent,
}

impl EngineNotice {
    pub fn new(session: u64, event: EngineEvent) -> Self {
        Self { session, event }
    }
}

/// Cloneable handle to a running engine task.
#[derive(Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    pub async fn request(&self, req: EngineRequest) {
        if self.tx.send(req).await.is_err() {
            warn!("engine: task gone, request dropped");
        }
    }

    pub async fn shutdown(&self) {
        self.request(EngineRequest::Shutdown).await;
    }
}

/// Start the engine selected by config.  Notices go out on `notice_tx`.
pub fn spawn(
    kind: EngineKind,
    defaults: PlayerDefaults,
    notice_tx: mpsc::Sender<EngineNotice>,
) -> EngineHandle {
    let (tx, rx) = mpsc::channel::<EngineRequest>(64);
    info!("engine: starting {:?}", kind);
    match kind {
        EngineKind::Simulated => {
            tokio::spawn(simulated::run(rx, notice_tx));
        }
        EngineKind::Mpv => {
            tokio::spawn(mpv::run(rx, notice_tx, defaults));
        }
    }
    EngineHandle { tx }
}
