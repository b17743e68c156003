//! mpv engine: drives an external mpv process over its JSON IPC socket.
//!
//! Architecture:
//!
//! ```text
//!   run()  ── EngineRequest ──▶  MpvHandle::send()
//!    │                               │
//!    │                               ├── writer_task  ← serialises requests → socket
//!    │                               └── reader_task  ← JSON lines from socket
//!    │                                                    ├── response (request_id) → oneshot
//!    └◀── translate() ◀── MpvEvent ◀────────────────────────┘ event / property-change
//! ```
//!
//! Events are tagged through a `SessionGate`: after a `Load`, nothing is
//! forwarded until mpv reports `start-file` for the new file.
//!
//! The process is spawned on the first `Load` and respawned if it died.
//! A spawn or load failure becomes `EngineEvent::LoadFailed`; nothing is
//! retried.
//!
//! Platform notes:
//! - Unix:   Unix domain sockets
//! - Windows: Named pipes  \\.\pipe\<name>

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};
use tracing::{debug, info, warn};

use gallery_core::platform;
use gallery_core::player::{EngineCommand, EngineEvent, PlayerDefaults};

use super::{EngineNotice, EngineRequest};

#[cfg(unix)]
use tokio::net::UnixStream;

#[cfg(windows)]
use tokio::net::windows::named_pipe::ClientOptions;

// ── global request-id counter ─────────────────────────────────────────────────

static NEXT_REQ_ID: AtomicU64 = AtomicU64::new(1);

// ── observation property IDs ──────────────────────────────────────────────────

pub const OBS_TIME_POS: u64 = 1;
pub const OBS_DURATION: u64 = 2;
pub const OBS_FULLSCREEN: u64 = 3;

// ── internal channel types ────────────────────────────────────────────────────

type PendingMap = Arc<Mutex<HashMap<u64, oneshot::Sender<anyhow::Result<Value>>>>>;

struct PendingRequest {
    req_id: u64,
    payload: String, // serialised JSON line (already has '\n')
    reply: oneshot::Sender<anyhow::Result<Value>>,
}

/// An mpv event / property-change that arrived unsolicited (no request_id).
#[derive(Debug, Clone)]
pub struct MpvEvent {
    pub raw: Value,
}

impl MpvEvent {
    /// Returns `Some((obs_id, data))` if this is a property-change event.
    pub fn as_property_change(&self) -> Option<(u64, &Value)> {
        if self.raw.get("event")?.as_str()? == "property-change" {
            let id = self.raw.get("id")?.as_u64()?;
            let data = self.raw.get("data").unwrap_or(&Value::Null);
            Some((id, data))
        } else {
            None
        }
    }

    /// Returns the event name, e.g. "end-file", "start-file", "file-loaded".
    pub fn event_name(&self) -> Option<&str> {
        self.raw.get("event")?.as_str()
    }
}

/// Map an mpv event onto the player's vocabulary.
///
/// `end-file` only counts when the file really ended (`eof`) or failed
/// (`error`); `stop` and `redirect` come from replacing the file ourselves.
pub fn translate(ev: &MpvEvent) -> Option<EngineEvent> {
    if let Some((id, data)) = ev.as_property_change() {
        return match id {
            OBS_TIME_POS => data.as_f64().map(EngineEvent::TimeUpdate),
            OBS_DURATION => data
                .as_f64()
                .map(|duration| EngineEvent::MetadataLoaded { duration }),
            OBS_FULLSCREEN => data.as_bool().map(EngineEvent::FullscreenChanged),
            _ => None,
        };
    }
    match ev.event_name()? {
        "end-file" => match ev.raw.get("reason").and_then(Value::as_str) {
            Some("eof") => Some(EngineEvent::Ended),
            Some("error") => {
                let reason = ev
                    .raw
                    .get("file_error")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                Some(EngineEvent::LoadFailed(reason.to_string()))
            }
            _ => None,
        },
        _ => None,
    }
}

// ── public handle ─────────────────────────────────────────────────────────────

/// Cloneable handle to the mpv writer task.  Use `send()` to fire a command
/// and await the response.
#[derive(Clone)]
pub struct MpvHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl MpvHandle {
    pub async fn send(&self, command: Value) -> anyhow::Result<Value> {
        let req_id = NEXT_REQ_ID.fetch_add(1, Ordering::Relaxed);
        let msg = json!({ "command": command, "request_id": req_id });
        let mut raw = serde_json::to_string(&msg)?;
        raw.push('\n');

        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(PendingRequest {
                req_id,
                payload: raw,
                reply: reply_tx,
            })
            .await
            .map_err(|_| anyhow::anyhow!("mpv writer task gone"))?;

        tokio::time::timeout(tokio::time::Duration::from_secs(5), reply_rx)
            .await
            .map_err(|_| anyhow::anyhow!("mpv IPC timeout for req={}", req_id))?
            .map_err(|_| anyhow::anyhow!("mpv reply channel dropped req={}", req_id))?
    }

    /// Load `path` paused, replacing whatever is playing.
    pub async fn load_file(&self, path: &str) -> anyhow::Result<()> {
        self.send(json!(["set_property", "pause", true])).await?;
        debug!("mpv: loadfile {}", path);
        self.send(json!(["loadfile", path, "replace"])).await?;
        Ok(())
    }

    pub async fn stop(&self) -> anyhow::Result<()> {
        self.send(json!(["stop"])).await?;
        Ok(())
    }

    /// Forward one player command as the matching property write.
    pub async fn apply(&self, cmd: &EngineCommand) -> anyhow::Result<()> {
        let command = match cmd {
            EngineCommand::Play => json!(["set_property", "pause", false]),
            EngineCommand::Pause => json!(["set_property", "pause", true]),
            EngineCommand::Seek(t) => json!(["set_property", "time-pos", t]),
            EngineCommand::SetVolume(v) => {
                json!(["set_property", "volume", (v * 100.0).clamp(0.0, 100.0)])
            }
            EngineCommand::SetMuted(m) => json!(["set_property", "mute", m]),
            EngineCommand::SetFullscreen(f) => json!(["set_property", "fullscreen", f]),
        };
        self.send(command).await?;
        Ok(())
    }

    /// Register observe_property for the properties the player follows.
    /// Must be called after every fresh connection.
    pub async fn observe_all_properties(&self) {
        let props = [
            (OBS_TIME_POS, "time-pos"),
            (OBS_DURATION, "duration"),
            (OBS_FULLSCREEN, "fullscreen"),
        ];
        for (id, name) in &props {
            match self.send(json!(["observe_property", id, name])).await {
                Ok(_) => debug!("mpv: observe_property id={} name={}", id, name),
                Err(e) => warn!("mpv: observe_property {} failed: {}", name, e),
            }
        }
    }
}

// ── driver ────────────────────────────────────────────────────────────────────

/// Owns the mpv child process.
pub struct MpvDriver {
    pub socket_name: String,
    process: Option<tokio::process::Child>,
    volume: f64,
}

impl MpvDriver {
    pub fn new(volume: f64) -> Self {
        Self {
            socket_name: platform::mpv_socket_name(),
            process: None,
            volume,
        }
    }

    pub fn process_alive(&mut self) -> bool {
        if let Some(ref mut child) = self.process {
            match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    if let Some(code) = status.code() {
                        warn!("mpv process exited with code: {}", code);
                    } else {
                        warn!("mpv process terminated by signal");
                    }
                    false
                }
                Err(e) => {
                    warn!("mpv process_alive check failed: {}", e);
                    false
                }
            }
        } else {
            false
        }
    }

    /// Kill the process if running.
    pub async fn kill(&mut self) {
        if let Some(mut p) = self.process.take() {
            let _ = p.kill().await;
        }
    }

    fn spawn_process(&mut self) -> anyhow::Result<()> {
        let mpv_binary =
            platform::find_mpv_binary().ok_or_else(|| anyhow::anyhow!("mpv binary not found"))?;

        let vol_arg = format!(
            "--volume={}",
            (self.volume * 100.0).clamp(0.0, 100.0).round() as i64
        );

        let stderr_path = platform::data_dir().join("mpv-stderr.log");
        let stderr_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&stderr_path)?;
        info!("mpv: logging stderr to {:?}", stderr_path);

        let child = tokio::process::Command::new(&mpv_binary)
            .arg("--idle=yes")
            .arg(platform::mpv_socket_arg())
            .arg("--quiet")
            .arg("--title=מדיה גיטהאב")
            .arg(&vol_arg)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(stderr_file)
            .kill_on_drop(true)
            .spawn()?;
        info!("mpv: spawned process with pid {:?}", child.id());
        self.process = Some(child);
        Ok(())
    }

    // ── spawn / connect ───────────────────────────────────────────────────────

    #[cfg(unix)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        self.kill().await;

        let socket_path = std::path::PathBuf::from(&self.socket_name);
        let _ = tokio::fs::remove_file(&socket_path).await;

        info!("mpv: spawning new process");
        self.spawn_process()?;

        // Wait for socket to appear
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if socket_path.exists() {
                break;
            }
        }
        if !socket_path.exists() {
            anyhow::bail!("mpv IPC socket did not appear");
        }

        let stream = UnixStream::connect(&socket_path).await?;
        info!("mpv: connected to IPC socket");
        Ok(start_io_tasks(stream, event_tx))
    }

    #[cfg(windows)]
    pub async fn spawn_and_connect(
        &mut self,
        event_tx: mpsc::Sender<MpvEvent>,
    ) -> anyhow::Result<MpvHandle> {
        self.kill().await;

        info!("mpv: spawning new process");
        self.spawn_process()?;

        let pipe_path = format!(r"\\.\pipe\{}", self.socket_name);
        for _ in 0..50 {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            if let Ok(client) = ClientOptions::new().open(&pipe_path) {
                info!("mpv: connected to named pipe");
                return Ok(start_io_tasks(client, event_tx));
            }
        }
        anyhow::bail!("mpv named pipe did not appear")
    }
}

fn start_io_tasks<S>(stream: S, event_tx: mpsc::Sender<MpvEvent>) -> MpvHandle
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (read_half, write_half) = tokio::io::split(stream);
    let reader = BufReader::new(read_half);

    // req_id → reply channel.  Writer inserts, reader resolves.
    let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
    let (cmd_tx, cmd_rx) = mpsc::channel::<PendingRequest>(64);

    tokio::spawn(writer_task(write_half, cmd_rx, pending.clone()));
    tokio::spawn(reader_task(reader, pending, event_tx));

    MpvHandle { tx: cmd_tx }
}

// ── reader task ───────────────────────────────────────────────────────────────

async fn reader_task<R>(
    mut reader: BufReader<R>,
    pending: PendingMap,
    event_tx: mpsc::Sender<MpvEvent>,
) where
    R: AsyncRead + Unpin,
{
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("mpv reader: connection closed");
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC connection closed")));
                }
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let val: Value = match serde_json::from_str(trimmed) {
                    Ok(v) => v,
                    Err(e) => {
                        debug!("mpv reader: invalid json '{}': {}", trimmed, e);
                        continue;
                    }
                };

                if let Some(req_id) = val.get("request_id").and_then(|v| v.as_u64()) {
                    let mut map = pending.lock().await;
                    if let Some(tx) = map.remove(&req_id) {
                        let result = if val["error"].as_str() == Some("success") {
                            Ok(val)
                        } else {
                            let err = val["error"].as_str().unwrap_or("unknown error").to_string();
                            debug!("mpv reader: response req={} err={}", req_id, err);
                            Err(anyhow::anyhow!("mpv error: {}", err))
                        };
                        let _ = tx.send(result);
                    } else {
                        debug!("mpv reader: response for unknown req={}", req_id);
                    }
                } else if event_tx.send(MpvEvent { raw: val }).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("mpv reader: read error: {}", e);
                let mut map = pending.lock().await;
                for (_, tx) in map.drain() {
                    let _ = tx.send(Err(anyhow::anyhow!("mpv IPC read error: {}", e)));
                }
                break;
            }
        }
    }
}

// ── writer task ───────────────────────────────────────────────────────────────

async fn writer_task<W>(mut writer: W, mut rx: mpsc::Receiver<PendingRequest>, pending: PendingMap)
where
    W: AsyncWrite + Unpin,
{
    while let Some(req) = rx.recv().await {
        // Register reply channel before writing so reader can match it
        pending.lock().await.insert(req.req_id, req.reply);
        debug!(
            "mpv writer: send req={} payload={}",
            req.req_id,
            req.payload.trim()
        );
        if let Err(e) = writer.write_all(req.payload.as_bytes()).await {
            warn!("mpv writer: write error: {}", e);
            if let Some(tx) = pending.lock().await.remove(&req.req_id) {
                let _ = tx.send(Err(anyhow::anyhow!("mpv write error: {}", e)));
            }
            break;
        }
    }
    debug!("mpv writer: task exiting");
}

// ── session gate ──────────────────────────────────────────────────────────────

/// Decides which session an incoming mpv event belongs to.
///
/// After `loadfile replace` mpv still has events of the old file in flight
/// (`time-pos`, a late `end-file`).  Events are held back from a new load
/// until its `start-file` arrives.
#[derive(Debug, Default)]
pub struct SessionGate {
    /// Session commands are accepted for.
    requested: Option<u64>,
    /// Session whose file mpv has actually started.
    active: Option<u64>,
}

impl SessionGate {
    pub fn begin(&mut self, session: u64) {
        self.requested = Some(session);
        self.active = None;
    }

    pub fn clear(&mut self) {
        self.requested = None;
        self.active = None;
    }

    pub fn owns(&self, session: u64) -> bool {
        self.requested == Some(session)
    }

    /// Session to tag `ev` with, or `None` to drop it.
    pub fn admit(&mut self, ev: &MpvEvent) -> Option<u64> {
        if ev.event_name() == Some("start-file") && self.active.is_none() {
            self.active = self.requested;
        }
        self.active
    }
}

/// Throw away events queued before a load or unload.
fn discard_queued(event_rx: &mut mpsc::Receiver<MpvEvent>) -> usize {
    let mut n = 0;
    while event_rx.try_recv().is_ok() {
        n += 1;
    }
    n
}

// ── engine loop ───────────────────────────────────────────────────────────────

pub async fn run(
    mut rx: mpsc::Receiver<EngineRequest>,
    notice_tx: mpsc::Sender<EngineNotice>,
    defaults: PlayerDefaults,
) {
    let mut driver = MpvDriver::new(defaults.volume);
    let (event_tx, mut event_rx) = mpsc::channel::<MpvEvent>(256);
    let mut handle: Option<MpvHandle> = None;
    let mut gate = SessionGate::default();

    loop {
        tokio::select! {
            req = rx.recv() => {
                let Some(req) = req else { break };
                match req {
                    EngineRequest::Shutdown => break,
                    EngineRequest::Load { session: s, path, .. } => {
                        let dropped = discard_queued(&mut event_rx);
                        if dropped > 0 {
                            debug!("mpv: dropped {} queued events before load", dropped);
                        }
                        gate.begin(s);
                        if handle.is_none() || !driver.process_alive() {
                            match driver.spawn_and_connect(event_tx.clone()).await {
                                Ok(h) => {
                                    h.observe_all_properties().await;
                                    handle = Some(h);
                                }
                                Err(e) => {
                                    warn!("mpv: could not start: {:#}", e);
                                    handle = None;
                                    let event = EngineEvent::LoadFailed(e.to_string());
                                    let _ = notice_tx.send(EngineNotice::new(s, event)).await;
                                    continue;
                                }
                            }
                        }
                        if let Some(h) = &handle {
                            if let Err(e) = h.load_file(&path).await {
                                warn!("mpv: load {} failed: {:#}", path, e);
                                let event = EngineEvent::LoadFailed(e.to_string());
                                let _ = notice_tx.send(EngineNotice::new(s, event)).await;
                            }
                        }
                    }
                    EngineRequest::Command { session: s, cmd } => {
                        if !gate.owns(s) {
                            debug!("mpv: command for stale session={}", s);
                            continue;
                        }
                        if let Some(h) = &handle {
                            if let Err(e) = h.apply(&cmd).await {
                                warn!("mpv: {:?} failed: {}", cmd, e);
                            }
                        }
                    }
                    EngineRequest::Unload => {
                        gate.clear();
                        if let Some(h) = &handle {
                            let _ = h.stop().await;
                        }
                        discard_queued(&mut event_rx);
                    }
                }
            }
            Some(ev) = event_rx.recv() => {
                let Some(s) = gate.admit(&ev) else {
                    continue;
                };
                let Some(event) = translate(&ev) else {
                    continue;
                };
                if notice_tx.send(EngineNotice::new(s, event)).await.is_err() {
                    break;
                }
            }
        }
    }

    driver.kill().await;
    debug!("mpv: engine exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(raw: Value) -> MpvEvent {
        MpvEvent { raw }
    }

    #[test]
    fn test_property_changes_translate() {
        let time = ev(json!({"event": "property-change", "id": OBS_TIME_POS, "name": "time-pos", "data": 12.5}));
        assert_eq!(translate(&time), Some(EngineEvent::TimeUpdate(12.5)));

        let dur = ev(json!({"event": "property-change", "id": OBS_DURATION, "name": "duration", "data": 930.0}));
        assert_eq!(
            translate(&dur),
            Some(EngineEvent::MetadataLoaded { duration: 930.0 })
        );

        let fs = ev(json!({"event": "property-change", "id": OBS_FULLSCREEN, "name": "fullscreen", "data": true}));
        assert_eq!(translate(&fs), Some(EngineEvent::FullscreenChanged(true)));
    }

    #[test]
    fn test_idle_property_is_ignored() {
        let time = ev(json!({"event": "property-change", "id": OBS_TIME_POS, "name": "time-pos"}));
        assert_eq!(translate(&time), None);
    }

    #[test]
    fn test_end_file_reasons() {
        let eof = ev(json!({"event": "end-file", "reason": "eof"}));
        assert_eq!(translate(&eof), Some(EngineEvent::Ended));

        let stop = ev(json!({"event": "end-file", "reason": "stop"}));
        assert_eq!(translate(&stop), None);

        let err = ev(json!({"event": "end-file", "reason": "error", "file_error": "loading failed"}));
        assert_eq!(
            translate(&err),
            Some(EngineEvent::LoadFailed("loading failed".to_string()))
        );
    }

    #[test]
    fn test_other_events_ignored() {
        assert_eq!(translate(&ev(json!({"event": "file-loaded"}))), None);
        assert_eq!(translate(&ev(json!({"data": 1}))), None);
    }

    #[test]
    fn test_gate_holds_old_file_events_until_start_file() {
        let mut gate = SessionGate::default();
        gate.begin(1);
        assert_eq!(gate.admit(&ev(json!({"event": "start-file"}))), Some(1));
        assert_eq!(
            gate.admit(&ev(json!({"event": "property-change", "id": OBS_TIME_POS, "data": 3.0}))),
            Some(1)
        );

        // Next item requested while item 1 is still reporting.
        gate.begin(2);
        assert!(gate.owns(2));
        assert!(!gate.owns(1));
        let late_time = ev(json!({"event": "property-change", "id": OBS_TIME_POS, "data": 59.9}));
        let late_eof = ev(json!({"event": "end-file", "reason": "eof"}));
        assert_eq!(gate.admit(&late_time), None);
        assert_eq!(gate.admit(&late_eof), None);

        assert_eq!(gate.admit(&ev(json!({"event": "start-file"}))), Some(2));
        let fresh = ev(json!({"event": "property-change", "id": OBS_DURATION, "data": 120.0}));
        assert_eq!(gate.admit(&fresh), Some(2));
    }

    #[test]
    fn test_gate_after_unload_drops_everything() {
        let mut gate = SessionGate::default();
        gate.begin(4);
        gate.admit(&ev(json!({"event": "start-file"})));
        gate.clear();
        assert!(!gate.owns(4));
        assert_eq!(gate.admit(&ev(json!({"event": "start-file"}))), None);
        assert_eq!(gate.admit(&ev(json!({"event": "end-file", "reason": "eof"}))), None);
    }

    #[tokio::test]
    async fn test_queued_events_are_discarded_before_retag() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(ev(json!({"event": "property-change", "id": OBS_TIME_POS, "data": 41.0})))
            .await
            .unwrap();
        tx.send(ev(json!({"event": "end-file", "reason": "eof"})))
            .await
            .unwrap();

        let mut gate = SessionGate::default();
        assert_eq!(discard_queued(&mut rx), 2);
        gate.begin(9);
        assert!(rx.try_recv().is_err());

        tx.send(ev(json!({"event": "start-file"}))).await.unwrap();
        let next = rx.recv().await.unwrap();
        assert_eq!(gate.admit(&next), Some(9));
        assert_eq!(translate(&next), None);
    }
}
