//! Simulated engine: a clock that plays nothing.
//!
//! Honours the catalog duration of the loaded item: time advances while
//! playing, a seek jumps the clock, and reaching the end reports `Ended`.
//! This is the demo mode the players announce.

use std::time::Duration;

use gallery_core::player::{EngineCommand, EngineEvent};
use tokio::sync::mpsc;
use tracing::debug;

use super::{EngineNotice, EngineRequest};

/// Length used when the catalog gives no duration.
pub const FALLBACK_DURATION_SECS: f64 = 180.0;
const TICK: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
pub struct SimClock {
    session: Option<u64>,
    duration: f64,
    position: f64,
    playing: bool,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// Apply a request; returns the notices it produced.
    pub fn handle(&mut self, req: EngineRequest) -> Vec<EngineNotice> {
        match req {
            EngineRequest::Load {
                session,
                path,
                duration_hint,
            } => {
                debug!("sim: load session={} path={}", session, path);
                self.session = Some(session);
                self.duration = duration_hint
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .unwrap_or(FALLBACK_DURATION_SECS);
                self.position = 0.0;
                self.playing = false;
                vec![
                    EngineNotice::new(session, EngineEvent::MetadataLoaded { duration: self.duration }),
                    EngineNotice::new(session, EngineEvent::TimeUpdate(0.0)),
                ]
            }
            EngineRequest::Command { session, cmd } => {
                if self.session != Some(session) {
                    debug!("sim: command for stale session={}", session);
                    return vec![];
                }
                self.apply(session, cmd)
            }
            EngineRequest::Unload | EngineRequest::Shutdown => {
                self.session = None;
                self.playing = false;
                vec![]
            }
        }
    }

    fn apply(&mut self, session: u64, cmd: EngineCommand) -> Vec<EngineNotice> {
        match cmd {
            EngineCommand::Play => {
                self.playing = true;
                // Play after the end starts over.
                if self.position >= self.duration {
                    self.position = 0.0;
                    return vec![EngineNotice::new(session, EngineEvent::TimeUpdate(0.0))];
                }
                vec![]
            }
            EngineCommand::Pause => {
                self.playing = false;
                vec![]
            }
            EngineCommand::Seek(t) => {
                self.position = t.clamp(0.0, self.duration);
                vec![EngineNotice::new(session, EngineEvent::TimeUpdate(self.position))]
            }
            EngineCommand::SetVolume(_) | EngineCommand::SetMuted(_) => vec![],
            EngineCommand::SetFullscreen(on) => {
                vec![EngineNotice::new(session, EngineEvent::FullscreenChanged(on))]
            }
        }
    }

    /// Move the clock forward by `dt` seconds of playback.
    pub fn advance(&mut self, dt: f64) -> Vec<EngineNotice> {
        let Some(session) = self.session else {
            return vec![];
        };
        if !self.playing {
            return vec![];
        }
        self.position += dt;
        if self.position >= self.duration {
            self.position = self.duration;
            self.playing = false;
            return vec![
                EngineNotice::new(session, EngineEvent::TimeUpdate(self.duration)),
                EngineNotice::new(session, EngineEvent::Ended),
            ];
        }
        vec![EngineNotice::new(session, EngineEvent::TimeUpdate(self.position))]
    }
}

pub async fn run(mut rx: mpsc::Receiver<EngineRequest>, notice_tx: mpsc::Sender<EngineNotice>) {
    let mut clock = SimClock::new();
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        let notices = tokio::select! {
            req = rx.recv() => match req {
                Some(EngineRequest::Shutdown) | None => break,
                Some(req) => clock.handle(req),
            },
            _ = tick.tick() => clock.advance(TICK.as_secs_f64()),
        };
        for notice in notices {
            if notice_tx.send(notice).await.is_err() {
                return;
            }
        }
    }
    debug!("sim: engine exiting");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(clock: &mut SimClock, session: u64, hint: Option<f64>) -> Vec<EngineNotice> {
        clock.handle(EngineRequest::Load {
            session,
            path: "media/audio/a.mp3".into(),
            duration_hint: hint,
        })
    }

    fn cmd(session: u64, cmd: EngineCommand) -> EngineRequest {
        EngineRequest::Command { session, cmd }
    }

    #[test]
    fn test_load_reports_duration_then_zero() {
        let mut clock = SimClock::new();
        let out = load(&mut clock, 1, Some(90.0));
        assert_eq!(
            out,
            vec![
                EngineNotice::new(1, EngineEvent::MetadataLoaded { duration: 90.0 }),
                EngineNotice::new(1, EngineEvent::TimeUpdate(0.0)),
            ]
        );
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_missing_hint_uses_fallback() {
        let mut clock = SimClock::new();
        let out = load(&mut clock, 1, None);
        assert_eq!(
            out[0].event,
            EngineEvent::MetadataLoaded {
                duration: FALLBACK_DURATION_SECS
            }
        );
    }

    #[test]
    fn test_paused_clock_does_not_move() {
        let mut clock = SimClock::new();
        load(&mut clock, 1, Some(10.0));
        assert!(clock.advance(1.0).is_empty());
        assert_eq!(clock.position(), 0.0);
    }

    #[test]
    fn test_playing_to_the_end_reports_ended() {
        let mut clock = SimClock::new();
        load(&mut clock, 3, Some(2.0));
        clock.handle(cmd(3, EngineCommand::Play));
        assert_eq!(
            clock.advance(1.0),
            vec![EngineNotice::new(3, EngineEvent::TimeUpdate(1.0))]
        );
        let out = clock.advance(1.5);
        assert_eq!(
            out,
            vec![
                EngineNotice::new(3, EngineEvent::TimeUpdate(2.0)),
                EngineNotice::new(3, EngineEvent::Ended),
            ]
        );
        assert!(!clock.is_playing());

        // Play again restarts from zero.
        let out = clock.handle(cmd(3, EngineCommand::Play));
        assert_eq!(out, vec![EngineNotice::new(3, EngineEvent::TimeUpdate(0.0))]);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let mut clock = SimClock::new();
        load(&mut clock, 1, Some(60.0));
        let out = clock.handle(cmd(1, EngineCommand::Seek(500.0)));
        assert_eq!(out, vec![EngineNotice::new(1, EngineEvent::TimeUpdate(60.0))]);
    }

    #[test]
    fn test_stale_session_commands_ignored() {
        let mut clock = SimClock::new();
        load(&mut clock, 1, Some(60.0));
        load(&mut clock, 2, Some(60.0));
        assert!(clock.handle(cmd(1, EngineCommand::Seek(10.0))).is_empty());
        assert!(clock.handle(cmd(1, EngineCommand::Play)).is_empty());
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_fullscreen_is_echoed() {
        let mut clock = SimClock::new();
        load(&mut clock, 5, Some(60.0));
        let out = clock.handle(cmd(5, EngineCommand::SetFullscreen(true)));
        assert_eq!(out, vec![EngineNotice::new(5, EngineEvent::FullscreenChanged(true))]);
    }

    #[test]
    fn test_unload_stops_the_clock() {
        let mut clock = SimClock::new();
        load(&mut clock, 1, Some(60.0));
        clock.handle(cmd(1, EngineCommand::Play));
        clock.handle(EngineRequest::Unload);
        assert!(clock.advance(1.0).is_empty());
    }

    #[tokio::test]
    async fn test_task_plays_short_item_to_the_end() {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (notice_tx, mut notice_rx) = mpsc::channel(64);
        let task = tokio::spawn(run(req_rx, notice_tx));

        req_tx
            .send(EngineRequest::Load {
                session: 7,
                path: "media/audio/short.mp3".into(),
                duration_hint: Some(0.5),
            })
            .await
            .unwrap();
        req_tx
            .send(EngineRequest::Command {
                session: 7,
                cmd: EngineCommand::Play,
            })
            .await
            .unwrap();

        let ended = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(n) = notice_rx.recv().await {
                if n.event == EngineEvent::Ended {
                    return Some(n.session);
                }
            }
            None
        })
        .await
        .unwrap();
        assert_eq!(ended, Some(7));

        req_tx.send(EngineRequest::Shutdown).await.unwrap();
        task.await.unwrap();
    }
}
