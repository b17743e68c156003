//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Playback requests flow out to the engine task through an `EngineHandle`.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

use gallery_core::config::Config;
use gallery_core::model::{KindFilter, MediaItem};
use gallery_core::player::{EngineCommand, EngineEvent};
use gallery_core::selection::{Navigation, PlaylistSource};
use gallery_core::surface::{Playable, Surface};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{
        category_rows::CategoryRows, header::Header, help_overlay::HelpOverlay, hero::Hero,
        modal::Modal, search_results::SearchResults,
    },
    engine::{self, EngineHandle, EngineNotice, EngineRequest},
    theme::ThemeToggle,
    widgets::{
        hit,
        status_bar::{self, InputMode, KeysContext},
        toast::ToastManager,
    },
    workspace::{BrowseMode, WorkspaceManager},
};

pub const EMPTY_TITLE: &str = "אין תוכן להצגה";
pub const EMPTY_HINT: &str = "הוסף קבצי מדיה למאגר כדי להתחיל";

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Engine(EngineNotice),
}

/// Last-drawn rects, used to route mouse events.
#[derive(Debug, Clone, Copy, Default)]
struct PaneAreas {
    header: Rect,
    hero: Rect,
    category_rows: Rect,
    search_results: Rect,
    modal: Rect,
}

pub struct App {
    state: AppState,
    config: Config,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    hero: Hero,
    category_rows: CategoryRows,
    search_results: SearchResults,
    modal: Modal,
    help_overlay: HelpOverlay,

    wm: WorkspaceManager,
    pane_areas: PaneAreas,
    toast: ToastManager,

    /// Set in `run()` once the engine task is up.
    engine: Option<EngineHandle>,
    /// Bumped on every mount and unmount; engine notices for any other
    /// session are stale.
    session: u64,
    should_quit: bool,
}

impl App {
    pub fn new(state: AppState, config: Config, startup_warnings: Vec<String>) -> Self {
        let mut toast = ToastManager::new();
        for w in startup_warnings {
            toast.warning(w);
        }
        let has_hero = !state.catalog.hero_items().is_empty();
        let mut wm = WorkspaceManager::new(config.ui.show_keys_bar);
        wm.sync(state.query.is_searching(), has_hero);

        Self {
            state,
            config,
            header: Header::new(),
            hero: Hero::new(),
            category_rows: CategoryRows::new(),
            search_results: SearchResults::new(),
            modal: Modal::new(),
            help_overlay: HelpOverlay::new(),
            wm,
            pane_areas: PaneAreas::default(),
            toast,
            engine: None,
            session: 0,
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Playback engine + notice forwarder (engine → AppMessage) ──────────
        let (notice_tx, mut notice_rx) = mpsc::channel::<EngineNotice>(256);
        self.engine = Some(engine::spawn(
            self.state.playback.engine,
            self.state.playback.player_defaults(),
            notice_tx,
        ));
        let engine_tx = tx.clone();
        tokio::spawn(async move {
            while let Some(notice) = notice_rx.recv().await {
                if engine_tx.send(AppMessage::Engine(notice)).await.is_err() {
                    break;
                }
            }
        });

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // Component maintenance tick (filter cursors, lightweight expiries, etc.).
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("gallery started: {} items", self.state.catalog.item_count());

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    self.handle_message(msg).await;
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        self.handle_message(next).await;
                    }
                    needs_redraw = true;
                }

                _ = ui_tick.tick() => {
                    let tick_actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.header.tick(s));
                        all.extend(self.hero.tick(s));
                        all.extend(self.category_rows.tick(s));
                        all.extend(self.search_results.tick(s));
                        all.extend(self.modal.tick(s));
                        all
                    };
                    if !tick_actions.is_empty() {
                        for action in tick_actions {
                            self.dispatch(action).await;
                        }
                        needs_redraw = true;
                    }
                }

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        if let Some(engine) = &self.engine {
            engine.shutdown().await;
        }
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        info!("gallery exiting");

        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    async fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for a in actions {
                        self.dispatch(a).await;
                    }
                }
                _ => {}
            },
            AppMessage::Engine(notice) => {
                if let Some(action) = self.on_engine_notice(notice) {
                    self.dispatch(action).await;
                }
            }
        }
    }

    /// Feed an engine notice to the mounted player.  Returns the follow-up
    /// navigation when the item ended with a next entry available.
    fn on_engine_notice(&mut self, notice: EngineNotice) -> Option<Action> {
        if notice.session != self.session {
            trace!("dropping stale engine notice session={}", notice.session);
            return None;
        }
        if let EngineEvent::LoadFailed(reason) = &notice.event {
            let name = self
                .state
                .current_item()
                .map(|i| i.name.clone())
                .unwrap_or_default();
            warn!("load failed for {}: {}", name, reason);
            self.toast
                .error(format!("לא ניתן לטעון את {}: {}", name, reason));
        }
        let nav = self
            .state
            .surface
            .as_mut()
            .and_then(|s| s.playable_mut())
            .and_then(|p| p.on_engine_event(&notice.event));
        nav.map(Action::Navigate)
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // The search box owns the keyboard while it is open.
        if self.state.input_mode == InputMode::Filter {
            return match key.code {
                KeyCode::Tab => vec![Action::CloseSearch, Action::FocusNext],
                KeyCode::BackTab => vec![Action::CloseSearch, Action::FocusPrev],
                _ => self.header.handle_key(key, &self.state),
            };
        }

        // Help overlay captures all keys when visible
        if self.wm.show_help {
            return self.help_overlay.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers == KeyModifiers::NONE => return vec![Action::Quit],
            KeyCode::Char('?') => return vec![Action::ToggleHelp],
            KeyCode::Char('K') => return vec![Action::ToggleKeys],
            _ => {}
        }

        if self.state.selection.is_open() {
            return self.modal.handle_key(key, &self.state);
        }

        // Browse-level keys
        match key.code {
            KeyCode::Char('/') => return vec![Action::OpenSearch],
            KeyCode::Char('f') => return vec![Action::CycleFilter { forward: true }],
            KeyCode::Char('F') => return vec![Action::CycleFilter { forward: false }],
            KeyCode::Char('t') => return vec![Action::ToggleTheme],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Esc if self.state.query.is_searching() => {
                return vec![
                    Action::SearchChanged(String::new()),
                    Action::SetFilter(KindFilter::All),
                ];
            }
            _ => {}
        }

        // Dispatch to the focused component
        let s = &self.state;
        match self.wm.focused() {
            Some(ComponentId::Hero) => self.hero.handle_key(key, s),
            Some(ComponentId::CategoryRows) => self.category_rows.handle_key(key, s),
            Some(ComponentId::SearchResults) => self.search_results.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }

        if self.wm.show_help {
            if matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
                return vec![Action::ToggleHelp];
            }
            return vec![];
        }

        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;
        let s = &self.state;

        // The modal sits on top of everything and handles outside clicks itself.
        if s.selection.is_open() {
            return self.modal.handle_mouse(event, areas.modal, s);
        }

        if hit(areas.header, col, row) {
            let mut actions = self.header.handle_mouse(event, areas.header, s);
            // Clicking anywhere else in the header closes an open search box.
            if s.input_mode == InputMode::Filter && actions.is_empty() {
                actions.push(Action::CloseSearch);
            }
            return actions;
        }

        let mut prefix = Vec::new();
        if s.input_mode == InputMode::Filter {
            prefix.push(Action::CloseSearch);
        }

        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if self.wm.focused() != Some($id) {
                    actions.insert(0, Action::FocusPane($id));
                }
                prefix.extend(actions);
                return prefix;
            }};
        }

        if hit(areas.hero, col, row) {
            click_pane!(ComponentId::Hero, self.hero, areas.hero);
        }
        if hit(areas.category_rows, col, row) {
            click_pane!(ComponentId::CategoryRows, self.category_rows, areas.category_rows);
        }
        if hit(areas.search_results, col, row) {
            click_pane!(ComponentId::SearchResults, self.search_results, areas.search_results);
        }

        prefix
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    async fn dispatch(&mut self, action: Action) {
        // Broadcast to every component first, against the state before the action.
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.header.on_action(&action, s));
            out.extend(self.hero.on_action(&action, s));
            out.extend(self.category_rows.on_action(&action, s));
            out.extend(self.search_results.on_action(&action, s));
            out.extend(self.modal.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action).await;

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a).await;
        }
    }

    async fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Noop => return,
            Action::OpenItem { item, source } => {
                debug!("apply_action: OpenItem {} from {:?}", item.id, source)
            }
            Action::JumpTo(item) => debug!("apply_action: JumpTo {}", item.id),
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Browsing ──────────────────────────────────────────────────────
            Action::OpenSearch | Action::CloseSearch => self.sync_input_mode(),
            Action::SearchChanged(text) => {
                self.state.query.set_search(text);
                self.sync_browse_mode();
            }
            Action::SetFilter(filter) => {
                self.state.query.set_filter(filter);
                self.sync_browse_mode();
            }
            Action::CycleFilter { forward } => {
                let next = self.state.query.filter().cycle(forward);
                self.state.query.set_filter(next);
                self.sync_browse_mode();
            }

            // ── Selection ─────────────────────────────────────────────────────
            Action::OpenItem { item, source } => {
                let reqs = self.open_item(item, source);
                self.send_engine(reqs).await;
            }
            Action::CloseModal => {
                let reqs = self.close_modal();
                self.send_engine(reqs).await;
            }
            Action::Navigate(nav) => {
                let reqs = self.navigate(nav);
                self.send_engine(reqs).await;
            }
            Action::JumpTo(item) => {
                let reqs = self.jump_to(item);
                self.send_engine(reqs).await;
            }
            Action::TogglePlaylist => {
                if self.state.selection.is_open() {
                    self.state.show_playlist = !self.state.show_playlist;
                }
            }
            Action::ClosePlaylist => self.state.show_playlist = false,

            // ── Playback ──────────────────────────────────────────────────────
            Action::TogglePlay => self.drive_player(|p| vec![p.toggle_play()]).await,
            Action::SeekRelative(delta) => self.drive_player(|p| vec![p.seek_relative(delta)]).await,
            Action::SeekTo(t) => self.drive_player(|p| vec![p.seek(t)]).await,
            Action::VolumeStep(delta) => {
                self.drive_player(|p| {
                    let v = p.volume() + delta;
                    p.set_volume(v)
                })
                .await
            }
            Action::SetVolume(v) => self.drive_player(|p| p.set_volume(v)).await,
            Action::ToggleMute => self.drive_player(|p| vec![p.toggle_mute()]).await,
            Action::ToggleFullscreen => {
                self.drive_player(|p| p.toggle_fullscreen().into_iter().collect())
                    .await
            }

            // ── Document ──────────────────────────────────────────────────────
            Action::PageNext => self.drive_pdf(|v| v.next_page()),
            Action::PagePrev => self.drive_pdf(|v| v.prev_page()),
            Action::ZoomIn => self.drive_pdf(|v| v.zoom_in()),
            Action::ZoomOut => self.drive_pdf(|v| v.zoom_out()),
            Action::Download => {
                if let Some(item) = self.state.current_item() {
                    info!("download requested: {}", item.path);
                    let msg = format!("הורדה: {}", item.path);
                    self.toast.info(msg);
                }
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.wm.focus_next();
            }
            Action::FocusPrev => {
                self.wm.focus_prev();
            }
            Action::FocusPane(id) => self.wm.focus_set(id),
            Action::ToggleTheme => {
                let mode = self.state.theme.toggle();
                info!("theme → {:?}", mode);
                self.config.ui.theme = mode;
                if let Err(e) = self.config.save() {
                    warn!("could not save config: {:#}", e);
                    self.toast.warning("לא ניתן לשמור את ההגדרות");
                }
            }
            Action::ToggleHelp => self.wm.show_help = !self.wm.show_help,
            Action::ToggleKeys => {
                self.wm.show_keys_bar = !self.wm.show_keys_bar;
                self.config.ui.show_keys_bar = self.wm.show_keys_bar;
                if let Err(e) = self.config.save() {
                    warn!("could not save config: {:#}", e);
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Modal lifecycle ───────────────────────────────────────────────────────
    //
    // State changes are synchronous and return what the engine must be told;
    // `send_engine` delivers it.

    fn open_item(
        &mut self,
        item: MediaItem,
        source: Option<PlaylistSource>,
    ) -> Vec<EngineRequest> {
        let playlist = self
            .state
            .catalog
            .playlist_for(source.as_ref(), &self.state.query);
        self.state.selection.open(item, playlist);
        self.state.show_playlist = false;
        self.mount_current()
    }

    fn close_modal(&mut self) -> Vec<EngineRequest> {
        if !self.state.selection.is_open() {
            return vec![];
        }
        self.state.selection.close();
        self.state.surface = None;
        self.state.show_playlist = false;
        self.session += 1;
        vec![EngineRequest::Unload]
    }

    /// Step through the playlist.  Only video and audio offer this, and only
    /// when the player says the direction is available.
    fn navigate(&mut self, nav: Navigation) -> Vec<EngineRequest> {
        let allowed = match self.state.surface.as_mut().and_then(|s| s.playable_mut()) {
            Some(p) => match nav {
                Navigation::Next => p.next().is_some(),
                Navigation::Previous => p.previous().is_some(),
            },
            None => false,
        };
        if allowed && self.state.selection.advance(nav).is_some() {
            return self.mount_current();
        }
        vec![]
    }

    /// Playlist entry picked from the overlay.  The overlay stays open.
    fn jump_to(&mut self, item: MediaItem) -> Vec<EngineRequest> {
        if self.state.is_current(&item) {
            return vec![];
        }
        self.state.selection.jump_to(item);
        self.mount_current()
    }

    /// Mount a fresh surface for the selection's current item under a new
    /// session.
    fn mount_current(&mut self) -> Vec<EngineRequest> {
        let Some(item) = self.state.selection.current().cloned() else {
            return vec![];
        };
        let mut surface = Surface::for_item(&item, self.state.playback.player_defaults());
        surface.set_navigation(
            self.state.selection.has_next(),
            self.state.selection.has_previous(),
        );
        self.state.selection_rev += 1;
        self.session += 1;
        info!("mounting {} ({:?}) session={}", item.id, item.kind, self.session);

        let reqs = match surface.player() {
            Some(p) => vec![
                EngineRequest::Load {
                    session: self.session,
                    path: item.path.clone(),
                    duration_hint: item.duration_secs(),
                },
                EngineRequest::Command {
                    session: self.session,
                    cmd: EngineCommand::SetVolume(p.volume()),
                },
                EngineRequest::Command {
                    session: self.session,
                    cmd: EngineCommand::SetMuted(p.is_muted()),
                },
            ],
            None => vec![EngineRequest::Unload],
        };
        self.state.surface = Some(surface);
        reqs
    }

    async fn send_engine(&self, reqs: Vec<EngineRequest>) {
        if let Some(engine) = &self.engine {
            for req in reqs {
                engine.request(req).await;
            }
        }
    }

    async fn drive_player<F>(&mut self, f: F)
    where
        F: FnOnce(&mut dyn Playable) -> Vec<EngineCommand>,
    {
        let Some(player) = self.state.surface.as_mut().and_then(|s| s.playable_mut()) else {
            return;
        };
        let session = self.session;
        let reqs = f(player)
            .into_iter()
            .map(|cmd| EngineRequest::Command { session, cmd })
            .collect();
        self.send_engine(reqs).await;
    }

    fn drive_pdf<F>(&mut self, f: F)
    where
        F: FnOnce(&mut gallery_core::pdf::PdfViewer),
    {
        if let Some(viewer) = self.state.surface.as_mut().and_then(|s| s.pdf_mut()) {
            f(viewer);
        }
    }

    // ── Mode sync ─────────────────────────────────────────────────────────────

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.header.is_searching() {
            InputMode::Filter
        } else {
            InputMode::Normal
        };
    }

    fn sync_browse_mode(&mut self) {
        let has_hero = !self.state.catalog.hero_items().is_empty();
        self.wm.sync(self.state.query.is_searching(), has_hero);
    }

    fn keys_context(&self) -> KeysContext {
        match self.state.surface.as_ref() {
            _ if self.state.show_playlist => KeysContext::Playlist,
            Some(Surface::Video(_)) | Some(Surface::Audio(_)) => KeysContext::Player,
            Some(Surface::Pdf(_)) => KeysContext::Document,
            _ => KeysContext::Browse,
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let palette = self.state.palette();

        // Fill the terminal with the base background so gaps between panes
        // take the theme colour.
        frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

        // ── Outer layout: header | body | footer | (keys bar) ────────────────
        let keys_h = if self.wm.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.header.min_height()),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(keys_h),
            ])
            .split(area);

        self.header.draw(frame, outer[0], false, &self.state);
        self.pane_areas.header = outer[0];
        status_bar::draw_footer(frame, outer[2], palette);
        if self.wm.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[3],
                self.state.input_mode,
                self.keys_context(),
                palette,
            );
        }

        self.draw_body(frame, outer[1]);

        // ── Modal ─────────────────────────────────────────────────────────────
        if self.state.selection.is_open() {
            self.modal.draw(frame, area, true, &self.state);
            self.pane_areas.modal = area;
        } else {
            self.pane_areas.modal = Rect::default();
        }

        // ── Help overlay (on top of everything) ──────────────────────────────
        if self.wm.show_help {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area, palette);
    }

    fn draw_body(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        self.pane_areas.hero = Rect::default();
        self.pane_areas.category_rows = Rect::default();
        self.pane_areas.search_results = Rect::default();
        let body = Rect {
            x: area.x + 1,
            width: area.width.saturating_sub(2),
            y: area.y + 1,
            height: area.height.saturating_sub(1),
        };

        if self.state.catalog.is_empty() {
            let palette = self.state.palette();
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(EMPTY_TITLE, palette.title())),
                Line::from(Span::styled(EMPTY_HINT, palette.secondary_text())),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
            return;
        }

        let focused = self.wm.focused();
        match self.wm.mode {
            BrowseMode::Search => {
                self.search_results.draw(
                    frame,
                    body,
                    focused == Some(ComponentId::SearchResults),
                    &self.state,
                );
                self.pane_areas.search_results = body;
            }
            BrowseMode::Home => {
                let has_hero = !self.state.catalog.hero_items().is_empty();
                let hero_h = if has_hero { self.hero.min_height() } else { 0 };
                let split = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(hero_h),
                        Constraint::Length(if has_hero { 1 } else { 0 }),
                        Constraint::Min(0),
                    ])
                    .split(body);
                if has_hero {
                    self.hero.draw(
                        frame,
                        split[0],
                        focused == Some(ComponentId::Hero),
                        &self.state,
                    );
                    self.pane_areas.hero = split[0];
                }
                self.category_rows.draw(
                    frame,
                    split[2],
                    focused == Some(ComponentId::CategoryRows),
                    &self.state,
                );
                self.pane_areas.category_rows = split[2];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::config::{PlaybackConfig, ThemeMode};
    use gallery_core::demo::demo_catalog;

    use crate::theme::ThemeState;

    fn app() -> App {
        let state = AppState::new(
            demo_catalog().unwrap(),
            ThemeState::new(ThemeMode::Dark),
            PlaybackConfig::default(),
        );
        App::new(state, Config::default(), Vec::new())
    }

    fn item(app: &App, id: &str) -> MediaItem {
        app.state
            .catalog
            .all_items()
            .into_iter()
            .find(|i| i.id == id)
            .cloned()
            .unwrap()
    }

    fn open_tutorial(app: &mut App, id: &str) -> Vec<EngineRequest> {
        let it = item(app, id);
        app.open_item(it, Some(PlaylistSource::Category("tutorials".into())))
    }

    fn duration(app: &App) -> f64 {
        app.state
            .surface
            .as_ref()
            .and_then(|s| s.player())
            .map(|p| p.duration())
            .unwrap()
    }

    #[test]
    fn test_open_mounts_under_new_session() {
        let mut app = app();
        let reqs = open_tutorial(&mut app, "1");
        assert_eq!(app.session, 1);
        assert!(matches!(
            &reqs[0],
            EngineRequest::Load { session: 1, path, .. } if *path == item(&app, "1").path
        ));
        assert!(matches!(app.state.surface, Some(Surface::Video(_))));
    }

    #[test]
    fn test_notice_from_older_session_is_dropped() {
        let mut app = app();
        open_tutorial(&mut app, "1");
        open_tutorial(&mut app, "2");
        assert_eq!(app.session, 2);

        let stale = EngineNotice::new(1, EngineEvent::MetadataLoaded { duration: 930.0 });
        assert!(app.on_engine_notice(stale).is_none());
        assert_eq!(duration(&app), 0.0);

        let stale_end = EngineNotice::new(1, EngineEvent::Ended);
        assert!(app.on_engine_notice(stale_end).is_none());

        let fresh = EngineNotice::new(2, EngineEvent::MetadataLoaded { duration: 1365.0 });
        assert!(app.on_engine_notice(fresh).is_none());
        assert_eq!(duration(&app), 1365.0);
    }

    #[test]
    fn test_close_clears_surface_and_overlay() {
        let mut app = app();
        open_tutorial(&mut app, "1");
        app.state.show_playlist = true;
        let session = app.session;

        assert_eq!(app.close_modal(), vec![EngineRequest::Unload]);
        assert!(!app.state.selection.is_open());
        assert!(app.state.surface.is_none());
        assert!(!app.state.show_playlist);
        assert_eq!(app.session, session + 1);

        // Closing twice is a no-op.
        assert!(app.close_modal().is_empty());
    }

    #[test]
    fn test_jump_keeps_overlay_open() {
        let mut app = app();
        open_tutorial(&mut app, "1");
        app.state.show_playlist = true;

        let third = item(&app, "3");
        let reqs = app.jump_to(third);
        assert_eq!(app.state.current_item().map(|i| i.id.as_str()), Some("3"));
        assert!(app.state.show_playlist);
        assert!(matches!(reqs[0], EngineRequest::Load { session: 2, .. }));

        // Picking the current entry again remounts nothing.
        let third = item(&app, "3");
        assert!(app.jump_to(third).is_empty());
        assert_eq!(app.session, 2);
    }

    #[tokio::test]
    async fn test_jump_through_dispatch_keeps_overlay_open() {
        let mut app = app();
        let first = item(&app, "1");
        app.dispatch(Action::OpenItem {
            item: first,
            source: Some(PlaylistSource::Category("tutorials".into())),
        })
        .await;
        app.dispatch(Action::TogglePlaylist).await;
        assert!(app.state.show_playlist);

        let second = item(&app, "2");
        app.dispatch(Action::JumpTo(second)).await;
        assert!(app.state.show_playlist);
        assert_eq!(app.state.current_item().map(|i| i.id.as_str()), Some("2"));
    }

    #[test]
    fn test_ended_advances_and_remounts() {
        let mut app = app();
        open_tutorial(&mut app, "1");
        let session = app.session;

        let next = app.on_engine_notice(EngineNotice::new(session, EngineEvent::Ended));
        let Some(Action::Navigate(nav)) = next else {
            panic!("expected a navigation, got {:?}", next);
        };
        assert_eq!(nav, Navigation::Next);

        let reqs = app.navigate(nav);
        assert_eq!(app.session, session + 1);
        assert_eq!(app.state.current_item().map(|i| i.id.as_str()), Some("2"));
        assert!(matches!(
            &reqs[0],
            EngineRequest::Load { session: s, path, .. }
                if *s == session + 1 && *path == item(&app, "2").path
        ));
        let player = app.state.surface.as_ref().and_then(|s| s.player()).unwrap();
        assert!(!player.is_playing());
        assert!(player.has_previous());
    }

    #[test]
    fn test_ended_on_last_item_stays_put() {
        let mut app = app();
        open_tutorial(&mut app, "3");
        let session = app.session;
        assert!(app
            .on_engine_notice(EngineNotice::new(session, EngineEvent::Ended))
            .is_none());
        assert!(app.navigate(Navigation::Next).is_empty());
        assert_eq!(app.session, session);
    }
}
