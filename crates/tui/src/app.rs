use std::{io, path::PathBuf, sync::Arc, thread, time::Duration};

use anyhow::{Context, Result};
use bustrack_core::{
    sim::{next_arrivals, route_board, search_routes, terminus, terminus_index, StopStatus},
    Bus, FleetSnapshot, Locale, Route, SimEvent, Stop, Tracker, TripMatch,
};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap,
    },
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::{
    i18n::{t, tr},
    prefs::Preferences,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAP_EXTENT: f64 = 100.0;
const ARROWS: [char; 8] = ['→', '↗', '↑', '↖', '←', '↙', '↓', '↘'];

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

impl Theme {
    fn route_color(&self, route: &Route) -> Color {
        parse_hex_color(&route.color).unwrap_or(self.accent)
    }
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Map coordinates grow downward; the canvas grows upward.
fn flip_y(y: f64) -> f64 {
    MAP_EXTENT - y
}

/// Arrow pointing along `heading` (degrees in map coordinates) once drawn on the canvas.
fn heading_arrow(heading: f64) -> char {
    let on_screen = (-heading).rem_euclid(360.0);
    ARROWS[((on_screen + 22.5) / 45.0) as usize % ARROWS.len()]
}

/// Step through `None, Some(0), .., Some(len - 1)` and wrap around.
fn cycle_selection(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let slots = len as isize + 1;
    let position = current.map_or(0, |idx| idx as isize + 1);
    let next = (position + delta).rem_euclid(slots);
    (next > 0).then(|| next as usize - 1)
}

fn locale_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Pa => "ਪੰਜਾਬੀ",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Browse,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Home,
    Routes,
    Map,
}

impl Screen {
    const ALL: [Screen; 3] = [Screen::Home, Screen::Routes, Screen::Map];

    fn index(self) -> usize {
        match self {
            Screen::Home => 0,
            Screen::Routes => 1,
            Screen::Map => 2,
        }
    }

    fn title_key(self) -> &'static str {
        match self {
            Screen::Home => "nav_home",
            Screen::Routes => "nav_routes",
            Screen::Map => "nav_map",
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TripField {
    Boarding,
    Destination,
}

impl TripField {
    fn other(self) -> Self {
        match self {
            TripField::Boarding => TripField::Destination,
            TripField::Destination => TripField::Boarding,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal frontend over a live [`Tracker`].
pub struct BusTrackApp {
    tracker: Tracker,
    locale: Locale,
    routes: Vec<Route>,
    stops: Vec<Stop>,
    snapshot: Arc<FleetSnapshot>,
    prefs: Preferences,
    prefs_path: PathBuf,
    screen: Screen,
    state: UiState,
    sim_rx: Option<mpsc::Receiver<SimEvent>>,
    theme: Theme,
}

impl BusTrackApp {
    pub fn new(tracker: Tracker, locale: Locale, prefs: Preferences, prefs_path: PathBuf) -> Self {
        let routes = tracker.routes(locale);
        let stops = tracker.catalog().stops(locale);
        let snapshot = tracker.buses();
        Self {
            tracker,
            locale,
            routes,
            stops,
            snapshot,
            prefs,
            prefs_path,
            screen: Screen::Home,
            state: UiState::default(),
            sim_rx: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Tracking {} buses on {} routes",
            self.snapshot.buses.len(),
            self.routes.len()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        let mut sim_rx = self.sim_rx.take();

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            if let Some(rx) = sim_rx.as_mut() {
                let mut sim_closed = false;
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        if !self.process_app_event(maybe_event) {
                            break;
                        }
                    }
                    maybe_sim = rx.recv() => {
                        match maybe_sim {
                            Some(event) => self.handle_sim_event(event),
                            None => sim_closed = true,
                        }
                    }
                }
                if sim_closed {
                    error!("Simulation channel closed; positions are frozen");
                    self.state
                        .set_status("Simulation stopped; showing last known positions".to_string());
                    sim_rx = None;
                }
            } else {
                let maybe_event = event_rx.recv().await;
                if !self.process_app_event(maybe_event) {
                    break;
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        Ok(())
    }

    pub fn attach_simulation(&mut self, receiver: mpsc::Receiver<SimEvent>) {
        self.sim_rx = Some(receiver);
    }

    fn handle_sim_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::Advanced(snapshot) => {
                debug!(tick = snapshot.tick, "Fleet snapshot received");
                self.snapshot = snapshot;
            }
        }
    }

    fn handle_tick(&mut self) {
        if self.state.mode == Mode::Filter {
            self.state.set_status(format!("Filter: {}", self.state.filter));
        }
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Err(err) = self.handle_input(event) {
                    self.state.set_status(format!("Error: {err}"));
                }
                true
            }
            Some(AppEvent::Tick) => {
                self.handle_tick();
                true
            }
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if self.state.mode == Mode::Filter {
            return self.handle_filter_key(key);
        }
        if self.handle_global_key(&key)? {
            return Ok(());
        }
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Routes => self.handle_routes_key(key),
            Screen::Map => self.handle_map_key(key),
        }
        Ok(())
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.state.should_quit = true,
            KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                self.state.should_quit = true
            }
            KeyCode::Tab => self.set_screen(self.screen.next()),
            KeyCode::BackTab => self.set_screen(self.screen.previous()),
            KeyCode::Char('L') => self.toggle_locale(),
            KeyCode::Char('B') => self.toggle_low_bandwidth(),
            KeyCode::Char('/') if self.screen != Screen::Map => {
                self.state.mode = Mode::Filter;
                self.state.set_status("Enter filter text".to_string());
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.mode = Mode::Browse;
                self.state.filter.clear();
                self.reset_list_cursor();
                self.state.set_status("Filter cleared".to_string());
            }
            KeyCode::Enter => {
                self.state.mode = Mode::Browse;
                self.state
                    .set_status(format!("Filter applied: {}", self.state.filter));
            }
            KeyCode::Backspace => {
                self.state.filter.pop();
                self.reset_list_cursor();
                self.state.set_status(format!("Filter: {}", self.state.filter));
            }
            KeyCode::Char(c) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    self.state.filter.push(c);
                    self.reset_list_cursor();
                    self.state.set_status(format!("Filter: {}", self.state.filter));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        if self.prefs.low_bandwidth {
            return;
        }
        let len = self.filtered_stops().len();
        let list = &mut self.state.stop_list;
        let page = list.page() as isize;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => list.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => list.move_by(-1, len),
            KeyCode::Char('g') | KeyCode::Home => list.move_to(0, len),
            KeyCode::Char('G') | KeyCode::End => list.move_to(len.saturating_sub(1), len),
            KeyCode::PageDown => list.move_by(page, len),
            KeyCode::PageUp => list.move_by(-page, len),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.state.trip_field = self.state.trip_field.other();
            }
            KeyCode::Enter => self.select_stop(),
            KeyCode::Char('s') => {
                std::mem::swap(&mut self.state.boarding, &mut self.state.destination);
                self.state.set_status("Swapped boarding and destination".to_string());
            }
            KeyCode::Char('x') => {
                self.state.boarding = None;
                self.state.destination = None;
                self.state.trip_field = TripField::Boarding;
                self.state.set_status("Trip cleared".to_string());
            }
            _ => {}
        }
    }

    fn handle_routes_key(&mut self, key: KeyEvent) {
        let len = self.visible_routes().len();
        let list = &mut self.state.route_list;
        let page = list.page() as isize;
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => list.move_by(1, len),
            KeyCode::Char('k') | KeyCode::Up => list.move_by(-1, len),
            KeyCode::Char('g') | KeyCode::Home => list.move_to(0, len),
            KeyCode::Char('G') | KeyCode::End => list.move_to(len.saturating_sub(1), len),
            KeyCode::PageDown => list.move_by(page, len),
            KeyCode::PageUp => list.move_by(-page, len),
            KeyCode::Char('f') => self.toggle_favourite(),
            KeyCode::Enter | KeyCode::Char('m') => self.show_current_route_on_map(),
            _ => {}
        }
    }

    fn handle_map_key(&mut self, key: KeyEvent) {
        let len = self.routes.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => {
                self.state.map_route = cycle_selection(self.state.map_route, 1, len)
            }
            KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => {
                self.state.map_route = cycle_selection(self.state.map_route, -1, len)
            }
            KeyCode::Esc => self.state.map_route = None,
            _ => {}
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.state.mode = Mode::Browse;
        if !self.state.filter.is_empty() {
            self.state.filter.clear();
            self.reset_list_cursor();
        }
    }

    fn reset_list_cursor(&mut self) {
        match self.screen {
            Screen::Home => self.state.stop_list.reset(),
            Screen::Routes => self.state.route_list.reset(),
            Screen::Map => {}
        }
    }

    fn select_stop(&mut self) {
        let Some(stop) = self.filtered_stops().get(self.state.stop_list.cursor).copied() else {
            return;
        };
        let (id, name) = (stop.id.clone(), stop.name.clone());
        match self.state.trip_field {
            TripField::Boarding => {
                self.state.boarding = Some(id);
                self.state.trip_field = TripField::Destination;
            }
            TripField::Destination => self.state.destination = Some(id),
        }
        self.state.set_status(format!("Selected {name}"));
    }

    fn toggle_favourite(&mut self) {
        let Some(route_id) = self.current_route().map(|route| route.id.clone()) else {
            return;
        };
        let pinned = self.prefs.toggle_favourite(&route_id);
        info!(route = %route_id, pinned, "Favourite toggled");
        self.save_prefs();

        let (position, len) = {
            let routes = self.visible_routes();
            let position = routes.iter().position(|route| route.id == route_id);
            (position, routes.len())
        };
        if let Some(position) = position {
            self.state.route_list.move_to(position, len);
        }
        if pinned {
            self.state.set_status(format!("Pinned {route_id}"));
        } else {
            self.state.set_status(format!("Unpinned {route_id}"));
        }
    }

    fn show_current_route_on_map(&mut self) {
        let Some(route_id) = self.current_route().map(|route| route.id.clone()) else {
            return;
        };
        self.state.map_route = self.routes.iter().position(|route| route.id == route_id);
        self.set_screen(Screen::Map);
    }

    fn toggle_locale(&mut self) {
        self.locale = self.locale.toggled();
        self.prefs.locale = Some(self.locale);
        self.routes = self.tracker.routes(self.locale);
        self.stops = self.tracker.catalog().stops(self.locale);
        info!(locale = %self.locale, "Locale changed");
        self.save_prefs();
        self.state.set_status(format!(
            "{}: {}",
            t(self.locale, "profile_language"),
            locale_name(self.locale)
        ));
    }

    fn toggle_low_bandwidth(&mut self) {
        self.prefs.low_bandwidth = !self.prefs.low_bandwidth;
        self.save_prefs();
        let label = t(self.locale, "profile_low_bw_mode");
        let state = if self.prefs.low_bandwidth { "on" } else { "off" };
        self.state.set_status(format!("{label}: {state}"));
    }

    fn save_prefs(&mut self) {
        if let Err(err) = self.prefs.persist(&self.prefs_path) {
            error!(?err, "Failed to save preferences");
            self.state
                .set_status(format!("Failed to save preferences: {err}"));
        }
    }

    fn filtered_stops(&self) -> Vec<&Stop> {
        let needle = self.state.filter.trim().to_lowercase();
        self.stops
            .iter()
            .filter(|stop| needle.is_empty() || stop.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn visible_routes(&self) -> Vec<&Route> {
        search_routes(&self.routes, &self.state.filter, |id| {
            self.prefs.is_favourite(id)
        })
    }

    fn current_route(&self) -> Option<&Route> {
        self.visible_routes()
            .get(self.state.route_list.cursor)
            .copied()
    }

    fn stop_name(&self, id: &str) -> Option<&str> {
        self.stops
            .iter()
            .find(|stop| stop.id == id)
            .map(|stop| stop.name.as_str())
    }

    /// Fare from the Home boarding stop to `stop_id`, when both are on `route`.
    fn board_fare(&self, route: &Route, stop_id: &str) -> Option<u32> {
        let board = self.state.boarding.as_deref()?;
        if board == stop_id || !route.serves(board) {
            return None;
        }
        Some(self.tracker.fare(route, board, stop_id))
    }

    fn terminus_text(&self, bus: &Bus, route: &Route) -> String {
        match self.tracker.eta_minutes(bus, terminus_index(bus, route)) {
            Some(eta) if eta > 0 => {
                tr(self.locale, "map_eta_terminus", &[("eta", eta.to_string().as_str())])
            }
            _ => t(self.locale, "map_at_terminus").to_string(),
        }
    }

    fn delay_line(&self, bus: &Bus) -> Option<Line<'static>> {
        let delay = bus.delay?;
        let text = tr(
            self.locale,
            "delay_info",
            &[("reason", delay.reason.label(self.locale))],
        );
        Some(Line::from(Span::styled(
            format!("{text} (+{} {})", delay.minutes_remaining, t(self.locale, "min_short")),
            Style::default().fg(self.theme.warning),
        )))
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
            ])
            .split(frame.size());

        self.render_header(frame, chunks[0]);
        match self.screen {
            Screen::Home if self.prefs.low_bandwidth => self.render_arrivals(frame, chunks[1]),
            Screen::Home => self.draw_home(frame, chunks[1]),
            Screen::Routes => self.draw_routes(frame, chunks[1]),
            Screen::Map => self.draw_map(frame, chunks[1]),
        }
        self.render_status(frame, chunks[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<String> = Screen::ALL
            .iter()
            .map(|screen| t(self.locale, screen.title_key()).to_string())
            .collect();
        let tabs = Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(t(self.locale, "app_title")),
            )
            .select(self.screen.index())
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_home(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(columns[1]);

        self.render_stop_picker(frame, columns[0]);
        self.render_trip_form(frame, right[0]);
        self.render_trip_result(frame, right[1]);
    }

    fn render_stop_picker(&mut self, frame: &mut Frame, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        let len = self.filtered_stops().len();
        self.state.stop_list.set_height(height, len);

        let list_cursor = self.state.stop_list;
        let stops = self.filtered_stops();
        let items: Vec<ListItem> = stops
            .iter()
            .enumerate()
            .skip(list_cursor.offset)
            .take(height)
            .map(|(idx, stop)| {
                let marker = if idx == list_cursor.cursor {
                    Span::styled(
                        "▶ ",
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw("  ")
                };
                let mut line = vec![marker, Span::raw(stop.name.clone())];
                if self.state.boarding.as_deref() == Some(stop.id.as_str()) {
                    line.push(Span::styled(
                        format!(" · {}", t(self.locale, "home_from")),
                        Style::default().fg(self.theme.success),
                    ));
                }
                if self.state.destination.as_deref() == Some(stop.id.as_str()) {
                    line.push(Span::styled(
                        format!(" · {}", t(self.locale, "home_to")),
                        Style::default().fg(self.theme.warning),
                    ));
                }
                ListItem::new(Line::from(line))
            })
            .collect();

        let mut list_state = ListState::default();
        if !stops.is_empty() {
            list_state.select(Some(list_cursor.cursor - list_cursor.offset));
        }
        let title_key = match self.state.trip_field {
            TripField::Boarding => "home_select_boarding",
            TripField::Destination => "home_select_destination",
        };
        let mut title = t(self.locale, title_key).to_string();
        if !self.state.filter.is_empty() {
            title.push_str(&format!(" /{}", self.state.filter));
        }
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_trip_form(&self, frame: &mut Frame, area: Rect) {
        let field_line = |field: TripField, label_key: &'static str, value: Option<&String>| {
            let active = self.state.trip_field == field;
            let label_style = if active {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            let name = value
                .and_then(|id| self.stop_name(id))
                .unwrap_or("—")
                .to_string();
            Line::from(vec![
                Span::styled(format!("{:<6}", t(self.locale, label_key)), label_style),
                Span::styled(name, Style::default().fg(self.theme.primary_fg)),
            ])
        };
        let lines = vec![
            field_line(TripField::Boarding, "home_from", self.state.boarding.as_ref()),
            field_line(
                TripField::Destination,
                "home_to",
                self.state.destination.as_ref(),
            ),
        ];
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(t(self.locale, "home_heading")),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_trip_result(&self, frame: &mut Frame, area: Rect) {
        let locale = self.locale;
        let lines = match (&self.state.boarding, &self.state.destination) {
            (Some(board), Some(dest)) => {
                let board_name = self.stop_name(board).unwrap_or(board.as_str()).to_string();
                match self.tracker.find_trip(&self.routes, &self.snapshot, board, dest) {
                    TripMatch::Found(trip) => {
                        let stops_between = trip
                            .route
                            .stop_index(board)
                            .zip(trip.route.stop_index(dest))
                            .map_or(0, |(a, b)| a.abs_diff(b));
                        let mut lines = vec![
                            Line::from(vec![
                                Span::styled(
                                    trip.route.name.clone(),
                                    Style::default()
                                        .fg(self.theme.route_color(&trip.route))
                                        .add_modifier(Modifier::BOLD),
                                ),
                                Span::styled(
                                    format!(" · {}", trip.bus.id),
                                    Style::default().fg(self.theme.muted),
                                ),
                            ]),
                            Line::from(""),
                            Line::from(tr(locale, "home_next_bus_in", &[("stopName", board_name.as_str())])),
                            Line::from(Span::styled(
                                format!("{} {}", trip.eta, t(locale, "min_short")),
                                Style::default()
                                    .fg(self.theme.accent)
                                    .add_modifier(Modifier::BOLD),
                            )),
                            Line::from(""),
                            Line::from(format!(
                                "{}: {}{}",
                                t(locale, "ticket_price"),
                                t(locale, "rupee_symbol"),
                                trip.fare
                            )),
                            Line::from(format!("{}: {}", t(locale, "stops"), stops_between)),
                        ];
                        if let Some(line) = self.delay_line(&trip.bus) {
                            lines.push(line);
                        }
                        lines
                    }
                    TripMatch::NoRoute => vec![
                        Line::from(Span::styled(
                            t(locale, "home_no_route_found"),
                            Style::default()
                                .fg(self.theme.danger)
                                .add_modifier(Modifier::BOLD),
                        )),
                        Line::from(t(locale, "home_no_route_desc")),
                    ],
                    TripMatch::NoBus { route_id } => {
                        let route_name = self
                            .routes
                            .iter()
                            .find(|route| route.id == route_id)
                            .map_or(route_id.as_str(), |route| route.name.as_str());
                        vec![Line::from(Span::styled(
                            tr(
                                locale,
                                "home_no_bus",
                                &[("routeName", route_name), ("stopName", board_name.as_str())],
                            ),
                            Style::default().fg(self.theme.warning),
                        ))]
                    }
                }
            }
            _ => vec![Line::from(Span::styled(
                t(locale, "home_hint"),
                Style::default().fg(self.theme.muted),
            ))],
        };
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(t(locale, "trip_details")),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_arrivals(&self, frame: &mut Frame, area: Rect) {
        let arrivals = next_arrivals(&self.routes, &self.snapshot.buses, self.tracker.params());
        let items: Vec<ListItem> = arrivals
            .iter()
            .take(area.height.saturating_sub(2) as usize)
            .map(|arrival| {
                let eta = if arrival.eta == 0 {
                    Span::styled(
                        format!("{:>8}", t(self.locale, "routes_due")),
                        Style::default()
                            .fg(self.theme.success)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(
                        format!("{:>4} {:<3}", arrival.eta, t(self.locale, "min_short")),
                        Style::default().fg(if arrival.delayed {
                            self.theme.warning
                        } else {
                            self.theme.primary_fg
                        }),
                    )
                };
                ListItem::new(Line::from(vec![
                    eta,
                    Span::raw("  "),
                    Span::styled(
                        arrival.route_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" "),
                    Span::raw(tr(
                        self.locale,
                        "arrivals_to",
                        &[("stopName", arrival.stop.name.as_str())],
                    )),
                    Span::styled(
                        format!("  [{}]", arrival.bus_id),
                        Style::default().fg(self.theme.muted),
                    ),
                ]))
            })
            .collect();
        let title = format!(
            "{} · {}",
            t(self.locale, "arrivals_title"),
            t(self.locale, "arrivals_low_data")
        );
        let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(list, area);
    }

    fn draw_routes(&mut self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        self.render_route_list(frame, columns[0]);
        self.render_route_board(frame, columns[1]);
    }

    fn render_route_list(&mut self, frame: &mut Frame, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        let len = self.visible_routes().len();
        self.state.route_list.set_height(height, len);

        let list_cursor = self.state.route_list;
        let routes = self.visible_routes();
        let items: Vec<ListItem> = routes
            .iter()
            .skip(list_cursor.offset)
            .take(height)
            .map(|route| {
                let star = if self.prefs.is_favourite(&route.id) {
                    Span::styled("★ ", Style::default().fg(self.theme.warning))
                } else {
                    Span::raw("  ")
                };
                ListItem::new(Line::from(vec![
                    star,
                    Span::styled("■ ", Style::default().fg(self.theme.route_color(route))),
                    Span::raw(route.name.clone()),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !routes.is_empty() {
            list_state.select(Some(list_cursor.cursor - list_cursor.offset));
        }
        let mut title = t(self.locale, "routes_all").to_string();
        if !self.prefs.favourites.is_empty() {
            title.push_str(&format!(" (★ {})", t(self.locale, "favourite_routes")));
        }
        if self.state.mode == Mode::Filter || !self.state.filter.is_empty() {
            title.push_str(&format!(" /{}", self.state.filter));
        }
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_route_board(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let Some(route) = self.current_route() else {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                t(self.locale, "routes_search_placeholder"),
                Style::default().fg(self.theme.muted),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        };

        let bus = self.snapshot.buses_on(&route.id).next();
        let params = self.tracker.params();
        let mut lines = vec![Line::from(Span::styled(
            route.name.clone(),
            Style::default()
                .fg(self.theme.route_color(route))
                .add_modifier(Modifier::BOLD),
        ))];
        if let Some(stop) = terminus(route, bus) {
            lines.push(Line::from(tr(
                self.locale,
                "routes_direction_to",
                &[("terminusName", stop.name.as_str())],
            )));
        }
        match bus {
            Some(bus) => {
                lines.push(Line::from(Span::styled(
                    format!("{} · {}", bus.id, self.terminus_text(bus, route)),
                    Style::default().fg(self.theme.muted),
                )));
                if let Some(line) = self.delay_line(bus) {
                    lines.push(line);
                }
            }
            None => lines.push(Line::from(Span::styled(
                t(self.locale, "routes_no_bus"),
                Style::default().fg(self.theme.muted),
            ))),
        }
        lines.push(Line::from(""));

        for entry in route_board(route, bus, params) {
            let marker = if entry.bus_here {
                Span::styled(
                    "▶ ",
                    Style::default()
                        .fg(self.theme.route_color(route))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw("  ")
            };
            let status = match entry.status {
                StopStatus::Passed => Span::styled(
                    t(self.locale, "routes_passed"),
                    Style::default().fg(self.theme.muted),
                ),
                StopStatus::Due => Span::styled(
                    t(self.locale, "routes_due"),
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
                StopStatus::Arriving(minutes) => Span::styled(
                    format!("{minutes} {}", t(self.locale, "min_short")),
                    Style::default().fg(self.theme.primary_fg),
                ),
            };
            let fare = self.board_fare(route, &entry.stop.id);
            let mut spans = vec![marker, Span::raw(entry.stop.name), Span::raw("  "), status];
            if let Some(fare) = fare {
                spans.push(Span::styled(
                    format!("  {}{fare}", t(self.locale, "rupee_symbol")),
                    Style::default().fg(self.theme.muted),
                ));
            }
            lines.push(Line::from(spans));
        }

        let title = format!("{}: {}", t(self.locale, "stops"), route.stops.len());
        let paragraph = Paragraph::new(lines).block(block.title(title));
        frame.render_widget(paragraph, area);
    }

    fn draw_map(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);
        self.render_map_canvas(frame, columns[0]);
        self.render_map_buses(frame, columns[1]);
    }

    fn highlighted_route(&self) -> Option<&Route> {
        self.state.map_route.and_then(|idx| self.routes.get(idx))
    }

    fn render_map_canvas(&self, frame: &mut Frame, area: Rect) {
        let highlighted = self.highlighted_route();
        let mut title = t(self.locale, "map_live").to_string();
        if let Some(route) = highlighted {
            title.push_str(&format!(" · {}", route.name));
        }
        let stop_coords: Vec<(f64, f64)> = self
            .stops
            .iter()
            .map(|stop| (stop.position.x, flip_y(stop.position.y)))
            .collect();

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .marker(Marker::Braille)
            .x_bounds([0.0, MAP_EXTENT])
            .y_bounds([0.0, MAP_EXTENT])
            .paint(|ctx| {
                for route in &self.routes {
                    let dimmed = highlighted.is_some_and(|h| h.id != route.id);
                    let color = if dimmed {
                        self.theme.muted
                    } else {
                        self.theme.route_color(route)
                    };
                    for pair in route.stops.windows(2) {
                        ctx.draw(&CanvasLine {
                            x1: pair[0].position.x,
                            y1: flip_y(pair[0].position.y),
                            x2: pair[1].position.x,
                            y2: flip_y(pair[1].position.y),
                            color,
                        });
                    }
                }
                ctx.draw(&Points {
                    coords: &stop_coords,
                    color: self.theme.primary_fg,
                });
                ctx.layer();

                if let Some(route) = highlighted {
                    for stop in [route.stops.first(), route.stops.last()].into_iter().flatten() {
                        ctx.print(
                            stop.position.x,
                            flip_y(stop.position.y),
                            Span::styled(stop.name.clone(), Style::default().fg(self.theme.muted)),
                        );
                    }
                }
                for bus in &self.snapshot.buses {
                    if highlighted.is_some_and(|h| h.id != bus.route_id) {
                        continue;
                    }
                    let Some(route) = self.routes.iter().find(|r| r.id == bus.route_id) else {
                        continue;
                    };
                    let Some(position) = self.tracker.position_of(bus, route) else {
                        continue;
                    };
                    let color = if bus.is_delayed() {
                        self.theme.danger
                    } else {
                        self.theme.route_color(route)
                    };
                    ctx.print(
                        position.x,
                        flip_y(position.y),
                        Span::styled(
                            heading_arrow(position.heading).to_string(),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                    );
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_map_buses(&self, frame: &mut Frame, area: Rect) {
        let highlighted = self.highlighted_route();
        let mut lines = Vec::new();
        for bus in &self.snapshot.buses {
            if highlighted.is_some_and(|h| h.id != bus.route_id) {
                continue;
            }
            let Some(route) = self.routes.iter().find(|r| r.id == bus.route_id) else {
                continue;
            };
            let arrow = self.tracker
                .position_of(bus, route)
                .map(|position| heading_arrow(position.heading))
                .unwrap_or(' ');
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{arrow} {}", bus.id),
                    Style::default()
                        .fg(self.theme.route_color(route))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}", route.name),
                    Style::default().fg(self.theme.muted),
                ),
            ]));
            lines.push(Line::from(format!("  {}", self.terminus_text(bus, route))));
            if let Some(line) = self.delay_line(bus) {
                lines.push(line);
            }
        }
        let title = format!(
            "{} ({})",
            t(self.locale, "map_buses"),
            self.snapshot.buses.len()
        );
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let primary = if self.state.mode == Mode::Filter {
            format!("Filter: {}", self.state.filter)
        } else {
            self.state.status.clone()
        };
        let updated = self
            .snapshot
            .updated_at
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        let secondary = format!(
            "{}  ·  {}: {}  ·  {}: {}  ·  Tab screens · L language · B low data · q quit",
            tr(self.locale, "map_updated", &[("time", updated.as_str())]),
            t(self.locale, "profile_language"),
            locale_name(self.locale),
            t(self.locale, "profile_low_bw_mode"),
            if self.prefs.low_bandwidth { "on" } else { "off" },
        );
        let paragraph = Paragraph::new(vec![
            Line::from(primary),
            Line::from(Span::styled(secondary, Style::default().fg(self.theme.muted))),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Scroll position of a list whose items are computed on each draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ListCursor {
    cursor: usize,
    offset: usize,
    height: usize,
}

impl ListCursor {
    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        let idx = (self.cursor as isize + delta).clamp(0, len as isize - 1);
        self.cursor = idx as usize;
        self.ensure_visible(len);
    }

    fn move_to(&mut self, index: usize, len: usize) {
        if len == 0 {
            self.reset();
            return;
        }
        self.cursor = index.min(len - 1);
        self.ensure_visible(len);
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn page(&self) -> usize {
        self.height.max(1)
    }

    fn set_height(&mut self, height: usize, len: usize) {
        self.height = height;
        if len == 0 {
            self.reset();
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.ensure_visible(len);
    }

    fn ensure_visible(&mut self, len: usize) {
        if len == 0 || self.height == 0 {
            self.offset = 0;
            return;
        }
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        self.offset = self.offset.min(len.saturating_sub(self.height));
    }
}

struct UiState {
    status: String,
    mode: Mode,
    filter: String,
    should_quit: bool,
    trip_field: TripField,
    stop_list: ListCursor,
    boarding: Option<String>,
    destination: Option<String>,
    route_list: ListCursor,
    map_route: Option<usize>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            mode: Mode::Browse,
            filter: String::new(),
            should_quit: false,
            trip_field: TripField::Boarding,
            stop_list: ListCursor::default(),
            boarding: None,
            destination: None,
            route_list: ListCursor::default(),
            map_route: None,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }
}
