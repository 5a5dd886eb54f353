use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
    Terminal,
};

use crate::core::config::{Config, Position};
use crate::core::engine::Engine;
use crate::core::expression::ExpressionPolicy;
use crate::core::metrics::{MetricsSource, SysinfoSource};
use crate::core::render::Primitive;

use super::canvas::PrimitiveCanvas;
use super::event_handler::{map_key, OverlayEvent};

/// Overlay width in terminal columns.
pub const OVERLAY_WIDTH: u16 = 40;
/// Overlay height in terminal rows; half-block cells are two pixels tall.
pub const OVERLAY_HEIGHT: u16 = 20;

/// Overlay application state
pub struct OverlayApp<S = SysinfoSource> {
    pub engine: Engine<S>,
    pub config: Config,
    pub frame: Vec<Primitive>,
    pub should_quit: bool,
    pub show_help: bool,
}

impl<S: MetricsSource> OverlayApp<S> {
    pub fn new(config: Config, source: S, now: Instant) -> Self {
        let engine = Engine::new(source, &config, now);
        let frame = engine.frame();

        Self {
            engine,
            config,
            frame,
            should_quit: false,
            show_help: false,
        }
    }

    /// Advance the engine and keep its frame for drawing.
    pub fn tick(&mut self, now: Instant) {
        self.frame = self.engine.tick(now);
    }

    /// Handle keyboard events. `surface` is the current terminal size.
    pub fn handle_event(&mut self, event: OverlayEvent, surface: (u16, u16), now: Instant) {
        match event {
            OverlayEvent::Quit => {
                self.engine.stop();
                self.should_quit = true;
            }
            OverlayEvent::ToggleHelp => self.show_help = !self.show_help,
            OverlayEvent::ToggleView => {
                self.engine.toggle_view();
                self.frame = self.engine.frame();
            }
            OverlayEvent::ToggleNetwork => {
                self.engine.toggle_network();
                self.frame = self.engine.frame();
            }
            OverlayEvent::CyclePolicy => {
                let next = match self.engine.policy() {
                    ExpressionPolicy::AxisPriority => ExpressionPolicy::CombinedSeverity,
                    ExpressionPolicy::CombinedSeverity => ExpressionPolicy::AxisPriority,
                };
                self.engine.set_policy(next);
                self.frame = self.engine.frame();
            }
            OverlayEvent::Blink => {
                self.engine.trigger_blink(now);
            }
            OverlayEvent::Move { dx, dy } => {
                self.config.position = moved(self.config.position, dx, dy, surface);
            }
            OverlayEvent::None => {}
        }
    }
}

/// Shift `position` by a cell delta, keeping the overlay on the surface.
fn moved(position: Position, dx: i16, dy: i16, (width, height): (u16, u16)) -> Position {
    let max_x = width.saturating_sub(OVERLAY_WIDTH);
    let max_y = height.saturating_sub(OVERLAY_HEIGHT);

    Position {
        x: position.x.min(max_x).saturating_add_signed(dx).min(max_x),
        y: position.y.min(max_y).saturating_add_signed(dy).min(max_y),
    }
}

/// Where the overlay is drawn inside `area`, clamped to fit.
pub fn overlay_rect(area: Rect, position: Position) -> Rect {
    let width = OVERLAY_WIDTH.min(area.width);
    let height = OVERLAY_HEIGHT.min(area.height);

    Rect::new(
        area.x + position.x.min(area.width - width),
        area.y + position.y.min(area.height - height),
        width,
        height,
    )
}

fn render_ui<S: MetricsSource>(frame: &mut Frame, app: &OverlayApp<S>) {
    let area = frame.area();
    let overlay = overlay_rect(area, app.config.position);

    PrimitiveCanvas::new(&app.frame).render(frame, overlay);

    if app.engine.is_stale() {
        let badge = Rect::new(overlay.x, overlay.y, overlay.width.min(7), 1);
        frame.render_widget(
            Paragraph::new("stale").style(Style::default().fg(Color::DarkGray)),
            badge,
        );
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

fn render_help_overlay<S: MetricsSource>(frame: &mut Frame, area: Rect, app: &OverlayApp<S>) {
    let help = vec![
        Line::from("q / Esc    close"),
        Line::from("arrows     move"),
        Line::from("Tab / v    face / gauges"),
        Line::from("n          network readout"),
        Line::from("p          expression policy"),
        Line::from("space      blink"),
        Line::from("? / h      this help"),
        Line::from(""),
        Line::from(format!(
            "view {}  policy {}",
            app.engine.view().as_str(),
            app.engine.policy().as_str()
        ))
        .style(Style::default().fg(Color::DarkGray)),
    ];

    let width = 34.min(area.width);
    let height = (help.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(help).block(Block::default().borders(Borders::ALL).title(" pc-emo ")),
        popup,
    );
}

/// Persist only the position, leaving the rest of the saved config alone.
fn persist_position(position: Position) -> Result<()> {
    let mut saved = Config::load().unwrap_or_default();
    saved.position = position;
    saved.save()
}

/// Run the overlay until the user closes it
pub fn run_overlay_app(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    let position = result?;
    persist_position(position).context("Failed to save overlay position")
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: Config,
) -> Result<Position> {
    let tick_rate = config.frame_interval();
    log::info!(
        "Overlay started (frame {:?}, metrics {:?})",
        tick_rate,
        config.metric_interval()
    );

    let mut app = OverlayApp::new(config, SysinfoSource::new(), Instant::now());

    // cpu usage needs two refreshes a minimum interval apart
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    app.tick(Instant::now());

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| render_ui(frame, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                let size = terminal.size().context("Failed to read terminal size")?;
                app.handle_event(map_key(key), (size.width, size.height), Instant::now());
            }
        }

        if app.should_quit {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.tick(last_tick);
        }
    }

    log::info!("Overlay closed");
    Ok(app.config.position)
}
