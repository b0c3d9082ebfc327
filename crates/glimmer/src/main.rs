mod cli;
mod clock;
mod input;
mod logging;

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use glimmer_config::Config;
use glimmer_core::{Bounds, MotionPreference};
use glimmer_effects::{Animator, AnimatorSettings, FieldParams, NetworkParams, to_terminal};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info, warn};

use cli::Cli;
use clock::FrameClock;
use input::{MouseCapture, ScrollState};

/// Lines moved by the page keys.
const PAGE_STEP: i32 = 10;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let (config, fixed) = load_config(&cli)?;

    if cli.write_config {
        let path = match &cli.config {
            Some(path) => {
                config.save_to(path)?;
                path.clone()
            }
            None => config.save()?,
        };
        println!("Config written to {}", path.display());
        return Ok(());
    }

    let log_guard = logging::init(&config.logging)?;
    if let Some(guard) = &log_guard {
        info!(path = %guard.path.display(), "logging to file");
    }
    // Corrections made before the subscriber existed
    for field in &fixed {
        warn!(field = *field, "config value out of range, corrected");
    }
    info!(
        effect = config.effect.name(),
        theme = config.theme.name(),
        fps = config.fps,
        "starting"
    );

    let terminal = ratatui::init();
    let result = App::new(&config).run(terminal);
    ratatui::restore();
    result
}

/// Load the config file, apply command line overrides and validate.
///
/// Returns the config together with the names of the corrected fields.
fn load_config(cli: &Cli) -> color_eyre::Result<(Config, Vec<&'static str>)> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().wrap_err("failed to load config")?,
    };
    cli.apply(&mut config);
    let fixed = config.validate();
    Ok((config, fixed))
}

/// Build the animator settings from the loaded config.
fn animator_settings(config: &Config, detected: MotionPreference) -> AnimatorSettings {
    AnimatorSettings {
        style: config.effect,
        theme: config.theme,
        speed: config.speed,
        motion: config.motion.resolve(detected),
        particle_count: config.particles.count,
        overlay_particle_count: config.particles.overlay_count,
        node_count: config.network.node_count,
        field: FieldParams {
            attraction_strength: config.particles.attraction_strength,
            attraction_radius: config.particles.attraction_radius,
            friction: config.particles.friction,
            max_speed: config.particles.max_speed,
            depth_scaling: config.particles.depth_scaling,
        },
        network: NetworkParams {
            threshold: config.network.threshold,
            oscillation_rate: config.network.oscillation_rate,
            modulation: config.network.modulation,
        },
        seed: config.seed,
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    animator: Animator,
    scroll: ScrollState,
    clock: FrameClock,
    started: Instant,
    /// Show the key bindings instead of the status line.
    show_help: bool,
    /// Row of the status bar, excluded from pointer tracking.
    status_row: u16,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            running: false,
            animator: Animator::new(animator_settings(config, MotionPreference::from_env())),
            scroll: ScrollState::default(),
            clock: FrameClock::new(config.fps),
            started: Instant::now(),
            show_help: false,
            status_row: u16::MAX,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let _capture = MouseCapture::enable()?;
        self.running = true;
        while self.running {
            if self.clock.tick() {
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }
        info!("exiting");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let [canvas_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        self.status_row = status_area.y;

        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        let bounds = Bounds::from_cells(canvas_area.width, canvas_area.height);
        let lines = self.animator.frame(elapsed_ms, bounds).to_lines();
        frame.render_widget(Paragraph::new(lines), canvas_area);

        self.render_status(frame, status_area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let settings = self.animator.settings();
        let accent = to_terminal(settings.theme.palette().accent);

        let line = if self.show_help {
            let keys = [
                ("q", "quit"),
                ("e", "effect"),
                ("t", "theme"),
                ("s", "speed"),
                ("m", "motion"),
                ("r", "reset"),
                ("↑↓", "scroll"),
                ("h", "hide help"),
            ];
            let spans: Vec<Span> = keys
                .into_iter()
                .flat_map(|(key, label)| [key.bold().fg(accent), format!(" {label}  ").dark_gray()])
                .collect();
            Line::from(spans)
        } else {
            let motion = if settings.motion.is_reduced() {
                "reduced"
            } else {
                "full"
            };
            Line::from(vec![
                settings.style.name().bold().fg(accent),
                format!(
                    "  {} · {} · motion {} · {:>3.0}%  ",
                    settings.theme.name(),
                    settings.speed.name(),
                    motion,
                    self.scroll.progress().percent()
                )
                .fg(Color::DarkGray),
                "h".bold().fg(accent),
                " help".dark_gray(),
            ])
        };
        frame.render_widget(line.centered(), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.clock.timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::FocusLost => self.animator.clear_pointer(),
                Event::Resize(cols, rows) => debug!(cols, rows, "terminal resized"),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('e')) => {
                let next = self.animator.settings().style.next();
                self.animator.set_style(next);
            }
            (_, KeyCode::Char('t')) => {
                let next = self.animator.settings().theme.next();
                self.animator.set_theme(next);
            }
            (_, KeyCode::Char('s')) => {
                let next = self.animator.settings().speed.next();
                self.animator.set_speed(next);
            }
            (_, KeyCode::Char('m')) => {
                let next = self.animator.settings().motion.toggle();
                self.animator.set_motion(next);
            }
            (_, KeyCode::Char('r')) => self.animator.reset(),
            (_, KeyCode::Char('h')) => self.show_help = !self.show_help,
            (_, KeyCode::Up) => self.scroll(-1),
            (_, KeyCode::Down) => self.scroll(1),
            (_, KeyCode::PageUp) => self.scroll(-PAGE_STEP),
            (_, KeyCode::PageDown) => self.scroll(PAGE_STEP),
            (_, KeyCode::Home) => {
                self.scroll.to_start();
                self.animator.set_progress(self.scroll.progress());
            }
            (_, KeyCode::End) => {
                self.scroll.to_end();
                self.animator.set_progress(self.scroll.progress());
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if mouse.row < self.status_row {
                    self.animator.set_pointer_cell(mouse.column, mouse.row);
                } else {
                    self.animator.clear_pointer();
                }
            }
            MouseEventKind::ScrollUp => self.scroll(-1),
            MouseEventKind::ScrollDown => self.scroll(1),
            _ => {}
        }
    }

    fn scroll(&mut self, delta: i32) {
        self.scroll.scroll_by(delta);
        self.animator.set_progress(self.scroll.progress());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
