mod clock;
mod dots;
mod logging;

use std::io::stdout;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute, terminal,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame};
use sentient_sky_config::{Config, config_path};
use sentient_sky_field::SkyState;
use tracing::{info, warn};

use crate::clock::FrameClock;
use crate::dots::{DotCanvas, cell_center, viewport_for_cells};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    let log_path = logging::init(&config)?;
    info!(config = ?config_path(), log = ?log_path, "starting");

    let app = App::new(&config)?;
    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    if let Err(e) = execute!(stdout(), DisableMouseCapture) {
        warn!(error = %e, "failed to disable mouse capture");
    }
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The night sky simulation.
    sky: SkyState,
    /// Dot raster the sky draws into.
    canvas: DotCanvas,
    /// Frame scheduling.
    clock: FrameClock,
    /// Device pixel ratio reported to the sky.
    pixel_ratio: f64,
}

impl App {
    /// Construct a new instance of [`App`] sized to the current terminal.
    pub fn new(config: &Config) -> color_eyre::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(config, cols, rows))
    }

    /// Construct an [`App`] for a terminal of `cols × rows` cells.
    fn with_size(config: &Config, cols: u16, rows: u16) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let viewport = viewport_for_cells(cols, rows, config.pixel_ratio);
        info!(seed, cols, rows, width = viewport.width, height = viewport.height, "sky created");

        let sky = SkyState::new(viewport, StdRng::seed_from_u64(seed));
        let mut canvas = DotCanvas::new();
        canvas.fit_to_cells(sky.surface(), cols, rows);

        Self {
            running: false,
            sky,
            canvas,
            clock: FrameClock::new(config.frame_interval()),
            pixel_ratio: config.pixel_ratio,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            if self.clock.ready() {
                self.sky.tick(self.clock.elapsed());
                self.sky.update();
                self.sky.render(&mut self.canvas);
                terminal.draw(|frame| self.render(frame))?;
            }
            self.handle_crossterm_events()?;
        }

        self.sky.spawner_handle().cancel();
        info!(frames = self.clock.frames(), "shutting down");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(&self.canvas, frame.area());
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.clock.timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.resize(cols, rows),
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
            _ => {}
        }
    }

    /// Pointer movement steers the parallax.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let pointer = cell_center(mouse.column, mouse.row, self.pixel_ratio);
            self.sky.pointer_moved(pointer);
        }
    }

    /// Follow the terminal size. Stars stay where they were born.
    fn resize(&mut self, cols: u16, rows: u16) {
        self.sky.resize(viewport_for_cells(cols, rows, self.pixel_ratio));
        self.canvas.fit_to_cells(self.sky.surface(), cols, rows);
        info!(
            cols,
            rows,
            width = self.canvas.width(),
            height = self.canvas.height(),
            "terminal resized"
        );
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
