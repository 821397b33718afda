use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    terminal, ExecutableCommand,
};
use log::{debug, info, LevelFilter};
use rand::thread_rng;

use rail_shooter::assets::TextureSet;
use rail_shooter::compute::{init_state, pointer_to_world, tick};
use rail_shooter::config::Settings;
use rail_shooter::display::{self, canvas::Canvas};
use rail_shooter::entities::Vec2;
use rail_shooter::error::{GameError, Result};

// ── Surface ───────────────────────────────────────────────────────────────────

/// Terminal-backed drawing surface: one canvas pixel per column, two per row.
struct Surface {
    canvas: Canvas,
    /// Last pointer position, in canvas pixels.
    pointer: (f32, f32),
}

impl Surface {
    fn new(cols: u16, rows: u16) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(GameError::SurfaceTooSmall { width: cols, height: rows });
        }
        let canvas = Canvas::new(cols as u32, rows as u32 * 2);
        let pointer = (canvas.width() as f32 / 2.0, canvas.height() as f32 / 2.0);
        Ok(Self { canvas, pointer })
    }

    fn resize(&mut self, cols: u16, rows: u16) -> Result<()> {
        let pointer = self.pointer;
        *self = Self::new(cols, rows)?;
        self.pointer = pointer;
        debug!("surface resized to {}x{} pixels", self.canvas.width(), self.canvas.height());
        Ok(())
    }

    /// Centre of the upper pixel of the cell under the mouse.
    fn track(&mut self, column: u16, row: u16) {
        self.pointer = (column as f32 + 0.5, row as f32 * 2.0 + 0.5);
    }

    fn pointer_world(&self) -> Vec2 {
        pointer_to_world(
            self.pointer.0,
            self.pointer.1,
            self.canvas.width() as f32,
            self.canvas.height() as f32,
        )
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn is_exit(KeyEvent { code, modifiers, kind, .. }: &KeyEvent) -> bool {
    if *kind == KeyEventKind::Release {
        return false;
    }
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Apply every pending event.  Returns `true` when the player asked to quit.
fn drain_input(surface: &mut Surface, rx: &mpsc::Receiver<Event>) -> Result<bool> {
    while let Ok(ev) = rx.try_recv() {
        match ev {
            Event::Key(key) if is_exit(&key) => return Ok(true),
            Event::Mouse(MouseEvent { column, row, .. }) => surface.track(column, row),
            Event::Resize(cols, rows) => surface.resize(cols, rows)?,
            _ => {}
        }
    }
    Ok(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    out: &mut W,
    settings: &Settings,
    textures: &TextureSet,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / settings.fps as f64);
    let mut rng = thread_rng();

    let (cols, rows) = terminal::size()?;
    let mut surface = Surface::new(cols, rows)?;
    info!(
        "terminal {}x{} cells, canvas {}x{} pixels",
        cols,
        rows,
        surface.canvas.width(),
        surface.canvas.height()
    );

    let mut state = init_state(settings.rules);

    loop {
        let frame_start = Instant::now();

        if drain_input(&mut surface, rx)? {
            info!("exit requested");
            return Ok(());
        }

        state = tick(&state, surface.pointer_world(), &mut rng);

        display::render(&mut surface.canvas, &state, textures, settings.fps);
        display::present(out, &surface.canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(settings: &Settings) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    match &settings.log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Anything printed to stderr lands on top of the game.
        None => {
            builder.filter_level(LevelFilter::Warn);
        }
    }
    builder.parse_default_env().init();
    Ok(())
}

fn run_terminal(settings: &Settings, textures: &TextureSet) -> Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, settings, textures, &rx);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    init_logging(&settings)?;
    info!("starting with {:?}", settings);

    // Everything that can fail on bad assets happens before the terminal
    // is taken over.
    let textures = TextureSet::load(&settings.asset_dir)?;

    run_terminal(&settings, &textures)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("rail_shooter: {e}");
        std::process::exit(1);
    }
}
