use std::io::Write;
use std::time::Duration;

use glam::Vec2;
use instant::Instant;

use deskcat::config::SimConfig;
use deskcat::input::InputQueue;
use deskcat::render::ascii::AsciiCanvas;
use deskcat::render::FrameSink;
use deskcat::sim::Simulation;
use deskcat::theme::Theme;

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// Terminal redraw interval. Printing every tick floods slow terminals.
const FRAME_INTERVAL: Duration = Duration::from_millis(1000 / 20);
/// How often to log loop timing (seconds).
const STATS_LOG_INTERVAL: f64 = 5.0;
/// Default container width when none is given.
const DEFAULT_WIDTH: f32 = 640.0;
/// Per-frame chance the scripted user clicks somewhere.
const CLICK_CHANCE: f32 = 0.03;

// ---------------------------------------------------------------------------
// Loop timing
// ---------------------------------------------------------------------------

/// Redraw cadence and how many simulation ticks each redraw covers.
/// Logged every `STATS_LOG_INTERVAL` seconds, then reset.
struct LoopStats {
    window_start: Instant,
    redraws: u32,
    ticks: u64,
    slowest_redraw: f64,
}

impl LoopStats {
    fn new() -> Self {
        Self {
            window_start: Instant::now(),
            redraws: 0,
            ticks: 0,
            slowest_redraw: 0.0,
        }
    }

    fn record(&mut self, dt: f64, ticks: u64) {
        self.redraws += 1;
        self.ticks += ticks;
        self.slowest_redraw = self.slowest_redraw.max(dt);

        let elapsed = self.window_start.elapsed().as_secs_f64();
        if elapsed < STATS_LOG_INTERVAL {
            return;
        }
        let redraws = self.redraws as f64;
        log::info!(
            "redraws/s: {:.1} | ticks/s: {:.1} | ticks/redraw: {:.2} | slowest gap: {:.1}ms",
            redraws / elapsed,
            self.ticks as f64 / elapsed,
            self.ticks as f64 / redraws,
            self.slowest_redraw * 1000.0,
        );
        if self.ticks == 0 {
            log::warn!("no simulation ticks in the last {elapsed:.1}s");
        }
        *self = Self::new();
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

struct Options {
    config_path: Option<String>,
    width: f32,
    theme: Theme,
    /// Stop after this many rendered frames; run forever when `None`.
    max_frames: Option<u64>,
    seed: Option<u64>,
    color: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut options = Options {
            config_path: None,
            width: DEFAULT_WIDTH,
            theme: Theme::Light,
            max_frames: None,
            seed: None,
            color: true,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--width" => options.width = value(&mut args, "--width")?,
                "--frames" => options.max_frames = Some(value(&mut args, "--frames")?),
                "--seed" => options.seed = Some(value(&mut args, "--seed")?),
                "--theme" => options.theme = value(&mut args, "--theme")?,
                "--no-color" => options.color = false,
                flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
                path => options.config_path = Some(path.to_string()),
            }
        }
        Ok(options)
    }
}

fn value<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String> {
    let raw = args.next().ok_or_else(|| format!("{flag} needs a value"))?;
    raw.parse().map_err(|_| format!("bad value for {flag}: {raw:?}"))
}

// ---------------------------------------------------------------------------
// Scripted user
// ---------------------------------------------------------------------------

/// Stands in for a person moving the mouse: drifts across the room on a
/// slow Lissajous path and clicks now and then.
struct ScriptedUser {
    rng: fastrand::Rng,
    elapsed: f32,
}

impl ScriptedUser {
    fn new(rng: fastrand::Rng) -> Self {
        Self { rng, elapsed: 0.0 }
    }

    fn feed(&mut self, input: &mut InputQueue, dt: f32, width: f32, height: f32) {
        self.elapsed += dt;
        let t = self.elapsed;
        // Swing past both edges so the cat loses track now and then.
        let pointer = Vec2::new(
            width * 0.5 + width * 0.6 * (t * 0.23).sin(),
            height * 0.5 + height * 0.35 * (t * 0.71).sin(),
        );
        input.pointer_moved(pointer);

        if self.rng.f32() < CLICK_CHANCE {
            let pos = Vec2::new(
                self.rng.f32() * width,
                self.rng.f32() * height * 0.6,
            );
            input.clicked(pos);
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Top-level host state: plays input source, viewport and renderer for the simulation.
struct App {
    sim: Simulation,
    input: InputQueue,
    user: ScriptedUser,
    canvas: AsciiCanvas,
    theme: Theme,
    color: bool,

    // Fixed timestep
    last_frame_time: Option<Instant>,
    accumulator: f64,
    tick_count: u64,

    stats: LoopStats,
    max_frames: Option<u64>,
}

impl App {
    fn new(config: SimConfig, options: &Options) -> Self {
        let sim = match options.seed {
            Some(seed) => Simulation::with_seed(config, options.width, seed),
            None => Simulation::new(config, options.width),
        };
        let vp = *sim.viewport();
        let user_rng = match options.seed {
            Some(seed) => fastrand::Rng::with_seed(seed.wrapping_add(1)),
            None => fastrand::Rng::new(),
        };
        Self {
            sim,
            input: InputQueue::new(),
            user: ScriptedUser::new(user_rng),
            canvas: AsciiCanvas::for_viewport(vp.width, vp.height),
            theme: options.theme,
            color: options.color,
            last_frame_time: None,
            accumulator: 0.0,
            tick_count: 0,
            stats: LoopStats::new(),
            max_frames: options.max_frames,
        }
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= TICK_RATE {
            // Input is read once, at the start of each tick.
            self.sim.tick(self.input.drain());
            self.accumulator -= TICK_RATE;
            self.tick_count += 1;
        }
    }

    fn render(&mut self, out: &mut impl Write) -> std::io::Result<()> {
        let frame = self.sim.frame(self.theme);
        self.canvas.present(&frame);
        let text = if self.color {
            self.canvas.to_ansi(&frame.palette)
        } else {
            self.canvas.to_plain()
        };
        let cat = self.sim.cat();
        // Home the cursor and clear, then draw.
        write!(out, "\x1b[H\x1b[2J{text}")?;
        writeln!(
            out,
            "state: {:<5}  toys: {:<3}  tick: {}",
            cat.kind().label(),
            self.sim.toys().len(),
            self.tick_count
        )?;
        out.flush()
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let mut frames = 0u64;

        loop {
            // --- Timing ---
            let now = Instant::now();
            if let Some(last) = self.last_frame_time {
                let dt = now.duration_since(last).as_secs_f64();
                let vp = *self.sim.viewport();
                self.user.feed(&mut self.input, dt as f32, vp.width, vp.height);

                let before = self.tick_count;
                self.run_fixed_update(dt);
                self.stats.record(dt, self.tick_count - before);
            }
            self.last_frame_time = Some(now);

            // --- Render ---
            self.render(&mut out)?;
            frames += 1;
            if self.max_frames.is_some_and(|max| frames >= max) {
                log::info!("Rendered {frames} frames, exiting");
                return Ok(());
            }

            std::thread::sleep(FRAME_INTERVAL);
        }
    }
}

/// Entry point: parse arguments, load config and run the terminal loop.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let options = Options::parse(std::env::args().skip(1))?;
    let config = match &options.config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut app = App::new(config, &options);
    log::info!("DeskCat running in {} theme", app.theme.label());
    app.run_loop()
}
