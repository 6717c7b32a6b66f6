use std::error::Error;
use std::io::Write;
use std::time::Duration;

use instant::Instant;

use crate::config::AppConfig;
use crate::debug::timer::{FramePhase, PhaseTimers};
use crate::pilot::Autopilot;
use crate::render::{self, TileGrid};
use crate::scene::SceneController;
use crate::sim::TICKS_PER_SECOND;

/// Target simulation tick rate (seconds per tick).
const TICK_RATE: f64 = 1.0 / TICKS_PER_SECOND as f64;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log FPS (seconds).
const FPS_LOG_INTERVAL: f64 = 5.0;

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    last_log_time: Instant,
    frame_time_sum: f64,
    frame_time_min: f64,
    frame_time_max: f64,
    frames_since_log: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            last_log_time: Instant::now(),
            frame_time_sum: 0.0,
            frame_time_min: f64::MAX,
            frame_time_max: 0.0,
            frames_since_log: 0,
        }
    }

    fn record_frame(&mut self, dt: f64, timers: &mut PhaseTimers) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.frame_time_sum += dt;
        self.frame_time_min = self.frame_time_min.min(dt);
        self.frame_time_max = self.frame_time_max.max(dt);

        let elapsed = self.last_log_time.elapsed().as_secs_f64();
        if elapsed >= FPS_LOG_INTERVAL {
            let avg_ms = (self.frame_time_sum / self.frames_since_log as f64) * 1000.0;
            let fps = self.frames_since_log as f64 / elapsed;
            log::info!(
                "FPS: {:.0} | avg: {:.2}ms | min: {:.2}ms | max: {:.2}ms | total frames: {}",
                fps,
                avg_ms,
                self.frame_time_min * 1000.0,
                self.frame_time_max * 1000.0,
                self.frame_count,
            );
            log::info!("Phases: {}", timers.report());
            self.last_log_time = Instant::now();
            self.frame_time_sum = 0.0;
            self.frame_time_min = f64::MAX;
            self.frame_time_max = 0.0;
            self.frames_since_log = 0;
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Headless host: drives the scene controller at a fixed cadence and
/// stands in for the window, keyboard and glyph renderer.
struct App {
    config: AppConfig,
    scenes: SceneController,
    pilot: Autopilot,
    grid: TileGrid,

    // Fixed timestep
    accumulator: f64,
    tick_count: u64,

    // Frame timing
    frame_stats: FrameStats,
    timers: PhaseTimers,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        log::info!("Autopilot seed {seed}");
        Self {
            config,
            scenes: SceneController::new(),
            pilot: Autopilot::new(seed),
            grid: TileGrid::new(),
            accumulator: 0.0,
            tick_count: 0,
            frame_stats: FrameStats::new(),
            timers: PhaseTimers::new(),
        }
    }

    fn finished(&self) -> bool {
        self.config.max_ticks > 0 && self.tick_count >= self.config.max_ticks
    }

    /// Run fixed-timestep simulation ticks.
    fn run_fixed_update(&mut self, dt: f64) -> Result<(), Box<dyn Error>> {
        self.accumulator += dt;

        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }

        while self.accumulator >= TICK_RATE && !self.finished() {
            self.timers.begin();
            let intent = self.pilot.intent(&self.scenes);
            self.timers.end(FramePhase::Pilot);

            self.timers.begin();
            self.scenes.update(intent);
            self.timers.end(FramePhase::Simulate);

            self.accumulator -= TICK_RATE;
            self.tick_count += 1;

            if self.config.dump_every > 0 && self.tick_count % self.config.dump_every == 0 {
                self.dump()?;
            }
        }
        Ok(())
    }

    /// Print the current grid to stdout.
    fn dump(&mut self) -> Result<(), Box<dyn Error>> {
        self.timers.begin();
        render::draw_scene(&self.scenes, &mut self.grid);
        self.timers.end(FramePhase::Rasterize);

        self.timers.begin();
        let mut out = std::io::stdout().lock();
        writeln!(out, "--- tick {} ({}) ---", self.tick_count, self.scenes.scene.label())?;
        out.write_all(self.grid.to_text().as_bytes())?;
        out.flush()?;
        self.timers.end(FramePhase::Present);
        Ok(())
    }

    fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let mut last_frame_time = Instant::now();

        while !self.finished() {
            let dt = if self.config.realtime {
                let now = Instant::now();
                let dt = now.duration_since(last_frame_time).as_secs_f64();
                last_frame_time = now;
                dt
            } else {
                TICK_RATE
            };

            self.frame_stats.record_frame(dt, &mut self.timers);
            self.run_fixed_update(dt)?;

            if self.config.realtime {
                std::thread::sleep(Duration::from_secs_f64(TICK_RATE));
            }
        }

        log::info!(
            "Stopped after {} ticks in scene {} | victories: {} | defeats: {}",
            self.tick_count,
            self.scenes.scene.label(),
            self.scenes.victories,
            self.scenes.defeats,
        );
        Ok(())
    }
}

/// Entry point: read config and run the host loop.
pub fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    log::info!("Config: {config:?}");
    let mut app = App::new(config);
    app.run()
}
