use instant::Instant;

/// Which part of a host frame is being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FramePhase {
    Pilot = 0,
    Simulate = 1,
    Rasterize = 2,
    Present = 3,
}

const PHASES: usize = 4;

impl FramePhase {
    pub const ALL: [FramePhase; PHASES] =
        [Self::Pilot, Self::Simulate, Self::Rasterize, Self::Present];

    pub fn label(self) -> &'static str {
        match self {
            Self::Pilot => "Pilot",
            Self::Simulate => "Simulate",
            Self::Rasterize => "Rasterize",
            Self::Present => "Present",
        }
    }
}

/// Weight of the newest sample in the moving average.
const EMA_ALPHA: f64 = 0.1;

/// Host frame timings: a smoothed value per phase plus the worst sample
/// since the last report.
pub struct PhaseTimers {
    smoothed_us: [f64; PHASES],
    peak_us: [f64; PHASES],
    start: Instant,
}

impl PhaseTimers {
    pub fn new() -> Self {
        Self {
            smoothed_us: [0.0; PHASES],
            peak_us: [0.0; PHASES],
            start: Instant::now(),
        }
    }

    pub fn begin(&mut self) {
        self.start = Instant::now();
    }

    /// Attribute the time since `begin` to `phase`.
    pub fn end(&mut self, phase: FramePhase) {
        let elapsed_us = self.start.elapsed().as_secs_f64() * 1_000_000.0;
        self.record(phase, elapsed_us);
    }

    fn record(&mut self, phase: FramePhase, elapsed_us: f64) {
        let idx = phase as usize;
        self.smoothed_us[idx] = self.smoothed_us[idx] * (1.0 - EMA_ALPHA) + elapsed_us * EMA_ALPHA;
        self.peak_us[idx] = self.peak_us[idx].max(elapsed_us);
    }

    /// One-line report for the periodic stats log. Starts a new peak window.
    pub fn report(&mut self) -> String {
        let line = FramePhase::ALL
            .iter()
            .map(|&p| {
                let i = p as usize;
                format!("{} {:.1}us (peak {:.1})", p.label(), self.smoothed_us[i], self.peak_us[i])
            })
            .collect::<Vec<_>>()
            .join(" | ");
        self.peak_us = [0.0; PHASES];
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_moves_toward_sample() {
        let mut t = PhaseTimers::new();
        t.record(FramePhase::Simulate, 100.0);
        assert!((t.smoothed_us[FramePhase::Simulate as usize] - 10.0).abs() < 1e-9);
        t.record(FramePhase::Simulate, 100.0);
        assert!((t.smoothed_us[FramePhase::Simulate as usize] - 19.0).abs() < 1e-9);
        assert_eq!(t.smoothed_us[FramePhase::Pilot as usize], 0.0);
    }

    #[test]
    fn report_names_every_phase_and_resets_peaks() {
        let mut t = PhaseTimers::new();
        t.record(FramePhase::Present, 40.0);
        t.record(FramePhase::Present, 5.0);
        let line = t.report();
        for p in FramePhase::ALL {
            assert!(line.contains(p.label()));
        }
        assert!(line.contains("peak 40.0"));
        t.report();
        assert_eq!(t.peak_us, [0.0; PHASES]);
        assert!(t.smoothed_us[FramePhase::Present as usize] > 0.0);
    }
}
