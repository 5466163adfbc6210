use std::time::{Duration, Instant};

use crate::config::STATS_WINDOW_MS;

/// Format large numbers with K/M/B suffixes
pub fn format_number(n: usize) -> String {
    if n >= 1_000_000_000 {
        format!("{:.1}B", n as f64 / 1_000_000_000.0)
    } else if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Counter averaged over fixed windows; the rate only changes when a window closes.
#[derive(Clone, Debug)]
struct RateWindow {
    count: u64,
    started: Instant,
    rate: Option<f64>,
}

impl RateWindow {
    fn new(now: Instant) -> Self {
        Self {
            count: 0,
            started: now,
            rate: None,
        }
    }

    fn add(&mut self, amount: u64, now: Instant, window: Duration) {
        self.count += amount;
        let span = now.saturating_duration_since(self.started);
        if span > window {
            self.rate = Some(self.count as f64 / span.as_secs_f64());
            self.count = 0;
            self.started = now;
        }
    }
}

/// Frames per second and evaluated cells per second, as shown in the side panel.
#[derive(Clone, Debug)]
pub struct SimulationStats {
    window: Duration,
    frames: RateWindow,
    cells: RateWindow,
}

impl SimulationStats {
    pub fn new(now: Instant) -> Self {
        Self::with_window(now, Duration::from_millis(STATS_WINDOW_MS as u64))
    }

    pub fn with_window(now: Instant, window: Duration) -> Self {
        Self {
            window,
            frames: RateWindow::new(now),
            cells: RateWindow::new(now),
        }
    }

    /// Record one received frame and the candidates it evaluated
    pub fn record_frame(&mut self, evaluated: usize, now: Instant) {
        self.frames.add(1, now, self.window);
        self.cells.add(evaluated as u64, now, self.window);
    }

    pub fn fps(&self) -> Option<f64> {
        self.frames.rate
    }

    pub fn cells_per_sec(&self) -> Option<f64> {
        self.cells.rate
    }

    /// Panel text; " - " until the first window closes
    pub fn fps_label(&self) -> String {
        self.fps().map_or_else(|| " - ".to_string(), |fps| format!("{fps:.1}"))
    }

    pub fn cells_label(&self) -> String {
        self.cells_per_sec()
            .map_or_else(|| " - ".to_string(), |rate| format!("{}/s", format_number(rate as usize)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(2_340_000), "2.3M");
        assert_eq!(format_number(3_000_000_000), "3.0B");
    }

    #[test]
    fn test_rates_wait_for_window() {
        let start = Instant::now();
        let mut stats = SimulationStats::new(start);
        stats.record_frame(100, start + Duration::from_millis(500));
        assert_eq!(stats.fps(), None);
        assert_eq!(stats.fps_label(), " - ");
        assert_eq!(stats.cells_label(), " - ");
    }

    #[test]
    fn test_rates_over_window() {
        let start = Instant::now();
        let mut stats = SimulationStats::with_window(start, Duration::from_secs(2));
        for i in 1..=9 {
            stats.record_frame(1_000, start + Duration::from_millis(i * 250));
        }
        // 9 frames and 9000 cells over 2.25 s
        assert!((stats.fps().unwrap() - 4.0).abs() < 1e-9);
        assert!((stats.cells_per_sec().unwrap() - 4_000.0).abs() < 1e-6);
        assert_eq!(stats.cells_label(), "4.0K/s");

        // A new window starts empty but keeps the last rate visible
        stats.record_frame(0, start + Duration::from_millis(2_500));
        assert!((stats.fps().unwrap() - 4.0).abs() < 1e-9);
    }
}
