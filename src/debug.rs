/*
 * Debug Information Module
 *
 * Frame and tick metrics shown in the control panel and the debug overlay.
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick_time: Duration,
    pub ticks_this_frame: usize,
}

impl DebugInfo {
    /// Lines for the on-screen overlay.
    pub fn lines(&self, boids: usize, search: &str) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Tick time: {:.3} ms", self.tick_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_this_frame),
            format!("Boids: {}", boids),
            format!("Neighbor search: {}", search),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_report_counts() {
        let info = DebugInfo {
            fps: 59.94,
            frame_time: Duration::from_micros(16_700),
            ticks_this_frame: 1,
            ..DebugInfo::default()
        };

        let lines = info.lines(12, "spatial grid");
        assert_eq!(lines[0], "FPS: 59.9");
        assert_eq!(lines[1], "Frame time: 16.70 ms");
        assert_eq!(lines[3], "Ticks this frame: 1");
        assert_eq!(lines[4], "Boids: 12");
        assert_eq!(lines[5], "Neighbor search: spatial grid");
    }
}
