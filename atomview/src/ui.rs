//! Overlay UI: the parameter panel and the frame-stats readout.

use egui::{Align2, Color32, Context, RichText};
use std::time::Instant;

use common::OrbitCamera;

use crate::physics::KernelConfig;

pub const KERNEL_RADIUS_RANGE: std::ops::RangeInclusive<f32> = 1.0..=300.0;
pub const CAMERA_DISTANCE_RANGE: std::ops::RangeInclusive<f32> = 100.0..=400.0;

/// Frame-timing counters, ticked once per redraw. FPS is averaged over
/// roughly one-second windows; frame time is the gap to the previous tick.
pub struct FrameStats {
    last_frame: Instant,
    window_start: Instant,
    frames_in_window: u32,
    frame_ms: f32,
    fps: f32,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            window_start: now,
            frames_in_window: 0,
            frame_ms: 0.0,
            fps: 0.0,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.frame_ms = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        self.frames_in_window += 1;

        let window = (now - self.window_start).as_secs_f32();
        if window >= 1.0 {
            self.fps = self.frames_in_window as f32 / window;
            self.frames_in_window = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }
}

/// Top-left stats overlay.
pub fn draw_stats(ctx: &Context, stats: &FrameStats, nucleons: usize, electrons: usize) {
    egui::Area::new(egui::Id::new("frame_stats"))
        .anchor(Align2::LEFT_TOP, [8.0, 8.0])
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_black_alpha(160))
                .inner_margin(6.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("{:>5.1} fps", stats.fps()))
                            .monospace()
                            .color(Color32::LIGHT_GREEN),
                    );
                    ui.label(
                        RichText::new(format!("{:>5.2} ms", stats.frame_ms()))
                            .monospace()
                            .color(Color32::WHITE),
                    );
                    ui.label(
                        RichText::new(format!("{} nucleons / {} electrons", nucleons, electrons))
                            .small(),
                    );
                });
        });
}

/// Right-top parameter panel. Returns true when the kernel radius changed
/// so the caller can re-sample nucleon positions.
pub fn draw_control_panel(
    ctx: &Context,
    config: &mut KernelConfig,
    camera: &mut OrbitCamera,
    kernel_editable: bool,
) -> bool {
    let mut kernel_changed = false;

    egui::Window::new("parameters")
        .anchor(Align2::RIGHT_TOP, [-8.0, 8.0])
        .resizable(false)
        .show(ctx, |ui| {
            egui::CollapsingHeader::new("kernel")
                .default_open(true)
                .show(ui, |ui| {
                    let slider =
                        egui::Slider::new(&mut config.kernel_radius, KERNEL_RADIUS_RANGE)
                            .text("radius");
                    if ui.add_enabled(kernel_editable, slider).changed() {
                        kernel_changed = true;
                    }
                });

            egui::CollapsingHeader::new("camera")
                .default_open(true)
                .show(ui, |ui| {
                    let slider =
                        egui::Slider::new(&mut camera.distance, CAMERA_DISTANCE_RANGE)
                            .text("distance");
                    if ui.add(slider).changed() {
                        camera.update_orbital();
                    }
                });
        });

    kernel_changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn stats_track_a_steady_tick_rate() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        for frame in 1..=20 {
            stats.tick(start + Duration::from_millis(frame * 100));
        }
        // 100 ms per frame: 10 fps, one full window elapsed at least once.
        assert!((stats.fps() - 10.0).abs() < 0.5, "fps = {}", stats.fps());
        assert!((stats.frame_ms() - 100.0).abs() < 1.0);
    }

    #[test]
    fn stats_start_quiet() {
        let stats = FrameStats::new(Instant::now());
        assert_eq!(stats.fps(), 0.0);
        assert_eq!(stats.frame_ms(), 0.0);
    }
}
