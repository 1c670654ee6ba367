//! Periodic forward navigation while a slideshow is on screen.

use std::time::Duration;

use tracing::debug;

use crate::geometry::Rect;
use crate::scheduler::{Scheduler, TimerHandle, TimerKind, TimerTarget};

/// The visible band of the page, in document coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(scroll_top: f32, height: f32) -> Self {
        Self { scroll_top, height }
    }

    pub fn bottom(&self) -> f32 {
        self.scroll_top + self.height
    }

    /// Vertical overlap test only; boxes merely touching an edge are outside.
    pub fn intersects(&self, rect: &Rect) -> bool {
        !(rect.top >= self.bottom() || rect.bottom() <= self.scroll_top)
    }
}

/// Owns the single autorun interval of one widget.
#[derive(Debug)]
pub struct AutorunScheduler {
    widget: usize,
    interval: Duration,
    timer: Option<TimerHandle>,
}

impl AutorunScheduler {
    pub fn new(widget: usize, interval: Duration) -> Self {
        Self { widget, interval, timer: None }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arms the interval; does nothing if it is already armed.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if self.timer.is_some() {
            return;
        }
        debug!(widget = self.widget, interval_ms = self.interval.as_millis() as u64, "autorun started");
        self.timer = Some(scheduler.set_interval(
            self.interval,
            TimerTarget { widget: self.widget, kind: TimerKind::Autorun },
        ));
    }

    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if let Some(timer) = self.timer.take() {
            debug!(widget = self.widget, "autorun cancelled");
            scheduler.clear(timer);
        }
    }

    /// Whether a tick should navigate: the widget must be on screen.
    pub fn should_advance(&self, viewport: &Viewport, widget_box: &Rect) -> bool {
        self.is_running() && viewport.intersects(widget_box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_intersection() {
        let viewport = Viewport::new(100.0, 500.0);
        assert!(viewport.intersects(&Rect::new(0.0, 50.0, 10.0, 100.0)));
        assert!(viewport.intersects(&Rect::new(0.0, 550.0, 10.0, 100.0)));
        assert!(!viewport.intersects(&Rect::new(0.0, 600.0, 10.0, 100.0)));
        assert!(!viewport.intersects(&Rect::new(0.0, 0.0, 10.0, 100.0)));
    }

    #[test]
    fn test_start_is_single_instance() {
        let mut scheduler = Scheduler::new();
        let mut autorun = AutorunScheduler::new(3, Duration::from_millis(2000));
        autorun.start(&mut scheduler);
        autorun.start(&mut scheduler);
        assert_eq!(scheduler.pending_of(TimerKind::Autorun), 1);

        autorun.stop(&mut scheduler);
        autorun.stop(&mut scheduler);
        assert!(!autorun.is_running());
        assert_eq!(scheduler.pending(), 0);

        autorun.start(&mut scheduler);
        assert!(autorun.is_running());
    }

    #[test]
    fn test_should_advance_needs_visibility() {
        let mut scheduler = Scheduler::new();
        let mut autorun = AutorunScheduler::new(0, Duration::from_millis(10));
        let on_screen = Rect::new(0.0, 10.0, 100.0, 100.0);
        let viewport = Viewport::new(0.0, 600.0);
        assert!(!autorun.should_advance(&viewport, &on_screen));

        autorun.start(&mut scheduler);
        assert!(autorun.should_advance(&viewport, &on_screen));
        assert!(!autorun.should_advance(&Viewport::new(1000.0, 600.0), &on_screen));
    }
}
