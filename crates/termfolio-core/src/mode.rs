//! Full-screen modes.
//!
//! `Normal` is the interactive terminal. `Matrix` and `Snake` are overlays
//! that take over the screen and all input until they ask to exit. An
//! overlay can only be entered from `Normal`, so the two are mutually
//! exclusive. Entering registers the overlay's frame timer; exiting cancels
//! it.

use termfolio_types::error::{Result, TermfolioError};
use termfolio_types::input::InputEvent;

use crate::scheduler::{Scheduler, TaskHandle};
use crate::view::ViewLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Matrix,
    Snake,
}

/// What an overlay wants after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySignal {
    Continue,
    Exit,
}

/// A full-screen takeover driven by its own frame timer.
pub trait Overlay {
    /// The mode this overlay represents.
    fn mode(&self) -> Mode;

    /// Milliseconds between frames.
    fn frame_ms(&self) -> u32;

    /// Advance by `frames` timer fires.
    fn tick(&mut self, frames: u32);

    fn handle_input(&mut self, event: &InputEvent) -> OverlaySignal;

    fn resize(&mut self, width: u16, height: u16);

    /// Exactly `height` rows.
    fn render(&self, width: u16, height: u16) -> Vec<ViewLine>;
}

struct ActiveOverlay {
    overlay: Box<dyn Overlay>,
    task: TaskHandle,
}

/// Tracks the active mode and owns the overlay's frame task.
#[derive(Default)]
pub struct ModeController {
    active: Option<ActiveOverlay>,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.active
            .as_ref()
            .map_or(Mode::Normal, |a| a.overlay.mode())
    }

    pub fn is_normal(&self) -> bool {
        self.active.is_none()
    }

    /// Switch from `Normal` to the overlay's mode.
    pub fn enter(&mut self, overlay: Box<dyn Overlay>, scheduler: &mut Scheduler) -> Result<()> {
        if let Some(active) = &self.active {
            return Err(TermfolioError::Mode(format!(
                "cannot enter {:?} while {:?} is active",
                overlay.mode(),
                active.overlay.mode()
            )));
        }
        if overlay.mode() == Mode::Normal {
            return Err(TermfolioError::Mode("overlay reports Normal mode".to_string()));
        }
        let task = scheduler.schedule_repeat(0, overlay.frame_ms());
        log::info!("Entering {:?} mode", overlay.mode());
        self.active = Some(ActiveOverlay { overlay, task });
        Ok(())
    }

    /// Return to `Normal`, cancelling the overlay's timer. Returns the mode
    /// that was left, if any.
    pub fn exit(&mut self, scheduler: &mut Scheduler) -> Option<Mode> {
        let active = self.active.take()?;
        scheduler.cancel(active.task);
        let mode = active.overlay.mode();
        log::info!("Leaving {mode:?} mode");
        Some(mode)
    }

    /// The frame task of the active overlay.
    pub fn task(&self) -> Option<TaskHandle> {
        self.active.as_ref().map(|a| a.task)
    }

    /// Route a timer fire. Returns `true` if it belonged to the overlay.
    pub fn on_fire(&mut self, handle: TaskHandle, fires: u32) -> bool {
        match &mut self.active {
            Some(active) if active.task == handle => {
                active.overlay.tick(fires);
                true
            },
            _ => false,
        }
    }

    /// Deliver input to the overlay. Returns the mode left if it exited.
    pub fn handle_input(&mut self, event: &InputEvent, scheduler: &mut Scheduler) -> Option<Mode> {
        let active = self.active.as_mut()?;
        match active.overlay.handle_input(event) {
            OverlaySignal::Exit => self.exit(scheduler),
            OverlaySignal::Continue => None,
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        if let Some(active) = &mut self.active {
            active.overlay.resize(width, height);
        }
    }

    pub fn render(&self, width: u16, height: u16) -> Option<Vec<ViewLine>> {
        self.active
            .as_ref()
            .map(|a| a.overlay.render(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfolio_types::input::Key;

    struct Dummy {
        mode: Mode,
        ticks: u32,
    }

    impl Overlay for Dummy {
        fn mode(&self) -> Mode {
            self.mode
        }
        fn frame_ms(&self) -> u32 {
            10
        }
        fn tick(&mut self, frames: u32) {
            self.ticks += frames;
        }
        fn handle_input(&mut self, event: &InputEvent) -> OverlaySignal {
            if event.is_escape() {
                OverlaySignal::Exit
            } else {
                OverlaySignal::Continue
            }
        }
        fn resize(&mut self, _width: u16, _height: u16) {}
        fn render(&self, _width: u16, height: u16) -> Vec<ViewLine> {
            vec![ViewLine::empty(); usize::from(height)]
        }
    }

    fn dummy(mode: Mode) -> Box<dyn Overlay> {
        Box::new(Dummy { mode, ticks: 0 })
    }

    #[test]
    fn enter_and_exit() {
        let mut sched = Scheduler::new();
        let mut modes = ModeController::new();
        assert_eq!(modes.mode(), Mode::Normal);
        modes.enter(dummy(Mode::Matrix), &mut sched).unwrap();
        assert_eq!(modes.mode(), Mode::Matrix);
        assert_eq!(sched.active_count(), 1);
        assert_eq!(modes.exit(&mut sched), Some(Mode::Matrix));
        assert!(modes.is_normal());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn overlays_are_mutually_exclusive() {
        let mut sched = Scheduler::new();
        let mut modes = ModeController::new();
        modes.enter(dummy(Mode::Matrix), &mut sched).unwrap();
        assert!(modes.enter(dummy(Mode::Snake), &mut sched).is_err());
        assert_eq!(modes.mode(), Mode::Matrix);
        assert_eq!(sched.active_count(), 1);
    }

    #[test]
    fn exit_when_normal_is_none() {
        let mut sched = Scheduler::new();
        assert_eq!(ModeController::new().exit(&mut sched), None);
    }

    #[test]
    fn escape_exits_and_releases_timer() {
        let mut sched = Scheduler::new();
        let mut modes = ModeController::new();
        modes.enter(dummy(Mode::Snake), &mut sched).unwrap();
        assert_eq!(
            modes.handle_input(&InputEvent::KeyPress(Key::Up), &mut sched),
            None
        );
        assert_eq!(
            modes.handle_input(&InputEvent::KeyPress(Key::Escape), &mut sched),
            Some(Mode::Snake)
        );
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn fires_route_to_overlay_task_only() {
        let mut sched = Scheduler::new();
        let mut modes = ModeController::new();
        let other = sched.schedule_repeat(0, 5);
        modes.enter(dummy(Mode::Matrix), &mut sched).unwrap();
        let task = modes.task().unwrap();
        assert!(modes.on_fire(task, 2));
        assert!(!modes.on_fire(other, 1));
    }
}
