//! Typing effect: reveals a string a few characters per tick.

use crate::scheduler::{Scheduler, TaskHandle};

/// Glyph shown after the revealed text while typing is in progress.
pub const TYPING_CURSOR: char = '|';

/// Timing of a typing effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingSpeed {
    pub delay_ms: u32,
    pub interval_ms: u32,
    pub chars_per_tick: usize,
}

/// A lazily revealed prefix of `text`.
///
/// Mounting registers a repeat task; each fire reveals `chars_per_tick`
/// more characters. The task is cancelled once the text is complete or the
/// effect is unmounted. Mounting twice does not restart the reveal; only
/// [`TypingEffect::set_text`] with a different string does.
#[derive(Debug)]
pub struct TypingEffect {
    text: String,
    /// Characters revealed so far.
    revealed: usize,
    total: usize,
    speed: TypingSpeed,
    task: Option<TaskHandle>,
}

impl TypingEffect {
    pub fn new(text: impl Into<String>, speed: TypingSpeed) -> Self {
        let text = text.into();
        let total = text.chars().count();
        Self {
            text,
            revealed: 0,
            total,
            speed,
            task: None,
        }
    }

    /// Start revealing. No-op if already mounted or complete.
    pub fn mount(&mut self, scheduler: &mut Scheduler) {
        if self.task.is_some() || self.is_complete() {
            return;
        }
        self.task = Some(scheduler.schedule_repeat(self.speed.delay_ms, self.speed.interval_ms));
    }

    /// Stop revealing and release the timer.
    pub fn unmount(&mut self, scheduler: &mut Scheduler) {
        if let Some(task) = self.task.take() {
            scheduler.cancel(task);
        }
    }

    /// Replace the text. A different string restarts the reveal from the
    /// beginning, re-arming the timer if the effect was mounted.
    pub fn set_text(&mut self, text: &str, scheduler: &mut Scheduler) {
        if text == self.text {
            return;
        }
        let was_mounted = self.task.is_some();
        self.unmount(scheduler);
        self.text = text.to_string();
        self.total = self.text.chars().count();
        self.revealed = 0;
        if was_mounted {
            self.mount(scheduler);
        }
    }

    /// The scheduler task driving this effect, while mounted.
    pub fn task(&self) -> Option<TaskHandle> {
        self.task
    }

    /// Apply `fires` timer ticks.
    pub fn on_tick(&mut self, fires: u32, scheduler: &mut Scheduler) {
        let step = self.speed.chars_per_tick.max(1).saturating_mul(fires as usize);
        self.revealed = self.revealed.saturating_add(step).min(self.total);
        if self.is_complete() {
            self.unmount(scheduler);
        }
    }

    /// Reveal everything at once.
    pub fn finish(&mut self, scheduler: &mut Scheduler) {
        self.revealed = self.total;
        self.unmount(scheduler);
    }

    /// The revealed prefix.
    pub fn displayed(&self) -> &str {
        let end = self
            .text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[..end]
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: TypingSpeed = TypingSpeed {
        delay_ms: 200,
        interval_ms: 40,
        chars_per_tick: 1,
    };

    fn drive(effect: &mut TypingEffect, sched: &mut Scheduler, dt: u32) {
        for (handle, fires) in sched.advance(dt) {
            if effect.task() == Some(handle) {
                effect.on_tick(fires, sched);
            }
        }
    }

    #[test]
    fn huge_chars_per_tick_saturates() {
        let mut sched = Scheduler::new();
        let speed = TypingSpeed {
            chars_per_tick: usize::MAX,
            ..SPEED
        };
        let mut t = TypingEffect::new("abc", speed);
        t.mount(&mut sched);
        drive(&mut t, &mut sched, 1000);
        assert_eq!(t.displayed(), "abc");
        assert!(t.is_complete());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn reveals_after_initial_delay() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("abc", SPEED);
        t.mount(&mut sched);
        drive(&mut t, &mut sched, 200);
        assert_eq!(t.displayed(), "");
        drive(&mut t, &mut sched, 40);
        assert_eq!(t.displayed(), "a");
        drive(&mut t, &mut sched, 80);
        assert_eq!(t.displayed(), "abc");
        assert!(t.is_complete());
    }

    #[test]
    fn completion_releases_timer() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("hi", SPEED);
        t.mount(&mut sched);
        drive(&mut t, &mut sched, 1000);
        assert!(t.is_complete());
        assert_eq!(t.task(), None);
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn multibyte_prefixes_are_char_aligned() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("👋é", SPEED);
        t.mount(&mut sched);
        t.on_tick(1, &mut sched);
        assert_eq!(t.displayed(), "👋");
        t.on_tick(1, &mut sched);
        assert_eq!(t.displayed(), "👋é");
    }

    #[test]
    fn chars_per_tick() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new(
            "abcdef",
            TypingSpeed {
                chars_per_tick: 4,
                ..SPEED
            },
        );
        t.mount(&mut sched);
        t.on_tick(1, &mut sched);
        assert_eq!(t.displayed(), "abcd");
    }

    #[test]
    fn remount_does_not_restart() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("abcd", SPEED);
        t.mount(&mut sched);
        t.on_tick(2, &mut sched);
        t.mount(&mut sched);
        assert_eq!(t.displayed(), "ab");
        assert_eq!(sched.active_count(), 1);
    }

    #[test]
    fn new_text_restarts() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("abcd", SPEED);
        t.mount(&mut sched);
        t.on_tick(2, &mut sched);
        t.set_text("abcd", &mut sched);
        assert_eq!(t.displayed(), "ab");
        t.set_text("xyz", &mut sched);
        assert_eq!(t.displayed(), "");
        assert!(t.task().is_some());
        assert_eq!(sched.active_count(), 1);
    }

    #[test]
    fn unmount_cancels() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("abcd", SPEED);
        t.mount(&mut sched);
        t.unmount(&mut sched);
        assert_eq!(sched.active_count(), 0);
        assert!(!t.is_complete());
    }

    #[test]
    fn empty_text_is_complete_without_timer() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("", SPEED);
        t.mount(&mut sched);
        assert!(t.is_complete());
        assert_eq!(sched.active_count(), 0);
    }

    #[test]
    fn finish_reveals_all() {
        let mut sched = Scheduler::new();
        let mut t = TypingEffect::new("abcd", SPEED);
        t.mount(&mut sched);
        t.finish(&mut sched);
        assert_eq!(t.displayed(), "abcd");
        assert_eq!(sched.active_count(), 0);
    }
}
