/// Fixed-interval game clock.
///
/// Polled from the frame loop with the current time; fires at most one
/// tick per poll. After a tick the next boundary is one full period after
/// the poll that fired, so a slow frame never produces a burst of
/// catch-up ticks.
///
/// ```text
///   Stopped ──start──▶ Running ◀──resume── Paused
///      ▲                  │  └────pause─────▶ │
///      └──────stop────────┴──────stop─────────┘
/// ```

use std::time::{Duration, Instant};

use super::session::Screen;

/// Default tick period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClockState {
    Stopped,
    Running,
    Paused,
}

#[derive(Clone, Debug)]
pub struct GameClock {
    period: Duration,
    state: ClockState,
    next_tick: Option<Instant>,
}

impl GameClock {
    pub fn new(period: Duration) -> Self {
        GameClock { period, state: ClockState::Stopped, next_tick: None }
    }

    #[cfg(test)]
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// Takes effect from the next boundary onward.
    pub fn set_period(&mut self, period: Duration) {
        self.period = period;
    }

    pub fn start(&mut self, now: Instant) {
        self.state = ClockState::Running;
        self.next_tick = Some(now + self.period);
    }

    pub fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
            self.next_tick = None;
        }
    }

    /// Resume from a fresh period boundary. No-op unless paused.
    pub fn resume(&mut self, now: Instant) {
        if self.state == ClockState::Paused {
            self.start(now);
        }
    }

    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
        self.next_tick = None;
    }

    /// Bring the clock in line with the session screen.
    pub fn follow(&mut self, screen: Screen, now: Instant) {
        match (screen, self.state) {
            (Screen::Playing, ClockState::Stopped) => self.start(now),
            (Screen::Playing, ClockState::Paused) => self.resume(now),
            (Screen::Paused, ClockState::Running) => self.pause(),
            (Screen::Paused, ClockState::Stopped) => {
                // entered straight into the pause menu (restore while paused)
                self.state = ClockState::Paused;
            }
            (Screen::Menu | Screen::Settings, ClockState::Running | ClockState::Paused) => {
                self.stop()
            }
            _ => {}
        }
    }

    /// Returns true when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state != ClockState::Running {
            return false;
        }
        match self.next_tick {
            Some(at) if now >= at => {
                self.next_tick = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(200);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        assert!(!c.poll(t0 + ms(199)));
        assert!(c.poll(t0 + ms(200)));
        assert!(!c.poll(t0 + ms(201)));
        assert!(c.poll(t0 + ms(400)));
    }

    #[test]
    fn no_catch_up_after_long_frame() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        assert!(c.poll(t0 + ms(1000)));
        // four missed periods are not replayed
        assert!(!c.poll(t0 + ms(1000)));
        assert!(!c.poll(t0 + ms(1199)));
        assert!(c.poll(t0 + ms(1200)));
    }

    #[test]
    fn paused_clock_never_fires() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        c.pause();
        assert!(!c.poll(t0 + ms(10_000)));
    }

    #[test]
    fn resume_starts_fresh_period() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        c.pause();
        c.resume(t0 + ms(5000));
        assert!(!c.poll(t0 + ms(5100)));
        assert!(c.poll(t0 + ms(5200)));
    }

    #[test]
    fn stop_halts_everything() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        c.stop();
        assert!(!c.poll(t0 + ms(200)));
        c.resume(t0 + ms(300));
        assert_eq!(c.state(), ClockState::Stopped);
        assert!(!c.poll(t0 + ms(10_000)));
    }

    #[test]
    fn double_pause_and_stray_resume_are_noops() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.resume(t0);
        assert_eq!(c.state(), ClockState::Stopped);
        c.start(t0);
        c.pause();
        c.pause();
        assert_eq!(c.state(), ClockState::Paused);
    }

    #[test]
    fn follow_tracks_screen() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.follow(Screen::Playing, t0);
        assert_eq!(c.state(), ClockState::Running);
        c.follow(Screen::Paused, t0 + ms(50));
        assert_eq!(c.state(), ClockState::Paused);
        c.follow(Screen::Playing, t0 + ms(900));
        assert!(!c.poll(t0 + ms(1000)));
        assert!(c.poll(t0 + ms(1100)));
        c.follow(Screen::Menu, t0 + ms(1150));
        assert_eq!(c.state(), ClockState::Stopped);
        assert!(!c.poll(t0 + ms(5000)));
    }

    #[test]
    fn new_period_applies_after_next_tick() {
        let t0 = Instant::now();
        let mut c = GameClock::new(P);
        c.start(t0);
        c.set_period(ms(80));
        assert!(c.poll(t0 + ms(200)));
        assert!(c.poll(t0 + ms(280)));
    }
}
