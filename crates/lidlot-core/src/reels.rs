//! Slot-reel animation.
//!
//! Purely cosmetic: the reels flicker through random digits while the play
//! request is in flight. The outcome shown afterwards is always decided by
//! the server response, never by the animation.

use std::time::Duration;

use rand::Rng;
use tracing::trace;

/// Number of reels on the slot machine.
pub const REEL_COUNT: usize = 3;

/// Digits shown for a win.
pub const WINNING_REELS: [u8; REEL_COUNT] = [7, 7, 7];

/// Digits shown after a failure or an invalid play.
pub const NEUTRAL_REELS: [u8; REEL_COUNT] = [0, 0, 0];

/// Replacement for the last reel when a losing draw lands on the winning
/// combination.
const LOSING_LAST_REEL: u8 = 5;

/// Anything that can show the three reels.
pub trait ReelDisplay {
    /// Show the given digits.
    fn set_reels(&mut self, digits: [u8; REEL_COUNT]);

    /// Toggle the spinning indicator.
    fn set_spinning(&mut self, spinning: bool);
}

/// Three independent random digits.
pub fn random_digits<R: Rng>(rng: &mut R) -> [u8; REEL_COUNT] {
    [rng.gen_range(0..10), rng.gen_range(0..10), rng.gen_range(0..10)]
}

/// Random digits for a lose, never equal to [`WINNING_REELS`].
pub fn losing_digits<R: Rng>(rng: &mut R) -> [u8; REEL_COUNT] {
    demote_win(random_digits(rng))
}

fn demote_win(mut digits: [u8; REEL_COUNT]) -> [u8; REEL_COUNT] {
    if digits == WINNING_REELS {
        digits[REEL_COUNT - 1] = LOSING_LAST_REEL;
    }
    digits
}

/// Timing of one spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinTiming {
    /// Total time the reels spin.
    pub duration: Duration,
    /// Time between two random frames.
    pub interval: Duration,
}

impl Default for SpinTiming {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1400),
            interval: Duration::from_millis(80),
        }
    }
}

/// The reel animation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotReels {
    timing: SpinTiming,
}

impl SlotReels {
    pub fn new(timing: SpinTiming) -> Self {
        Self { timing }
    }

    /// Spin for the configured duration and resolve.
    ///
    /// A random frame is written every `interval` (the first one after one
    /// interval has elapsed). The last frame stays on the display; callers
    /// overwrite it with the real outcome.
    pub async fn spin<D, R>(&self, display: &mut D, rng: &mut R)
    where
        D: ReelDisplay + ?Sized,
        R: Rng,
    {
        display.set_spinning(true);

        let stop = tokio::time::sleep(self.timing.duration);
        tokio::pin!(stop);

        let start = tokio::time::Instant::now() + self.timing.interval;
        let mut ticker = tokio::time::interval_at(start, self.timing.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut frames = 0_u32;
        loop {
            tokio::select! {
                biased;
                () = &mut stop => break,
                _ = ticker.tick() => {
                    display.set_reels(random_digits(rng));
                    frames += 1;
                }
            }
        }

        display.set_spinning(false);
        trace!(frames, "reels stopped");
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<[u8; REEL_COUNT]>,
        spinning: Vec<bool>,
    }

    impl ReelDisplay for Recorder {
        fn set_reels(&mut self, digits: [u8; REEL_COUNT]) {
            self.frames.push(digits);
        }

        fn set_spinning(&mut self, spinning: bool) {
            self.spinning.push(spinning);
        }
    }

    #[test]
    fn demote_win_changes_only_the_winning_combination() {
        assert_eq!(demote_win([7, 7, 7]), [7, 7, 5]);
        assert_eq!(demote_win([7, 7, 6]), [7, 7, 6]);
        assert_eq!(demote_win([0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn losing_digits_never_show_a_win() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20_000 {
            let digits = losing_digits(&mut rng);
            assert_ne!(digits, WINNING_REELS);
            assert!(digits.iter().all(|d| *d < 10));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn spin_runs_for_its_duration_and_toggles_indicator() {
        let reels = SlotReels::default();
        let mut display = Recorder::default();
        let mut rng = StdRng::seed_from_u64(1);

        let started = tokio::time::Instant::now();
        reels.spin(&mut display, &mut rng).await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(1400), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(1410), "{elapsed:?}");
        assert_eq!(display.spinning, vec![true, false]);
        // 80 ms frames inside 1400 ms: ticks at 80, 160, ..., 1360.
        assert_eq!(display.frames.len(), 17);
        assert!(display.frames.iter().flatten().all(|d| *d < 10));
    }

    #[tokio::test(start_paused = true)]
    async fn spin_shorter_than_interval_writes_no_frames() {
        let reels = SlotReels::new(SpinTiming {
            duration: Duration::from_millis(50),
            interval: Duration::from_millis(80),
        });
        let mut display = Recorder::default();
        let mut rng = StdRng::seed_from_u64(2);

        reels.spin(&mut display, &mut rng).await;

        assert!(display.frames.is_empty());
        assert_eq!(display.spinning, vec![true, false]);
    }
}
