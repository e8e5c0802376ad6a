//! Fixed-rate execution scheduling.
//!
//! Two independent cadences drive the machine: the instruction rate
//! (configurable, default 700/s) and the 60 Hz timer tick. Both are paced
//! against wall-clock deadlines and are deliberately not coupled to each
//! other or to the host's display refresh.
//!
//! Policy when the host falls behind: each `poll` releases at most one
//! instruction, advancing the deadline by one interval. A backlog therefore
//! drains at the caller's poll rate instead of bursting, which shows up as
//! the emulation slowing down under load rather than jumping. That is a
//! simplicity tradeoff, chosen over catch-up execution.

use std::time::{Duration, Instant};

/// Rate at which the delay and sound timers are decremented.
pub const TIMER_HZ: u32 = 60;

/// What the caller should do after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// Execute one instruction cycle.
    pub run_instruction: bool,
    /// Apply one 60 Hz timer decrement.
    pub tick_timers: bool,
}

/// Deadline tracker for the instruction and timer cadences.
pub struct Scheduler {
    cycle_interval: Duration,
    timer_interval: Duration,
    next_cycle: Instant,
    next_timer: Instant,
}

impl Scheduler {
    pub fn new(instructions_per_second: u32) -> Self {
        Self::starting_at(Instant::now(), instructions_per_second)
    }

    /// Construct with an explicit epoch; both cadences fire on the first
    /// poll at or after `start`.
    pub fn starting_at(start: Instant, instructions_per_second: u32) -> Self {
        Self {
            cycle_interval: Duration::from_secs(1) / instructions_per_second.max(1),
            timer_interval: Duration::from_secs(1) / TIMER_HZ,
            next_cycle: start,
            next_timer: start,
        }
    }

    /// Non-blocking check of both deadlines.
    pub fn poll(&mut self, now: Instant) -> Tick {
        let mut tick = Tick::default();
        if now >= self.next_cycle {
            tick.run_instruction = true;
            self.next_cycle += self.cycle_interval;
        }
        if now >= self.next_timer {
            tick.tick_timers = true;
            self.next_timer += self.timer_interval;
        }
        tick
    }

    /// How long until either deadline fires, for frontends that want to
    /// sleep instead of spinning.
    pub fn time_to_next(&self, now: Instant) -> Duration {
        let next = self.next_cycle.min(self.next_timer);
        next.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_poll_fires_both() {
        let start = Instant::now();
        let mut sched = Scheduler::starting_at(start, 700);
        let tick = sched.poll(start);
        assert!(tick.run_instruction);
        assert!(tick.tick_timers);

        // Deadlines moved into the future; nothing fires at the same instant.
        let tick = sched.poll(start);
        assert!(!tick.run_instruction);
        assert!(!tick.tick_timers);
    }

    #[test]
    fn test_rates_over_simulated_time() {
        let start = Instant::now();
        let mut sched = Scheduler::starting_at(start, 700);

        let mut instructions = 0;
        let mut timer_ticks = 0;
        let mut now = start;
        // 500 ms of simulated time in 0.5 ms polls.
        for _ in 0..1000 {
            let tick = sched.poll(now);
            instructions += tick.run_instruction as u32;
            timer_ticks += tick.tick_timers as u32;
            now += Duration::from_micros(500);
        }

        assert!(
            (349..=351).contains(&instructions),
            "expected ~350 instructions, got {}",
            instructions
        );
        assert!(
            (30..=31).contains(&timer_ticks),
            "expected ~30 timer ticks, got {}",
            timer_ticks
        );
    }

    #[test]
    fn test_backlog_drains_one_instruction_per_poll() {
        let start = Instant::now();
        let mut sched = Scheduler::starting_at(start, 700);
        sched.poll(start);

        // The host stalls for 100 ms (~70 missed intervals). Each poll still
        // releases a single instruction.
        let late = start + Duration::from_millis(100);
        for _ in 0..3 {
            assert!(sched.poll(late).run_instruction);
        }
    }

    #[test]
    fn test_timer_rate_independent_of_cycle_rate() {
        let start = Instant::now();
        let mut slow = Scheduler::starting_at(start, 30);

        let mut timer_ticks = 0;
        let mut now = start;
        for _ in 0..1000 {
            timer_ticks += slow.poll(now).tick_timers as u32;
            now += Duration::from_micros(500);
        }
        // 60 Hz holds even when instructions run slower than the timers.
        assert!((30..=31).contains(&timer_ticks));
    }

    #[test]
    fn test_time_to_next() {
        let start = Instant::now();
        let mut sched = Scheduler::starting_at(start, 700);
        assert_eq!(sched.time_to_next(start), Duration::ZERO);
        sched.poll(start);
        let wait = sched.time_to_next(start);
        assert!(wait > Duration::ZERO);
        assert!(wait <= Duration::from_secs(1) / 700);
    }
}
