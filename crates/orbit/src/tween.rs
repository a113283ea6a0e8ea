//! Time-sampled interpolation.
//!
//! An [`Animator`] owns every in-flight tween for one piece of state `S`.
//! Nothing runs on its own: the owner calls [`Animator::advance`] from its
//! frame timer with the current clock, every tween writes its interpolated
//! value through its tick callback, and tweens that reached their duration
//! fire their completion callback exactly once and are dropped. Cancelled
//! tweens never complete.

use crate::easing::Easing;
use crate::math::Lerp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<V> {
    pub from: V,
    pub to: V,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl<V: Lerp> Tween<V> {
    pub fn new(from: V, to: V, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
        }
    }

    /// Linear time progress, saturating at 1.
    pub fn progress(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms as f64 / self.duration_ms as f64).min(1.0)
    }

    pub fn sample(&self, elapsed_ms: u64) -> V {
        V::lerp(self.from, self.to, self.easing.apply(self.progress(elapsed_ms)))
    }
}

struct Running<S> {
    handle: TweenHandle,
    started_at: u64,
    duration_ms: u64,
    tick: Box<dyn FnMut(&mut S, u64)>,
    done: Box<dyn FnOnce(&mut S)>,
}

pub struct Animator<S> {
    next_id: u64,
    running: Vec<Running<S>>,
}

impl<S> Default for Animator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Animator<S> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            running: Vec::new(),
        }
    }

    /// Schedules `tween` starting at `now`. `on_tick` receives every sampled
    /// value, `on_done` runs once after the final sample.
    pub fn start<V>(
        &mut self,
        now: u64,
        tween: Tween<V>,
        mut on_tick: impl FnMut(&mut S, V) + 'static,
        on_done: impl FnOnce(&mut S) + 'static,
    ) -> TweenHandle
    where
        V: Lerp + 'static,
    {
        let handle = TweenHandle(self.next_id);
        self.next_id += 1;

        self.running.push(Running {
            handle,
            started_at: now,
            duration_ms: tween.duration_ms,
            tick: Box::new(move |state, elapsed| on_tick(state, tween.sample(elapsed))),
            done: Box::new(on_done),
        });
        handle
    }

    /// Stops a tween without running its completion callback. Returns false
    /// when the handle already finished or was never issued.
    pub fn cancel(&mut self, handle: TweenHandle) -> bool {
        let before = self.running.len();
        self.running.retain(|r| r.handle != handle);
        before != self.running.len()
    }

    pub fn cancel_all(&mut self) {
        self.running.clear();
    }

    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.running.iter().any(|r| r.handle == handle)
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    /// Samples every running tween at `now`. Returns the handles that
    /// completed during this call, in start order.
    pub fn advance(&mut self, now: u64, state: &mut S) -> Vec<TweenHandle> {
        let mut finished = Vec::new();
        let mut pending = Vec::with_capacity(self.running.len());

        for mut tween in self.running.drain(..) {
            let elapsed = now.saturating_sub(tween.started_at);
            (tween.tick)(state, elapsed);

            if elapsed >= tween.duration_ms {
                (tween.done)(state);
                finished.push(tween.handle);
            } else {
                pending.push(tween);
            }
        }

        self.running = pending;
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[derive(Default)]
    struct Probe {
        value: f64,
        ticks: usize,
        done: usize,
    }

    #[test]
    fn test_samples_until_done() {
        let mut animator: Animator<Probe> = Animator::new();
        let mut probe = Probe::default();
        let handle = animator.start(
            0,
            Tween::new(0.0, 100.0, 200, Easing::Linear),
            |p: &mut Probe, v| {
                p.value = v;
                p.ticks += 1;
            },
            |p| p.done += 1,
        );

        assert!(animator.advance(100, &mut probe).is_empty());
        assert_eq!(probe.value, 50.0);
        assert!(animator.is_running(handle));

        assert_eq!(animator.advance(250, &mut probe), vec![handle]);
        assert_eq!(probe.value, 100.0);
        assert_eq!(probe.done, 1);
        assert!(animator.is_idle());

        animator.advance(400, &mut probe);
        assert_eq!(probe.ticks, 2);
        assert_eq!(probe.done, 1);
    }

    #[test]
    fn test_cancel_skips_completion() {
        let mut animator: Animator<Probe> = Animator::new();
        let mut probe = Probe::default();
        let handle = animator.start(
            0,
            Tween::new(0.0, 1.0, 100, Easing::OutQuad),
            |p: &mut Probe, v| p.value = v,
            |p| p.done += 1,
        );

        animator.advance(50, &mut probe);
        assert!(animator.cancel(handle));
        assert!(!animator.cancel(handle));
        animator.advance(500, &mut probe);

        assert_eq!(probe.done, 0);
        assert!(probe.value < 1.0);
    }

    #[test]
    fn test_point_tween() {
        let tween = Tween::new(Point::new(10.0, -10.0), Point::ZERO, 100, Easing::Linear);
        assert_eq!(tween.sample(50), Point::new(5.0, -5.0));
        assert_eq!(tween.sample(1000), Point::ZERO);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let mut animator: Animator<Probe> = Animator::new();
        let mut probe = Probe::default();
        animator.start(
            7,
            Tween::new(0.0, 3.0, 0, Easing::InCubic),
            |p: &mut Probe, v| p.value = v,
            |p| p.done += 1,
        );
        animator.advance(7, &mut probe);
        assert_eq!(probe.value, 3.0);
        assert_eq!(probe.done, 1);
    }
}
