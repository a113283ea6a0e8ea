//! Sequencing of ring and ball transitions.
//!
//! Transitions run one at a time from a queue. Each [`Step`] becomes a single
//! tween on the shared [`Animator`]; when that tween completes the next step
//! starts, so ring animations always finish in queue order and dropping the
//! rest of a sequence is one [`Orchestrator::cancel`] call.

use super::layout::{RingLayout, sweep_progress};
use super::{
    BALL_GROW_MS, BALL_SHRINK_MS, COLLAPSE_MS, COLLAPSE_RANGE_MS, EXPAND_MS, FADE_MS,
};
use crate::scene::Scene;
use orbit::{Animator, Easing, Tween, TweenHandle};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ShrinkBall,
    GrowBall,
    Expand { layer: usize },
    /// Collapse while closing the whole menu.
    Collapse { layer: usize },
    /// Collapse while retreating; also drops the ring's selection.
    CollapseRange { layer: usize },
    FadeOut { layer: usize },
    FadeIn { layer: usize },
}

impl Step {
    fn layer(&self) -> Option<usize> {
        match *self {
            Self::ShrinkBall | Self::GrowBall => None,
            Self::Expand { layer }
            | Self::Collapse { layer }
            | Self::CollapseRange { layer }
            | Self::FadeOut { layer }
            | Self::FadeIn { layer } => Some(layer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The ball finished growing back; the menu is closed.
    Closed,
    /// Nothing left to run.
    Settled,
}

#[derive(Debug, Default)]
pub struct Orchestrator {
    queue: VecDeque<Step>,
    current: Option<(Step, TweenHandle)>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    pub fn current(&self) -> Option<Step> {
        self.current.map(|(step, _)| step)
    }

    pub fn pending(&self) -> impl Iterator<Item = &Step> {
        self.queue.iter()
    }

    /// Shrink the ball away, then grow ring 0.
    pub fn open(&mut self) {
        self.queue.push_back(Step::ShrinkBall);
        self.queue.push_back(Step::Expand { layer: 0 });
    }

    /// Collapse the `expanded` innermost rings from the outside in, then
    /// grow the ball back.
    pub fn close(&mut self, expanded: usize) {
        self.queue
            .extend((0..expanded).rev().map(|layer| Step::Collapse { layer }));
        self.queue.push_back(Step::GrowBall);
    }

    pub fn expand(&mut self, layer: usize) {
        self.queue.push_back(Step::Expand { layer });
    }

    /// Collapses rings `from..=to` (either order), outermost first.
    pub fn collapse_range(&mut self, from: usize, to: usize) {
        let (low, high) = (from.min(to), from.max(to));
        self.queue
            .extend((low..=high).rev().map(|layer| Step::CollapseRange { layer }));
    }

    /// Flickers rings `from..=to` (either order): each ring fades out and
    /// back in before the next one starts.
    pub fn fade_range(&mut self, from: usize, to: usize) {
        let (low, high) = (from.min(to), from.max(to));
        for layer in low..=high {
            self.queue.push_back(Step::FadeOut { layer });
            self.queue.push_back(Step::FadeIn { layer });
        }
    }

    /// Drops the running step and everything queued behind it.
    pub fn cancel(&mut self, animator: &mut Animator<Scene>) {
        if let Some((step, handle)) = self.current.take() {
            log::debug!("Cancelling {:?} and {} queued steps", step, self.queue.len());
            animator.cancel(handle);
        }
        self.queue.clear();
    }

    /// Reacts to the tweens that completed this frame and starts whatever
    /// is next. `expanded` is the committed ring count.
    pub fn resume(
        &mut self,
        now: u64,
        finished: &[TweenHandle],
        expanded: usize,
        layout: &RingLayout,
        animator: &mut Animator<Scene>,
        scene: &mut Scene,
    ) -> Vec<Signal> {
        let mut signals = Vec::new();

        if let Some((step, handle)) = self.current
            && finished.contains(&handle)
        {
            self.current = None;
            log::debug!("Finished {:?}", step);
            match step {
                Step::Expand { layer }
                    if layer + 1 < expanded
                        && scene
                            .layers
                            .get(layer + 1)
                            .is_some_and(|l| l.draw_progress < 1.0) =>
                {
                    let next = Step::Expand { layer: layer + 1 };
                    if !self.queue.contains(&next) {
                        self.queue.push_front(next);
                    }
                }
                Step::GrowBall => signals.push(Signal::Closed),
                _ => {}
            }
            self.pump(now, layout, animator, scene);
            if self.is_idle() {
                signals.push(Signal::Settled);
            }
        } else {
            self.pump(now, layout, animator, scene);
        }

        signals
    }

    /// Starts the next queued step when nothing is running.
    pub fn pump(
        &mut self,
        now: u64,
        layout: &RingLayout,
        animator: &mut Animator<Scene>,
        scene: &mut Scene,
    ) {
        while self.current.is_none() {
            let Some(step) = self.queue.pop_front() else {
                return;
            };
            if step.layer().is_some_and(|l| l >= layout.layer_count()) {
                log::warn!("Skipping {:?}: no such ring", step);
                continue;
            }
            if let Some(handle) = Self::start(step, now, layout, animator, scene) {
                log::debug!("Starting {:?}", step);
                self.current = Some((step, handle));
            }
        }
    }

    fn start(
        step: Step,
        now: u64,
        layout: &RingLayout,
        animator: &mut Animator<Scene>,
        scene: &mut Scene,
    ) -> Option<TweenHandle> {
        match step {
            Step::ShrinkBall => Some(animator.start(
                now,
                Tween::new(scene.ball_scale, 0.0, BALL_SHRINK_MS, Easing::InOutCubic),
                |s: &mut Scene, v| s.ball_scale = v,
                |s| {
                    s.ball_scale = 0.0;
                    s.rings_visible = true;
                },
            )),
            Step::GrowBall => {
                scene.rings_visible = false;
                Some(animator.start(
                    now,
                    Tween::new(scene.ball_scale, 1.0, BALL_GROW_MS, Easing::OutCubic),
                    |s: &mut Scene, v| s.ball_scale = v,
                    |s| s.ball_scale = 1.0,
                ))
            }
            Step::Expand { layer } => {
                let start = layout.inner_edge(layer);
                let target = layout.target_radius(layer)?;
                Some(Self::animate_radius(
                    animator,
                    now,
                    layer,
                    Tween::new(start, target, EXPAND_MS, Easing::OutCubic),
                    (start, target),
                    false,
                ))
            }
            Step::Collapse { layer } | Step::CollapseRange { layer } => {
                let inner = layout.inner_edge(layer);
                let target = layout.target_radius(layer)?;
                let state = scene.layers.get_mut(layer)?;
                let reset_selection = matches!(step, Step::CollapseRange { .. });

                if state.radius <= inner {
                    state.radius = inner;
                    state.draw_progress = 0.0;
                    if reset_selection {
                        state.selected = None;
                    }
                    return None;
                }

                let duration = if reset_selection {
                    COLLAPSE_RANGE_MS
                } else {
                    COLLAPSE_MS
                };
                Some(Self::animate_radius(
                    animator,
                    now,
                    layer,
                    Tween::new(state.radius, inner, duration, Easing::InCubic),
                    (inner, target),
                    reset_selection,
                ))
            }
            Step::FadeOut { layer } => Some(Self::animate_opacity(
                animator,
                now,
                layer,
                Tween::new(1.0, 0.0, FADE_MS, Easing::OutQuad),
            )),
            Step::FadeIn { layer } => Some(Self::animate_opacity(
                animator,
                now,
                layer,
                Tween::new(0.0, 1.0, FADE_MS, Easing::InQuad),
            )),
        }
    }

    /// Drives one ring's radius; the sweep follows the radius across the
    /// ring's `(inner edge, target)` band.
    fn animate_radius(
        animator: &mut Animator<Scene>,
        now: u64,
        layer: usize,
        tween: Tween<f64>,
        band: (f64, f64),
        reset_selection: bool,
    ) -> TweenHandle {
        let (inner, target) = band;
        let end = tween.to;
        animator.start(
            now,
            tween,
            move |s: &mut Scene, radius| {
                if let Some(state) = s.layers.get_mut(layer) {
                    state.radius = radius;
                    state.draw_progress = sweep_progress(radius, inner, target);
                }
            },
            move |s| {
                if let Some(state) = s.layers.get_mut(layer) {
                    state.radius = end;
                    state.draw_progress = if end <= inner {
                        0.0
                    } else {
                        sweep_progress(end, inner, target)
                    };
                    if reset_selection {
                        state.selected = None;
                    }
                }
            },
        )
    }

    fn animate_opacity(
        animator: &mut Animator<Scene>,
        now: u64,
        layer: usize,
        tween: Tween<f64>,
    ) -> TweenHandle {
        let end = tween.to;
        animator.start(
            now,
            tween,
            move |s: &mut Scene, opacity| {
                if let Some(state) = s.layers.get_mut(layer) {
                    state.opacity = opacity;
                }
            },
            move |s| {
                if let Some(state) = s.layers.get_mut(layer) {
                    state.opacity = end;
                }
            },
        )
    }
}
