use super::dock::DockDirection;
use super::frame::{FrameState, LayerFrame};
use super::theme::{ThemeColors, to_rgba8};
use crate::command::{Command, PointerButton};
use crate::config::{BallConfig, ConfigError};
use crate::events::BallEvent;
use crate::menu::layout::pointer_angle;
use crate::menu::{
    DOCK_MS, EYE_HOVERED, EYE_MS, EYE_RESTING, Hit, JELLY_LIMIT, JELLY_RESTORE_MS, MenuTree,
    Orchestrator, RingLayout, Signal, TRAIL_FADE_MS,
};
use crate::scene::Scene;
use crate::sys::Host;
use orbit::{Animator, Easing, Point, TrailBuffer, Tween, TweenHandle};

/// Half-width of the drag ribbon.
const TRAIL_WIDTH: f64 = 15.0;
/// Scale kept by older trail samples each time a new one arrives.
const TRAIL_DECAY: f64 = 0.97;

#[derive(Debug, Clone, Copy)]
struct Drag {
    /// Pointer position relative to the window origin at press time.
    offset: Point,
    last: Point,
}

/// The floating ball and its radial menu.
///
/// The host feeds pointer events through the `on_pointer_*` methods and calls
/// [`FloatingBall::tick`] from its frame timer; every animation, the hover
/// poll and all event emission happen inside those calls.
pub struct FloatingBall<H: Host> {
    host: H,
    layout: RingLayout,
    tree: MenuTree,
    theme: ThemeColors,
    scene: Scene,
    animator: Animator<Scene>,
    orchestrator: Orchestrator,

    /// Rings committed to showing, counted from the innermost.
    expanded: usize,
    hovered: Option<Hit>,
    polling: bool,
    next_poll: u64,

    selected: bool,
    dock: DockDirection,
    drag: Option<Drag>,
    eye_tween: Option<TweenHandle>,
    jelly_tween: Option<TweenHandle>,
    trail_tween: Option<TweenHandle>,
    dock_tween: Option<TweenHandle>,

    window_size: f64,
    ball_radius: f64,
    snap_threshold: f64,
    hover_poll_ms: u64,
    jelly_strength: f64,
}

impl<H: Host> FloatingBall<H> {
    pub fn new(config: &BallConfig, host: H) -> Result<Self, ConfigError> {
        config.validate()?;
        let layout = config.layout()?;
        let trail = TrailBuffer::new(config.trail_capacity)?;
        let tree = MenuTree::build(&config.menu.branching);
        if tree.depth() != layout.layer_count() {
            log::warn!(
                "Menu depth {} does not match {} rings",
                tree.depth(),
                layout.layer_count()
            );
        }

        let mut scene = Scene::new(&layout, trail);
        let half = config.window_size / 2.0;
        scene.window_origin = host.screen_available_rect().center() - Point::new(half, half);

        Ok(Self {
            host,
            layout,
            tree,
            theme: ThemeColors::default(),
            scene,
            animator: Animator::new(),
            orchestrator: Orchestrator::new(),
            expanded: 0,
            hovered: None,
            polling: false,
            next_poll: 0,
            selected: false,
            dock: DockDirection::None,
            drag: None,
            eye_tween: None,
            jelly_tween: None,
            trail_tween: None,
            dock_tween: None,
            window_size: config.window_size,
            ball_radius: config.ball_radius(),
            snap_threshold: config.snap_threshold,
            hover_poll_ms: config.hover_poll_ms,
            jelly_strength: config.jelly_strength,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn tree(&self) -> &MenuTree {
        &self.tree
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn hovered(&self) -> Option<Hit> {
        self.hovered
    }

    pub fn dock(&self) -> DockDirection {
        self.dock
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_animating(&self) -> bool {
        !self.animator.is_idle() || !self.orchestrator.is_idle()
    }

    /// Screen position of the ball centre, which is also the ring centre.
    pub fn center(&self) -> Point {
        let half = self.window_size / 2.0;
        self.scene.window_origin + Point::new(half, half)
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Down { button, x, y } => self.on_pointer_down(button, Point::new(x, y)),
            Command::Move { primary, x, y } => self.on_pointer_move(primary, Point::new(x, y)),
            Command::Enter => self.on_pointer_enter(),
            Command::Leave => self.on_pointer_leave(),
            Command::Reset => self.reset(),
            Command::Wait { .. } | Command::Frame => {
                log::debug!("{:?} needs a driver, ignoring", command)
            }
        }
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, pos: Point) {
        match button {
            PointerButton::Primary => self.press_primary(pos),
            PointerButton::Secondary => self.press_secondary(),
        }
        self.pump();
        self.host.request_repaint();
    }

    pub fn on_pointer_move(&mut self, primary: bool, pos: Point) {
        match self.drag {
            Some(drag) if primary && self.expanded == 0 => self.drag_to(drag, pos),
            Some(_) if !primary => self.end_drag(),
            _ => {}
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.selected = true;
        self.animate_eye(EYE_HOVERED);
        self.host.request_repaint();
    }

    pub fn on_pointer_leave(&mut self) {
        self.selected = false;
        self.animate_eye(EYE_RESTING);
        if self.drag.is_some() {
            self.end_drag();
        }
        self.commit_dock();
        if self
            .jelly_tween
            .is_none_or(|handle| !self.animator.is_running(handle))
        {
            self.restore_jelly();
        }
        self.host.request_repaint();
    }

    /// Advances every animation to the host clock and polls hover when due.
    pub fn tick(&mut self) {
        let now = self.host.now_millis();
        let finished = self.animator.advance(now, &mut self.scene);
        let signals = self.orchestrator.resume(
            now,
            &finished,
            self.expanded,
            &self.layout,
            &mut self.animator,
            &mut self.scene,
        );

        for signal in signals {
            match signal {
                Signal::Closed => {
                    log::info!("Menu closed");
                    self.host.emit(BallEvent::MenuClosed);
                }
                Signal::Settled => log::debug!("Ring animations settled"),
            }
        }

        let mut dirty = !finished.is_empty() || !self.animator.is_idle();
        if self.polling && now >= self.next_poll {
            self.next_poll = now + self.hover_poll_ms;
            dirty |= self.poll_hover();
        }
        if dirty {
            self.host.request_repaint();
        }
    }

    /// Drops every animation, including the rest of any ring sequence, and
    /// snaps to the closed resting state.
    pub fn reset(&mut self) {
        let was_open = self.expanded > 0 || !self.orchestrator.is_idle();

        self.orchestrator.cancel(&mut self.animator);
        self.animator.cancel_all();
        self.eye_tween = None;
        self.jelly_tween = None;
        self.trail_tween = None;
        self.dock_tween = None;

        self.scene.collapse_all(&self.layout);
        self.scene.jelly = Point::ZERO;
        self.scene.trail.clear();
        self.scene.trail_visibility = 0.0;
        self.expanded = 0;
        self.drag = None;
        self.stop_polling();

        log::info!("Reset");
        if was_open {
            self.host.emit(BallEvent::MenuClosed);
        }
        self.host.request_repaint();
    }

    pub fn frame(&self) -> FrameState<'_> {
        let layers = if self.scene.rings_visible {
            let projection = self.tree.project(&self.scene.selections());
            self.scene
                .layers
                .iter()
                .enumerate()
                .filter_map(|(i, state)| {
                    let labels = projection.get(i).map(Vec::as_slice).unwrap_or(&[]);
                    LayerFrame::build(&self.layout, i, state, labels, self.hovered, &self.theme)
                })
                .collect()
        } else {
            Vec::new()
        };

        FrameState {
            ball_scale: self.scene.ball_scale,
            eye_openness: self.scene.eye_openness,
            selected: self.selected,
            dock: self.dock,
            window_origin: self.scene.window_origin,
            center: self.center(),
            jelly: self.scene.jelly,
            ball_colors: [to_rgba8(self.theme.ball_inner), to_rgba8(self.theme.ball_outer)],
            layers,
            trail: self
                .scene
                .trail
                .quads(TRAIL_WIDTH, self.scene.trail_visibility),
            trail_visibility: self.scene.trail_visibility,
        }
    }

    fn press_primary(&mut self, pos: Point) {
        if self.expanded == 0 {
            self.begin_drag(pos);
            return;
        }

        let Some(hit) = self.hovered.filter(|h| h.layer < self.expanded) else {
            log::debug!("Press outside the open rings");
            return;
        };

        let count = self.layout.layer_count();
        if self.expanded == count && hit.layer + 1 == count {
            self.commit(hit);
            return;
        }

        if let Some(segment) = hit.segment {
            self.select(hit.layer, segment);
        }
        if hit.layer + 1 < count {
            self.step_to(hit.layer);
        }
    }

    fn press_secondary(&mut self) {
        if !self.orchestrator.is_idle() {
            log::debug!("Ignoring menu toggle mid-transition");
            return;
        }
        if self.expanded == 0 {
            self.open_menu();
        } else {
            self.close_menu();
        }
    }

    fn open_menu(&mut self) {
        log::info!("Opening menu");
        self.drag = None;
        self.expanded = 1;
        self.orchestrator.open();
        self.polling = true;
        self.next_poll = self.host.now_millis();
        self.host.emit(BallEvent::MenuOpened);
    }

    fn close_menu(&mut self) {
        log::info!("Closing menu");
        self.orchestrator.close(self.expanded);
        self.expanded = 0;
        self.scene.clear_selections_from(0);
        self.stop_polling();
    }

    fn stop_polling(&mut self) {
        self.polling = false;
        self.hovered = None;
    }

    fn select(&mut self, layer: usize, segment: usize) {
        if let Some(state) = self.scene.layers.get_mut(layer) {
            state.selected = Some(segment);
            log::debug!("Ring {} selected segment {}", layer, segment);
        }
    }

    /// Reacts to a press on ring `layer`: grow the next ring, or retreat to
    /// just outside `layer`.
    fn step_to(&mut self, layer: usize) {
        let next = layer + 1;
        if next == self.expanded {
            if self.scene.layers.get(layer).is_some_and(|l| l.selected.is_some()) {
                self.expanded += 1;
                self.orchestrator.expand(next);
            }
        } else if next + 1 == self.expanded {
            self.scene.clear_selections_from(next);
            self.orchestrator.fade_range(next, self.expanded - 1);
        } else {
            self.orchestrator.collapse_range(next, self.expanded - 1);
            self.scene.clear_selections_from(next);
            self.expanded = next;
        }
    }

    /// Reports every selected segment, then retracts the outermost ring.
    fn commit(&mut self, hit: Hit) {
        if let Some(segment) = hit.segment {
            self.select(hit.layer, segment);
        }

        let chosen: Vec<(usize, usize)> = self
            .scene
            .selections()
            .into_iter()
            .enumerate()
            .filter_map(|(layer, selected)| selected.map(|segment| (layer, segment)))
            .collect();
        for (layer, segment) in chosen {
            log::info!("Chose segment {} on ring {}", segment, layer);
            self.host.emit(BallEvent::SegmentChosen { layer, segment });
        }

        self.orchestrator.collapse_range(hit.layer, self.expanded - 1);
        self.scene.clear_selections_from(hit.layer);
        self.expanded = hit.layer;
        if self.expanded == 0 {
            self.close_menu();
        }
    }

    fn poll_hover(&mut self) -> bool {
        let delta = self.host.pointer_screen_pos() - self.center();
        let hover = self
            .layout
            .hit_test(&self.scene.radii(), delta.length(), pointer_angle(delta))
            .filter(|h| self.scene.rings_visible && h.layer < self.expanded);

        let changed = hover != self.hovered;
        if changed {
            log::debug!("Hover {:?} -> {:?}", self.hovered, hover);
            self.hovered = hover;
        }
        changed
    }

    fn pump(&mut self) {
        let now = self.host.now_millis();
        self.orchestrator
            .pump(now, &self.layout, &mut self.animator, &mut self.scene);
    }

    fn begin_drag(&mut self, pos: Point) {
        for handle in [self.trail_tween.take(), self.dock_tween.take()]
            .into_iter()
            .flatten()
        {
            self.animator.cancel(handle);
        }
        self.drag = Some(Drag {
            offset: pos - self.scene.window_origin,
            last: pos,
        });
        self.scene.trail.clear();
        self.scene.trail_visibility = 1.0;
    }

    fn drag_to(&mut self, drag: Drag, pos: Point) {
        let delta = pos - drag.last;
        self.scene.window_origin = pos - drag.offset;
        self.drag = Some(Drag { last: pos, ..drag });

        let center = self.center();
        self.scene.trail.decay(TRAIL_DECAY);
        self.scene.trail.add_point(center, 1.0);
        self.dock = DockDirection::detect(
            center,
            &self.host.screen_available_rect(),
            self.ball_radius,
            self.snap_threshold,
        );

        self.scene.jelly =
            (self.scene.jelly + delta * self.jelly_strength).clamp(-JELLY_LIMIT, JELLY_LIMIT);
        self.restore_jelly();
        self.host.request_repaint();
    }

    fn end_drag(&mut self) {
        self.drag = None;
        if let Some(handle) = self.trail_tween.take() {
            self.animator.cancel(handle);
        }
        let now = self.host.now_millis();
        self.trail_tween = Some(self.animator.start(
            now,
            Tween::new(self.scene.trail_visibility, 0.0, TRAIL_FADE_MS, Easing::OutQuad),
            |s: &mut Scene, v| s.trail_visibility = v,
            |s| {
                s.trail_visibility = 0.0;
                s.trail.clear();
            },
        ));
    }

    /// Springs the jelly offset back to rest, replacing any restore in flight.
    fn restore_jelly(&mut self) {
        if let Some(handle) = self.jelly_tween.take() {
            self.animator.cancel(handle);
        }
        if self.scene.jelly == Point::ZERO {
            return;
        }
        let now = self.host.now_millis();
        self.jelly_tween = Some(self.animator.start(
            now,
            Tween::new(self.scene.jelly, Point::ZERO, JELLY_RESTORE_MS, Easing::OutElastic),
            |s: &mut Scene, v: Point| s.jelly = v.clamp(-JELLY_LIMIT, JELLY_LIMIT),
            |s| s.jelly = Point::ZERO,
        ));
    }

    fn animate_eye(&mut self, target: f64) {
        if let Some(handle) = self.eye_tween.take() {
            self.animator.cancel(handle);
        }
        let now = self.host.now_millis();
        self.eye_tween = Some(self.animator.start(
            now,
            Tween::new(self.scene.eye_openness, target, EYE_MS, Easing::Linear),
            |s: &mut Scene, v| s.eye_openness = v,
            move |s| s.eye_openness = target,
        ));
    }

    fn commit_dock(&mut self) {
        if self.dock == DockDirection::None {
            return;
        }
        let screen = self.host.screen_available_rect();
        let center = self.center();
        let target = self.scene.window_origin
            + (self.dock.snap_center(center, &screen, self.ball_radius) - center);

        if let Some(handle) = self.dock_tween.take() {
            self.animator.cancel(handle);
        }
        log::info!("Docking {}", self.dock);
        let now = self.host.now_millis();
        self.dock_tween = Some(self.animator.start(
            now,
            Tween::new(self.scene.window_origin, target, DOCK_MS, Easing::OutCubic),
            |s: &mut Scene, v| s.window_origin = v,
            move |s| s.window_origin = target,
        ));
    }
}
