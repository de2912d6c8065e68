//! Interaction layer between raw input and the viewport engine.
//!
//! `ViewController` is toolkit-agnostic: the GUI feeds it pointer, wheel,
//! gesture and key events in display coordinates, executes the
//! [`ViewCommand`]s it queues, and asks it for a [`RenderPlan`] each frame.

use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::consts::{
    CURSOR_IDLE_MS, KEY_PAN_DIVISOR, PINCH_QUIET_MS, WARP_ECHO_MAX_EVENTS, WARP_ECHO_TOLERANCE,
    WHEEL_PAN_DIVISOR, WHEEL_ZOOM_DIVISOR, WHEEL_ZOOM_STEP, WRAP_INSET, WRAP_MARGIN,
};
use crate::cursor::{CursorShape, IdleTimer, PointerCursor};
use crate::geometry::{Point, Rect, Size};
use crate::image_io::LoadedImage;
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Keys the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKey {
    F11,
    Escape,
    F,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Update,
    Finished,
}

/// Side effects the toolkit has to carry out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewCommand {
    /// Move the OS pointer to this display position.
    WarpPointer(Point),
    SetFullscreen(bool),
    Repaint,
}

/// What to draw this frame: `source` (image pixels) into `target` (display).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPlan {
    pub source: Rect,
    pub target: Rect,
    pub smooth: bool,
}

/// Device-convention constants. The wheel divisors are the angle deltas
/// mice report per notch.
#[derive(Clone, Debug)]
pub struct InputTuning {
    pub wheel_zoom_divisor: f64,
    pub wheel_pan_divisor: f64,
    pub wheel_zoom_step: f64,
    pub key_pan_divisor: f64,
    pub wrap_margin: f64,
    pub wrap_inset: f64,
    pub idle_timeout: Duration,
    /// A pinch without updates for this long has ended.
    pub pinch_quiet: Duration,
}

impl Default for InputTuning {
    fn default() -> Self {
        Self {
            wheel_zoom_divisor: WHEEL_ZOOM_DIVISOR,
            wheel_pan_divisor: WHEEL_PAN_DIVISOR,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            key_pan_divisor: KEY_PAN_DIVISOR,
            wrap_margin: WRAP_MARGIN,
            wrap_inset: WRAP_INSET,
            idle_timeout: Duration::from_millis(CURSOR_IDLE_MS),
            pinch_quiet: Duration::from_millis(PINCH_QUIET_MS),
        }
    }
}

#[derive(Debug)]
struct PanSession {
    last: Point,
    /// Set after a warp. Moves still queued from before it are dropped until
    /// one lands on the target.
    warp: Option<PendingWarp>,
    cursor_overridden: bool,
}

#[derive(Debug)]
struct PendingWarp {
    target: Point,
    ignored: u32,
}

#[derive(Debug)]
struct PinchGesture {
    center: Point,
    last_update: Instant,
}

pub struct ViewController {
    viewport: Viewport,
    image: Weak<LoadedImage>,
    tuning: InputTuning,
    cursor: PointerCursor,
    idle: IdleTimer,
    pan: Option<PanSession>,
    pinch: Option<PinchGesture>,
    fullscreen: bool,
    commands: Vec<ViewCommand>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::with_tuning(InputTuning::default())
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: InputTuning) -> Self {
        Self {
            viewport: Viewport::new(),
            image: Weak::new(),
            idle: IdleTimer::new(tuning.idle_timeout),
            tuning,
            cursor: PointerCursor::default(),
            pan: None,
            pinch: None,
            fullscreen: false,
            commands: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Observe `image` without keeping it alive.
    pub fn attach(&mut self, image: &Rc<LoadedImage>) {
        self.image = Rc::downgrade(image);
        self.viewport.attach(image.size());
        self.commands.push(ViewCommand::Repaint);
    }

    pub fn detach(&mut self) {
        self.image = Weak::new();
        self.viewport.detach();
        self.end_pan();
        self.pinch = None;
    }

    fn end_pan(&mut self) {
        if let Some(session) = self.pan.take() {
            if session.cursor_overridden {
                self.cursor.pop_override();
            }
        }
    }

    /// The attached image, if its owner still holds it.
    pub fn image(&self) -> Option<Rc<LoadedImage>> {
        self.image.upgrade()
    }

    /// Liveness guard run by every entry point.
    fn live(&mut self) -> bool {
        if self.image.strong_count() > 0 {
            return true;
        }
        if self.viewport.image_size().is_some() {
            debug!("attached image is gone, detaching viewport");
            self.detach();
        }
        false
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Adopt the window's actual fullscreen state.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn cursor_shape(&self) -> CursorShape {
        self.cursor.shape()
    }

    /// Display geometry is tracked even before an image arrives.
    pub fn resized(&mut self, display_size: Size, pixels_per_point: f64) {
        if display_size == self.viewport.display_size()
            && pixels_per_point == self.viewport.pixels_per_point()
        {
            return;
        }
        self.viewport.resize(display_size, pixels_per_point);
        if self.live() {
            self.viewport.clamp();
            self.commands.push(ViewCommand::Repaint);
        }
    }

    pub fn pointer_pressed(&mut self, button: PointerButton, pos: Point) {
        if !self.live() {
            return;
        }
        if button == PointerButton::Primary {
            self.pan = Some(PanSession {
                last: pos,
                warp: None,
                cursor_overridden: false,
            });
        }
    }

    pub fn pointer_released(&mut self, button: PointerButton, now: Instant) {
        if !self.live() {
            return;
        }
        if button == PointerButton::Primary {
            self.end_pan();
        }
        self.idle.restart(now);
    }

    pub fn pointer_moved(&mut self, pos: Point, now: Instant) {
        if !self.live() {
            return;
        }
        if let Some(session) = self.pan.as_mut() {
            if let Some(warp) = session.warp.as_mut() {
                let echo = (pos.x - warp.target.x).abs() <= WARP_ECHO_TOLERANCE
                    && (pos.y - warp.target.y).abs() <= WARP_ECHO_TOLERANCE;
                warp.ignored += 1;
                if !echo && warp.ignored <= WARP_ECHO_MAX_EVENTS {
                    return;
                }
                if !echo {
                    debug!("pointer warp was not echoed, re-anchoring");
                }
                session.warp = None;
                session.last = pos;
                return;
            }
        }
        if self.cursor.is_hidden() {
            self.cursor.show();
        }

        let Some(session) = self.pan.as_mut() else {
            self.idle.restart(now);
            return;
        };
        if !session.cursor_overridden {
            self.cursor.push_override(CursorShape::Move);
            self.idle.stop();
            session.cursor_overridden = true;
        }

        let display = self.viewport.display_size();
        if let Some(target) = wrap_position(
            pos,
            display,
            self.tuning.wrap_margin,
            self.tuning.wrap_inset,
        ) {
            session.last = target;
            session.warp = Some(PendingWarp { target, ignored: 0 });
            self.commands.push(ViewCommand::WarpPointer(target));
            return;
        }

        let delta = pos - session.last;
        session.last = pos;
        // Content follows the pointer.
        self.viewport.pan(delta * -1.0);
        self.viewport.clamp();
        self.commands.push(ViewCommand::Repaint);
    }

    /// `delta` is in wheel angle units (120 per notch, positive = away from
    /// the user). With `precision` held the wheel zooms about `pos`,
    /// otherwise it moves the view by the delta, scaled to the zoom level.
    pub fn wheel(&mut self, delta: Point, pos: Point, precision: bool) {
        if !self.live() || !delta.is_finite() {
            return;
        }
        if precision {
            if delta.y == 0.0 {
                return;
            }
            let notches = (delta.y / self.tuning.wheel_zoom_divisor).abs();
            let factor = (1.0 + self.tuning.wheel_zoom_step * notches).powf(delta.y.signum());
            self.viewport.zoom(factor, pos);
        } else {
            let step = self.viewport.half_width() / 100.0 / self.tuning.wheel_pan_divisor;
            self.viewport.translate(delta * step);
        }
        self.viewport.clamp();
        self.commands.push(ViewCommand::Repaint);
    }

    /// Pinch zoom. The center is pinned to the first one reported in a
    /// gesture. The gesture ends on `Finished` or once updates have been
    /// quiet for `InputTuning::pinch_quiet` (see [`Self::tick`]).
    pub fn pinch(&mut self, phase: GesturePhase, scale_factor: f64, center: Point, now: Instant) {
        if !self.live() {
            return;
        }
        match phase {
            GesturePhase::Finished => self.pinch = None,
            GesturePhase::Update => {
                let gesture = self.pinch.get_or_insert(PinchGesture {
                    center,
                    last_update: now,
                });
                gesture.last_update = now;
                let center = gesture.center;
                self.viewport.zoom(scale_factor, center);
                self.viewport.clamp();
                self.commands.push(ViewCommand::Repaint);
            }
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    fn pinch_deadline(&self) -> Option<Instant> {
        self.pinch
            .as_ref()
            .map(|gesture| gesture.last_update + self.tuning.pinch_quiet)
    }

    pub fn double_clicked(&mut self) {
        if !self.live() {
            return;
        }
        self.toggle_fullscreen();
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        debug!(fullscreen = self.fullscreen, "toggling fullscreen");
        self.commands
            .push(ViewCommand::SetFullscreen(self.fullscreen));
    }

    pub fn key_pressed(&mut self, key: ViewKey) {
        if !self.live() {
            return;
        }
        let step = self.viewport.half_width() / self.tuning.key_pan_divisor;
        match key {
            ViewKey::F11 => self.toggle_fullscreen(),
            ViewKey::Escape => {
                if self.fullscreen {
                    self.fullscreen = false;
                    self.commands.push(ViewCommand::SetFullscreen(false));
                }
            }
            ViewKey::F => self.viewport.toggle_one_to_one(),
            ViewKey::ArrowLeft => self.viewport.translate(Point::new(-step, 0.0)),
            ViewKey::ArrowRight => self.viewport.translate(Point::new(step, 0.0)),
            ViewKey::ArrowUp => self.viewport.translate(Point::new(0.0, -step)),
            ViewKey::ArrowDown => self.viewport.translate(Point::new(0.0, step)),
        }
        self.viewport.clamp();
        self.commands.push(ViewCommand::Repaint);
    }

    /// Advance timers. Hides the pointer once it has been idle long enough
    /// and ends a pinch that has gone quiet.
    pub fn tick(&mut self, now: Instant) {
        if self.idle.expire(now) {
            self.cursor.hide();
        }
        if self.pinch_deadline().is_some_and(|deadline| now >= deadline) {
            debug!("pinch gesture ended");
            self.pinch = None;
        }
    }

    /// When the toolkit should call `tick` next.
    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.idle.deadline(), self.pinch_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Clamp the viewport and describe what to draw.
    pub fn prepare_frame(&mut self) -> Option<RenderPlan> {
        if !self.live() {
            return None;
        }
        self.viewport.clamp();
        Some(RenderPlan {
            source: self.viewport.visible_source_rect()?,
            target: self.viewport.visible_target_rect()?,
            smooth: self.viewport.smooth_rendering(),
        })
    }

    pub fn take_commands(&mut self) -> Vec<ViewCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drop transient state and hand the pointer back in its default shape.
    pub fn shutdown(&mut self) {
        self.pan = None;
        self.pinch = None;
        self.idle.stop();
        self.cursor.release();
    }
}

/// Opposite-edge position for a pointer that reached the wrap margin, or
/// `None` when it is clear of every edge. The overshoot past the edge is
/// carried over and the other axis is preserved.
pub fn wrap_position(pos: Point, display: Size, margin: f64, inset: f64) -> Option<Point> {
    if display.width <= 2.0 * inset || display.height <= 2.0 * inset {
        return None;
    }
    let (width, height) = (display.width, display.height);
    let mut target = pos;
    if pos.x <= margin {
        target.x = width - inset + pos.x;
    } else if pos.x >= width - margin {
        target.x = pos.x - width + inset;
    } else if pos.y <= margin {
        target.y = height - inset + pos.y;
    } else if pos.y >= height - margin {
        target.y = pos.y - height + inset;
    } else {
        return None;
    }
    Some(target)
}
