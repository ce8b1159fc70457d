use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::animation::{AnimationGroup, Easing, GroupStatus, SweepAnimation};
use crate::canvas::{Canvas, Color};
use crate::config::{AttributeNames, AttributeSource, GraphConfig};
use crate::error::Result;
use crate::LOG_TARGET;

// ============================================================================
// GEOMETRY
// ============================================================================

/// One of the three nested circles, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Circle {
    First,
    Second,
    Third,
}

impl Circle {
    pub const ALL: [Circle; 3] = [Circle::First, Circle::Second, Circle::Third];

    pub const fn index(self) -> usize {
        match self {
            Circle::First => 0,
            Circle::Second => 1,
            Circle::Third => 2,
        }
    }

    /// 1-based number as used in attribute names.
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Circle::First),
            2 => Some(Circle::Second),
            3 => Some(Circle::Third),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleKind {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Shrinks every side by `amount`.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }
}

/// Color, angles, and bounds of one circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub color: Color,
    pub start_angle: f64,
    /// Sweep length in degrees, measured from `start_angle`.
    pub end_angle: f64,
    pub bounds: Rect,
}

impl ArcSpec {
    pub const DEFAULT_COLOR: Color = Color::BLUE;
    pub const DEFAULT_START_ANGLE: f64 = 0.0;
    pub const DEFAULT_END_ANGLE: f64 = 90.0;

    pub fn angle(&self, kind: AngleKind) -> f64 {
        match kind {
            AngleKind::Start => self.start_angle,
            AngleKind::End => self.end_angle,
        }
    }

    fn angle_mut(&mut self, kind: AngleKind) -> &mut f64 {
        match kind {
            AngleKind::Start => &mut self.start_angle,
            AngleKind::End => &mut self.end_angle,
        }
    }

    fn read(source: &(impl AttributeSource + ?Sized), names: &AttributeNames) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            color: source.color(names.color)?.unwrap_or(defaults.color),
            start_angle: source
                .float(names.initial_angle)?
                .unwrap_or(defaults.start_angle),
            end_angle: source.float(names.end_angle)?.unwrap_or(defaults.end_angle),
            bounds: Rect::default(),
        })
    }
}

impl Default for ArcSpec {
    fn default() -> Self {
        Self {
            color: Self::DEFAULT_COLOR,
            start_angle: Self::DEFAULT_START_ANGLE,
            end_angle: Self::DEFAULT_END_ANGLE,
            bounds: Rect::default(),
        }
    }
}

/// Stroke widths as fractions of the content size.
///
/// Circle 1 strokes at `ratio * size`; inner circles subtract their decrement
/// from the ratio first so each ring is a little thinner than the one outside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeWidthPolicy {
    pub ratio: f64,
    pub decrements: [f64; 3],
}

impl StrokeWidthPolicy {
    pub fn padding(&self, size: f64) -> f64 {
        self.ratio * size
    }

    pub fn stroke_width(&self, circle: Circle, size: f64) -> f64 {
        (self.ratio - self.decrements[circle.index()]) * size
    }
}

impl Default for StrokeWidthPolicy {
    fn default() -> Self {
        Self {
            ratio: 0.065,
            decrements: [0.0, 0.01, 0.02],
        }
    }
}

// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Arc {
        bounds: Rect,
        start_deg: f64,
        sweep_deg: f64,
        stroke_width: f64,
        color: Color,
    },
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn render(&self, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => canvas.clear(*color),
                DrawCommand::Arc {
                    bounds,
                    start_deg,
                    sweep_deg,
                    stroke_width,
                    color,
                } => canvas.stroke_arc(bounds, *start_deg, *sweep_deg, *stroke_width, *color),
            }
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Updates sent to a running graph from other threads.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCommand {
    SetAngle(Circle, AngleKind, f64),
    /// Sweep `circle` from 0 to `target` over `duration`, replacing any running animation.
    AnimateTo {
        circle: Circle,
        target: f64,
        duration: Duration,
    },
    /// Restart the startup animation toward the configured end angles.
    Replay,
    /// Cancel the running animation, leaving angles where they are.
    Stop,
}

// ============================================================================
// WIDGET
// ============================================================================

/// Three nested stroked arcs with a startup sweep animation.
#[derive(Debug)]
pub struct GraphWidget {
    arcs: [ArcSpec; 3],
    targets: [f64; 3],
    stroke: StrokeWidthPolicy,
    track_color: Color,
    durations: [Duration; 3],
    easing: Easing,
    area: Option<(u32, u32)>,
    size: f64,
    animation: Option<AnimationGroup>,
    redraw_pending: bool,
}

impl GraphWidget {
    pub fn new(source: &(impl AttributeSource + ?Sized)) -> Self {
        Self::with_config(source, &GraphConfig::default())
    }

    /// Reads the nine circle attributes and starts the sweep animation.
    ///
    /// A failure reading any attribute falls back to defaults for all three
    /// circles; construction itself never fails.
    pub fn with_config(source: &(impl AttributeSource + ?Sized), config: &GraphConfig) -> Self {
        let arcs = read_arcs(source).unwrap_or_else(|err| {
            warn!(target: LOG_TARGET, "failed to read circle attributes, using defaults: {err}");
            [ArcSpec::default(); 3]
        });
        let targets = arcs.map(|arc| arc.end_angle);

        let mut widget = Self {
            arcs,
            targets,
            stroke: StrokeWidthPolicy {
                ratio: config.stroke_width_ratio,
                decrements: config.stroke_decrements,
            },
            track_color: config.track_color,
            durations: config.durations,
            easing: config.easing,
            area: None,
            size: 0.0,
            animation: None,
            redraw_pending: true,
        };
        widget.replay();
        widget
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// The widget fills whatever it is offered.
    pub fn measure(&self, proposed_width: u32, proposed_height: u32) -> (u32, u32) {
        (proposed_width, proposed_height)
    }

    /// Recomputes circle bounds for a new content area.
    ///
    /// Returns `false` without touching anything when the size is unchanged.
    pub fn on_area_changed(&mut self, width: u32, height: u32) -> bool {
        if self.area == Some((width, height)) {
            return false;
        }
        self.area = Some((width, height));

        let (w, h) = (width as f64, height as f64);
        let size = w.min(h);
        let padding = self.stroke.padding(size);
        let (x_offset, y_offset) = ((w - size) / 2.0, (h - size) / 2.0);

        let outer = Rect::new(x_offset, y_offset, x_offset + size, y_offset + size)
            .inset(padding / 2.0);
        self.arcs[0].bounds = outer;
        self.arcs[1].bounds = outer.inset(3.0 * padding);
        self.arcs[2].bounds = outer.inset(5.0 * padding);
        self.size = size;

        debug!(target: LOG_TARGET, "area {width}x{height}, size {size}, padding {padding}");
        self.request_redraw();
        true
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    // ------------------------------------------------------------------------
    // State access
    // ------------------------------------------------------------------------

    pub fn arcs(&self) -> &[ArcSpec; 3] {
        &self.arcs
    }

    pub fn arc(&self, circle: Circle) -> &ArcSpec {
        &self.arcs[circle.index()]
    }

    pub fn bounds(&self, circle: Circle) -> Rect {
        self.arc(circle).bounds
    }

    pub fn angle(&self, circle: Circle, kind: AngleKind) -> f64 {
        self.arc(circle).angle(kind)
    }

    pub fn set_angle(&mut self, circle: Circle, kind: AngleKind, value: f64) {
        *self.arcs[circle.index()].angle_mut(kind) = value;
        self.request_redraw();
    }

    pub fn start_angle(&self, circle: Circle) -> f64 {
        self.angle(circle, AngleKind::Start)
    }

    pub fn set_start_angle(&mut self, circle: Circle, value: f64) {
        self.set_angle(circle, AngleKind::Start, value);
    }

    pub fn end_angle(&self, circle: Circle) -> f64 {
        self.angle(circle, AngleKind::End)
    }

    /// End angle the startup sweep opens `circle` to.
    pub fn target_angle(&self, circle: Circle) -> f64 {
        self.targets[circle.index()]
    }

    pub fn set_end_angle(&mut self, circle: Circle, value: f64) {
        self.set_angle(circle, AngleKind::End, value);
    }

    pub fn stroke_policy(&self) -> &StrokeWidthPolicy {
        &self.stroke
    }

    // ------------------------------------------------------------------------
    // Redraw requests
    // ------------------------------------------------------------------------

    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
    }

    pub fn has_pending_redraw(&self) -> bool {
        self.redraw_pending
    }

    /// Returns whether a redraw was requested since the last call, and clears it.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    // ------------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------------

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&AnimationGroup> {
        self.animation.as_ref()
    }

    /// Replaces any running animation with `group`.
    pub fn start_animation(&mut self, group: AnimationGroup) {
        self.animation = Some(group);
        self.request_redraw();
    }

    /// Restarts the startup sweep: every circle from 0 to its configured end angle.
    ///
    /// The arcs close immediately, so a frame painted before the first tick
    /// already shows the start of the sweep.
    pub fn replay(&mut self) {
        for arc in &mut self.arcs {
            arc.end_angle = 0.0;
        }
        let group = AnimationGroup::new(
            Circle::ALL
                .iter()
                .map(|&circle| {
                    SweepAnimation::new(
                        circle,
                        self.targets[circle.index()],
                        self.durations[circle.index()],
                    )
                })
                .collect(),
            self.easing,
        );
        self.start_animation(group);
    }

    pub fn animate_to(&mut self, circle: Circle, target: f64, duration: Duration) {
        let group = AnimationGroup::new(
            vec![SweepAnimation::new(circle, target, duration)],
            self.easing,
        );
        self.start_animation(group);
    }

    pub fn stop_animation(&mut self) {
        if let Some(mut group) = self.animation.take() {
            group.cancel();
            debug!(target: LOG_TARGET, "animation cancelled");
        }
    }

    /// Ticks the running animation at wall-clock `now`.
    pub fn advance(&mut self, now: Instant) -> GroupStatus {
        self.drive(|group, widget| group.tick(now, widget))
    }

    /// Ticks the running animation as if `elapsed` had passed since it started.
    pub fn advance_elapsed(&mut self, elapsed: Duration) -> GroupStatus {
        self.drive(|group, widget| group.tick_elapsed(elapsed, widget))
    }

    fn drive(&mut self, step: impl FnOnce(&mut AnimationGroup, &mut Self)) -> GroupStatus {
        let Some(mut group) = self.animation.take() else {
            return GroupStatus::Idle;
        };
        step(&mut group, self);
        if group.is_finished() {
            info!(target: LOG_TARGET, "animation group finished");
            GroupStatus::Finished
        } else {
            self.animation = Some(group);
            GroupStatus::Running
        }
    }

    pub fn apply(&mut self, command: GraphCommand) {
        match command {
            GraphCommand::SetAngle(circle, kind, value) => self.set_angle(circle, kind, value),
            GraphCommand::AnimateTo {
                circle,
                target,
                duration,
            } => self.animate_to(circle, target, duration),
            GraphCommand::Replay => self.replay(),
            GraphCommand::Stop => self.stop_animation(),
        }
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Track and sweep for each circle, outermost first.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::new();
        self.paint_into(&mut scene);
        scene
    }

    pub fn paint_into(&self, scene: &mut Scene) {
        for circle in Circle::ALL {
            let arc = self.arc(circle);
            let stroke_width = self.stroke.stroke_width(circle, self.size);
            scene.add_command(DrawCommand::Arc {
                bounds: arc.bounds,
                start_deg: 0.0,
                sweep_deg: 360.0,
                stroke_width,
                color: self.track_color,
            });
            scene.add_command(DrawCommand::Arc {
                bounds: arc.bounds,
                start_deg: arc.start_angle,
                sweep_deg: arc.end_angle,
                stroke_width,
                color: arc.color,
            });
        }
    }

    pub fn render(&self, canvas: &mut Canvas) {
        self.scene().render(canvas);
    }
}

fn read_arcs(source: &(impl AttributeSource + ?Sized)) -> Result<[ArcSpec; 3]> {
    let mut arcs = [ArcSpec::default(); 3];
    for circle in Circle::ALL {
        arcs[circle.index()] = ArcSpec::read(source, AttributeNames::for_circle(circle))?;
    }
    Ok(arcs)
}
