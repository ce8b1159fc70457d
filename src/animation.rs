//! Time-driven sweep of a circle's end angle.
//!
//! [`AnimationGroup`] plays the role of the frame scheduler: the host calls
//! [`AnimationGroup::tick`] once per frame and every member animation maps its
//! own progress onto its circle. Members run side by side, each on its own
//! duration, with no ordering between them.

use std::time::{Duration, Instant};

use crate::widget::{Circle, GraphWidget};

/// Maps raw time progress in [0, 1] onto animation progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start and end, fastest in the middle.
    AccelerateDecelerate,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::AccelerateDecelerate => ((t + 1.0) * std::f64::consts::PI).cos() / 2.0 + 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    NotStarted,
    Running,
    Finished,
}

/// What a tick did to the widget's animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    /// Nothing was running.
    Idle,
    Running,
    /// The last member finished on this tick. Reported once.
    Finished,
}

/// Sweeps one circle's end angle from 0 to `target`.
#[derive(Debug, Clone)]
pub struct SweepAnimation {
    circle: Circle,
    target: f64,
    duration: Duration,
    state: AnimationState,
}

impl SweepAnimation {
    pub fn new(circle: Circle, target: f64, duration: Duration) -> Self {
        Self {
            circle,
            target,
            duration,
            state: AnimationState::NotStarted,
        }
    }

    pub fn circle(&self) -> Circle {
        self.circle
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Writes `target * progress` into the bound circle's end angle.
    pub fn on_tick(&self, progress: f64, widget: &mut GraphWidget) {
        widget.set_end_angle(self.circle, self.target * progress);
    }

    fn time_fraction(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn step(&mut self, elapsed: Duration, easing: Easing, widget: &mut GraphWidget) {
        if self.state == AnimationState::Finished {
            return;
        }
        let t = self.time_fraction(elapsed);
        self.state = AnimationState::Running;
        self.on_tick(easing.apply(t), widget);
        if t >= 1.0 {
            self.state = AnimationState::Finished;
        }
    }
}

/// Sweep animations ticked together from a shared start time.
#[derive(Debug, Clone)]
pub struct AnimationGroup {
    animations: Vec<SweepAnimation>,
    easing: Easing,
    started_at: Option<Instant>,
    cancelled: bool,
}

impl AnimationGroup {
    /// The clock starts on the first [`tick`](Self::tick).
    pub fn new(animations: Vec<SweepAnimation>, easing: Easing) -> Self {
        Self {
            animations,
            easing,
            started_at: None,
            cancelled: false,
        }
    }

    pub fn animations(&self) -> &[SweepAnimation] {
        &self.animations
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn tick(&mut self, now: Instant, widget: &mut GraphWidget) {
        let started_at = *self.started_at.get_or_insert(now);
        self.tick_elapsed(now.saturating_duration_since(started_at), widget);
    }

    pub fn tick_elapsed(&mut self, elapsed: Duration, widget: &mut GraphWidget) {
        if self.cancelled {
            return;
        }
        for animation in &mut self.animations {
            animation.step(elapsed, self.easing, widget);
        }
    }

    /// Stops all members; no further ticks reach the widget.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_finished(&self) -> bool {
        self.cancelled
            || self
                .animations
                .iter()
                .all(|animation| animation.state == AnimationState::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Attributes;
    use approx::assert_abs_diff_eq;

    fn widget() -> GraphWidget {
        // Let the startup sweep run out so every circle rests at 90 degrees.
        let mut widget = GraphWidget::new(&Attributes::new());
        widget.advance_elapsed(Duration::from_secs(5));
        widget
    }

    fn startup_group() -> AnimationGroup {
        AnimationGroup::new(
            vec![
                SweepAnimation::new(Circle::First, 90.0, Duration::from_millis(2000)),
                SweepAnimation::new(Circle::Second, 180.0, Duration::from_millis(3000)),
                SweepAnimation::new(Circle::Third, 270.0, Duration::from_millis(4000)),
            ],
            Easing::Linear,
        )
    }

    #[test]
    fn test_on_tick_is_linear() {
        let mut widget = widget();
        let animation = SweepAnimation::new(Circle::Second, 240.0, Duration::from_secs(1));
        animation.on_tick(0.25, &mut widget);
        assert_abs_diff_eq!(widget.end_angle(Circle::Second), 60.0);
        animation.on_tick(0.0, &mut widget);
        assert_eq!(widget.end_angle(Circle::Second), 0.0);
        animation.on_tick(1.0, &mut widget);
        assert_eq!(widget.end_angle(Circle::Second), 240.0);
    }

    #[test]
    fn test_on_tick_only_touches_bound_circle() {
        let mut widget = widget();
        SweepAnimation::new(Circle::Third, 45.0, Duration::from_secs(1)).on_tick(1.0, &mut widget);
        assert_eq!(widget.end_angle(Circle::First), 90.0);
        assert_eq!(widget.end_angle(Circle::Second), 90.0);
        assert_eq!(widget.end_angle(Circle::Third), 45.0);
    }

    #[test]
    fn test_group_starts_closed() {
        let mut widget = widget();
        let mut group = startup_group();
        group.tick_elapsed(Duration::ZERO, &mut widget);
        for circle in Circle::ALL {
            assert_eq!(widget.end_angle(circle), 0.0);
        }
        assert!(group
            .animations()
            .iter()
            .all(|a| a.state() == AnimationState::Running));
    }

    #[test]
    fn test_group_members_finish_independently() {
        let mut widget = widget();
        let mut group = startup_group();
        group.tick_elapsed(Duration::from_millis(2500), &mut widget);

        let states: Vec<_> = group.animations().iter().map(|a| a.state()).collect();
        assert_eq!(
            states,
            vec![
                AnimationState::Finished,
                AnimationState::Running,
                AnimationState::Running
            ]
        );
        assert_eq!(widget.end_angle(Circle::First), 90.0);
        assert_abs_diff_eq!(widget.end_angle(Circle::Second), 150.0, epsilon = 1e-9);
        assert_abs_diff_eq!(widget.end_angle(Circle::Third), 168.75, epsilon = 1e-9);
        assert!(!group.is_finished());

        group.tick_elapsed(Duration::from_millis(4000), &mut widget);
        assert!(group.is_finished());
        assert_eq!(widget.end_angle(Circle::Third), 270.0);
    }

    #[test]
    fn test_finished_member_stops_writing() {
        let mut widget = widget();
        let mut group = startup_group();
        group.tick_elapsed(Duration::from_millis(2000), &mut widget);
        widget.set_end_angle(Circle::First, 12.0);
        group.tick_elapsed(Duration::from_millis(2100), &mut widget);
        assert_eq!(widget.end_angle(Circle::First), 12.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut widget = widget();
        let mut group = AnimationGroup::new(
            vec![SweepAnimation::new(Circle::First, 33.0, Duration::ZERO)],
            Easing::Linear,
        );
        group.tick_elapsed(Duration::ZERO, &mut widget);
        assert!(group.is_finished());
        assert_eq!(widget.end_angle(Circle::First), 33.0);
    }

    #[test]
    fn test_cancelled_group_is_silent() {
        let mut widget = widget();
        let mut group = startup_group();
        group.cancel();
        group.tick_elapsed(Duration::from_millis(500), &mut widget);
        assert!(group.is_finished());
        assert_eq!(widget.end_angle(Circle::First), 90.0);
    }

    #[test]
    fn test_tick_clock_starts_on_first_tick() {
        let mut widget = widget();
        let mut group = startup_group();
        let t0 = Instant::now();
        group.tick(t0, &mut widget);
        assert_eq!(widget.end_angle(Circle::First), 0.0);
        group.tick(t0 + Duration::from_millis(1000), &mut widget);
        assert_abs_diff_eq!(widget.end_angle(Circle::First), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::AccelerateDecelerate] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(1.5), 1.0);
        }
        assert_abs_diff_eq!(Easing::AccelerateDecelerate.apply(0.5), 0.5, epsilon = 1e-12);
        assert!(Easing::AccelerateDecelerate.apply(0.1) < 0.1);
    }
}
