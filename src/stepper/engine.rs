/// Stepper navigation core
///
/// Owns the current step, the high-water mark and the travel direction.
/// Illegal moves are rejected without mutating state; callers are expected
/// to disable affordances for moves the engine would reject.
use super::input::{InputContext, NavKey};

/// Direction of the last step change, for UI transition animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Forward,
    Backward,
}

/// Result of a navigation request
#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    /// Navigation succeeded, now on the new step
    Moved(u32),

    /// Navigation rejected, state unchanged
    Blocked { reason: String },
}

/// Generic stepper over steps `1..=total`
#[derive(Debug, Clone)]
pub struct Stepper {
    step: u32,
    total: u32,
    max_reached: u32,
    direction: StepDirection,
    enabled: bool,
    allow_free_jump: bool,
}

impl Stepper {
    /// Create a stepper positioned on step 1.
    /// `total` is clamped to at least 1.
    pub fn new(total: u32) -> Self {
        Self {
            step: 1,
            total: total.max(1),
            max_reached: 1,
            direction: StepDirection::Forward,
            enabled: true,
            allow_free_jump: false,
        }
    }

    /// Allow forward jumps past the high-water mark
    pub fn with_free_jump(mut self) -> Self {
        self.allow_free_jump = true;
        self
    }

    /// Current step (1-indexed)
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Total number of steps
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Furthest step reached this session
    pub fn max_step_reached(&self) -> u32 {
        self.max_reached
    }

    /// Direction of the last step change
    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    /// Whether keyboard navigation is accepted
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable keyboard navigation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Completion fraction in `[0.0, 1.0]` for progress display
    pub fn progress(&self) -> f32 {
        (self.step as f32 / self.total as f32).min(1.0)
    }

    /// Unconditionally set the current step, bypassing legality checks.
    ///
    /// Used by flow controllers that already know the target is legal.
    /// Clamps into `[1, total]`, recomputes the direction and raises the
    /// high-water mark.
    pub fn set_step(&mut self, target: u32) {
        let target = target.clamp(1, self.total);
        self.direction = if target > self.step {
            StepDirection::Forward
        } else {
            StepDirection::Backward
        };
        self.step = target;
        self.max_reached = self.max_reached.max(target);
    }

    /// Attempt a direct jump.
    ///
    /// Rejects targets outside `[1, total]` and forward jumps past the
    /// high-water mark (unless free jumping was enabled).
    pub fn go_to(&mut self, target: u32) -> NavOutcome {
        if target < 1 || target > self.total {
            return NavOutcome::Blocked {
                reason: format!("step {} out of range", target),
            };
        }

        if target > self.max_reached && !self.allow_free_jump {
            return NavOutcome::Blocked {
                reason: format!("step {} not reached yet", target),
            };
        }

        self.set_step(target);
        NavOutcome::Moved(target)
    }

    /// Advance one step (internal advancement, raises the high-water mark)
    pub fn next(&mut self) -> NavOutcome {
        if self.step >= self.total {
            return NavOutcome::Blocked {
                reason: "already at last step".to_string(),
            };
        }

        self.set_step(self.step + 1);
        NavOutcome::Moved(self.step)
    }

    /// Go back one step
    pub fn back(&mut self) -> NavOutcome {
        if self.step <= 1 {
            return NavOutcome::Blocked {
                reason: "already at first step".to_string(),
            };
        }

        self.set_step(self.step - 1);
        NavOutcome::Moved(self.step)
    }

    /// Handle a navigation key.
    ///
    /// Left goes back, Right and Enter advance. Ignored while the stepper is
    /// disabled or the input context reports focus inside an editable field.
    pub fn handle_key(&mut self, key: NavKey, ctx: &InputContext) -> NavOutcome {
        if !self.enabled {
            return NavOutcome::Blocked {
                reason: "stepper disabled".to_string(),
            };
        }

        if ctx.editable_focus {
            return NavOutcome::Blocked {
                reason: "editable field has focus".to_string(),
            };
        }

        match key {
            NavKey::ArrowLeft => self.back(),
            NavKey::ArrowRight | NavKey::Enter => self.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stepper() {
        let stepper = Stepper::new(5);
        assert_eq!(stepper.step(), 1);
        assert_eq!(stepper.total(), 5);
        assert_eq!(stepper.max_step_reached(), 1);
        assert!(stepper.is_enabled());
    }

    #[test]
    fn test_out_of_range_targets_are_noops() {
        let mut stepper = Stepper::new(5);
        assert!(matches!(stepper.go_to(0), NavOutcome::Blocked { .. }));
        assert!(matches!(stepper.go_to(6), NavOutcome::Blocked { .. }));
        assert_eq!(stepper.step(), 1);
    }

    #[test]
    fn test_forward_jump_past_high_water_mark_rejected() {
        let mut stepper = Stepper::new(5);
        assert!(matches!(stepper.go_to(3), NavOutcome::Blocked { .. }));
        assert_eq!(stepper.step(), 1);

        // Internal advancement raises the mark, then the jump is legal
        stepper.next();
        stepper.next();
        stepper.back();
        stepper.back();
        assert_eq!(stepper.step(), 1);
        assert_eq!(stepper.max_step_reached(), 3);
        assert_eq!(stepper.go_to(3), NavOutcome::Moved(3));
    }

    #[test]
    fn test_free_jump_bypasses_high_water_mark() {
        let mut stepper = Stepper::new(5).with_free_jump();
        assert_eq!(stepper.go_to(4), NavOutcome::Moved(4));
    }

    #[test]
    fn test_direction_tracks_numeric_comparison() {
        let mut stepper = Stepper::new(5);
        stepper.set_step(3);
        assert_eq!(stepper.direction(), StepDirection::Forward);

        stepper.set_step(2);
        assert_eq!(stepper.direction(), StepDirection::Backward);

        stepper.set_step(2);
        assert_eq!(stepper.direction(), StepDirection::Backward);
    }

    #[test]
    fn test_next_and_back_boundaries() {
        let mut stepper = Stepper::new(2);
        assert!(matches!(stepper.back(), NavOutcome::Blocked { .. }));

        assert_eq!(stepper.next(), NavOutcome::Moved(2));
        assert!(matches!(stepper.next(), NavOutcome::Blocked { .. }));

        assert_eq!(stepper.back(), NavOutcome::Moved(1));
    }

    #[test]
    fn test_progress_fraction() {
        let mut stepper = Stepper::new(4);
        assert_eq!(stepper.progress(), 0.25);

        stepper.set_step(4);
        assert_eq!(stepper.progress(), 1.0);
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut stepper = Stepper::new(3);
        let ctx = InputContext::default();

        assert_eq!(
            stepper.handle_key(NavKey::ArrowRight, &ctx),
            NavOutcome::Moved(2)
        );
        assert_eq!(stepper.handle_key(NavKey::Enter, &ctx), NavOutcome::Moved(3));
        assert_eq!(
            stepper.handle_key(NavKey::ArrowLeft, &ctx),
            NavOutcome::Moved(2)
        );
    }

    #[test]
    fn test_keyboard_ignored_in_editable_field() {
        let mut stepper = Stepper::new(3);
        let ctx = InputContext {
            editable_focus: true,
        };

        assert!(matches!(
            stepper.handle_key(NavKey::ArrowRight, &ctx),
            NavOutcome::Blocked { .. }
        ));
        assert_eq!(stepper.step(), 1);
    }

    #[test]
    fn test_keyboard_ignored_while_disabled() {
        let mut stepper = Stepper::new(3);
        stepper.set_enabled(false);

        let ctx = InputContext::default();
        assert!(matches!(
            stepper.handle_key(NavKey::Enter, &ctx),
            NavOutcome::Blocked { .. }
        ));
        assert_eq!(stepper.step(), 1);
    }
}
