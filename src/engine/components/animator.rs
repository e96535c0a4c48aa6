use crate::engine::clock::Clock;

/// Peak arm deflection in degrees.
pub const ARM_SWING_AMPLITUDE: f64 = 45.0;
/// Peak leg deflection in degrees.
pub const LEG_SWING_AMPLITUDE: f64 = 30.0;
pub const DEFAULT_SWING_SPEED: f32 = 7.0;

/// Walk-cycle phase for one figure.
///
/// One angle per limb pair; the right side uses the negated value when the
/// pose is composed.
#[derive(Clone, Debug, PartialEq)]
pub struct SwingAnimator {
    arm_swing: f32, // degrees
    leg_swing: f32, // degrees
    swing_speed: f32,
}

impl SwingAnimator {
    pub fn new() -> Self {
        Self {
            arm_swing: 0.0,
            leg_swing: 0.0,
            swing_speed: DEFAULT_SWING_SPEED,
        }
    }

    pub fn with_speed(swing_speed: f32) -> Self {
        Self { swing_speed, ..Self::new() }
    }

    /// Recompute the swing angles for this frame.
    ///
    /// `_delta_time` is accepted for the frame-loop signature but unused: the
    /// phase is `clock.now_seconds() * swing_speed`. When `is_moving` is false
    /// both angles snap to zero.
    pub fn update_swing(&mut self, _delta_time: f32, is_moving: bool, clock: &dyn Clock) {
        if is_moving {
            let phase = (clock.now_seconds() * f64::from(self.swing_speed)).sin();
            self.arm_swing = (ARM_SWING_AMPLITUDE * phase) as f32;
            self.leg_swing = (LEG_SWING_AMPLITUDE * phase) as f32;
        } else {
            self.arm_swing = 0.0;
            self.leg_swing = 0.0;
        }
    }

    pub fn arm_swing(&self) -> f32 {
        self.arm_swing
    }

    pub fn leg_swing(&self) -> f32 {
        self.leg_swing
    }

    pub fn swing_speed(&self) -> f32 {
        self.swing_speed
    }

    pub fn set_swing_speed(&mut self, speed: f32) {
        self.swing_speed = speed;
    }
}

impl Default for SwingAnimator {
    fn default() -> Self {
        Self::new()
    }
}
