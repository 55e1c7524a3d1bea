//! Per-frame blending of every animated quantity in the viewer.
//!
//! All state lives in [`AnimationState`] and is advanced by the pure
//! [`step`] function, so a frame can be replayed without a terminal.

use crate::color::Rgb;
use crate::smoothing::ExpFilter;
use crate::variant::Variant;

/// Resting spin speed of the idle turntable (rad/s)
pub const IDLE_SPIN: f64 = 0.06;
/// Spin target per unit of horizontal pointer offset while dragging (rad/s)
pub const DRAG_SWAY_GAIN: f64 = 6.0;

/// Stage one: the spin target chasing idle or drag sway
pub const SPIN_TARGET_FILTER: ExpFilter = ExpFilter::new(0.6);
/// Stage two: angular velocity chasing the spin target
pub const ANGULAR_VELOCITY_FILTER: ExpFilter = ExpFilter::new(0.25);
pub const CAMERA_DRIFT_FILTER: ExpFilter = ExpFilter::new(0.4);
pub const ENERGY_FILTER: ExpFilter = ExpFilter::new(0.35);
pub const ENVIRONMENT_FILTER: ExpFilter = ExpFilter::new(0.8);

/// Material color blend per 60 Hz frame
pub const COLOR_BLEND_PER_FRAME: f64 = 0.05;

/// Camera tilt at the viewport edge (rad)
pub const CAMERA_DRIFT: f64 = 0.35;

pub const ENERGY_VELOCITY_WEIGHT: f64 = 0.5;
/// Keeps a resting pointer plus the idle spin below the show threshold
pub const ENERGY_POINTER_WEIGHT: f64 = 0.25;
/// Labels hide once motion energy rises above this
pub const ENERGY_HIDE_THRESHOLD: f64 = 0.6;
/// Hidden labels return once motion energy falls below this
pub const ENERGY_SHOW_THRESHOLD: f64 = 0.25;

pub const FOG_BASE: f64 = 0.02;
pub const FOG_RANGE: f64 = 0.08;
pub const RIM_BASE: f64 = 0.4;
pub const RIM_RANGE: f64 = 0.8;
pub const RIM_FINISH: f64 = 0.6;
pub const EMISSIVE_BASE: f64 = 0.05;
pub const EMISSIVE_RANGE: f64 = 0.2;

/// Longest frame applied in one step (s), longer frames are clamped
pub const DEFAULT_MAX_DELTA: f64 = 0.1;

/// Tunables that are not fixed by the look of the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorConfig {
    pub max_delta: f64,
    pub color_filter: ExpFilter,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            max_delta: DEFAULT_MAX_DELTA,
            color_filter: ExpFilter::from_per_frame(COLOR_BLEND_PER_FRAME),
        }
    }
}

impl AnimatorConfig {
    /// Maps a raw frame delta onto the range a single step accepts
    pub fn sanitize_delta(&self, delta: f64) -> f64 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }
        delta.min(self.max_delta)
    }
}

/// Inputs sampled at the start of a frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub pointer: [f64; 2],
    pub dragging: bool,
    pub variant: &'a Variant,
}

/// Everything that is smoothed from frame to frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Accumulated turntable angle (rad)
    pub rotation: f64,
    pub spin_target: f64,
    pub angular_velocity: f64,
    /// Camera tilt (yaw, pitch) following the pointer
    pub camera_offset: [f64; 2],
    pub color: Rgb,
    pub rim_intensity: f64,
    pub fog_density: f64,
    pub emissive: f64,
    pub motion_energy: f64,
    pub text_visible: bool,
}

impl AnimationState {
    /// Settled state for a variant: no motion, everything at its target
    pub fn at_rest(variant: &Variant) -> Self {
        let env = EnvironmentTargets::for_variant(variant);
        Self {
            rotation: 0.0,
            spin_target: IDLE_SPIN,
            angular_velocity: IDLE_SPIN,
            camera_offset: [0.0, 0.0],
            color: variant.base_color,
            rim_intensity: env.rim,
            fog_density: env.fog,
            emissive: env.emissive,
            motion_energy: 0.0,
            text_visible: true,
        }
    }
}

/// Luminance-derived targets for the secondary environment attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentTargets {
    pub fog: f64,
    pub rim: f64,
    pub emissive: f64,
}

impl EnvironmentTargets {
    pub fn for_variant(variant: &Variant) -> Self {
        Self {
            fog: FOG_BASE + (1.0 - variant.luminance) * FOG_RANGE,
            rim: RIM_BASE + variant.luminance * RIM_RANGE + variant.finish_bias * RIM_FINISH,
            emissive: EMISSIVE_BASE + variant.luminance * EMISSIVE_RANGE,
        }
    }
}

fn spin_target_for(inputs: &FrameInputs) -> f64 {
    if inputs.dragging {
        inputs.pointer[0] * DRAG_SWAY_GAIN
    } else {
        IDLE_SPIN
    }
}

/// Text visibility with a hysteresis band between the two thresholds
pub fn text_visibility(visible: bool, energy: f64) -> bool {
    if visible {
        energy <= ENERGY_HIDE_THRESHOLD
    } else {
        energy < ENERGY_SHOW_THRESHOLD
    }
}

/// Advances `state` by `delta` seconds
pub fn step(
    config: &AnimatorConfig,
    state: &AnimationState,
    delta: f64,
    inputs: &FrameInputs,
) -> AnimationState {
    let dt = config.sanitize_delta(delta);

    let spin_target = SPIN_TARGET_FILTER.step(state.spin_target, spin_target_for(inputs), dt);
    let angular_velocity = ANGULAR_VELOCITY_FILTER.step(state.angular_velocity, spin_target, dt);

    // Leftover drag sway must not run the idle turntable backwards
    let applied_velocity = if inputs.dragging {
        angular_velocity
    } else {
        angular_velocity.max(0.0)
    };
    let rotation = state.rotation + applied_velocity * dt;

    let camera_offset = [
        CAMERA_DRIFT_FILTER.step(state.camera_offset[0], inputs.pointer[0] * CAMERA_DRIFT, dt),
        CAMERA_DRIFT_FILTER.step(state.camera_offset[1], inputs.pointer[1] * CAMERA_DRIFT, dt),
    ];

    let color = state
        .color
        .lerp(inputs.variant.base_color, config.color_filter.factor(dt));

    let pointer_magnitude = (inputs.pointer[0].powi(2) + inputs.pointer[1].powi(2)).sqrt();
    let energy_target = angular_velocity.abs() * ENERGY_VELOCITY_WEIGHT
        + pointer_magnitude * ENERGY_POINTER_WEIGHT;
    let motion_energy = ENERGY_FILTER.step(state.motion_energy, energy_target, dt);
    let text_visible = text_visibility(state.text_visible, motion_energy);
    if text_visible != state.text_visible {
        log::trace!(
            "labels {} at motion energy {:.3}",
            if text_visible { "shown" } else { "hidden" },
            motion_energy
        );
    }

    let env = EnvironmentTargets::for_variant(inputs.variant);

    AnimationState {
        rotation,
        spin_target,
        angular_velocity,
        camera_offset,
        color,
        rim_intensity: ENVIRONMENT_FILTER.step(state.rim_intensity, env.rim, dt),
        fog_density: ENVIRONMENT_FILTER.step(state.fog_density, env.fog, dt),
        emissive: ENVIRONMENT_FILTER.step(state.emissive, env.emissive, dt),
        motion_energy,
        text_visible,
    }
}

/// Owns the animation state between frames
#[derive(Debug, Clone)]
pub struct FrameAnimator {
    config: AnimatorConfig,
    state: AnimationState,
}

impl FrameAnimator {
    pub fn new(config: AnimatorConfig, variant: &Variant) -> Self {
        Self {
            config,
            state: AnimationState::at_rest(variant),
        }
    }

    pub fn update(&mut self, delta: f64, inputs: &FrameInputs) -> &AnimationState {
        self.state = step(&self.config, &self.state, delta, inputs);
        &self.state
    }

    pub fn reset(&mut self, variant: &Variant) {
        self.state = AnimationState::at_rest(variant);
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }
}
