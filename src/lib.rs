pub mod animator;
pub mod cli;
pub mod clock;
pub mod color;
pub mod graphics;
pub mod math;
pub mod mesh;
pub mod smoothing;
pub mod state;
pub mod terminal;
pub mod variant;
pub mod vertex;
pub mod widget;

pub use animator::{step, AnimationState, AnimatorConfig, FrameAnimator, FrameInputs};
pub use color::Rgb;
pub use variant::{Catalog, Variant};
