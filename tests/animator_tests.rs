use shoe3d::animator::{
    step, AnimationState, AnimatorConfig, FrameAnimator, FrameInputs, ENERGY_HIDE_THRESHOLD,
    ENERGY_SHOW_THRESHOLD,
};
use shoe3d::variant::{Catalog, Variant};

const FRAME: f64 = 1.0 / 60.0;

/// Uneven frame pacing, including stalls and zero-length frames
const DELTAS: [f64; 12] = [
    FRAME, 0.0, 0.033, 0.25, FRAME, 0.002, 1.5, 0.0, 0.05, FRAME, 0.1, 0.007,
];

fn inputs(variant: &Variant, pointer: [f64; 2], dragging: bool) -> FrameInputs<'_> {
    FrameInputs {
        pointer,
        dragging,
        variant,
    }
}

#[cfg(test)]
mod rotation_tests {
    use super::*;

    #[test]
    fn test_idle_rotation_never_decreases() {
        let catalog = Catalog::builtin();
        let config = AnimatorConfig::default();
        let pointers = [[0.0, 0.0], [0.5, 0.2], [-0.5, -0.5], [-0.1, 0.4]];

        let mut state = AnimationState::at_rest(catalog.active());
        for round in 0..20 {
            for (i, &delta) in DELTAS.iter().enumerate() {
                let pointer = pointers[(round + i) % pointers.len()];
                let next = step(&config, &state, delta, &inputs(catalog.active(), pointer, false));
                assert!(next.rotation >= state.rotation);
                state = next;
            }
        }
    }

    #[test]
    fn test_idle_rotation_after_reverse_drag_never_decreases() {
        let catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        for _ in 0..90 {
            animator.update(FRAME, &inputs(catalog.active(), [-0.5, 0.0], true));
        }
        assert!(animator.state().angular_velocity < 0.0);

        let mut previous = animator.state().rotation;
        for _ in 0..600 {
            let state = animator.update(FRAME, &inputs(catalog.active(), [-0.5, 0.0], false));
            assert!(state.rotation >= previous);
            previous = state.rotation;
        }
        assert!(animator.state().angular_velocity > 0.0);
    }
}

#[cfg(test)]
mod convergence_tests {
    use super::*;

    #[test]
    fn test_color_distance_strictly_decreases() {
        let mut catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        let target = catalog.select_next().clone();

        let mut distance = animator.state().color.distance(target.base_color);
        assert!(distance > 0.5);
        let mut frames = 0;
        while distance > 1e-4 {
            let state = animator.update(FRAME, &inputs(&target, [0.0, 0.0], false));
            let next = state.color.distance(target.base_color);
            assert!(next < distance, "distance rose from {distance} to {next}");
            distance = next;
            frames += 1;
            assert!(frames < 10_000);
        }

        for _ in 0..100 {
            let state = animator.update(FRAME, &inputs(&target, [0.0, 0.0], false));
            let next = state.color.distance(target.base_color);
            assert!(next <= distance);
            distance = next;
        }
    }

    #[test]
    fn test_color_blend_rate_at_sixty_hz() {
        let mut catalog = Catalog::builtin();
        let config = AnimatorConfig::default();
        let state = AnimationState::at_rest(catalog.active());
        let target = catalog.select_next().clone();

        let next = step(&config, &state, FRAME, &inputs(&target, [0.0, 0.0], false));
        let before = state.color.distance(target.base_color);
        let after = next.color.distance(target.base_color);
        assert!((after / before - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_zero_delta_changes_nothing() {
        let mut catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        for _ in 0..45 {
            animator.update(FRAME, &inputs(catalog.active(), [0.3, -0.2], true));
        }
        let target = catalog.select_next().clone();
        let frozen = *animator.state();

        for pointer in [[0.0, 0.0], [0.5, 0.5], [-0.4, 0.1]] {
            for dragging in [false, true] {
                let state = animator.update(0.0, &inputs(&target, pointer, dragging));
                assert_eq!(*state, frozen);
            }
        }
    }

    #[test]
    fn test_variant_change_keeps_rotation_continuous() {
        let mut catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        for _ in 0..60 {
            animator.update(FRAME, &inputs(catalog.active(), [0.0, 0.0], false));
        }
        let before = *animator.state();
        let next = catalog.select_next().clone();
        let after = *animator.update(FRAME, &inputs(&next, [0.0, 0.0], false));

        assert!((after.rotation - before.rotation) < 0.01);
        assert!((after.rim_intensity - before.rim_intensity).abs() < 0.05);
        assert_ne!(after.color, before.color);
    }
}

#[cfg(test)]
mod visibility_tests {
    use super::*;

    #[test]
    fn test_labels_hide_while_spinning_hard() {
        let catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        assert!(animator.state().text_visible);
        for _ in 0..240 {
            animator.update(FRAME, &inputs(catalog.active(), [0.5, 0.0], true));
        }
        assert!(animator.state().motion_energy > ENERGY_HIDE_THRESHOLD);
        assert!(!animator.state().text_visible);
    }

    #[test]
    fn test_labels_stay_hidden_inside_band() {
        let catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        for _ in 0..240 {
            animator.update(FRAME, &inputs(catalog.active(), [0.5, 0.0], true));
        }

        let mut was_hidden = true;
        for _ in 0..1200 {
            let state = *animator.update(FRAME, &inputs(catalog.active(), [0.0, 0.0], false));
            if was_hidden && state.text_visible {
                assert!(state.motion_energy < ENERGY_SHOW_THRESHOLD);
            }
            if !was_hidden {
                assert!(state.text_visible);
            }
            if state.motion_energy >= ENERGY_SHOW_THRESHOLD {
                assert!(!state.text_visible);
            }
            was_hidden = !state.text_visible;
        }
        assert!(animator.state().text_visible);
    }

    #[test]
    fn test_labels_return_with_pointer_resting_in_corner() {
        let catalog = Catalog::builtin();
        let mut animator = FrameAnimator::new(AnimatorConfig::default(), catalog.active());
        let pointer = [0.5, 0.5];
        for _ in 0..240 {
            animator.update(FRAME, &inputs(catalog.active(), pointer, true));
        }
        assert!(!animator.state().text_visible);

        // Released, pointer left where the drag ended
        let mut shown_at = None;
        for frame in 0..1800 {
            let state = *animator.update(FRAME, &inputs(catalog.active(), pointer, false));
            match shown_at {
                None if state.text_visible => {
                    assert!(state.motion_energy < ENERGY_SHOW_THRESHOLD);
                    shown_at = Some(frame);
                }
                None => assert!(state.motion_energy >= ENERGY_SHOW_THRESHOLD),
                Some(_) => assert!(state.text_visible),
            }
        }
        assert!(shown_at.is_some());
        assert!(animator.state().motion_energy < ENERGY_SHOW_THRESHOLD);
    }
}
