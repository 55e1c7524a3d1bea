use crate::animator::{AnimationState, AnimatorConfig, FrameAnimator, FrameInputs};
use crate::clock::FpsCounter;
use crate::color::Rgb;
use crate::graphics::{draw_line, draw_triangle, Framebuffer, Overlay, Shading};
use crate::math::{
    calculate_normal, multiply_matrices, multiply_matrix_vector, point_in_triangle, rotation_x,
    rotation_y, Mat3, Vec3,
};
use crate::mesh::{Anchor, Mesh, Part};
use crate::state::InteractionState;
use crate::variant::Catalog;
use crate::vertex::Vertex;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

/// Distance from the camera to the model origin
const CAMERA_DISTANCE: f64 = 4.0;
/// Resting downward look at the model
const BASE_PITCH: f64 = 0.35;
/// Light source position in view space
const LIGHT_POSITION: Vec3 = [-2.5, -3.0, -4.0];
const BACKGROUND: Rgb = Rgb::new(0.04, 0.04, 0.05);
const SOLE_COLOR: Rgb = Rgb::new(0.92, 0.90, 0.86);
const RIM_COLOR: Rgb = Rgb::new(0.75, 0.85, 1.0);
const TEXT_COLOR: Rgb = Rgb::new(0.95, 0.95, 0.95);
const MUTED_TEXT_COLOR: Rgb = Rgb::new(0.6, 0.6, 0.65);

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Interactive shoe viewer: input handling, animation and rendering
pub struct ViewerWidget {
    catalog: Catalog,
    animator: FrameAnimator,
    interaction: InteractionState,
    mesh: Mesh,
    fps: FpsCounter,
    /// Terminal cells (columns, rows)
    size: (u16, u16),
    /// Cell where the current press started
    press_origin: Option<(u16, u16)>,
    framebuffer: Framebuffer,
    overlay: Overlay,
}

impl ViewerWidget {
    pub fn new(catalog: Catalog, config: AnimatorConfig) -> Self {
        let animator = FrameAnimator::new(config, catalog.active());
        ViewerWidget {
            catalog,
            animator,
            interaction: InteractionState::default(),
            mesh: Mesh::shoe(),
            fps: FpsCounter::new(),
            size: (0, 0),
            press_origin: None,
            framebuffer: Framebuffer::new(0, 0),
            overlay: Overlay::new(0, 0),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.interaction.debug = debug;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.interaction.wireframe = wireframe;
        self
    }

    /// Two vertical pixels per terminal cell
    pub fn resize(&mut self, columns: u16, rows: u16) {
        if self.size != (columns, rows) {
            log::info!("viewport resized to {}x{} cells", columns, rows);
        }
        self.size = (columns, rows);
        self.framebuffer = Framebuffer::new(columns as usize, rows as usize * 2);
        self.overlay = Overlay::new(columns as usize, rows as usize);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn animation(&self) -> &AnimationState {
        self.animator.state()
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Handle events for the viewer widget
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key_event) => return self.handle_key(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse(mouse_event),
            Event::Resize(columns, rows) => self.resize(*columns, *rows),
            _ => {}
        }
        Control::Continue
    }

    fn handle_key(&mut self, key_event: &KeyEvent) -> Control {
        if key_event.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.interaction.debug = !self.interaction.debug;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.interaction.paused = !self.interaction.paused;
                // Reset any mouse events that were captured
                self.interaction.release();
                self.press_origin = None;
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                if !self.interaction.paused {
                    self.interaction.wireframe = !self.interaction.wireframe;
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char(' ') => {
                if !self.interaction.paused {
                    self.interaction.has_interacted = true;
                    self.select_next();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if !self.interaction.paused {
                    self.catalog.reset();
                    self.animator.reset(self.catalog.active());
                    self.interaction.wireframe = false;
                    log::info!("view reset to {}", self.catalog.active().name);
                }
            }
            _ => {}
        }
        Control::Continue
    }

    fn handle_mouse(&mut self, mouse_event: &MouseEvent) {
        let (columns, rows) = self.size;
        self.interaction.set_pointer(
            mouse_event.column as f64 + 0.5,
            mouse_event.row as f64 + 0.5,
            columns as f64,
            rows as f64,
        );
        if self.interaction.paused {
            return;
        }
        let cell = (mouse_event.column, mouse_event.row);
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.interaction.press();
                self.press_origin = Some(cell);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                // Leaving the press cell turns the press into a drag for good
                if self.press_origin.is_some_and(|origin| origin != cell) {
                    self.press_origin = None;
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.interaction.release();
                // A press released where it started is a click
                if self.press_origin.take() == Some(cell) && self.hit_test(cell) {
                    self.select_next();
                }
            }
            _ => {}
        }
    }

    /// Advances to the next variant; the color target changes immediately
    /// while rotation and lighting keep blending
    pub fn select_next(&mut self) {
        let variant = self.catalog.select_next();
        log::info!(
            "selected variant {} ({} / {})",
            variant.name,
            variant.product_line,
            variant.material
        );
    }

    /// Does a terminal cell cover the rendered model
    pub fn hit_test(&self, cell: (u16, u16)) -> bool {
        if self.framebuffer.is_empty() {
            return false;
        }
        let vertices = self.compute_projected_vertices(self.animator.state());
        let points = [
            [cell.0 as f64 + 0.5, cell.1 as f64 * 2.0 + 0.5],
            [cell.0 as f64 + 0.5, cell.1 as f64 * 2.0 + 1.5],
        ];
        self.mesh.faces.iter().any(|face| {
            let [a, b, c, d] = face.indices.map(|i| vertices[i].screen_position);
            points
                .iter()
                .any(|&p| point_in_triangle(p, a, b, c) || point_in_triangle(p, a, c, d))
        })
    }

    /// Steps the animator and redraws. Returns `false` without touching any
    /// state when there is no viewport to draw into
    pub fn frame(&mut self, delta: f64) -> bool {
        if self.framebuffer.is_empty() {
            return false;
        }
        self.fps.frame();

        let delta = if self.interaction.paused { 0.0 } else { delta };
        let inputs = FrameInputs {
            pointer: self.interaction.pointer,
            dragging: self.interaction.dragging(),
            variant: self.catalog.active(),
        };
        let state = *self.animator.update(delta, &inputs);
        log::trace!(
            "frame dt={:.4} rot={:.3} vel={:.3} energy={:.3}",
            delta,
            state.rotation,
            state.angular_velocity,
            state.motion_energy
        );

        self.render(&state);
        true
    }

    fn view_matrix(state: &AnimationState) -> Mat3 {
        let yaw = rotation_y(state.rotation + state.camera_offset[0]);
        let pitch = rotation_x(BASE_PITCH + state.camera_offset[1]);
        multiply_matrices(&pitch, &yaw)
    }

    fn scale(&self) -> f64 {
        let (width, height) = (self.framebuffer.width() as f64, self.framebuffer.height() as f64);
        width.min(height) * 0.9
    }

    /// Model space to (view space, screen position)
    fn project(&self, view: &Mat3, point: &Vec3) -> (Vec3, [f64; 2]) {
        let rotated = multiply_matrix_vector(view, point);
        // Model +y is up, screen rows grow downward
        let position = [rotated[0], -rotated[1], rotated[2] + CAMERA_DISTANCE];
        let perspective = CAMERA_DISTANCE / position[2].max(0.1);
        let scale = self.scale() * 0.5 * perspective;
        let center = (
            self.framebuffer.width() as f64 / 2.0,
            self.framebuffer.height() as f64 / 2.0,
        );
        (
            position,
            [position[0] * scale + center.0, position[1] * scale + center.1],
        )
    }

    /// Computes the projected vertices for the current state, one flat normal
    /// per face corner
    fn compute_projected_vertices(&self, state: &AnimationState) -> Vec<Vertex> {
        let view = Self::view_matrix(state);
        self.mesh
            .positions
            .iter()
            .map(|point| {
                let (position, screen_position) = self.project(&view, point);
                Vertex {
                    position,
                    screen_position,
                    normal: [0.0; 3],
                }
            })
            .collect()
    }

    fn anchor_cell(&self, view: &Mat3, anchor: &Anchor) -> (isize, isize) {
        let (_, screen) = self.project(view, &anchor.position);
        (screen[0].round() as isize, (screen[1] / 2.0).floor() as isize)
    }

    fn render(&mut self, state: &AnimationState) {
        self.framebuffer.clear(BACKGROUND);
        self.overlay.clear();

        let vertices = self.compute_projected_vertices(state);
        let base = Shading {
            base_color: state.color,
            light_pos: LIGHT_POSITION,
            eye: [0.0, 0.0, 0.0],
            emissive: state.emissive,
            rim_color: RIM_COLOR,
            rim_intensity: state.rim_intensity,
            fog_color: BACKGROUND,
            fog_density: state.fog_density,
        };

        if self.interaction.wireframe {
            let edge_color = state.color.lerp(Rgb::WHITE, 0.5);
            for face in &self.mesh.faces {
                for corner in 0..4 {
                    let start = &vertices[face.indices[corner]];
                    let end = &vertices[face.indices[(corner + 1) % 4]];
                    draw_line(
                        start.screen_position,
                        end.screen_position,
                        &mut self.framebuffer,
                        edge_color,
                    );
                }
            }
        } else {
            for face in &self.mesh.faces {
                let [a, b, c, d] = face.indices.map(|i| vertices[i]);
                let normal = calculate_normal(&a.position, &b.position, &c.position);
                let [a, b, c, d] = [a, b, c, d].map(|v| Vertex { normal, ..v });
                let shading = match face.part {
                    Part::Upper => base,
                    Part::Sole => Shading {
                        base_color: SOLE_COLOR,
                        ..base
                    },
                };
                // Triangle 1: a, b, c
                draw_triangle(&a, &b, &c, &mut self.framebuffer, &shading);
                // Triangle 2: a, c, d
                draw_triangle(&a, &c, &d, &mut self.framebuffer, &shading);
            }
        }

        self.draw_labels(state);
    }

    fn draw_labels(&mut self, state: &AnimationState) {
        let view = Self::view_matrix(state);
        let variant = self.catalog.active().clone();

        if state.text_visible {
            let (column, row) = self.anchor_cell(&view, &self.mesh.title_anchor);
            let title = format!("{} {}", variant.product_line, variant.name);
            self.overlay.put_text_centered(column, row, &title, TEXT_COLOR);
            let (column, row) = self.anchor_cell(&view, &self.mesh.detail_anchor);
            self.overlay
                .put_text_centered(column, row, &variant.material, MUTED_TEXT_COLOR);
        }

        let rows = self.overlay.rows() as isize;
        let columns = self.overlay.columns() as isize;
        if !self.interaction.has_interacted {
            self.overlay.put_text_centered(
                columns / 2,
                rows - 2,
                "drag to spin - click to change color",
                MUTED_TEXT_COLOR,
            );
        }

        let counter = format!(
            "{}/{}",
            self.catalog.active_index() + 1,
            self.catalog.len()
        );
        self.overlay.put_text(
            columns - counter.len() as isize - 1,
            0,
            &counter,
            MUTED_TEXT_COLOR,
        );

        if self.interaction.debug {
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Rotation: {:.2}", state.rotation),
                format!(
                    "Velocity: {:.3} (target {:.3})",
                    state.angular_velocity, state.spin_target
                ),
                format!("Color: {}", state.color.to_hex()),
                format!(
                    "Rim: {:.2}  Fog: {:.3}  Emissive: {:.2}",
                    state.rim_intensity, state.fog_density, state.emissive
                ),
                format!(
                    "Energy: {:.2}  Labels: {}",
                    state.motion_energy,
                    if state.text_visible { "on" } else { "off" }
                ),
                format!(
                    "Pointer: ({:.2}, {:.2})",
                    self.interaction.pointer[0], self.interaction.pointer[1]
                ),
                format!("FPS: {:.2}", self.fps.fps()),
            ];
            for (row, line) in lines.iter().enumerate() {
                self.overlay.put_text(1, row as isize, line, TEXT_COLOR);
            }
        }

        // Display 'Paused' if the simulation is paused
        if self.interaction.paused {
            self.overlay
                .put_text_centered(columns / 2, rows / 2, "Paused", TEXT_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn widget() -> ViewerWidget {
        let mut widget = ViewerWidget::new(Catalog::builtin(), AnimatorConfig::default());
        widget.resize(80, 24);
        widget
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_frame_skipped_without_viewport() {
        let mut widget = ViewerWidget::new(Catalog::builtin(), AnimatorConfig::default());
        let before = *widget.animation();
        assert!(!widget.frame(0.016));
        assert_eq!(*widget.animation(), before);
    }

    #[test]
    fn test_keys() {
        let mut widget = widget();
        assert_eq!(widget.handle_event(&key('n')), Control::Continue);
        assert_eq!(widget.catalog().active_index(), 1);
        widget.handle_event(&key('d'));
        assert!(widget.interaction().debug);
        widget.handle_event(&key('w'));
        assert!(widget.interaction().wireframe);
        widget.handle_event(&key('r'));
        assert_eq!(widget.catalog().active_index(), 0);
        assert!(!widget.interaction().wireframe);
        assert_eq!(widget.handle_event(&key('q')), Control::Quit);
    }

    #[test]
    fn test_paused_freezes_animation() {
        let mut widget = widget();
        widget.handle_event(&key('p'));
        let before = *widget.animation();
        assert!(widget.frame(0.05));
        assert_eq!(*widget.animation(), before);
        widget.handle_event(&key('n'));
        assert_eq!(widget.catalog().active_index(), 0);
    }

    #[test]
    fn test_drag_marks_interaction() {
        let mut widget = widget();
        widget.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 70, 12));
        assert!(widget.interaction().dragging());
        assert!(widget.interaction().has_interacted);
        widget.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 75, 12));
        widget.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 75, 12));
        assert!(!widget.interaction().dragging());
        assert_eq!(widget.catalog().active_index(), 0);
    }

    #[test]
    fn test_click_on_model_selects_next() {
        let mut widget = widget();
        assert!(widget.frame(0.016));
        assert!(widget.hit_test((40, 12)));
        widget.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
        widget.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 40, 12));
        assert_eq!(widget.catalog().active_index(), 1);
    }

    #[test]
    fn test_drag_back_to_press_cell_is_not_a_click() {
        let mut widget = widget();
        assert!(widget.frame(0.016));
        assert!(widget.hit_test((40, 12)));
        widget.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12));
        widget.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 44, 12));
        widget.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 40, 12));
        widget.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 40, 12));
        assert_eq!(widget.catalog().active_index(), 0);
    }

    #[test]
    fn test_click_on_background_keeps_variant() {
        let mut widget = widget();
        assert!(!widget.hit_test((0, 0)));
        widget.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        widget.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));
        assert_eq!(widget.catalog().active_index(), 0);
    }

    #[test]
    fn test_frame_draws_model_and_hint() {
        let mut widget = widget();
        assert!(widget.frame(0.016));
        let frame = widget.framebuffer();
        assert_ne!(frame.pixel(40, 24), BACKGROUND);
        assert_eq!(frame.pixel(0, 0), BACKGROUND);
        let hint_row = widget.overlay().rows() - 2;
        let hint: String = (0..widget.overlay().columns())
            .filter_map(|x| widget.overlay().glyph(x, hint_row).map(|g| g.ch))
            .collect();
        assert!(hint.contains("drag to spin"));
    }
}
