use crate::math::Vec3;

/// Vertex structure with view-space position, screen position, and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub screen_position: [f64; 2],
    pub normal: Vec3,
}
