//! Procedural low-poly shoe.
//!
//! Model space: +x points to the toe, +y up, +z toward the lateral side.
//! The upper is lofted through a handful of cross sections from heel to toe
//! and sits on a slab sole.

use crate::math::Vec3;

/// Which material a face is painted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Takes the animated variant color
    Upper,
    /// Fixed off-white midsole
    Sole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
    pub part: Part,
}

/// Model-space point that a text label is pinned to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Vec3,
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub faces: Vec<Face>,
    /// Above the heel collar, carries the variant name
    pub title_anchor: Anchor,
    /// Ahead of the toe, carries the material label
    pub detail_anchor: Anchor,
}

const SOLE_TOP: f64 = -0.35;
const SOLE_BOTTOM: f64 = -0.55;

/// Cross sections of the upper: (x, top y, half width)
const UPPER_SECTIONS: [(f64, f64, f64); 6] = [
    (-1.2, 0.40, 0.32),
    (-0.8, 0.50, 0.38),
    (-0.3, 0.25, 0.42),
    (0.3, 0.05, 0.42),
    (0.9, -0.10, 0.36),
    (1.25, -0.22, 0.22),
];

impl Mesh {
    pub fn shoe() -> Self {
        let mut mesh = Mesh {
            positions: Vec::new(),
            faces: Vec::new(),
            title_anchor: Anchor {
                position: [-1.0, 0.85, 0.0],
            },
            detail_anchor: Anchor {
                position: [1.55, -0.1, 0.0],
            },
        };
        mesh.add_upper();
        mesh.add_sole();
        mesh
    }

    fn push(&mut self, position: Vec3) -> usize {
        self.positions.push(position);
        self.positions.len() - 1
    }

    fn quad(&mut self, indices: [usize; 4], part: Part) {
        self.faces.push(Face { indices, part });
    }

    fn add_upper(&mut self) {
        // Per section: bottom-medial, top-medial, top-lateral, bottom-lateral
        let rings: Vec<[usize; 4]> = UPPER_SECTIONS
            .iter()
            .map(|&(x, top, half)| {
                [
                    self.push([x, SOLE_TOP, -half]),
                    self.push([x, top, -half * 0.8]),
                    self.push([x, top, half * 0.8]),
                    self.push([x, SOLE_TOP, half]),
                ]
            })
            .collect();

        for pair in rings.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            for side in 0..3 {
                let next = side + 1;
                self.quad([a[side], b[side], b[next], a[next]], Part::Upper);
            }
        }

        let heel = rings[0];
        let toe = rings[rings.len() - 1];
        self.quad([heel[3], heel[2], heel[1], heel[0]], Part::Upper);
        self.quad(toe, Part::Upper);
    }

    fn add_sole(&mut self) {
        let (heel_x, _, heel_half) = UPPER_SECTIONS[0];
        let (toe_x, _, _) = UPPER_SECTIONS[UPPER_SECTIONS.len() - 1];
        let (x0, x1) = (heel_x - 0.08, toe_x + 0.12);
        let half = heel_half.max(0.42) + 0.06;

        let corners = [
            self.push([x0, SOLE_BOTTOM, -half]),
            self.push([x1, SOLE_BOTTOM, -half]),
            self.push([x1, SOLE_TOP, -half]),
            self.push([x0, SOLE_TOP, -half]),
            self.push([x0, SOLE_BOTTOM, half]),
            self.push([x1, SOLE_BOTTOM, half]),
            self.push([x1, SOLE_TOP, half]),
            self.push([x0, SOLE_TOP, half]),
        ];
        let faces = [
            (0, 1, 2, 3),
            (5, 4, 7, 6),
            (4, 0, 3, 7),
            (1, 5, 6, 2),
            (4, 5, 1, 0),
            (3, 2, 6, 7),
        ];
        for (a, b, c, d) in faces {
            self.quad([corners[a], corners[b], corners[c], corners[d]], Part::Sole);
        }
    }
}
