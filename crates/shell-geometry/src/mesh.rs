use serde::{Deserialize, Serialize};

use crate::vector::Vec3;

/// Which side of the box a face lies on, before any displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSide {
    /// +Z
    Front,
    /// -Z
    Back,
    /// +X
    Right,
    /// -X
    Left,
    /// +Y
    Top,
    /// -Y
    Bottom,
}

impl FaceSide {
    pub const ALL: [FaceSide; 6] = [
        FaceSide::Front,
        FaceSide::Back,
        FaceSide::Right,
        FaceSide::Left,
        FaceSide::Top,
        FaceSide::Bottom,
    ];

    /// Outward normal of the undisplaced face.
    pub fn axis_normal(&self) -> Vec3 {
        match self {
            FaceSide::Front => Vec3::Z,
            FaceSide::Back => -Vec3::Z,
            FaceSide::Right => Vec3::X,
            FaceSide::Left => -Vec3::X,
            FaceSide::Top => Vec3::Y,
            FaceSide::Bottom => -Vec3::Y,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FaceSide::Front => "front",
            FaceSide::Back => "back",
            FaceSide::Right => "right",
            FaceSide::Left => "left",
            FaceSide::Top => "top",
            FaceSide::Bottom => "bottom",
        }
    }
}

/// A quad face: four vertex indices wound counter-clockwise seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuadFace {
    pub side: FaceSide,
    pub indices: [u32; 4],
    pub normal: Vec3,
}

/// Closed quad mesh describing one box shell, in meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellMesh {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<QuadFace>,
}

impl ShellMesh {
    /// Axis-aligned box centered on the origin.
    ///
    /// `size` is (length, height, width) mapped to (x, y, z).
    pub fn axis_aligned_box(size: Vec3) -> Self {
        let (hx, hy, hz) = (size.x / 2.0, size.y / 2.0, size.z / 2.0);
        let vertices = vec![
            Vec3::new(-hx, -hy, -hz), // 0: back-bottom-left
            Vec3::new(hx, -hy, -hz),  // 1: back-bottom-right
            Vec3::new(hx, hy, -hz),   // 2: back-top-right
            Vec3::new(-hx, hy, -hz),  // 3: back-top-left
            Vec3::new(-hx, -hy, hz),  // 4: front-bottom-left
            Vec3::new(hx, -hy, hz),   // 5: front-bottom-right
            Vec3::new(hx, hy, hz),    // 6: front-top-right
            Vec3::new(-hx, hy, hz),   // 7: front-top-left
        ];

        let face_defs: [(FaceSide, [u32; 4]); 6] = [
            (FaceSide::Front, [4, 5, 6, 7]),
            (FaceSide::Back, [0, 3, 2, 1]),
            (FaceSide::Right, [1, 2, 6, 5]),
            (FaceSide::Left, [0, 4, 7, 3]),
            (FaceSide::Top, [3, 7, 6, 2]),
            (FaceSide::Bottom, [0, 1, 5, 4]),
        ];

        let faces = face_defs
            .iter()
            .map(|&(side, indices)| QuadFace {
                side,
                indices,
                normal: side.axis_normal(),
            })
            .collect();

        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn face(&self, side: FaceSide) -> Option<&QuadFace> {
        self.faces.iter().find(|f| f.side == side)
    }

    /// Corner positions of a face, in winding order.
    pub fn face_corners(&self, face: &QuadFace) -> [Vec3; 4] {
        face.indices.map(|i| self.vertices[i as usize])
    }

    /// Recompute every face normal from the current vertex positions
    /// using Newell's method, which tolerates slightly non-planar quads.
    pub fn recompute_normals(&mut self) {
        for face in &mut self.faces {
            let corners = face.indices.map(|i| self.vertices[i as usize]);
            let mut n = Vec3::ZERO;
            for i in 0..4 {
                let a = corners[i];
                let b = corners[(i + 1) % 4];
                n.x += (a.y - b.y) * (a.z + b.z);
                n.y += (a.z - b.z) * (a.x + b.x);
                n.z += (a.x - b.x) * (a.y + b.y);
            }
            face.normal = n.normalized().unwrap_or_else(|| face.side.axis_normal());
        }
    }

    /// Split every quad into two triangles (0,1,2) and (0,2,3).
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        self.faces
            .iter()
            .flat_map(|f| {
                let [a, b, c, d] = f.indices;
                [[a, b, c], [a, c, d]]
            })
            .collect()
    }

    /// Unique undirected edges, ordered by first appearance.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut out: Vec<[u32; 2]> = Vec::new();
        for face in &self.faces {
            for i in 0..4 {
                let a = face.indices[i];
                let b = face.indices[(i + 1) % 4];
                let key = if a < b { [a, b] } else { [b, a] };
                if !out.contains(&key) {
                    out.push(key);
                }
            }
        }
        out
    }

    /// Minimum and maximum corner of the bounding box.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let first = self.vertices.first().copied().unwrap_or(Vec3::ZERO);
        self.vertices
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }

    /// Bounding box extents (x, y, z).
    pub fn dimensions(&self) -> Vec3 {
        let (lo, hi) = self.bounds();
        hi - lo
    }

    /// Enclosed volume in cubic meters, via the divergence theorem.
    pub fn volume(&self) -> f64 {
        self.triangles()
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize]);
                a.dot(&b.cross(&c)) / 6.0
            })
            .sum()
    }
}
