use shell_geometry::{ShellMesh, Vec3};

use crate::source::ExportSource;

const SOLID_NAME: &str = "packaging_box";

/// ASCII STL of the closed outer shell: two facets per quad.
pub fn write_ascii_stl(source: &ExportSource) -> String {
    mesh_to_ascii_stl(&source.shells.outer, SOLID_NAME)
}

/// Export a shell as an ASCII STL string.
pub fn mesh_to_ascii_stl(mesh: &ShellMesh, name: &str) -> String {
    let mut out = String::with_capacity(mesh.face_count() * 2 * 260);
    out.push_str(&format!("solid {}\n", name));

    for face in &mesh.faces {
        let [a, b, c, d] = face.indices;
        for tri in [[a, b, c], [a, c, d]] {
            let [v0, v1, v2] = tri.map(|i| mesh.vertices[i as usize]);

            // Facet normal from the triangle itself; fall back to the quad
            // normal for a degenerate triangle.
            let n = (v1 - v0)
                .cross(&(v2 - v0))
                .normalized()
                .unwrap_or(face.normal);

            out.push_str(&format!("  facet normal {}\n", triple(n)));
            out.push_str("    outer loop\n");
            for v in [v0, v1, v2] {
                out.push_str(&format!("      vertex {}\n", triple(v)));
            }
            out.push_str("    endloop\n");
            out.push_str("  endfacet\n");
        }
    }

    out.push_str(&format!("endsolid {}\n", name));
    out
}

fn triple(v: Vec3) -> String {
    format!("{:e} {:e} {:e}", v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_box_has_twelve_facets() {
        let mesh = ShellMesh::axis_aligned_box(Vec3::new(0.3, 0.15, 0.2));
        let stl = mesh_to_ascii_stl(&mesh, "unit");
        assert!(stl.starts_with("solid unit\n"));
        assert!(stl.ends_with("endsolid unit\n"));
        assert_eq!(stl.matches("facet normal").count(), 12);
        assert_eq!(stl.matches("vertex").count(), 36);
    }

    #[test]
    fn facet_normals_point_outward() {
        let mesh = ShellMesh::axis_aligned_box(Vec3::new(1.0, 1.0, 1.0));
        let stl = mesh_to_ascii_stl(&mesh, "unit");
        let first = stl.lines().nth(1).unwrap();
        // Front face comes first and faces +Z.
        assert_eq!(first.trim(), "facet normal 0e0 0e0 1e0");
    }
}
