use box_types::flute_factor;

use crate::mesh::ShellMesh;
use crate::GeometryConfig;

/// Vertical offset of the fluted surface at horizontal position (x, z).
///
/// Periodic and fully deterministic: the same inputs always give the same
/// offset, so identical configurations produce identical meshes.
pub fn displacement(x: f64, z: f64, flute: f64, geometry: &GeometryConfig) -> f64 {
    let k = geometry.corrugation_frequency * flute;
    let amp = geometry.corrugation_amplitude * flute;
    (x * k).sin() * amp + (z * k).sin() * amp
}

/// Displace every vertex along y and refresh the face normals.
pub fn apply_corrugation(mesh: &mut ShellMesh, flute_code: &str, geometry: &GeometryConfig) {
    let flute = flute_factor(flute_code);
    for v in &mut mesh.vertices {
        v.y += displacement(v.x, v.z, flute, geometry);
    }
    mesh.recompute_normals();
}
