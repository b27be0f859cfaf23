use crate::artifact::ExportContext;
use crate::source::ExportSource;

/// Texture coordinates shared by every quad, in winding order.
const QUAD_UVS: [(f64, f64); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// Wavefront OBJ of the outer shell.
///
/// One `v` per shell vertex, four shared `vt`, one `vn` per face and one
/// quad `f` per face. A comment block records what was ordered.
pub fn write_obj(source: &ExportSource, ctx: &ExportContext) -> String {
    let config = &source.config;
    let mesh = &source.shells.outer;
    let mut out = String::with_capacity(1024);

    out.push_str("# Packaging box export\n");
    out.push_str(&format!(
        "# Dimensions: {} x {} x {} cm (L x W x H)\n",
        config.length, config.width, config.height
    ));
    out.push_str(&format!("# Wall thickness: {} mm\n", config.thickness));
    out.push_str(&format!("# Material: {}\n", config.material));
    out.push_str(&format!("# Ply: {}\n", source.ply_label()));
    out.push_str(&format!("# Printing: {}\n", config.printing.printing_type));
    out.push_str(&format!("# Generated: {}\n", ctx.timestamp()));
    out.push_str("# Units: meters\n");
    out.push('\n');

    out.push_str("o packaging_box\n");
    for v in &mesh.vertices {
        out.push_str(&format!("v {:.6} {:.6} {:.6}\n", v.x, v.y, v.z));
    }
    for (u, v) in QUAD_UVS {
        out.push_str(&format!("vt {:.1} {:.1}\n", u, v));
    }
    for face in &mesh.faces {
        let n = face.normal;
        out.push_str(&format!("vn {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
    }
    for (fi, face) in mesh.faces.iter().enumerate() {
        out.push('f');
        for (corner, &vi) in face.indices.iter().enumerate() {
            // OBJ indices are 1-based
            out.push_str(&format!(" {}/{}/{}", vi + 1, corner + 1, fi + 1));
        }
        out.push('\n');
    }

    out
}
