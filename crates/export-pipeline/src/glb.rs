use serde_json::json;
use shell_geometry::Vec3;

use crate::errors::ExportError;
use crate::format::ExportFormat;
use crate::source::ExportSource;

const GLB_MAGIC: u32 = 0x4654_6C67; // "glTF"
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// glTF 2.0 binary container holding the outer shell.
///
/// Vertices are split per face so every face keeps a flat normal. The PBR
/// material comes from the composed appearance.
pub fn write_glb(source: &ExportSource) -> Result<Vec<u8>, ExportError> {
    let mesh = &source.shells.outer;

    let mut positions: Vec<Vec3> = Vec::with_capacity(mesh.face_count() * 4);
    let mut normals: Vec<Vec3> = Vec::with_capacity(mesh.face_count() * 4);
    let mut indices: Vec<u32> = Vec::with_capacity(mesh.face_count() * 6);
    for face in &mesh.faces {
        let base = positions.len() as u32;
        for corner in mesh.face_corners(face) {
            positions.push(corner);
            normals.push(face.normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut bin = Vec::with_capacity((positions.len() * 2 * 3 + indices.len()) * 4);
    for p in &positions {
        for c in p.to_f32_array() {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    let normals_offset = bin.len();
    for n in &normals {
        for c in n.to_f32_array() {
            bin.extend_from_slice(&c.to_le_bytes());
        }
    }
    let indices_offset = bin.len();
    for i in &indices {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    let bin_len = bin.len();

    let (lo, hi) = mesh.bounds();
    let appearance = &source.material.appearance;
    let color = appearance.base_color.to_linear();
    let config = &source.config;

    let document = json!({
        "asset": { "version": "2.0", "generator": "packaging-configurator" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{
            "mesh": 0,
            "name": "packaging_box",
            "extras": {
                "lengthCm": config.length,
                "widthCm": config.width,
                "heightCm": config.height,
                "material": config.material.as_str(),
            }
        }],
        "meshes": [{
            "name": "outer_shell",
            "primitives": [{
                "attributes": { "POSITION": 0, "NORMAL": 1 },
                "indices": 2,
                "material": 0,
            }]
        }],
        "materials": [{
            "name": config.material.as_str(),
            "pbrMetallicRoughness": {
                "baseColorFactor": [color.r, color.g, color.b, 1.0],
                "metallicFactor": appearance.metalness,
                "roughnessFactor": appearance.roughness,
            }
        }],
        "buffers": [{ "byteLength": bin_len }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": normals_offset, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": normals_offset, "byteLength": indices_offset - normals_offset, "target": TARGET_ARRAY_BUFFER },
            { "buffer": 0, "byteOffset": indices_offset, "byteLength": bin_len - indices_offset, "target": TARGET_ELEMENT_ARRAY_BUFFER },
        ],
        "accessors": [
            {
                "bufferView": 0,
                "componentType": COMPONENT_FLOAT,
                "count": positions.len(),
                "type": "VEC3",
                "min": lo.to_f32_array(),
                "max": hi.to_f32_array(),
            },
            { "bufferView": 1, "componentType": COMPONENT_FLOAT, "count": normals.len(), "type": "VEC3" },
            { "bufferView": 2, "componentType": COMPONENT_UNSIGNED_INT, "count": indices.len(), "type": "SCALAR" },
        ],
    });

    let mut json_bytes =
        serde_json::to_vec(&document).map_err(|e| ExportError::Serialization {
            format: ExportFormat::Glb,
            reason: e.to_string(),
        })?;
    // Chunks are 4-byte aligned: JSON pads with spaces, BIN with zeros.
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);

    Ok(out)
}
