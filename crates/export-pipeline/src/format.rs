use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ExportError;

/// How faithfully an artifact represents its nominal file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fidelity {
    /// A conforming file of the named format.
    Complete,
    /// Conforming syntax, but only the flat box footprint: no flaps,
    /// tabs or score lines.
    FootprintOnly,
}

/// Every artifact the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Obj,
    Stl,
    Glb,
    Pdf,
    Txt,
    Ai,
    Dxf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 7] = [
        ExportFormat::Obj,
        ExportFormat::Stl,
        ExportFormat::Glb,
        ExportFormat::Pdf,
        ExportFormat::Txt,
        ExportFormat::Ai,
        ExportFormat::Dxf,
    ];

    /// Look up a format by name, ignoring ASCII case.
    ///
    /// Anything else is an `UnsupportedFormat` error carrying the name as
    /// given. There is no fallback format.
    pub fn parse(name: &str) -> Result<ExportFormat, ExportError> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(name))
            .ok_or_else(|| ExportError::UnsupportedFormat {
                format: name.to_string(),
            })
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "obj",
            ExportFormat::Stl => "stl",
            ExportFormat::Glb => "glb",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
            ExportFormat::Ai => "ai",
            ExportFormat::Dxf => "dxf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Obj => "model/obj",
            ExportFormat::Stl => "model/stl",
            ExportFormat::Glb => "model/gltf-binary",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt => "text/plain",
            ExportFormat::Ai => "application/postscript",
            ExportFormat::Dxf => "image/vnd.dxf",
        }
    }

    pub fn fidelity(&self) -> Fidelity {
        match self {
            ExportFormat::Ai | ExportFormat::Dxf => Fidelity::FootprintOnly,
            _ => Fidelity::Complete,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Glb | ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
