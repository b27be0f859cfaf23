use std::fmt;

/// Schema versions of the box configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SchemaVersion {
    /// Before ply selection and an explicit printing type existed.
    V3_0,
    V3_1,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V3_1;

    /// Every version this engine can read, oldest first.
    pub const COMPATIBLE: [SchemaVersion; 2] = [SchemaVersion::V3_0, SchemaVersion::V3_1];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SchemaVersion::V3_0 => "3.0",
            SchemaVersion::V3_1 => "3.1",
        }
    }

    /// Strict lookup. Anything outside the compatible set is `None`.
    pub fn parse(s: &str) -> Option<SchemaVersion> {
        Self::COMPATIBLE.into_iter().find(|v| v.as_str() == s)
    }

    pub fn next(&self) -> Option<SchemaVersion> {
        match self {
            SchemaVersion::V3_0 => Some(SchemaVersion::V3_1),
            SchemaVersion::V3_1 => None,
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
