use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters of custom text that ends up on the box.
pub const MAX_CUSTOM_TEXT_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintingType {
    Offset,
    Digital,
    Flexographic,
    #[default]
    None,
}

impl PrintingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrintingType::Offset => "offset",
            PrintingType::Digital => "digital",
            PrintingType::Flexographic => "flexographic",
            PrintingType::None => "none",
        }
    }
}

impl fmt::Display for PrintingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coverage {
    #[default]
    None,
    Partial,
    Full,
}

impl Coverage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Coverage::None => "none",
            Coverage::Partial => "partial",
            Coverage::Full => "full",
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Print job settings for the box surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printing {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub printing_type: PrintingType,
    pub colors: u32,
    pub coverage: Coverage,
    #[serde(default)]
    pub custom_text: String,
}

impl Printing {
    /// The custom text as it will be printed: at most 50 characters.
    pub fn rendered_text(&self) -> &str {
        match self.custom_text.char_indices().nth(MAX_CUSTOM_TEXT_CHARS) {
            Some((byte_idx, _)) => &self.custom_text[..byte_idx],
            None => &self.custom_text,
        }
    }

    /// Printing is only effective when enabled with a real process selected.
    pub fn is_active(&self) -> bool {
        self.enabled && self.printing_type != PrintingType::None
    }
}
