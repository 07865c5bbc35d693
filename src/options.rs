use serde::Deserialize;

/// Options for GPX serialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteOptions {
    /// Spaces per nesting level; 0 writes everything on one line (default: 0)
    #[serde(default)]
    pub indent: usize,

    /// Emit the `<?xml ...?>` declaration (default: true)
    #[serde(default = "default_true")]
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            xml_declaration: true,
        }
    }
}

impl WriteOptions {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn without_declaration(mut self) -> Self {
        self.xml_declaration = false;
        self
    }
}

fn default_true() -> bool {
    true
}
