use super::fragments::{ScriptFragment, StyleDeclaration};
use crate::error::Result;
use crate::traits::PageHost;

/// In-memory page that records what activation hands it
#[derive(Debug, Clone, Default)]
pub struct Page {
    head: Vec<StyleDeclaration>,
    body: Vec<ScriptFragment>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style declarations installed in the head, oldest first
    pub fn styles(&self) -> &[StyleDeclaration] {
        &self.head
    }

    /// Scripts appended to the body, in execution order
    pub fn scripts(&self) -> &[ScriptFragment] {
        &self.body
    }

    pub fn head_html(&self) -> String {
        self.head.iter().map(StyleDeclaration::to_html).collect()
    }

    pub fn body_html(&self) -> String {
        self.body.iter().map(ScriptFragment::to_html).collect()
    }
}

impl PageHost for Page {
    fn inject_style(&mut self, style: StyleDeclaration) -> Result<()> {
        self.head.push(style);
        Ok(())
    }

    fn run_script(&mut self, script: ScriptFragment) -> Result<()> {
        self.body.push(script);
        Ok(())
    }
}
