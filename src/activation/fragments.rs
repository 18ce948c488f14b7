//! Style and script fragments lifted out of injected markup

use crate::dom::{Document, NodeId};
use crate::error::{CardDiffError, Result};
use crate::utils::html::escape_attribute;

pub const PROCESSED_ATTR: &str = "data-processed";
pub const EXECUTED_ATTR: &str = "data-executed";

/// A style declaration ready to be installed in the page head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub attrs: Vec<(String, String)>,
    pub body: String,
}

impl StyleDeclaration {
    /// Copy a `<style>` element, leaving out the processed marker
    pub fn from_element(doc: &Document, id: NodeId) -> Self {
        Self {
            attrs: copy_attrs(doc, id, PROCESSED_ATTR),
            body: doc.text_content(id),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        find_attr(&self.attrs, name)
    }

    pub fn to_html(&self) -> String {
        format!("<style{}>{}</style>", render_attrs(&self.attrs), self.body)
    }
}

/// A fresh script built from an injected `<script>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFragment {
    pub attrs: Vec<(String, String)>,
    pub body: String,
}

impl ScriptFragment {
    /// Copy a `<script>` element, leaving out the executed marker
    ///
    /// A script with an empty `src`, or with neither `src` nor a body, is
    /// rejected as malformed.
    pub fn from_element(doc: &Document, id: NodeId) -> Result<Self> {
        let attrs = copy_attrs(doc, id, EXECUTED_ATTR);
        let body = doc.text_content(id);

        match find_attr(&attrs, "src") {
            Some(src) if src.trim().is_empty() => {
                return Err(CardDiffError::malformed_fragment("script", "empty src attribute"));
            }
            None if body.trim().is_empty() => {
                return Err(CardDiffError::malformed_fragment("script", "no src and no body"));
            }
            _ => {}
        }

        Ok(Self { attrs, body })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        find_attr(&self.attrs, name)
    }

    pub fn src(&self) -> Option<&str> {
        self.attr("src")
    }

    pub fn is_external(&self) -> bool {
        self.src().is_some()
    }

    pub fn to_html(&self) -> String {
        format!("<script{}>{}</script>", render_attrs(&self.attrs), self.body)
    }
}

fn copy_attrs(doc: &Document, id: NodeId, marker: &str) -> Vec<(String, String)> {
    doc.element(id)
        .map(|element| {
            element
                .attrs
                .iter()
                .filter(|(name, _)| name != marker)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

fn find_attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn render_attrs(attrs: &[(String, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_attribute(value)))
        .collect()
}
