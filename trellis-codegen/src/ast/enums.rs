//! Rust enum builder.

use super::vis_prefix;
use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// A unit variant in a Rust enum.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub doc: Option<String>,
    pub attrs: Vec<String>,
}

impl Variant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Add an attribute to the variant, e.g., `serde(rename = "foo")`.
    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }
}

/// Builder for Rust enums.
#[derive(Debug, Clone)]
pub struct Enum {
    name: String,
    doc: Option<String>,
    derives: Vec<String>,
    attrs: Vec<String>,
    variants: Vec<Variant>,
    vis: String,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            derives: Vec::new(),
            attrs: Vec::new(),
            variants: Vec::new(),
            vis: "pub".to_string(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn derive(mut self, derive: impl Into<String>) -> Self {
        self.derives.push(derive.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn vis(mut self, vis: impl Into<String>) -> Self {
        self.vis = vis.into();
        self
    }

    /// Build the enum as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Enum {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }
        if !self.derives.is_empty() {
            fragments.push(CodeFragment::attr(format!(
                "derive({})",
                self.derives.join(", ")
            )));
        }
        fragments.extend(self.attrs.iter().map(CodeFragment::attr));

        let body = self
            .variants
            .iter()
            .flat_map(|variant| {
                let mut lines = Vec::new();
                if let Some(doc) = &variant.doc {
                    lines.push(CodeFragment::doc(doc.clone()));
                }
                lines.extend(variant.attrs.iter().map(CodeFragment::attr));
                lines.push(CodeFragment::Line(format!("{},", variant.name)));
                lines
            })
            .collect();

        fragments.push(CodeFragment::block(
            format!("{}enum {} {{", vis_prefix(&self.vis), self.name),
            body,
        ));
        fragments
    }
}
