//! Rust function builder.

use super::vis_prefix;
use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// A parameter in a Rust function. An empty type renders the name alone,
/// which is how receivers (`&self`, `mut self`) are written.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn receiver(receiver: impl Into<String>) -> Self {
        Self::new(receiver, "")
    }

    fn render(&self) -> String {
        if self.ty.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.ty)
        }
    }
}

/// Builder for Rust functions.
///
/// A function without body lines renders as a signature (`fn f(&self);`).
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    attrs: Vec<String>,
    vis: String,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Option<Vec<String>>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            attrs: Vec::new(),
            vis: "pub".to_string(),
            params: Vec::new(),
            return_type: None,
            body: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    pub fn vis(mut self, vis: impl Into<String>) -> Self {
        self.vis = vis.into();
        self
    }

    /// Drop the visibility keyword, as trait items require.
    pub fn private(self) -> Self {
        self.vis("")
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.get_or_insert_with(Vec::new).push(line.into());
        self
    }

    /// Add raw body content (can contain multiple lines).
    pub fn body(mut self, content: impl Into<String>) -> Self {
        let body = self.body.get_or_insert_with(Vec::new);
        for line in content.into().lines() {
            body.push(line.to_string());
        }
        self
    }

    fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(Param::render)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = match &self.return_type {
            Some(ret) => format!(" -> {}", ret),
            None => String::new(),
        };
        format!("{}fn {}({}){}", vis_prefix(&self.vis), self.name, params, ret)
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }
        fragments.extend(self.attrs.iter().map(CodeFragment::attr));

        match &self.body {
            None => fragments.push(CodeFragment::Line(format!("{};", self.signature()))),
            Some(body) if body.is_empty() => {
                fragments.push(CodeFragment::Line(format!("{} {{}}", self.signature())))
            }
            Some(body) => fragments.push(CodeFragment::block(
                format!("{} {{", self.signature()),
                body.iter().cloned().map(CodeFragment::Line).collect(),
            )),
        }
        fragments
    }
}
