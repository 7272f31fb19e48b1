//! Rust impl block builder.

use super::{Fn, vis_prefix};
use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// An associated constant, e.g. `pub const NAME: &str = "User";`.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    ty: String,
    value: String,
    vis: String,
}

impl Const {
    pub fn new(name: impl Into<String>, ty: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
            vis: "pub".to_string(),
        }
    }

    pub fn vis(mut self, vis: impl Into<String>) -> Self {
        self.vis = vis.into();
        self
    }

    /// Drop the visibility keyword, as trait impl items require.
    pub fn private(self) -> Self {
        self.vis("")
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        let head = format!(
            "{}const {}: {} =",
            vis_prefix(&self.vis),
            self.name,
            self.ty
        );
        let mut lines = self.value.lines();
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();
        if rest.is_empty() {
            return vec![CodeFragment::Line(format!("{} {};", head, first))];
        }
        // multi-line values are expected to be pre-indented after the first line
        let mut fragments = vec![CodeFragment::Line(format!("{} {}", head, first))];
        let last = rest.len() - 1;
        for (i, line) in rest.into_iter().enumerate() {
            if i == last {
                fragments.push(CodeFragment::Line(format!("{};", line)));
            } else {
                fragments.push(CodeFragment::line(line));
            }
        }
        fragments
    }
}

/// Builder for Rust impl blocks.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    trait_name: Option<String>,
    consts: Vec<Const>,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            trait_name: None,
            consts: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Create an impl block for a trait.
    pub fn for_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    pub fn constant(mut self, constant: Const) -> Self {
        self.consts.push(constant);
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.consts.is_empty() && self.methods.is_empty()
    }

    /// Build the impl block as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }

    fn format_header(&self) -> String {
        match &self.trait_name {
            Some(trait_name) => format!("impl {} for {} {{", trait_name, self.type_name),
            None => format!("impl {} {{", self.type_name),
        }
    }

    fn body_to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            self.consts.iter().flat_map(Const::to_fragments).collect();

        for method in &self.methods {
            if !fragments.is_empty() {
                fragments.push(CodeFragment::Blank);
            }
            fragments.extend(method.to_fragments());
        }
        fragments
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        if self.is_empty() {
            let header = self.format_header();
            return vec![CodeFragment::Line(format!("{}}}", header))];
        }
        vec![CodeFragment::block(
            self.format_header(),
            self.body_to_fragments(),
        )]
    }
}
