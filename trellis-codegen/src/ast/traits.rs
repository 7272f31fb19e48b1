//! Rust trait declaration builder.

use super::{Fn, vis_prefix};
use crate::builder::{CodeFragment, Renderable};

/// Builder for Rust trait declarations. Methods are usually signatures only.
#[derive(Debug, Clone)]
pub struct Trait {
    name: String,
    doc: Option<String>,
    vis: String,
    methods: Vec<Fn>,
}

impl Trait {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            vis: "pub".to_string(),
            methods: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn vis(mut self, vis: impl Into<String>) -> Self {
        self.vis = vis.into();
        self
    }

    pub fn method(mut self, method: Fn) -> Self {
        self.methods.push(method.private());
        self
    }
}

impl Renderable for Trait {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::doc(doc.clone()));
        }
        fragments.push(CodeFragment::block(
            format!("{}trait {} {{", vis_prefix(&self.vis), self.name),
            self.methods.iter().flat_map(Fn::to_fragments).collect(),
        ));
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Param;
    use crate::builder::CodeBuilder;

    #[test]
    fn test_trait_signatures() {
        let t = Trait::new("NodeFields").method(
            Fn::new("id")
                .param(Param::receiver("&self"))
                .returns("&Option<String>"),
        );
        let mut builder = CodeBuilder::rust();
        builder.emit(&t);
        assert_eq!(
            builder.build(),
            "pub trait NodeFields {\n    fn id(&self) -> &Option<String>;\n}\n"
        );
    }
}
