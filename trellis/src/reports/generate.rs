//! Generate command report data structures.

use std::path::PathBuf;

use trellis_codegen::WriteResult;

use super::output::{Output, Report};

/// Outcome of writing the generated module.
#[derive(Debug)]
pub struct GenerateReport {
    pub output: PathBuf,
    pub result: WriteResult,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match self.result {
            WriteResult::Written => {
                out.preformatted(&format!("✓ wrote {}", self.output.display()))
            }
            WriteResult::Unchanged => {
                out.preformatted(&format!("✓ {} is up to date", self.output.display()))
            }
        }
    }
}
