use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use trellis_codegen::Generator;
use trellis_schema::Schema;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the introspection JSON (defaults to ./schema.json)
    #[arg(short, long, default_value = "schema.json")]
    pub schema: PathBuf,

    /// Path to trellis.toml (defaults to ./trellis.toml when it exists)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the generated module without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let schema = Schema::open(&self.schema).unwrap_or_exit();
        let config = ops::load_config(self.config.as_deref()).unwrap_or_exit();

        match &self.output {
            Some(output) if !self.dry_run => {
                let report = ops::generate(&schema, &config, output).unwrap_or_exit();
                report.render(&mut TerminalOutput::new());
            }
            _ => {
                let code = Generator::new(&schema, &config).generate().unwrap_or_exit();
                print!("{}", code);
            }
        }

        Ok(())
    }
}
