//! Generate operation - configuration loading and module output.

use std::path::Path;

use tracing::info;
use trellis_codegen::{ConfigFile, Generator, GeneratorConfig, Result};
use trellis_schema::Schema;

use crate::reports::GenerateReport;

/// Configuration file picked up from the working directory.
const DEFAULT_CONFIG: &str = "trellis.toml";

/// Load the generator configuration.
///
/// An explicit path must exist. Without one, `./trellis.toml` is used when
/// present and the defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let path = match path {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG).is_file() => Path::new(DEFAULT_CONFIG),
        None => return Ok(GeneratorConfig::default()),
    };
    info!(path = %path.display(), "loading configuration");
    Ok(ConfigFile::from_file(path)?.into_config())
}

/// Execute the generate operation, writing the module to `output`.
pub fn generate(schema: &Schema, config: &GeneratorConfig, output: &Path) -> Result<GenerateReport> {
    let result = Generator::new(schema, config).write(output)?;
    Ok(GenerateReport {
        output: output.to_path_buf(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use trellis_codegen::{Error, WriteResult};
    use trellis_schema::{Field, SchemaType, TypeRef};

    use super::*;

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("missing.toml").as_path())).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_explicit_config_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[naming]\nprefix = \"Api\"").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.prefix, "Api");
    }

    #[test]
    fn test_generate_reports_write_result() {
        let schema = Schema::new([
            SchemaType::object("Query").field(Field::new("ping", TypeRef::scalar("String")))
        ])
        .unwrap()
        .with_query_type("Query");
        let config = GeneratorConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("graphql.rs");

        let report = generate(&schema, &config, &output).unwrap();
        assert_eq!(report.result, WriteResult::Written);
        assert!(output.is_file());

        let report = generate(&schema, &config, &output).unwrap();
        assert_eq!(report.result, WriteResult::Unchanged);
    }
}
