use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::{return_config_error, return_file_error};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const OPTIMIZER_CONFIG_FILE_NAME: &str = "#optimizer.toml";

/// Callee name of the built-in init-rate coercion.
pub const INIT_COERCION_NAME: &str = "i";

/// Lexeme prefix the parser gives to compiler generated temporaries.
pub const TEMPORARY_PREFIX: &str = "#";

/// Significant digits used when writing the lexeme of a folded literal.
pub const FOLDED_LITERAL_PRECISION: usize = 20;

// Rough guesses to avoid reallocating while the parser interns a typical orchestra.
// Most orchestras only use a few hundred distinct lexemes.
pub const MINIMUM_STRING_TABLE_CAPACITY: usize = 64;
pub const NODE_ARENA_INITIAL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Calls to this function are specialized by the init coercion peephole.
    pub init_coercion_name: String,

    /// Assignment targets starting with this prefix are fused into the next copy.
    pub temporary_prefix: String,

    /// Enables the identity element pass (x + 0, x * 1, ...) after constant folding.
    /// Off unless a project explicitly opts in.
    pub fold_identities: bool,
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity_folding(mut self, enabled: bool) -> Self {
        self.fold_identities = enabled;
        self
    }

    /// Parse an optimizer config from TOML source.
    /// Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, CompilerError> {
        let config: OptimizerConfig = match toml::from_str(source) {
            Ok(config) => config,
            Err(e) => return_config_error!(format!("Malformed optimizer config: {e}"), {
                CompilationStage => "Optimizer Config",
                PrimarySuggestion => "Check the key names and value types in the optimizer config",
            }),
        };

        config.validate()?;
        Ok(config)
    }

    /// Read and parse an optimizer config file from disk.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => return_file_error!(path, format!("Could not read optimizer config: {e}"), {
                CompilationStage => "Optimizer Config",
            }),
        };

        Self::from_toml_str(&source).map_err(|e| e.with_file_path(path))
    }

    fn validate(&self) -> Result<(), CompilerError> {
        if self.init_coercion_name.is_empty() {
            return_config_error!("init_coercion_name can't be empty", {
                VariableName => "init_coercion_name",
                PrimarySuggestion => "Remove the key to use the default coercion name 'i'",
            });
        }

        if self.temporary_prefix.is_empty() {
            return_config_error!("temporary_prefix can't be empty", {
                VariableName => "temporary_prefix",
                PrimarySuggestion => "Remove the key to use the default prefix '#'",
            });
        }

        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            init_coercion_name: String::from(INIT_COERCION_NAME),
            temporary_prefix: String::from(TEMPORARY_PREFIX),
            fold_identities: false,
        }
    }
}
