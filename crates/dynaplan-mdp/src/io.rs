use std::{fs, path::Path};

use crate::{CompiledMdp, MdpError, MdpSpec};

impl MdpSpec {
    /// Parse a spec from YAML text. No validation happens here; call
    /// `validate` or `compile` afterwards.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, MdpError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a spec from a YAML file.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, MdpError> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Render the spec as YAML text.
    pub fn to_yaml_string(&self) -> Result<String, MdpError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the spec to a YAML file.
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<(), MdpError> {
        fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}

/// Read, validate, and compile an MDP straight from a YAML file.
pub fn compile_yaml(path: impl AsRef<Path>) -> Result<CompiledMdp, MdpError> {
    MdpSpec::from_yaml_path(path)?.compile()
}
