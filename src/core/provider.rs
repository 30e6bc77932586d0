//! Provider spec loading.
//!
//! A provider spec is a YAML description of the VM backing a substrate. It is
//! read once per substrate and partially overridden: instance name template,
//! memory and NIC subnet come from the resolved environment.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Result, SpecError};

/// A provider spec document with its source path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProviderSpec {
    spec: Map<String, Value>,
    #[serde(skip)]
    path: PathBuf,
}

impl ProviderSpec {
    /// Read a provider spec from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::NotFound` if the file is missing, `SpecError::Parse`
    /// if it is not valid YAML and `SpecError::NotAMapping` if the document
    /// root is not a mapping.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SpecError::NotFound(path.to_path_buf()).into())
            }
            Err(source) => {
                return Err(SpecError::ReadFile {
                    path: path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        let spec = Self::parse(&contents, path)?;
        debug!(path = %path.display(), keys = spec.spec.len(), "provider spec loaded");
        Ok(spec)
    }

    /// Parse provider spec YAML.
    ///
    /// # Errors
    ///
    /// Same as [`ProviderSpec::read`], minus the file errors.
    pub fn parse(contents: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let value: Value = serde_yaml::from_str(contents).map_err(|source| SpecError::Parse {
            path: path.clone(),
            source,
        })?;

        match value {
            Value::Object(spec) => Ok(Self { spec, path }),
            _ => Err(SpecError::NotAMapping(path).into()),
        }
    }

    /// Set the instance name template.
    ///
    /// Runtime macros such as `@@{calm_array_index}@@` are kept literally.
    pub fn set_name(&mut self, template: &str) {
        self.spec
            .insert("name".to_string(), Value::String(template.to_string()));
    }

    /// Set `resources.memory_size_mib` from a size in GiB.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::InvalidValue` if `gib` is not an unsigned integer.
    pub fn set_memory_gib(&mut self, gib: &str) -> Result<()> {
        let parsed: u64 = gib.trim().parse().map_err(|_| SpecError::InvalidValue {
            field: "AHV_MEM",
            reason: format!("expected a whole number of GiB, got '{}'", gib),
        })?;
        let mib = parsed.checked_mul(1024).ok_or_else(|| SpecError::InvalidValue {
            field: "AHV_MEM",
            reason: format!("{} GiB is out of range", parsed),
        })?;

        self.with_resources(|resources| {
            resources.insert("memory_size_mib".to_string(), Value::from(mib));
        });
        Ok(())
    }

    /// Point every NIC at the named subnet.
    pub fn set_nic_subnet(&mut self, subnet: &str) {
        self.with_resources(|resources| {
            let Some(Value::Array(nics)) = resources.get_mut("nic_list") else {
                debug!("provider spec has no nic_list, skipping subnet override");
                return;
            };

            for nic in nics.iter_mut().filter_map(Value::as_object_mut) {
                let mut reference = match nic.remove("subnet_reference") {
                    Some(Value::Object(reference)) => reference,
                    _ => Map::new(),
                };
                reference.insert("name".to_string(), Value::String(subnet.to_string()));
                nic.insert("subnet_reference".to_string(), Value::Object(reference));
            }
        });
    }

    /// Top-level value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.spec.get(key)
    }

    /// Source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Edit the `resources` mapping, creating it when missing or not a mapping.
    fn with_resources<R>(&mut self, edit: impl FnOnce(&mut Map<String, Value>) -> R) -> R {
        let mut resources = match self.spec.remove("resources") {
            Some(Value::Object(resources)) => resources,
            _ => Map::new(),
        };
        let out = edit(&mut resources);
        self.spec
            .insert("resources".to_string(), Value::Object(resources));
        out
    }
}
