//! The emitted module image: an 8-byte magic header followed by a JSON
//! manifest of the compiled declarations.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    options::{LanguageVersion, OptimizationLevel, OutputKind},
    syntax::TypeSymbol,
};

pub const MAGIC: &[u8; 8] = b"CSMOD\x01\0\0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub name: String,
    pub language_version: LanguageVersion,
    pub output_kind: OutputKind,
    pub optimization: OptimizationLevel,
    pub overflow_checks: bool,
    pub usings: Vec<String>,
    pub references: Vec<String>,
    pub types: Vec<TypeSymbol>,
}

impl Module {
    pub fn write_to(&self, writer: &mut impl Write) -> io::Result<()> {
        writer.write_all(MAGIC)?;
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.flush()
    }

    pub fn read(bytes: &[u8]) -> Result<Self> {
        let manifest = bytes.strip_prefix(MAGIC.as_slice()).ok_or_else(|| Error::InvalidModule {
            reason: "missing module header".to_string(),
        })?;
        serde_json::from_slice(manifest).map_err(|e| Error::InvalidModule {
            reason: e.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::read(&bytes)
    }

    /// Look up a top-level type by namespace-qualified name.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeSymbol> {
        self.types.iter().find(|t| t.full_name() == full_name)
    }
}
