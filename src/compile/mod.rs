// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Solidity compilation pipeline.
//!
//! The compiler binary consumes a complete source map up front, so the
//! pipeline first walks the import graph from the entry file, resolving each
//! specifier to a file on disk ([`resolver`]), then hands the gathered map
//! to the compiler over its standard-JSON interface ([`solc`]).

pub mod resolver;
pub mod solc;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ProvisionError;

/// Deploy-ready artifact of a single compiled contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledContract {
    /// Source-unit name of the file defining the contract.
    pub source_file_name: String,
    pub contract_name: String,
    /// JSON ABI as emitted by the compiler.
    pub abi: serde_json::Value,
    /// Creation bytecode, unprefixed hex.
    pub bytecode: String,
}

/// Every contract produced by one compiler run, keyed by source-unit name
/// and then contract name.
#[derive(Debug, Default)]
pub struct CompiledArtifacts {
    pub contracts: BTreeMap<String, BTreeMap<String, CompiledContract>>,
}

impl CompiledArtifacts {
    /// Look up a contract by name across all source units.
    pub fn find(&self, contract_name: &str) -> Option<&CompiledContract> {
        self.contracts
            .values()
            .find_map(|unit| unit.get(contract_name))
    }

    /// The only contract in the run, if there is exactly one.
    pub fn single(&self) -> Option<&CompiledContract> {
        let mut all = self.contracts.values().flat_map(|unit| unit.values());
        match (all.next(), all.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }
}

/// Compile `entry_file` and every source it transitively imports.
pub async fn compile(entry_file: &Path) -> Result<CompiledArtifacts, ProvisionError> {
    let sources = gather_sources(entry_file)?;
    tracing::debug!(
        entry = %entry_file.display(),
        source_count = sources.len(),
        "compiling source map"
    );

    let input = solc::StandardJsonInput::solidity(sources);
    let output = solc::run_solc(&solc::solc_bin(), &input).await?;

    let mut artifacts = CompiledArtifacts::default();
    for (unit_name, unit) in output.contracts {
        let entry = artifacts.contracts.entry(unit_name.clone()).or_default();
        for (contract_name, contract) in unit {
            entry.insert(
                contract_name.clone(),
                CompiledContract {
                    source_file_name: unit_name.clone(),
                    contract_name,
                    abi: contract.abi,
                    bytecode: contract.evm.bytecode.object,
                },
            );
        }
    }
    Ok(artifacts)
}

/// Walk the import graph from `entry_file`, producing the source map keyed
/// by source-unit name. Resolution failures surface as compilation errors.
pub fn gather_sources(entry_file: &Path) -> Result<BTreeMap<String, String>, ProvisionError> {
    let entry_name = entry_file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ProvisionError::CompilationFailed(vec![format!(
                "entry file has no usable name: {}",
                entry_file.display()
            )])
        })?
        .to_string();

    let mut sources = BTreeMap::new();
    let mut queue: Vec<(String, PathBuf)> = vec![(entry_name, entry_file.to_path_buf())];

    while let Some((unit_name, path)) = queue.pop() {
        if sources.contains_key(&unit_name) {
            continue;
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ProvisionError::CompilationFailed(vec![format!(
                "cannot read source '{}': {e}",
                path.display()
            )])
        })?;
        let imports = resolver::parse_imports(&content);
        sources.insert(unit_name.clone(), content);

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        for specifier in imports {
            let resolved = resolver::resolve_import(&specifier, base_dir)
                .map_err(|e| ProvisionError::CompilationFailed(vec![e.to_string()]))?;
            let child_name = resolver::source_unit_name(&unit_name, &specifier);
            queue.push((child_name, resolved));
        }
    }

    Ok(sources)
}
