// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Standard-JSON interface to the Solidity compiler binary.

use std::collections::BTreeMap;
use std::process::Stdio;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::config;
use crate::error::ProvisionError;

/// Standard-JSON compiler input.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardJsonInput {
    pub language: String,
    pub sources: BTreeMap<String, SourceContent>,
    pub settings: Settings,
}

#[derive(Debug, Serialize)]
pub struct SourceContent {
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub output_selection: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl StandardJsonInput {
    /// Wrap a source map as Solidity input selecting every output artifact
    /// of every contract.
    pub fn solidity(sources: BTreeMap<String, String>) -> Self {
        let mut all = BTreeMap::new();
        all.insert("*".to_string(), vec!["*".to_string()]);
        let mut output_selection = BTreeMap::new();
        output_selection.insert("*".to_string(), all);

        Self {
            language: "Solidity".to_string(),
            sources: sources
                .into_iter()
                .map(|(name, content)| (name, SourceContent { content }))
                .collect(),
            settings: Settings { output_selection },
        }
    }
}

/// Standard-JSON compiler output, narrowed to what the deploy path needs.
#[derive(Debug, Deserialize)]
pub struct StandardJsonOutput {
    #[serde(default)]
    pub errors: Vec<Diagnostic>,
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, ContractOutput>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: String,
    #[serde(default)]
    pub formatted_message: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }

    pub fn rendered(&self) -> &str {
        self.formatted_message.as_deref().unwrap_or(&self.message)
    }
}

#[derive(Debug, Deserialize)]
pub struct ContractOutput {
    pub abi: serde_json::Value,
    pub evm: EvmOutput,
}

#[derive(Debug, Deserialize)]
pub struct EvmOutput {
    pub bytecode: BytecodeOutput,
}

#[derive(Debug, Deserialize)]
pub struct BytecodeOutput {
    pub object: String,
}

/// The compiler binary to invoke: `SOLC_BIN` from the environment, falling
/// back to `solc` on the PATH.
pub fn solc_bin() -> String {
    std::env::var(config::SOLC_BIN_ENV).unwrap_or_else(|_| config::DEFAULT_SOLC_BIN.to_string())
}

/// Run the compiler binary over standard input/output.
///
/// Compiler diagnostics of error severity fail the run.
pub async fn run_solc(
    bin: &str,
    input: &StandardJsonInput,
) -> Result<StandardJsonOutput, ProvisionError> {
    let input_json = serde_json::to_vec(input)
        .map_err(|e| ProvisionError::Other(format!("cannot serialize compiler input: {e}")))?;

    let mut child = Command::new(bin)
        .arg("--standard-json")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ProvisionError::CompilationFailed(vec![format!("cannot start '{bin}': {e}")])
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(&input_json).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(ProvisionError::CompilationFailed(vec![format!(
            "'{bin}' exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )]));
    }

    let parsed: StandardJsonOutput = serde_json::from_slice(&output.stdout).map_err(|e| {
        ProvisionError::CompilationFailed(vec![format!("unreadable compiler output: {e}")])
    })?;

    let errors: Vec<String> = parsed
        .errors
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.rendered().to_string())
        .collect();
    if !errors.is_empty() {
        return Err(ProvisionError::CompilationFailed(errors));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_selects_every_artifact_of_every_contract() {
        let mut sources = BTreeMap::new();
        sources.insert("Token.sol".to_string(), "contract Token {}".to_string());
        let input = StandardJsonInput::solidity(sources);

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["language"], "Solidity");
        assert_eq!(json["sources"]["Token.sol"]["content"], "contract Token {}");
        assert_eq!(json["settings"]["outputSelection"]["*"]["*"][0], "*");
    }

    #[test]
    fn output_parses_contracts_and_diagnostics() {
        let raw = serde_json::json!({
            "errors": [
                { "severity": "warning", "message": "unused variable" },
                {
                    "severity": "error",
                    "message": "expected ';'",
                    "formattedMessage": "Token.sol:3: expected ';'"
                }
            ],
            "contracts": {
                "Token.sol": {
                    "Token": {
                        "abi": [],
                        "evm": { "bytecode": { "object": "6001" } }
                    }
                }
            }
        });
        let output: StandardJsonOutput = serde_json::from_value(raw).unwrap();

        let errors: Vec<_> = output.errors.iter().filter(|d| d.is_error()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rendered(), "Token.sol:3: expected ';'");
        assert_eq!(
            output.contracts["Token.sol"]["Token"].evm.bytecode.object,
            "6001"
        );
    }

    #[tokio::test]
    async fn missing_binary_reports_compilation_failure() {
        let input = StandardJsonInput::solidity(BTreeMap::new());
        let err = run_solc("/nonexistent/solc-binary", &input)
            .await
            .unwrap_err();

        match err {
            ProvisionError::CompilationFailed(messages) => {
                assert!(messages[0].contains("/nonexistent/solc-binary"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
