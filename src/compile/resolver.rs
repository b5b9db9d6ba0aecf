// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Chain Provisioner Contributors

//! Import resolution for Solidity source files.
//!
//! Resolution is a two-tier pipeline:
//!
//! 1. **module resolution** - relative specifiers resolve against the
//!    importing file's directory; bare specifiers are treated as package
//!    paths and searched in `node_modules/` directories walking up the
//!    importing file's ancestor chain (conventional package resolution);
//! 2. **relative fallback** - if module resolution fails, retry with the
//!    specifier prefixed as `./<specifier>`. Some compiler front ends strip
//!    the relative-path marker from import specifiers, which would otherwise
//!    misclassify intra-project relative imports as package imports.
//!
//! If both tiers fail, the second error propagates.

use std::path::{Path, PathBuf};

/// Failure of one resolution tier.
#[derive(Debug, thiserror::Error)]
#[error("cannot resolve import '{specifier}' from '{}'", base_dir.display())]
pub struct ResolveError {
    pub specifier: String,
    pub base_dir: PathBuf,
}

/// Resolve an import specifier to a filesystem path, applying the relative
/// fallback when module resolution fails.
pub fn resolve_import(specifier: &str, base_dir: &Path) -> Result<PathBuf, ResolveError> {
    match resolve_module(specifier, base_dir) {
        Ok(path) => Ok(path),
        Err(_) => {
            let local = format!("./{specifier}");
            resolve_module(&local, base_dir)
        }
    }
}

/// Tier one: module-style resolution.
pub fn resolve_module(specifier: &str, base_dir: &Path) -> Result<PathBuf, ResolveError> {
    let not_found = || ResolveError {
        specifier: specifier.to_string(),
        base_dir: base_dir.to_path_buf(),
    };

    if Path::new(specifier).is_absolute() {
        let candidate = PathBuf::from(specifier);
        return if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(not_found())
        };
    }

    if specifier.starts_with("./") || specifier.starts_with("../") {
        let candidate = base_dir.join(specifier);
        return if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(not_found())
        };
    }

    // Bare specifier: search node_modules in the ancestor chain.
    for ancestor in base_dir.ancestors() {
        let candidate = ancestor.join("node_modules").join(specifier);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    Err(not_found())
}

/// Source-unit name of an import, following the compiler's semantics:
/// relative specifiers normalize against the importing unit's name, bare
/// specifiers are kept verbatim.
pub fn source_unit_name(importing_unit: &str, specifier: &str) -> String {
    if !specifier.starts_with("./") && !specifier.starts_with("../") {
        return specifier.to_string();
    }

    let mut segments: Vec<&str> = importing_unit.split('/').collect();
    segments.pop(); // drop the importing unit's file name

    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Extract the import specifiers from a Solidity source.
pub fn parse_imports(source: &str) -> Vec<String> {
    let stripped = strip_comments(source);
    let mut specifiers = Vec::new();
    let mut rest = stripped.as_str();

    while let Some(pos) = rest.find("import") {
        let before_ok = pos == 0
            || !rest[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
        let after = &rest[pos + "import".len()..];
        let after_ok = !after
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');

        if before_ok && after_ok {
            if let Some(end) = after.find(';') {
                if let Some(spec) = quoted_literal(&after[..end]) {
                    specifiers.push(spec);
                }
                rest = &after[end..];
                continue;
            }
        }
        rest = &rest[pos + "import".len()..];
    }

    specifiers
}

/// The last quoted literal in an import statement, covering both
/// `import "a.sol";` and `import {X} from "a.sol";`.
fn quoted_literal(statement: &str) -> Option<String> {
    for quote in ['"', '\''] {
        let mut parts = statement.split(quote);
        let _prefix = parts.next()?;
        let mut last = None;
        while let (Some(literal), Some(_)) = (parts.next(), parts.next()) {
            last = Some(literal);
        }
        if let Some(literal) = last {
            return Some(literal.to_string());
        }
    }
    None
}

fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' {
            match chars.peek() {
                Some('/') => {
                    // Skip to the newline; the newline itself is kept.
                    while let Some(&c2) = chars.peek() {
                        if c2 == '\n' {
                            break;
                        }
                        chars.next();
                    }
                    continue;
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for c2 in chars.by_ref() {
                        if prev == '*' && c2 == '/' {
                            break;
                        }
                        prev = c2;
                    }
                    out.push(' ');
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}
