//! Artifact assembly, validation and file writing.
//!
//! This module handles the final phase of generation: building one artifact
//! per enabled lookup operation plus the support module, validating each one,
//! optionally formatting it, and writing the set to disk one file at a time.
//!
//! ## Output Structure
//!
//! ```text
//! <output>/<module_name>/
//! ├── mod.rs          # EnumLookupError, SUPPORTED_ENUM_TAGS, re-exports
//! ├── name_lookup.rs  # <d>_name helpers + enum_name
//! ├── value_table.rs  # <d>_values helpers + enum_values
//! └── try_parse.rs    # <d>_try_parse helpers + try_parse_enum
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: every artifact is parsed with `syn` before it is returned
//! - **Generate first**: nothing is written unless every artifact generated
//! - **Atomic files**: each file is replaced by temp file + rename, so readers
//!   never see a half-written file. The set as a whole is not atomic: an I/O
//!   failure partway through can leave earlier files already updated.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::codegen::{generate_operation, generate_support_module};
use crate::config::{LookupOperation, ReflectConfig};
use crate::errors::{ReflectError, Result};
use crate::model::ResolvedEnum;
use crate::resolver::resolve_all;
use crate::source::EnumSource;
use crate::validation::validate_batch;

/// Notice prepended to every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by enum-reflector. Do not edit manually.\n\n";

/// What a generated artifact contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// The generated `mod.rs`.
    Support,
    /// One lookup operation for every enum.
    Operation(LookupOperation),
}

impl ArtifactKind {
    /// Stable key used to group and name the artifact.
    pub fn grouping_key(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Operation(operation) => operation.module_name(),
        }
    }

    pub fn file_name(self) -> String {
        match self {
            Self::Support => "mod.rs".to_string(),
            Self::Operation(operation) => format!("{}.rs", operation.module_name()),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.grouping_key())
    }
}

/// One validated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    /// File name relative to the module directory.
    pub file_name: String,
    /// Complete file contents, notice included.
    pub text: String,
}

/// Validates generated code by parsing it as a Rust file.
///
/// ## Errors
///
/// Returns `ReflectError::CodeGenError` if the code fails to parse.
pub fn validate_code(code: &str) -> Result<syn::File> {
    syn::parse_file(code)
        .map_err(|e| ReflectError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Produces the final text of a validated file.
///
/// With `pretty` the parsed file is re-printed by `prettyplease`; otherwise the
/// writer's own layout is kept. Either way the generated notice comes first.
pub fn format_code(code: &str, file: &syn::File, pretty: bool) -> String {
    if pretty {
        format!("{}{}", GENERATED_NOTICE, prettyplease::unparse(file))
    } else {
        format!("{}{}", GENERATED_NOTICE, code)
    }
}

fn build_artifact(
    kind: ArtifactKind,
    enums: &[ResolvedEnum],
    config: &ReflectConfig,
) -> Result<GeneratedArtifact> {
    let code = match kind {
        ArtifactKind::Support => generate_support_module(enums, config),
        ArtifactKind::Operation(operation) => generate_operation(operation, enums, config)?,
    };

    let file = validate_code(&code)?;
    let text = format_code(&code, &file, config.pretty);
    debug!(artifact = %kind, bytes = text.len(), "generated artifact");

    Ok(GeneratedArtifact {
        kind,
        file_name: kind.file_name(),
        text,
    })
}

/// Generates every artifact for `enums`.
///
/// Enabled operations come first in their canonical order, followed by the
/// support module. Each entry succeeds or fails on its own.
///
/// ## Errors
///
/// The outer `Result` fails, producing no artifacts at all, when the
/// configuration is invalid or a fully qualified enum name is listed twice.
/// An enum name that cannot become a discriminator fails each operation
/// artifact.
pub fn generate_artifacts(
    enums: &[ResolvedEnum],
    config: &ReflectConfig,
) -> Result<Vec<Result<GeneratedArtifact>>> {
    config.validate()?;
    validate_batch(enums)?;

    let kinds = config
        .enabled_operations()
        .into_iter()
        .map(ArtifactKind::Operation)
        .chain(std::iter::once(ArtifactKind::Support));

    Ok(kinds.map(|kind| build_artifact(kind, enums, config)).collect())
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `ReflectError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ReflectError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| ReflectError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ReflectError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Writes artifacts into `dir`, or prints them when `dry_run` is set.
///
/// Returns the paths that were (or would have been) written. Files are
/// written in order; on error the ones before it stay written.
pub fn write_artifacts(
    dir: &Path,
    artifacts: &[GeneratedArtifact],
    dry_run: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(artifacts.len());

    for artifact in artifacts {
        let path = dir.join(&artifact.file_name);
        if dry_run {
            println!("=== {} ===\n{}\n", artifact.file_name, artifact.text);
        } else {
            write_atomic(&path, &artifact.text)?;
            info!(path = %path.display(), "wrote artifact");
        }
        written.push(path);
    }

    Ok(written)
}

/// Generates all artifacts and writes them to `<output_dir>/<module_name>/`.
///
/// ## Errors
///
/// Returns the first artifact failure before anything is written, so a
/// generation error never touches the module directory. Write errors follow
/// [`write_artifacts`].
pub fn generate_and_write(
    enums: &[ResolvedEnum],
    config: &ReflectConfig,
    output_dir: &Path,
    dry_run: bool,
) -> Result<Vec<GeneratedArtifact>> {
    let artifacts = generate_artifacts(enums, config)?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    write_artifacts(&output_dir.join(&config.module_name), &artifacts, dry_run)?;
    Ok(artifacts)
}

/// An enum left out of a run, with the reason.
#[derive(Debug)]
pub struct SkippedEnum {
    pub name: String,
    pub error: ReflectError,
}

/// Outcome of running the whole pipeline over a front end.
#[derive(Debug)]
pub struct GenerationReport {
    /// Successfully resolved enums, in discovery order.
    pub resolved: Vec<ResolvedEnum>,
    /// Enums that failed resolution or repeat an earlier name, absent from
    /// every artifact.
    pub skipped: Vec<SkippedEnum>,
    pub artifacts: Vec<GeneratedArtifact>,
}

/// Resolved view of a report, for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ReportSummary<'a> {
    pub resolved: &'a [ResolvedEnum],
    pub skipped: Vec<(&'a str, String)>,
    pub files: Vec<&'a str>,
}

impl GenerationReport {
    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            resolved: &self.resolved,
            skipped: self
                .skipped
                .iter()
                .map(|skipped| (skipped.name.as_str(), skipped.error.to_string()))
                .collect(),
            files: self
                .artifacts
                .iter()
                .map(|artifact| artifact.file_name.as_str())
                .collect(),
        }
    }
}

/// Lists, resolves and generates in one pass.
///
/// Enums that fail resolution, and later repeats of an already listed name,
/// are reported in `skipped` and left out of the artifacts; the rest of the
/// batch is unaffected. Nothing is written.
///
/// ## Errors
///
/// Fails if the front end cannot list its enums, or if any artifact fails to
/// generate.
pub fn generate_from_source(
    source: &dyn EnumSource,
    config: &ReflectConfig,
) -> Result<GenerationReport> {
    let descriptors = source.list_enums_with_marker()?;

    let mut resolved = Vec::new();
    let mut skipped = Vec::new();
    let mut seen = HashSet::new();
    for (descriptor, outcome) in descriptors.iter().zip(resolve_all(&descriptors)) {
        if !seen.insert(descriptor.name.as_str()) {
            skipped.push(SkippedEnum {
                name: descriptor.name.clone(),
                error: ReflectError::DuplicateEnum {
                    name: descriptor.name.clone(),
                },
            });
            continue;
        }
        match outcome {
            Ok(resolved_enum) => resolved.push(resolved_enum),
            Err(error) => skipped.push(SkippedEnum {
                name: descriptor.name.clone(),
                error,
            }),
        }
    }

    let artifacts = generate_artifacts(&resolved, config)?
        .into_iter()
        .collect::<Result<Vec<_>>>()?;

    info!(
        resolved = resolved.len(),
        skipped = skipped.len(),
        artifacts = artifacts.len(),
        "generation complete"
    );

    Ok(GenerationReport {
        resolved,
        skipped,
        artifacts,
    })
}
