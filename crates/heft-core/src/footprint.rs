use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::classify::FileClassifier;
use crate::config::Config;
use crate::measure;
use crate::provision::{Environment, Inspector};
use crate::types::{
    BinaryArtifact, BinaryGroup, FileKind, FootprintReport, FootprintSummary, LineCount, LocEntry,
};

/// A file scheduled for measurement, after ownership resolution.
#[derive(Debug)]
struct ResolvedFile {
    package: String,
    rel_path: PathBuf,
    abs_path: PathBuf,
    kind: FileKind,
}

/// Outcome of measuring one resolved file.
enum Measurement {
    Source { package: String, lines: LineCount },
    Binary { package: String, artifact: BinaryArtifact },
    Skipped,
}

/// Per-package totals folded from individual measurements.
///
/// Code-line totals are summed per package, so the fold is commutative and
/// the result does not depend on measurement order. Artifact lists keep the
/// order in which measurements are absorbed.
#[derive(Default)]
struct FootprintAccumulator {
    code_lines: HashMap<String, u64>,
    binaries: BTreeMap<String, Vec<BinaryArtifact>>,
    source_files: usize,
    binary_files: usize,
    skipped_files: usize,
}

impl FootprintAccumulator {
    fn absorb(&mut self, measurement: Measurement) {
        match measurement {
            Measurement::Source { package, lines } => {
                *self.code_lines.entry(package).or_default() += lines.code;
                self.source_files += 1;
            }
            Measurement::Binary { package, artifact } => {
                self.binaries.entry(package).or_default().push(artifact);
                self.binary_files += 1;
            }
            Measurement::Skipped => {
                self.skipped_files += 1;
            }
        }
    }

    fn into_report(self, package_count: usize) -> FootprintReport {
        let mut loc: Vec<LocEntry> = self
            .code_lines
            .into_iter()
            .map(|(package, code_lines)| LocEntry {
                package,
                code_lines,
            })
            .collect();
        // Descending by count; equal counts ordered by package name so the
        // ranking is reproducible across runs.
        loc.sort_by(|a, b| {
            b.code_lines
                .cmp(&a.code_lines)
                .then_with(|| a.package.cmp(&b.package))
        });

        let binaries: Vec<BinaryGroup> = self
            .binaries
            .into_iter()
            .map(|(package, artifacts)| BinaryGroup { package, artifacts })
            .collect();

        FootprintReport {
            loc,
            binaries,
            summary: FootprintSummary {
                package_count,
                source_file_count: self.source_files,
                binary_file_count: self.binary_files,
                skipped_file_count: self.skipped_files,
            },
        }
    }
}

/// Turns an inspected environment into a ranked footprint report.
///
/// Three linear stages: resolve file ownership and classification, measure
/// each file, fold the measurements into per-package totals. Measurement is
/// parallel across files; per-file failures are warnings, never fatal.
pub struct FootprintPipeline {
    classifier: FileClassifier,
    comment_prefix: String,
}

impl FootprintPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: FileClassifier::new(&config.classify),
            comment_prefix: config.classify.comment_prefix.clone(),
        }
    }

    /// Run the full pipeline against a provisioned environment.
    pub fn run(&self, inspector: &dyn Inspector, env: &Environment) -> Result<FootprintReport> {
        let install_root = inspector
            .install_root(env)
            .context("failed to locate the environment's install root")?;

        let mut packages = inspector
            .list_packages(env)
            .context("failed to enumerate installed packages")?;
        packages.sort();
        packages.dedup();

        let resolved = self.resolve(inspector, env, &install_root, &packages);

        let measurements: Vec<Measurement> = resolved
            .par_iter()
            .map(|file| self.measure_file(file))
            .collect();

        let mut acc = FootprintAccumulator::default();
        for m in measurements {
            acc.absorb(m);
        }

        Ok(acc.into_report(packages.len()))
    }

    /// Join each package's relative paths with the install root and classify
    /// them. `Other` files are dropped here. When two packages claim the same
    /// relative path the later claimant wins; packages arrive name-sorted, so
    /// the winner is deterministic.
    fn resolve(
        &self,
        inspector: &dyn Inspector,
        env: &Environment,
        install_root: &Path,
        packages: &[String],
    ) -> Vec<ResolvedFile> {
        let mut slots: Vec<Option<ResolvedFile>> = Vec::new();
        let mut claims: HashMap<PathBuf, usize> = HashMap::new();

        for package in packages {
            let files = match inspector.files_owned_by(env, package) {
                Ok(files) => files,
                Err(e) => {
                    eprintln!("Warning: skipping package '{package}': {e}");
                    continue;
                }
            };

            for rel_path in files {
                let kind = self.classifier.classify(&rel_path);
                if kind == FileKind::Other {
                    continue;
                }
                if let Some(&previous) = claims.get(&rel_path) {
                    slots[previous] = None;
                }
                let abs_path = install_root.join(&rel_path);
                claims.insert(rel_path.clone(), slots.len());
                slots.push(Some(ResolvedFile {
                    package: package.clone(),
                    rel_path,
                    abs_path,
                    kind,
                }));
            }
        }

        slots.into_iter().flatten().collect()
    }

    fn measure_file(&self, file: &ResolvedFile) -> Measurement {
        match file.kind {
            FileKind::Source => match measure::count_lines(&file.abs_path, &self.comment_prefix) {
                Ok(lines) => Measurement::Source {
                    package: file.package.clone(),
                    lines,
                },
                Err(e) => {
                    eprintln!("Warning: failed to read {}: {e}", file.abs_path.display());
                    Measurement::Skipped
                }
            },
            FileKind::NativeBinary => match measure::file_size(&file.abs_path) {
                Ok(size) => Measurement::Binary {
                    package: file.package.clone(),
                    artifact: BinaryArtifact {
                        path: file.rel_path.clone(),
                        size,
                    },
                },
                Err(e) => {
                    eprintln!("Warning: failed to stat {}: {e}", file.abs_path.display());
                    Measurement::Skipped
                }
            },
            // `resolve` never emits Other files.
            FileKind::Other => Measurement::Skipped,
        }
    }
}
