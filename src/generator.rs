//! Per-file pipeline: read, classify, render

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::extractors::RouteVarsExtractor;
use crate::file_utils::read_source_file;
use crate::matcher::SignatureMatcher;
use crate::output::{Template, output_path, stub_template, write_companion};
use crate::types::FileClassificationResult;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// A companion file was written to `output`.
    Written {
        output: PathBuf,
        result: FileClassificationResult,
    },
    /// Dry run: `output` is where the companion file would go.
    Planned {
        output: PathBuf,
        result: FileClassificationResult,
    },
    /// The file has no handlers; nothing is written.
    NoHandlers { result: FileClassificationResult },
}

impl FileOutcome {
    pub fn result(&self) -> &FileClassificationResult {
        match self {
            FileOutcome::Written { result, .. }
            | FileOutcome::Planned { result, .. }
            | FileOutcome::NoHandlers { result } => result,
        }
    }
}

/// Processes source files one at a time.
pub struct Generator {
    config: GeneratorConfig,
    matcher: SignatureMatcher,
    template: &'static Template<'static>,
}

impl Generator {
    /// Fails only if the embedded template is broken.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let template = stub_template()?;
        let matcher = SignatureMatcher::new(RouteVarsExtractor::new(config.accessor.clone()));
        Ok(Self {
            config,
            matcher,
            template,
        })
    }

    /// Read and classify one file without writing anything.
    pub fn classify_file(&self, path: &Path) -> Result<FileClassificationResult> {
        let source = read_source_file(path, self.config.max_file_size)?;
        self.matcher.classify_source(path, &source)
    }

    /// Classify `path` and, unless this is a dry run, write its companion
    /// test file.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome> {
        let result = self.classify_file(path)?;
        debug!(
            source = %path.display(),
            package = %result.package_name,
            handlers = result.handlers.len(),
            "classified"
        );

        if result.is_empty() {
            return Ok(FileOutcome::NoHandlers { result });
        }
        if self.config.dry_run {
            let output = output_path(&self.config.out_dir, path);
            return Ok(FileOutcome::Planned { output, result });
        }

        match write_companion(
            self.template,
            &result,
            path,
            &self.config.accessor,
            &self.config.out_dir,
        )? {
            Some(output) => Ok(FileOutcome::Written { output, result }),
            None => Ok(FileOutcome::NoHandlers { result }),
        }
    }
}
