//! Writing companion test files

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::naming::output_path;
use super::template::{RenderContext, Template};
use crate::error::{Error, Result};
use crate::extractors::AccessorSpec;
use crate::types::FileClassificationResult;

/// Build the render context for one classified file.
pub fn render_context<'a>(
    result: &'a FileClassificationResult,
    source: &Path,
    accessor: &AccessorSpec,
) -> RenderContext<'a> {
    RenderContext {
        source: source.display().to_string(),
        package: &result.package_name,
        accessor: accessor.to_string(),
        handler_names: result.handler_names(),
        route_variables: result.route_variables(),
        handlers: &result.handlers,
    }
}

/// Render the companion document for `result` into a string.
pub fn render_to_string(
    template: &Template<'_>,
    result: &FileClassificationResult,
    source: &Path,
    accessor: &AccessorSpec,
) -> Result<String> {
    template
        .render_to_string(&render_context(result, source, accessor))
        .map_err(|e| Error::Render {
            path: source.to_path_buf(),
            source: e,
        })
}

/// Write the companion test file for `source` into `out_dir`.
///
/// Returns `Ok(None)` without touching the filesystem when `result` has no
/// handlers. An existing file at the destination is overwritten.
///
/// # Errors
///
/// - `Error::OutputCreation` if the destination cannot be created; the
///   caller may continue with other files.
/// - `Error::Render` if writing or flushing fails part way.
pub fn write_companion(
    template: &Template<'_>,
    result: &FileClassificationResult,
    source: &Path,
    accessor: &AccessorSpec,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    if result.is_empty() {
        return Ok(None);
    }

    let dest = output_path(out_dir, source);
    let file = File::create(&dest).map_err(|e| Error::OutputCreation {
        path: dest.clone(),
        source: e,
    })?;

    // The writer (and the file handle) is dropped on every path out of here
    render_into(
        template,
        &render_context(result, source, accessor),
        &dest,
        BufWriter::new(file),
    )?;

    info!(
        output = %dest.display(),
        handlers = result.handlers.len(),
        "wrote test stub"
    );
    Ok(Some(dest))
}

/// Fill `template` into `out` and flush it. Any I/O failure is an
/// `Error::Render` against `dest`.
fn render_into<W: Write>(
    template: &Template<'_>,
    ctx: &RenderContext<'_>,
    dest: &Path,
    mut out: W,
) -> Result<()> {
    let render_error = |e| Error::Render {
        path: dest.to_path_buf(),
        source: e,
    };
    template.render(ctx, &mut out).map_err(render_error)?;
    out.flush().map_err(render_error)
}
