//! Filing package unpacking.
//!
//! A package is a ZIP archive whose `XBRL/PublicDoc` directory holds the
//! instance document of the report. Some packages also carry an abbreviated
//! summary instance marked `-ssr-`, used only when no full instance exists.

use bsheet_core::{ExtractError, ExtractedDocument, FilingId, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

const SUMMARY_MARKER: &str = "-ssr-";

fn is_public_instance(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".xbrl") && name.split(['/', '\\']).any(|part| part == "PublicDoc")
}

/// Picks the primary instance document among archive entry names.
///
/// The first full instance under `PublicDoc` wins, in archive order; a
/// summary variant is returned only when no full one exists.
#[must_use]
pub fn select_primary_document<'a, I>(names: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut summary = None;
    for name in names.into_iter().filter(|n| is_public_instance(n)) {
        if !name.contains(SUMMARY_MARKER) {
            return Some(name);
        }
        if summary.is_none() {
            summary = Some(name);
        }
    }
    summary
}

/// Opens a package archive, failing if the bytes are not a ZIP.
pub(crate) fn open(bytes: &[u8]) -> Result<zip::ZipArchive<Cursor<&[u8]>>> {
    zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::DocumentUnavailable(format!("Invalid package archive: {e}")))
}

/// Unpacks the primary document of a package into a fresh scratch directory.
///
/// # Errors
/// Returns [`ExtractError::DocumentUnavailable`] if the archive cannot be
/// read or written out, and [`ExtractError::StructuredDocumentMissing`] if it
/// holds no instance document.
pub fn unpack_primary_document(filing: &FilingId, bytes: &[u8]) -> Result<ExtractedDocument> {
    let mut archive = open(bytes)?;

    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| {
            archive
                .by_index(i)
                .ok()
                .filter(|f| f.is_file())
                .map(|f| f.name().to_string())
        })
        .collect();

    let primary = select_primary_document(names.iter().map(String::as_str))
        .ok_or_else(|| {
            ExtractError::StructuredDocumentMissing(format!(
                "No instance document in package {filing}"
            ))
        })?
        .to_string();
    debug!(%filing, document = %primary, "Selected primary document");

    let mut contents = Vec::new();
    archive
        .by_name(&primary)
        .and_then(|mut f| f.read_to_end(&mut contents).map_err(Into::into))
        .map_err(|e| ExtractError::DocumentUnavailable(format!("Failed to read {primary}: {e}")))?;

    let file_name = Path::new(&primary)
        .file_name()
        .ok_or_else(|| ExtractError::DocumentUnavailable(format!("Invalid entry name {primary}")))?;

    let workspace = tempfile::Builder::new()
        .prefix("bsheet-")
        .tempdir()
        .map_err(|e| ExtractError::DocumentUnavailable(format!("Failed to create workspace: {e}")))?;
    let path = workspace.path().join(file_name);
    std::fs::write(&path, &contents)
        .map_err(|e| ExtractError::DocumentUnavailable(format!("Failed to write {primary}: {e}")))?;

    Ok(ExtractedDocument::in_workspace(path, workspace))
}
