//! Source archive extraction.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

/// Extract a gzip-compressed tarball to a destination directory.
///
/// Entries with absolute paths or `..` components are rejected before
/// anything is written for them, as are entries that would be written
/// through a symlink unpacked earlier. Permission bits are preserved, so the
/// unpacked `configure` script stays executable.
pub fn extract_tarball(data: &[u8], dest: &Path) -> io::Result<()> {
    let decoder = GzDecoder::new(Cursor::new(data));
    let mut archive = Archive::new(decoder);
    archive.set_preserve_permissions(true);

    fs::create_dir_all(dest)?;
    let canonical_dest = dest.canonicalize()?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();

        if !is_contained(&entry_path) || passes_through_symlink(dest, &entry_path)? {
            return Err(escapes_destination(&entry_path));
        }

        let output_path = dest.join(&entry_path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
            if !parent.canonicalize()?.starts_with(&canonical_dest) {
                return Err(escapes_destination(&entry_path));
            }
        }

        let entry_type = entry.header().entry_type();
        match entry_type {
            tar::EntryType::Directory => {
                fs::create_dir_all(&output_path)?;
            }
            tar::EntryType::Regular
            | tar::EntryType::Continuous
            | tar::EntryType::Link
            | tar::EntryType::Symlink => {
                entry.unpack(&output_path)?;
            }
            _ => {
                tracing::debug!(
                    "Skipping unsupported entry type {:?}: {}",
                    entry_type,
                    entry_path.display()
                );
            }
        }
    }

    Ok(())
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Whether any already-extracted prefix of `entry_path` under `dest` is a symlink.
fn passes_through_symlink(dest: &Path, entry_path: &Path) -> io::Result<bool> {
    let mut current = dest.to_path_buf();
    for component in entry_path.components() {
        current.push(component);
        match fs::symlink_metadata(&current) {
            Ok(meta) if meta.file_type().is_symlink() => return Ok(true),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}

fn escapes_destination(entry_path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!(
            "tarball entry escapes destination directory: {}",
            entry_path.display()
        ),
    )
}

/// Find the directory holding the `configure` script.
///
/// Release tarballs usually wrap everything in a single versioned directory
/// (`clustal-omega-1.2.4/`), so one level of nesting is searched.
pub fn find_configure_root(dir: &Path) -> io::Result<Option<PathBuf>> {
    if dir.join("configure").is_file() {
        return Ok(Some(dir.to_path_buf()));
    }

    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            subdirs.push(entry.path());
        }
    }

    if let [only] = subdirs.as_slice() {
        if only.join("configure").is_file() {
            return Ok(Some(only.clone()));
        }
    }

    Ok(None)
}
