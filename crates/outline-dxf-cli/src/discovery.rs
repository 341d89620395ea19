//! Locating the outline Gerber and drill files of a KiCad-style export.

use std::fs;
use std::path::{Path, PathBuf};

use outline_dxf::ConvertError;

const EDGE_CUTS_SUFFIX: &str = "-Edge_Cuts.gbr";
const PTH_SUFFIX: &str = "-PTH.drl";
const NPTH_SUFFIX: &str = "-NPTH.drl";
const GERBER_EXTENSION: &str = ".gbr";
const PROFILE_MARKERS: [&str; 2] = ["FileFunction,Profile", "AperFunction,Profile"];
const OUTPUT_SUFFIX: &str = "-outline-mounting-holes.dxf";

/// Files picked from one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    /// Board outline Gerber.
    pub outline: PathBuf,
    /// Plated drill file, if present.
    pub pth: Option<PathBuf>,
    /// Non-plated drill file, if present.
    pub npth: Option<PathBuf>,
}

impl Inputs {
    /// Drill files in processing order: plated first.
    pub fn drills(&self) -> impl Iterator<Item = &Path> {
        self.pth.iter().chain(self.npth.iter()).map(PathBuf::as_path)
    }
}

/// Find the outline and drill files in `dir`.
///
/// The outline is the first `*-Edge_Cuts.gbr` by name, falling back to the
/// first `*.gbr` whose contents declare a profile function.
pub fn discover(dir: &Path) -> Result<Inputs, ConvertError> {
    let entries = sorted_files(dir)?;

    let outline = match first_with_suffix(&entries, EDGE_CUTS_SUFFIX) {
        Some(path) => path,
        None => find_profile_gerber(&entries)?
            .ok_or_else(|| ConvertError::NoOutline(dir.to_path_buf()))?,
    };

    Ok(Inputs {
        outline,
        pth: first_with_suffix(&entries, PTH_SUFFIX),
        npth: first_with_suffix(&entries, NPTH_SUFFIX),
    })
}

/// Read a file as text, replacing invalid UTF-8.
pub fn read_lossy(path: &Path) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `<project>-outline-mounting-holes.dxf` next to the outline file.
pub fn output_path(outline: &Path) -> PathBuf {
    let name = outline
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let project = strip_suffix_ignore_case(&name, EDGE_CUTS_SUFFIX).map_or_else(
        || {
            outline
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        },
        str::to_string,
    );

    outline.with_file_name(format!("{project}{OUTPUT_SUFFIX}"))
}

fn sorted_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let io_err = |source: std::io::Error| ConvertError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn file_name_ends_with(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(suffix))
}

fn first_with_suffix(entries: &[PathBuf], suffix: &str) -> Option<PathBuf> {
    entries
        .iter()
        .find(|path| file_name_ends_with(path, suffix))
        .cloned()
}

fn find_profile_gerber(entries: &[PathBuf]) -> Result<Option<PathBuf>, ConvertError> {
    for path in entries.iter().filter(|p| file_name_ends_with(p, GERBER_EXTENSION)) {
        let text = read_lossy(path)?;
        if PROFILE_MARKERS.iter().any(|marker| text.contains(marker)) {
            return Ok(Some(path.clone()));
        }
    }
    Ok(None)
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        name.get(..split)
    } else {
        None
    }
}
