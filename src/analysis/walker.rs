use crate::analysis::extractor::extract_declarations;
use crate::model::Analysis;
use crate::parsers;
use log::{debug, info, trace, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Analyzes every supported file under `root_path` (or the single file it
/// names) and flattens the per-file results into one entity list.
///
/// A missing or unreadable root is the one fatal condition and is reported
/// upward; everything at file granularity is skip-and-continue. Files are
/// analyzed in parallel, but the ordered collect keeps the flattened
/// output deterministic within a run.
pub fn analyze_source_root(root_path: &Path, num_threads: usize) -> io::Result<Vec<Analysis>> {
    if !root_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source root does not exist: {:?}", root_path),
        ));
    }

    if !root_path.is_dir() {
        // A root naming one file must be readable; unlike files met during
        // a directory walk, a read failure here is a caller error.
        let content = fs::read_to_string(root_path)?;
        return Ok(analyze_file(root_path, &content));
    }

    let files = collect_candidate_files(root_path)?;

    info!(
        "Found {} candidate files under {:?}",
        files.len(),
        root_path
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let per_file: Vec<Vec<Analysis>> =
        pool.install(|| files.par_iter().map(|path| analyze_path(path)).collect());

    let analyses: Vec<Analysis> = per_file.into_iter().flatten().collect();
    info!(
        "Extracted {} entities from {:?}",
        analyses.len(),
        root_path
    );

    Ok(analyses)
}

fn collect_candidate_files(root_path: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut visited = HashSet::new();
    let supported: HashSet<&str> = parsers::supported_extensions().into_iter().collect();

    // Sorted walk makes the enumeration order stable within one run.
    for entry in WalkDir::new(root_path).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            // An error at depth zero means the root itself is unreadable.
            Err(e) if e.depth() == 0 => {
                return Err(io::Error::new(io::ErrorKind::Other, e));
            }
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", root_path, e);
                continue;
            }
        };

        let path = entry.path();
        if entry.file_type().is_dir() {
            continue;
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if supported.contains(ext) => {}
            _ => {
                trace!("Skipping unsupported file: {:?}", path);
                continue;
            }
        }

        // Symlinked files are allowed; resolving them also keeps the same
        // target from being analyzed twice.
        let canonical_path = match fs::canonicalize(path) {
            Ok(p) => p,
            Err(e) => {
                warn!("Failed to canonicalize path {:?}: {}", path, e);
                continue;
            }
        };

        if !canonical_path.is_file() {
            trace!("Skipping non-regular file: {:?}", path);
            continue;
        }

        if !visited.insert(canonical_path) {
            trace!("Skipping already visited file: {:?}", path);
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn analyze_path(path: &Path) -> Vec<Analysis> {
    debug!("Processing file: {:?}", path);

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read file {:?}: {}", path, e);
            return Vec::new();
        }
    };

    analyze_file(path, &content)
}

/// Routes one file's text to the frontend registered for its extension and
/// extracts declarations from the lowered tree. Unknown extensions and
/// parse failures both contribute an empty sequence; neither aborts the
/// run.
pub fn analyze_file(path: &Path, content: &str) -> Vec<Analysis> {
    let Some(frontend) = parsers::for_path(path) else {
        trace!("No analyzer registered for {:?}", path);
        return Vec::new();
    };

    match frontend.parse(content) {
        Some(tree) => {
            let analyses = extract_declarations(&tree);
            debug!("Extracted {} entities from {:?}", analyses.len(), path);
            analyses
        }
        None => {
            warn!("Failed to parse {:?}; skipping", path);
            Vec::new()
        }
    }
}
