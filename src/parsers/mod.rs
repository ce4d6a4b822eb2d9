pub mod kotlin;

use crate::syntax::SyntaxTree;
use std::path::Path;

// Trait implemented by each grammar frontend: parse one file's text and
// lower it into the shared typed syntax subset. Parse failure is reported
// as None; callers treat it as a recoverable, per-file condition.
pub trait GrammarFrontend {
    fn parse(&self, content: &str) -> Option<SyntaxTree>;
}

// Factory mapping a file extension to its frontend. Extensions match
// case-sensitively; unknown extensions are a routing miss, not an error.
// New languages plug in here without touching the walker.
pub fn for_extension(extension: &str) -> Option<Box<dyn GrammarFrontend>> {
    match extension {
        "kt" | "kts" => Some(Box::new(kotlin::KotlinFrontend::new())),
        _ => None,
    }
}

pub fn for_path(file_path: &Path) -> Option<Box<dyn GrammarFrontend>> {
    let extension = file_path.extension().and_then(|e| e.to_str())?;
    for_extension(extension)
}

pub fn supported_extensions() -> Vec<&'static str> {
    vec!["kt", "kts"]
}
