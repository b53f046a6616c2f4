/// A file selected for codebase analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Absolute or caller-relative path, usable for reads.
    pub path: String,
    /// Bare file name.
    pub name: String,
    /// Path relative to the analyzed directory, `/`-separated.
    pub relative_path: String,
    /// Size in bytes.
    pub size: u64,
}

const SRC_ENTRY_FILES: &[&str] = &[
    "App.js",
    "App.jsx",
    "App.tsx",
    "index.js",
    "index.jsx",
    "index.tsx",
];

/// Whether a directory-relative path is one of the core project files
/// worth analyzing: the root manifest, `src/` entry points, and the
/// first-level `components/`, `pages/`, and `styles/` directories.
pub fn is_core_project_file(relative_path: &str) -> bool {
    if relative_path == "package.json" {
        return true;
    }

    let Some(rest) = relative_path.strip_prefix("src/") else {
        return false;
    };

    if SRC_ENTRY_FILES.contains(&rest) {
        return true;
    }

    match rest.split_once('/') {
        Some(("components" | "pages", name)) => {
            !name.contains('/') && has_extension(name, &["js", "jsx", "tsx"])
        }
        Some(("styles", name)) => !name.contains('/') && has_extension(name, &["css", "scss"]),
        _ => false,
    }
}

fn has_extension(name: &str, extensions: &[&str]) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && extensions.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_root_manifest() {
        assert!(is_core_project_file("package.json"));
    }

    #[test]
    fn test_accepts_src_entry_files() {
        assert!(is_core_project_file("src/App.js"));
        assert!(is_core_project_file("src/App.tsx"));
        assert!(is_core_project_file("src/index.jsx"));
    }

    #[test]
    fn test_accepts_component_and_page_scripts() {
        assert!(is_core_project_file("src/components/Button.jsx"));
        assert!(is_core_project_file("src/pages/Home.tsx"));
        assert!(is_core_project_file("src/components/nav.js"));
    }

    #[test]
    fn test_accepts_stylesheets() {
        assert!(is_core_project_file("src/styles/app.css"));
        assert!(is_core_project_file("src/styles/theme.scss"));
    }

    #[test]
    fn test_rejects_everything_else() {
        assert!(!is_core_project_file("README.md"));
        assert!(!is_core_project_file("src/other.js"));
        assert!(!is_core_project_file("src/styles/app.js"));
        assert!(!is_core_project_file("src/components/nested/Button.jsx"));
        assert!(!is_core_project_file("components/Button.jsx"));
        assert!(!is_core_project_file("package.json.bak"));
    }

    #[test]
    fn test_rejects_extension_only_names() {
        assert!(!is_core_project_file("src/components/.jsx"));
    }
}
