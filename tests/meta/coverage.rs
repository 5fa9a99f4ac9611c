#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";

    /// Relative paths of every directory and `.rs` file below `base`
    fn tree(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        walk(base, base, &mut paths)?;
        Ok(paths)
    }

    fn walk(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let Ok(relative) = path.strip_prefix(base) else {
                return Err(io::Error::other("entry outside of base directory"));
            };
            let relative = relative.to_string_lossy().replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                walk(&path, base, paths)?;
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    // Crate roots and module declaration files have no mirror of their own
    fn is_structural(path: &str) -> bool {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        matches!(file_name, "mod.rs" | "main.rs" | "lib.rs")
    }

    fn listing(paths: &[&String], from: &str, to: &str) -> String {
        paths
            .iter()
            .map(|path| format!("  - {from}/{path} -> {to}/{path}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = tree(Path::new(SRC_DIR)).unwrap();
        let unit = tree(Path::new(UNIT_DIR)).unwrap_or_default();

        let missing: Vec<&String> = src
            .iter()
            .filter(|path| !is_structural(path) && !unit.contains(*path))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without a unit test counterpart:\n{}",
            listing(&missing, SRC_DIR, UNIT_DIR)
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = tree(Path::new(SRC_DIR)).unwrap();
        let unit = tree(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<&String> = unit
            .iter()
            .filter(|path| !is_structural(path) && !src.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files whose source is gone:\n{}",
            listing(&orphaned, UNIT_DIR, SRC_DIR)
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let tests = tree(Path::new("tests")).unwrap();

        let empty: Vec<&String> = tests
            .iter()
            .filter(|path| path.ends_with(".rs") && !is_structural(path))
            .filter(|path| {
                fs::read_to_string(Path::new("tests").join(path))
                    .map_or(true, |content| !content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without any #[test] function:\n{}",
            empty
                .iter()
                .map(|path| format!("  - tests/{path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    #[test]
    fn test_every_algorithm_module_is_registered() {
        let engine = fs::read_to_string("src/algorithm/engine.rs").unwrap();
        let modules = tree(Path::new("src/algorithm")).unwrap();

        // Every generator module is imported by the engine
        let unregistered: Vec<&String> = modules
            .iter()
            .filter(|path| !matches!(path.as_str(), "mod.rs" | "engine.rs" | "kind.rs"))
            .filter(|path| {
                let module = path.trim_end_matches(".rs");
                !engine.contains(&format!("crate::algorithm::{module}::"))
            })
            .collect();

        assert!(
            unregistered.is_empty(),
            "Algorithm modules the engine never builds:\n{}",
            listing(&unregistered, "src/algorithm", "src/algorithm/engine.rs")
        );
    }
}
