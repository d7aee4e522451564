//! Tech-stack bias: reads declared dependency names from a local
//! `Cargo.toml` so the tech-stack prompt can name what the project
//! actually uses. A missing or unparsable manifest is non-fatal and falls
//! back to unguided generation.

use std::path::Path;

use tracing::debug;

const FALLBACK_INSTRUCTION: &str = "Analyze the repository to identify the main technologies, \
     frameworks, and libraries used. Present them in a list.";

/// Builds the tech-stack prompt instruction from the manifest in the
/// current working directory.
pub fn tech_stack_instruction() -> String {
    instruction_from(Path::new("Cargo.toml"))
}

/// Builds the tech-stack prompt instruction from a specific manifest path.
pub fn instruction_from(manifest_path: &Path) -> String {
    match dependency_names(manifest_path) {
        Some(names) if !names.is_empty() => format!(
            "The project uses the following technologies based on its Cargo.toml: {}. \
             Please create a nicely formatted list or section based on these.",
            names.join(", ")
        ),
        _ => {
            debug!(
                path = ?manifest_path,
                "no manifest dependencies found; using unguided tech stack instruction"
            );
            FALLBACK_INSTRUCTION.to_string()
        }
    }
}

/// Dependency and dev-dependency names, in manifest order per table.
fn dependency_names(path: &Path) -> Option<Vec<String>> {
    let raw = std::fs::read_to_string(path).ok()?;
    let value: toml::Value = raw.parse().ok()?;

    let mut names = Vec::new();
    for table in ["dependencies", "dev-dependencies"] {
        if let Some(deps) = value.get(table).and_then(toml::Value::as_table) {
            names.extend(deps.keys().cloned());
        }
    }
    Some(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn names_declared_dependencies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(
            &path,
            "[package]\nname = \"demo\"\n\n[dependencies]\nserde = \"1\"\ntokio = { version = \"1\", features = [\"macros\"] }\n\n[dev-dependencies]\ntempfile = \"3\"\n",
        )
        .unwrap();

        let instruction = instruction_from(&path);
        assert!(instruction.contains("serde"));
        assert!(instruction.contains("tokio"));
        assert!(instruction.contains("tempfile"));
        assert!(instruction.contains("Cargo.toml"));
    }

    #[test]
    fn missing_manifest_falls_back() {
        let dir = tempdir().unwrap();
        let instruction = instruction_from(&dir.path().join("Cargo.toml"));
        assert_eq!(instruction, FALLBACK_INSTRUCTION);
    }

    #[test]
    fn manifest_without_dependencies_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(&path, "[package]\nname = \"demo\"\n").unwrap();
        assert_eq!(instruction_from(&path), FALLBACK_INSTRUCTION);
    }

    #[test]
    fn unparsable_manifest_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(&path, "not [ valid toml").unwrap();
        assert_eq!(instruction_from(&path), FALLBACK_INSTRUCTION);
    }
}
