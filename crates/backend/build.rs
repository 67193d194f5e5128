use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Копирует config.toml и migrations/ из корня workspace рядом с бинарником
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");
    println!("cargo:rerun-if-changed=../../migrations");

    let out_dir = env::var("OUT_DIR").unwrap();
    let profile = env::var("PROFILE").unwrap();

    // OUT_DIR: target/<profile>/build/backend-xxx/out
    let target_dir = Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
        .expect("Could not find target profile directory");

    let workspace_root: PathBuf = Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .expect("Could not find workspace root");

    let source_config = workspace_root.join("config.toml");
    if source_config.exists() {
        fs::copy(&source_config, target_dir.join("config.toml"))
            .unwrap_or_else(|e| panic!("Failed to copy config.toml: {}", e));
    } else {
        println!(
            "cargo:warning=config.toml not found at {:?}, using default config",
            source_config
        );
    }

    let source_migrations = workspace_root.join("migrations");
    if source_migrations.is_dir() {
        let dest = target_dir.join("migrations");
        fs::create_dir_all(&dest).unwrap_or_else(|e| panic!("Failed to create {:?}: {}", dest, e));
        for entry in fs::read_dir(&source_migrations).expect("Failed to read migrations") {
            let path = entry.expect("Failed to read migration entry").path();
            if path.extension().map(|e| e == "sql").unwrap_or(false) {
                if let Some(name) = path.file_name() {
                    fs::copy(&path, dest.join(name))
                        .unwrap_or_else(|e| panic!("Failed to copy {:?}: {}", path, e));
                }
            }
        }
    }
}
