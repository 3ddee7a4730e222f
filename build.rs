//! Build script for the tier list CLI.
//!
//! Copies `.env.example` from the crate root into the user's local data
//! directory, next to where the application looks for its `.env` file:
//!
//! - Linux: `~/.local/share/tierlistify/.env.example`
//! - macOS: `~/Library/Application Support/tierlistify/.env.example`
//! - Windows: `%LOCALAPPDATA%/tierlistify/.env.example`
//!
//! Nothing here fails the build: a missing template or an unwritable data
//! directory only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=.env.example");

    if let Err(e) = copy_env_example() {
        println!("cargo:warning=could not install .env.example: {}", e);
    }
}

fn copy_env_example() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("tierlistify");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
