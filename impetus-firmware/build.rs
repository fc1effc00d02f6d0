//! Build script for impetus-firmware
//!
//! - Sets up linker search paths and scripts for memory.x
//! - Validates watch.toml and embeds it as a postcard blob

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use impetus_core::config::{WatchConfig, MAX_CONFIG_SIZE};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    setup_linker(&out_dir);
    embed_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate watch.toml and write `watch_config.bin` for `include_bytes!`
fn embed_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=watch.toml");

    let config_path = Path::new("watch.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(config_path).unwrap_or_else(|e| {
            fail("Failed to read watch.toml", &e.to_string());
        });
        let config: WatchConfig = toml::from_str(&content).unwrap_or_else(|e| {
            fail("Invalid watch.toml", &e.to_string());
        });
        if let Err(e) = config.validate() {
            fail("Out-of-range value in watch.toml", &format!("{:?}", e));
        }
        println!("cargo:warning=watch.toml validated successfully");
        config
    } else {
        println!("cargo:warning=watch.toml not found, embedding defaults");
        WatchConfig::default()
    };

    let mut buf = [0u8; MAX_CONFIG_SIZE];
    let blob = config.to_slice(&mut buf).unwrap_or_else(|e| {
        fail("Failed to encode config", &format!("{:?}", e));
    });
    fs::write(out_dir.join("watch_config.bin"), blob).unwrap();
}

/// Abort the build with a boxed error message
fn fail(title: &str, detail: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(detail)
    );
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
