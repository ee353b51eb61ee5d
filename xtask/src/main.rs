//! Build automation tasks for iso2d
//!
//! Usage:
//!   cargo xtask build-web      # Build the sandbox as WASM for the web
//!   cargo xtask package-web    # Create a zip of the web build

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for iso2d")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sandbox as WASM for web deployment
    BuildWeb,
    /// Create a zip file of the web build
    PackageWeb,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb => build_web(),
        Commands::PackageWeb => package_web(),
    }
}

/// Get the project root directory
fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .to_path_buf()
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(Command::new("curl").args(["-L", "-o"]).arg(dest).arg(url))
}

/// Build WASM for web deployment
fn build_web() -> Result<()> {
    let root = project_root();
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release", "--target", "wasm32-unknown-unknown"]),
    )?;

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release/iso2d.wasm"),
        dist.join("iso2d.wasm"),
    )?;

    // Minimal loader page; macroquad's JS bundle does the rest.
    let index = dist.join("index.html");
    std::fs::write(
        &index,
        concat!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\">",
            "<title>iso2d</title></head>\n<body style=\"margin:0\">\n",
            "<canvas id=\"glcanvas\" tabindex=\"1\"></canvas>\n",
            "<script src=\"mq_js_bundle.js\"></script>\n",
            "<script>load(\"iso2d.wasm\");</script>\n</body>\n</html>\n"
        ),
    )?;

    // Download macroquad JS bundle
    let mq_js = dist.join("mq_js_bundle.js");
    if !mq_js.exists() {
        download_file(
            "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js",
            &mq_js,
        )?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Create a zip of the web build
fn package_web() -> Result<()> {
    build_web()?;

    let root = project_root();
    let dist = root.join("dist");
    let zip_path = dist.join("iso2d-web.zip");

    if zip_path.exists() {
        std::fs::remove_file(&zip_path)?;
    }

    println!("Creating web zip...");
    run_cmd(
        Command::new("zip")
            .current_dir(dist.join("web"))
            .args(["-r", "../iso2d-web.zip", "."]),
    )?;

    println!("Web package ready: dist/iso2d-web.zip");
    Ok(())
}
