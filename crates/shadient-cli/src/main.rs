//! Shadient CLI - serve, render, check and bundle the landing page.

#![allow(clippy::needless_pass_by_value, clippy::doc_markdown)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shadient::{render_document, Manifest, PageMessage, PageState, State};
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::process::Command;
use tiny_http::{Header, Response, Server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shadient")]
#[command(about = "Landing page renderer and WASM bundler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve a directory over HTTP
    Serve {
        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,
    },

    /// Render the page to index.html
    Render {
        /// Manifest file (default: built-in copy)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        out: PathBuf,

        /// Write a static snapshot without the WASM runtime
        #[arg(long)]
        snapshot: bool,
    },

    /// Check manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "site.yaml")]
        manifest: PathBuf,
    },

    /// Build optimized WASM bundle
    Bundle {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Manifest file (default: built-in copy)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Skip wasm-opt optimization
        #[arg(long)]
        no_optimize: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Serve { port, dir } => serve(port, &dir),
        Commands::Render {
            manifest,
            out,
            snapshot,
        } => render(manifest.as_deref(), &out, snapshot),
        Commands::Check { manifest } => check_manifest(&manifest),
        Commands::Bundle {
            output,
            manifest,
            no_optimize,
        } => bundle(&output, manifest.as_deref(), no_optimize),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(path) => {
            Manifest::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Manifest::builtin().context("built-in manifest"),
    }
}

/// Document for `manifest`, either mounted by the runtime or frozen at rest.
fn page_html(manifest: &Manifest, snapshot: bool) -> String {
    let mut state = PageState::new(manifest.heroes.len());
    if snapshot {
        state.update(PageMessage::Mounted);
    }
    render_document(manifest, &state, !snapshot).into_string()
}

fn write_index(manifest: &Manifest, out: &Path, snapshot: bool) -> Result<PathBuf> {
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let index = out.join("index.html");
    fs::write(&index, page_html(manifest, snapshot))
        .with_context(|| format!("writing {}", index.display()))?;
    Ok(index)
}

fn render(manifest: Option<&Path>, out: &Path, snapshot: bool) -> Result<()> {
    let manifest = load_manifest(manifest)?;
    let index = write_index(&manifest, out, snapshot)?;
    tracing::info!(path = %index.display(), snapshot, "rendered page");
    println!("Wrote {}", index.display());
    Ok(())
}

fn check_manifest(path: &Path) -> Result<()> {
    println!("Checking manifest: {}", path.display());
    let manifest = Manifest::load(path).context("Manifest invalid")?;

    println!("Manifest valid!");
    println!("  Title: {}", manifest.title);
    println!("  Version: {}", manifest.shadient);
    println!("  Hero sections: {}", manifest.heroes.len());
    for (i, hero) in manifest.heroes.iter().enumerate() {
        println!("    [{i}] {:?}, split {:?}", hero.variant, hero.headline.split);
    }
    println!("  Companies: {}", manifest.trusted.companies.len());
    println!(
        "  Marquee: top {}s, bottom {}s",
        manifest.trusted.marquee.top_duration, manifest.trusted.marquee.bottom_duration
    );
    Ok(())
}

fn bundle(output: &Path, manifest: Option<&Path>, no_optimize: bool) -> Result<()> {
    let manifest = load_manifest(manifest)?;
    println!("Building Shadient WASM bundle...");

    let cwd = std::env::current_dir().context("reading current directory")?;
    let status = Command::new("wasm-pack")
        .args(["build", "crates/shadient", "--target", "web", "--release", "--out-dir"])
        .arg(pkg_dir(output, &cwd))
        .status()
        .context("running wasm-pack")?;
    if !status.success() {
        bail!("wasm-pack build failed ({status})");
    }

    let wasm_file = output.join("pkg/shadient_bg.wasm");
    if !no_optimize && wasm_file.exists() {
        println!("Optimizing with wasm-opt...");
        match Command::new("wasm-opt")
            .args(["-Oz", "-o"])
            .arg(&wasm_file)
            .arg(&wasm_file)
            .status()
        {
            Ok(status) if status.success() => {}
            Ok(status) => tracing::warn!(%status, "wasm-opt failed; keeping unoptimized bundle"),
            Err(e) => tracing::warn!(error = %e, "wasm-opt not available"),
        }
    }

    write_index(&manifest, output, false)?;

    let size = fs::metadata(&wasm_file).map(|m| m.len()).unwrap_or(0);
    println!();
    println!("Bundle built successfully!");
    println!("  Output: {}", output.display());
    println!("  WASM size: {} KB", size / 1024);
    Ok(())
}

/// Absolute package directory for `output`.
///
/// wasm-pack resolves `--out-dir` against the crate, not the caller.
fn pkg_dir(output: &Path, cwd: &Path) -> PathBuf {
    cwd.join(output).join("pkg")
}

fn serve(port: u16, dir: &Path) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let server = Server::http(&addr).map_err(|e| anyhow::anyhow!("binding {addr}: {e}"))?;

    println!("Serving {} at http://localhost:{port}", dir.display());
    println!("Press Ctrl+C to stop");

    for request in server.incoming_requests() {
        let url = request.url().to_string();
        let path = resolve_path(dir, &url).filter(|p| p.is_file());

        let response = match path.map(|p| fs::read(&p).map(|body| (p, body))) {
            Some(Ok((path, body))) => {
                tracing::debug!(%url, path = %path.display(), "200");
                Response::from_data(body)
                    .with_header(header("Content-Type", content_type(&path)))
                    .with_header(header("Cache-Control", cache_control(&path)))
            }
            Some(Err(e)) => {
                tracing::warn!(%url, error = %e, "read failed");
                Response::from_string("500 Internal Server Error").with_status_code(500)
            }
            None => {
                tracing::debug!(%url, "404");
                Response::from_string("404 Not Found").with_status_code(404)
            }
        };

        if let Err(e) = request.respond(response) {
            tracing::warn!(%url, error = %e, "response failed");
        }
    }
    Ok(())
}

fn header(name: &'static str, value: &'static str) -> Header {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static ASCII header")
}

/// Map a request URL onto a file under `dir`, refusing paths that escape it.
fn resolve_path(dir: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return None;
    }
    let resolved = dir.join(relative);
    if relative.as_os_str().is_empty() || path.ends_with('/') {
        Some(resolved.join("index.html"))
    } else {
        Some(resolved)
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("yaml" | "yml") => "text/yaml",
        _ => "application/octet-stream",
    }
}

fn cache_control(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("wasm") => "public, max-age=31536000, immutable",
        Some("css" | "woff2") => "public, max-age=604800",
        Some("png" | "jpg" | "jpeg" | "svg" | "ico") => "public, max-age=86400",
        Some("html") => "no-cache, must-revalidate",
        _ => "public, max-age=3600",
    }
}
