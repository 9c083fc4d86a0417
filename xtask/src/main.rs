// locale-switch - Build Task Runner
// Unified build system using cargo xtask pattern

use anyhow::{Context, Result};
use xshell::{Shell, cmd};

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();

    match args.first().map(|s| s.as_str()) {
        Some("build") => {
            let release = args.contains(&"--release".to_string());
            build(&sh, release)
        },
        Some("test") => test(&sh),
        Some("format") => {
            let check = args.contains(&"--check".to_string());
            format(&sh, check)
        },
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        _ => {
            print_help();
            Ok(())
        },
    }
}

fn print_help() {
    println!("locale-switch - Build Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the server");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Build and run the server");
    println!("  ci                  Run all CI checks (format + clippy + build + test)");
    println!("  dist                Create distribution package (tar.gz)");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🦀 Building locale-switch{}...", if release { " (release)" } else { "" });
    let _dir = sh.push_dir(project_root());

    if release {
        cmd!(sh, "cargo build --release -p locale-switch")
            .run()
            .context("Failed to build in release mode")?;
        create_distribution(sh)?;
    } else {
        cmd!(sh, "cargo build -p locale-switch").run().context("Failed to build")?;
    }

    println!("✅ Build complete");
    Ok(())
}

/// Lay out build/dist with the binary and a default config
fn create_distribution(sh: &Shell) -> Result<()> {
    let project = project_root();
    let dist_dir = project.join("build/dist");

    cmd!(sh, "mkdir -p {dist_dir}/bin").run()?;
    cmd!(sh, "mkdir -p {dist_dir}/conf").run()?;
    cmd!(sh, "mkdir -p {dist_dir}/logs").run()?;

    let binary_src = project.join("target/release/locale-switch");
    let binary_dst = dist_dir.join("bin/locale-switch");
    cmd!(sh, "cp {binary_src} {binary_dst}").run()?;

    let config_src = project.join("backend/conf/config.toml");
    let config_dst = dist_dir.join("conf/config.toml");
    std::fs::copy(&config_src, &config_dst).context("Failed to copy config file")?;

    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;

    println!("✅ All tests passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    println!("🎨 Formatting code...");
    let _dir = sh.push_dir(project_root());

    if check {
        cmd!(sh, "cargo fmt --all -- --check")
            .run()
            .context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }

    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    let _dir = sh.push_dir(project_root());

    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings")
        .run()
        .context("Clippy checks failed")?;

    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    let _dir = sh.push_dir(project_root().join("backend"));

    cmd!(sh, "cargo run -p locale-switch -- {args...}")
        .run()
        .context("Failed to run server")?;

    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🚀 Running CI pipeline...");

    format(sh, true)?;
    clippy(sh)?;
    build(sh, false)?;
    test(sh)?;

    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

fn dist(sh: &Shell) -> Result<()> {
    build(sh, true)?;

    let dist_dir = project_root().join("build/dist");
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package_name = format!("locale-switch-{}.tar.gz", timestamp);

    let _dir = sh.push_dir(&dist_dir);
    cmd!(sh, "tar czf {package_name} bin conf logs")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", dist_dir.join(&package_name).display());
    Ok(())
}

/// Get project root directory
fn project_root() -> std::path::PathBuf {
    std::path::Path::new(&env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf()
}
