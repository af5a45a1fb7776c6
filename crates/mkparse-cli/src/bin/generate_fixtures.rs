//! Write generated makefiles to disk for benchmarking other tools.
//!
//! Usage: cargo run --release --bin generate-fixtures --features generate -- [output_dir]
//!
//! Every fixture is parsed back before it is written, so a fixture that
//! lands on disk is known to be a valid makefile.

use mkparse_core::generate::{GeneratorConfig, generate_ast};
use mkparse_core::parse_makefile;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Fixture sizes shared with mkparse-core/benches/fixtures.rs, plus a
/// recipe-heavy and an assignment-heavy variant.
fn fixture_configs() -> Vec<(&'static str, GeneratorConfig)> {
    vec![
        ("small", GeneratorConfig::small()),
        ("medium", GeneratorConfig::medium()),
        ("large", GeneratorConfig::large()),
        ("xlarge", GeneratorConfig::xlarge()),
        (
            "recipes",
            GeneratorConfig::new(500).with_assignments(10).with_max_commands(12),
        ),
        (
            "variables",
            GeneratorConfig::new(50)
                .with_assignments(2_000)
                .with_max_commands(0)
                .with_seed(7),
        ),
    ]
}

fn main() -> ExitCode {
    let output_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("benches/fixtures"));

    match write_fixtures(&output_dir) {
        Ok(count) => {
            println!("Wrote {} fixture(s) to {}", count, output_dir.display());
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn write_fixtures(output_dir: &Path) -> Result<usize, String> {
    fs::create_dir_all(output_dir)
        .map_err(|e| format!("cannot create {}: {e}", output_dir.display()))?;

    let configs = fixture_configs();
    for (name, config) in &configs {
        let file_name = format!("{name}.mk");
        let content = generate_ast(config).to_string();

        let parsed = parse_makefile(&content, &file_name);
        if let Some(error) = parsed.error {
            return Err(format!("generated fixture does not parse: {error}"));
        }

        let path = output_dir.join(&file_name);
        fs::write(&path, &content).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!(
            "{:<10} {:>9} bytes  {:>6} rules  {:>6} assignments  {:>6} commands",
            name,
            content.len(),
            parsed.ast.rules().count(),
            parsed.ast.assignments().count(),
            parsed.ast.commands().count()
        );
    }

    Ok(configs.len())
}
