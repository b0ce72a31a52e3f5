//! CLI Check Command
//!
//! Validates config and catalog without starting the server. Exits non-zero
//! when either has errors.

use std::path::Path;

use anyhow::{Result, bail};
use garden_catalog::Catalog;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("\n🔎 Checking {}\n", config_path.display());
    let mut errors = 0;

    let config = garden_config::load_resolved(config_path).await?;
    let report = garden_config::validate(&config);
    for warning in &report.warnings {
        println!("  ⚠️  config {}: {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("  ❌ config {}: {}", error.path, error.message);
    }
    errors += report.errors.len();

    match Catalog::load(config.catalog_path()).await {
        Ok(catalog) => {
            let report = garden_catalog::validate(&catalog);
            for warning in &report.warnings {
                println!("  ⚠️  catalog {}: {}", warning.path, warning.message);
            }
            println!(
                "  ✅ catalog: {} states, {} transitions",
                catalog.states().len(),
                catalog.transition_count()
            );
        }
        Err(e) => {
            println!("  ❌ catalog: {e}");
            errors += 1;
        }
    }

    if errors > 0 {
        bail!("{errors} problem(s) found");
    }
    println!("\nAll good.\n");
    Ok(())
}
