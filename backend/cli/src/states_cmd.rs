//! CLI States Command

use std::path::Path;

use anyhow::Result;
use garden_catalog::Catalog;

pub async fn run(catalog_path: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load(catalog_path).await?;

    println!("\n🌿 Emotional states\n");
    for (state, meta) in catalog.states() {
        println!("  {} {:<12} {}", meta.icon, state.as_str(), meta.description);
        if let Some(follow_up) = catalog.follow_up(*state) {
            println!("     ↳ {follow_up}");
        }
    }
    println!(
        "\n{} states, {} narrated transitions\n",
        catalog.states().len(),
        catalog.transition_count()
    );
    Ok(())
}
