// Catalog inspection entry point.
//
// The discovery and execution tool surfaces are library APIs consumed by
// a transport binding; this binary exists for operators to check what the
// configured wizards directory currently serves.

use anyhow::Result;
use formwizard::{AutomationConfig, WizardCatalog};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AutomationConfig::builder().build()?;
    let catalog = WizardCatalog::new(config.wizards_dir());

    let wizards = catalog.list().await?;
    if wizards.is_empty() {
        println!(
            "No available wizards under {}",
            config.wizards_dir().display()
        );
        return Ok(());
    }

    println!("Available wizards ({}):", wizards.len());
    for summary in wizards {
        println!(
            "  {} — {} ({} pages, {} required fields)",
            summary.wizard_id,
            summary.name,
            summary.total_pages,
            summary.required_fields.len()
        );
    }
    Ok(())
}
