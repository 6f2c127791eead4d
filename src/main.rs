use anyhow::Context;
use browser_icon::{DirSink, ExportPlan, Exporter};
use log::info;

/// Writes the full icon set below the current directory.
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let plan = ExportPlan::standard();
    let mut sink = DirSink::new(".");

    info!("exporting {} icons", plan.len());
    Exporter::default()
        .export(&plan, &mut sink, |written| {
            println!("Created {}", written.path.display());
        })
        .context("Failed to export icons")?;

    println!("All icons created successfully!");
    Ok(())
}
