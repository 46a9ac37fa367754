//! `eduassist init` — First-time setup.

use std::path::PathBuf;

use eduassist_config::AppConfig;

use super::CliResult;

pub async fn run(data: Option<PathBuf>) -> CliResult {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("📚 EduAssist — First-Time Setup");
    println!("===============================\n");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        std::fs::write(&config_path, AppConfig::default_toml())?;
        println!("✅ Created config.toml at: {}", config_path.display());
    }

    let (config, classroom) = super::open(data)?;
    let stats = classroom.stats().await;
    println!(
        "✅ Data file: {} ({} classes, {} knowledge items)",
        config.storage.resolved_path().display(),
        stats.classes,
        stats.knowledge
    );

    if !config.has_api_key() {
        println!("\n📝 No API key set. Replies will come from the local knowledge base.");
        println!("   Set EDUASSIST_API_KEY or ANTHROPIC_API_KEY to enable the remote assistant.");
    }

    println!("\n🎉 Setup complete! Run `eduassist overview` to get started.\n");
    Ok(())
}
