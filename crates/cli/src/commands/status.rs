//! `eduassist status` — Show configuration and data totals.

use std::path::PathBuf;

use eduassist_config::AppConfig;

use super::CliResult;

pub async fn run(data: Option<PathBuf>) -> CliResult {
    let (config, classroom) = super::open(data)?;
    let stats = classroom.stats().await;

    println!("📚 EduAssist Status");
    println!("==================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Data file:    {}", config.storage.resolved_path().display());
    println!("  Storage:      {}", classroom.persistence_name());
    println!(
        "  Assistant:    {}",
        if classroom.has_provider() { "remote + fallback" } else { "fallback only" }
    );
    println!("  Model:        {}", config.assistant.model);
    println!("  Max tokens:   {}", config.assistant.max_tokens);
    match config.assistant.request_timeout_secs {
        Some(secs) => println!("  Timeout:      {secs}s"),
        None => println!("  Timeout:      none"),
    }
    println!("  Activity cap: {}", config.activity.max_entries);
    println!();
    println!("  Classes:      {}", stats.classes);
    println!("  Projects:     {}", stats.projects);
    println!("  Knowledge:    {}", stats.knowledge);
    println!("  Students:     {}", stats.students);

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `eduassist init` first");
    }

    Ok(())
}
