//! `eduassist overview` — Totals, recent classes and recent activity.

use std::path::PathBuf;

use eduassist_classroom::Command;
use eduassist_classroom::CommandOutput;

use super::CliResult;

pub async fn run(data: Option<PathBuf>) -> CliResult {
    let (_, classroom) = super::open(data)?;
    let CommandOutput::Overview(overview) = classroom.dispatch(Command::Overview).await? else {
        return Err("unexpected output for overview".into());
    };

    let stats = overview.stats;
    println!("📊 Overview");
    println!("===========");
    println!(
        "  {} classes · {} projects · {} knowledge items · {} students",
        stats.classes, stats.projects, stats.knowledge, stats.students
    );

    println!("\n  Recent classes:");
    if overview.recent_classes.is_empty() {
        println!("    (none yet — run `eduassist class create`)");
    }
    for summary in &overview.recent_classes {
        println!(
            "    {} [{}] {} · {} students · {} projects",
            summary.class.name,
            summary.class.code,
            summary.class.subject,
            summary.students,
            summary.projects
        );
    }

    println!("\n  Recent activity:");
    if overview.recent_activity.is_empty() {
        println!("    (no activity yet)");
    }
    for line in &overview.recent_activity {
        println!("    {:<40} {}", line.text, line.when);
    }
    println!();

    Ok(())
}
