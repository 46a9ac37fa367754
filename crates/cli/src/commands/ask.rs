//! `eduassist ask` — Chat with the assistant as a student.

use std::io::Write;
use std::path::PathBuf;

use eduassist_assistant::{ChatReply, ReplySource};
use eduassist_classroom::{Classroom, Command, CommandOutput};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::CliResult;

async fn send(
    classroom: &Classroom,
    student: &str,
    project: Option<&str>,
    question: &str,
) -> Result<ChatReply, Box<dyn std::error::Error>> {
    let output = classroom
        .dispatch(Command::SendMessage {
            student_id: student.to_string(),
            project_id: project.map(String::from),
            question: question.to_string(),
        })
        .await?;
    match output {
        CommandOutput::Reply(reply) => Ok(reply),
        _ => Err("unexpected output for message".into()),
    }
}

fn print_reply(reply: &ChatReply) {
    println!();
    for line in reply.text.lines() {
        println!("  Assistant > {line}");
    }
    if reply.source == ReplySource::Fallback {
        println!("  (answered from the class knowledge base)");
    }
    println!();
}

pub async fn run(
    data: Option<PathBuf>,
    student: String,
    project: Option<String>,
    message: Option<String>,
) -> CliResult {
    let (_, classroom) = super::open(data)?;

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let reply = send(&classroom, &student, project.as_deref(), &msg).await;
        eprint!("\r              \r");
        print_reply(&reply?);
        return Ok(());
    }

    let pinned = classroom.quick_info(&student, project.as_deref()).await?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        EduAssist — Ask Your Assistant        ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!(
        "  Assistant: {}",
        if classroom.has_provider() { "remote" } else { "knowledge base only" }
    );
    if !pinned.is_empty() {
        println!();
        println!("  📌 Quick info:");
        for item in &pinned {
            println!("     {} {}", item.question, item.answer);
        }
    }
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if !line.is_empty() {
            eprint!("  ...");
            let reply = send(&classroom, &student, project.as_deref(), line).await;
            eprint!("\r     \r");
            match reply {
                Ok(reply) => print_reply(&reply),
                Err(e) => {
                    eprintln!("  [Error] {e}");
                    println!();
                }
            }
        }
        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();
    Ok(())
}
