mod catalogue;
mod config;
mod logging;
mod models;
mod notes;
mod practice;
mod sync;
mod tracker;
mod tui;
mod view;

use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use catalogue::{answer_text, Catalogue};
use config::Config;
use models::JsonOutput;
use notes::NotesStore;
use sync::SyncAction;
use tracker::TrackerStore;

#[derive(Parser)]
#[command(name = "qabank")]
#[command(about = "Interview question bank with an asked-question tracker")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Question catalogue (JSON) to use instead of the built-in one
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List question categories
    Categories,

    /// List the questions of a category
    Questions {
        /// Category name
        category: String,
    },

    /// Show a question and its answer
    Show {
        /// Category name
        category: String,

        /// Question number within the category (1-based)
        number: usize,
    },

    /// Pick a question to practise (stochastic selection)
    Next {
        /// Category name
        category: String,
    },

    /// Read or write the notes file
    #[command(subcommand)]
    Notes(NotesCommands),

    /// Print the git commands that publish the notes file
    Push,

    /// Print the git commands that pull the notes file
    Fetch,

    /// Launch interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum NotesCommands {
    /// Print the notes file
    Show,

    /// Append a timestamped note
    Add {
        /// Note text
        text: String,
    },

    /// Empty the notes file
    Clear,
}

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            println!("{}", error_json(e.as_ref()));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn error_json(e: &dyn std::error::Error) -> String {
    serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))
        .unwrap_or_else(|_| r#"{"success":false,"data":null,"error":"unknown error"}"#.to_string())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.catalogue.clone());

    if let Err(e) = logging::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("Warning: file logging disabled: {}", e);
    } else if let Some((level, dir)) = logging::logging_status() {
        info!(
            "event=startup module=main status=ok level={} log_dir={}",
            level,
            dir.display()
        );
    }

    let catalogue = match &config.catalogue_path {
        Some(path) => Catalogue::load(path)?,
        None => Catalogue::builtin()?,
    };
    let notes = NotesStore::in_dir(&config.data_dir);

    match cli.command {
        Commands::Categories => {
            let categories = catalogue.categories();
            if cli.json {
                let rows: Vec<_> = categories
                    .iter()
                    .map(|c| {
                        serde_json::json!({
                            "name": c.name,
                            "questions": c.questions.len()
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string(&JsonOutput::ok(rows))?);
            } else if categories.is_empty() {
                println!("No categories found.");
            } else {
                println!("{:<40} QUESTIONS", "CATEGORY");
                println!("{}", "-".repeat(52));
                for category in categories {
                    println!(
                        "{:<40} {}",
                        truncate(&category.name, 38),
                        category.questions.len()
                    );
                }
                println!("{}", "-".repeat(52));
                println!("{:<40} {}", "Total", catalogue.total_questions());
            }
        }

        Commands::Questions { category } => {
            let questions = catalogue.get_questions_for_category(&category)?;
            if cli.json {
                let rows: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
                println!("{}", serde_json::to_string(&JsonOutput::ok(rows))?);
            } else if questions.is_empty() {
                println!("No questions in this category.");
            } else {
                for (i, entry) in questions.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, truncate(&entry.question, 72));
                }
            }
        }

        Commands::Show { category, number } => {
            let entry = catalogue.entry(&category, number)?;
            let answer = answer_text(&entry.answer);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "question": entry.question,
                        "answer": answer
                    })))?
                );
            } else {
                println!("Question {}: {}", number, entry.question);
                println!();
                println!("{}", answer);
            }
        }

        Commands::Next { category } => {
            let questions = catalogue.get_questions_for_category(&category)?;
            let tracker = TrackerStore::new();
            let mut rng = rand::thread_rng();

            match practice::pick_next(questions, &tracker, &mut rng) {
                Some(index) => {
                    let entry = &questions[index];
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                                "number": index + 1,
                                "question": entry.question,
                                "weight": practice::weight_for(&entry.question, &tracker)
                            })))?
                        );
                    } else {
                        println!("=== Next Question ===");
                        println!();
                        println!("{}. {}", index + 1, entry.question);
                        println!();
                        println!("Reveal the answer with:");
                        println!("  qabank show \"{}\" {}", category, index + 1);
                    }
                }
                None if cli.json => {
                    println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                }
                None => println!("No questions in this category."),
            }
        }

        Commands::Notes(notes_cmd) => match notes_cmd {
            NotesCommands::Show => {
                let text = notes.load()?;
                if cli.json {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                            "path": notes.path().display().to_string(),
                            "contents": text
                        })))?
                    );
                } else if text.trim().is_empty() {
                    println!("No notes yet ({}).", notes.path().display());
                } else {
                    print!("{}", text);
                }
            }

            NotesCommands::Add { text } => {
                notes.append(&text)?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                } else {
                    println!("Note added to {}.", notes.path().display());
                }
            }

            NotesCommands::Clear => {
                notes.save("")?;
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::<()>::ok(()))?);
                } else {
                    println!("Notes cleared.");
                }
            }
        },

        Commands::Push => print_sync(SyncAction::Push, cli.json)?,
        Commands::Fetch => print_sync(SyncAction::Fetch, cli.json)?,

        Commands::Tui => {
            let tracker = tui::run(catalogue, notes)?;
            let summary = tracker.summary();
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                        "asked": tracker.items(),
                        "summary": summary
                    })))?
                );
            } else if summary.total > 0 {
                println!("=== Session Summary ===");
                println!("Asked: {}", summary.total);
                println!("Answered: {}", summary.answered);
                println!("Partially correct: {}", summary.partially_correct);
                println!("Confusing: {}", summary.confusing);
                println!("Not answered: {}", summary.not_answered);
                println!("Not graded: {}", summary.unset);
            }
        }
    }

    Ok(())
}

fn print_sync(action: SyncAction, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let commands = sync::commands(action);
    if json {
        println!("{}", serde_json::to_string(&JsonOutput::ok(&commands))?);
    } else {
        println!("{}:", action.label());
        for command in &commands {
            println!("  {}", command);
        }
    }
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
