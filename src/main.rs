// Rise Up - command line driver
// Registers users, generates plans and toggles today's tasks against the local store

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use riseup::clock::{Clock, SystemClock};
use riseup::config::constants::PLAN_DAYS;
use riseup::config::{load_config, Config};
use riseup::generation::PlanGenerator;
use riseup::profile::UserProfile;
use riseup::progress::{DashboardView, ProgressEngine, ToggleOutcome};
use riseup::providers::GeminiProvider;
use riseup::questionnaire::{questions, AgeGroup, PROBLEM_PROMPT};
use riseup::store::{DocumentStore, SqliteStore};

#[derive(Parser)]
#[command(name = "riseup", version, about = "Personalised 14-day self-improvement plans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user document
    Register {
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        age: u32,
    },
    /// Print the questionnaire for an age
    Questions {
        #[arg(long)]
        age: u32,
    },
    /// Generate and store a plan from questionnaire answers
    Generate {
        #[arg(long)]
        user: String,
        /// JSON file holding an array of answer strings
        #[arg(long)]
        answers: PathBuf,
        #[arg(long)]
        problem: String,
    },
    /// Show today's tasks, streak and coins
    Today {
        #[arg(long)]
        user: String,
    },
    /// Complete the next task, or undo the last one
    Toggle {
        #[arg(long)]
        user: String,
        /// Task number on today's list (1-5)
        task: usize,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug { "riseup=debug" } else { "riseup=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load config, start logging and open the document store.
fn setup() -> Result<(Config, Arc<dyn DocumentStore>)> {
    let config = load_config()?;
    init_tracing(config.features.debug_logging);
    let store: Arc<dyn DocumentStore> = Arc::new(SqliteStore::open(&config.store.db_path)?);
    Ok((config, store))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match cli.command {
        Command::Register {
            user,
            name,
            email,
            age,
        } => {
            let (_, store) = setup()?;
            if store.get(&user).await?.is_some() {
                bail!("User '{}' already exists", user);
            }
            let profile = UserProfile::register(user, name, email, age, clock.now());
            store.set(&profile.id, &profile).await?;
            println!("Registered {} ({})", profile.id, profile.age_group);
        }
        Command::Generate {
            user,
            answers,
            problem,
        } => {
            let (config, store) = setup()?;
            let profile = store
                .get(&user)
                .await?
                .with_context(|| format!("No user '{}'; run `riseup register` first", user))?;
            let contents = std::fs::read_to_string(&answers)
                .with_context(|| format!("Failed to read {}", answers.display()))?;
            let answers: Vec<String> = serde_json::from_str(&contents)
                .with_context(|| format!("{} must hold a JSON array of strings", answers.display()))?;

            let provider = Arc::new(GeminiProvider::from_config(&config.gemini)?);
            let generator = PlanGenerator::new(provider, store.clone(), clock.clone());

            match generator.generate_plan(&profile, &answers, &problem).await {
                Ok(plan) => {
                    println!("Your {}-day plan is ready.", plan.len());
                    let first = plan.day(0);
                    println!("\n{}", first.day);
                    for (i, task) in first.tasks.iter().enumerate() {
                        println!("  {}. {}", i + 1, task);
                    }
                }
                Err(e) => {
                    tracing::debug!("Generation failed: {:?}", e);
                    bail!("{} ({})", e.user_message(), e);
                }
            }
        }
        Command::Questions { age } => {
            init_tracing(false);
            print_questions(age);
        }
        Command::Today { user } => {
            let (_, store) = setup()?;
            let engine = ProgressEngine::load(store, clock, &user).await?;
            print_dashboard(&engine.dashboard());
        }
        Command::Toggle { user, task } => {
            let (_, store) = setup()?;
            let mut engine = ProgressEngine::load(store, clock, &user).await?;
            let text = match task.checked_sub(1).and_then(|i| engine.today().tasks.get(i)) {
                Some(text) => text.clone(),
                None => bail!("Task number must be between 1 and {}", engine.today().tasks.len()),
            };
            match engine.toggle_task(&text).await? {
                ToggleOutcome::Completed {
                    coins_awarded,
                    day_completed,
                    streak_awarded,
                } => {
                    println!("Done: {} (+{} coin)", text, coins_awarded);
                    if day_completed {
                        println!("All tasks complete for today!");
                    }
                    if streak_awarded {
                        println!("Streak is now {}", engine.streak());
                    }
                }
                ToggleOutcome::Retracted => println!("Undone: {}", text),
            }
            print_dashboard(&engine.dashboard());
        }
    }

    Ok(())
}

fn print_questions(age: u32) {
    let group = AgeGroup::from_age(age);
    println!("Questionnaire for ages {}\n", group);
    for (i, q) in questions(group).iter().enumerate() {
        println!("{}. {}", i + 1, q.text);
        for option in q.options {
            println!("   - {}", option);
        }
    }
    println!("\n{}", PROBLEM_PROMPT);
}

fn print_dashboard(view: &DashboardView) {
    println!("{} (day {} of {})", view.day_label, view.day_number, PLAN_DAYS);
    for (i, task) in view.tasks.iter().enumerate() {
        let mark = if task.completed {
            "[x]"
        } else if task.clickable {
            "[ ]"
        } else {
            " - "
        };
        println!("  {} {}. {}", mark, i + 1, task.text);
    }
    println!(
        "Streak: {}  Coins: {}{}",
        view.streak,
        view.coins,
        if view.quota_met { "  (today complete)" } else { "" }
    );
    if view.plan_complete {
        println!("You have completed the 14-day plan.");
    }
}
