use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{
    api::ApiClient,
    config::Config,
    library::{Diet, SavedRecipe, Theme},
    open_library,
    session::Session,
    speech::{self, ReadAloud},
    timer::CookingTimer,
};
use indicatif::{ProgressBar, ProgressStyle};
use kitchen::recipe::Language;
use tokio::{signal::ctrl_c, time::sleep};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Show recipes in Hindi
    #[arg(long, global = true)]
    hindi: bool,

    #[arg(long, global = true)]
    api: Option<String>,

    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct View {
    /// Scale ingredient quantities to this many servings
    #[arg(long)]
    servings: Option<u32>,

    /// Print a rough nutrition estimate
    #[arg(long)]
    nutrition: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a recipe from the given ingredients
    Generate {
        ingredients: Vec<String>,

        #[command(flatten)]
        view: View,
    },
    /// Generate a recipe from a random handful of pantry staples
    Lucky {
        #[command(flatten)]
        view: View,
    },
    #[command(subcommand)]
    History(HistoryCommand),
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Shopping checklist for a saved recipe
    Shop {
        id: String,

        /// 1-based items to tick off
        #[arg(long = "check")]
        checked: Vec<usize>,
    },
    /// Read a saved recipe aloud, Ctrl+C stops
    Speak { id: String },
    /// Cooking timer, Ctrl+C pauses and exits
    Timer {
        /// Stop on its own after this many seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    Theme { theme: Theme },
    /// Leave out to clear the preference
    Diet { diet: Option<Diet> },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    List,
    Show {
        id: String,

        #[command(flatten)]
        view: View,
    },
    Remove { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    List,
    Toggle { id: String },
    Note { id: String, text: String },
    Rate { id: String, rating: u8 },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let config = Config::load(args.api, args.data_dir);

    let library = open_library(&config.data_dir)
        .with_context(|| format!("Failed to open {}", config.data_dir.display()))?;
    let mut session = Session::new(library);
    if args.hindi {
        session.set_language(Language::Hindi);
    }

    let api = ApiClient::new(&config.api_url);

    match args.command {
        Command::Generate { ingredients, view } => {
            session.set_ingredients(ingredients);

            let spinner = spinner("Cooking up a recipe...");
            let result = session.generate(&api).await;
            spinner.finish_and_clear();

            result?;
            print_current(&mut session, &view);
        }
        Command::Lucky { view } => {
            let spinner = spinner("Feeling lucky...");
            let result = session.feeling_lucky(&api, &mut rand::thread_rng()).await;
            spinner.finish_and_clear();

            result?;
            print_current(&mut session, &view);
        }
        Command::History(command) => history(&mut session, command)?,
        Command::Favorites(command) => favorites(&mut session, command)?,
        Command::Shop { id, checked } => {
            session.load(&id)?;

            if let Some(mut list) = session.shopping_list() {
                for index in checked {
                    if index == 0 || list.toggle(index - 1).is_none() {
                        println!("No item {index}");
                    }
                }

                for (line, done) in list.items() {
                    println!("[{}] {}", if *done { "x" } else { " " }, line);
                }
                println!("\n{} left to buy", list.remaining().count());
            }
        }
        Command::Speak { id } => {
            session.load(&id)?;
            speak(&session).await?;
        }
        Command::Timer { seconds } => run_timer(seconds).await,
        Command::Theme { theme } => {
            session.library_mut().set_theme(theme)?;
            println!("Theme: {:?}", session.library().theme());
        }
        Command::Diet { diet } => {
            session.library_mut().set_diet(diet)?;

            match session.library().diet() {
                Some(diet) => println!("Diet: {diet:?}"),
                None => println!("Diet: not set"),
            }
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    spinner
}

fn history(session: &mut Session, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::List => list(session.library().history(), session.language()),
        HistoryCommand::Show { id, view } => {
            session.load(&id)?;
            print_current(session, &view);
        }
        HistoryCommand::Remove { id } => {
            session.library_mut().remove_history(&id)?;
            println!("Removed {id}");
        }
        HistoryCommand::Clear => {
            session.library_mut().clear_history()?;
            println!("History cleared");
        }
    }

    Ok(())
}

fn favorites(session: &mut Session, command: FavoritesCommand) -> Result<()> {
    match command {
        FavoritesCommand::List => list(session.library().favorites(), session.language()),
        FavoritesCommand::Toggle { id } => {
            session.load(&id)?;

            if session.toggle_favorite()? {
                println!("Added {id} to favorites");
            } else {
                println!("Removed {id} from favorites");
            }
        }
        FavoritesCommand::Note { id, text } => {
            session.library_mut().annotate(&id, Some(text), None)?;
            println!("Saved note on {id}");
        }
        FavoritesCommand::Rate { id, rating } => {
            session.library_mut().annotate(&id, None, Some(rating))?;
            println!("Rated {id} {rating}/5");
        }
    }

    Ok(())
}

fn list(entries: &[SavedRecipe], language: Language) {
    if entries.is_empty() {
        println!("Nothing here yet");
        return;
    }

    for saved in entries {
        println!(
            "{}  {}  {}",
            saved.id,
            saved.timestamp.format("%Y-%m-%d %H:%M"),
            saved.recipe.title_in(language)
        );
    }
}

fn print_current(session: &mut Session, view: &View) {
    if let Some(servings) = view.servings {
        session.set_servings(servings);
    }

    let Some(saved) = session.current() else {
        return;
    };

    let language = session.language();
    let recipe = &saved.recipe;
    let favorite = if session.is_favorite() { " *" } else { "" };

    println!("{}{}  [{}]", recipe.title_in(language), favorite, saved.id);
    println!(
        "{} | serves {}",
        recipe.prep_time_in(language),
        session.servings().unwrap_or(recipe.servings)
    );

    if let Some(rating) = saved.rating {
        println!("Rating: {rating}/5");
    }
    if let Some(notes) = &saved.notes {
        println!("Notes: {notes}");
    }

    println!();
    for line in session.scaled_ingredients() {
        println!("- {line}");
    }

    println!();
    for (index, step) in recipe.instructions_in(language).iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }

    if !view.nutrition {
        return;
    }

    if let Some(estimate) = session.nutrition() {
        let total = estimate.total;
        let each = estimate.per_serving;

        println!();
        println!(
            "~{:.0} kcal total, {:.0} kcal per serving (protein {:.1}g, carbs {:.1}g, fat {:.1}g each)",
            total.calories, each.calories, each.protein, each.carbs, each.fat
        );
    }
}

async fn speak(session: &Session) -> Result<()> {
    let Some(text) = session.narration() else {
        return Ok(());
    };

    let mut speech = speech::detect();

    match speech::toggle(speech.as_mut(), &text, session.language())? {
        ReadAloud::Unavailable => {
            println!("Read aloud needs espeak-ng installed");
            return Ok(());
        }
        ReadAloud::Started | ReadAloud::Stopped => {}
    }

    let finished = async {
        while speech.is_speaking() {
            sleep(Duration::from_millis(200)).await;
        }
    };

    tokio::select! {
        _ = finished => {},
        _ = ctrl_c() => {},
    }

    speech.cancel();
    Ok(())
}

async fn run_timer(seconds: Option<u64>) {
    let mut timer = CookingTimer::new();
    timer.start();

    let bar = ProgressBar::new_spinner();
    let ticking = async {
        loop {
            bar.set_message(timer.display());

            if seconds.is_some_and(|limit| timer.elapsed() >= limit) {
                break;
            }

            sleep(Duration::from_millis(200)).await;
        }
    };

    tokio::select! {
        _ = ticking => {},
        _ = ctrl_c() => {},
    }

    timer.pause();
    bar.finish_with_message(format!("Stopped at {}", timer.display()));
}
