use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use studyflow::transition::Phase;
use studyflow::view::{SectionView, html};
use studyflow::{App, Config, StudyFlow, plan};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "studyflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study a plan in the terminal
    Study {
        /// Path to the study plan JSON file
        plan: PathBuf,
    },
    /// Validate a study plan
    Check {
        /// Path to the study plan JSON file
        plan: PathBuf,
    },
    /// Render one section of a plan as an HTML page
    Render {
        /// Path to the study plan JSON file
        plan: PathBuf,
        /// Section to render, counting from 0
        #[arg(short, long, default_value_t = 0)]
        section: usize,
        /// Write the page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "studyflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Study { plan } => study(config, plan).await,
        Commands::Check { plan } => check(plan),
        Commands::Render { plan, section, output } => render(&config, plan, section, output),
    }
}

async fn study(config: Config, path: PathBuf) -> Result<()> {
    let plan = plan::load(&path)?;
    let report = {
        let mut app = App::new(config, &plan)?;
        app.run().await?
    };

    match report.quiz {
        Some(summary) => println!(
            "Quiz: {}/{} correct ({}%)",
            summary.score, summary.total, summary.percentage
        ),
        None if report.completed => println!("Study plan complete"),
        None => {}
    }
    Ok(())
}

fn check(path: PathBuf) -> Result<()> {
    let plan = plan::load(&path)?;
    let issues = plan.validate();

    for issue in &issues {
        println!("{}", issue);
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("{:?} has {} error(s)", path, errors);
    }
    println!("{:?} is valid", path);
    Ok(())
}

fn render(config: &Config, path: PathBuf, section: usize, output: Option<PathBuf>) -> Result<()> {
    let plan = plan::load(&path)?;
    let mut flow = StudyFlow::new(&plan);

    if section >= flow.len() {
        bail!("Section {} does not exist; the plan has {} section(s)", section, flow.len());
    }
    while flow.current_index() < section {
        flow.advance().with_context(|| format!("Failed to reach section {}", section))?;
    }

    let view = SectionView::build(&flow)?;
    let page = html::render_page(&view, Phase::Idle, &config.timings());

    match output {
        Some(out) => {
            fs::write(&out, page).with_context(|| format!("Failed to write page to {:?}", out))?;
        }
        None => print!("{}", page),
    }
    Ok(())
}
