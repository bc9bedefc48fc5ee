use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gallery_client::{
    dto::{ImageDetailsDto, SelectionDto, StoryDto, TreeRowDto},
    entities::PathTree,
    value_objects::SelectionKind,
    ApplicationBuilder, Config, GalleryApp,
};

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Browse folders, images and stories of a remote gallery", long_about = None)]
struct Cli {
    /// Print the developer console after the command
    #[arg(long, global = true)]
    console: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the folder tree
    Folders,
    /// Print the story tree
    Stories,
    /// List the images of a folder
    Images {
        /// Folder path as listed by `folders`
        folder: String,
    },
    /// Show an image record and its metadata
    Show {
        /// Image path
        image: String,
    },
    /// Print a story
    Story {
        /// Story path as listed by `stories`
        path: String,
    },
    /// Print the last remembered selection
    Last,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env();
    init_tracing(config.log_json);
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    info!("Configuration loaded and validated");

    let app = ApplicationBuilder::new(config)
        .with_http()
        .map_err(anyhow::Error::msg)?
        .with_state_file()
        .build()
        .map_err(anyhow::Error::msg)?;

    let outcome = run(&app, cli.command).await;

    if cli.console {
        print_console(&app);
    }

    outcome
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(app: &GalleryApp, command: Commands) -> Result<()> {
    match command {
        Commands::Folders => print_tree(&app.refresh_tree.folders().await?),
        Commands::Stories => print_tree(&app.refresh_tree.stories().await?),
        Commands::Images { folder } => {
            app.selection.remember(SelectionKind::Folder, &folder).await?;
            let images = app.folder_cache.ensure_loaded(&folder).await;
            for image in images.iter() {
                println!("{}\t{}", image.format(), image.path());
            }
        }
        Commands::Show { image } => {
            app.selection.remember(SelectionKind::Image, &image).await?;
            let details = app
                .load_image
                .execute(&image)
                .await
                .with_context(|| format!("Failed to load image {image}"))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&ImageDetailsDto::from(details))?
            );
        }
        Commands::Story { path } => {
            app.selection.remember(SelectionKind::Story, &path).await?;
            let story = app
                .load_story
                .execute(&path)
                .await
                .with_context(|| format!("Failed to load story {path}"))?;
            let story = StoryDto::from(story);
            println!("# {}\n\n{}", story.title, story.body);
        }
        Commands::Last => match app.selection.restore().await {
            Some(selection) => {
                println!("{}", serde_json::to_string(&SelectionDto::from(selection))?)
            }
            None => println!("No selection stored"),
        },
    }

    Ok(())
}

fn print_tree(tree: &PathTree) {
    for row in TreeRowDto::rows(tree) {
        let marker = if row.selectable { "*" } else { " " };
        println!("{}{} {}", "  ".repeat(row.depth), marker, row.name);
    }
}

fn print_console(app: &GalleryApp) {
    eprintln!("--- console ({} entries) ---", app.console.len());
    for entry in app.console.entries() {
        eprintln!("{entry}");
    }
}
