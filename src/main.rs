//! maya CLI entrypoint
//! Parses command-line arguments and dispatches to the project generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use maya::core::templates::TemplateEntry;
use maya::{
    Configuration, DirectoryTemplateStore, EmbeddedTemplateStore, PackageManager,
    ProjectGenerator,
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maya")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Python project with best practices
    Init(InitArgs),
    /// Inspect or export the built-in templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
    /// Show the version of the Maya CLI tool
    Version,
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Name of the project to create
    project_name: String,
    /// Package manager to use (pip or uv)
    #[arg(short, long, default_value = "pip")]
    package_manager: String,
    /// Minimum Python version required
    #[arg(short = 'y', long, visible_alias = "py", default_value = "3.8")]
    python_version: String,
    /// Author name
    #[arg(short, long)]
    author: Option<String>,
    /// Author email
    #[arg(short, long)]
    email: Option<String>,
    /// GitHub username
    #[arg(short, long)]
    github: Option<String>,
    /// Directory in which the project directory is created
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// Custom template directory
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Print the files that would be created without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateCommands {
    /// List the files a project would get
    List {
        /// Package manager whose variants to show
        #[arg(short, long, default_value = "pip")]
        package_manager: String,
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Export the built-in templates to a directory for customization
    Export {
        /// Directory to export into
        output_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins when set; --verbose only moves the fallback level
    let default_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "Command failed");
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<maya::Error>()
                .map(maya::Error::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init(args) => init(args),
        Commands::Templates { action } => match action {
            TemplateCommands::List {
                package_manager,
                template_dir,
            } => list_templates(&package_manager, template_dir.as_deref()),
            TemplateCommands::Export { output_dir } => export_templates(&output_dir),
        },
        Commands::Version => {
            println!("Maya CLI v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn generator_for(template_dir: Option<&Path>) -> maya::Result<ProjectGenerator> {
    Ok(match template_dir {
        Some(dir) => ProjectGenerator::new(DirectoryTemplateStore::open(dir)?),
        None => ProjectGenerator::new(EmbeddedTemplateStore::new()),
    })
}

/// Validate options, then generate the project (or print its plan)
fn init(args: InitArgs) -> anyhow::Result<()> {
    let package_manager: PackageManager = args.package_manager.parse()?;
    let mut builder = Configuration::builder(&args.project_name)
        .package_manager(package_manager)
        .python_version(&args.python_version);
    if let Some(author) = &args.author {
        builder = builder.author_name(author);
    }
    if let Some(email) = &args.email {
        builder = builder.author_email(email);
    }
    if let Some(github) = &args.github {
        builder = builder.github_username(github);
    }
    let config = builder.build()?;
    debug!(?config, "Parsed configuration");

    let destination = match &args.output_dir {
        Some(dir) => dir.join(config.project_name()),
        None => PathBuf::from(config.project_name()),
    };
    let generator = generator_for(args.template_dir.as_deref())?;

    if args.dry_run {
        generator.check_destination(&destination)?;
        let plan = generator.plan(&config)?;
        println!(
            "Would create {} files in {}:",
            plan.len(),
            destination.display()
        );
        for file in plan {
            println!("  {}", file.relative_path.display());
        }
        return Ok(());
    }

    println!("Creating project: {}", config.project_name());
    let summary = generator.generate(&destination, &config)?;

    println!();
    println!("Project created successfully! ({} files)", summary.files.len());
    println!();
    println!("To get started with your new project:");
    println!();
    println!("  cd {}", summary.destination.display());
    println!("  just setup-dev");

    if package_manager == PackageManager::Uv {
        println!();
        println!("UV Package Manager");
        println!("Your project is configured to use the uv package manager.");
        println!("Make sure uv is installed with:");
        println!();
        println!("  pip install uv");
        println!();
        println!("The justfile includes special commands for uv:");
        println!("  just add-dep package-name   Add a new dependency with uv");
    }

    Ok(())
}

fn list_templates(package_manager: &str, template_dir: Option<&Path>) -> anyhow::Result<()> {
    let package_manager: PackageManager = package_manager.parse()?;
    let generator = generator_for(template_dir)?;
    let store = generator.store();
    let manifest = store.manifest()?;
    let entries = store.entries_for(package_manager)?;

    println!("Templates from {} ({package_manager}):", store.label());
    if let Some(description) = &manifest.description {
        println!("{description}");
    }
    println!();
    for entry in &entries {
        println!("  {}", describe(entry));
    }
    println!();
    println!("{} files", entries.len());
    Ok(())
}

fn describe(entry: &TemplateEntry) -> String {
    match entry.variant {
        Some(variant) => format!("{} [{variant}]", entry.relative_path),
        None => entry.relative_path.clone(),
    }
}

fn export_templates(output_dir: &Path) -> anyhow::Result<()> {
    let count = EmbeddedTemplateStore::new()
        .export(output_dir)
        .with_context(|| format!("Failed to export templates to {}", output_dir.display()))?;

    println!(
        "Exported {count} template files to {}",
        output_dir.display()
    );
    Ok(())
}
