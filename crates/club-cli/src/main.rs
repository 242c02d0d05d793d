use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use club_cli::seeder;
use club_config::{DatabaseConfig, JwtConfig, LogConfig};
use club_db::{connect, run_migrations};
use club_models::{AppScope, UserCreate};
use common_club::{AppError, CategoryService, UserService};

#[derive(Parser)]
#[command(name = "club-cli")]
#[command(about = "Club CLI - Bootstrap and admin tools for the shared club database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the shared schema and seed the predefined categories
    InitDb {
        /// Database file (defaults to COMMON_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,

        /// Only create the schema
        #[arg(long)]
        no_seed: bool,
    },
    /// Register a user account
    CreateUser {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Database file (defaults to COMMON_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,
    },
    /// List predefined categories, either the whole catalog or what one app shows
    Categories {
        /// App to list for: coin, care, career or campfire. `all` lists the whole catalog
        #[arg(short = 'a', long, default_value = "all")]
        app: AppScope,

        /// Database file (defaults to COMMON_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,
    },
    /// Issue an access token for an existing user
    IssueToken {
        #[arg(short = 'u', long)]
        user_id: i64,

        /// Database file (defaults to COMMON_DB_PATH)
        #[arg(long)]
        db_path: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    club_observability::init_logging(&LogConfig::from_env()).ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::InitDb { db_path, no_seed } => handle_init_db(db_path, !no_seed).await,
        Commands::CreateUser {
            email,
            name,
            password,
            db_path,
        } => handle_create_user(email, name, password, db_path).await,
        Commands::Categories { app, db_path } => handle_categories(app, db_path).await,
        Commands::IssueToken { user_id, db_path } => handle_issue_token(user_id, db_path).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn common_db_path(db_path: Option<String>) -> anyhow::Result<String> {
    match db_path {
        Some(path) => Ok(path),
        None => Ok(DatabaseConfig::from_env()?.common_db_path),
    }
}

fn app_error(err: AppError) -> anyhow::Error {
    err.error
}

async fn handle_init_db(db_path: Option<String>, seed: bool) -> anyhow::Result<()> {
    let db_path = common_db_path(db_path)?;
    println!("📚 Initializing {}...", db_path);

    let report = seeder::initialize_database(&db_path, seed).await?;

    if seed {
        println!(
            "✅ Schema ready, {} categories inserted, {} already present",
            report.inserted, report.existing
        );
    } else {
        println!("✅ Schema ready (seeding skipped)");
    }
    Ok(())
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    Input::new()
        .with_prompt(prompt)
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))
}

async fn handle_create_user(
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
    db_path: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => prompt_text("Email address")?,
    };

    let name = match name {
        Some(name) => Some(name),
        None => Some(
            Input::<String>::new()
                .with_prompt("Name (optional)")
                .allow_empty(true)
                .interact_text()
                .context("Failed to read name")?,
        ),
    }
    .filter(|n| !n.trim().is_empty());

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let pool = connect(&common_db_path(db_path)?, 1).await?;
    run_migrations(&pool).await?;

    let mut tx = pool.begin().await?;
    let user = UserService::register(
        &mut tx,
        UserCreate {
            email,
            name,
            password,
        },
    )
    .await
    .map_err(app_error)?;
    tx.commit().await?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    if let Some(name) = &user.name {
        println!("   Name: {}", name);
    }
    Ok(())
}

async fn handle_categories(app: AppScope, db_path: Option<String>) -> anyhow::Result<()> {
    let pool = connect(&common_db_path(db_path)?, 1).await?;
    let mut conn = pool.acquire().await?;

    let categories = if app.is_single_app() {
        CategoryService::list_for_app(&mut conn, None, app)
            .await
            .map_err(app_error)?
            .predefined
    } else {
        seeder::list_predefined(&mut conn)
            .await?
            .into_iter()
            .map(club_models::CategoryResponse::from)
            .collect()
    };

    if categories.is_empty() {
        println!("No categories found. Run `init-db` first.");
        return Ok(());
    }

    for category in &categories {
        println!(
            "{:>4}  {:<8} {:<9} {:<20} {}",
            category.id,
            category.kind.as_str(),
            category.app_scope.as_str(),
            category.name,
            category.icon.as_deref().unwrap_or("-")
        );
    }

    if app.is_single_app() {
        println!("\n{} categories visible in {}", categories.len(), app);
    } else {
        println!("\n{} predefined categories", categories.len());
    }
    Ok(())
}

async fn handle_issue_token(user_id: i64, db_path: Option<String>) -> anyhow::Result<()> {
    let jwt_config = JwtConfig::from_env()?;
    let pool = connect(&common_db_path(db_path)?, 1).await?;
    let mut conn = pool.acquire().await?;

    let user = UserService::find_by_id(&mut conn, user_id)
        .await
        .map_err(app_error)?;
    let token = club_auth::create_access_token(user.id, user.email.as_str(), &jwt_config)?;

    println!("{}", token);
    Ok(())
}
