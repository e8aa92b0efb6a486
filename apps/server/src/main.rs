mod seed;

use anyhow::Context;
use clap::{Parser, Subcommand};
use taut_config::load as load_config;
use taut_database::UserId;
use taut_gateway::{create_router, GatewayState};
use taut_runtime::{telemetry, BackendServices};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "taut-bot")]
#[command(about = "Taut chatbot (HTTP server by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Ask a single question and print the answer
    Ask {
        /// Id of the user asking
        #[arg(long)]
        user: String,
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Ask questions interactively
    Console {
        /// Id of the user asking
        #[arg(long)]
        user: String,
    },
    /// Seed the database with a demo workspace
    SeedData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::Ask { user, question } => ask_once(UserId::new(user), question.join(" ")).await,
        Commands::Console { user } => run_console(UserId::new(user)).await,
        Commands::SeedData => seed_data().await,
    }
}

async fn initialise() -> anyhow::Result<BackendServices> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;

    BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Taut chatbot");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let app = create_router(GatewayState::new(services.chatbot.clone()));

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(taut_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("chatbot shut down");
    Ok(())
}

async fn ask_once(user: UserId, question: String) -> anyhow::Result<()> {
    let services = initialise().await?;

    let answer = services
        .chatbot
        .ask(&question, &user)
        .await
        .context("failed to answer question")?;

    println!("{answer}");
    Ok(())
}

async fn run_console(user: UserId) -> anyhow::Result<()> {
    let services = initialise().await?;

    println!("Taut chatbot console, asking as {user}");
    println!("Try 'who is in general?' or 'when did I last post?'");
    println!("Use Ctrl+C or '/quit' to exit");
    println!("---");

    let mut reader = BufReader::new(tokio::io::stdin());
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "/quit" | "/exit" | "/q") {
            println!("Goodbye!");
            break;
        }

        match services.chatbot.ask(question, &user).await {
            Ok(answer) => println!("{answer}"),
            Err(error) => println!("error: {error}"),
        }
    }

    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with a demo workspace");

    let config = load_config().context("failed to load configuration")?;
    let pool = taut_database::initialize_database(&config.database)
        .await
        .context("failed to initialise database")?;

    let seeded = seed::seed_demo_workspace(&pool).await?;

    println!("Database seeded with a demo workspace:");
    println!("- {} channels created", seeded.channels);
    println!("- {} messages created", seeded.messages);
    println!("Users:");
    for (id, first_name) in &seeded.users {
        println!("  {first_name}: {id}");
    }
    println!("Run 'ask --user <id> who is in general?' to try it out");

    Ok(())
}
