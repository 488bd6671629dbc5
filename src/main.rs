use anyhow::Result;
use clap::{Parser, Subcommand};
use contentpro::models::{Config, ContentType, GenerationResult, LengthTier};
use contentpro::session::Session;
use contentpro::storage::{ContactStore, FileContactStore};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "contentpro")]
#[command(about = "Generate Burmese marketing content and images")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate content for a topic
    Generate {
        /// Topic to write about
        topic: String,
        /// Content type, e.g. "blog-post" or "social-media-post"
        #[arg(long, default_value = "social-media-post", value_parser = parse_content_type)]
        content_type: ContentType,
        /// Length tier: short, medium, or long
        #[arg(long, default_value = "medium", value_parser = parse_length)]
        length: LengthTier,
        /// Refinement instruction applied after generation
        #[arg(long)]
        refine: Option<String>,
    },
    /// Generate an image for a topic
    Image {
        /// Topic to illustrate
        topic: String,
        /// Output path for the PNG (defaults to generated.png)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show or update the saved contact details
    Contact {
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
}

fn parse_content_type(input: &str) -> std::result::Result<ContentType, String> {
    let normalized = input.to_lowercase().replace(['-', '_'], " ");
    ContentType::ALL
        .into_iter()
        .find(|ct| ct.to_string().to_lowercase() == normalized)
        .ok_or_else(|| {
            let options: Vec<String> = ContentType::ALL.iter().map(|ct| ct.to_string()).collect();
            format!(
                "Invalid content type '{}'. Expected one of: {}",
                input,
                options.join(", ")
            )
        })
}

fn parse_length(input: &str) -> std::result::Result<LengthTier, String> {
    let normalized = input.to_lowercase();
    LengthTier::ALL
        .into_iter()
        .find(|tier| tier.to_string().to_lowercase() == normalized)
        .ok_or_else(|| format!("Invalid length '{}'. Expected short, medium, or long", input))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contentpro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Generate {
            topic,
            content_type,
            length,
            refine,
        } => run_generate(&topic, content_type, length, refine.as_deref()).await,
        Command::Image { topic, output } => run_image(&topic, output).await,
        Command::Contact {
            phone,
            email,
            address,
        } => run_contact(phone, email, address),
    }
}

async fn run_generate(
    topic: &str,
    content_type: ContentType,
    length: LengthTier,
    refine: Option<&str>,
) -> Result<()> {
    let config = Config::from_env()?;
    let mut session = Session::from_config(&config)?;
    session.set_content_type(content_type);
    session.set_length(length);

    session.generate_text(topic).await;
    if let Some(alert) = session.alert() {
        error!("{}", alert);
        std::process::exit(1);
    }
    if let Some(GenerationResult::Failed(message)) = session.result() {
        error!("{}", message);
        std::process::exit(1);
    }

    if let Some(instruction) = refine {
        session.refine(instruction).await;
        if let Some(alert) = session.alert() {
            error!("{}", alert);
            std::process::exit(1);
        }
    }

    match session.result() {
        Some(GenerationResult::Text(text)) => {
            println!("{}", text);
            Ok(())
        }
        Some(GenerationResult::Failed(message)) => {
            error!("{}", message);
            std::process::exit(1);
        }
        _ => {
            error!("No content was produced");
            std::process::exit(1);
        }
    }
}

async fn run_image(topic: &str, output: Option<PathBuf>) -> Result<()> {
    let config = Config::from_env()?;
    let mut session = Session::from_config(&config)?;

    session.generate_image(topic).await;
    if let Some(alert) = session.alert() {
        error!("{}", alert);
        std::process::exit(1);
    }

    let Some(payload) = session.result().and_then(|r| r.as_image()) else {
        error!("No image was produced");
        std::process::exit(1);
    };
    let Some(data) = payload.base64_data() else {
        error!("No image was produced");
        std::process::exit(1);
    };

    use base64::Engine as _;
    let bytes = base64::engine::general_purpose::STANDARD.decode(data)?;

    let path = output.unwrap_or_else(|| PathBuf::from("generated.png"));
    std::fs::write(&path, bytes)?;
    info!("Wrote image to {}", path.display());

    Ok(())
}

fn run_contact(
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
) -> Result<()> {
    let store = FileContactStore::at_default_location()?;
    let mut contact = store.load()?;

    let updating = phone.is_some() || email.is_some() || address.is_some();
    if let Some(phone) = phone {
        contact.phone = phone;
    }
    if let Some(email) = email {
        contact.email = email;
    }
    if let Some(address) = address {
        contact.address = address;
    }

    if updating {
        store.save(&contact)?;
        info!("Saved contact details to {}", store.path().display());
    }

    println!("Phone:   {}", contact.phone);
    println!("Email:   {}", contact.email);
    println!("Address: {}", contact.address);

    Ok(())
}
