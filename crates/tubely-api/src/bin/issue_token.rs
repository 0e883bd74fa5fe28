//! Mint an access token for a user, optionally creating a video record they own.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tubely_api::auth::JwtService;
use tubely_core::models::NewVideo;
use tubely_core::Config;
use tubely_db::{VideoRepository, VideoStore};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "issue_token")]
#[command(about = "Issue a Tubely access token (and optionally seed a video)")]
struct Args {
    /// User the token is issued for (random when omitted)
    #[arg(long, value_name = "UUID")]
    user_id: Option<Uuid>,

    /// Token lifetime in hours
    #[arg(long, default_value = "24")]
    ttl_hours: i64,

    /// Create a video owned by the user with this title
    #[arg(long, value_name = "TITLE")]
    create_video: Option<String>,

    /// Description for the created video
    #[arg(long, default_value = "")]
    description: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    config.validate()?;

    let user_id = args.user_id.unwrap_or_else(Uuid::new_v4);
    let jwt = JwtService::new(config.jwt_secret());
    let token = jwt.issue_access_token(user_id, chrono::Duration::hours(args.ttl_hours))?;

    println!("user_id: {}", user_id);
    println!("token:   {}", token);

    if let Some(title) = args.create_video {
        let pool = tubely_api::setup::database::setup_database(&config).await?;
        let videos: Arc<dyn VideoStore> = Arc::new(VideoRepository::new(pool));
        let video = videos
            .create_video(NewVideo {
                title,
                description: args.description,
                user_id,
            })
            .await?;
        println!("video:   {}", serde_json::to_string_pretty(&video)?);
    }

    Ok(())
}
