//! Pressroom - sample run
//!
//! Loads configuration, wires the application and walks through one
//! account, one post and one session, then drives the rate limiter until
//! it denies.

use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pressroom::application::handlers::{
    CreatePostCommand, CreateSessionCommand, CreateUserCommand, ListPostsOptions, ListPostsQuery,
    PostSort, PublishPostCommand, ResetRateLimitCommand, UpdatePreferencesCommand,
    ValidateSessionQuery,
};
use pressroom::config::AppConfig;
use pressroom::ports::{CallerId, PostFilter};
use pressroom::App;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_validated()?;
    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        strategy = %config.rate_limit.strategy,
        "starting pressroom"
    );

    let app = App::build(&config)?;
    run_sample(&app).await?;
    app.shutdown().await;
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.server.log_level.clone().into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.server.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_sample(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let user = app
        .create_user()
        .handle(CreateUserCommand {
            email: "editor@example.com".to_string(),
            password: "correct-horse".to_string(),
            name: Some("Editor".to_string()),
        })
        .await?;

    let post = app
        .create_post()
        .handle(CreatePostCommand {
            title: "Hello, pressroom".to_string(),
            content: "First post from the sample run.".to_string(),
            author_id: user.id,
        })
        .await?;
    app.publish_post()
        .handle(PublishPostCommand { post_id: post.id() })
        .await?;

    let latest = app
        .list_posts()
        .handle(ListPostsQuery {
            filter: PostFilter {
                author_id: Some(user.id),
                published: Some(true),
            },
            options: ListPostsOptions {
                sort_by: Some(PostSort::Date),
                limit: Some(10),
            },
        })
        .await?;
    tracing::info!(published = latest.len(), "posts listed");

    app.update_preferences()
        .handle(UpdatePreferencesCommand {
            user_id: user.id,
            changes: json!({ "theme": "dark" }),
        })
        .await?;

    let session = app
        .create_session()
        .handle(CreateSessionCommand { user_id: user.id })
        .await?;
    let validated = app
        .validate_session()
        .handle(ValidateSessionQuery {
            token: session.token.clone(),
        })
        .await?;
    tracing::info!(user_id = %validated.user_id, expires_at = %validated.expires_at, "session valid");

    let caller = CallerId::from(user.id);
    let limiter = app.check_rate_limit();
    let mut admitted = 0u32;
    loop {
        match limiter.handle(&caller) {
            Ok(_) => admitted += 1,
            Err(err) => {
                tracing::info!(admitted, error = %err, "limiter engaged");
                break;
            }
        }
    }

    app.reset_rate_limit().handle(ResetRateLimitCommand {
        caller: caller.clone(),
    });
    let after_reset = limiter.handle(&caller)?;
    tracing::info!(remaining = after_reset.remaining, "quota restored after reset");
    Ok(())
}
