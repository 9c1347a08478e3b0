//! Command-line client for the Engage platform.
//!
//! Every command runs through the same pipeline the UI uses: the
//! session store supplies the credential, the request client unwraps
//! envelopes and reacts to expiry, and `open` walks the guarded router.

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use engage_client::api::types::{
    ActivityDraft, Feedback, Preferences, QuestionnaireSubmit, RegisterRequest,
};
use engage_client::api::{activities, admin, auth, recommendations, rewards, users};
use engage_client::config::Config;
use engage_client::router::NavigationError;
use engage_client::state::AppState;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] engage_client::api::ApiError),
    #[error("sign-in failed")]
    LoginFailed,
    #[error("not signed in")]
    NotSignedIn,
    #[error("{0}")]
    Navigation(#[from] NavigationError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "engage", about = "Engage activity platform client")]
struct Cli {
    /// Backend base URL, e.g. http://localhost:8000/api/v1
    #[arg(long, env = "ENGAGE_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login {
        username: String,
        password: String,
    },
    /// Create an account (does not sign in)
    Register {
        username: String,
        password: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the stored session's user record
    Whoami,
    /// Navigate the guarded route table and print where you land
    Open {
        path: String,
    },
    /// Submit questionnaire answers (20 integers, 1-5)
    Questionnaire {
        answers: Vec<i32>,
    },
    /// Show the behavioral factor profile
    Profile,
    /// Update the behavioral factor profile
    UpdateProfile {
        /// JSON object with only the fields to change
        updates: String,
    },
    /// Update notification preferences
    Preferences {
        #[arg(long, default_value = "daily")]
        frequency: String,
        #[arg(long, value_delimiter = ',')]
        activity_types: Vec<String>,
        #[arg(long, value_delimiter = ',')]
        incentive_types: Vec<String>,
    },
    /// Activity listing and participation
    Activities(ActivitiesCommand),
    /// Personalized recommendations
    Recommendations(RecommendationsCommand),
    /// Rewards earned from activities
    Rewards(RewardsCommand),
    /// Admin console operations
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct ActivitiesCommand {
    #[command(subcommand)]
    command: ActivitiesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ActivitiesSubcommand {
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    Get {
        id: i64,
    },
    Participate {
        id: i64,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        incentive_type: Option<String>,
        #[arg(long)]
        incentive_amount: Option<f64>,
        #[arg(long)]
        target_cluster: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        incentive_type: Option<String>,
        #[arg(long)]
        incentive_amount: Option<f64>,
        #[arg(long)]
        target_cluster: Option<String>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
    },
    SetStatus {
        id: i64,
        status: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct RecommendationsCommand {
    #[command(subcommand)]
    command: RecommendationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RecommendationsSubcommand {
    List {
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    Feedback {
        activity_id: i64,
        #[arg(long, default_value_t = false)]
        clicked: bool,
        #[arg(long, default_value_t = false)]
        accepted: bool,
    },
    Click {
        activity_id: i64,
    },
    Accept {
        activity_id: i64,
    },
    Explain {
        activity_id: i64,
    },
    Stats,
}

#[derive(Args, Debug)]
struct RewardsCommand {
    #[command(subcommand)]
    command: RewardsSubcommand,
}

#[derive(Subcommand, Debug)]
enum RewardsSubcommand {
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long)]
        reward_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    Summary,
    Claim {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Dashboard,
    Users {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    SetUserStatus {
        user_id: i64,
        status: i32,
    },
    UserStats,
    ActivityStats,
    PotentialAnalysis,
    DimensionStrategies,
    Config,
    SetConfig {
        /// JSON object of recommendation engine settings
        config: String,
    },
    ModelInfo,
    TrainModel,
    Clusters,
    RebuildClusters {
        #[arg(long, default_value_t = 10)]
        n_clusters: u32,
    },
    Logs {
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url.clone() {
        config.api.base_url = url;
    }

    let state = AppState::new(&config);

    if let Err(e) = run(&state, cli.command).await {
        eprintln!("error: {}", e);
        if matches!(&e, CliError::Api(api) if api.is_unauthorized()) {
            eprintln!("run `engage login <username>` to start a new session");
        }
        std::process::exit(1);
    }
}

async fn run(state: &AppState, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { username, password } => {
            if state.session.login(&state.api, &username, &password).await {
                println!("signed in as {}", username);
                Ok(())
            } else {
                Err(CliError::LoginFailed)
            }
        }
        Command::Register {
            username,
            password,
            email,
            phone,
        } => {
            let request = RegisterRequest {
                username,
                password,
                email,
                phone,
            };
            let response = auth::register(&state.api, &request).await?;
            println!("registered account {}", response.user_id);
            Ok(())
        }
        Command::Logout => {
            state.session.logout(&state.api).await;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => match state.session.identity()? {
            Some(identity) => print_json(&serde_json::to_value(&identity)?),
            None if state.session.is_logged_in() => {
                println!("signed in, profile not yet fetched");
                Ok(())
            }
            None => Err(CliError::NotSignedIn),
        },
        Command::Open { path } => {
            let landed = state.router.push(&path)?;
            println!("{}", landed);
            Ok(())
        }
        Command::Questionnaire { answers } => {
            let submission = QuestionnaireSubmit { answers };
            let result = users::submit_questionnaire(&state.api, &submission).await?;
            println!("{}", result.message);
            // The answers changed the profile; keep the stored record fresh.
            state.session.fetch_identity(&state.api).await;
            Ok(())
        }
        Command::Profile => {
            let profile = users::profile(&state.api).await?;
            print_json(&profile)
        }
        Command::UpdateProfile { updates } => {
            let parsed: Value = serde_json::from_str(&updates)?;
            let profile = users::update_profile(&state.api, &parsed).await?;
            print_json(&profile)
        }
        Command::Preferences {
            frequency,
            activity_types,
            incentive_types,
        } => {
            let preferences = Preferences {
                frequency,
                activity_types,
                incentive_types,
            };
            let response = users::update_preferences(&state.api, &preferences).await?;
            println!("{}", response.message);
            state.session.fetch_identity(&state.api).await;
            Ok(())
        }
        Command::Activities(activities) => run_activities(state, activities).await,
        Command::Recommendations(recommendations) => {
            run_recommendations(state, recommendations).await
        }
        Command::Rewards(rewards) => run_rewards(state, rewards).await,
        Command::Admin(admin) => run_admin(state, admin).await,
    }
}

async fn run_activities(state: &AppState, command: ActivitiesCommand) -> Result<(), CliError> {
    match command.command {
        ActivitiesSubcommand::List {
            page,
            page_size,
            name,
            status,
            kind,
        } => {
            let query = activities::ActivityQuery {
                page,
                page_size,
                name,
                status,
                kind,
            };
            let listing = activities::list(&state.api, &query).await?;
            println!("{} activities (showing page {})", listing.total, listing.page);
            for activity in &listing.items {
                println!(
                    "  #{} {} [{}]",
                    activity.id,
                    activity.title,
                    activity.status.as_deref().unwrap_or("unknown")
                );
            }
            Ok(())
        }
        ActivitiesSubcommand::Get { id } => {
            let activity = activities::get(&state.api, id).await?;
            print_json(&format_activity(&activity))
        }
        ActivitiesSubcommand::Participate { id } => {
            let result = activities::participate(&state.api, id).await?;
            println!(
                "{} (reward {}: {} {})",
                result.message, result.reward.id, result.reward.amount, result.reward.reward_type
            );
            Ok(())
        }
        ActivitiesSubcommand::Create {
            title,
            description,
            kind,
            incentive_type,
            incentive_amount,
            target_cluster,
            start_time,
            end_time,
        } => {
            let draft = ActivityDraft {
                title: Some(title),
                description,
                kind,
                incentive_type,
                incentive_amount,
                target_cluster,
                start_time,
                end_time,
            };
            let activity = activities::create(&state.api, &draft).await?;
            println!("created activity {}", activity.id);
            Ok(())
        }
        ActivitiesSubcommand::Update {
            id,
            title,
            description,
            kind,
            incentive_type,
            incentive_amount,
            target_cluster,
            start_time,
            end_time,
        } => {
            let draft = ActivityDraft {
                title,
                description,
                kind,
                incentive_type,
                incentive_amount,
                target_cluster,
                start_time,
                end_time,
            };
            let activity = activities::update(&state.api, id, &draft).await?;
            println!("updated activity {}", activity.id);
            Ok(())
        }
        ActivitiesSubcommand::SetStatus { id, status } => {
            let activity = activities::set_status(&state.api, id, &status).await?;
            println!(
                "activity {} is now {}",
                activity.id,
                activity.status.as_deref().unwrap_or("unknown")
            );
            Ok(())
        }
        ActivitiesSubcommand::Delete { id } => {
            let response = activities::delete(&state.api, id).await?;
            println!("{}", response.message);
            Ok(())
        }
    }
}

async fn run_recommendations(
    state: &AppState,
    command: RecommendationsCommand,
) -> Result<(), CliError> {
    match command.command {
        RecommendationsSubcommand::List { limit, refresh } => {
            let items = recommendations::list(&state.api, limit, refresh).await?;
            for item in &items {
                println!(
                    "  #{} {} (score {:.2}){}",
                    item.activity_id,
                    item.title,
                    item.score,
                    item.reason
                        .as_deref()
                        .map(|r| format!(" -- {}", r))
                        .unwrap_or_default()
                );
            }
            Ok(())
        }
        RecommendationsSubcommand::Feedback {
            activity_id,
            clicked,
            accepted,
        } => {
            let feedback = Feedback {
                is_clicked: clicked,
                is_accepted: accepted,
            };
            let response = recommendations::feedback(&state.api, activity_id, &feedback).await?;
            println!("{}", response.message);
            Ok(())
        }
        RecommendationsSubcommand::Click { activity_id } => {
            let response = recommendations::click(&state.api, activity_id).await?;
            println!("{}", response.message);
            Ok(())
        }
        RecommendationsSubcommand::Accept { activity_id } => {
            let response = recommendations::accept(&state.api, activity_id).await?;
            println!("{}", response.message);
            Ok(())
        }
        RecommendationsSubcommand::Explain { activity_id } => {
            let explanation = recommendations::explain(&state.api, activity_id).await?;
            print_json(&explanation)
        }
        RecommendationsSubcommand::Stats => {
            let stats = recommendations::stats(&state.api).await?;
            println!(
                "{} recommendations, click rate {:.1}%, accept rate {:.1}%",
                stats.total_recommendations,
                stats.click_rate * 100.0,
                stats.accept_rate * 100.0
            );
            Ok(())
        }
    }
}

async fn run_rewards(state: &AppState, command: RewardsCommand) -> Result<(), CliError> {
    match command.command {
        RewardsSubcommand::List {
            page,
            page_size,
            reward_type,
            status,
        } => {
            let query = rewards::RewardQuery {
                page,
                page_size,
                reward_type,
                status,
            };
            let listing = rewards::list(&state.api, &query).await?;
            println!("{} rewards (page {})", listing.total, listing.page);
            for reward in &listing.items {
                println!(
                    "  #{} {} {} [{}] from {}",
                    reward.id,
                    reward.amount,
                    reward.reward_type,
                    reward.status,
                    reward.activity_name.as_deref().unwrap_or("unknown activity")
                );
            }
            Ok(())
        }
        RewardsSubcommand::Summary => {
            let summary = rewards::summary(&state.api).await?;
            println!(
                "total {:.2}, points {}, pending {}",
                summary.total_amount, summary.total_points, summary.pending_count
            );
            Ok(())
        }
        RewardsSubcommand::Claim { id } => {
            let response = rewards::claim(&state.api, id).await?;
            println!("{}", response.message);
            Ok(())
        }
    }
}

async fn run_admin(state: &AppState, command: AdminCommand) -> Result<(), CliError> {
    match command.command {
        AdminSubcommand::Dashboard => print_json(&admin::dashboard(&state.api).await?),
        AdminSubcommand::Users { page, page_size } => {
            print_json(&admin::users(&state.api, page, page_size).await?)
        }
        AdminSubcommand::SetUserStatus { user_id, status } => {
            let response = admin::set_user_status(&state.api, user_id, status).await?;
            println!("{}", response.message);
            Ok(())
        }
        AdminSubcommand::UserStats => print_json(&admin::user_stats(&state.api).await?),
        AdminSubcommand::ActivityStats => print_json(&admin::activity_stats(&state.api).await?),
        AdminSubcommand::PotentialAnalysis => {
            print_json(&admin::potential_analysis(&state.api).await?)
        }
        AdminSubcommand::DimensionStrategies => {
            print_json(&admin::dimension_strategies(&state.api).await?)
        }
        AdminSubcommand::Config => print_json(&admin::config(&state.api).await?),
        AdminSubcommand::SetConfig { config } => {
            let parsed: Value = serde_json::from_str(&config)?;
            print_json(&admin::update_config(&state.api, &parsed).await?)
        }
        AdminSubcommand::ModelInfo => print_json(&admin::model_info(&state.api).await?),
        AdminSubcommand::TrainModel => {
            let response = admin::train_model(&state.api).await?;
            println!("{}", response.message);
            Ok(())
        }
        AdminSubcommand::Clusters => print_json(&admin::clusters(&state.api).await?),
        AdminSubcommand::RebuildClusters { n_clusters } => {
            print_json(&admin::rebuild_clusters(&state.api, n_clusters).await?)
        }
        AdminSubcommand::Logs {
            level,
            page,
            page_size,
        } => {
            let query = admin::LogQuery {
                level,
                page,
                page_size,
            };
            print_json(&admin::logs(&state.api, &query).await?)
        }
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{}", rendered);
    Ok(())
}

fn format_activity(activity: &engage_client::api::types::Activity) -> Value {
    serde_json::json!({
        "id": activity.id,
        "title": activity.title,
        "description": activity.description,
        "type": activity.kind,
        "incentive_type": activity.incentive_type,
        "incentive_amount": activity.incentive_amount,
        "target_cluster": activity.target_cluster,
        "status": activity.status,
        "view_count": activity.view_count,
        "participate_count": activity.participate_count,
        "start_time": activity.start_time,
        "end_time": activity.end_time,
    })
}
