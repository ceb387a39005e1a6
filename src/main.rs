use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use authdemo::services::profile::validate_update;
use authdemo::{
    AllowListVerifier, AuthError, AuthService, Config, FileStore, Notification, Notifier, Severity, User, UserPatch,
};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to load stored session: {0}")]
    Init(#[from] AuthError),
    #[error("{0} failed")]
    OperationFailed(&'static str),
    #[error("not signed in; run `authdemo login` first")]
    NotSignedIn,
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}

#[derive(Parser, Debug)]
#[command(name = "authdemo", about = "Mock authentication session demo")]
struct Cli {
    /// Session store file.
    #[arg(long, env = "AUTHDEMO_STORE_PATH")]
    store: Option<PathBuf>,

    /// Simulated latency for register, login, and profile updates.
    #[arg(long, env = "AUTHDEMO_LATENCY_MS")]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether a session is active.
    Status,
    /// Create an account and sign in.
    Register {
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    /// Sign in with an allow-listed email and any password.
    Login { email: String, password: String },
    /// Sign out and clear the stored session.
    Logout,
    /// View or edit the signed-in user's profile.
    Profile(ProfileCommand),
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    /// Print the signed-in user's profile.
    Show,
    /// Change one or more profile fields.
    Update(ProfileUpdateArgs),
}

#[derive(Args, Debug)]
struct ProfileUpdateArgs {
    /// New display handle.
    #[arg(long)]
    username: Option<String>,
    /// New email address.
    #[arg(long)]
    email: Option<String>,
    /// New given name.
    #[arg(long)]
    first_name: Option<String>,
    /// New family name.
    #[arg(long)]
    last_name: Option<String>,
}

impl From<ProfileUpdateArgs> for UserPatch {
    fn from(args: ProfileUpdateArgs) -> Self {
        Self {
            id: None,
            username: args.username,
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
        }
    }
}

/// Prints notifications as they arrive.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => println!("{}: {}", notification.title, notification.description),
            Severity::Destructive => eprintln!("{}: {}", notification.title, notification.description),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    if let Some(ms) = cli.latency_ms {
        config.latency = Duration::from_millis(ms);
    }

    let store = Arc::new(FileStore::new(&config.store_path));
    let verifier = Arc::new(AllowListVerifier::new(config.allowed_emails.clone()));
    let service = AuthService::init(store.clone(), verifier.clone(), Arc::new(ConsoleNotifier), config.auth_options())?;

    match cli.command {
        Command::Status => {
            run_status(&service, &store, &verifier);
            Ok(())
        }
        Command::Register { username, email, password, confirm_password } => {
            if service.register(&username, &email, &password, &confirm_password).await {
                Ok(())
            } else {
                Err(CliError::OperationFailed("registration"))
            }
        }
        Command::Login { email, password } => {
            if service.login(&email, &password).await {
                Ok(())
            } else {
                Err(CliError::OperationFailed("login"))
            }
        }
        Command::Logout => {
            service.logout().await;
            Ok(())
        }
        Command::Profile(profile) => run_profile(&service, profile).await,
    }
}

fn run_status(service: &AuthService, store: &FileStore, verifier: &AllowListVerifier) {
    match service.user() {
        Some(user) => println!("Signed in as {} <{}>", user.username, user.email),
        None => println!("Not signed in (demo accounts: {})", verifier.allowed().join(", ")),
    }
    println!("Session file: {}", store.path().display());
}

async fn run_profile(service: &AuthService, profile: ProfileCommand) -> Result<(), CliError> {
    if service.state().should_redirect_unauth() {
        return Err(CliError::NotSignedIn);
    }
    let Some(user) = service.user() else {
        return Err(CliError::NotSignedIn);
    };

    match profile.command {
        ProfileSubcommand::Show => {
            print_user(&user);
            Ok(())
        }
        ProfileSubcommand::Update(args) => {
            let patch = UserPatch::from(args);
            if patch.is_empty() {
                return Err(CliError::InvalidProfile("nothing to update".to_owned()));
            }
            let errors = validate_update(&user, &patch);
            if !errors.is_empty() {
                let messages = errors.iter().map(|e| e.message).collect::<Vec<_>>();
                return Err(CliError::InvalidProfile(messages.join("; ")));
            }

            if !service.update_profile(patch).await {
                return Err(CliError::OperationFailed("profile update"));
            }
            if let Some(user) = service.user() {
                print_user(&user);
            }
            Ok(())
        }
    }
}

fn print_user(user: &User) {
    fn or_dash(value: Option<&str>) -> &str {
        value.filter(|v| !v.is_empty()).unwrap_or("-")
    }

    println!("id:         {}", user.id);
    println!("username:   {}", user.username);
    println!("email:      {}", user.email);
    println!("first name: {}", or_dash(user.first_name.as_deref()));
    println!("last name:  {}", or_dash(user.last_name.as_deref()));
}
