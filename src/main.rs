use anyhow::Result;
use clap::Parser;
use eoctl::api::{ArtworkId, DeviceId};
use eoctl::commands::{self, Options, parse_time_of_day};
use std::path::PathBuf;

/// eoctl - control an Electric Objects picture frame
///
/// Signs in with the account credentials from EO_USER / EO_PASS or a
/// two-line credentials file (username, then password), which wins.
///
/// Examples:
///   eoctl               # Display a random favorite on the first frame
///   eoctl display 1136  # Display artwork 1136
#[derive(Parser, Debug)]
#[command(author, version = env!("EOCTL_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Service root URL
    #[arg(long = "base-url", env = "EO_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Credentials file (defaults to .credentials)
    #[arg(
        long = "credentials",
        short = 'c',
        env = "EO_CREDENTIALS_FILE",
        value_name = "PATH",
        global = true
    )]
    credentials_file: Option<PathBuf>,

    /// Maximum number of favorites considered for random display
    #[arg(
        long = "max-favorites",
        env = "EO_MAX_FAVORITES",
        value_name = "N",
        global = true
    )]
    max_favorites: Option<usize>,

    /// Minimum time between requests, in milliseconds
    #[arg(
        long = "request-interval-ms",
        env = "EO_REQUEST_INTERVAL_MS",
        value_name = "MS",
        global = true
    )]
    request_interval_ms: Option<u64>,

    /// Delay before the first retry, in milliseconds (doubled for each retry)
    #[arg(
        long = "retry-delay-ms",
        env = "EO_RETRY_DELAY_MS",
        value_name = "MS",
        global = true
    )]
    retry_delay_ms: Option<u64>,

    /// Number of retries after a failed request
    #[arg(
        long = "retries",
        env = "EO_RETRIES",
        value_name = "N",
        global = true
    )]
    retries: Option<u32>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Display a random favorite other than the current artwork (default)
    Random(DeviceArgs),

    /// Display an artwork by id
    Display(ArtworkArgs),

    /// Mark an artwork as favorite
    Favorite(ArtworkArgs),

    /// Remove an artwork from the favorites
    Unfavorite(ArtworkArgs),

    /// List favorite artworks
    Favorites,

    /// List devices
    Devices,

    /// Show user information
    User,

    /// Switch a device's backlight on or off
    Backlight(SwitchArgs),

    /// Enable or disable device sleep
    Sleep(SwitchArgs),

    /// Set when a device sleeps and wakes up
    SleepSchedule(ScheduleArgs),

    /// Show the id of the artwork currently displayed
    Current(DeviceArgs),
}

#[derive(clap::Args, Debug, Default)]
struct DeviceArgs {
    /// Device id (defaults to the first device)
    #[arg(long, short = 'd', value_name = "ID")]
    device: Option<String>,
}

#[derive(clap::Args, Debug)]
struct ArtworkArgs {
    /// Artwork id
    #[arg(value_name = "ID")]
    id: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Switch {
    #[value(alias = "enable")]
    On,
    #[value(alias = "disable")]
    Off,
}

#[derive(clap::Args, Debug)]
struct SwitchArgs {
    #[arg(value_enum)]
    state: Switch,

    #[command(flatten)]
    device: DeviceArgs,
}

#[derive(clap::Args, Debug)]
struct ScheduleArgs {
    /// Wake-up time, HH:MM:SS (24-hour)
    #[arg(long, value_parser = parse_time_of_day)]
    wake: String,

    /// Sleep time, HH:MM:SS (24-hour)
    #[arg(long, value_parser = parse_time_of_day)]
    sleep: String,

    #[command(flatten)]
    device: DeviceArgs,
}

impl DeviceArgs {
    fn device_id(&self) -> Option<DeviceId> {
        self.device.as_deref().map(DeviceId::from)
    }
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            base_url: self.base_url.clone(),
            credentials_file: self.credentials_file.clone(),
            max_favorites: self.max_favorites,
            request_interval_ms: self.request_interval_ms,
            retry_delay_ms: self.retry_delay_ms,
            retries: self.retries,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = eoctl::runtime::RealRuntime;
    let mut client = commands::build_client(runtime, &cli.options());

    match cli.command.unwrap_or(Commands::Random(DeviceArgs::default())) {
        Commands::Random(args) => commands::random(&mut client, args.device_id()).await?,
        Commands::Display(args) => commands::display(&mut client, ArtworkId::from(args.id)).await?,
        Commands::Favorite(args) => {
            commands::favorite(&mut client, ArtworkId::from(args.id)).await?
        }
        Commands::Unfavorite(args) => {
            commands::unfavorite(&mut client, ArtworkId::from(args.id)).await?
        }
        Commands::Favorites => commands::favorites(&mut client).await?,
        Commands::Devices => commands::devices(&mut client).await?,
        Commands::User => commands::user(&mut client).await?,
        Commands::Backlight(args) => {
            commands::backlight(&mut client, args.device.device_id(), args.state == Switch::On)
                .await?
        }
        Commands::Sleep(args) => {
            commands::sleep(&mut client, args.device.device_id(), args.state == Switch::On).await?
        }
        Commands::SleepSchedule(args) => {
            commands::sleep_schedule(&mut client, args.device.device_id(), &args.wake, &args.sleep)
                .await?
        }
        Commands::Current(args) => commands::current(&mut client, args.device_id()).await?,
    }
    Ok(())
}
