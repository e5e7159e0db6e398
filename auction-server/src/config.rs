use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    humantime_serde::re::humantime,
    std::time::Duration,
};

mod server;

const DEFAULT_AUCTION_DURATION: Duration = Duration::from_secs(10 * 60);
const DEFAULT_AUCTION_INTERVAL: Duration = Duration::from_secs(20);
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

const MAX_AUCTION_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);
const MAX_AUCTION_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);
const MAX_STORE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction server service.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub auction: AuctionOptions,
}

/// Durations are read as text so a malformed value can fall back to its default instead of
/// refusing to start.
#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Auction Options")]
#[group(id = "Auction")]
pub struct AuctionOptions {
    /// How long a new auction accepts bids, e.g. `10m` or `90s`.
    #[arg(long = "auction-duration")]
    #[arg(env = "AUCTION_DURATION")]
    #[arg(default_value = "10m")]
    pub auction_duration: String,
    /// Interval between two runs of the closure sweeper.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    #[arg(default_value = "20s")]
    pub auction_interval: String,
    /// Upper bound for a single store call.
    #[arg(long = "store-timeout")]
    #[arg(env = "STORE_TIMEOUT")]
    #[arg(default_value = "5s")]
    pub store_timeout:    String,
}

impl AuctionOptions {
    pub fn auction_duration(&self) -> Duration {
        parse_duration_or_default(
            "auction-duration",
            &self.auction_duration,
            DEFAULT_AUCTION_DURATION,
            MAX_AUCTION_DURATION,
        )
    }

    pub fn auction_interval(&self) -> Duration {
        parse_duration_or_default(
            "auction-interval",
            &self.auction_interval,
            DEFAULT_AUCTION_INTERVAL,
            MAX_AUCTION_INTERVAL,
        )
    }

    pub fn store_timeout(&self) -> Duration {
        parse_duration_or_default(
            "store-timeout",
            &self.store_timeout,
            DEFAULT_STORE_TIMEOUT,
            MAX_STORE_TIMEOUT,
        )
    }
}

/// Values outside `(0, max]` are rejected like unparsable ones.
fn parse_duration_or_default(name: &str, value: &str, default: Duration, max: Duration) -> Duration {
    match humantime::parse_duration(value.trim()) {
        Ok(duration) if duration.is_zero() => {
            tracing::warn!(name, value, default = ?default, "Duration must be positive, using default");
            default
        }
        Ok(duration) if duration > max => {
            tracing::warn!(name, value, default = ?default, max = ?max, "Duration is too long, using default");
            default
        }
        Ok(duration) => duration,
        Err(err) => {
            tracing::warn!(name, value, default = ?default, error = %err, "Invalid duration, using default");
            default
        }
    }
}
