use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to field config TOML (speakers, tunables, startup commands)
    #[arg(long, default_value = "phonotope.toml")]
    pub config: String,

    /// Number of ticks to run
    #[arg(long, default_value_t = 100)]
    pub ticks: u32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 50)]
    pub period_ms: u64,

    /// Stop early once no sounds are live
    #[arg(long, default_value_t = true, num_args = 0..=1, default_missing_value = "true")]
    pub stop_when_empty: bool,
}
