use std::path::PathBuf;

use anyhow::{Context, bail};
use leaderboard::Metric;
use match_report::{Analysis, Cache, Config, MatchReport, read_rows_from_path};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracking::Dataset;
use zones::ZoneDistribution;

const DEFAULT_LOG_FILTER: &str = "match_report=info,preprocessing=info";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MetricArg {
    Total,
    Zone5,
    TopSpeed,
    All,
}

impl MetricArg {
    fn metrics(self) -> &'static [Metric] {
        match self {
            MetricArg::Total => &[Metric::TotalDistance],
            MetricArg::Zone5 => &[Metric::Zone5Distance],
            MetricArg::TopSpeed => &[Metric::TopSpeed],
            MetricArg::All => &Metric::ALL,
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Tracking export: entity, time (s), x (m), y (m), speed (m/s)
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("match_data.csv"), required = false)]
    pub input: PathBuf,
    /// Output csv file for the ball series with its possessor. _Note_: will truncate old file if exists
    #[arg(short, long, default_value_os_t = std::env::current_dir().unwrap_or_default().join("possession.csv"), required = false)]
    pub output: PathBuf,
    /// JSON config file, missing keys keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Leaderboard rows to show
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
    /// Leaderboard to show
    #[arg(short, long, value_enum, default_value_t = MetricArg::All)]
    pub metric: MetricArg,
    /// Only show the zone distribution of this player
    #[arg(long)]
    pub player: Option<String>,
    /// Smoothing window in seconds
    #[arg(long)]
    pub window: Option<f64>,
    /// Minimum adjusted speed in m/s
    #[arg(long)]
    pub min_speed: Option<f64>,
    /// Identifier of the ball rows
    #[arg(long)]
    pub ball_id: Option<String>,
    /// Fail on the first unreadable record instead of skipping it
    #[arg(long, default_value_t = false, required = false)]
    pub strict: bool,
    /// Print the whole report as JSON instead of tables
    #[arg(long, default_value_t = false, required = false)]
    pub json: bool,
    /// Don't save possession csv
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(top_k) = self.top_k {
            config.ranking.top_k = top_k;
        }
        if let Some(window) = self.window {
            config.cleaning.smoothing.window = window;
        }
        if let Some(min_speed) = self.min_speed {
            config.cleaning.min_speed = min_speed;
        }
        if let Some(ball_id) = &self.ball_id {
            config.ball_id = ball_id.clone();
        }

        config.validate().context("Invalid configuration")?;

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = <Args as clap::Parser>::parse();
    let config = args.config()?;

    let input = read_rows_from_path(&args.input, args.strict)
        .with_context(|| format!("Failed to read input file {}", args.input.display()))?;
    let dataset = Dataset::from_rows(input.rows, &config.ball_id)
        .context("Failed to ingest tracking rows")?;

    info!(
        players = dataset.players.len(),
        samples = dataset.len(),
        skipped = input.skipped,
        "loaded session"
    );

    let cache = Cache::new();
    let analysis = Analysis::new(&dataset, config)?.with_cache(&cache);
    let report = analysis.report()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_leaderboards(&report, args.metric.metrics());

        match &args.player {
            Some(player) => match analysis.zone_distribution(player)? {
                Some(zones) => print_zones(&format!("player {player}"), &zones),
                None => bail!("Unknown player {player}"),
            },
            None => {
                for (player, zones) in &report.zones {
                    print_zones(&format!("player {player}"), zones);
                }
            }
        }

        print_zones("the ball", &report.ball_zones);
        print_possession(&report);
    }

    if !args.dry {
        info!(output = %args.output.display(), "saving possession series");

        let mut wrt = csv::Writer::from_path(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
        for record in &report.possession {
            wrt.serialize(record)?;
        }
        wrt.flush()?;
    }

    info!("done");

    Ok(())
}

fn print_leaderboards(report: &MatchReport, metrics: &[Metric]) {
    for &metric in metrics {
        println!("\n{}", metric.title());

        for (rank, row) in report.ranking(metric).iter().enumerate() {
            println!("{:>3}. {:<12} {}", rank + 1, row.entity_id, row.formatted_label);
        }
    }
}

fn print_zones(whom: &str, zones: &ZoneDistribution) {
    let [left, middle, right] = zones.labels();

    println!("\nPercentage of time spent by {whom} in:");
    println!("Left Third = {left}, Middle Third = {middle}, Right Third = {right}");
}

fn print_possession(report: &MatchReport) {
    println!("\nBall Possession Leaderboard");

    for (rank, row) in report.possession_share.iter().enumerate() {
        println!("{:>3}. {:<12} {}", rank + 1, row.entity_id, row.formatted_label);
    }

    let unassigned = report
        .possession
        .iter()
        .filter(|this| this.possessor.is_none())
        .count();
    println!("  ball samples without a player nearby: {unassigned}");
}
