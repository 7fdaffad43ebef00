use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use city_agenda::feeds::{
    DEFAULT_EVENTS_URL, DEFAULT_PARKINGS_URL, DEFAULT_STATIONS_URL, FeedClient, FeedConfig,
    FeedError,
};
use city_agenda::report::{Report, ReportError, ReportFormat, render, write_report};
use city_agenda::search::{
    DEFAULT_RADIUS_KM, DEFAULT_STATION_CAP, DateQuery, Query, SearchConfig, SearchError,
    select_events,
};

/// Find cultural events in Barcelona and what is around them.
#[derive(Parser, Debug)]
#[command(name = "city-agenda", version)]
struct Cli {
    /// Text query: 'term', [all, of, these] or (any, of, these), nested freely
    #[arg(short, long, value_name = "QUERY")]
    key: Option<String>,

    /// Date query: dd/mm/yyyy, (dd/mm/yyyy, from_days, to_days) or a [list] of those
    #[arg(short, long, value_name = "DATES", allow_hyphen_values = true)]
    date: Option<String>,

    /// Where to write the report
    #[arg(short, long, default_value = "index.html")]
    output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Html)]
    format: ReportFormat,

    /// Search radius around each event, in kilometres
    #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,

    /// Maximum stations listed per event (0 lists all)
    #[arg(long, default_value_t = DEFAULT_STATION_CAP)]
    station_cap: usize,

    /// Bicing station-status feed
    #[arg(long, env = "CITY_AGENDA_STATIONS_URL", default_value = DEFAULT_STATIONS_URL)]
    stations_url: String,

    /// Parking lot listing feed
    #[arg(long, env = "CITY_AGENDA_PARKINGS_URL", default_value = DEFAULT_PARKINGS_URL)]
    parkings_url: String,

    /// Cultural agenda feed
    #[arg(long, env = "CITY_AGENDA_EVENTS_URL", default_value = DEFAULT_EVENTS_URL)]
    events_url: String,

    /// HTTP timeout in seconds
    #[arg(long, env = "CITY_AGENDA_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// Log timings and intermediate counts
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("could not load the open-data feeds: {0}")]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,city_agenda={level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), RunError> {
    // Parse queries before touching the network
    let query = cli.key.as_deref().map(Query::parse).transpose()?;
    let dates = cli.date.as_deref().map(DateQuery::parse).transpose()?;

    let search_config = SearchConfig::default()
        .with_radius(cli.radius)
        .with_station_cap((cli.station_cap > 0).then_some(cli.station_cap));

    let feed_config = FeedConfig::default()
        .with_stations_url(cli.stations_url)
        .with_parkings_url(cli.parkings_url)
        .with_events_url(cli.events_url)
        .with_timeout(cli.timeout);

    let feeds = FeedClient::new(feed_config)?.fetch_all().await?;

    let pool = feeds.events.pool();
    let selected = select_events(&pool, query.as_ref(), dates.as_ref());
    info!(
        events = feeds.events.len(),
        selected = selected.len(),
        "selected events"
    );

    let mut report = Report::build(&selected, &feeds.stations, &feeds.parkings, &search_config);
    if let Some(q) = &cli.key {
        report = report.with_query(q.as_str());
    }
    if let Some(d) = &cli.date {
        report = report.with_dates(d.as_str());
    }

    let rendered = render(&report, cli.format)?;
    write_report(&cli.output, &rendered)?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["city-agenda"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("index.html"));
        assert_eq!(cli.format, ReportFormat::Html);
        assert_eq!(cli.radius, 0.5);
        assert_eq!(cli.station_cap, 5);
        assert!(cli.key.is_none());
    }

    #[test]
    fn cli_queries() {
        let cli = Cli::try_parse_from([
            "city-agenda",
            "--key",
            "['cinema', 'gràcia']",
            "--date",
            "(01/03/2024, -1, 2)",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.key.as_deref(), Some("['cinema', 'gràcia']"));
        assert_eq!(cli.format, ReportFormat::Json);
        assert!(DateQuery::parse(cli.date.as_deref().unwrap()).is_ok());
    }
}
