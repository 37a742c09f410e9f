use analytics::{
    AnalyticsEngine, FilterConfig, ReportView, RoleFilter, Scope, Selection, SortConfig, SortKey,
    SortOrder, UserFilter, UserSortKey, recent, recent_users, sort_users, summarize_users,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Settings, load_settings};
use core_types::{ModelKind, PredictionRecord, PredictionStatus};
use exporter::{CsvExporter, ExportLayout};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod render;
mod snapshot;

/// The main entry point for the Stockcast dashboard client.
fn main() -> anyhow::Result<()> {
    // Load STOCKCAST__* overrides from a .env file, if there is one.
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the rendered views.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Parse command-line arguments
    let cli = Cli::parse();
    let settings = load_settings(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    // Execute the appropriate command
    match cli.command {
        Commands::Overview(args) => handle_overview(args, &settings),
        Commands::History(args) => handle_history(args, &settings),
        Commands::Results(args) => handle_results(args, &settings),
        Commands::Dashboard(args) => handle_dashboard(args, &settings),
        Commands::Users(args) => handle_users(args, &settings),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Reporting views over a stock-prediction service's records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the optional TOML settings file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// A user's dashboard: summary cards and their most recent predictions.
    Overview(OverviewArgs),
    /// A single user's prediction history.
    History(HistoryArgs),
    /// The administrative table of every user's predictions.
    Results(ResultsArgs),
    /// Admin overview: summary cards, stock leaderboard and recent activity.
    Dashboard(DashboardArgs),
    /// The admin user list.
    Users(UsersArgs),
}

#[derive(Parser)]
struct SortArgs {
    /// Sort column: date, user, stock, predicted or confidence.
    #[arg(long)]
    sort: Option<SortKey>,

    /// Sort direction: asc or desc.
    #[arg(long)]
    order: Option<SortOrder>,
}

impl SortArgs {
    fn resolve(&self, settings: &Settings) -> SortConfig {
        SortConfig::new(
            self.sort.unwrap_or(settings.views.default_sort_key),
            self.order.unwrap_or(settings.views.default_sort_order),
        )
    }
}

#[derive(Parser)]
struct OverviewArgs {
    /// A saved `/api/history` response.
    #[arg(long)]
    input: PathBuf,

    /// The signed-in user the history belongs to.
    #[arg(long)]
    user: String,
}

#[derive(Parser)]
struct HistoryArgs {
    /// A saved `/api/history` response.
    #[arg(long)]
    input: PathBuf,

    /// The signed-in user the history belongs to.
    #[arg(long)]
    user: String,

    /// all, pending or completed.
    #[arg(long, default_value = "all")]
    scope: Scope,

    /// A stock symbol, or `all`.
    #[arg(long, default_value = "all")]
    stock: Selection<String>,

    #[command(flatten)]
    sort: SortArgs,

    /// Directory to write the CSV download into.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Parser)]
struct ResultsArgs {
    /// A saved `/api/admin/predictions` response.
    #[arg(long)]
    input: PathBuf,

    /// Case-insensitive match on username or stock symbol.
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, default_value = "all")]
    stock: Selection<String>,

    /// lstm, linear or all.
    #[arg(long, default_value = "all")]
    model: Selection<ModelKind>,

    /// pending, accurate, overestimated, underestimated or all.
    #[arg(long, default_value = "all")]
    status: Selection<PredictionStatus>,

    #[command(flatten)]
    sort: SortArgs,

    /// Directory to write the CSV download into.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Parser)]
struct DashboardArgs {
    /// A saved `/api/admin/predictions` response.
    #[arg(long)]
    predictions: PathBuf,

    /// A saved `/api/admin/users` response.
    #[arg(long)]
    users: PathBuf,

    /// A saved `/api/stats` response, shown alongside the locally derived figures.
    #[arg(long)]
    stats: Option<PathBuf>,
}

#[derive(Parser)]
struct UsersArgs {
    /// A saved `/api/admin/users` response.
    #[arg(long)]
    input: PathBuf,

    /// Case-insensitive match on username or email.
    #[arg(long, default_value = "")]
    search: String,

    /// all, admin or user.
    #[arg(long, default_value = "all")]
    role: RoleFilter,

    /// date, username or predictions.
    #[arg(long, default_value = "date")]
    sort: UserSortKey,

    #[arg(long, default_value = "desc")]
    order: SortOrder,
}

// ==============================================================================
// View Handlers
// ==============================================================================

fn handle_overview(args: OverviewArgs, settings: &Settings) -> anyhow::Result<()> {
    let records = snapshot::load_history(&args.input, &args.user)?;

    let report = AnalyticsEngine::new().summarize(&records);
    println!("{}", render::summary(&report));

    let latest = overview_rows(&records, settings);
    println!("Recent Predictions");
    println!("{}", render::predictions(&latest, false, &settings.export.date_format));
    Ok(())
}

/// The newest predictions shown on a user's dashboard.
fn overview_rows<'a>(
    records: &'a [PredictionRecord],
    settings: &Settings,
) -> Vec<&'a PredictionRecord> {
    recent(records, settings.views.user_recent_predictions)
}

fn handle_history(args: HistoryArgs, settings: &Settings) -> anyhow::Result<()> {
    let records = snapshot::load_history(&args.input, &args.user)?;

    let view = ReportView::history()
        .with_filter(FilterConfig {
            scope: args.scope,
            stock_symbol: args.stock,
            ..Default::default()
        })
        .with_sort(args.sort.resolve(settings));
    let visible = view.apply(&records);

    // The summary cards describe the whole history, not just the visible rows.
    let report = AnalyticsEngine::new().summarize(&records);
    println!("{}", render::summary(&report));
    println!("Prediction History ({} results)", visible.len());
    println!("{}", render::predictions(&visible, false, &settings.export.date_format));

    if let Some(dir) = args.export {
        export(&dir, settings, ExportLayout::History, &visible)?;
    }
    Ok(())
}

fn handle_results(args: ResultsArgs, settings: &Settings) -> anyhow::Result<()> {
    let records = snapshot::load_predictions(&args.input)?;

    let filter = FilterConfig {
        search_term: args.search,
        stock_symbol: args.stock,
        model: args.model,
        status: args.status,
        scope: Scope::All,
    };
    let view = ReportView::admin_results()
        .with_filter(filter)
        .with_sort(args.sort.resolve(settings));
    let visible = view.apply(&records);

    let report = AnalyticsEngine::new().summarize(&records);
    println!("{}", render::summary(&report));
    println!("All Predictions ({} results)", visible.len());
    println!("{}", render::predictions(&visible, true, &settings.export.date_format));

    if let Some(dir) = args.export {
        export(&dir, settings, ExportLayout::Admin, &visible)?;
    }
    Ok(())
}

fn handle_dashboard(args: DashboardArgs, settings: &Settings) -> anyhow::Result<()> {
    let records = snapshot::load_predictions(&args.predictions)?;
    let users = snapshot::load_users(&args.users)?;

    let report = AnalyticsEngine::new().summarize(&records);
    println!("Total Users: {}", users.len());
    if let Some(path) = &args.stats {
        let stats = snapshot::load_stats(path)?;
        println!("{}", render::server_stats(&stats));
    }
    println!("{}", render::summary(&report));
    println!("Top Stocks");
    println!("{}", render::stocks(&report));

    let latest = recent(&records, settings.views.recent_predictions);
    println!("Recent Predictions");
    println!("{}", render::predictions(&latest, true, &settings.export.date_format));

    let newest_users = recent_users(&users, settings.views.recent_users);
    println!("Recent Users");
    println!("{}", render::users(&newest_users, &settings.export.date_format));
    Ok(())
}

fn handle_users(args: UsersArgs, settings: &Settings) -> anyhow::Result<()> {
    let users = snapshot::load_users(&args.input)?;

    let filter = UserFilter {
        search_term: args.search,
        role: args.role,
    };
    let visible = sort_users(filter.apply(&users), args.sort, args.order);

    // Like the prediction views, the cards summarize every account.
    println!("{}", render::user_summary(&summarize_users(&users)));
    println!("Users ({} results)", visible.len());
    println!("{}", render::users(&visible, &settings.export.date_format));
    Ok(())
}

/// Writes the visible rows as a CSV download into `dir`.
fn export(
    dir: &Path,
    settings: &Settings,
    layout: ExportLayout,
    visible: &[&PredictionRecord],
) -> anyhow::Result<()> {
    let download =
        CsvExporter::new(&settings.export, layout).download(visible.iter().copied())?;
    let path = dir.join(&download.filename);
    fs::write(&path, &download.body)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        mime = download.mime_type,
        rows = visible.len(),
        "Exported CSV."
    );
    Ok(())
}
