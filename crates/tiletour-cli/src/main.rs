use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use tiletour_lib::{
    find_path, load_cost_table, load_grid, load_targets, plan_tour, CellCost, Coord, CostTable,
    GridModel, PathSummary, RenderMode, TourRequest, TourSummary, VisitPolicy, VisitQuota,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Tile-grid pathfinding and tour planning utilities")]
struct Cli {
    /// Terrain map file: one row per line, one class digit per cell.
    #[arg(long)]
    map: PathBuf,

    /// Cost table JSON keyed by class digit; null marks impassable classes.
    /// Uses the built-in table when omitted.
    #[arg(long)]
    costs: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Compact,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PolicyArg {
    CostGreedy,
    DistanceGreedy,
}

impl From<PolicyArg> for VisitPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::CostGreedy => VisitPolicy::CostGreedy,
            PolicyArg::DistanceGreedy => VisitPolicy::DistanceGreedy,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report grid dimensions and the terrain classes present.
    Info,
    /// Find a path between two cells.
    Route {
        /// Starting cell as X,Y.
        #[arg(long = "from", value_parser = parse_coord)]
        from: Coord,
        /// Destination cell as X,Y.
        #[arg(long = "to", value_parser = parse_coord)]
        to: Coord,
    },
    /// Visit a roster of targets and return home.
    Tour {
        /// Starting cell as X,Y.
        #[arg(long, value_parser = parse_coord)]
        start: Coord,
        /// Cell to finish at; defaults to the start.
        #[arg(long, value_parser = parse_coord)]
        home: Option<Coord>,
        /// Target roster JSON file.
        #[arg(long)]
        targets: PathBuf,
        /// Visit at most this many targets; the whole roster when omitted.
        #[arg(long)]
        quota: Option<usize>,
        /// Visit-order policy.
        #[arg(long, default_value = "cost-greedy")]
        policy: PolicyArg,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let model = load_model(&cli.map, cli.costs.as_deref())?;
    match cli.command {
        Command::Info => handle_info(&model, cli.format),
        Command::Route { from, to } => handle_route(&model, from, to, cli.format),
        Command::Tour {
            start,
            home,
            targets,
            quota,
            policy,
        } => handle_tour(&model, start, home, &targets, quota, policy, cli.format),
    }
}

fn load_model(map: &Path, costs: Option<&Path>) -> Result<GridModel> {
    let grid = load_grid(map)
        .with_context(|| format!("failed to load terrain map from {}", map.display()))?;
    let table = match costs {
        Some(path) => load_cost_table(path)
            .with_context(|| format!("failed to load cost table from {}", path.display()))?,
        None => CostTable::default(),
    };
    GridModel::new(grid, table).context("terrain map and cost table do not agree")
}

#[derive(Debug, Serialize)]
struct ClassReport {
    class: u8,
    count: usize,
    cost: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GridReport {
    width: usize,
    height: usize,
    classes: Vec<ClassReport>,
}

fn handle_info(model: &GridModel, format: OutputFormat) -> Result<()> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for class in model.grid().cells() {
        *counts.entry(class).or_insert(0) += 1;
    }
    let classes = counts
        .into_iter()
        .map(|(class, count)| ClassReport {
            class,
            count,
            cost: match model.costs().cost_of(class) {
                Some(CellCost::Traversable(cost)) => Some(cost),
                _ => None,
            },
        })
        .collect::<Vec<_>>();
    let report = GridReport {
        width: model.width(),
        height: model.height(),
        classes,
    };

    match format {
        OutputFormat::Text => {
            println!("Grid: {}x{}", report.width, report.height);
            for entry in &report.classes {
                match entry.cost {
                    Some(cost) => {
                        println!("class {}: {} cells (cost {})", entry.class, entry.count, cost)
                    }
                    None => println!("class {}: {} cells (impassable)", entry.class, entry.count),
                }
            }
        }
        OutputFormat::Compact => {
            let parts = report
                .classes
                .iter()
                .map(|entry| format!("{}:{}", entry.class, entry.count))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{}x{} {}", report.width, report.height, parts);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn handle_route(model: &GridModel, from: Coord, to: Coord, format: OutputFormat) -> Result<()> {
    let path = find_path(model, from, to)?;
    let summary = PathSummary::from_path(from, to, &path)
        .with_context(|| format!("no route between {from} and {to}"))?;

    match format {
        OutputFormat::Text => print!("{}", summary.render(RenderMode::PlainText)),
        OutputFormat::Compact => print!("{}", summary.render(RenderMode::Compact)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn handle_tour(
    model: &GridModel,
    start: Coord,
    home: Option<Coord>,
    targets: &Path,
    quota: Option<usize>,
    policy: PolicyArg,
    format: OutputFormat,
) -> Result<()> {
    let roster = load_targets(targets)
        .with_context(|| format!("failed to load target roster from {}", targets.display()))?;

    let mut request = TourRequest::new(start, roster).with_policy(policy.into());
    if let Some(home) = home {
        request = request.with_home(home);
    }
    if let Some(limit) = quota {
        request = request.with_quota(VisitQuota::Limit(limit));
    }

    let plan = plan_tour(model, &request).context("tour planning failed")?;
    let summary = TourSummary::from_plan(&plan)?;

    match format {
        OutputFormat::Text => print!("{}", summary.render(RenderMode::PlainText)),
        OutputFormat::Compact => print!("{}", summary.render(RenderMode::Compact)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn parse_coord(value: &str) -> std::result::Result<Coord, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {value:?}"))?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid X coordinate {x:?}"))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|_| format!("invalid Y coordinate {y:?}"))?;
    Ok(Coord::new(x, y))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
