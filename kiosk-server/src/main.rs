use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use chrono::Utc;
use clap::Parser;
use serde::Serialize;

use kiosk_geo::{ClusterDetector, ExhaustiveDetector, IndexedDetector};
use kiosk_pipeline::config::EngineConfig;
use kiosk_pipeline::error::{PipelineError, PipelineResult};
use kiosk_pipeline::export::write_export_csv;
use kiosk_pipeline::fleet::Fleet;
use kiosk_pipeline::kiosk_loader::load_kiosks_file;
use kiosk_pipeline::pipelines::fleet_report::{FleetReport, FleetReportPipeline};
use kiosk_pipeline::types::FleetQuery;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Fleet digest for a kiosk network: clustering, tiers, KPIs and
/// redeployment candidates for one filtered view of the fleet.
#[derive(Parser, Debug)]
#[command(name = "kiosk-server", version, about)]
#[command(after_help = "Examples:\n  \
    kiosk-server fixtures/sample_kiosks.csv\n  \
    kiosk-server fixtures/sample_kiosks.csv --state MN --unprofitable\n  \
    kiosk-server fixtures/sample_kiosks.csv --clustered --json\n  \
    kiosk-server fixtures/sample_kiosks.csv --export redeploy.csv")]
struct Args {
    /// Kiosk CSV with kiosk_id, latitude, longitude, avg_volume, state,
    /// host, location_type and transactions columns
    csv: PathBuf,

    /// Only kiosks in this state
    #[arg(long)]
    state: Option<String>,

    /// Only kiosks with another kiosk within the cluster radius
    #[arg(long)]
    clustered: bool,

    /// Only kiosks at or above breakeven
    #[arg(long)]
    profitable: bool,

    /// Only kiosks below breakeven
    #[arg(long)]
    unprofitable: bool,

    /// Number of top kiosks to list (overrides the config file)
    #[arg(long)]
    top: Option<usize>,

    /// Print the report as JSON instead of formatted text
    #[arg(long)]
    json: bool,

    /// Write the redeployment candidates to this CSV file
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// JSON engine config; missing keys use the defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the R-tree cluster detector instead of the pairwise scan
    #[arg(long)]
    indexed: bool,
}

impl Args {
    fn query(&self) -> FleetQuery {
        FleetQuery {
            state: self.state.clone(),
            clustered_only: self.clustered,
            profitable_only: self.profitable,
            unprofitable_only: self.unprofitable,
        }
    }

    fn engine_config(&self) -> PipelineResult<EngineConfig> {
        let mut config = match self.config {
            Some(ref path) => EngineConfig::from_json_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(top) = self.top {
            config.top_n = top;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// JSON output contract
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct DigestJson<'a> {
    generated_at: String,
    source: String,
    detector: &'static str,
    load_ms: u128,
    pipeline_ms: u128,
    #[serde(flatten)]
    report: &'a FleetReport,
}

fn print_json(digest: &DigestJson<'_>) -> PipelineResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, digest).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Human-readable output
// ---------------------------------------------------------------------------

/// Format a number with comma thousands separators.
fn format_dollars(amount: f64) -> String {
    let whole = amount.abs().round() as u64;
    let sign = if amount < 0.0 && whole > 0 { "-" } else { "" };

    if whole < 1_000 {
        return format!("{}{}", sign, whole);
    }

    let s = whole.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

fn format_nearest(nearest: Option<f64>) -> String {
    match nearest {
        Some(d) => format!("{:.4}", d),
        None => "-".into(),
    }
}

fn print_human(report: &FleetReport, detector: &str, load_ms: u128, pipeline_ms: u128) {
    let kpis = &report.kpis;
    let selected = report.fleet_size - report.filtered_out;

    println!();
    println!("  \u{2554}{:\u{2550}<62}\u{2557}", "");
    println!("  \u{2551}{:^62}\u{2551}", "KIOSK FLEET \u{00b7} Network Digest");
    println!("  \u{255a}{:\u{2550}<62}\u{255d}", "");
    println!();

    println!("  Filter: {}", report.context);
    println!(
        "  {} of {} kiosks selected  \u{00b7}  {} clustered  \u{00b7}  {} flagged for redeploy",
        selected, report.fleet_size, kpis.clustered_count, kpis.redeploy_count
    );
    println!(
        "  Avg volume ${}  \u{00b7}  Profit/kiosk ${}  \u{00b7}  Loss ${}  \u{00b7}  Low performers {:.1}%",
        format_dollars(kpis.avg_volume_mean),
        format_dollars(kpis.profit_per_kiosk),
        format_dollars(kpis.loss_total),
        kpis.low_performer_pct
    );
    println!("  Network: {}", kpis.network_status);
    if let Some(center) = kpis.map_center {
        println!(
            "  Map center: {:.4}, {:.4}",
            center.latitude, center.longitude
        );
    }
    println!();

    if selected == 0 {
        println!("  No kiosks match this filter.");
        println!();
        return;
    }

    println!("  {:\u{2500}<64}", "");
    println!(
        "  {:6} {:>12} {:>8} {:>12} {:>8}",
        "Tier", "Volume", "Kiosks", "Avg", "Share"
    );
    for row in report.tiers.rows() {
        println!(
            "  {:6} {:>12} {:>8} {:>12} {:>7.1}%",
            row.tier.to_string(),
            format!("${}", format_dollars(row.total_volume)),
            row.kiosk_count,
            format!("${}", format_dollars(row.avg_volume)),
            row.volume_share_pct
        );
    }
    println!(
        "  Top tier: {} ({:.1}% of volume)",
        report.top_tier, report.top_tier_share_pct
    );
    println!("  {:\u{2500}<64}", "");
    println!();

    println!("  Top {} by volume", report.top_kiosks.len());
    for (i, k) in report.top_kiosks.iter().enumerate() {
        println!(
            "  {:>2}. {:10} {:3} {:>10}  {:1}  {:14} nearest {}",
            i + 1,
            k.kiosk_id,
            k.state,
            format!("${}", format_dollars(k.avg_volume)),
            k.cluster_label,
            k.host,
            format_nearest(k.nearest_km),
        );
    }
    println!();

    let redeploy = &report.redeploy;
    if redeploy.rows.is_empty() {
        println!("  No redeployment candidates. All clear!");
    } else {
        println!(
            "  Redeploy candidates: {}  \u{00b7}  shortfall ${}  \u{00b7}  est. holding cost ${}/mo",
            redeploy.redeploy_count,
            format_dollars(redeploy.redeploy_loss),
            format_dollars(redeploy.estimated_holding_cost)
        );
        for r in &redeploy.rows {
            println!(
                "   !! {:10} {:3} {:>10}  {:14} {:14} {:>5} tx  nearest {}",
                r.kiosk_id,
                r.state,
                format!("${}", format_dollars(r.avg_volume)),
                r.host,
                r.location_type,
                r.transactions,
                format_nearest(r.nearest_km),
            );
        }
    }

    println!();
    println!(
        "  \u{23f1}  CSV loaded in {}ms \u{00b7} {} clustering + report in {}ms \u{00b7} Total {}ms",
        load_ms,
        detector,
        pipeline_ms,
        load_ms + pipeline_ms
    );
    println!();
}

fn write_export(report: &FleetReport, path: &Path) -> PipelineResult<()> {
    let file = File::create(path).map_err(|source| PipelineError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_export_csv(&report.redeploy, BufWriter::new(file))?;
    log::info!(
        "wrote {} redeploy rows to {}",
        report.redeploy.rows.len(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn run(args: &Args) -> PipelineResult<()> {
    let config = args.engine_config()?;
    let query = args.query();

    let load_start = Instant::now();
    let store = load_kiosks_file(&args.csv)?;
    let load_ms = load_start.elapsed().as_millis();

    let detector: Box<dyn ClusterDetector> = if args.indexed {
        Box::new(IndexedDetector)
    } else {
        Box::new(ExhaustiveDetector)
    };

    let pipeline_start = Instant::now();
    let fleet = Fleet::enrich(store, config, detector.as_ref())?;

    if let Some(ref state) = query.state {
        let states = fleet.states();
        if !states.contains(state) {
            log::warn!("no kiosks in state {}; available: {:?}", state, states);
        }
    }

    let pipeline = FleetReportPipeline::for_fleet(&fleet);
    let report = pipeline.execute(&fleet, &query);
    let pipeline_ms = pipeline_start.elapsed().as_millis();

    if let Some(ref path) = args.export {
        write_export(&report, path)?;
    }

    if args.json {
        print_json(&DigestJson {
            generated_at: Utc::now().to_rfc3339(),
            source: args.csv.display().to_string(),
            detector: detector.name(),
            load_ms,
            pipeline_ms,
            report: &report,
        })
    } else {
        print_human(&report, detector.name(), load_ms, pipeline_ms);
        Ok(())
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
