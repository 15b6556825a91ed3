use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use sampleboard_cli::render::render_board;
use sampleboard_cli::seed::{demo_config, seed_demo_requests};
use sampleboard_cli::{init_tracing, run_simulator, SimulatorConfig, TestHarness};
use sampleboard_core::{BoardConfig, BoardService, DigestAdvisor, RequestStatus};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Command::new("sampleboard")
        .version(sampleboard_core::VERSION)
        .about("Home sample-collection request board")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("TOML config with roster and advisory messages (default: demo roster)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("demo")
                .about("Seed the board, walk requests through their lifecycle, and print it"),
        )
        .subcommand(
            Command::new("report")
                .about("Print board counters and workload for the seeded board")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("simulate")
                .about("Run randomized lifecycle operations and check ledger invariants")
                .arg(
                    Arg::new("ops")
                        .long("ops")
                        .default_value("10000")
                        .value_parser(value_parser!(u64))
                        .help("Number of operations to simulate"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .default_value("42")
                        .value_parser(value_parser!(u64))
                        .help("Random seed for reproducibility"),
                )
                .arg(
                    Arg::new("stop-on-violation")
                        .long("stop-on-violation")
                        .action(ArgAction::SetTrue)
                        .help("Stop simulation on first violation"),
                ),
        )
        .subcommand(
            Command::new("certify")
                .about("Run the simulator across many seeds")
                .arg(
                    Arg::new("seeds")
                        .long("seeds")
                        .default_value("10")
                        .value_parser(value_parser!(u64))
                        .help("Number of seeds"),
                )
                .arg(
                    Arg::new("ops")
                        .long("ops")
                        .default_value("10000")
                        .value_parser(value_parser!(u64))
                        .help("Operations per seed"),
                ),
        );

    let matches = cli.get_matches();
    init_tracing(matches.get_flag("log-json"));
    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("demo", _)) => run_demo(&config).await,
        Some(("report", args)) => {
            let mut service = BoardService::new(&config, Arc::new(DigestAdvisor))?;
            seed_demo_requests(&mut service)?;
            let report = service.report();
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.generate_text());
            }
            Ok(())
        }
        Some(("simulate", args)) => {
            let sim = SimulatorConfig {
                seed: *args.get_one::<u64>("seed").context("missing --seed")?,
                total_operations: *args.get_one::<u64>("ops").context("missing --ops")?,
                stop_on_first_violation: args.get_flag("stop-on-violation"),
            };

            let report = run_simulator(sim, &config);
            println!("{}", report.generate_text());

            std::process::exit(if report.passed() { 0 } else { 1 });
        }
        Some(("certify", args)) => {
            let seeds = *args.get_one::<u64>("seeds").context("missing --seeds")?;
            let ops = *args.get_one::<u64>("ops").context("missing --ops")?;

            let report = TestHarness::run_certification(&config, seeds, ops);

            println!("Certification Report:");
            println!("  Seeds Tested: {}", report.seeds_tested);
            println!("  Total Violations: {}", report.total_violations);
            if !report.failed_seeds.is_empty() {
                println!("  Failed Seeds: {:?}", report.failed_seeds);
            }
            println!("  Status: {}", if report.passed { "PASSED" } else { "FAILED" });

            std::process::exit(if report.passed { 0 } else { 1 });
        }
        _ => Ok(()),
    }
}

fn load_config(matches: &ArgMatches) -> anyhow::Result<BoardConfig> {
    match matches.get_one::<std::path::PathBuf>("config") {
        Some(path) => {
            BoardConfig::load(path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(demo_config()),
    }
}

async fn run_demo(config: &BoardConfig) -> anyhow::Result<()> {
    let mut service = BoardService::new(config, Arc::new(DigestAdvisor))?;
    let ids = seed_demo_requests(&mut service)?;

    let specialist = service.board().specialists().last().map(|s| s.id.clone());
    if let Some(specialist) = specialist {
        // First request: full happy path.
        if let Some(&first) = ids.first() {
            service.assign(first, &specialist)?;
            for step in [
                RequestStatus::Accepted,
                RequestStatus::Contacted,
                RequestStatus::Scheduled,
                RequestStatus::Collected,
            ] {
                service.transition(first, step)?;
            }
        }

        // Second request: rejected, then reassigned.
        if let Some(&second) = ids.get(1) {
            if service.board().request(second).map(|r| r.status) == Some(RequestStatus::Assigned) {
                service.transition(second, RequestStatus::Rejected)?;
                service.assign(second, &specialist)?;
            }
        }
    } else {
        tracing::warn!("empty roster; lifecycle walk skipped");
    }

    println!("{}", render_board(service.board()));
    print!("{}", service.report().generate_text());

    let sequence = service.advice_sequence();
    let mut rx = service.subscribe_advice();
    let published = rx.wait_for(|a| a.sequence >= sequence);
    let advice = match tokio::time::timeout(Duration::from_secs(2), published).await {
        Ok(Ok(advice)) => advice.text.clone(),
        _ => service.advice().text,
    };
    println!("\nAdvice: {advice}");
    Ok(())
}
