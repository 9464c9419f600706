// Auto Body Shop Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/auto-body-shop-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/auto-body-shop-simulator --num-stalls 2 -n 500 --verbose
// ```

use anyhow::Context as _;
use auto_body_shop_simulator::simulation::{
    render, write_json_report, LoggingConfig, ReplicationDriver,
};
use auto_body_shop_simulator::types::config::CliArgs;
use auto_body_shop_simulator::types::ShopConfig;
use clap::Parser;
use std::process;
use std::time::Instant;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match ShopConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Keep the guard alive until the end of main
    let _logging = match LoggingConfig::for_cli(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Auto Body Shop Simulator");

    let config = match ShopConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_batch(config, args.output.as_deref()) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Auto Body Shop Simulator completed successfully");
}

/// Run the configured batch and print its results
fn run_batch(config: ShopConfig, output: Option<&str>) -> anyhow::Result<()> {
    let start_time = Instant::now();
    let format = config.output_format;

    let driver = ReplicationDriver::new(config).context("failed to prepare the replication driver")?;
    let results = driver
        .run()
        .map_err(|e| {
            error!(category = e.category(), "Batch aborted: {}", e);
            e
        })
        .context("batch aborted")?;

    println!("{}", render(&results, format).context("failed to render the report")?);

    if let Some(path) = output {
        write_json_report(&results, path)
            .with_context(|| format!("failed to write the report to '{}'", path))?;
        eprintln!("Batch report written to: {}", path);
    }

    eprintln!(
        "Completed {} replications in {:.2} seconds",
        results.replications(),
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &ShopConfig) {
    eprintln!("Auto Body Shop Simulator");
    eprintln!("========================");
    eprintln!("A discrete-event simulation of a small auto body shop");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &ShopConfig) {
    eprintln!("Configuration:");
    eprintln!("  Operation Hours: {}", config.operation_hours);
    eprintln!("  Mechanics: {}", config.num_mechanics);
    eprintln!("  Specialists: {}", config.num_specialists);
    eprintln!("  Stalls: {} (daily cost {})", config.num_stalls, config.total_stall_cost());
    eprintln!("  Referral Rate: {:.1}%", config.mechanic_refer_rate * 100.0);
    eprintln!("  Balk Threshold: {} - {}", config.balk_min, config.balk_max);
    eprintln!("  Loss Cost: {}", config.loss_cost);
    eprintln!("  Replications: {}", config.num_replications);
    eprintln!("  Base Seed: {}", config.base_seed);
    eprintln!("  Confidence Level: {:.1}%", config.confidence_level * 100.0);
    eprintln!("  Report Format: {}", config.output_format);
    eprintln!();
}
