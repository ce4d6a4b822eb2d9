use kograph::{analyze_codebase, analyze_source_root, to_usage_report, version};
use log::{error, info, warn};
use std::path::Path;
use std::time::Instant;

fn main() -> std::io::Result<()> {
    // Initialize logger
    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        error!("Not enough arguments provided");
        eprintln!(
            "Usage: {} <source_root> [output_path] [num_threads] [format]",
            args[0]
        );
        eprintln!("Version: {}", version());
        return Ok(());
    }

    let source_root = Path::new(&args[1]);
    let output_path = if args.len() >= 3 {
        Path::new(&args[2])
    } else {
        Path::new("usage_report.json")
    };

    let num_threads = if args.len() >= 4 {
        args[3].parse().unwrap_or_else(|_| {
            let cpu_count = num_cpus::get();
            warn!(
                "Invalid thread count provided, defaulting to {} CPUs",
                cpu_count
            );
            cpu_count
        })
    } else {
        let cpu_count = num_cpus::get();
        info!("Using default thread count: {}", cpu_count);
        cpu_count
    };

    let format = if args.len() >= 5 { &args[4] } else { "json" };

    info!("Kograph v{}", version());
    info!("Source root: {:?}", source_root);
    info!("Using {} threads", num_threads);
    info!("Output format: {}", format);
    info!("Parser: Tree-sitter");

    let start_time = Instant::now();

    match format {
        "text" => {
            let analyses = analyze_source_root(source_root, num_threads)?;
            let usage = to_usage_report(&analyses);
            for entry in &usage {
                println!(
                    "{}: inherited by [{}], used by [{}]",
                    entry.name,
                    entry.inheritors.iter().cloned().collect::<Vec<_>>().join(", "),
                    entry.users.iter().cloned().collect::<Vec<_>>().join(", ")
                );
            }
        }
        "json" => {
            analyze_codebase(source_root, output_path, num_threads)?;
            info!("Output saved to: {:?}", output_path);
        }
        _ => {
            warn!("Unsupported format: {}. Using JSON instead.", format);
            analyze_codebase(source_root, output_path, num_threads)?;
            info!("Output saved to: {:?}", output_path);
        }
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2?}", elapsed);

    Ok(())
}
