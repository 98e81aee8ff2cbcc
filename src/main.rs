use clap::Parser;
use recalls_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(()) => {
            // Success - results have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Recalls Processor - Safety-Recall Data Update Pipeline");
    println!("======================================================");
    println!();
    println!("Ingest the vehicle and equipment safety-recall CSV export, reconcile it");
    println!("against the recall store and push incremental updates.");
    println!();
    println!("USAGE:");
    println!("    recalls-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    update      Run the full data-update pipeline (main command)");
    println!("    check       Parse and validate a local CSV export");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run the pipeline for an uploaded export:");
    println!("    recalls-processor update --store-root /var/recalls/store \\");
    println!("                             --backend-url https://recalls-backend.internal");
    println!();
    println!("    # Check an export locally before uploading:");
    println!("    recalls-processor check RecallsFile.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    recalls-processor <COMMAND> --help");
}
