/*!
 * Command-line interface for promptpack
 */

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use promptpack::clipboard::copy_to_clipboard;
use promptpack::config::{Args, Config};
use promptpack::error::Result;
use promptpack::report::{count_tokens, CopyReport, Reporter};
use promptpack::roots::RootSet;
use promptpack::sync::sync_root_folder;
use promptpack::transcript::{Outcome, TranscriptAssembler};
use promptpack::utils::count_files;

fn main() -> Result<()> {
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Generate shell completions and exit if requested
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "promptpack", &mut io::stdout());
        return Ok(());
    }

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        eprintln!("Warning: Failed to set thread pool size: {}", e);
    }

    // Ctrl-C flips the shared cancellation flag; the assembler discards
    // partial entries when it observes it.
    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        if let Err(e) = ctrlc::set_handler(move || cancel.store(true, Ordering::SeqCst)) {
            eprintln!("Warning: Failed to install Ctrl-C handler: {}", e);
        }
    }

    let roots = RootSet::new(config.roots.clone());

    // Keep the external tool's config in step with the primary root. This
    // is an independent side operation; failures never abort the copy.
    if let Some(sync_path) = &config.sync_config_path {
        if let Some(root) = roots.primary() {
            if let Err(e) = sync_root_folder(sync_path, root) {
                eprintln!("Warning: {}", e);
            }
        }
    }

    // Create progress bar
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%)")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📋 Collecting");

    let total_files = count_files(&config);
    progress.set_length(total_files);
    progress.set_message(format!("Found {} files to copy", total_files));

    let to_stdout = config.to_stdout;
    let assembler = TranscriptAssembler::new(
        config,
        roots,
        Arc::new(progress.clone()),
        Arc::clone(&cancel),
    );

    let start_time = Instant::now();
    let outcome = assembler.assemble()?;
    progress.finish_and_clear();

    let transcript = match outcome {
        Outcome::Copied(transcript) => transcript,
        Outcome::Nothing { warnings } => {
            for warning in &warnings {
                eprintln!("Warning: {}", warning);
            }
            println!("Nothing to copy.");
            return Ok(());
        }
        Outcome::Cancelled => {
            eprintln!("Cancelled, nothing copied.");
            return Ok(());
        }
    };

    for warning in &transcript.warnings {
        eprintln!("Warning: {}", warning);
    }

    // Deliver the transcript
    let destination = if to_stdout {
        print!("{}", transcript.text);
        "stdout"
    } else {
        copy_to_clipboard(&transcript.text)?;
        "clipboard"
    };

    let report = CopyReport {
        destination: destination.to_string(),
        duration: start_time.elapsed(),
        file_count: transcript.file_count,
        transcript_bytes: transcript.text.len(),
        total_tokens: count_tokens(&transcript.text),
        warnings: transcript.warnings.len(),
        file_details: transcript.file_details,
    };

    if !to_stdout {
        Reporter::new().print_report(&report);
    }

    Ok(())
}
