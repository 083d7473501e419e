/*!
 * Command-line interface for hiddendump
 */

use std::io::{self, BufRead, Write};
use std::process;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use hiddendump::config::{Args, Config};
use hiddendump::error::{HiddenDumpError, Result};
use hiddendump::messages::Messages;
use hiddendump::report::{ReportFormat, Reporter, ScanReport};
use hiddendump::scanner::Scanner;
use hiddendump::writer::DumpWriter;

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);
    log::debug!("CLI args parsed: {:?}", args);

    let config = Config::from_args(args);
    let messages = Messages::new(config.lang);

    if config.targets_filesystem_root() && !confirm_root_scan(&messages) {
        println!("{}", messages.cancelled());
        process::exit(0);
    }

    println!("{}", messages.app_title());
    println!("{}", "=".repeat(50));

    let exit_code = match run(&config, &messages) {
        Ok(()) => 0,
        Err(e) => {
            match &e {
                HiddenDumpError::Config(_) => {
                    eprintln!("{}", messages.not_found(&config.target_dir.display().to_string()))
                }
                other => eprintln!("{}", messages.write_error(&other.to_string())),
            }
            eprintln!("\n{}", messages.failed());
            e.exit_code()
        }
    };

    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}

/// Ask before walking the whole filesystem
fn confirm_root_scan(messages: &Messages) -> bool {
    print!("{}", messages.root_warning());
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

fn run(config: &Config, messages: &Messages) -> Result<()> {
    config.validate()?;

    println!("{}", messages.analyzing(&config.target_dir.display().to_string()));
    println!("{}", messages.scanning());

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg:.dim.white} [{pos} files, {elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let start_time = Instant::now();
    let scanner = Scanner::new(config.clone(), progress.clone());
    let result = match scanner.scan() {
        Ok(result) => result,
        Err(e) => {
            progress.finish_and_clear();
            return Err(e);
        }
    };

    let output_file = if config.dry_run {
        None
    } else {
        let writer = DumpWriter::new(config.output_format);
        match writer.write(&result) {
            Ok(path) => Some(path.display().to_string()),
            Err(e) => {
                progress.finish_and_clear();
                return Err(e);
            }
        }
    };

    progress.finish_and_clear();

    if let Some(path) = &output_file {
        println!("\n{}", messages.success(path));
    }

    let report = ScanReport::from_result(&result, output_file, start_time.elapsed());
    Reporter::new(ReportFormat::ConsoleTable, *messages).print_report(&report);

    let artifact = (!config.dry_run).then(|| config.output_format.file_name());
    println!("\n{}", messages.done(artifact.as_deref()));
    Ok(())
}
