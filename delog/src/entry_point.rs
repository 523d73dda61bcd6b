use crate::cli::{Cli, Commands, DiscoveryArgs, OutputOptions, RewriteArgs, ScanArgs};
use crate::commands::{
    find_js_files, merge_excludes, run_scan, run_strip, Discovery, ScanOptions, StripOptions,
    WriteMode,
};
use crate::config::Config;
use crate::constants::DEFAULT_EXTENSIONS;
use crate::engine::Options;
use crate::fix::Strategy;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

/// Runs delog with the given arguments.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run delog with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if writing output fails or an output directory cannot be created.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["delog".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    match cli_var.command {
        Some(Commands::Scan(args)) => scan_command(&args, writer),
        None => strip_command(&cli_var, writer),
    }
}

/// Configuration and files shared by both commands.
struct Workspace {
    config: Config,
    roots: Vec<PathBuf>,
    discovery: Discovery,
}

/// Load config from the first path, drop missing paths and merge path filters.
fn prepare(args: &DiscoveryArgs, output: &OutputOptions) -> Workspace {
    let requested = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths.clone()
    };

    let config_path = requested
        .first()
        .map_or(std::path::Path::new("."), PathBuf::as_path);
    let config = Config::load_from_path(config_path);

    let mut roots = Vec::with_capacity(requested.len());
    for path in requested {
        if path.exists() {
            roots.push(path);
        } else {
            eprintln!("{} {} not found", "Skip:".yellow(), path.display());
        }
    }

    let settings = &config.delog;
    let exclude = merge_excludes(
        settings.exclude_folders.clone().unwrap_or_default(),
        args.exclude_folders.clone(),
    );
    let include = merge_excludes(
        settings.include_folders.clone().unwrap_or_default(),
        args.include_folders.clone(),
    );
    let extensions = if args.extensions.is_empty() {
        settings.extensions.clone().unwrap_or_else(|| {
            DEFAULT_EXTENSIONS
                .iter()
                .map(|&ext| ext.to_owned())
                .collect()
        })
    } else {
        args.extensions.clone()
    };
    let extensions = extensions
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_owned())
        .collect();

    let discovery = Discovery {
        exclude,
        include,
        extensions,
    };

    if output.verbose && !output.json {
        eprintln!("[VERBOSE] delog v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        match &config.config_file_path {
            Some(path) => eprintln!("[VERBOSE] Config: {}", path.display()),
            None => eprintln!("[VERBOSE] Config: defaults"),
        }
        eprintln!("[VERBOSE] Excludes: {:?}", discovery.exclude);
        eprintln!("[VERBOSE] Extensions: {:?}", discovery.extensions);
    }

    Workspace {
        config,
        roots,
        discovery,
    }
}

fn write_mode(args: &RewriteArgs) -> WriteMode {
    if let Some(dir) = &args.out_dir {
        WriteMode::OutDir(dir.clone())
    } else if args.stdout {
        WriteMode::Stdout
    } else if args.check {
        WriteMode::Check
    } else if args.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::InPlace
    }
}

fn strip_command<W: std::io::Write>(cli_var: &Cli, writer: &mut W) -> Result<i32> {
    let workspace = prepare(&cli_var.discovery, &cli_var.output);
    let settings = &workspace.config.delog;

    let targets = match cli_var.targets.resolve(settings) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(1);
        }
    };
    let strategy = match &cli_var.rewrite.strategy {
        Some(name) => name.parse::<Strategy>().map(Some),
        None => settings.strategy(),
    };
    let strategy = match strategy {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(1);
        }
    };

    let engine = Options {
        targets,
        strategy,
        remove_semicolon: cli_var.rewrite.remove_semicolon
            || settings.remove_semicolon.unwrap_or(false),
    };
    let mode = write_mode(&cli_var.rewrite);

    if cli_var.output.verbose && !cli_var.output.json {
        eprintln!("[VERBOSE] Strategy: {}", engine.effective_strategy());
        eprintln!("[VERBOSE] Mode: {mode:?}");
        let mut stderr = std::io::stderr();
        crate::output::print_targets(&mut stderr, &engine.targets)?;
        eprintln!();
    }

    let files = find_js_files(
        &workspace.roots,
        &workspace.discovery,
        cli_var.output.verbose,
    );

    if mode == WriteMode::Stdout && files.len() != 1 {
        eprintln!(
            "{} --stdout needs exactly one file, found {}",
            "Error:".red(),
            files.len()
        );
        return Ok(1);
    }
    if files.is_empty() {
        if !cli_var.output.json {
            writeln!(writer, "No JavaScript files found.")?;
        }
        return Ok(0);
    }

    let options = StripOptions {
        engine,
        mode,
        json: cli_var.output.json,
        verbose: cli_var.output.verbose,
        quiet: cli_var.output.quiet,
    };
    let summary = run_strip(&files, &options, &mut *writer)?;
    Ok(summary.exit_code(&options.mode))
}

fn scan_command<W: std::io::Write>(args: &ScanArgs, writer: &mut W) -> Result<i32> {
    let workspace = prepare(&args.discovery, &args.output);

    let targets = match args.targets.resolve(&workspace.config.delog) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{} {e}", "Error:".red());
            return Ok(1);
        }
    };

    let files = find_js_files(&workspace.roots, &workspace.discovery, args.output.verbose);
    let options = ScanOptions {
        targets,
        json: args.output.json,
        verbose: args.output.verbose,
    };
    let report = run_scan(&files, &options, &mut *writer)?;
    Ok(report.exit_code())
}
