mod cli;

use tabloforge::{
    config::{self, ExtractOverrides},
    extract::Extractor,
    recordings,
};
use tabloforge_av::{check_tools_with, DurationProber, FfprobeProber};
use tabloforge_common::Segment;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "tabloforge=debug,tabloforge_av=debug,tabloforge_common=debug".to_string()
        } else {
            "tabloforge=info,tabloforge_av=info".to_string()
        }
    });

    // Logs go to stderr so manifests and JSON on stdout stay clean.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Extract {
            recording_id,
            mount,
            output_dir,
            jobs,
            dry_run,
            keep_manifest,
        } => {
            let overrides = ExtractOverrides {
                mount,
                output_dir,
                jobs,
                dry_run,
                keep_manifest,
            };
            extract_recording(&recording_id, &overrides, cli.config.as_deref())
        }
        Commands::List { mount, json } => list_recordings(mount, json, cli.config.as_deref()),
        Commands::Probe { file, json } => probe_file(&file, json, cli.config.as_deref()),
        Commands::CheckTools => check_tools_cmd(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("tabloforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn extract_recording(
    recording_id: &str,
    overrides: &ExtractOverrides,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let extract_config = config.extract_config(recording_id, overrides)?;
    let dry_run = extract_config.dry_run;
    let ext = extract_config.segment_extension.clone();

    tracing::info!(
        "Extracting recording {} from {:?}",
        extract_config.recording_id,
        extract_config.mount
    );

    let extractor = Extractor::from_config(extract_config, &config.tools)?
        .with_progress_callback(Box::new(|_: usize, _: usize, segment: &Segment| {
            println!("Processed file: {}", segment.name);
        }));
    let output_path = extractor.output_path();

    println!("Starting processing of {ext} files, this takes a while...");
    if !dry_run {
        println!("The resulting MP4 video file will be placed in: {}", output_path.display());
    }

    let report = extractor
        .run()
        .with_context(|| format!("Failed to extract recording {}", recording_id))?;

    println!(
        "Processing of {} {ext} files completed successfully ({:.1}s total).",
        report.segment_count, report.total_duration_secs
    );

    match report.output {
        Some(output) => println!("Output: {}", output.display()),
        None => {
            println!("\n[DRY RUN] Concat manifest:");
            print!("{}", report.manifest);
        }
    }

    Ok(())
}

fn list_recordings(mount: Option<PathBuf>, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let mount = mount
        .or(config.recording.mount)
        .context("No mount location configured; pass --mount or set [recording] mount")?;
    let mount = config::expand_path(&mount);

    let recordings = recordings::list_recordings(&mount, &config.recording.segment_extension)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recordings)?);
    } else {
        println!("Recordings in {}:", mount.display());
        for recording in &recordings {
            println!("  {:>10}  {} segments", recording.id, recording.segment_count);
        }
        println!("\n{} recordings", recordings.len());
    }

    Ok(())
}

fn probe_file(file: &Path, json: bool, config_path: Option<&Path>) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {:?}", file);
    }

    let config = config::load_config_or_default(config_path)?;
    let prober = FfprobeProber::from_config(config.tools.ffprobe_path.as_deref())?;
    let duration = prober.duration(file)?;

    if json {
        let value = serde_json::json!({
            "file": file,
            "duration_secs": duration,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("File: {}", file.display());
        println!("Duration: {:.3}s", duration);
    }

    Ok(())
}

fn check_tools_cmd(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    println!("Checking external tools...\n");

    let tools = check_tools_with(|name| config.tools.path_for(name));
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install ffmpeg to extract recordings.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            print_config_summary(&config);
        }
        None => {
            println!("No config file specified, using defaults");
            print_config_summary(&config::Config::default());
        }
    }

    Ok(())
}

fn print_config_summary(config: &config::Config) {
    match config.recording.mount {
        Some(ref mount) => println!("  Mount: {}", mount.display()),
        None => println!("  Mount: (not set)"),
    }
    println!("  Segment extension: {}", config.recording.segment_extension);
    println!("  Probe jobs: {}", config.recording.probe_jobs);
    println!("  Output dir: {}", config.output.dir.display());
}
