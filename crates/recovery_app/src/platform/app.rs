use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use engine_logging::{engine_error, engine_info};
use recovery_core::{RecoveryConfig, RunSummary};
use recovery_engine::Recovery;

use super::config::load_config;
use super::logging;
use super::prompt::prompt_path;

const BANNER: &str = r"
 _                          __                  _
| |__   _____  _____    ____\ \   _ __ ___   __| |
| '_ \ / _ \ \/ / _ \  |_____\ \ | '_ ` _ \ / _` |
| | | |  __/>  < (_) | |_____/ / | | | | | | (_| |
|_| |_|\___/_/\_\___/       /_/  |_| |_| |_|\__,_|
";

/// Interactive entry point. Always returns normally: page failures are
/// reported, not propagated.
pub fn run_app() {
    logging::initialize(engine_logging::run_level());

    println!("{BANNER}");
    println!("=== Hexo post recovery ===");

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd);

    let stdin = io::stdin();
    let config = match ask_roots(&mut stdin.lock(), &mut io::stdout(), config) {
        Ok(config) => config,
        Err(err) => {
            engine_error!("Could not read the directory prompts: {}", err);
            return;
        }
    };

    engine_info!(
        "Recovering posts from {:?} into {:?}",
        config.recovery_root,
        config.output_root
    );
    let recovery = Recovery::new(config);
    match recovery.run() {
        Ok(summary) => print_summary(recovery.config(), &summary),
        Err(err) => engine_error!("Cannot prepare output directories: {}", err),
    }
}

fn ask_roots<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    mut config: RecoveryConfig,
) -> io::Result<RecoveryConfig> {
    config.recovery_root = prompt_path(
        input,
        output,
        "Rendered site root (Hexo public directory)",
        &config.recovery_root,
    )?;
    config.output_root = prompt_path(
        input,
        output,
        "Blog source directory",
        &config.output_root,
    )?;
    Ok(config)
}

fn print_summary(config: &RecoveryConfig, summary: &RunSummary) {
    println!();
    println!("=== Recovery finished ===");
    println!("Pages found:       {}", summary.candidates);
    println!("Posts recovered:   {}", summary.recovered);
    println!("Not articles:      {}", summary.skipped);
    println!("Failed:            {}", summary.failed);
    println!(
        "Images copied:     {} ({} missing, {} failed)",
        summary.images.copied, summary.images.missing, summary.images.failed
    );
    match summary.bulk_images_copied {
        Some(count) => println!("Image directory:   {count} files mirrored"),
        None => println!("Image directory:   not copied"),
    }
    println!("Posts directory:   {}", config.posts_dir().display());
    println!("Images directory:  {}", config.images_output_dir().display());
}
