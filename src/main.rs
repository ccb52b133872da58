//! packsync CLI: converge a modpack instance's mods directory, or derive its
//! distributable manifest.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Result, bail};
use env_logger::Env;
use log::info;

use packsync::instance::Instance;
use packsync::manifest::Manifest;
use packsync::sync::{SyncConfig, synchronize};

const DEFAULT_INSTANCE_FILE: &str = "minecraftinstance.json";
const DEFAULT_MODS_DIR: &str = "mods";
const DEFAULT_MANIFEST_FILE: &str = "manifest.json";

fn print_usage() {
    eprintln!(
        "Usage:\n  \
         packsync sync [--instance <file>] [--mods <dir>] [--workers <n>]\n  \
         packsync manifest <version> [--instance <file>] [--output <file>]"
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}, aborting");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<ExitCode> {
    match args.first().map(String::as_str) {
        Some("sync") => run_sync(&args[1..]).await,
        Some("manifest") => run_manifest(&args[1..]).await,
        Some("--help" | "-h" | "help") | None => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {other}");
        }
    }
}

async fn run_sync(args: &[String]) -> Result<ExitCode> {
    let mut config = SyncConfig::new(DEFAULT_INSTANCE_FILE, DEFAULT_MODS_DIR);

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--instance" => config.instance_path = PathBuf::from(expect_value(&mut args, arg)?),
            "--mods" => config.mods_dir = PathBuf::from(expect_value(&mut args, arg)?),
            "--workers" => {
                config.workers = expect_value(&mut args, arg)?
                    .parse()
                    .map_err(|_| anyhow::anyhow!("--workers expects a number"))?;
            }
            other => bail!("unknown option for sync: {other}"),
        }
    }

    let report = synchronize(&config).await?;

    info!(
        "Sync finished: {} downloaded, {} re-enabled, {} already present, {} removed",
        report.downloaded, report.reactivated, report.already_present, report.pruned
    );

    if report.is_converged() {
        return Ok(ExitCode::SUCCESS);
    }

    for (file_name, err) in &report.failed {
        eprintln!("Failed: {file_name}: {err}");
    }
    if report.prune_failures > 0 {
        eprintln!("Failed to remove {} stray file(s)", report.prune_failures);
    }
    Ok(ExitCode::FAILURE)
}

async fn run_manifest(args: &[String]) -> Result<ExitCode> {
    let mut version = None;
    let mut instance_path = PathBuf::from(DEFAULT_INSTANCE_FILE);
    let mut output_path = PathBuf::from(DEFAULT_MANIFEST_FILE);

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--instance" => instance_path = PathBuf::from(expect_value(&mut args, arg)?),
            "--output" => output_path = PathBuf::from(expect_value(&mut args, arg)?),
            other if !other.starts_with('-') && version.is_none() => {
                version = Some(other.to_string());
            }
            other => bail!("unknown option for manifest: {other}"),
        }
    }

    let Some(version) = version else {
        print_usage();
        bail!("manifest requires a version argument");
    };

    let instance = Instance::load(&instance_path).await?;
    Manifest::from_instance(&instance, &version)?
        .write(&output_path)
        .await?;

    Ok(ExitCode::SUCCESS)
}

fn expect_value<'a>(args: &mut std::slice::Iter<'a, String>, flag: &str) -> Result<&'a String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} expects a value"))
}
