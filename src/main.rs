use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use visdrone_sot_loader::logging::setup_logging;
use visdrone_sot_loader::{DatasetSplit, LoaderConfig, VisdroneSotLoader};

const USAGE: &str = "usage: visdrone-sot-loader <video_dir> <annotations_dir> [config.json]";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    }

    let log_dir = std::env::current_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("logs"));
    if let Err(e) = setup_logging(&log_dir) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting VisDrone SOT loader");

    let config = match args.get(2) {
        Some(path) => LoaderConfig::load_from(&PathBuf::from(path)),
        None => LoaderConfig::load(),
    };

    let video_dir = PathBuf::from(&args[0]);
    let annotations_dir = PathBuf::from(&args[1]);
    let loader = VisdroneSotLoader::new(&video_dir, &annotations_dir, config);

    let summary = loader.summary();
    if summary.num_videos == 0 {
        error!("No videos loaded from {:?}", annotations_dir);
    }
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize dataset summary: {}", e),
    }

    for split in [DatasetSplit::Train, DatasetSplit::Val] {
        let videos = loader.get_split(split);
        info!(
            "{} split: {} videos, {} annotated frames",
            split.as_str(),
            videos.len(),
            videos.total_annotated_frames
        );
    }

    ExitCode::SUCCESS
}
