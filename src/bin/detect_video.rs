//! detect_video - run object detection over a video and show annotated frames
//!
//! Opens the configured video, runs the detection model on every frame, draws the
//! boxes and shows the result in a window until the video ends or the quit key
//! is pressed. Takes no operational arguments.

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;

use detect_viewer::{detect, FileConfig, FileSource, FrameLoop, LoopConfig, StopReason};

#[path = "../ui.rs"]
mod ui;

#[derive(Parser, Debug)]
#[command(
    name = "detect_video",
    version,
    about = "Run object detection on a video file and display annotated frames"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LoopConfig::default();
    config.validate()?;
    log::info!("model: {}", config.model_path);
    log::info!("source: {}", config.source_path);
    log::info!(
        "window: '{}' (press '{}' to quit)",
        config.window_title,
        config.quit_key
    );

    let ui = ui::Ui::new(std::io::stderr().is_terminal());
    let detector = {
        let _stage = ui.stage("Load detection model");
        detect::open_backend(&config.model_path)?
    };
    let source = {
        let _stage = ui.stage("Open video source");
        FileSource::new(FileConfig::new(config.source_path.clone()))?
    };

    #[cfg(feature = "display-minifb")]
    let display = detect_viewer::display::MinifbDisplay::new();
    #[cfg(not(feature = "display-minifb"))]
    let display = {
        log::warn!("built without display-minifb; frames are processed headless");
        detect_viewer::display::HeadlessDisplay::new()
    };

    let summary = FrameLoop::new(config, source, detector, display).run()?;

    if summary.stop_reason == StopReason::SourceNotOpened {
        log::warn!("video source could not be opened; nothing was shown");
    }
    println!("detect_video summary:");
    println!("  frames displayed: {}", summary.frames_displayed);
    println!("  frames annotated: {}", summary.frames_annotated);
    println!("  results discarded: {}", summary.results_discarded);
    println!("  stopped: {:?}", summary.stop_reason);
    Ok(())
}
