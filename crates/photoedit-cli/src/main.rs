use clap::Parser;
use photoedit_core::tasks::{load_image, save_to_gallery};
use photoedit_core::transform::{CropRect, Size};
use photoedit_core::{
    CommandOutcome, DirectoryGallery, EditCommand, EditSession, EditorConfig, FilterKind,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "photoedit")]
#[command(about = "Apply a filter, rotation and crop to a photo and save it to a gallery folder")]
#[command(long_about = "\
Apply a filter, rotation and crop to a photo and save it to a gallery folder

Edits are applied in a fixed order: rotate, crop, filter, then undo.
The crop rectangle is given in display coordinates of a container the image
fills (scaled to cover, overflow cut evenly on both sides), the way a touch
UI shows it.

The result is written as <out>/<gallery_folder>/<file_prefix><unix millis>.jpg.

Config file (TOML, every key optional):

  gallery_folder = \"Pictures/PhotoEditorCompose\"
  file_prefix = \"PhotoEditor_\"
  jpeg_quality = 100
  history_limit = 50
  apply_exif_orientation = true")]
#[command(version = photoedit_core::VERSION)]
struct Cli {
    /// Image to edit
    #[arg(required_unless_present = "list_filters")]
    input: Option<PathBuf>,

    /// Filter to apply (see --list-filters)
    #[arg(short, long)]
    filter: Option<FilterKind>,

    /// Number of 90° clockwise turns
    #[arg(short, long, default_value_t = 0)]
    rotate: u32,

    /// Crop selection as X,Y,W,H in display coordinates
    #[arg(long, value_parser = parse_crop, requires = "container")]
    crop: Option<CropRect>,

    /// Display container size as W,H, used to interpret --crop
    #[arg(long, value_parser = parse_size)]
    container: Option<Size>,

    /// Number of edits to undo after applying the others
    #[arg(long, default_value_t = 0)]
    undo: u32,

    /// Config file
    #[arg(long, default_value = "photoedit.toml")]
    config: PathBuf,

    /// Gallery root directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// List filter identifiers and exit
    #[arg(long)]
    list_filters: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let values = s
        .split(',')
        .map(|part| part.trim().parse::<f64>().map_err(|e| format!("{part:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected {N} comma-separated numbers, got {}", v.len()))
}

fn parse_crop(s: &str) -> Result<CropRect, String> {
    let [x, y, w, h] = parse_numbers::<4>(s)?;
    Ok(CropRect::from_origin_size(x, y, w, h))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let [w, h] = parse_numbers::<2>(s)?;
    Ok(Size::new(w, h))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_filters() {
    for filter in FilterKind::ALL {
        println!("{:<12} {}", filter.id(), filter.label());
    }
}

/// Apply the requested edits in their fixed order.
fn apply_edits(session: &mut EditSession, cli: &Cli) {
    for _ in 0..cli.rotate % 4 {
        session.apply(EditCommand::Rotate);
    }

    if let (Some(rect), Some(container)) = (cli.crop, cli.container) {
        session.apply(EditCommand::BeginCrop);
        session.apply(EditCommand::UpdateCrop(rect));
        if session.apply(EditCommand::ApplyCrop { container }) == CommandOutcome::Skipped {
            warn!(?rect, ?container, "crop selection is empty, crop skipped");
            session.apply(EditCommand::CancelCrop);
        }
    }

    if let Some(filter) = cli.filter {
        session.apply(EditCommand::SelectFilter(filter));
    }

    for _ in 0..cli.undo {
        if session.apply(EditCommand::Undo) == CommandOutcome::Skipped {
            warn!("nothing left to undo");
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_filters {
        print_filters();
        return Ok(ExitCode::SUCCESS);
    }
    let Some(input) = cli.input.clone() else {
        return Err("no input image given".into());
    };

    let config = EditorConfig::load_or_default(&cli.config)?;
    info!(config = %cli.config.display(), "configuration loaded");

    let mut session = EditSession::with_config(&config);
    session.load(load_image(input, config.apply_exif_orientation).await?);
    apply_edits(&mut session, &cli);

    let state = session.state();
    info!(
        width = state.width,
        height = state.height,
        filter = %state.filter,
        rotation = state.rotation,
        "edits applied"
    );

    let export = session.begin_save()?;
    let gallery = Arc::new(DirectoryGallery::from_config(&cli.out, &config));
    let result = save_to_gallery(gallery, export, config.gallery_folder.clone()).await;
    let status = session.finish_save(result);

    println!("{}", status.message());
    Ok(if status.is_saved() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crop() {
        let rect = parse_crop("10, 20,30,40").unwrap();
        assert_eq!(rect, CropRect::from_origin_size(10.0, 20.0, 30.0, 40.0));
    }

    #[test]
    fn test_parse_crop_wrong_count() {
        assert!(parse_crop("1,2,3").is_err());
        assert!(parse_crop("a,b,c,d").is_err());
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("300,200").unwrap(), Size::new(300.0, 200.0));
    }

    #[test]
    fn test_cli_parses_edits() {
        let cli = Cli::try_parse_from([
            "photoedit",
            "in.jpg",
            "--filter",
            "blue-tint",
            "--rotate",
            "2",
            "--crop",
            "0,0,300,300",
            "--container",
            "300,300",
        ])
        .unwrap();
        assert_eq!(cli.filter, Some(FilterKind::BlueTint));
        assert_eq!(cli.rotate, 2);
        assert!(cli.crop.is_some());
    }

    #[test]
    fn test_crop_requires_container() {
        let result = Cli::try_parse_from(["photoedit", "in.jpg", "--crop", "0,0,1,1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_filters_needs_no_input() {
        let cli = Cli::try_parse_from(["photoedit", "--list-filters"]).unwrap();
        assert!(cli.list_filters);
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_apply_edits_order() {
        let cli = Cli::try_parse_from([
            "photoedit",
            "in.jpg",
            "--rotate",
            "1",
            "--crop",
            "0,0,300,300",
            "--container",
            "300,300",
            "--filter",
            "sepia",
        ])
        .unwrap();

        let mut session = EditSession::new();
        session.load(photoedit_core::Bitmap::filled(300, 600, [255, 255, 255, 255]));
        apply_edits(&mut session, &cli);

        let state = session.state();
        // 300x600 turns into 600x300, then the filled 300x300 center is kept
        assert_eq!((state.width, state.height), (300, 300));
        assert_eq!(state.rotation, 90.0);
        assert_eq!(state.filter, FilterKind::Sepia);
        assert_eq!(state.history_len, 4);
    }

    #[test]
    fn test_undo_stops_at_start() {
        let cli = Cli::try_parse_from(["photoedit", "in.jpg", "--rotate", "1", "--undo", "5"])
            .unwrap();
        let mut session = EditSession::new();
        session.load(photoedit_core::Bitmap::filled(2, 1, [0, 0, 0, 255]));
        apply_edits(&mut session, &cli);
        assert_eq!(session.state().width, 2);
        assert_eq!(session.rotation(), 0.0);
    }
}
