use std::path::PathBuf;

use cgmath::Vector3;
use clap::Parser;
use image::Rgb;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rope::render::{Canvas, BACKGROUND, ROPE_COLOR};
use rope::{Chain, Config, Controls, DragInput, MouseButton};

/// Simulate a hanging rope and render its motion to a PNG
#[derive(Parser, Debug)]
#[command(name = "rope", version, long_about = None)]
struct Cli {
    /// JSON file with physical constants; unset fields use the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Horizontal drag in pixels applied to the free end for the first half
    /// of the run
    #[arg(long, default_value_t = 0., allow_hyphen_values = true)]
    tug: f32,

    /// View rotation about the vertical axis, in degrees
    #[arg(long, default_value_t = 0., allow_hyphen_values = true)]
    rotate: f32,

    /// Number of trailing frames drawn behind the final one
    #[arg(long, default_value_t = 15)]
    trail: u32,

    #[arg(short, long, default_value = "rope.png")]
    out: PathBuf,

    /// Logging verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn blend(a: Rgb<u8>, b: Rgb<u8>, t: f32) -> Rgb<u8> {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgb([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])])
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => {
            let config = Config::default();
            config.validate()?;
            config
        }
    };
    info!(nodes = config.node_count, frames = cli.frames, "starting rope");

    let base = Vector3::new(0., cli.height as f32 * 0.8, 0.);
    let mut chain = Chain::hanging(&config, base);
    let mut canvas = Canvas::new(cli.width, cli.height);

    let mut controls = Controls { rotation_y: cli.rotate, ..Controls::default() };
    let mut input = DragInput::new();
    let centre = cli.width as f32 / 2.;
    if cli.tug != 0. {
        input.press(&mut controls, MouseButton::Primary, centre);
        input.move_to(&mut controls, centre + cli.tug);
    }

    let trail_start = cli.frames.saturating_sub(cli.trail);
    for frame in 0..cli.frames {
        if frame == cli.frames / 2 && input.is_dragging() {
            input.release(&mut controls, MouseButton::Primary);
            info!(frame, "released tug");
        }

        chain.step(&config, controls);

        if !chain.is_finite() {
            warn!(frame, "chain positions are no longer finite; try a smaller time step or spring constant");
            break;
        }

        if frame >= trail_start {
            // Older frames fade toward the background
            let t = (cli.frames - 1 - frame) as f32 / (cli.trail.max(1) + 1) as f32;
            canvas.draw_chain(chain.model_views(), blend(ROPE_COLOR, BACKGROUND, t));
        }
    }

    canvas.save(&cli.out)?;
    info!(out = ?cli.out, max_separation = chain.max_separation(), "saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_canvas() {
        assert!(Cli::try_parse_from(vec!["rope", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(vec!["rope", "--height", "0"]).is_err());
    }

    #[test]
    fn defaults_parse() {
        let cli = Cli::try_parse_from(vec!["rope"]).unwrap();
        assert_eq!((cli.width, cli.height), (800, 800));
        assert_eq!(cli.frames, 120);
    }
}
