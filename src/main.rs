use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quilt_placer::render::{svg, text};
use quilt_placer::{ColorSpec, Diversifier, QuiltConfig, QuiltModel, Result, StopReason, Z3Engine};

/// The quilt this tool was first written for, used when no colors are given.
const SAMPLE_COLORS: [(&str, usize, &str); 9] = [
    ("blue", 7, "#0000ff"),
    ("orange", 9, "#d78700"),
    ("yellow", 8, "#ffff00"),
    ("green", 8, "#008700"),
    ("aqua", 5, "#5fd7af"),
    ("brown", 4, "#875f00"),
    ("red", 7, "#ff0000"),
    ("purple", 8, "#af00ff"),
    ("pink", 5, "#d700d7"),
];

#[derive(Args)]
struct QuiltArgs {
    /// JSON file with major_width, major_height and colors; overrides the other quilt flags
    #[clap(long)]
    config: Option<PathBuf>,
    /// Major squares per row
    #[clap(long, default_value = "6")]
    width: usize,
    /// Major rows
    #[clap(long, default_value = "6")]
    height: usize,
    /// A color as name:count:display, repeatable; defaults to the 6x6 sample palette
    #[clap(long = "color")]
    colors: Vec<ColorSpec>,
    /// Print without ANSI colors
    #[clap(long)]
    no_color: bool,
}

impl QuiltArgs {
    fn resolve(&self) -> Result<QuiltConfig> {
        if let Some(path) = &self.config {
            return QuiltConfig::load(path);
        }
        let colors = if self.colors.is_empty() {
            SAMPLE_COLORS
                .iter()
                .map(|&(name, count, display)| ColorSpec { name: name.into(), count, display: display.into() })
                .collect()
        } else {
            self.colors.clone()
        };
        Ok(QuiltConfig { major_width: self.width, major_height: self.height, colors })
    }
}

#[derive(Parser)]
#[clap(name = "quilt-placer", about = "Find visually distinct colorings of a two-lattice quilt")]
enum Mode {
    /// Search for solutions, printing each as soon as it is found
    Solve {
        #[clap(flatten)]
        quilt: QuiltArgs,
        /// Number of solutions wanted
        #[clap(long, default_value = "10")]
        count: NonZeroUsize,
        /// Random seed handed to the solver on every call
        #[clap(long)]
        seed: Option<u32>,
        /// Per-solve time limit in milliseconds
        #[clap(long)]
        timeout_ms: Option<u64>,
        /// Also write each solution as quilt-NNN.svg into this directory
        #[clap(long)]
        svg_dir: Option<PathBuf>,
    },
    /// Validate the quilt and print its palette
    Legend {
        #[clap(flatten)]
        quilt: QuiltArgs,
    },
}

fn solve(quilt: &QuiltArgs, count: NonZeroUsize, seed: Option<u32>, timeout_ms: Option<u64>, svg_dir: Option<PathBuf>) -> Result<()> {
    let (topology, catalog) = quilt.resolve()?.build()?;
    let styled = !quilt.no_color;
    print!("{}", text::format_colors(&catalog, styled));
    println!();

    if let Some(dir) = &svg_dir {
        fs::create_dir_all(dir)?;
    }

    let model = QuiltModel::build(&topology, &catalog);
    let outcome = Diversifier::new(&model, Z3Engine::with_timeout(timeout_ms), count.get())
        .seed(seed)
        .run(|i, solution| {
            println!("solution {}:", i + 1);
            print!("{}", text::format_solution(solution, &topology, &catalog, styled)?);
            println!();
            if let Some(dir) = &svg_dir {
                let path = dir.join(format!("quilt-{:03}.svg", i + 1));
                ::svg::save(&path, &svg::render_solution(solution, &topology, &catalog)?)?;
                tracing::info!("wrote {}", path.display());
            }
            Ok(())
        })?;

    match outcome.stop {
        StopReason::Done => println!("found {} solution(s)", outcome.solutions.len()),
        StopReason::Exhausted => println!(
            "found {} of {} requested solution(s); no further distinct solutions exist",
            outcome.solutions.len(),
            count
        ),
    }
    Ok(())
}

fn legend(quilt: &QuiltArgs) -> Result<()> {
    let (topology, catalog) = quilt.resolve()?.build()?;
    print!("{}", text::format_colors(&catalog, !quilt.no_color));
    println!(
        "\nmajor {}x{} ({}), minor {}x{} ({}), {} squares",
        topology.major_width(),
        topology.major_height(),
        topology.major_count(),
        topology.minor_width(),
        topology.minor_height(),
        topology.minor_count(),
        topology.square_count()
    );
    Ok(())
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quilt_placer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match Mode::parse() {
        Mode::Solve { quilt, count, seed, timeout_ms, svg_dir } => solve(&quilt, count, seed, timeout_ms, svg_dir)?,
        Mode::Legend { quilt } => legend(&quilt)?,
    }
    Ok(())
}
