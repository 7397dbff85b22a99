use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use billboard::{
    Billboard, Canvas, Catalog, CompositorOpts, CpuSurface, DrawingSurface, Point, Quad,
    RenderOpts, Scene, Screenshot,
};

#[derive(Parser, Debug)]
#[command(name = "billboard", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a banner onto a screenshot and write a PNG.
    Composite(CompositeArgs),
    /// Summarize a catalog JSON file.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Base screenshot.
    #[arg(long)]
    base: PathBuf,

    /// Banner image.
    #[arg(long)]
    banner: PathBuf,

    /// Destination corners "x,y x,y x,y x,y" in outline order: top-left, top-right,
    /// bottom-right, bottom-left.
    #[arg(long, conflicts_with = "layout")]
    quad: Option<String>,

    /// Screenshot layout JSON (`{"filename", "bannerSize", "billboards": [...]}`).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Billboard index receiving the banner (default: every billboard).
    #[arg(long)]
    billboard: Option<usize>,

    /// Grid segments per axis (overrides BILLBOARD_GRID_SEGMENTS).
    #[arg(long)]
    grid: Option<u32>,

    /// Draw billboard outlines on top of the composite.
    #[arg(long)]
    outlines: bool,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Catalog JSON.
    #[arg(long)]
    catalog: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn parse_quad(s: &str) -> anyhow::Result<Quad> {
    let pts = s
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("corner '{pair}' is not 'x,y'"))?;
            let x: f64 = x.trim().parse().with_context(|| format!("bad x in '{pair}'"))?;
            let y: f64 = y.trim().parse().with_context(|| format!("bad y in '{pair}'"))?;
            Ok::<_, anyhow::Error>(Point::new(x, y))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let &[tl, tr, br, bl] = pts.as_slice() else {
        anyhow::bail!("--quad needs exactly 4 corners, got {}", pts.len());
    };
    Ok(Quad::new(tl, tr, bl, br))
}

fn read_layout_json(path: &Path) -> anyhow::Result<Screenshot> {
    let f = File::open(path).with_context(|| format!("open layout '{}'", path.display()))?;
    let r = BufReader::new(f);
    let shot: Screenshot = serde_json::from_reader(r).with_context(|| "parse layout JSON")?;
    Ok(shot)
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let base = billboard::load_image(&args.base)?;
    let banner = billboard::load_image(&args.banner)?;
    let canvas = Canvas::new(base.width, base.height);

    let billboards = if let Some(q) = &args.quad {
        vec![Billboard::new(0u64, parse_quad(q)?)]
    } else if let Some(path) = &args.layout {
        read_layout_json(path)?.to_billboards()
    } else {
        vec![Billboard::with_default_quad(0u64, canvas)]
    };

    let mut scene = Scene::new(canvas, billboards)?;
    scene.set_base(base);
    match args.billboard {
        Some(i) => scene.set_banner(i, Some(banner))?,
        None => {
            for i in 0..scene.billboards().len() {
                scene.set_banner(i, Some(banner.clone()))?;
            }
        }
    }

    let mut compositor = CompositorOpts::from_env();
    if let Some(n) = args.grid {
        compositor.grid_segments = n;
    }
    let opts = RenderOpts {
        outlines: args.outlines,
        active: args.billboard,
        compositor,
    };

    let mut surface = CpuSurface::new(canvas)?;
    let report = scene.render(&mut surface, &opts)?;
    let frame = surface.snapshot()?;
    let png = billboard::encode_png(&frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} composited, {} skipped)",
        args.out.display(),
        report.composited.len(),
        report.skipped.len()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let catalog = Catalog::from_path(&args.catalog)?;
    for game in &catalog.games {
        println!("{} ({})", game.name, game.id);
        for shot in &game.screenshots {
            println!(
                "  {} [{}] {} billboard(s)",
                shot.filename,
                shot.banner_size,
                shot.billboards.len()
            );
            for (i, rec) in shot.billboards.iter().enumerate() {
                let q = rec.perspective;
                let status = match q.validate() {
                    Ok(()) => "ok".to_owned(),
                    Err(e) => e.to_string(),
                };
                println!(
                    "    #{i} id={} bounds=({}, {}, {}x{}) tl=({}, {}) tr=({}, {}) br=({}, {}) bl=({}, {}) {status}",
                    rec.id,
                    rec.x,
                    rec.y,
                    rec.width,
                    rec.height,
                    q.top_left.x,
                    q.top_left.y,
                    q.top_right.x,
                    q.top_right.y,
                    q.bottom_right.x,
                    q.bottom_right.y,
                    q.bottom_left.x,
                    q.bottom_left.y,
                );
            }
        }
    }
    Ok(())
}
