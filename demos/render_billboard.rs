use billboard::{
    Billboard, Canvas, CpuSurface, DrawingSurface, Point, PointerEvent, Quad, QuadEditor,
    RasterImage, Rect, RenderOpts, Rgba8, Scene,
};

fn checker(width: u32, height: u32, cell: u32, a: Rgba8, b: Rgba8) -> anyhow::Result<RasterImage> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let c = if (x / cell + y / cell) % 2 == 0 { a } else { b };
            data.extend_from_slice(&c.to_premul_array());
        }
    }
    Ok(RasterImage::new(width, height, data)?)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let canvas = Canvas::new(640, 360);
    let base = checker(640, 360, 40, Rgba8::opaque(40, 44, 52), Rgba8::opaque(58, 64, 76))?;
    let banner = checker(600, 300, 50, Rgba8::opaque(239, 68, 68), Rgba8::WHITE)?;

    let flat = Billboard::new(1u64, Quad::from_rect(Rect::new(40.0, 40.0, 260.0, 160.0)));
    let mut tilted = Billboard::new(
        2u64,
        Quad::new(
            Point::new(340.0, 80.0),
            Point::new(600.0, 40.0),
            Point::new(340.0, 300.0),
            Point::new(600.0, 330.0),
        ),
    );

    // Pull the tilted billboard's bottom-right corner in, as a user would.
    let mut editor = QuadEditor::new(canvas);
    editor.start_perspective(Some(&tilted))?;
    editor.handle(PointerEvent::Down(Point::new(600.0, 330.0)));
    editor.handle(PointerEvent::Move(Point::new(580.0, 300.0)));
    editor.handle(PointerEvent::Up(Point::new(580.0, 300.0)));
    editor.confirm(&mut tilted)?;

    let mut scene = Scene::new(canvas, vec![flat, tilted])?;
    scene.set_base(base);
    scene.set_banner(0, Some(banner.clone()))?;
    scene.set_banner(1, Some(banner))?;

    let mut surface = CpuSurface::new(canvas)?;
    let report = scene.render(&mut surface, &RenderOpts::default())?;
    let frame = surface.snapshot()?;
    let png = billboard::encode_png(&frame)?;

    let out_path = std::path::Path::new("target").join("render_billboard.png");
    std::fs::create_dir_all("target")?;
    std::fs::write(&out_path, png)?;
    println!(
        "wrote {} ({} billboards composited)",
        out_path.display(),
        report.composited.len()
    );
    Ok(())
}
