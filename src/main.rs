//! Headless demo: renders a scene to a PNG file.
//!
//! ```text
//! polyraster [--config render.ron] [--model mesh.plg|mesh.obj] [--out frame.png]
//! ```
//!
//! Without a model, a row of three cubes is rendered. Set `RUST_LOG=debug` to
//! see the per-frame pipeline counters.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use polyraster::loader::{load_obj, load_plg, LoadOptions};
use polyraster::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "polyraster")]
#[command(about = "Render a scene to a PNG file on the CPU")]
struct Args {
    /// RON render configuration; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Model to render (.plg or .obj); three cubes when omitted
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output image
    #[arg(long, default_value = "frame.png")]
    out: PathBuf,
}

fn load_scene(model: Option<&Path>) -> Result<Vec<GameObject>, RenderError> {
    let Some(path) = model else {
        let mut cubes = Vec::new();
        for (i, color) in [Color::RED, Color::GREEN, Color::BLUE].into_iter().enumerate() {
            let mut cube = GameObject::cube(format!("cube{}", i), 1.0, color);
            let x = (i as f32 - 1.0) * 3.0;
            cube.set_transform(1.0, [30.0, 45.0 * i as f32, 0.0], Vec4::point(x, 0.0, 8.0));
            cubes.push(cube);
        }
        return Ok(cubes);
    };

    let options = LoadOptions::default().with_material(Material::new(ShadeMode::Gouraud, Color::WHITE));
    let mut objects = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("obj") => load_obj(path, &options)?,
        _ => vec![load_plg(path, &options)?],
    };

    // Push the model out to where the default camera sees it whole
    for object in &mut objects {
        let distance = object.max_radius() * 2.5;
        object.set_transform(1.0, [0.0, 30.0, 0.0], Vec4::point(0.0, 0.0, distance));
    }
    Ok(objects)
}

fn run(args: Args) -> Result<(), RenderError> {
    let config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    let camera = config.camera()?;
    let mut objects = load_scene(args.model.as_deref())?;

    let lights = [
        Light::ambient(Color::rgb(64.0, 64.0, 64.0)),
        Light::directional(Color::WHITE, Vec4::direction(-1.0, 1.0, -1.0)),
    ];

    let start = Instant::now();
    let mut list = config.render_list();
    for object in &mut objects {
        list.add_object(object, &camera, false);
    }
    list.pre_render(&camera, &lights);

    let mut rasterizer = config.rasterizer();
    let drawn = match config.render_mode {
        RenderMode::Solid => list.render_solid(&mut rasterizer),
        RenderMode::Wire => list.render_wire(&mut rasterizer),
    };
    log::info!("Drew {} polygons in {:?}", drawn, start.elapsed());

    rasterizer.into_frame().save(&args.out)
}

fn main() -> Result<(), RenderError> {
    env_logger::init();

    let args = Args::parse();
    run(args).inspect_err(|e| log::error!("{}", e))
}
