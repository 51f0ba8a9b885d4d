use anyhow::{Context, Result};
use envmap_engine::cli::{usage, CliArgs, Command, LayoutArg};
use envmap_engine::config::EngineConfig;
use envmap_engine::environment::EnvironmentImage;
use std::path::Path;

fn main() {
    let args = match CliArgs::parse_from_env() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("[cli] {err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run(args) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = match args.config_path.as_deref() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if !args.overrides.is_empty() {
        eprintln!("[envmap] command-line overrides: {}", args.overrides.applied_fields().join(", "));
    }
    config.apply_overrides(&args.overrides);
    let mut env = EnvironmentImage::with_config(config);

    match args.command {
        Command::Help => {
            eprintln!("{}", usage());
            Ok(())
        }
        Command::Convert { from, input, to, output } => {
            load(&mut env, from, &input)?;
            save(&env, to, &output)?;
            println!("Converted {} -> {}", input.display(), output.display());
            Ok(())
        }
        Command::Info { from, input } => {
            load(&mut env, from, &input)?;
            let (lw, lh) = env.lat_long_size();
            let (cw, ch) = env.cube_cross_size();
            let (fw, fh) = env.cube_face_size();
            println!("lat-long:   {lw}x{lh}");
            println!("cube cross: {cw}x{ch}");
            println!("cube faces: 6 x {fw}x{fh}");
            Ok(())
        }
        Command::Sample { from, input, dir, source } => {
            load(&mut env, from, &input)?;
            let color = env.sample(dir, source).context("environment has no data to sample")?;
            println!("{:.6} {:.6} {:.6}", color.x, color.y, color.z);
            Ok(())
        }
    }
}

fn load(env: &mut EnvironmentImage, layout: LayoutArg, path: &Path) -> Result<()> {
    let result = match layout {
        LayoutArg::LatLong => env.load_lat_long(path),
        LayoutArg::Cross => env.load_cube_cross(path),
        LayoutArg::Faces => env.load_cube_faces_from(path),
    };
    result.with_context(|| format!("Failed to import '{}'", path.display()))
}

fn save(env: &EnvironmentImage, layout: LayoutArg, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory '{}'", parent.display()))?;
    }
    let result = match layout {
        LayoutArg::LatLong => env.save_lat_long(path),
        LayoutArg::Cross => env.save_cube_cross(path),
        LayoutArg::Faces => env.save_cube_faces(path),
    };
    result.with_context(|| format!("Failed to export '{}'", path.display()))
}
