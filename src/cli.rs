use crate::codec::LdrConversion;
use crate::config::EngineConfigOverrides;
use crate::environment::SampleSource;
use anyhow::{anyhow, bail, Context, Result};
use glam::Vec3;
use std::env;
use std::path::PathBuf;

/// Layout named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutArg {
    LatLong,
    Cross,
    Faces,
}

impl LayoutArg {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "latlong" | "lat-long" | "equirect" => Ok(LayoutArg::LatLong),
            "cross" | "cube-cross" => Ok(LayoutArg::Cross),
            "faces" | "cube-faces" => Ok(LayoutArg::Faces),
            other => bail!("Unknown layout '{other}'. Use latlong, cross or faces."),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Convert { from: LayoutArg, input: PathBuf, to: LayoutArg, output: PathBuf },
    Info { from: LayoutArg, input: PathBuf },
    Sample { from: LayoutArg, input: PathBuf, dir: Vec3, source: SampleSource },
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub overrides: EngineConfigOverrides,
    pub command: Command,
}

impl CliArgs {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config_path = None;
        let mut overrides = EngineConfigOverrides::default();
        let mut positional = Vec::new();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw) = iter.next() {
            let arg = raw.as_ref();
            if matches!(arg, "-h" | "--help") {
                positional.push("help".to_string());
                continue;
            }
            let Some(key) = arg.strip_prefix("--") else {
                positional.push(arg.to_string());
                continue;
            };
            let value =
                iter.next().ok_or_else(|| anyhow!("Expected a value after '{arg}'"))?.as_ref().to_string();
            match key {
                "config" => config_path = Some(PathBuf::from(value)),
                "strict" => overrides.strict_dimensions = Some(parse_bool_flag("strict", &value)?),
                "ldr" => overrides.ldr_conversion = Some(parse_ldr(&value)?),
                "jpeg-quality" => {
                    let quality =
                        value.parse::<u8>().with_context(|| format!("Invalid jpeg quality '{value}'"))?;
                    if !(1..=100).contains(&quality) {
                        bail!("Invalid jpeg quality '{value}'. Use a value in 1..=100.");
                    }
                    overrides.jpeg_quality = Some(quality);
                }
                _ => bail!(
                    "Unknown flag '{arg}'. Supported flags: --config, --strict, --ldr, --jpeg-quality."
                ),
            }
        }
        let command = parse_command(&positional)?;
        Ok(Self { config_path, overrides, command })
    }
}

fn parse_command(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let expect = |count: usize, usage: &str| -> Result<()> {
        if rest.len() != count {
            bail!("'{name}' expects {count} arguments: {usage}");
        }
        Ok(())
    };
    match name.as_str() {
        "convert" => {
            expect(4, "convert <from> <input> <to> <output>")?;
            Ok(Command::Convert {
                from: LayoutArg::parse(&rest[0])?,
                input: PathBuf::from(&rest[1]),
                to: LayoutArg::parse(&rest[2])?,
                output: PathBuf::from(&rest[3]),
            })
        }
        "info" => {
            expect(2, "info <from> <input>")?;
            Ok(Command::Info { from: LayoutArg::parse(&rest[0])?, input: PathBuf::from(&rest[1]) })
        }
        "sample" => {
            if rest.len() != 5 && rest.len() != 6 {
                bail!("'sample' expects: sample <from> <input> <x> <y> <z> [latlong|cube]");
            }
            let mut coords = [0.0f32; 3];
            for (slot, raw) in coords.iter_mut().zip(&rest[2..5]) {
                *slot = raw.parse::<f32>().with_context(|| format!("Invalid direction component '{raw}'"))?;
            }
            let dir = Vec3::from_array(coords);
            if !dir.is_finite() || dir.length_squared() == 0.0 {
                bail!("Sample direction must be finite and non-zero");
            }
            let source = match rest.get(5).map(|s| s.to_ascii_lowercase()) {
                None => SampleSource::Cube,
                Some(s) if s == "cube" => SampleSource::Cube,
                Some(s) if s == "latlong" || s == "lat-long" => SampleSource::LatLong,
                Some(other) => bail!("Unknown sample source '{other}'. Use latlong or cube."),
            };
            Ok(Command::Sample {
                from: LayoutArg::parse(&rest[0])?,
                input: PathBuf::from(&rest[1]),
                dir: dir.normalize(),
                source,
            })
        }
        "help" => Ok(Command::Help),
        other => bail!("Unknown command '{other}'. Run with 'help' for usage."),
    }
}

fn parse_bool_flag(flag: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => bail!("Invalid {flag} value '{other}'. Use on/off or true/false."),
    }
}

fn parse_ldr(value: &str) -> Result<LdrConversion> {
    match value.to_ascii_lowercase().as_str() {
        "clamp" => Ok(LdrConversion::Clamp),
        "wrap" => Ok(LdrConversion::Wrap),
        other => bail!("Invalid ldr value '{other}'. Use clamp or wrap."),
    }
}

pub fn usage() -> &'static str {
    "envmap_engine

Usage:
  envmap_engine [flags] convert <from> <input> <to> <output>
  envmap_engine [flags] info <from> <input>
  envmap_engine [flags] sample <from> <input> <x> <y> <z> [latlong|cube]
  envmap_engine help

Layouts: latlong, cross, faces. For faces, <input>/<output> is a base path:
sky.png stands for sky_px.png, sky_nx.png, sky_py.png, sky_ny.png, sky_pz.png, sky_nz.png.

Flags:
  --config <file>        JSON engine config
  --strict on|off        reject sources that are not multiples of the layout grid
  --ldr clamp|wrap       8-bit reduction for .bmp/.jpg/.tga/.png output
  --jpeg-quality <1-100> JPEG quality (default 95)
"
}
