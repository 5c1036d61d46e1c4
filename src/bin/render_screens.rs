use macro_charts::api::{
    AdasScreen, CumulativeScreen, GrapherConfig, Screen, SiScreen, SnapshotContract, SolowScreen,
};
use macro_charts::models::{EconomyType, PolicyResponse};
use macro_charts::render::NullRenderer;
use std::fs;
use std::path::PathBuf;

const SCREEN_NAMES: [&str; 4] = ["solow", "adas", "saving_investment", "cumulative"];

#[derive(Debug, Default)]
struct CliArgs {
    screen: Option<String>,
    config_path: Option<PathBuf>,
    png_dir: Option<PathBuf>,
    sets: Vec<(String, f64)>,
    economy: Option<EconomyType>,
    policy: Option<PolicyResponse>,
    play: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = macro_charts::telemetry::init_default_tracing();
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            GrapherConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => GrapherConfig::default(),
    };

    if !args.sets.is_empty() && args.screen.is_none() {
        return Err("--set needs a single --screen".to_owned());
    }

    let selected: Vec<&str> = match &args.screen {
        Some(name) => vec![name.as_str()],
        None => SCREEN_NAMES.to_vec(),
    };

    for name in selected {
        match name {
            "solow" => {
                let mut screen = SolowScreen::new(config).map_err(|err| err.to_string())?;
                apply_sets(&mut screen, &args.sets)?;
                emit(&screen, &args)?;
            }
            "adas" => {
                let mut screen = AdasScreen::new(config).map_err(|err| err.to_string())?;
                apply_sets(&mut screen, &args.sets)?;
                if let Some(policy) = args.policy {
                    screen.select_policy(policy).map_err(|err| err.to_string())?;
                }
                if args.play {
                    screen.play_demo().map_err(|err| err.to_string())?;
                    let ticks = screen
                        .run_demo_to_completion()
                        .map_err(|err| err.to_string())?;
                    eprintln!("demo finished after {ticks} tick(s)");
                }
                emit(&screen, &args)?;
            }
            "saving_investment" => {
                let mut screen = SiScreen::new(config).map_err(|err| err.to_string())?;
                if let Some(economy) = args.economy {
                    screen.set_economy(economy).map_err(|err| err.to_string())?;
                }
                apply_sets(&mut screen, &args.sets)?;
                emit(&screen, &args)?;
            }
            "cumulative" => {
                let mut screen = CumulativeScreen::new(config).map_err(|err| err.to_string())?;
                apply_sets(&mut screen, &args.sets)?;
                emit(&screen, &args)?;
            }
            other => {
                return Err(format!("unknown screen `{other}`\n\n{}", usage_message()));
            }
        }
    }
    Ok(())
}

fn apply_sets<S: Screen>(screen: &mut S, sets: &[(String, f64)]) -> Result<(), String> {
    for (key, value) in sets {
        screen
            .set_slider(key, *value)
            .map_err(|err| format!("{}: {err}", screen.name()))?;
    }
    Ok(())
}

fn emit<S: Screen>(screen: &S, args: &CliArgs) -> Result<(), String> {
    let json = screen
        .snapshot()
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())?;
    println!("{json}");

    let mut renderer = NullRenderer::default();
    screen
        .render_with(&mut renderer)
        .map_err(|err| format!("{}: frame validation failed: {err}", screen.name()))?;

    if let Some(dir) = &args.png_dir {
        write_pngs(screen, dir)?;
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_pngs<S: Screen>(screen: &S, dir: &std::path::Path) -> Result<(), String> {
    use macro_charts::render::{CairoRenderer, Renderer};
    use std::fs::File;

    fs::create_dir_all(dir)
        .map_err(|err| format!("failed to create output dir `{}`: {err}", dir.display()))?;
    let frames = screen.render_frames().map_err(|err| err.to_string())?;
    for (index, frame) in frames.iter().enumerate() {
        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| "viewport width overflows i32".to_owned())?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| "viewport height overflows i32".to_owned())?;
        let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
        renderer.render(frame).map_err(|err| err.to_string())?;

        let path = dir.join(format!("{}_{index}.png", screen.name()));
        let mut file = File::create(&path)
            .map_err(|err| format!("failed to create png `{}`: {err}", path.display()))?;
        renderer
            .write_png(&mut file)
            .map_err(|err| format!("failed to write png `{}`: {err}", path.display()))?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_pngs<S: Screen>(_screen: &S, _dir: &std::path::Path) -> Result<(), String> {
    Err("--png-dir requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--screen" => parsed.screen = Some(value_for("--screen")?),
            "--config" => parsed.config_path = Some(PathBuf::from(value_for("--config")?)),
            "--png-dir" => parsed.png_dir = Some(PathBuf::from(value_for("--png-dir")?)),
            "--set" => {
                let raw = value_for("--set")?;
                let (key, value) = raw
                    .split_once('=')
                    .ok_or_else(|| format!("--set expects key=value, got `{raw}`"))?;
                let value: f64 = value
                    .parse()
                    .map_err(|err| format!("--set `{key}`: invalid number `{value}`: {err}"))?;
                parsed.sets.push((key.to_owned(), value));
            }
            "--economy" => {
                parsed.economy = Some(match value_for("--economy")?.as_str() {
                    "closed" => EconomyType::Closed,
                    "small_open" => EconomyType::SmallOpen,
                    "large_open" => EconomyType::LargeOpen,
                    other => return Err(format!("unknown economy `{other}`")),
                });
            }
            "--policy" => {
                parsed.policy = Some(match value_for("--policy")?.as_str() {
                    "none" => PolicyResponse::NoPolicy,
                    "inflation" => PolicyResponse::StabilizeInflation,
                    "output" => PolicyResponse::StabilizeOutput,
                    other => return Err(format!("unknown policy `{other}`")),
                });
            }
            "--play" => parsed.play = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(parsed)
}

fn usage_message() -> String {
    format!(
        "Usage: cargo run --bin render_screens -- [options]\n\nPrints each screen's snapshot as schema v1 JSON.\n\nOptions:\n  --screen <name>        One of: {}\n  --config <path>        GrapherConfig JSON file\n  --set <key=value>      Move a slider (repeatable, needs --screen)\n  --economy <type>       closed | small_open | large_open\n  --policy <policy>      none | inflation | output (AD/AS)\n  --play                 Run the AD/AS policy demo to completion\n  --png-dir <dir>        Write PNGs (needs feature `cairo-backend`)\n  -h, --help             Show this message",
        SCREEN_NAMES.join(", ")
    )
}
