use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vizepisode::render::{ImageFormat, RenderOptions, render_dot};
use vizepisode::{CharacterArcs, CharacterMap, Episode, Visualizer, VizError, read_file};

const DEFAULT_CHARACTER_FILE: &str = "characters.yml";
const LOG_ENV: &str = "VIZEPISODE_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Viz(VizError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Viz(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<VizError> for CliError {
    fn from(value: VizError) -> Self {
        Self::Viz(value)
    }
}

impl From<vizepisode::Error> for CliError {
    fn from(value: vizepisode::Error) -> Self {
        Self::Viz(value.into())
    }
}

impl From<vizepisode::render::RenderError> for CliError {
    fn from(value: vizepisode::render::RenderError) -> Self {
        Self::Viz(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Dot,
    Parse,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    inputs: Vec<String>,
    character_file: Option<String>,
    render: bool,
    format: Option<ImageFormat>,
    dot_bin: Option<PathBuf>,
    pretty: bool,
    with_meta: bool,
}

#[derive(Serialize)]
struct MetaOut<'a> {
    title: &'a str,
    epochs: Vec<String>,
    characters: Vec<&'a str>,
}

#[derive(Serialize)]
struct ParseOut<'a> {
    meta: MetaOut<'a>,
    model: &'a Episode,
}

fn usage() -> &'static str {
    "vizepisode-cli\n\
\n\
USAGE:\n\
  vizepisode-cli [dot] [--character-file <path>] [--render] [--format svg|png|pdf] [--dot-bin <path>] <path>...\n\
  vizepisode-cli parse [--pretty] [--meta] <path>...\n\
\n\
NOTES:\n\
  - dot writes <input>.dot next to each input (extension replaced).\n\
  - --render runs Graphviz instead and writes <input>.dot.<format>.\n\
  - '-' reads the episode from stdin (once) and writes the result to stdout.\n\
  - --character-file defaults to ./characters.yml when that file exists.\n\
  - The Graphviz binary defaults to $VIZEPISODE_DOT, then `dot` on PATH.\n\
  - Set VIZEPISODE_LOG (e.g. info, debug) to enable logging on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command_set = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "dot" | "parse" if !command_set && args.inputs.is_empty() => {
                command_set = true;
                args.command = if a == "dot" {
                    Command::Dot
                } else {
                    Command::Parse
                };
            }
            "--render" => args.render = true,
            "--pretty" => args.pretty = true,
            "--meta" => args.with_meta = true,
            "--character-file" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.character_file = Some(path.clone());
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let format = fmt
                    .parse::<ImageFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.format = Some(format);
            }
            "--dot-bin" => {
                let Some(bin) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.dot_bin = Some(PathBuf::from(bin));
            }
            "--" => args.inputs.extend(it.by_ref().cloned()),
            "-" => args.inputs.push("-".to_string()),
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => args.inputs.push(path.to_string()),
        }
    }

    if args.inputs.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    if args.inputs.iter().filter(|input| *input == "-").count() > 1 {
        return Err(CliError::Usage("stdin ('-') can only be given once"));
    }
    check_command_flags(&args)?;
    Ok(args)
}

fn check_command_flags(args: &Args) -> Result<(), CliError> {
    let misplaced = match args.command {
        Command::Dot => args.pretty || args.with_meta,
        Command::Parse => {
            args.render
                || args.format.is_some()
                || args.dot_bin.is_some()
                || args.character_file.is_some()
        }
    };
    if misplaced {
        return Err(CliError::Usage(usage()));
    }
    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(read_file(Path::new(input))?)
}

fn load_characters(explicit: Option<&str>) -> Result<Option<CharacterMap>, CliError> {
    let path = match explicit {
        Some(path) => Path::new(path),
        None => {
            let default = Path::new(DEFAULT_CHARACTER_FILE);
            if !default.is_file() {
                tracing::debug!("no {DEFAULT_CHARACTER_FILE}; using raw character names");
                return Ok(None);
            }
            default
        }
    };
    let visualizer = Visualizer::new().with_character_file(path)?;
    Ok(visualizer.characters)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn run_parse(input: &str, args: &Args) -> Result<(), CliError> {
    let episode = Episode::from_yaml_str(&read_input(input)?)?;
    if !args.with_meta {
        return write_json(&episode, args.pretty);
    }

    let arcs = CharacterArcs::collect(&episode);
    let out = ParseOut {
        meta: MetaOut {
            title: &episode.title,
            epochs: episode.epochs().map(|(key, _)| key).collect(),
            characters: arcs.iter().map(|(name, _)| name).collect(),
        },
        model: &episode,
    };
    write_json(&out, args.pretty)
}

fn run_dot(input: &str, visualizer: &Visualizer, args: &Args) -> Result<(), CliError> {
    let render = RenderOptions {
        format: args.format.unwrap_or_default(),
        dot_bin: args.dot_bin.clone(),
    };

    if input == "-" {
        let dot = visualizer.translate_str(&read_input(input)?)?;
        let mut stdout = std::io::stdout().lock();
        if args.render {
            stdout.write_all(&render_dot(&dot, &render)?)?;
        } else {
            stdout.write_all(dot.as_bytes())?;
        }
        return Ok(());
    }

    let path = Path::new(input);
    if args.render {
        visualizer.render_file(path, &render)?;
    } else {
        visualizer.translate_file(path)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<bool, CliError> {
    let characters = match args.command {
        Command::Dot => load_characters(args.character_file.as_deref())?,
        Command::Parse => None,
    };
    let visualizer = Visualizer::new().with_characters(characters);

    let mut all_ok = true;
    for input in &args.inputs {
        let result = match args.command {
            Command::Dot => run_dot(input, &visualizer, &args),
            Command::Parse => run_parse(input, &args),
        };
        if let Err(err) = result {
            eprintln!("{input}: {err}");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

fn init_tracing() {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
