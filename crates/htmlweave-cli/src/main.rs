use anyhow::{Context, Result, bail};
use htmlweave_config::Config;
use htmlweave_engine::{Cmd, CodecOptions, Document, snapshot};
use std::{
    env, fs,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "\
Usage: htmlweave [--config <path>] <command>

Commands:
  roundtrip <file.html>                     decode and re-encode, print the result
  inspect <file.html>                       show text, spans and comment markers
  insert <file.html> <offset> <text>        insert text at a char offset
  delete <file.html> <start> <end>          delete a char range";

enum Command {
    Roundtrip(PathBuf),
    Inspect(PathBuf),
    Edit(PathBuf, Cmd),
}

fn usage_error(message: &str) -> ! {
    eprintln!("Error: {message}");
    eprintln!("{USAGE}");
    process::exit(1);
}

fn parse_offset(arg: &str) -> usize {
    arg.parse()
        .unwrap_or_else(|_| usage_error(&format!("'{arg}' is not a char offset")))
}

fn parse_command(args: &[String]) -> Command {
    match args {
        [cmd, file] if cmd == "roundtrip" => Command::Roundtrip(PathBuf::from(file)),
        [cmd, file] if cmd == "inspect" => Command::Inspect(PathBuf::from(file)),
        [cmd, file, at, text] if cmd == "insert" => {
            Command::Edit(PathBuf::from(file), Cmd::insert(parse_offset(at), text.as_str()))
        }
        [cmd, file, start, end] if cmd == "delete" => Command::Edit(
            PathBuf::from(file),
            Cmd::delete(parse_offset(start)..parse_offset(end)),
        ),
        [] => usage_error("no command given"),
        _ => usage_error("unrecognised arguments"),
    }
}

fn init_logging(config_level: Option<log::LevelFilter>) {
    let mut builder = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        builder.filter_level(config_level.unwrap_or(log::LevelFilter::Info));
    }
    builder.init();
}

fn load_config(explicit: Option<&str>) -> Config {
    let loaded = match explicit {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    match loaded {
        Ok(Some(config)) => config,
        Ok(None) => {
            if let Some(path) = explicit {
                usage_error(&format!("config file '{path}' not found"));
            }
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
}

fn read_document(path: &Path, options: &CodecOptions) -> Result<(String, Document)> {
    let html = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let doc = Document::decode_with(&html, options)
        .with_context(|| format!("decoding {}", path.display()))?;
    Ok((html, doc))
}

fn inspect(doc: &Document) {
    let snap = snapshot::normalize(doc);
    println!("text: {:?}", snap.text);
    println!("spans:");
    for span in &snap.spans {
        let indent = "  ".repeat(span.depth as usize + 1);
        let attrs: String = span
            .attributes
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!(" {name}={value:?}"),
                None => format!(" {name}"),
            })
            .collect();
        let text = span.text.as_deref().unwrap_or("");
        println!(
            "{indent}{} <{}{attrs}> {}..{} {text:?}",
            span.kind, span.tag, span.span.0, span.span.1
        );
    }
    println!("markers:");
    for marker in &snap.markers {
        println!("  @{} depth {} <!--{}-->", marker.offset, marker.depth, marker.text);
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let config_arg = match args.iter().position(|a| a == "--config") {
        Some(i) if i + 1 < args.len() => {
            let path = args.remove(i + 1);
            args.remove(i);
            Some(path)
        }
        Some(_) => usage_error("--config needs a path"),
        None => None,
    };
    let config = load_config(config_arg.as_deref());
    init_logging(config.log_filter());
    log::debug!("codec options: {:?}", config.codec);

    match parse_command(&args) {
        Command::Roundtrip(path) => {
            let (html, doc) = read_document(&path, &config.codec)?;
            let encoded = doc.encode();
            println!("{encoded}");
            if encoded != html.trim_end_matches('\n') {
                log::info!("{} is not in canonical form", path.display());
            }
        }
        Command::Inspect(path) => {
            let (_, doc) = read_document(&path, &config.codec)?;
            inspect(&doc);
        }
        Command::Edit(path, cmd) => {
            let (_, mut doc) = read_document(&path, &config.codec)?;
            let patch = match doc.apply(cmd) {
                Ok(patch) => patch,
                Err(e) => bail!("edit rejected: {e}"),
            };
            log::info!(
                "{} span(s) added, {} removed, {} modified",
                patch.spans.added.len(),
                patch.spans.removed.len(),
                patch.spans.modified.len()
            );
            println!("{}", doc.encode());
        }
    }
    Ok(())
}
