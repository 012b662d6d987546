use anyhow::{bail, Context, Result};
use meeting_notes_lib::services::{
    load_notes, normalize_punctuation, render_json, render_report, status_line, write_report, AnnotatorKind,
    AppConfig, ConfigStore, MeetingNotesAnalyzer, NlpCapability, StrategyPreference,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "\
Usage:
  meeting-notes-analyzer <notes.txt|notes.docx|-> [options]
  meeting-notes-analyzer --text \"<notes>\" [options]

Options:
  --strategy <auto|annotated|patterns>   force a classification strategy
  --annotator <service|builtin|none>     annotation source for the annotated strategy
  --service-url <url>                    annotation service base URL
  --config <path>                        config file (default: user config dir)
  --out <report.txt>                     also write the text report
  --json <path>                          also write the result as JSON
  --normalize                            normalize quotes, dashes and spacing before analysis
  --save-config                          write the effective options back to the config file

Notes:
  - `-` reads the notes from stdin.
  - `--save-config` without input only updates the config file.
  - MEETING_NOTES_DISABLE_FILE_LOG=1 keeps logs on the console only.";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Options that take no value
const FLAGS: &[&str] = &["--normalize", "--save-config", "--help"];

/// First argument that is neither an option nor an option's value
fn positional(args: &[String]) -> Option<String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "-" || !arg.starts_with("--") {
            return Some(arg.clone());
        }
        if !FLAGS.contains(&arg.as_str()) {
            iter.next();
        }
    }
    None
}

fn config_store(args: &[String]) -> Option<ConfigStore> {
    match parse_arg_value(args, "--config") {
        Some(path) => Some(ConfigStore::with_file(PathBuf::from(path))),
        None => ConfigStore::default_config_dir().map(ConfigStore::new),
    }
}

fn load_config(store: Option<&ConfigStore>) -> Result<AppConfig> {
    match store {
        Some(store) => store
            .load()
            .with_context(|| format!("loading config {}", store.config_file().display())),
        None => Ok(AppConfig::default()),
    }
}

/// Config file values with command line overrides applied
fn apply_overrides(config: &mut AppConfig, args: &[String]) {
    if let Some(strategy) = parse_arg_value(args, "--strategy") {
        config.analysis.strategy = strategy;
    }
    if let Some(annotator) = parse_arg_value(args, "--annotator") {
        config.annotation.annotator = annotator;
    }
    if let Some(url) = parse_arg_value(args, "--service-url") {
        config.annotation.service_url = url;
    }
    if has_flag(args, "--normalize") {
        config.analysis.normalize_input = true;
    }
}

fn read_input(args: &[String]) -> Result<Option<String>> {
    if let Some(text) = parse_arg_value(args, "--text") {
        return Ok(Some(text));
    }
    match positional(args).as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading notes from stdin")?;
            Ok(Some(buf))
        }
        Some(path) => {
            let text = load_notes(&PathBuf::from(path)).with_context(|| format!("loading {}", path))?;
            info!(path = %path, chars = text.chars().count(), "notes.loaded");
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    meeting_notes_lib::init_logging();

    let store = config_store(&args);
    let mut config = load_config(store.as_ref())?;
    apply_overrides(&mut config, &args);

    let saved = has_flag(&args, "--save-config");
    if saved {
        // Invalid strategy or annotator values are never written
        config.strategy_preference()?;
        config.annotator_kind()?;
        let Some(store) = store.as_ref() else {
            bail!("no config directory available, pass --config <path>");
        };
        store
            .save(&config)
            .with_context(|| format!("saving config {}", store.config_file().display()))?;
        info!(path = %store.config_file().display(), "config.saved");
        eprintln!("Saved config: {}", store.config_file().display());
    }

    let Some(raw) = read_input(&args)? else {
        if saved {
            return Ok(());
        }
        eprintln!("{}", USAGE);
        bail!("no input given");
    };
    let text = if config.analysis.normalize_input {
        normalize_punctuation(&raw)
    } else {
        raw
    };
    if text.trim().is_empty() {
        warn!("empty input rejected");
        bail!("Please enter some meeting notes to analyze.");
    }

    // Forcing patterns never needs the annotator health check
    let capability = match config.strategy_preference()? {
        StrategyPreference::Patterns => NlpCapability::unavailable(),
        _ => {
            let kind: AnnotatorKind = config.annotator_kind()?;
            NlpCapability::global(kind, &config.annotation).clone()
        }
    };

    let analyzer = MeetingNotesAnalyzer::from_config(&config, &capability)?;
    let result = analyzer.analyze(&text);
    let generated_at = chrono::Local::now();

    print!("{}", render_report(&result, &generated_at));

    if let Some(out) = parse_arg_value(&args, "--out") {
        write_report(&PathBuf::from(&out), &result, &generated_at)
            .with_context(|| format!("writing report {}", out))?;
        info!(path = %out, "report.saved");
    }

    if let Some(json_path) = parse_arg_value(&args, "--json") {
        let json = render_json(&result, &generated_at)?;
        std::fs::write(&json_path, json).with_context(|| format!("writing {}", json_path))?;
        info!(path = %json_path, "json.saved");
    }

    eprintln!("{}", status_line(&result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positional_skips_option_values() {
        let a = args(&["bin", "--strategy", "patterns", "notes.txt", "--out", "r.txt"]);
        assert_eq!(positional(&a).as_deref(), Some("notes.txt"));
        assert_eq!(positional(&args(&["bin", "--json", "out.json", "-"])).as_deref(), Some("-"));
        assert_eq!(positional(&args(&["bin", "--strategy", "patterns"])), None);
    }

    #[test]
    fn test_positional_after_flags() {
        let a = args(&["bin", "--save-config", "notes.txt"]);
        assert_eq!(positional(&a).as_deref(), Some("notes.txt"));
        let a = args(&["bin", "--normalize", "--strategy", "auto", "notes.docx"]);
        assert_eq!(positional(&a).as_deref(), Some("notes.docx"));
    }

    #[test]
    fn test_overrides_then_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.json");
        let a = args(&[
            "bin",
            "--config",
            file.to_str().unwrap(),
            "--strategy",
            "patterns",
            "--annotator",
            "builtin",
            "--normalize",
            "--save-config",
        ]);

        let store = config_store(&a).unwrap();
        assert_eq!(store.config_file(), file.as_path());
        let mut config = load_config(Some(&store)).unwrap();
        assert!(!config.analysis.normalize_input);
        apply_overrides(&mut config, &a);
        store.save(&config).unwrap();

        let reloaded = load_config(Some(&store)).unwrap();
        assert_eq!(reloaded.analysis.strategy, "patterns");
        assert_eq!(reloaded.annotation.annotator, "builtin");
        assert!(reloaded.analysis.normalize_input);
    }
}
