use meeting_notes_lib::services::{
    load_notes, normalize_punctuation, AnnotatorKind, AppConfig, MeetingNotesAnalyzer, NlpCapability, PatternSet,
    StrategyPreference,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnitDump {
    index: usize,
    text: String,
    category: Option<String>,
    token_count: usize,
}

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn main() -> Result<(), String> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage:\n  cargo run --bin segment_notes -- <notes.txt|notes.docx> [--strategy <auto|annotated|patterns>] [--annotator <service|builtin|none>] [--tokens] [--normalize] [--out <json_path>]\n\nNotes:\n  - Prints the units the segmenter produces and the category each one receives.\n  - `--tokens` also prints the per-token annotation.\n  - `--normalize` cleans quotes, dashes and spacing before segmenting."
        );
        return Ok(());
    }

    meeting_notes_lib::init_logging();

    let path = args[1].clone();
    let show_tokens = has_flag(&args, "--tokens");
    let out_path = parse_arg_value(&args, "--out");

    let mut config = AppConfig::default();
    if let Some(strategy) = parse_arg_value(&args, "--strategy") {
        config.analysis.strategy = strategy;
    }
    if let Some(annotator) = parse_arg_value(&args, "--annotator") {
        config.annotation.annotator = annotator;
    }

    let preference = config.strategy_preference().map_err(|e| e.to_string())?;
    let kind: AnnotatorKind = config.annotator_kind().map_err(|e| e.to_string())?;

    let text = load_notes(std::path::Path::new(&path)).map_err(|e| format!("load failed: {}", e))?;
    let text = if has_flag(&args, "--normalize") {
        normalize_punctuation(&text)
    } else {
        text
    };

    let capability = match preference {
        StrategyPreference::Patterns => NlpCapability::unavailable(),
        _ => NlpCapability::detect(kind, &config.annotation),
    };
    let patterns = PatternSet::builtin().map_err(|e| e.to_string())?;
    let analyzer = MeetingNotesAnalyzer::with_preference(preference, &capability, patterns)
        .map_err(|e| e.to_string())?;

    let units = analyzer.segment(&text);

    println!("File: {}", path);
    println!("Extracted: {} chars ({} bytes)", text.chars().count(), text.len());
    println!("Strategy: {}", analyzer.strategy().method_label());
    println!("Annotator: {}", capability.describe());
    println!("Units: {}", units.len());
    println!();

    let mut dumps = Vec::with_capacity(units.len());
    for (i, unit) in units.iter().enumerate() {
        let category = analyzer.classify(unit);
        println!(
            "[{:03}] {:<9} {}",
            i,
            category.map(|c| c.as_str()).unwrap_or("-"),
            preview(&unit.text, 120)
        );
        if show_tokens {
            for token in unit.tokens() {
                println!(
                    "        {:<16} {:<6} {:<5} {:<14} {}",
                    token.text, token.pos, token.tag, token.lemma, token.ent_type
                );
            }
        }
        dumps.push(UnitDump {
            index: i,
            text: unit.text.clone(),
            category: category.map(|c| c.to_string()),
            token_count: unit.tokens().len(),
        });
    }

    if let Some(out) = out_path {
        let json = serde_json::to_string_pretty(&dumps).map_err(|e| e.to_string())?;
        std::fs::write(&out, json).map_err(|e| format!("write failed: {}", e))?;
        println!();
        println!("Saved: {}", out);
    }

    Ok(())
}
