use chipfold_core::{
    format_score, score_hand, Card, Edition, HandKind, Joker, JokerRarity, RuleEffect,
    ScoreBreakdown, ScoreTables, ScoreTraceStep, ScoringContext,
};
use chipfold_data::{load_catalog, load_game_config};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

#[derive(Debug, Clone, Default)]
struct CliOptions {
    trace: bool,
    json: bool,
    list_jokers: bool,
    list_hands: bool,
    help: bool,
    input: Option<String>,
}

/// A context file as the CLI accepts it: jokers may be written inline or as
/// catalog references with per-instance overrides.
#[derive(Debug, Deserialize)]
struct ContextFile {
    #[serde(default)]
    played: Vec<Card>,
    #[serde(default)]
    held: Vec<Card>,
    #[serde(default)]
    jokers: Vec<JokerEntry>,
    hand: HandKind,
    #[serde(default = "default_level")]
    level: u32,
    #[serde(default)]
    discards: u8,
    #[serde(default)]
    money: i64,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JokerEntry {
    Inline(Joker),
    Reference(JokerRef),
}

#[derive(Debug, Deserialize)]
struct JokerRef {
    id: String,
    #[serde(default)]
    edition: Option<Edition>,
    #[serde(default)]
    counter: Option<f64>,
    #[serde(default)]
    active: Option<bool>,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    for arg in args {
        match arg.as_str() {
            "--trace" | "-t" => options.trace = true,
            "--json" => options.json = true,
            "--jokers" => options.list_jokers = true,
            "--hands" => options.list_hands = true,
            "--help" | "-h" => options.help = true,
            other => options.input = Some(other.to_string()),
        }
    }
    options
}

fn print_help() {
    println!("usage: chipfold [--trace] [--json] <context.json | ->");
    println!("       chipfold --jokers");
    println!("       chipfold --hands");
    println!();
    println!("Scores a hand described by a context JSON file (or stdin with '-').");
    println!("  --trace   print every applied effect with running totals");
    println!("  --json    print the full breakdown as JSON");
    println!("  --jokers  list the built-in joker catalog by rarity");
    println!("  --hands   print the hand value table");
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        fs::read_to_string(path)
    }
}

fn resolve_jokers(entries: Vec<JokerEntry>) -> Result<Vec<Joker>, String> {
    let catalog = load_catalog();
    let mut jokers = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            JokerEntry::Inline(joker) => jokers.push(joker),
            JokerEntry::Reference(entry) => {
                let mut joker = catalog
                    .instantiate(&entry.id)
                    .map_err(|err| err.to_string())?;
                if entry.edition.is_some() {
                    joker.edition = entry.edition;
                }
                if entry.counter.is_some() {
                    joker.counter = entry.counter;
                }
                if let Some(active) = entry.active {
                    joker.active = active;
                }
                jokers.push(joker);
            }
        }
    }
    Ok(jokers)
}

fn build_context(file: ContextFile) -> Result<ScoringContext, String> {
    let jokers = resolve_jokers(file.jokers)?;
    Ok(ScoringContext {
        played: file.played,
        held: file.held,
        jokers,
        hand: file.hand,
        level: file.level,
        discards: file.discards,
        money: file.money,
    })
}

fn format_card(card: &Card) -> String {
    let mut out = format!("{}{}", card.rank.label(), card.suit.symbol());
    let mut tags = Vec::new();
    if let Some(enhancement) = card.enhancement {
        tags.push(enhancement.name().to_string());
    }
    if let Some(edition) = card.edition {
        tags.push(edition.name().to_string());
    }
    if let Some(seal) = card.seal {
        tags.push(format!("{seal:?} seal"));
    }
    if !card.scoring {
        tags.push("not scoring".to_string());
    }
    if !tags.is_empty() {
        out.push_str(&format!(" [{}]", tags.join(", ")));
    }
    out
}

fn print_breakdown(ctx: &ScoringContext, breakdown: &ScoreBreakdown, trace: bool) {
    println!(
        "hand: {} (Lvl {})",
        breakdown.hand.display_name(),
        breakdown.level
    );
    if !ctx.played.is_empty() {
        println!("played:");
        for (idx, card) in ctx.played.iter().enumerate() {
            println!("  {:>2}: {}", idx, format_card(card));
        }
    }
    if !ctx.held.is_empty() {
        println!("held:");
        for (idx, card) in ctx.held.iter().enumerate() {
            println!("  {:>2}: {}", idx, format_card(card));
        }
    }
    println!(
        "base: chips={} mult={:.2}",
        breakdown.base.chips, breakdown.base.mult
    );
    println!(
        "cards: chips={} mult={:.2}",
        breakdown.card_chips, breakdown.card_mult
    );
    println!(
        "jokers: chips={} mult={:.2} xmult={:.2}",
        breakdown.joker_chips, breakdown.joker_mult, breakdown.joker_x_mult
    );
    println!(
        "final: chips={} mult={:.2} score={}",
        breakdown.final_chips, breakdown.final_mult, breakdown.total_score
    );
    println!("display: {}", format_score(breakdown.total_score));

    if trace {
        print_trace(&breakdown.steps);
    }
}

fn print_trace(steps: &[ScoreTraceStep]) {
    if steps.is_empty() {
        println!("effect steps: none");
        return;
    }
    println!("effect steps:");
    for (idx, step) in steps.iter().enumerate() {
        println!(
            "  {:>2}. {} | {} | {}×{:.2} -> {}×{:.2}",
            idx + 1,
            step.source,
            format_effect(&step.effect),
            step.before.chips,
            step.before.mult,
            step.after.chips,
            step.after.mult
        );
    }
}

fn format_effect(effect: &RuleEffect) -> String {
    match effect {
        RuleEffect::AddChips(value) => format!("+{} chips", value),
        RuleEffect::AddMult(value) => format!("+{} mult", value),
        RuleEffect::MultiplyMult(value) => format!("x{} mult", value),
    }
}

fn print_jokers() {
    let catalog = load_catalog();
    for rarity in JokerRarity::ALL {
        let mut entries = catalog.by_rarity(rarity).peekable();
        if entries.peek().is_none() {
            continue;
        }
        println!("== {} ==", rarity.name());
        for def in entries {
            println!("  {:<18} {}", def.id, def.description);
        }
    }
}

fn print_hands() {
    let tables = ScoreTables::from_config(&load_game_config());
    println!("hand value table:");
    for kind in HandKind::ALL {
        let (chips, mult) = tables.hand_base(kind);
        let (level_chips, level_mult) = tables.level_bonus(kind);
        println!(
            "  {:<16} {:>4} x {:<5} (+{} chips, +{} mult per level)",
            kind.id(),
            chips,
            mult,
            level_chips,
            level_mult
        );
    }
}

fn run(options: &CliOptions) -> Result<(), String> {
    let Some(input) = options.input.as_deref() else {
        return Err("missing context file (use '-' for stdin, --help for usage)".to_string());
    };
    let body = read_input(input).map_err(|err| format!("read {input}: {err}"))?;
    let file: ContextFile =
        serde_json::from_str(&body).map_err(|err| format!("parse {input}: {err}"))?;
    let ctx = build_context(file)?;
    let tables = ScoreTables::from_config(&load_game_config());
    let breakdown = score_hand(&ctx, &tables);

    if options.json {
        let body = serde_json::to_string_pretty(&breakdown).map_err(|err| err.to_string())?;
        println!("{body}");
    } else {
        print_breakdown(&ctx, &breakdown, options.trace);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);

    if options.help {
        print_help();
        return ExitCode::SUCCESS;
    }
    if options.list_jokers {
        print_jokers();
        return ExitCode::SUCCESS;
    }
    if options.list_hands {
        print_hands();
        return ExitCode::SUCCESS;
    }

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
