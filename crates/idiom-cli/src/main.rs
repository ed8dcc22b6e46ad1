//! CLI entry point for idiom-coach.
//!
//! This binary detects programming idioms in JavaScript and TypeScript
//! source and explains each one in terms of a target language.
//!
//! # Usage
//!
//! ```bash
//! idiom [OPTIONS] <COMMAND>
//!
//! # Detect patterns in a file and explain them
//! idiom detect src/user.ts --explain --format plain
//!
//! # Detect from stdin as JSON
//! cat snippet.js | idiom detect - --json
//!
//! # Scan a project directory
//! idiom scan ./web/src --jobs 4
//!
//! # Explain one catalog entry with a randomized narrative
//! idiom explain optional-chaining --variety --seed 7
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::io::{self, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use idiom_catalog::{GlyphRegistry, PatternCatalog};
use idiom_core::{Config, Difficulty, Narrative, PatternCategory};
use idiom_detect::{Detector, Match, MatchRecord, ScanReport, StatsSnapshot};
use idiom_narrative::{
    ExplainMode, NarrativeGenerator, RandomSource, RngSource, TemplateStore,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Recognizes source-code idioms and explains them in another language.
#[derive(Parser)]
#[command(name = "idiom", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Path to a JSON configuration file.
    ///
    /// Options missing from the file keep their defaults.
    #[arg(short, long, global = true, env = "IDIOM_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Detect patterns in one file or standard input.
    Detect(DetectArgs),

    /// Detect patterns in every source file under a directory.
    Scan(ScanArgs),

    /// Explain one catalog pattern by id.
    Explain(ExplainArgs),

    /// List catalog patterns.
    List {
        /// Only patterns of this category (e.g. `null_safety`).
        #[arg(long)]
        category: Option<PatternCategory>,

        /// Only patterns of this difficulty.
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Only patterns carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// Show catalog statistics.
    Stats {
        /// Print statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the glyph legend as Markdown.
    Legend,
}

/// Arguments for `idiom detect`.
#[derive(Args)]
struct DetectArgs {
    /// File to read; `-` or nothing reads standard input.
    input: Option<Utf8PathBuf>,

    /// Print matches as JSON.
    #[arg(long)]
    json: bool,

    /// Explain every detected pattern.
    #[arg(short, long)]
    explain: bool,

    /// Prefix each matched snippet with its category glyphs.
    #[arg(short, long)]
    glyphs: bool,

    /// Drop matches below this confidence.
    #[arg(long)]
    min_confidence: Option<f64>,

    #[command(flatten)]
    narrative: NarrativeArgs,
}

/// Arguments for `idiom scan`.
#[derive(Args)]
struct ScanArgs {
    /// Directory to scan. Defaults to the current directory.
    dir: Option<Utf8PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Number of parallel jobs. Defaults to all cores.
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Drop matches below this confidence.
    #[arg(long)]
    min_confidence: Option<f64>,
}

/// Arguments for `idiom explain`.
#[derive(Args)]
struct ExplainArgs {
    /// Pattern id, as shown by `idiom list`.
    id: String,

    #[command(flatten)]
    narrative: NarrativeArgs,
}

/// Narrative options shared by `detect` and `explain`.
#[derive(Args)]
struct NarrativeArgs {
    /// Output format: `plain`, `html` or `markdown`.
    #[arg(short, long)]
    format: Option<String>,

    /// Draw a randomized narrative from the category templates.
    #[arg(long)]
    variety: bool,

    /// Seed for randomized output.
    #[arg(long)]
    seed: Option<u64>,

    /// Language the explanations point towards.
    #[arg(long)]
    target: Option<String>,
}

impl NarrativeArgs {
    /// Overlays these flags on the narrative configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(format) = &self.format {
            config.narrative.default_format.clone_from(format);
        }
        if let Some(target) = &self.target {
            config.narrative.target_language.clone_from(target);
        }
        config.narrative.variety_mode |= self.variety;
    }
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `warn` level by default. Logs go
/// to stderr so that stdout stays parseable.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Loads the configuration file, or the defaults when none is given.
fn load_config(path: Option<&Utf8Path>) -> color_eyre::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let config = Config::load(path)
        .wrap_err_with(|| format!("Failed to load configuration from {path}"))?;
    info!(path = %path, "Loaded configuration");
    Ok(config)
}

/// Sizes the global rayon pool used by directory scans.
fn configure_thread_pool(jobs: Option<usize>) -> color_eyre::Result<()> {
    if let Some(jobs) = jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .wrap_err("Failed to configure thread pool")?;
        debug!(jobs, "Configured thread pool");
    }
    Ok(())
}

/// Returns a seeded source when a seed is given, else a thread-local one.
fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(RngSource::seeded(seed)),
        None => Box::new(RngSource::thread()),
    }
}

/// Loaded catalog data shared by every command.
struct Engine {
    config: Config,
    glyphs: GlyphRegistry,
    catalog: PatternCatalog,
    templates: TemplateStore,
}

impl Engine {
    /// Validates `config` and loads the built-in glyphs, patterns and
    /// templates, filling the templates in for the configured target
    /// language.
    fn load(config: Config) -> color_eyre::Result<Self> {
        config.validate().wrap_err("Invalid configuration")?;

        let glyphs = GlyphRegistry::builtin().wrap_err("Failed to load glyph registry")?;
        let catalog =
            PatternCatalog::builtin(&glyphs).wrap_err("Failed to load pattern catalog")?;
        let templates = TemplateStore::builtin()
            .wrap_err("Failed to load narrative templates")?
            .with_target_language(&config.narrative.target_language);
        debug!(
            glyphs = glyphs.all_glyphs().len(),
            patterns = catalog.count(),
            "Catalog loaded"
        );

        Ok(Self {
            config,
            glyphs,
            catalog,
            templates,
        })
    }

    fn detector(&self) -> Detector<'_> {
        Detector::new(&self.catalog, &self.config.detect)
    }

    fn generator(&self) -> NarrativeGenerator<'_> {
        NarrativeGenerator::from_config(&self.templates, &self.config.narrative)
    }

    fn explain_mode(&self) -> ExplainMode {
        ExplainMode::from_variety(self.config.narrative.variety_mode)
    }

    fn format_selector(&self) -> &str {
        &self.config.narrative.default_format
    }
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Detects patterns in a file or stdin and prints them.
fn run_detect(engine: &Engine, args: &DetectArgs) -> color_eyre::Result<()> {
    let source = read_source(args.input.as_deref())?;
    let detector = engine.detector();
    let matches = detector.detect(&source);
    info!(
        matches = matches.len(),
        rules = detector.rule_count(),
        "Detection complete"
    );

    let generator = engine.generator();
    let mode = engine.explain_mode();
    let mut rng = random_source(args.narrative.seed);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.json {
        #[derive(Serialize)]
        struct Detected {
            #[serde(flatten)]
            record: MatchRecord,
            #[serde(skip_serializing_if = "Option::is_none")]
            narrative: Option<Narrative>,
        }

        let detected: Vec<Detected> = matches
            .iter()
            .map(|m| Detected {
                record: m.to_record(),
                narrative: args
                    .explain
                    .then(|| generator.explain(m.pattern, mode, rng.as_mut())),
            })
            .collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&detected)?)?;
        return Ok(());
    }

    if matches.is_empty() {
        writeln!(out, "No patterns detected.")?;
        return Ok(());
    }

    writeln!(out, "Detected {} pattern(s):", matches.len())?;
    for m in &matches {
        writeln!(out)?;
        write_match(&mut out, m)?;

        if args.glyphs {
            writeln!(
                out,
                "{}",
                GlyphRegistry::annotate(&m.matched_text, m.pattern.glyphs.as_slice())
            )?;
        }

        if args.explain {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                generator.success_message(&m.pattern.name, rng.as_mut())
            )?;
            writeln!(out)?;
            let narrative = generator.explain(m.pattern, mode, rng.as_mut());
            write!(
                out,
                "{}",
                idiom_narrative::format(&narrative, engine.format_selector())
            )?;
            if let Some(suggestion) = m.suggested_transformation {
                writeln!(out)?;
                writeln!(out, "Suggested rewrite:")?;
                writeln!(out, "{suggestion}")?;
            }
        }
    }

    Ok(())
}

/// Scans a directory and prints per-file matches and a summary.
fn run_scan(engine: &Engine, args: &ScanArgs) -> color_eyre::Result<()> {
    let root = args.dir.clone().unwrap_or_else(|| Utf8PathBuf::from("."));
    configure_thread_pool(engine.config.scan.max_parallel_jobs)?;

    let detector = engine.detector();
    let report = idiom_detect::scan(&root, &detector, &engine.config.scan)?;

    if args.json {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{}", generate_json_report(&report)?)?;
        return Ok(());
    }

    print_scan_summary(&report)?;

    // Print any errors encountered
    if !report.errors.is_empty() {
        let stderr = io::stderr();
        let mut handle = stderr.lock();
        writeln!(handle)?;
        writeln!(handle, "Errors ({}):", report.errors.len())?;
        for (path, error) in &report.errors {
            writeln!(handle, "  {path} - {error}")?;
        }
    }

    Ok(())
}

/// Explains one pattern and adds a hint and its related patterns.
fn run_explain(engine: &Engine, args: &ExplainArgs) -> color_eyre::Result<()> {
    let pattern = engine.catalog.get_by_id(&args.id).ok_or_else(|| {
        eyre!(
            "Unknown pattern id '{}'. Run `idiom list` to see the catalog.",
            args.id
        )
    })?;

    let generator = engine.generator();
    let mut rng = random_source(args.narrative.seed);
    let narrative = generator.explain(pattern, engine.explain_mode(), rng.as_mut());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(
        out,
        "{}",
        idiom_narrative::format(&narrative, engine.format_selector())
    )?;
    writeln!(out)?;
    writeln!(out, "{}", generator.hint(pattern, rng.as_mut()))?;

    let related = engine.catalog.related(pattern);
    if !related.is_empty() {
        let ids: Vec<&str> = related.iter().map(|p| p.id.as_str()).collect();
        writeln!(out, "Related: {}", ids.join(", "))?;
    }

    Ok(())
}

/// Lists catalog patterns, optionally filtered.
fn run_list(
    engine: &Engine,
    category: Option<PatternCategory>,
    difficulty: Option<Difficulty>,
    tag: Option<&str>,
) -> color_eyre::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut shown = 0usize;
    for pattern in &engine.catalog {
        if category.is_some_and(|c| c != pattern.category)
            || difficulty.is_some_and(|d| d != pattern.difficulty)
            || tag.is_some_and(|t| !pattern.has_tag(t))
        {
            continue;
        }
        writeln!(
            out,
            "{:<22} {:<26} {:<13} {}",
            pattern.id,
            pattern.category.as_str(),
            pattern.difficulty.as_str(),
            pattern.name
        )?;
        shown += 1;
    }

    if shown == 0 {
        writeln!(out, "No patterns match the given filters.")?;
    }

    Ok(())
}

/// Prints catalog statistics.
fn run_stats(engine: &Engine, json: bool) -> color_eyre::Result<()> {
    let stats = engine.catalog.statistics();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(out, "Pattern Catalog Statistics")?;
    writeln!(out, "==========================")?;
    writeln!(out)?;
    writeln!(out, "Total patterns: {}", stats.total)?;
    writeln!(out)?;
    writeln!(out, "By category:")?;
    for (category, count) in &stats.by_category {
        writeln!(out, "  {:<28} {count}", category.label())?;
    }
    writeln!(out)?;
    writeln!(out, "By difficulty:")?;
    for (difficulty, count) in &stats.by_difficulty {
        writeln!(out, "  {:<28} {count}", difficulty.label())?;
    }

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Reads a file, or standard input for `-` or no path.
fn read_source(input: Option<&Utf8Path>) -> color_eyre::Result<String> {
    match input {
        Some(path) if path.as_str() != "-" => {
            std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {path}"))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .wrap_err("Failed to read standard input")?;
            Ok(source)
        }
    }
}

/// Writes the header and matched text of one match.
fn write_match(out: &mut impl Write, m: &Match<'_>) -> io::Result<()> {
    let lines = if m.span.start_line == m.span.end_line {
        format!("line {}", m.span.start_line)
    } else {
        format!("lines {}-{}", m.span.start_line, m.span.end_line)
    };
    writeln!(
        out,
        "{} [{}] confidence {:.2}, {lines}",
        m.pattern.name, m.pattern.id, m.confidence
    )?;
    writeln!(out, "  {}", m.matched_text)
}

/// Prints the files with matches and the scan summary.
fn print_scan_summary(report: &ScanReport<'_>) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for file in report.files.iter().filter(|f| !f.matches.is_empty()) {
        writeln!(out, "{}", file.path)?;
        for m in &file.matches {
            writeln!(
                out,
                "  {:<22} {:.2}  line {}",
                m.pattern.id, m.confidence, m.span.start_line
            )?;
        }
    }

    let stats = &report.stats;
    writeln!(out)?;
    writeln!(out, "Scan Summary")?;
    writeln!(out, "============")?;
    writeln!(out)?;
    writeln!(out, "Files analyzed:     {}", stats.files)?;
    writeln!(out, "  With matches:     {}", stats.files_with_matches)?;
    writeln!(out, "  Skipped (size):   {}", stats.skipped)?;
    writeln!(out, "  Errors:           {}", stats.errors)?;
    writeln!(out, "Total matches:      {}", stats.matches)?;
    writeln!(out)?;
    writeln!(out, "Hit rate: {:.1}%", stats.hit_rate())?;
    writeln!(out, "Matches per file: {:.2}", stats.matches_per_file())?;

    let mut counts: Vec<(&str, usize)> = report.pattern_counts().into_iter().collect();
    if !counts.is_empty() {
        // Most frequent first; ties stay in id order
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        writeln!(out)?;
        writeln!(out, "Most common patterns:")?;
        for (id, count) in counts.iter().take(10) {
            writeln!(out, "  {id:<22} {count} file(s)")?;
        }
    }

    Ok(())
}

/// Generates a JSON scan report.
fn generate_json_report(report: &ScanReport<'_>) -> color_eyre::Result<String> {
    #[derive(Serialize)]
    struct FileEntry<'a> {
        path: &'a Utf8Path,
        matches: Vec<MatchRecord>,
    }

    #[derive(Serialize)]
    struct ErrorEntry<'a> {
        path: &'a Utf8Path,
        error: String,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Report<'a> {
        stats: &'a StatsSnapshot,
        pattern_counts: BTreeMap<&'a str, usize>,
        files: Vec<FileEntry<'a>>,
        errors: Vec<ErrorEntry<'a>>,
    }

    let report = Report {
        stats: &report.stats,
        pattern_counts: report.pattern_counts(),
        files: report
            .files
            .iter()
            .filter(|f| !f.matches.is_empty())
            .map(|f| FileEntry {
                path: &f.path,
                matches: f.matches.iter().map(MatchRecord::from).collect(),
            })
            .collect(),
        errors: report
            .errors
            .iter()
            .map(|(path, error)| ErrorEntry {
                path,
                error: error.to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| eyre!("Failed to serialize JSON: {}", e))
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Load configuration and overlay command flags
    let mut config = load_config(cli.config.as_deref())?;
    match &cli.command {
        Commands::Detect(args) => {
            args.narrative.apply(&mut config);
            if let Some(min) = args.min_confidence {
                config.detect.min_confidence = min;
            }
        }
        Commands::Scan(args) => {
            if let Some(jobs) = args.jobs {
                config.scan.max_parallel_jobs = Some(jobs);
            }
            if let Some(min) = args.min_confidence {
                config.detect.min_confidence = min;
            }
        }
        Commands::Explain(args) => args.narrative.apply(&mut config),
        Commands::List { .. } | Commands::Stats { .. } | Commands::Legend => {}
    }
    let engine = Engine::load(config)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Detect(args) => run_detect(&engine, args),
        Commands::Scan(args) => run_scan(&engine, args),
        Commands::Explain(args) => run_explain(&engine, args),
        Commands::List {
            category,
            difficulty,
            tag,
        } => run_list(&engine, *category, *difficulty, tag.as_deref()),
        Commands::Stats { json } => run_stats(&engine, *json),
        Commands::Legend => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write!(out, "{}", engine.glyphs.legend())?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("Arguments should parse")
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_detect_flags() {
        let cli = parse(&[
            "idiom", "detect", "-", "--json", "--explain", "--format", "html", "--seed", "3",
        ]);
        let Commands::Detect(args) = cli.command else {
            panic!("Expected detect");
        };
        assert_eq!(args.input.as_deref(), Some(Utf8Path::new("-")));
        assert!(args.json);
        assert!(args.explain);
        assert_eq!(args.narrative.format.as_deref(), Some("html"));
        assert_eq!(args.narrative.seed, Some(3));
    }

    #[test]
    fn test_list_parses_enum_filters() {
        let cli = parse(&[
            "idiom",
            "list",
            "--category",
            "null_safety",
            "--difficulty",
            "beginner",
        ]);
        let Commands::List {
            category,
            difficulty,
            ..
        } = cli.command
        else {
            panic!("Expected list");
        };
        assert_eq!(category, Some(PatternCategory::NullSafety));
        assert_eq!(difficulty, Some(Difficulty::Beginner));
    }

    #[test]
    fn test_list_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["idiom", "list", "--category", "sql"]).is_err());
    }

    #[test]
    fn test_narrative_flags_overlay_config() {
        let cli = parse(&[
            "idiom", "explain", "try-catch", "--variety", "--target", "Haskell", "-f", "plain",
        ]);
        let Commands::Explain(args) = cli.command else {
            panic!("Expected explain");
        };

        let mut config = Config::default();
        args.narrative.apply(&mut config);
        assert!(config.narrative.variety_mode);
        assert_eq!(config.narrative.target_language, "Haskell");
        assert_eq!(config.narrative.default_format, "plain");
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = parse(&["idiom", "explain", "try-catch"]);
        let Commands::Explain(args) = cli.command else {
            panic!("Expected explain");
        };

        let mut config = Config::default();
        config.narrative.variety_mode = true;
        args.narrative.apply(&mut config);
        assert!(config.narrative.variety_mode);
        assert_eq!(config, {
            let mut expected = Config::default();
            expected.narrative.variety_mode = true;
            expected
        });
    }

    #[test]
    fn test_write_match_layout() {
        let glyphs = GlyphRegistry::builtin().expect("Glyphs should load");
        let catalog = PatternCatalog::builtin(&glyphs).expect("Catalog should load");
        let detector = Detector::new(&catalog, &idiom_core::DetectConfig::default());
        let matches = detector.detect("if (user !== null) {\n  greet(user);\n}");

        let mut buf = Vec::new();
        write_match(&mut buf, &matches[0]).expect("Write to Vec should succeed");
        let text = String::from_utf8(buf).expect("Output is UTF-8");
        assert_eq!(
            text,
            "Explicit Null Check [null-check-basic] confidence 0.90, line 1\n  !== null\n"
        );
    }

    #[test]
    fn test_engine_templates_name_target_language() {
        let mut config = Config::default();
        config.narrative.target_language = "Haskell".to_owned();
        let engine = Engine::load(config).expect("Engine should load");

        for category in PatternCategory::ALL {
            let bundle = engine.templates.resolve(category);
            for sentence in bundle.celebrate.iter().chain(&bundle.minimize) {
                assert!(!sentence.contains(idiom_narrative::TARGET_PLACEHOLDER));
            }
        }
        assert!(
            engine
                .templates
                .default_bundle()
                .minimize
                .iter()
                .any(|s| s.contains("Haskell"))
        );
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut config = Config::default();
        config.detect.min_confidence = 2.0;
        assert!(Engine::load(config).is_err());
    }
}
