/// Story Check — scores a story against its vocabulary list.
///
/// Usage: story_check --text <file.txt> --vocab <w1,w2,...> [--config <quality.ron>]
///        story_check --generate --vocab <w1,w2,...> [--difficulty <1-5>] [--type <name>] [--seed <n>]
///
/// Exit status: 0 accepted, 2 rejected, 1 usage or IO error.
use lexiloop::core::config::QualityConfig;
use lexiloop::core::generator::TemplateGenerator;
use lexiloop::core::pipeline::{PipelineError, StoryPipeline};
use lexiloop::core::validator::ContentValidator;
use lexiloop::schema::score::ScoreBreakdown;
use lexiloop::schema::story::{Difficulty, StoryRequest, StoryType, DEFAULT_MAX_LENGTH};
use std::path::Path;
use std::process;
use std::sync::Arc;

const USAGE: &str = "Usage: story_check --text <file.txt> --vocab <w1,w2,...> [--config <quality.ron>]\n       \
                     story_check --generate --vocab <w1,w2,...> [--difficulty <1-5>] [--type <name>] [--seed <n>]";

/// Parsed command line.
#[derive(Debug, Default)]
struct Options {
    text_path: Option<String>,
    vocab: Option<String>,
    config_path: Option<String>,
    generate: bool,
    difficulty: Option<u8>,
    story_type: StoryType,
    seed: Option<u64>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--text" if i + 1 < args.len() => {
                i += 1;
                opts.text_path = Some(args[i].clone());
            }
            "--vocab" if i + 1 < args.len() => {
                i += 1;
                opts.vocab = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                opts.config_path = Some(args[i].clone());
            }
            "--difficulty" if i + 1 < args.len() => {
                i += 1;
                let level = args[i]
                    .parse()
                    .map_err(|_| "--difficulty must be a number from 1 to 5".to_string())?;
                opts.difficulty = Some(level);
            }
            "--type" if i + 1 < args.len() => {
                i += 1;
                opts.story_type = StoryType::parse(&args[i]);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                let seed = args[i]
                    .parse()
                    .map_err(|_| "--seed must be a non-negative integer".to_string())?;
                opts.seed = Some(seed);
            }
            "--generate" => opts.generate = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(opts)
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let opts = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("{}", USAGE);
        process::exit(1);
    });
    if opts.help {
        println!("{}", USAGE);
        process::exit(0);
    }

    let vocabulary: Vec<String> = opts
        .vocab
        .unwrap_or_else(|| {
            eprintln!("Error: --vocab is required");
            eprintln!("{}", USAGE);
            process::exit(1);
        })
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    let config = match opts.config_path {
        Some(ref path) => QualityConfig::load_from_ron(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading config '{}': {}", path, e);
            process::exit(1);
        }),
        None => QualityConfig::default(),
    };

    let text = if opts.generate {
        generate_story(
            config.clone(),
            vocabulary.clone(),
            opts.difficulty.unwrap_or(1),
            opts.story_type,
            opts.seed.unwrap_or(42),
        )
    } else {
        let path = opts.text_path.unwrap_or_else(|| {
            eprintln!("Error: --text or --generate is required");
            eprintln!("{}", USAGE);
            process::exit(1);
        });
        std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("Error reading text file '{}': {}", path, e);
            process::exit(1);
        })
    };

    let breakdown = ContentValidator::new(config).score(&text, &vocabulary);
    print_report(&breakdown);

    process::exit(if breakdown.is_valid { 0 } else { 2 });
}

fn generate_story(
    config: QualityConfig,
    vocabulary: Vec<String>,
    difficulty: u8,
    story_type: StoryType,
    seed: u64,
) -> String {
    let pipeline = StoryPipeline::builder()
        .with_quality_config(config)
        .with_generator(Arc::new(TemplateGenerator::new(seed)))
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error building pipeline: {}", e);
            process::exit(1);
        });

    let request = StoryRequest {
        vocabulary,
        difficulty: Difficulty(difficulty),
        story_type,
        max_length: DEFAULT_MAX_LENGTH,
    };

    match pipeline.generate(&request) {
        Ok(response) => {
            println!("{}\n", response.story.content);
            response.story.content
        }
        Err(PipelineError::QualityInsufficient { score, attempts }) => {
            eprintln!(
                "Rejected: best score {:.2} after {} attempts",
                score, attempts
            );
            process::exit(2);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn print_report(breakdown: &ScoreBreakdown) {
    println!("=== Story Quality Report ===\n");
    println!("Vocabulary coverage: {:.2}", breakdown.vocabulary_coverage);
    println!("Readability:         {:.2}", breakdown.readability);
    println!("Coherence:           {:.2}", breakdown.coherence);
    println!("Grammar:             {:.2}", breakdown.grammar);
    println!("Composite:           {:.2}", breakdown.composite);

    if breakdown.issues.is_empty() {
        println!("\nNo issues found.");
    } else {
        println!();
        for issue in &breakdown.issues {
            println!("ISSUE: {}", issue);
        }
    }

    println!(
        "\nResult: {}",
        if breakdown.is_valid { "ACCEPTED" } else { "REJECTED" }
    );
}
