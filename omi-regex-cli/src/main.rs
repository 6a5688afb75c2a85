use clap::{Parser, Subcommand};
use colored::Colorize;
use log::debug;
use omi_regex::{
    BROKEN_MARKER, ConstraintValue, DEFAULT_MAX_DEPTH, TranslateOptions, Translator, classify,
};

#[derive(Parser)]
#[command(name = "omi-regex")]
#[command(about = "Translate OMi action-group patterns into regular expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an action-group pattern to a regex
    Convert {
        /// The pattern to convert
        pattern: String,
        /// Show the parsed AST and the output of every stage
        #[arg(short, long)]
        debug: bool,
        /// Do not pad unanchored patterns with `.*`
        #[arg(long)]
        no_wrap: bool,
        /// Maximum bracket nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Classify varbind constraint values and print their event-config form
    Classify {
        /// The raw constraint values
        #[arg(required = true)]
        values: Vec<String>,
    },
    /// Test a pattern against an input value
    Test {
        /// The action-group pattern
        pattern: String,
        /// The value to match against
        input: String,
        /// Show captured variables
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            pattern,
            debug,
            no_wrap,
            max_depth,
        } => {
            let options = TranslateOptions::default()
                .with_wrap_unanchored(!no_wrap)
                .with_max_depth(max_depth);
            cmd_convert(&Translator::new(options), &pattern, debug)
        }
        Commands::Classify { values } => cmd_classify(&values),
        Commands::Test {
            pattern,
            input,
            verbose,
        } => cmd_test(&pattern, &input, verbose),
    }
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), err);
    std::process::exit(1);
}

fn cmd_convert(translator: &Translator, pattern: &str, debug: bool) {
    debug!("Converting with {:?}", translator.options());
    println!("{}", "Converting pattern...".bold());
    println!("  Input:  {}", pattern.cyan());
    println!();

    if debug {
        match translator.translate_debug(pattern) {
            Ok(report) => println!("{}", report),
            Err(e) => fail(e),
        }
    } else {
        match translator.translate(pattern) {
            Ok(regex) => {
                println!("{}", "Output:".bold());
                println!("  {}", regex.green());
            }
            Err(e) => fail(e),
        }
    }
}

fn cmd_classify(values: &[String]) {
    let translator = Translator::default();

    for value in values {
        let classified = classify(value);
        let kind = match &classified {
            ConstraintValue::Literal(_) => "literal",
            ConstraintValue::AnchoredInteger(_) => "integer",
            ConstraintValue::Pattern(_) => "pattern",
        };
        let rendered = classified.to_varbind_value_with(&translator);
        debug!("Classified '{}' as {} `{}`", value, kind, classified.as_str());

        let rendered = if rendered.starts_with(BROKEN_MARKER) {
            rendered.red()
        } else {
            rendered.green()
        };
        println!("  {:<8} {} => {}", kind, value.cyan(), rendered);
    }
}

fn cmd_test(pattern: &str, input: &str, verbose: bool) {
    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    let compiled = match omi_regex::compile(pattern) {
        Ok(c) => c,
        Err(e) => fail(e),
    };
    println!("  Regex:   {}", compiled.as_str());

    match compiled.named_captures(input) {
        Ok(Some(captures)) => {
            println!("{}", "✓ Match found!".green().bold());

            if verbose && !captures.is_empty() {
                println!();
                println!("{}", "Captured variables:".bold());
                for (name, value) in &captures {
                    println!("  {} = {}", name, value.green());
                }
            }
        }
        Ok(None) => {
            println!("{}", "✗ No match".red());
            std::process::exit(1);
        }
        Err(e) => fail(e),
    }
}
