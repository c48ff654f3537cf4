use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use llmd::header::TemplateItem;
use worksheet::{ExpandError, Quantities};

#[derive(Parser)]
#[command(name = "llmd", version, about = "LLM-MD template worksheet tool")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a template into a fillable worksheet
    Expand(ExpandArgs),

    /// Parse a template and report grammar errors
    Check(CheckArgs),

    /// List the section titles of a worksheet
    Sections(FileArgs),

    /// Print the parsed fields of one worksheet section
    Fields(SectionArgs),

    /// Print the raw content of one worksheet section
    Content(SectionArgs),
}

#[derive(clap::Args)]
struct ExpandArgs {
    /// Template file
    file: String,

    /// Generate only this worksheet section (without its wrapper)
    #[arg(short, long)]
    section: Option<String>,

    /// Quantity override as `Dotted.Path=N`; repeatable
    #[arg(short, long = "quantity", value_name = "PATH=N")]
    quantity: Vec<String>,

    /// TOML file of quantity overrides (`"Dotted.Path" = N` per line)
    #[arg(long, value_name = "FILE")]
    quantities: Option<String>,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Template file
    file: String,

    /// Dump the parsed template structure
    #[arg(long)]
    ast: bool,

    /// Print the template outline (sections and headers)
    #[arg(long)]
    outline: bool,
}

#[derive(clap::Args)]
struct FileArgs {
    /// Worksheet file
    file: String,
}

#[derive(clap::Args)]
struct SectionArgs {
    /// Worksheet file
    file: String,

    /// Section title
    section: String,

    /// Emit the full parsed section as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Expand(args) => do_expand(args, cli.no_color),
        Command::Check(args) => do_check(args, cli.no_color),
        Command::Sections(args) => {
            let text = read_source(&args.file);
            for title in worksheet::parse_worksheet(&text).keys() {
                println!("{}", title);
            }
        }
        Command::Fields(args) => {
            let text = read_source(&args.file);
            if args.json {
                print_section_json(&text, &args.section);
            } else {
                for (name, value) in worksheet::get_section_fields(&text, &args.section) {
                    println!("{}: {}", name, value);
                }
            }
        }
        Command::Content(args) => {
            let text = read_source(&args.file);
            if args.json {
                print_section_json(&text, &args.section);
            } else {
                println!("{}", worksheet::get_section_content(&text, &args.section));
            }
        }
    }
}

fn do_expand(args: ExpandArgs, no_color: bool) {
    let source = read_source(&args.file);

    let mut quantities = match &args.quantities {
        Some(path) => {
            let text = read_source(path);
            match toml::from_str::<Quantities>(&text) {
                Ok(q) => q,
                Err(e) => {
                    eprintln!("error: invalid quantities file '{}': {}", path, e);
                    process::exit(1);
                }
            }
        }
        None => Quantities::new(),
    };
    // Command-line overrides win over the file.
    for pair in &args.quantity {
        let Some((path, count)) = pair.split_once('=') else {
            eprintln!("error: invalid quantity '{}', expected PATH=N", pair);
            process::exit(1);
        };
        let Ok(count) = count.trim().parse::<usize>() else {
            eprintln!("error: invalid quantity count in '{}'", pair);
            process::exit(1);
        };
        quantities.insert(path.trim().to_string(), count);
    }

    let mut files = SimpleFiles::new();
    files.add(args.file.clone(), source.clone());

    match worksheet::expand(&source, args.section.as_deref(), &quantities) {
        Ok(output) => println!("{}", output),
        Err(ExpandError::Format(errors)) => {
            emit_parse_errors(&errors, &files, no_color);
            process::exit(1);
        }
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

fn do_check(args: CheckArgs, no_color: bool) {
    let source = read_source(&args.file);

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let template = match llmd::parser::Parser::new(source, file_id).parse() {
        Ok(t) => t,
        Err(errors) => {
            emit_parse_errors(&errors, &files, no_color);
            process::exit(1);
        }
    };

    if args.ast {
        println!("{:#?}", template);
        return;
    }

    if args.outline {
        for item in &template.items {
            match item {
                TemplateItem::Section(section) => {
                    println!("- {}", section.name);
                    for record in &section.content {
                        println!("  {} {}", "#".repeat(record.level), record.name);
                    }
                }
                TemplateItem::Header(record) => {
                    println!("{} {}", "#".repeat(record.level), record.name);
                }
            }
        }
        return;
    }

    eprintln!("ok: {} parsed successfully", args.file);
}

fn read_source(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path, e);
            process::exit(1);
        }
    }
}

fn print_section_json(text: &str, section: &str) {
    let parsed = worksheet::parse_worksheet_section(text, section);
    match serde_json::to_string_pretty(&parsed) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: cannot serialize section: {}", e);
            process::exit(1);
        }
    }
}

fn emit_parse_errors(
    errors: &[llmd::parser::ParseError],
    files: &SimpleFiles<String, String>,
    no_color: bool,
) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for error in errors {
        let diagnostic = error.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}
