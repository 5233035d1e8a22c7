use lexrule::{Config, Model};
use std::io::{self, Read};

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let model = match Model::train(Config::default(), &cli.rule_dir) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("error: failed to train rules from {}: {err}", cli.rule_dir);
            std::process::exit(1);
        }
    };

    let input = match cli.input {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            if let Err(err) = io::stdin().read_to_string(&mut buf) {
                eprintln!("error: failed to read stdin: {err}");
                std::process::exit(1);
            }
            buf
        }
    };

    let display_config = Config::default();
    let tokenized = match lexrule::TokenizedText::build(&input, &display_config, &lexrule::ZhTokenizer) {
        Ok(t) => t,
        Err(err) => {
            eprintln!("error: failed to tokenize input: {err}");
            std::process::exit(1);
        }
    };

    match model.match_text(&input, None) {
        Ok(results) => {
            let mut names: Vec<&String> = results.keys().collect();
            names.sort();
            for name in names {
                let matches = &results[name];
                for m in matches.iter() {
                    let surface = m.text(&tokenized, &display_config).unwrap_or_default();
                    println!("{name}\t{surface}");
                }
            }
        }
        Err(err) => {
            eprintln!("error: match failed: {err}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    rule_dir: String,
    input: Option<String>,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut rule_dir: Option<String> = None;
    let mut input: Option<String> = None;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("lexrule {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a directory".to_string())?;
                rule_dir = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--rules=") => {
                rule_dir = Some(arg.trim_start_matches("--rules=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                input = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown flag '{arg}'"));
            }
            other => {
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(other.to_string());
            }
        }
    }

    let rule_dir = rule_dir.ok_or_else(|| "error: --rules <dir> is required".to_string())?;
    Ok(CliConfig { rule_dir, input })
}

fn print_help() {
    println!(
        "lexrule - match lexical concepts against text\n\n\
         USAGE:\n    lexrule --rules <dir> [--input <text>]\n\n\
         OPTIONS:\n    \
         --rules <dir>      directory of .cpt rule files to train on\n    \
         --input, -i <text> text to match (reads stdin if omitted)\n    \
         -V, --version      print version\n    \
         -h, --help         print this help"
    );
}
