use crate::candidate::InputFormat;
use crate::file_reader::InputSource;
use crate::output::OutputFormat;

pub struct CliArgs {
    pub input: InputSource,
    pub input_format: InputFormat,
    /// `--name`/`--type` pair that bypasses candidate input.
    pub single: Option<(String, String)>,
    /// Raw verbosity setting; see `SnippetMode::from_setting`.
    pub mode: String,
    pub prefix: String,
    pub filter: Option<String>,
    pub is_regex: bool,
    pub output_format: OutputFormat,
    pub out: Option<String>,
    pub timeout: Option<u64>,
    pub verbose: bool,
}

pub enum CliAction {
    Run(CliArgs),
    Help,
    Version,
}

pub fn parse_args(args: &[String]) -> Result<CliAction, String> {
    let mut input: Option<String> = None;
    let mut input_format = InputFormat::Json;
    let mut name: Option<String> = None;
    let mut type_text: Option<String> = None;
    let mut mode = String::from("nameAndType");
    let mut prefix = String::new();
    let mut filter: Option<String> = None;
    let mut is_regex = false;
    let mut output_format = OutputFormat::Yaml;
    let mut out: Option<String> = None;
    let mut timeout: Option<u64> = None;
    let mut verbose = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --input".into()); }
                input = Some(args[i].clone());
            }
            "--name" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --name".into()); }
                name = Some(args[i].clone());
            }
            "--type" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --type".into()); }
                type_text = Some(args[i].clone());
            }
            "--mode" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --mode".into()); }
                mode = args[i].clone();
            }
            "--prefix" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --prefix".into()); }
                prefix = args[i].clone();
            }
            "--f" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --f".into()); }
                filter = Some(args[i].clone());
            }
            "--out" | "-o" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --out".into()); }
                out = Some(args[i].clone());
            }
            "--timeout" => {
                i += 1;
                if i >= args.len() { return Err("Missing value for --timeout".into()); }
                timeout = Some(args[i].parse::<u64>()
                    .map_err(|_| format!("Invalid integer for --timeout: {}", args[i]))?);
            }
            "--csv" => input_format = InputFormat::Csv,
            "--regex" => is_regex = true,
            "--json" => output_format = OutputFormat::Json,
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" | "-?" => return Ok(CliAction::Help),
            "--version" | "-V" => return Ok(CliAction::Version),
            other => return Err(format!("Unknown option: {}\nRun 'gosig --help' for usage information.", other)),
        }
        i += 1;
    }

    let single = match (name, type_text) {
        (Some(n), Some(t)) => Some((n, t)),
        (None, None) => None,
        (Some(_), None) => return Err("--name requires --type".into()),
        (None, Some(_)) => return Err("--type requires --name".into()),
    };

    if single.is_some() && input.is_some() {
        return Err("--input and --name/--type are mutually exclusive and cannot be combined.".into());
    }

    if is_regex && filter.is_none() {
        return Err("--regex requires --f".into());
    }

    Ok(CliAction::Run(CliArgs {
        input: InputSource::from_arg(input.as_deref().unwrap_or("-")),
        input_format,
        single,
        mode,
        prefix,
        filter,
        is_regex,
        output_format,
        out,
        timeout,
        verbose,
    }))
}

pub fn print_help() {
    print!(
r#"gosig — completion snippets from gocode candidates

Usage:
  gosig [options]

Modes:
  (default)               Read gocode candidates and emit suggestions
  --name <n> --type <t>   Build the suggestion for a single function signature

Options:
  --input, -i <path>      Candidate file, '-' for stdin (default: stdin)
  --csv                   Input uses gocode's csv format (default: json)
  --mode <mode>           Placeholder verbosity: none, name, nameAndType
                          (default: nameAndType; unknown values act as none)
  --prefix <text>         Keep candidates starting with <text> (case-insensitive)
  --f <pattern>           Keep candidates whose name contains a term (use | for OR)
  --regex                 Treat --f pattern as a regular expression
  --json                  Emit JSON instead of YAML
  --out, -o <path>        Write output to a file instead of stdout
  --timeout <secs>        Max execution time in seconds
  --verbose, -v           Debug logging on stderr (RUST_LOG overrides)
  --help, -h              Show this help
  --version, -V           Show version

Examples:
  gocode -f=json autocomplete main.go 120 | gosig --prefix P
  gosig -i candidates.csv --csv --mode name
  gosig --name Walk --type "func(root string, fn func(path string) error) error"
  gosig -i candidates.json --f "print|scan" --json
"#);
}
