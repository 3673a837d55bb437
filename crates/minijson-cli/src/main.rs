use clap::Parser;
use minijson_parser::Value;
use std::fs::File;
use std::io::{self, BufReader, Read};

/// Exit status for malformed input or a failed selection (sysexits `EX_USAGE`).
const EXIT_USAGE: i32 = 64;

#[derive(Parser)]
#[command(name = "minijson")]
#[command(about = "Parse a JSON document and print one field of one array element")]
#[command(version)]
struct Cli {
    /// Input JSON file (reads standard input when omitted)
    path: Option<String>,

    /// Element of the top-level array to select
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// String field to print from the selected element
    #[arg(long, default_value = "_id")]
    field: String,
}

fn main() {
    let cli = Cli::parse();

    let input = match open_input(cli.path.as_deref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_USAGE);
        }
    };

    let doc = match minijson_parser::parse(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Parse error: {e}");
            std::process::exit(EXIT_USAGE);
        }
    };

    match select(&doc, cli.index, &cli.field) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Selection error: {e}");
            std::process::exit(EXIT_USAGE);
        }
    }
}

/// The file at `path`, or standard input when no path is given.
fn open_input(path: Option<&str>) -> Result<Box<dyn Read>, String> {
    match path {
        Some(path) => match File::open(path) {
            Ok(file) => Ok(Box::new(BufReader::new(file))),
            Err(e) => Err(format!("Error reading {path}: {e}")),
        },
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Pick `doc[index][field]` and require it to be a string.
fn select<'a>(doc: &'a Value, index: usize, field: &str) -> Result<&'a str, String> {
    let items = doc
        .as_array()
        .ok_or_else(|| format!("top-level value is {}, not an array", doc.kind_name()))?;
    let element = items
        .get(index)
        .ok_or_else(|| format!("index {index} out of range ({} elements)", items.len()))?;
    let value = element
        .get(field)
        .ok_or_else(|| format!("element {index} has no field '{field}'"))?;
    value
        .as_str()
        .ok_or_else(|| format!("field '{field}' is {}, not a string", value.kind_name()))
}
