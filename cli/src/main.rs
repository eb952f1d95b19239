use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use clap::ArgAction::{Set, SetTrue};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use alu::{ArithmeticUnit, DisplaySettings};
use base::prelude::*;
use statefile::{
    read_state_file, write_state_file, CodecError, Header, StateFile, StepArgument,
    VariableValue,
};

/// Tools for calculator numbers and saved calculator state
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the contents of a state file.
    Dump {
        #[clap(action = Set)]
        file: PathBuf,

        /// Print JSON instead of a listing.
        #[clap(action = SetTrue, long)]
        json: bool,

        /// Precision to which the numbers in the file are converted.
        #[clap(long, value_enum, default_value_t = Precision::Hp42s)]
        precision: Precision,
    },
    /// Rewrite a state file of any version in the current format.
    Upgrade {
        #[clap(action = Set)]
        input: PathBuf,

        #[clap(action = Set)]
        output: PathBuf,
    },
    /// Show a number as the calculator would display it.
    Show {
        #[clap(action = Set, allow_hyphen_values = true)]
        number: String,

        #[clap(long, value_enum, default_value_t = Mode::Fix)]
        mode: Mode,

        /// Number of digits for FIX, SCI or ENG.
        #[clap(long, default_value_t = 4)]
        digits: usize,

        #[clap(long, value_enum, default_value_t = Precision::Hp42s)]
        precision: Precision,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Precision {
    Hp42s,
    Extended,
}

impl Precision {
    fn mode(self) -> PrecisionMode {
        match self {
            Precision::Hp42s => PrecisionMode::HP42S,
            Precision::Extended => PrecisionMode::EXTENDED,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Fix,
    Sci,
    Eng,
    All,
}

impl Mode {
    fn settings(self, digits: usize) -> DisplaySettings {
        match self {
            Mode::Fix => DisplaySettings::fixed(digits),
            Mode::Sci => DisplaySettings::scientific(digits),
            Mode::Eng => DisplaySettings::engineering(digits),
            Mode::All => DisplaySettings::all(),
        }
    }
}

#[derive(Debug)]
enum Fail {
    Codec(CodecError),
    Io(std::io::Error),
    BadNumber(String),
    Json(serde_json::Error),
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Codec(e) => e.fmt(f),
            Fail::Io(e) => e.fmt(f),
            Fail::BadNumber(text) => write!(f, "{text:?} is not a number"),
            Fail::Json(e) => e.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

impl From<CodecError> for Fail {
    fn from(e: CodecError) -> Fail {
        Fail::Codec(e)
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    version: u32,
    state: &'a StateFile,
}

fn list_state(version: u32, state: &StateFile, unit: &ArithmeticUnit) {
    let all = DisplaySettings::all();
    let show = |x: &Decimal| unit.format(x, &all);
    println!("version {version}");
    let o = &state.options;
    println!(
        "options: singular matrix {}, matrix out of range {}, deferred print {}, raw text {}",
        o.singular_matrix, o.matrix_out_of_range, o.deferred_print, o.raw_text
    );
    if state.getkey.pending {
        println!("GETKEY pending (key {})", state.getkey.key);
    }
    let stack = &state.stack;
    for (name, x) in [
        ("T", &stack.t),
        ("Z", &stack.z),
        ("Y", &stack.y),
        ("X", &stack.x),
        ("LASTX", &stack.lastx),
    ] {
        println!("{name:>5}: {}", show(x));
    }
    for (i, x) in state.registers.iter().enumerate() {
        println!("R{i:02}: {}", show(x));
    }
    for variable in &state.variables {
        match variable.value {
            VariableValue::Real(x) => println!("{}: {}", variable.name, show(&x)),
            VariableValue::Matrix(index) => match state.matrices.get(index) {
                Some(m) => println!("{}: [ {}x{} Matrix ]", variable.name, m.rows, m.columns),
                None => println!("{}: [ missing matrix {index} ]", variable.name),
            },
        }
    }
    for (n, program) in state.programs.iter().enumerate() {
        println!("program {n}:");
        for (i, step) in program.steps.iter().enumerate() {
            let argument = match &step.argument {
                StepArgument::None => String::new(),
                StepArgument::Number(x) => show(x),
                StepArgument::Register(r) => format!("{r:02}"),
                StepArgument::Label(text) => format!("\"{text}\""),
            };
            println!("{:02} {:04} {argument}", i + 1, step.command);
        }
    }
    for key in &state.key_assignments {
        println!("key {}: command {}", key.slot, key.command);
    }
}

fn dump(file: &Path, json: bool, precision: Precision) -> Result<(), Fail> {
    let bytes = fs::read(file).map_err(Fail::Io)?;
    let mode = precision.mode();
    let header = Header::decode(&bytes)?;
    let state = StateFile::decode(&bytes, &mode)?;
    if json {
        let dump = Dump {
            version: header.version,
            state: &state,
        };
        let text = serde_json::to_string_pretty(&dump).map_err(Fail::Json)?;
        println!("{text}");
    } else {
        list_state(header.version, &state, &ArithmeticUnit::new(mode));
    }
    Ok(())
}

fn upgrade(input: &Path, output: &Path) -> Result<(), Fail> {
    // The extended mode holds every number a file of either precision
    // can contain.
    let state = read_state_file(input, &PrecisionMode::EXTENDED)?;
    write_state_file(output, &state)?;
    event!(
        Level::INFO,
        "wrote {} in version {} format",
        output.display(),
        statefile::CURRENT_VERSION
    );
    Ok(())
}

fn show(number: &str, mode: Mode, digits: usize, precision: Precision) -> Result<(), Fail> {
    let unit = ArithmeticUnit::new(precision.mode());
    let parsed = unit.parse(number);
    if parsed.signal == Signal::InvalidOperation {
        return Err(Fail::BadNumber(number.to_string()));
    }
    if !parsed.signal.is_none() {
        event!(Level::WARN, "{}", parsed.signal);
    }
    println!("{}", unit.format(&parsed.value, &mode.settings(digits)));
    Ok(())
}

fn run_tool() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.2.19/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    match &cli.command {
        Command::Dump {
            file,
            json,
            precision,
        } => {
            let span = span!(Level::ERROR, "dump", file=?file);
            let _enter = span.enter();
            dump(file, *json, *precision)
        }
        Command::Upgrade { input, output } => {
            let span = span!(Level::ERROR, "upgrade", input=?input, output=?output);
            let _enter = span.enter();
            upgrade(input, output)
        }
        Command::Show {
            number,
            mode,
            digits,
            precision,
        } => show(number, *mode, *digits, *precision),
    }
}

fn main() {
    match run_tool() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
