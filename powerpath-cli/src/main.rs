use std::{env, io, path};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;

#[derive(Parser)]
#[command(version, about, long_about = None, subcommand_required = true)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Classify the input, system and battery paths of a status snapshot
    Classify {
        /// JSON file holding one page of register values
        #[arg(long, required = true)]
        snapshot: String,
        /// JSON file holding the global status fields, merged over the page
        #[arg(long)]
        global: Option<String>,
        /// Rail voltage in mV below which a rail counts as unpowered
        #[arg(long)]
        noise_floor: Option<f64>,
    },
    /// Decode a raw register value for display
    #[command(allow_negative_numbers = true)]
    Decode { register: String, value: f64 },
    /// Show what is known about a register
    Describe { register: String },
    /// Check whether a register may be written in the state captured by a snapshot
    #[command(allow_negative_numbers = true)]
    CanWrite {
        register: String,
        #[arg(long, required = true)]
        snapshot: String,
        /// Also validate this value against the register's range or options
        #[arg(long)]
        value: Option<f64>,
    },
    /// Explain interrupt event codes
    Explain {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Decode the six interrupt flag registers and explain every raised event
    Flags {
        /// Flag register values FLAG0..FLAG5, hex accepted
        #[arg(num_args = 6, required_unless_present = "read_failed", value_parser = clap_num::maybe_hex::<u8>)]
        bytes: Vec<u8>,
        /// The flag registers could not be read
        #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "bytes")]
        read_failed: bool,
    },
    /// Replay charge status change timestamps through the toggle monitor
    Toggles {
        /// Millisecond timestamps, oldest first
        #[arg(required = true)]
        stamps: Vec<u64>,
    },
    /// List all registers in the built-in catalog
    LsRegisters {
        /// Only list register names
        #[arg(long, action = clap::ArgAction::SetTrue)]
        names_only: bool,
        #[arg(long, default_value = "preserve")]
        sorting: Sorting,
    },
}

#[derive(Clone, Copy)]
enum Sorting {
    Preserve,
    Alpha,
}

impl ValueEnum for Sorting {
    fn value_variants<'a>() -> &'a [Self] {
        &[Sorting::Alpha, Sorting::Preserve]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        use clap::builder::PossibleValue;
        match self {
            Sorting::Alpha => Some(PossibleValue::new("alpha")),
            Sorting::Preserve => Some(PossibleValue::new("preserve")),
        }
    }
}

fn string_to_path(s: &str) -> Result<path::PathBuf, io::Error> {
    env::current_dir()?
        .join(s)
        // Canonicalize paths for clear output
        .canonicalize()
}

fn read_snapshot(snapshot: &str, global: Option<&str>) -> anyhow::Result<powerpath::StatusSnapshot> {
    let page = string_to_path(snapshot)
        .with_context(|| format!("snapshot file does not exist: {snapshot}"))?;
    let global = global
        .map(|g| string_to_path(g).with_context(|| format!("global file does not exist: {g}")))
        .transpose()?;
    powerpath::read_snapshot_file(&page, global.as_deref())
        .with_context(|| format!("could not load snapshot from {}", page.display()))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    if let Some(cmd) = &cli.command {
        match cmd {
            Command::Classify {
                snapshot,
                global,
                noise_floor,
            } => classify(snapshot, global.as_deref(), *noise_floor)?,
            Command::Decode { register, value } => {
                println!("{}", powerpath::decode(register, *value));
            }
            Command::Describe { register } => {
                let descriptor = powerpath::describe(register)?;
                println!("{descriptor}");
            }
            Command::CanWrite {
                register,
                snapshot,
                value,
            } => can_write(register, snapshot, *value)?,
            Command::Explain { codes } => {
                for code in codes {
                    let explanation = powerpath::explain(code);
                    println!("{code}: {}", explanation.title);
                    println!("  {}", explanation.description);
                }
            }
            Command::Flags { bytes, read_failed } => flags(bytes, *read_failed)?,
            Command::Toggles { stamps } => toggles(stamps),
            Command::LsRegisters {
                names_only,
                sorting,
            } => ls_registers(*sorting, *names_only)?,
        }
    } else {
        println!("Nothing to do. Please issue a subcommand.")
    }

    Ok(())
}

fn classify(
    snapshot: &str,
    global: Option<&str>,
    noise_floor: Option<f64>,
) -> Result<(), anyhow::Error> {
    let mut config = powerpath::ClassifyConfig::default();
    if let Some(mv) = noise_floor {
        config = config.noise_floor_mv(mv)?;
    }
    let snapshot = read_snapshot(snapshot, global)?;
    let classification = powerpath::classify_with(&snapshot, &config);
    if classification.has_unclassified() {
        debug!("snapshot contains a path no rule matched");
    }
    println!("{classification}");
    Ok(())
}

fn can_write(register: &str, snapshot: &str, value: Option<f64>) -> Result<(), anyhow::Error> {
    let snapshot = read_snapshot(snapshot, None)?;
    if value.is_some() {
        let request = powerpath::prepare_write(register, value, &snapshot)
            .with_context(|| format!("write to {register} rejected"))?;
        println!("{} = {}", request.register, request.value);
    } else {
        println!("{register}: {}", powerpath::can_write(register, &snapshot));
    }
    Ok(())
}

fn flags(bytes: &[u8], read_failed: bool) -> Result<(), anyhow::Error> {
    let flags = if read_failed {
        None
    } else {
        let flags: [u8; 6] = bytes
            .try_into()
            .map_err(|_| anyhow!("expected 6 flag bytes, got {}", bytes.len()))?;
        Some(flags)
    };
    for code in powerpath::decode_interrupt_flags(flags) {
        let explanation = code.explanation();
        let marker = if code.is_fault() { "!" } else { " " };
        println!("{marker} {code}: {}", explanation.title);
    }
    Ok(())
}

fn toggles(stamps: &[u64]) {
    let mut monitor = powerpath::ChargeToggleMonitor::new();
    for &stamp in stamps {
        if let powerpath::ToggleVerdict::RemovalSuspected { span_ms, write } =
            monitor.record(stamp)
        {
            println!(
                "{stamp}: battery removal suspected ({} changes in {span_ms} ms), write {} = {}",
                powerpath::TOGGLE_WINDOW,
                write.register,
                write.value
            );
        }
    }
    println!("{} change(s) pending in window", monitor.len());
}

fn ls_registers(sorting: Sorting, names_only: bool) -> Result<(), anyhow::Error> {
    let catalog = powerpath::Catalog::builtin();
    let mut registers = catalog.iter().collect::<Vec<_>>();
    if registers.is_empty() {
        println!("powerpath: catalog is empty");
        return Ok(());
    }
    match sorting {
        Sorting::Preserve => { /* do nothing */ }
        Sorting::Alpha => registers.sort_by_key(|r| r.name),
    };
    let longest = registers
        .iter()
        .map(|r| r.name.len())
        .max()
        .ok_or_else(|| anyhow!("catalog is empty"))?;
    for r in registers {
        if names_only {
            println!("{}", r.name);
        } else {
            println!("{: <longest$} {: <8} {}", r.name, r.kind.to_string(), r.access);
        }
    }
    Ok(())
}
