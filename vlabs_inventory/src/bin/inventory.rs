use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use log::info;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use vlabs_inventory::report::{render_table, render_totals, render_vm};
use vlabs_inventory::{Settings, VmInventory};
use vlabs_model::Vm;

#[derive(Parser)]
#[clap(about = "Inspect virtual lab VM inventories", version, author)]
struct Args {
    /// Path to the config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Inventory file, overrides the config value
    #[clap(short, long)]
    inventory: Option<PathBuf>,

    /// Only include running VMs
    #[clap(long)]
    active_only: bool,

    #[clap(long, default_value = "list")]
    mode: ExecMode,

    /// VM id for `show`
    #[clap(long)]
    id: Option<u64>,
}

#[derive(Clone, ValueEnum, PartialEq)]
enum ExecMode {
    /// Table of VMs with resource totals
    List,

    /// Details of a single VM
    Show,

    /// Print the inventory as JSON
    Json,

    /// Print the JSON schema of a VM record
    Schema,
}

impl Display for ExecMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecMode::List => write!(f, "List"),
            ExecMode::Show => write!(f, "Show"),
            ExecMode::Json => write!(f, "Json"),
            ExecMode::Schema => write!(f, "Schema"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.mode {
        ExecMode::List => {
            let (settings, inventory) = load_inventory(&args)?;
            print!("{}", render_table(inventory.iter(), &settings));
            println!("{}", render_totals(&inventory.totals(), &settings));
            println!(
                "running: {}",
                render_totals(&inventory.active_totals(), &settings)
            );
        }
        ExecMode::Show => {
            let Some(id) = args.id else {
                bail!("--id is required for show");
            };
            let (settings, inventory) = load_inventory(&args)?;
            let Some(vm) = inventory.get(id) else {
                bail!("VM {} not found", id);
            };
            print!("{}", render_vm(vm, &settings));
        }
        ExecMode::Json => {
            let (_, inventory) = load_inventory(&args)?;
            println!("{}", inventory.to_json_pretty()?);
        }
        ExecMode::Schema => {
            let schema = schemars::schema_for!(Vm);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn load_inventory(args: &Args) -> Result<(Settings, VmInventory)> {
    let settings = match &args.config {
        Some(path) => Settings::load(path, true)?,
        None => Settings::load(&PathBuf::from("config.yaml"), false)?,
    };
    let path = settings.inventory_path(args.inventory.as_deref())?;
    let mut inventory = VmInventory::load(&path)?;
    if args.active_only || settings.active_only {
        inventory = VmInventory::new(inventory.active().copied().collect());
    }
    info!(
        "{} mode on {} ({} VMs)",
        args.mode,
        path.display(),
        inventory.len()
    );
    Ok((settings, inventory))
}
