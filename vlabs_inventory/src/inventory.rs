use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use vlabs_model::Vm;

/// Accepts a bare array of VMs or `{"vms": [..]}`
fn parse_listing(listing: Value) -> Result<Vec<Vm>> {
    let entries = match listing {
        Value::Array(entries) => entries,
        Value::Object(mut obj) => match obj.remove("vms") {
            Some(Value::Array(entries)) => entries,
            Some(_) => bail!("`vms` must be an array of VMs"),
            None => bail!("Expected an array of VMs or an object with a `vms` array"),
        },
        _ => bail!("Expected an array of VMs or an object with a `vms` array"),
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_vm(entry).with_context(|| format!("Invalid VM at index {index}"))
        })
        .collect()
}

fn parse_vm(entry: &Value) -> Result<Vm> {
    let Value::Object(obj) = entry else {
        bail!("Expected a VM object, got {entry}");
    };
    Ok(Vm::new(
        field(obj, "id")?,
        field(obj, "active")?,
        field(obj, "vcpu")?,
        field(obj, "ram")?,
        field(obj, "disk")?,
    ))
}

fn field<T: DeserializeOwned>(obj: &Map<String, Value>, name: &str) -> Result<T> {
    let value = obj.get(name).ok_or_else(|| anyhow!("missing field `{name}`"))?;
    <T as Deserialize>::deserialize(value).with_context(|| format!("invalid field `{name}`"))
}

/// Ordered list of VMs as reported by an external VM listing.
///
/// VM ids are not required to be unique, lookups return the first match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VmInventory {
    vms: Vec<Vm>,
}

/// Summed resources over a set of VMs
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResourceTotals {
    /// Number of VMs counted
    pub vms: usize,
    /// How many of them are running
    pub active: usize,
    pub vcpu: u64,
    pub ram: f64,
    pub disk: f64,
}

impl ResourceTotals {
    fn add(mut self, vm: &Vm) -> Self {
        self.vms += 1;
        if vm.active() {
            self.active += 1;
        }
        self.vcpu += vm.vcpu() as u64;
        self.ram += vm.ram();
        self.disk += vm.disk();
        self
    }
}

impl VmInventory {
    pub fn new(vms: Vec<Vm>) -> Self {
        Self { vms }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let listing: Value =
            serde_json::from_str(json).context("Failed to parse VM inventory")?;
        Ok(Self::new(
            parse_listing(listing).context("Failed to parse VM inventory")?,
        ))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let listing: Value =
            serde_json::from_reader(reader).context("Failed to parse VM inventory")?;
        Ok(Self::new(
            parse_listing(listing).context("Failed to parse VM inventory")?,
        ))
    }

    /// Read an inventory file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open inventory {}", path.display()))?;
        let inventory = Self::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("Failed to load inventory {}", path.display()))?;
        debug!("Loaded {} VMs from {}", inventory.len(), path.display());

        let dupes = inventory.duplicate_ids();
        if !dupes.is_empty() {
            warn!(
                "Inventory {} contains duplicate VM ids: {:?}",
                path.display(),
                dupes
            );
        }
        Ok(inventory)
    }

    /// Export as a JSON array, which [VmInventory::from_json_str] reads back.
    ///
    /// JSON has no NaN or infinity, so a non-finite `ram`/`disk` is an error.
    pub fn to_json_pretty(&self) -> Result<String> {
        for vm in &self.vms {
            if !vm.ram().is_finite() || !vm.disk().is_finite() {
                bail!("VM {} has a non-finite ram/disk value", vm.id());
            }
        }
        Ok(serde_json::to_string_pretty(&self.vms)?)
    }

    pub fn len(&self) -> usize {
        self.vms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vm> {
        self.vms.iter()
    }

    /// VMs which are currently running
    pub fn active(&self) -> impl Iterator<Item = &Vm> {
        self.vms.iter().filter(|v| v.active())
    }

    pub fn get(&self, id: u64) -> Option<&Vm> {
        self.vms.iter().find(|v| v.id() == id)
    }

    /// Ids which appear more than once, in order of first appearance
    pub fn duplicate_ids(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut dupes = Vec::new();
        for vm in &self.vms {
            if !seen.insert(vm.id()) && reported.insert(vm.id()) {
                dupes.push(vm.id());
            }
        }
        dupes
    }

    pub fn totals(&self) -> ResourceTotals {
        self.iter().fold(ResourceTotals::default(), ResourceTotals::add)
    }

    pub fn active_totals(&self) -> ResourceTotals {
        self.active().fold(ResourceTotals::default(), ResourceTotals::add)
    }
}
