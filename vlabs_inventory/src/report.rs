use crate::inventory::ResourceTotals;
use crate::settings::Settings;
use vlabs_model::Vm;

fn state(vm: &Vm) -> &'static str {
    if vm.active() { "running" } else { "stopped" }
}

/// Fixed width table, one row per VM
pub fn render_table<'a>(vms: impl IntoIterator<Item = &'a Vm>, settings: &Settings) -> String {
    let ram = format!("RAM ({})", settings.ram_unit);
    let disk = format!("DISK ({})", settings.disk_unit);
    let mut out = format!(
        "{:>8}  {:<8}  {:>4}  {:>14}  {:>14}\n",
        "ID", "STATE", "VCPU", ram, disk
    );
    for vm in vms {
        out.push_str(&format!(
            "{:>8}  {:<8}  {:>4}  {:>14}  {:>14}\n",
            vm.id(),
            state(vm),
            vm.vcpu(),
            vm.ram(),
            vm.disk()
        ));
    }
    out
}

pub fn render_totals(totals: &ResourceTotals, settings: &Settings) -> String {
    format!(
        "{} VMs ({} running): {} vCPU, {} {} RAM, {} {} disk",
        totals.vms,
        totals.active,
        totals.vcpu,
        totals.ram,
        settings.ram_unit,
        totals.disk,
        settings.disk_unit
    )
}

/// Detail view of a single VM
pub fn render_vm(vm: &Vm, settings: &Settings) -> String {
    format!(
        "VM {}\n  state: {}\n  vcpu:  {}\n  ram:   {} {}\n  disk:  {} {}\n",
        vm.id(),
        state(vm),
        vm.vcpu(),
        vm.ram(),
        settings.ram_unit,
        vm.disk(),
        settings.disk_unit
    )
}
