use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Configuration and run state of a single lab VM.
///
/// This is a passive value: nothing is validated, and each setter only
/// overwrites its own field. `ram` and `disk` carry whatever unit the
/// caller uses.
///
/// [Default] is the zero value: `id = 0`, `active = false`, `vcpu = 0`,
/// `ram = 0.0`, `disk = 0.0`.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq)]
pub struct Vm {
    /// VM id, expected to be unique in the system that manages the VM
    id: u64,
    /// Is the VM currently running
    active: bool,
    /// Number of virtual CPUs
    vcpu: u16,
    /// Memory allocated to the VM
    ram: f64,
    /// Disk space allocated to the VM
    disk: f64,
}

impl Vm {
    pub fn new(id: u64, active: bool, vcpu: u16, ram: f64, disk: f64) -> Self {
        Self {
            id,
            active,
            vcpu,
            ram,
            disk,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn set_id(&mut self, value: u64) {
        self.id = value;
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, value: bool) {
        self.active = value;
    }

    pub fn vcpu(&self) -> u16 {
        self.vcpu
    }

    pub fn set_vcpu(&mut self, value: u16) {
        self.vcpu = value;
    }

    pub fn ram(&self) -> f64 {
        self.ram
    }

    pub fn set_ram(&mut self, value: f64) {
        self.ram = value;
    }

    pub fn disk(&self) -> f64 {
        self.disk
    }

    pub fn set_disk(&mut self, value: f64) {
        self.disk = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vm {
        Vm::new(1, true, 4, 8192.0, 100000.0)
    }

    #[test]
    fn new_holds_given_values() {
        let vm = sample();
        assert_eq!(vm.id(), 1);
        assert!(vm.active());
        assert_eq!(vm.vcpu(), 4);
        assert_eq!(vm.ram(), 8192.0);
        assert_eq!(vm.disk(), 100000.0);
    }

    #[test]
    fn default_is_zero_value() {
        let vm = Vm::default();
        assert_eq!(vm.id(), 0);
        assert!(!vm.active());
        assert_eq!(vm.vcpu(), 0);
        assert_eq!(vm.ram(), 0.0);
        assert_eq!(vm.disk(), 0.0);
    }

    #[test]
    fn populate_from_default() {
        let mut vm = Vm::default();
        vm.set_id(1);
        vm.set_active(true);
        vm.set_vcpu(4);
        vm.set_ram(8192.0);
        vm.set_disk(100000.0);
        assert_eq!(vm, sample());
    }

    #[test]
    fn set_id_only_touches_id() {
        let mut vm = sample();
        vm.set_id(u64::MAX);
        assert_eq!(vm.id(), u64::MAX);
        assert_eq!(vm, Vm::new(u64::MAX, true, 4, 8192.0, 100000.0));
    }

    #[test]
    fn set_active_only_touches_active() {
        let mut vm = sample();
        vm.set_active(false);
        assert!(!vm.active());
        assert_eq!(vm, Vm::new(1, false, 4, 8192.0, 100000.0));
        vm.set_active(true);
        assert_eq!(vm, sample());
    }

    #[test]
    fn set_vcpu_only_touches_vcpu() {
        let mut vm = sample();
        vm.set_vcpu(0);
        assert_eq!(vm.vcpu(), 0);
        assert_eq!(vm, Vm::new(1, true, 0, 8192.0, 100000.0));
    }

    #[test]
    fn set_ram_only_touches_ram() {
        let mut vm = sample();
        vm.set_ram(0.5);
        assert_eq!(vm.ram(), 0.5);
        assert_eq!(vm, Vm::new(1, true, 4, 0.5, 100000.0));
    }

    #[test]
    fn set_disk_only_touches_disk() {
        let mut vm = sample();
        vm.set_disk(250.25);
        assert_eq!(vm.disk(), 250.25);
        assert_eq!(vm, Vm::new(1, true, 4, 8192.0, 250.25));
    }

    #[test]
    fn setters_do_not_validate() {
        // negative and non-finite sizes are stored as given
        let mut vm = sample();
        vm.set_ram(-1.0);
        vm.set_disk(f64::INFINITY);
        assert_eq!(vm.ram(), -1.0);
        assert!(vm.disk().is_infinite());
    }

    #[test]
    fn last_set_wins() {
        let mut vm = Vm::default();
        vm.set_vcpu(2);
        vm.set_vcpu(8);
        assert_eq!(vm.vcpu(), 8);
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "active": true,
                "vcpu": 4,
                "ram": 8192.0,
                "disk": 100000.0
            })
        );
    }

    #[test]
    fn json_accepts_integer_sizes() {
        let vm: Vm =
            serde_json::from_str(r#"{"id":7,"active":false,"vcpu":2,"ram":2048,"disk":20480}"#)
                .unwrap();
        assert_eq!(vm, Vm::new(7, false, 2, 2048.0, 20480.0));
    }

    #[test]
    fn json_rejects_wrong_field_type() {
        let res = serde_json::from_str::<Vm>(
            r#"{"id":7,"active":"yes","vcpu":2,"ram":2048,"disk":20480}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn schema_lists_all_fields() {
        let schema = schemars::schema_for!(Vm);
        let obj = schema.schema.object.expect("object schema");
        for field in ["id", "active", "vcpu", "ram", "disk"] {
            assert!(obj.properties.contains_key(field), "missing {field}");
        }
    }
}
