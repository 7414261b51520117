use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::common::or_empty;

/// Facts the IaaS reports about a launched instance.
///
/// Numeric fields are zero until the provider reports them.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone, Default)]
pub struct InstanceMetadata {
    pub hostname: Option<String>,
    pub hypervisor: Option<String>,
    pub status: Option<String>,
    pub image_id: Option<String>,
    pub hardware_id: Option<String>,
    pub login_port: u16,
    pub ram_mb: u32,
    pub cpus: f64,
    pub disk_gb: u32,
}

impl Display for InstanceMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InstanceMetadata [hostname={}, hypervisor={}, status={}, imageId={}, hardwareId={}, loginPort={}, ram={}, cpus={}, disk={}]",
            or_empty(&self.hostname),
            or_empty(&self.hypervisor),
            or_empty(&self.status),
            or_empty(&self.image_id),
            or_empty(&self.hardware_id),
            self.login_port,
            self.ram_mb,
            self.cpus,
            self.disk_gb
        )
    }
}
