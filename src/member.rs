use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::{debug, info};
use uuid::Uuid;

use crate::common::{or_empty, write_list, NameValuePair, Properties};
use crate::metadata::InstanceMetadata;
use crate::partition::Partition;

/**Lifecycle stage derived from the fields of a member record*/
#[derive(Serialize_repr, Deserialize_repr, PartialEq, Eq, Debug, Hash, Clone, Copy)]
#[repr(u8)]
pub enum MemberStatus {
    /// Provisioning decided, nothing launched yet.
    Created = 0,
    /// Backed by an IaaS instance or a kubernetes pod.
    Launched = 1,
    /// Flagged for removal after a grace period.
    Obsolete = 2,
}

/// One compute member (VM or container) of a cluster.
///
/// The application id, cartridge type, cluster id and member id are fixed at
/// construction. Everything else is filled in by the controller as the
/// member gets provisioned. Two records are equal when their identity and
/// their instance id match; the remaining fields are descriptive only.
///
/// The record does no locking. Do not change the instance id of a record
/// that is stored as a key of a hash container.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MemberRecord {
    application_id: String,
    cartridge_type: String,
    cluster_id: String,
    member_id: String,

    instance_id: Option<String>,
    cluster_instance_id: Option<String>,
    partition: Option<Partition>,
    network_partition_id: Option<String>,
    default_private_ip: Option<String>,
    default_public_ip: Option<String>,
    private_ips: Vec<String>,
    public_ips: Vec<String>,
    allocated_ips: Vec<String>,
    init_time: i64,
    lb_cluster_id: Option<String>,
    obsolete_init_time: i64,
    obsolete_expiry_time: i64,
    // set by mark_obsolete, a zero init time still counts
    obsolete: bool,
    instance_metadata: Option<InstanceMetadata>,
    properties: Properties,
    dynamic_payload: Vec<NameValuePair>,
    kubernetes_pod_id: Option<String>,
    kubernetes_pod_name: Option<String>,
}

impl MemberRecord {
    pub fn new(
        application_id: impl Into<String>,
        cartridge_type: impl Into<String>,
        cluster_id: impl Into<String>,
        member_id: impl Into<String>,
    ) -> MemberRecord {
        MemberRecord {
            application_id: application_id.into(),
            cartridge_type: cartridge_type.into(),
            cluster_id: cluster_id.into(),
            member_id: member_id.into(),
            instance_id: None,
            cluster_instance_id: None,
            partition: None,
            network_partition_id: None,
            default_private_ip: None,
            default_public_ip: None,
            private_ips: Vec::new(),
            public_ips: Vec::new(),
            allocated_ips: Vec::new(),
            init_time: 0,
            lb_cluster_id: None,
            obsolete_init_time: 0,
            obsolete_expiry_time: 0,
            obsolete: false,
            instance_metadata: None,
            properties: Properties::new(),
            dynamic_payload: Vec::new(),
            kubernetes_pod_id: None,
            kubernetes_pod_name: None,
        }
    }

    /// Creates the record of a member the controller just decided to start,
    /// with a freshly generated member id and `now` as its init time.
    pub fn provision(
        application_id: impl Into<String>,
        cartridge_type: impl Into<String>,
        cluster_id: impl Into<String>,
        now: i64,
    ) -> MemberRecord {
        let cluster_id = cluster_id.into();
        let member_id = generate_member_id(&cluster_id);
        let mut member = MemberRecord::new(application_id, cartridge_type, cluster_id, member_id);
        member.init_time = now;
        debug!(member_id = %member.member_id, cluster_id = %member.cluster_id, "member provisioned");
        member
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn cartridge_type(&self) -> &str {
        &self.cartridge_type
    }

    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.instance_id.as_deref()
    }

    pub fn set_instance_id(&mut self, instance_id: Option<String>) {
        debug!(member_id = %self.member_id, instance_id = ?instance_id, "instance id assigned");
        self.instance_id = instance_id;
    }

    pub fn cluster_instance_id(&self) -> Option<&str> {
        self.cluster_instance_id.as_deref()
    }

    pub fn set_cluster_instance_id(&mut self, cluster_instance_id: Option<String>) {
        self.cluster_instance_id = cluster_instance_id;
    }

    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    pub fn set_partition(&mut self, partition: Option<Partition>) {
        debug!(
            member_id = %self.member_id,
            partition_id = ?partition.as_ref().map(|p| p.id.as_str()),
            "partition assigned"
        );
        self.partition = partition;
    }

    pub fn network_partition_id(&self) -> Option<&str> {
        self.network_partition_id.as_deref()
    }

    pub fn set_network_partition_id(&mut self, network_partition_id: Option<String>) {
        self.network_partition_id = network_partition_id;
    }

    pub fn default_private_ip(&self) -> Option<&str> {
        self.default_private_ip.as_deref()
    }

    pub fn set_default_private_ip(&mut self, ip: Option<String>) {
        self.default_private_ip = ip;
    }

    pub fn default_public_ip(&self) -> Option<&str> {
        self.default_public_ip.as_deref()
    }

    pub fn set_default_public_ip(&mut self, ip: Option<String>) {
        self.default_public_ip = ip;
    }

    pub fn private_ips(&self) -> &[String] {
        &self.private_ips
    }

    /// Replaces the whole list, nothing is merged.
    pub fn set_private_ips(&mut self, ips: Vec<String>) {
        self.private_ips = ips;
    }

    pub fn public_ips(&self) -> &[String] {
        &self.public_ips
    }

    /// Replaces the whole list, nothing is merged.
    pub fn set_public_ips(&mut self, ips: Vec<String>) {
        self.public_ips = ips;
    }

    /// Addresses reserved by hand rather than by the automatic allocation.
    pub fn allocated_ips(&self) -> &[String] {
        &self.allocated_ips
    }

    pub fn set_allocated_ips(&mut self, ips: Vec<String>) {
        self.allocated_ips = ips;
    }

    pub fn init_time(&self) -> i64 {
        self.init_time
    }

    pub fn set_init_time(&mut self, init_time: i64) {
        self.init_time = init_time;
    }

    pub fn lb_cluster_id(&self) -> Option<&str> {
        self.lb_cluster_id.as_deref()
    }

    pub fn set_lb_cluster_id(&mut self, lb_cluster_id: Option<String>) {
        self.lb_cluster_id = lb_cluster_id;
    }

    pub fn obsolete_init_time(&self) -> i64 {
        self.obsolete_init_time
    }

    pub fn set_obsolete_init_time(&mut self, time: i64) {
        self.obsolete_init_time = time;
    }

    pub fn obsolete_expiry_time(&self) -> i64 {
        self.obsolete_expiry_time
    }

    pub fn set_obsolete_expiry_time(&mut self, time: i64) {
        self.obsolete_expiry_time = time;
    }

    pub fn instance_metadata(&self) -> Option<&InstanceMetadata> {
        self.instance_metadata.as_ref()
    }

    pub fn set_instance_metadata(&mut self, metadata: Option<InstanceMetadata>) {
        self.instance_metadata = metadata;
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    pub fn dynamic_payload(&self) -> &[NameValuePair] {
        &self.dynamic_payload
    }

    pub fn set_dynamic_payload(&mut self, payload: Vec<NameValuePair>) {
        self.dynamic_payload = payload;
    }

    pub fn kubernetes_pod_id(&self) -> Option<&str> {
        self.kubernetes_pod_id.as_deref()
    }

    pub fn set_kubernetes_pod_id(&mut self, pod_id: Option<String>) {
        debug!(member_id = %self.member_id, pod_id = ?pod_id, "kubernetes pod assigned");
        self.kubernetes_pod_id = pod_id;
    }

    pub fn kubernetes_pod_name(&self) -> Option<&str> {
        self.kubernetes_pod_name.as_deref()
    }

    pub fn set_kubernetes_pod_name(&mut self, pod_name: Option<String>) {
        self.kubernetes_pod_name = pod_name;
    }

    pub fn status(&self) -> MemberStatus {
        if self.is_obsolete() {
            MemberStatus::Obsolete
        } else if self.instance_id.is_some() || self.kubernetes_pod_id.is_some() {
            MemberStatus::Launched
        } else {
            MemberStatus::Created
        }
    }

    /// Flags the member for recycling. It may be terminated once `grace` has passed.
    pub fn mark_obsolete(&mut self, now: i64, grace: Duration) {
        let grace_ms = i64::try_from(grace.as_millis()).unwrap_or(i64::MAX);
        self.obsolete_init_time = now;
        self.obsolete_expiry_time = now.saturating_add(grace_ms);
        self.obsolete = true;
        info!(
            member_id = %self.member_id,
            cluster_id = %self.cluster_id,
            expires_at = self.obsolete_expiry_time,
            "member marked obsolete"
        );
    }

    /// True once `mark_obsolete` ran or an obsolete init time was set directly.
    pub fn is_obsolete(&self) -> bool {
        self.obsolete || self.obsolete_init_time > 0
    }

    pub fn is_obsolete_expired(&self, now: i64) -> bool {
        self.is_obsolete() && now >= self.obsolete_expiry_time
    }

    /// True for a member that was initiated but never got an instance or pod within `timeout`.
    pub fn is_pending_expired(&self, now: i64, timeout: Duration) -> bool {
        if self.status() != MemberStatus::Created || self.init_time <= 0 {
            return false;
        }
        let timeout_ms = i64::try_from(timeout.as_millis()).unwrap_or(i64::MAX);
        now.saturating_sub(self.init_time) >= timeout_ms
    }

    /// Stable 32 bit hash over the cluster id, member id and instance id.
    ///
    /// Unlike the `Hash` impl this value does not depend on the hasher or the
    /// process, so it can be shared with other nodes.
    pub fn hash_code(&self) -> i32 {
        let prime: i32 = 31;
        let mut result: i32 = 1;
        result = prime.wrapping_mul(result).wrapping_add(string_hash(&self.cluster_id));
        result = prime.wrapping_mul(result).wrapping_add(string_hash(&self.member_id));
        result = prime
            .wrapping_mul(result)
            .wrapping_add(self.instance_id.as_deref().map_or(0, string_hash));
        result
    }
}

/**Member ids are the cluster id followed by a random uuid*/
pub fn generate_member_id(cluster_id: &str) -> String {
    format!("{}{}", cluster_id, Uuid::new_v4())
}

/// Milliseconds since the unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or_default()
}

// 31-polynomial over UTF-16 code units
fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)))
}

impl PartialEq for MemberRecord {
    fn eq(&self, other: &MemberRecord) -> bool {
        self.application_id == other.application_id
            && self.cartridge_type == other.cartridge_type
            && self.cluster_id == other.cluster_id
            && self.member_id == other.member_id
            && self.instance_id == other.instance_id
    }
}

impl Eq for MemberRecord {}

impl Hash for MemberRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.application_id.hash(state);
        self.cartridge_type.hash(state);
        self.cluster_id.hash(state);
        self.member_id.hash(state);
        self.instance_id.hash(state);
    }
}

impl Display for MemberRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MemberRecord [applicationId={}, cartridgeType={}, clusterId={}, memberId={}, instanceId={}, clusterInstanceId={}, partition=",
            self.application_id,
            self.cartridge_type,
            self.cluster_id,
            self.member_id,
            or_empty(&self.instance_id),
            or_empty(&self.cluster_instance_id)
        )?;
        if let Some(ref partition) = self.partition {
            write!(f, "{}", partition)?;
        }
        write!(
            f,
            ", defaultPrivateIP={}, defaultPublicIP={}, allocatedIPs=",
            or_empty(&self.default_private_ip),
            or_empty(&self.default_public_ip)
        )?;
        write_list(f, &self.allocated_ips)?;
        f.write_str(", publicIPs=")?;
        write_list(f, &self.public_ips)?;
        f.write_str(", privateIPs=")?;
        write_list(f, &self.private_ips)?;
        write!(
            f,
            ", initTime={}, lbClusterId={}, networkPartitionId={}, obsoleteInitTime={}, obsoleteExpiryTime={}, kubernetesPodId={}, kubernetesPodName={}, instanceMetadata=",
            self.init_time,
            or_empty(&self.lb_cluster_id),
            or_empty(&self.network_partition_id),
            self.obsolete_init_time,
            self.obsolete_expiry_time,
            or_empty(&self.kubernetes_pod_id),
            or_empty(&self.kubernetes_pod_name)
        )?;
        if let Some(ref metadata) = self.instance_metadata {
            write!(f, "{}", metadata)?;
        }
        write!(f, ", properties={}, dynamicPayload=", self.properties)?;
        write_list(f, &self.dynamic_payload)?;
        f.write_str("]")
    }
}
