//! Behaviour of member records as seen by the controller and the topology side.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use cloud_member::serialize::{from_bytes, to_bytes};
use cloud_member::*;
use proptest::prelude::*;

fn launched(member_id: &str, instance_id: &str) -> MemberRecord {
    let mut m = MemberRecord::new("app1", "php", "c1", member_id);
    m.set_instance_id(Some(instance_id.to_string()));
    m
}

#[test]
fn twin_with_same_instance_is_found_in_hash_set() {
    let mut a = launched("m1", "i-123");
    a.set_default_private_ip(Some("10.0.0.5".to_string()));
    let mut b = launched("m1", "i-123");
    b.set_default_private_ip(Some("10.0.0.9".to_string()));

    let mut set = HashSet::new();
    set.insert(a);

    assert!(set.contains(&b));
    assert!(!set.contains(&launched("m2", "i-123")));
}

#[test]
fn records_key_a_registry_by_value() {
    let mut registry: HashMap<MemberRecord, &str> = HashMap::new();
    registry.insert(launched("m1", "i-1"), "first");
    registry.insert(launched("m1", "i-1"), "second");
    registry.insert(launched("m1", "i-2"), "other");

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(&launched("m1", "i-1")), Some(&"second"));
}

#[test]
fn fully_populated_record_survives_encoding() {
    let mut m = MemberRecord::provision("app1", "tomcat", "c1", 1_700_000_000_000);
    m.set_instance_id(Some("RegionOne/5d2f".to_string()));
    m.set_cluster_instance_id(Some("app1-1".to_string()));
    let mut partition = Partition::new("p1").with_provider("openstack");
    partition.is_public = true;
    m.set_partition(Some(partition));
    m.set_network_partition_id(Some("np1".to_string()));
    m.set_default_private_ip(Some("10.0.0.5".to_string()));
    m.set_default_public_ip(Some("172.16.0.5".to_string()));
    m.set_private_ips(vec!["10.0.0.5".to_string()]);
    m.set_public_ips(vec!["172.16.0.5".to_string()]);
    m.set_allocated_ips(vec!["172.16.0.99".to_string()]);
    m.set_lb_cluster_id(Some("lb-1".to_string()));
    m.set_instance_metadata(Some(InstanceMetadata {
        hostname: Some("node-1".to_string()),
        image_id: Some("img-42".to_string()),
        ram_mb: 2048,
        cpus: 2.0,
        ..InstanceMetadata::default()
    }));
    m.properties_mut().add_property(Property::new("PRIMARY", "true"));
    m.set_dynamic_payload(vec![
        NameValuePair::new("PORTS", "8080"),
        NameValuePair::new("PORTS", "8443"),
    ]);
    m.mark_obsolete(1_700_000_500_000, Duration::from_secs(3600));

    let bytes = to_bytes(&m).unwrap();
    let decoded: MemberRecord = from_bytes(&bytes).unwrap();

    assert_eq!(decoded, m);
    assert_eq!(decoded.to_string(), m.to_string());
    assert_eq!(decoded.partition(), m.partition());
    assert_eq!(decoded.instance_metadata(), m.instance_metadata());
    assert_eq!(decoded.dynamic_payload().len(), 2);
    assert_eq!(decoded.status(), MemberStatus::Obsolete);
}

#[test]
fn reaper_view_of_an_obsolete_member() {
    let conf = MemberConfig::default();
    let mut m = MemberRecord::provision("app1", "php", "c1", 1_000);
    m.set_instance_id(Some("i-9".to_string()));

    m.mark_obsolete(2_000, conf.obsolete_grace());

    assert!(m.is_obsolete());
    assert!(!m.is_obsolete_expired(2_000 + conf.obsolete_expiry_ms as i64 - 1));
    assert!(m.is_obsolete_expired(2_000 + conf.obsolete_expiry_ms as i64));
    assert!(!m.is_pending_expired(i64::MAX, conf.pending_timeout()));
}

#[test]
fn rendering_lists_identity_first() {
    let text = MemberRecord::new("app1", "php", "c1", "m1").to_string();

    for part in &["applicationId=app1", "cartridgeType=php", "clusterId=c1", "memberId=m1"] {
        assert!(text.contains(part), "{} missing from {}", part, text);
    }
}

fn id() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,12}"
}

proptest! {
    #[test]
    fn equal_records_hash_equally(
        app in id(), cartridge in id(), cluster in id(), member in id(),
        instance in proptest::option::of(id()),
        ip_a in id(), ip_b in id(),
    ) {
        let mut a = MemberRecord::new(app.clone(), cartridge.clone(), cluster.clone(), member.clone());
        let mut b = MemberRecord::new(app, cartridge, cluster, member);
        a.set_instance_id(instance.clone());
        b.set_instance_id(instance);
        a.set_default_private_ip(Some(ip_a));
        b.set_default_private_ip(Some(ip_b));

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert!(a == a.clone());
    }

    #[test]
    fn different_member_ids_are_never_equal(
        cluster in id(), m1 in id(), m2 in id(), instance in id(),
    ) {
        prop_assume!(m1 != m2);
        let mut a = MemberRecord::new("app", "php", cluster.clone(), m1);
        let mut b = MemberRecord::new("app", "php", cluster, m2);
        a.set_instance_id(Some(instance.clone()));
        b.set_instance_id(Some(instance));

        prop_assert_ne!(a, b);
    }

    #[test]
    fn last_ip_list_wins(first in proptest::collection::vec(id(), 0..5), second in proptest::collection::vec(id(), 0..5)) {
        let mut m = MemberRecord::new("app", "php", "c", "m");
        m.set_public_ips(first);
        m.set_public_ips(second.clone());

        prop_assert_eq!(m.public_ips(), second.as_slice());
    }
}
