use cloud_member::{now_millis, MemberConfig, MemberRecord, Partition};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let conf = match MemberConfig::from_env() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    //controller decides to start a member
    let mut member = MemberRecord::provision("app1", "php", "php-cluster-1", now_millis());
    member.set_partition(Some(Partition::new("zone-a").with_provider("openstack")));
    info!(status = ?member.status(), "{}", member);

    //IaaS reports the instance
    member.set_instance_id(Some("RegionOne/4c1e".to_string()));
    member.set_default_private_ip(Some("10.0.0.5".to_string()));
    member.set_private_ips(vec!["10.0.0.5".to_string()]);
    info!(status = ?member.status(), hash = member.hash_code(), "{}", member);

    //member gets recycled
    let now = now_millis();
    member.mark_obsolete(now, conf.obsolete_grace());
    info!(
        status = ?member.status(),
        expired = member.is_obsolete_expired(now),
        "{}",
        member
    );
}
