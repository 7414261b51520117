//! Member records of a cloud orchestration control plane.
//!
//! A [`MemberRecord`] describes one VM or container instance of a cluster:
//! its identity, addresses, placement, timing and metadata. The controller
//! creates and enriches records while the topology side stores and
//! distributes them; neither lives in this crate.

pub mod common;
pub mod config;
pub mod error;
pub mod member;
pub mod metadata;
pub mod partition;
pub mod serialize;

pub use crate::common::{NameValuePair, Properties, Property};
pub use crate::config::MemberConfig;
pub use crate::error::MemberError;
pub use crate::member::{generate_member_id, now_millis, MemberRecord, MemberStatus};
pub use crate::metadata::InstanceMetadata;
pub use crate::partition::Partition;
