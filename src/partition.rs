use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::common::{or_empty, Properties};

/**Placement domain a member is scheduled into, e.g. an availability zone of some IaaS provider.*/
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone)]
pub struct Partition {
    pub id: String,
    pub provider: Option<String>,
    pub description: Option<String>,
    pub is_public: bool,
    pub properties: Properties,
}

impl Partition {
    pub fn new(id: impl Into<String>) -> Partition {
        Partition {
            id: id.into(),
            provider: None,
            description: None,
            is_public: false,
            properties: Properties::new(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Partition {
        self.provider = Some(provider.into());
        self
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Partition [id={}, provider={}, description={}, isPublic={}, properties={}]",
            self.id,
            or_empty(&self.provider),
            or_empty(&self.description),
            self.is_public,
            self.properties
        )
    }
}
