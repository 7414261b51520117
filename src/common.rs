use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/**Single named property*/
#[derive(Serialize, Deserialize, PartialEq, Debug, Hash, Eq, Clone)]
pub struct Property {
    pub name: String,
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Property {
        Property {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/**Ordered set of properties. Names are unique; insertion order is kept.*/
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Clone, Default)]
#[serde(from = "Vec<Property>", into = "Vec<Property>")]
pub struct Properties {
    properties: Vec<Property>,
}

impl Properties {
    pub fn new() -> Properties {
        Properties {
            properties: Vec::new(),
        }
    }

    /// Inserts `property`. If a property with the same name exists its value
    /// is replaced in place and the old property is returned.
    pub fn add_property(&mut self, property: Property) -> Option<Property> {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => Some(std::mem::replace(existing, property)),
            None => {
                self.properties.push(property);
                None
            }
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get_property(name).map(|p| p.value.as_str())
    }

    pub fn remove_property(&mut self, name: &str) -> Option<Property> {
        self.properties
            .iter()
            .position(|p| p.name == name)
            .map(|idx| self.properties.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.properties.iter()
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Properties {
        let mut properties = Properties::new();
        for p in iter {
            properties.add_property(p);
        }
        properties
    }
}

// decoded lists go through add_property so repeated names collapse
impl From<Vec<Property>> for Properties {
    fn from(properties: Vec<Property>) -> Properties {
        properties.into_iter().collect()
    }
}

impl From<Properties> for Vec<Property> {
    fn from(properties: Properties) -> Vec<Property> {
        properties.properties
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl Display for Properties {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_list(f, &self.properties)
    }
}

/**Name/value pair of the boot time payload. Names may repeat.*/
#[derive(Serialize, Deserialize, PartialEq, Debug, Hash, Eq, Clone)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> NameValuePair {
        NameValuePair {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for NameValuePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Unset values render as empty text.
pub(crate) fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Writes `items` as `[a, b, c]`.
pub(crate) fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> std::fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}
