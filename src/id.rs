use std::{convert::Infallible, str::FromStr};

use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A project is addressed either by its numeric id or by its
/// `namespace/project` path.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ProjectId {
    Id(u32),
    Path(CompactString),
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct HookId {
    value: u32,
}

impl ProjectId {
    pub fn new(id: u32) -> Self { Self::Id(id) }

    pub fn path(path: impl Into<CompactString>) -> Self { Self::Path(path.into()) }
}

impl HookId {
    pub fn new(id: u32) -> Self { Self { value: id } }

    /// Hooks not yet known to the server carry id 0.
    pub fn is_unset(&self) -> bool { self.value == 0 }
}

impl From<u32> for ProjectId {
    fn from(id: u32) -> Self { Self::Id(id) }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Path(s.into()),
        }
    }
}

impl FromStr for ProjectId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl FromStr for HookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(HookId::new)
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D>(deserializer: D) -> Result<ProjectId, D::Error>
        where D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(u32),
            Path(CompactString),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Id(id) => ProjectId::Id(id),
            Raw::Path(path) => ProjectId::from(path.as_str()),
        })
    }
}

impl Serialize for ProjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        match self {
            ProjectId::Id(id) => serializer.serialize_u32(*id),
            ProjectId::Path(path) => serializer.serialize_str(path),
        }
    }
}

impl<'de> Deserialize<'de> for HookId {
    fn deserialize<D>(deserializer: D) -> Result<HookId, D::Error>
        where D: Deserializer<'de>,
    {
        let id = u32::deserialize(deserializer)?;
        Ok(HookId::new(id))
    }
}

impl Serialize for HookId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer,
    {
        serializer.serialize_u32(self.value)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProjectId::Id(id) => write!(f, "{id}"),
            ProjectId::Path(path) => write!(f, "{path}"),
        }
    }
}

impl std::fmt::Display for HookId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
