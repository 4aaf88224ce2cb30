use crate::registry::UnknownSymbol;
use log::debug;
use once_cell::sync::Lazy;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The kind of record a request or response is about.
///
/// On the wire this is just its code, see [`EntityType::code`]. The symbolic
/// names match the API documentation, so `END_USER` parses but `EndUser`
/// does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityType {
    Organization,
    Document,
    Location,
    /// A managed device. The API calls every device a node.
    Node,
    Attachment,
    Technician,
    Credential,
    Checklist,
    EndUser,
    Contact,
    /// A knowledge base article.
    KbDocument,
}

impl EntityType {
    /// Every entity type, in wire code order.
    pub const ALL: [EntityType; 11] = [
        EntityType::Organization,
        EntityType::Document,
        EntityType::Location,
        EntityType::Node,
        EntityType::Attachment,
        EntityType::Technician,
        EntityType::Credential,
        EntityType::Checklist,
        EntityType::EndUser,
        EntityType::Contact,
        EntityType::KbDocument,
    ];

    /// The stable numeric code the remote API identifies this kind by.
    pub fn code(self) -> u8 {
        match self {
            EntityType::Organization => 1,
            EntityType::Document => 2,
            EntityType::Location => 3,
            EntityType::Node => 4,
            EntityType::Attachment => 5,
            EntityType::Technician => 6,
            EntityType::Credential => 7,
            EntityType::Checklist => 8,
            EntityType::EndUser => 9,
            EntityType::Contact => 10,
            EntityType::KbDocument => 11,
        }
    }

    /// Looks up the entity type for a raw wire code.
    pub fn from_code(code: u8) -> Result<EntityType, UnknownSymbol> {
        match code {
            1 => Ok(EntityType::Organization),
            2 => Ok(EntityType::Document),
            3 => Ok(EntityType::Location),
            4 => Ok(EntityType::Node),
            5 => Ok(EntityType::Attachment),
            6 => Ok(EntityType::Technician),
            7 => Ok(EntityType::Credential),
            8 => Ok(EntityType::Checklist),
            9 => Ok(EntityType::EndUser),
            10 => Ok(EntityType::Contact),
            11 => Ok(EntityType::KbDocument),
            other => {
                debug!("rejected entity type code {}", other);

                Err(UnknownSymbol::EntityCode(u64::from(other)))
            }
        }
    }

    /// The symbolic name, spelled the way the API documentation spells it.
    pub fn name(self) -> &'static str {
        match self {
            EntityType::Organization => "ORGANIZATION",
            EntityType::Document => "DOCUMENT",
            EntityType::Location => "LOCATION",
            EntityType::Node => "NODE",
            EntityType::Attachment => "ATTACHMENT",
            EntityType::Technician => "TECHNICIAN",
            EntityType::Credential => "CREDENTIAL",
            EntityType::Checklist => "CHECKLIST",
            EntityType::EndUser => "END_USER",
            EntityType::Contact => "CONTACT",
            EntityType::KbDocument => "KB_DOCUMENT",
        }
    }
}

static BY_NAME: Lazy<HashMap<&'static str, EntityType>> =
    Lazy::new(|| EntityType::ALL.iter().map(|entity| (entity.name(), *entity)).collect());

impl FromStr for EntityType {
    type Err = UnknownSymbol;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(name)
            .copied()
            .ok_or_else(|| UnknownSymbol::EntityName(name.to_string()))
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for EntityType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for EntityType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u64::deserialize(deserializer)?;

        let code = u8::try_from(code).map_err(|_| {
            // Way out of range, but it gets the same message as any bad code.
            DeError::custom(UnknownSymbol::EntityCode(code))
        })?;

        EntityType::from_code(code).map_err(DeError::custom)
    }
}
