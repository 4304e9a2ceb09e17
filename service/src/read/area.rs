//! [`Area`]-related read definitions.

use serde::Serialize;

use crate::{
    domain::{area, Area},
    read::Payload,
};

/// Client-facing representation of an [`Area`].
#[derive(Clone, Debug, Serialize)]
pub struct Item {
    /// ID of the [`Area`].
    pub area_id: area::Id,

    /// Name of the [`Area`].
    pub name: area::Name,
}

impl From<Area> for Item {
    fn from(area: Area) -> Self {
        let Area { id, name } = area;
        Self { area_id: id, name }
    }
}

/// List of all [`Area`]s, serialized as `{"areas": [...]}`.
#[derive(Clone, Debug, Serialize)]
pub struct Listing {
    /// Serialized list of [`Item`]s.
    pub areas: Payload,
}
