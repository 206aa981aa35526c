//! Static rule tables: resource and building definitions.
//!
//! A [`RuleSet`] is fixed for the lifetime of an environment instance.
//! Channel counts in the observation layout derive from these tables,
//! never from snapshot content, so a rule-table mismatch is a
//! construction-time error.

use crate::error::RulesError;
use crate::id::{BuildingId, ResourceId};
use crate::terrain::{TerrainKind, TerrainMask};

/// Definition of one resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceDef {
    /// Display name.
    pub name: String,
}

/// Definition of one building type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildingDef {
    /// Display name.
    pub name: String,
    /// Terrain categories this building may be placed on.
    pub allowed: TerrainMask,
    /// Whether this type participates in the road network.
    pub road: bool,
}

/// The static rule tables for one environment configuration.
///
/// Validated on construction: both tables non-empty, every definition
/// named, every building placeable somewhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSet {
    resources: Vec<ResourceDef>,
    buildings: Vec<BuildingDef>,
}

impl RuleSet {
    /// Build and validate a rule set.
    pub fn new(
        resources: Vec<ResourceDef>,
        buildings: Vec<BuildingDef>,
    ) -> Result<Self, RulesError> {
        if resources.is_empty() {
            return Err(RulesError::NoResources);
        }
        if buildings.is_empty() {
            return Err(RulesError::NoBuildings);
        }
        for def in &resources {
            if def.name.is_empty() {
                return Err(RulesError::UnnamedDefinition);
            }
        }
        for def in &buildings {
            if def.name.is_empty() {
                return Err(RulesError::UnnamedDefinition);
            }
            if def.allowed.is_empty() {
                return Err(RulesError::EmptyTerrainMask {
                    building: def.name.clone(),
                });
            }
        }
        Ok(Self {
            resources,
            buildings,
        })
    }

    /// The standard tables: gold/wood/stone, and a road plus three
    /// producer buildings.
    pub fn standard() -> Self {
        let resources = vec![
            ResourceDef {
                name: "gold".into(),
            },
            ResourceDef {
                name: "wood".into(),
            },
            ResourceDef {
                name: "stone".into(),
            },
        ];
        let buildings = vec![
            BuildingDef {
                name: "road".into(),
                allowed: TerrainKind::Land.mask()
                    | TerrainKind::Coast.mask()
                    | TerrainKind::Forest.mask(),
                road: true,
            },
            BuildingDef {
                name: "cabin".into(),
                allowed: TerrainKind::Forest.mask(),
                road: false,
            },
            BuildingDef {
                name: "quarry".into(),
                allowed: TerrainKind::Mountain.mask() | TerrainKind::Peak.mask(),
                road: false,
            },
            BuildingDef {
                name: "market".into(),
                allowed: TerrainKind::Land.mask() | TerrainKind::Coast.mask(),
                road: false,
            },
        ];
        // Tables above satisfy every validation rule.
        Self {
            resources,
            buildings,
        }
    }

    /// The resource table.
    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }

    /// The building table.
    pub fn buildings(&self) -> &[BuildingDef] {
        &self.buildings
    }

    /// Number of resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of building types.
    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// The definition for `id`, or `None` for an unknown id.
    pub fn building(&self, id: BuildingId) -> Option<&BuildingDef> {
        self.buildings.get(id.0 as usize)
    }

    /// The definition for `id`, or `None` for an unknown id.
    pub fn resource(&self, id: ResourceId) -> Option<&ResourceDef> {
        self.resources.get(id.0 as usize)
    }

    /// Whether `id` names a road-type building. Unknown ids are not roads.
    pub fn is_road(&self, id: BuildingId) -> bool {
        self.building(id).is_some_and(|def| def.road)
    }

    /// The first road-type building id, if the tables define one.
    pub fn road_id(&self) -> Option<BuildingId> {
        self.buildings
            .iter()
            .position(|def| def.road)
            .map(|i| BuildingId(i as u32))
    }
}
