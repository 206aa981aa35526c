//! Fixed observation shape, derived once from the static rule tables.

use stead_core::{RuleSet, TerrainKind};

/// The shape contract for every observation an encoder instance
/// produces.
///
/// Channel counts come from the rule tables, never from snapshot
/// content, so they cannot vary within an episode or across resets of
/// the same configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObsLayout {
    width: u32,
    height: u32,
    building_channels: usize,
    resource_channels: usize,
}

impl ObsLayout {
    /// Derive the layout for a `width × height` map under `rules`.
    pub fn new(width: u32, height: u32, rules: &RuleSet) -> Self {
        Self {
            width,
            height,
            building_channels: rules.building_count(),
            resource_channels: rules.resource_count(),
        }
    }

    /// Map width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Map height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cells per plane.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Terrain one-hot channel count (fixed across configurations).
    pub fn terrain_channels(&self) -> usize {
        TerrainKind::COUNT
    }

    /// Building one-hot channel count (the empty channel is dropped).
    pub fn building_channels(&self) -> usize {
        self.building_channels
    }

    /// Length of the relative-income vector.
    pub fn resource_channels(&self) -> usize {
        self.resource_channels
    }
}
