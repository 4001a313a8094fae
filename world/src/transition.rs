//! Arrival resolution for the map-transition protocol.

use glam::Vec2;
use medieval_rpg_core::{MapDescriptor, TeleportZone};

use crate::WorldConfig;

/// Resolves where the player lands after stepping through `zone`.
///
/// Returns `None` when the destination offers no arrival point, in which
/// case the player keeps the current position.
pub(crate) fn arrival_point(
    config: &WorldConfig,
    source_map: &str,
    zone: &TeleportZone,
    destination: &MapDescriptor,
) -> Option<Vec2> {
    if let Some(point) = zone.explicit_arrival() {
        return Some(point);
    }

    arrival_index(config, source_map, zone, destination)
        .and_then(|index| destination.teleports.get(index))
        .map(|arrival| arrival.area.origin())
}

/// Picks the destination teleport the player arrives on.
pub(crate) fn arrival_index(
    config: &WorldConfig,
    source_map: &str,
    zone: &TeleportZone,
    destination: &MapDescriptor,
) -> Option<usize> {
    let teleports = &destination.teleports;
    if teleports.is_empty() {
        return None;
    }

    if source_map.eq_ignore_ascii_case(&config.hub_map)
        && destination.name.eq_ignore_ascii_case(&config.main_map)
        && teleports.len() >= 2
    {
        return Some(1);
    }

    let paired = teleports
        .iter()
        .position(|candidate| candidate.area == zone.area)
        .map_or(0, |index| (index + 1) % teleports.len());
    Some(paired)
}
