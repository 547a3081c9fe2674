// ── Profile resolver ──

use crate::error::ResolveError;
use crate::model::{IntendedStateDatabase, VlanMap};

/// Compute the effective intended VLAN set for `device`.
///
/// The result is a fresh map: the assigned profile's entries with the
/// device's overrides applied on top. The database is never modified, so
/// resolving the same device twice yields two independent, equal maps.
pub fn resolve(db: &IntendedStateDatabase, device: &str) -> Result<VlanMap, ResolveError> {
    let assignment = db
        .assignment(device)
        .ok_or_else(|| ResolveError::UnknownDevice {
            device: device.to_owned(),
        })?;

    let base = db
        .profile(&assignment.profile)
        .ok_or_else(|| ResolveError::UnknownProfile {
            device: device.to_owned(),
            profile: assignment.profile.clone(),
        })?;

    Ok(match &assignment.overrides {
        Some(overrides) => base.overlay(overrides),
        None => base.clone(),
    })
}
