//! # Land Commands

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use finca_core::{Farm, LandParcel, LandUsage, ParcelDraft};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckParcelRequest {
    pub farm: Farm,
    #[serde(default)]
    pub parcels: Vec<LandParcel>,
    pub draft: ParcelDraft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandUsageRequest {
    pub farm: Farm,
    #[serde(default)]
    pub parcels: Vec<LandParcel>,
}

/// Checks a parcel draft and returns the farm's usage as it would be after
/// saving it.
pub fn check_parcel(request: CheckParcelRequest) -> Result<LandUsage, ApiError> {
    let CheckParcelRequest { farm, parcels, draft } = request;
    debug!(farm_id = farm.id, parcel_id = ?draft.id, area = %draft.area_ha, "Checking parcel draft");

    finca_core::validate_parcel(&farm, &parcels, &draft)?;

    // Unsaved drafts have no id yet; 0 only matters for counting.
    let projected: Vec<LandParcel> = parcels
        .into_iter()
        .filter(|p| draft.id != Some(p.id))
        .chain(std::iter::once(LandParcel {
            id: draft.id.unwrap_or(0),
            farm_id: draft.farm_id,
            area_ha: draft.area_ha,
        }))
        .collect();

    let usage = finca_core::land_usage(&farm, &projected)?;
    info!(
        farm_id = farm.id,
        used = %usage.used_ha,
        available = %usage.available_ha,
        "Parcel draft accepted"
    );
    Ok(usage)
}

/// Summarizes the stored parcels of a farm.
pub fn land_usage(request: LandUsageRequest) -> Result<LandUsage, ApiError> {
    let usage = finca_core::land_usage(&request.farm, &request.parcels)?;
    if usage.is_over_allocated() {
        warn!(
            farm_id = usage.farm_id,
            used = %usage.used_ha,
            total = %usage.total_ha,
            "Farm is already over-allocated"
        );
    }
    Ok(usage)
}
