use crate::{error::DimensionError, sizer::CellGeometry, Technology};

/// Which of the two cell counts forced the deployment density.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingConstraint {
    Coverage,
    Capacity,
}

impl std::fmt::Display for BindingConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindingConstraint::Coverage => write!(f, "coverage"),
            BindingConstraint::Capacity => write!(f, "capacity"),
        }
    }
}

/// Site count for a surface, with the per-constraint breakdown.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensioningResult {
    pub cells_by_coverage: u64,
    pub cells_by_capacity: u64,
    pub binding_constraint: BindingConstraint,
    pub base_stations: u64,
    pub total_coverage_km2: f64,
    pub total_subscriber_capacity: f64,
}

/// Combines the coverage-limited and capacity-limited cell counts and
/// keeps whichever binds.
///
/// Pure arithmetic; every failure is a terminal input error.
pub fn dimension(
    total_surface_km2: f64,
    geometry: &CellGeometry,
    subscribers_per_cell: f64,
    subscriber_density: f64,
) -> Result<DimensioningResult, DimensionError> {
    if !(total_surface_km2 > 0.0) || !total_surface_km2.is_finite() {
        return Err(DimensionError::InvalidParameter("total_surface_km2"));
    }
    if !(geometry.area_km2 > 0.0) {
        return Err(DimensionError::InvalidParameter("cell_area_km2"));
    }
    if !(subscribers_per_cell > 0.0) {
        return Err(DimensionError::InvalidParameter("capacity_per_cell"));
    }
    if !subscriber_density.is_finite() || subscriber_density < 0.0 {
        return Err(DimensionError::InvalidParameter("subscriber_density"));
    }

    let cells_by_coverage = (total_surface_km2 / geometry.area_km2).ceil() as u64;
    let total_subscribers = total_surface_km2 * subscriber_density;
    let cells_by_capacity = (total_subscribers / subscribers_per_cell).ceil() as u64;

    // Ties read as coverage-limited.
    let binding_constraint = if cells_by_capacity > cells_by_coverage {
        BindingConstraint::Capacity
    } else {
        BindingConstraint::Coverage
    };
    let base_stations = cells_by_coverage.max(cells_by_capacity);

    Ok(DimensioningResult {
        cells_by_coverage,
        cells_by_capacity,
        binding_constraint,
        base_stations,
        total_coverage_km2: base_stations as f64 * geometry.area_km2,
        total_subscriber_capacity: base_stations as f64 * subscribers_per_cell,
    })
}

/// Frequency reuse pattern for the deployment.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReusePlan {
    pub cluster_size: u32,
    pub reuse_distance_km: f64,
}

impl ReusePlan {
    /// GSM holds a 7-cell cluster under tight blocking targets and
    /// relaxes to 4 otherwise; CDMA/OFDMA technologies reuse every cell.
    pub fn select(technology: Technology, qos_target: f64, radius_km: f64) -> Self {
        let cluster_size = match technology {
            Technology::Gsm => {
                if qos_target < 0.02 {
                    7
                } else {
                    4
                }
            }
            Technology::Umts | Technology::Lte => 1,
        };
        Self {
            cluster_size,
            reuse_distance_km: radius_km * (3.0 * f64::from(cluster_size)).sqrt(),
        }
    }
}
