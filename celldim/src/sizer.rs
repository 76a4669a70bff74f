use crate::{
    catalog::{CapacityModel, Catalog},
    demand::TrafficDemand,
    error::DimensionError,
    Technology,
};
use hata::{Environment, PathLossModel, DEFAULT_BASE_HEIGHT_M, DEFAULT_MOBILE_HEIGHT_M};

/// Hexagonal cell area factor: area = factor · radius², 3·√3/2.
pub const HEX_AREA_FACTOR: f64 = 2.598_076_211_353_316;

/// Footprint of a single cell.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub radius_km: f64,
    pub area_km2: f64,
}

impl CellGeometry {
    /// Geometry of a hexagonal cell of the given radius.
    pub fn hexagonal(radius_km: f64) -> Result<Self, DimensionError> {
        if !(radius_km > 0.0) || !radius_km.is_finite() {
            return Err(DimensionError::InvalidParameter("radius_km"));
        }
        Ok(Self {
            radius_km,
            area_km2: HEX_AREA_FACTOR * radius_km * radius_km,
        })
    }
}

/// Traffic capacity of one cell, in the technology's native unit.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellCapacity {
    /// Erlang capacity of the trunk group at the blocking target.
    Circuit {
        traffic_channels: usize,
        erlangs: f64,
    },

    /// Shared-channel throughput available in the cell.
    Shared { throughput_mbps: f64 },
}

/// A sized cell: how far it reaches and how many subscribers it carries.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizedCell {
    pub geometry: CellGeometry,
    pub subscribers_per_cell: f64,
    pub capacity: CellCapacity,
}

/// Derives cell radius from the allowable path loss and cell capacity
/// from the technology's traffic model.
#[derive(Debug, Clone, Copy)]
pub struct CellSizer<'a> {
    catalog: &'a Catalog,
    base_height_m: f64,
    mobile_height_m: f64,
}

impl<'a> CellSizer<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            base_height_m: DEFAULT_BASE_HEIGHT_M,
            mobile_height_m: DEFAULT_MOBILE_HEIGHT_M,
        }
    }

    /// Base-station antenna height in meters (defaults to 30).
    #[must_use]
    pub fn base_height(mut self, meters: f64) -> Self {
        self.base_height_m = meters;
        self
    }

    /// Mobile antenna height in meters (defaults to 1.5).
    #[must_use]
    pub fn mobile_height(mut self, meters: f64) -> Self {
        self.mobile_height_m = meters;
        self
    }

    pub fn size(
        &self,
        mapl_db: f64,
        freq_mhz: f64,
        environment: Environment,
        technology: Technology,
        demand: &TrafficDemand,
    ) -> Result<SizedCell, DimensionError> {
        let model = PathLossModel::builder()
            .variant(technology.model_variant())
            .frequency(freq_mhz)
            .environment(environment)
            .base_height(self.base_height_m)
            .mobile_height(self.mobile_height_m)
            .build()?;

        let radius_km = model.max_distance(mapl_db)?;
        let geometry = CellGeometry::hexagonal(radius_km)?;

        if demand.per_subscriber <= 0.0 {
            return Err(DimensionError::CapacityUnbounded);
        }

        let profile = self.catalog.profile(technology);
        let (capacity, subscribers_per_cell) = match profile.capacity {
            CapacityModel::CircuitSwitched { traffic_channels } => {
                let erlangs = erlang::offered_capacity(traffic_channels, demand.qos_target)?;
                (
                    CellCapacity::Circuit {
                        traffic_channels,
                        erlangs,
                    },
                    erlangs / demand.per_subscriber,
                )
            }
            CapacityModel::SharedResource {
                bandwidth_mhz,
                spectral_efficiency,
            } => {
                let throughput_mbps =
                    bandwidth_mhz * spectral_efficiency.for_environment(environment);
                (
                    CellCapacity::Shared { throughput_mbps },
                    throughput_mbps / demand.per_subscriber,
                )
            }
        };

        Ok(SizedCell {
            geometry,
            subscribers_per_cell,
            capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{CellCapacity, CellGeometry, CellSizer, HEX_AREA_FACTOR};
    use crate::{Catalog, DimensionError, Technology, TrafficDemand};
    use assert_approx_eq::assert_approx_eq;
    use hata::Environment;

    #[test]
    fn test_hexagonal_geometry() {
        let geometry = CellGeometry::hexagonal(2.0).unwrap();
        assert_approx_eq!(geometry.area_km2, 4.0 * HEX_AREA_FACTOR, 1e-12);
        assert!(CellGeometry::hexagonal(0.0).is_err());
        assert!(CellGeometry::hexagonal(-1.0).is_err());
    }

    #[test]
    fn test_gsm_urban_cell() {
        let demand = TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap();
        let cell = CellSizer::new(Catalog::builtin())
            .size(134.0, 900.0, Environment::Urban, Technology::Gsm, &demand)
            .unwrap();

        // 134 dB of loss at 900 MHz reaches ~1.64 km in urban clutter.
        assert!((1.0..10.0).contains(&cell.geometry.radius_km));

        // 30 trunks carry ~21.9 Erlangs at 2% blocking.
        match cell.capacity {
            CellCapacity::Circuit {
                traffic_channels,
                erlangs,
            } => {
                assert_eq!(traffic_channels, 30);
                assert!((21.0..23.0).contains(&erlangs));
                assert_approx_eq!(
                    cell.subscribers_per_cell,
                    erlangs / demand.per_subscriber,
                    1e-9
                );
            }
            CellCapacity::Shared { .. } => panic!("GSM sizes as a trunk group"),
        }
    }

    #[test]
    fn test_lte_capacity_follows_environment() {
        let demand = TrafficDemand::new(0.25, 0.02, 200.0).unwrap();
        let sizer = CellSizer::new(Catalog::builtin());
        let urban = sizer
            .size(160.0, 1800.0, Environment::Urban, Technology::Lte, &demand)
            .unwrap();
        let rural = sizer
            .size(160.0, 1800.0, Environment::Rural, Technology::Lte, &demand)
            .unwrap();

        let throughput = |capacity| match capacity {
            CellCapacity::Shared { throughput_mbps } => throughput_mbps,
            CellCapacity::Circuit { .. } => panic!("LTE sizes as a shared channel"),
        };

        // 20 MHz × 1.4 b/s/Hz = 28 Mbit/s urban, × 2.0 = 40 Mbit/s rural.
        assert_approx_eq!(throughput(urban.capacity), 28.0, 1e-9);
        assert_approx_eq!(throughput(rural.capacity), 40.0, 1e-9);
        assert!(rural.geometry.radius_km > urban.geometry.radius_km);
    }

    #[test]
    fn test_zero_demand_is_unbounded() {
        let demand = TrafficDemand::new(0.0, 0.02, 1_000.0).unwrap();
        let res = CellSizer::new(Catalog::builtin()).size(
            134.0,
            900.0,
            Environment::Urban,
            Technology::Gsm,
            &demand,
        );
        assert!(matches!(res, Err(DimensionError::CapacityUnbounded)));
    }

    #[test]
    fn test_taller_mast_reaches_further() {
        let demand = TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap();
        let short = CellSizer::new(Catalog::builtin())
            .size(134.0, 900.0, Environment::Urban, Technology::Gsm, &demand)
            .unwrap();
        let tall = CellSizer::new(Catalog::builtin())
            .base_height(60.0)
            .size(134.0, 900.0, Environment::Urban, Technology::Gsm, &demand)
            .unwrap();
        assert!(tall.geometry.radius_km > short.geometry.radius_km);
    }
}
