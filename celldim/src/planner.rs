use crate::{
    catalog::Catalog,
    demand::TrafficDemand,
    dimension::{dimension, DimensioningResult, ReusePlan},
    error::DimensionError,
    sizer::{CellSizer, SizedCell},
    Technology,
};
use hata::{Environment, DEFAULT_BASE_HEIGHT_M, DEFAULT_MOBILE_HEIGHT_M};
use linkbudget::LinkBudget;
use log::{debug, warn};

/// Default sector antenna gain at the base station, in dBi.
pub const DEFAULT_TX_ANTENNA_GAIN_DBI: f64 = 18.0;

/// A single dimensioning request.
///
/// Radio parameters left unset fall back to the technology's catalog
/// profile; antenna heights fall back to the model defaults.
#[derive(Debug, Clone)]
pub struct Request {
    pub technology: Technology,
    pub environment: Environment,
    pub surface_km2: f64,
    pub demand: TrafficDemand,
    pub frequency_mhz: Option<f64>,
    pub tx_power_dbm: Option<f64>,
    pub tx_antenna_gain_dbi: Option<f64>,
    pub tx_cable_loss_db: Option<f64>,
    pub rx_antenna_gain_dbi: Option<f64>,
    pub rx_cable_loss_db: Option<f64>,
    pub rx_sensitivity_dbm: Option<f64>,
    pub fade_margin_db: Option<f64>,
    pub interference_margin_db: Option<f64>,
    pub body_loss_db: Option<f64>,
    pub base_height_m: Option<f64>,
    pub mobile_height_m: Option<f64>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder {
            technology: None,
            environment: None,
            surface_km2: None,
            demand: None,
            frequency_mhz: None,
            tx_power_dbm: None,
            tx_antenna_gain_dbi: None,
            tx_cable_loss_db: None,
            rx_antenna_gain_dbi: None,
            rx_cable_loss_db: None,
            rx_sensitivity_dbm: None,
            fade_margin_db: None,
            interference_margin_db: None,
            body_loss_db: None,
            base_height_m: None,
            mobile_height_m: None,
        }
    }
}

pub struct RequestBuilder {
    /// Radio access technology (required).
    technology: Option<Technology>,

    /// Morphology class (required).
    environment: Option<Environment>,

    /// Surface of the deployment area in km² (required).
    surface_km2: Option<f64>,

    /// Offered traffic and QoS target (required).
    demand: Option<TrafficDemand>,

    /// Carrier frequency in MHz (defaults to the technology's first band).
    frequency_mhz: Option<f64>,

    tx_power_dbm: Option<f64>,
    tx_antenna_gain_dbi: Option<f64>,
    tx_cable_loss_db: Option<f64>,
    rx_antenna_gain_dbi: Option<f64>,
    rx_cable_loss_db: Option<f64>,
    rx_sensitivity_dbm: Option<f64>,
    fade_margin_db: Option<f64>,
    interference_margin_db: Option<f64>,
    body_loss_db: Option<f64>,
    base_height_m: Option<f64>,
    mobile_height_m: Option<f64>,
}

impl RequestBuilder {
    /// Radio access technology (required).
    #[must_use]
    pub fn technology(mut self, technology: Technology) -> Self {
        self.technology = Some(technology);
        self
    }

    /// Morphology class (required).
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Surface of the deployment area in km² (required).
    #[must_use]
    pub fn surface(mut self, km2: f64) -> Self {
        self.surface_km2 = Some(km2);
        self
    }

    /// Offered traffic and QoS target (required).
    #[must_use]
    pub fn demand(mut self, demand: TrafficDemand) -> Self {
        self.demand = Some(demand);
        self
    }

    /// Carrier frequency in MHz (defaults to the technology's first band).
    #[must_use]
    pub fn frequency(mut self, mhz: f64) -> Self {
        self.frequency_mhz = Some(mhz);
        self
    }

    /// Transmit power override in dBm.
    #[must_use]
    pub fn tx_power(mut self, dbm: f64) -> Self {
        self.tx_power_dbm = Some(dbm);
        self
    }

    /// Transmit antenna gain override in dBi.
    #[must_use]
    pub fn tx_antenna_gain(mut self, dbi: f64) -> Self {
        self.tx_antenna_gain_dbi = Some(dbi);
        self
    }

    /// Transmit cable and connector loss override in dB.
    #[must_use]
    pub fn tx_cable_loss(mut self, db: f64) -> Self {
        self.tx_cable_loss_db = Some(db);
        self
    }

    /// Receive antenna gain override in dBi.
    #[must_use]
    pub fn rx_antenna_gain(mut self, dbi: f64) -> Self {
        self.rx_antenna_gain_dbi = Some(dbi);
        self
    }

    /// Receive cable and connector loss override in dB.
    #[must_use]
    pub fn rx_cable_loss(mut self, db: f64) -> Self {
        self.rx_cable_loss_db = Some(db);
        self
    }

    /// Receiver sensitivity override in dBm.
    #[must_use]
    pub fn rx_sensitivity(mut self, dbm: f64) -> Self {
        self.rx_sensitivity_dbm = Some(dbm);
        self
    }

    /// Slow-fading margin override in dB.
    #[must_use]
    pub fn fade_margin(mut self, db: f64) -> Self {
        self.fade_margin_db = Some(db);
        self
    }

    /// Interference margin override in dB.
    #[must_use]
    pub fn interference_margin(mut self, db: f64) -> Self {
        self.interference_margin_db = Some(db);
        self
    }

    /// Body loss override in dB.
    #[must_use]
    pub fn body_loss(mut self, db: f64) -> Self {
        self.body_loss_db = Some(db);
        self
    }

    /// Base-station antenna height in meters (defaults to 30).
    #[must_use]
    pub fn base_height(mut self, meters: f64) -> Self {
        self.base_height_m = Some(meters);
        self
    }

    /// Mobile antenna height in meters (defaults to 1.5).
    #[must_use]
    pub fn mobile_height(mut self, meters: f64) -> Self {
        self.mobile_height_m = Some(meters);
        self
    }

    pub fn build(&self) -> Result<Request, DimensionError> {
        let technology = self
            .technology
            .ok_or(DimensionError::InvalidParameter("technology"))?;
        let environment = self
            .environment
            .ok_or(DimensionError::InvalidParameter("environment"))?;
        let surface_km2 = self
            .surface_km2
            .ok_or(DimensionError::InvalidParameter("surface_km2"))?;
        let demand = self
            .demand
            .ok_or(DimensionError::InvalidParameter("demand"))?;

        if !(surface_km2 > 0.0) || !surface_km2.is_finite() {
            return Err(DimensionError::InvalidParameter("surface_km2"));
        }
        if let Some(freq) = self.frequency_mhz {
            if !(freq > 0.0) || !freq.is_finite() {
                return Err(DimensionError::InvalidParameter("frequency_mhz"));
            }
        }

        Ok(Request {
            technology,
            environment,
            surface_km2,
            demand,
            frequency_mhz: self.frequency_mhz,
            tx_power_dbm: self.tx_power_dbm,
            tx_antenna_gain_dbi: self.tx_antenna_gain_dbi,
            tx_cable_loss_db: self.tx_cable_loss_db,
            rx_antenna_gain_dbi: self.rx_antenna_gain_dbi,
            rx_cable_loss_db: self.rx_cable_loss_db,
            rx_sensitivity_dbm: self.rx_sensitivity_dbm,
            fade_margin_db: self.fade_margin_db,
            interference_margin_db: self.interference_margin_db,
            body_loss_db: self.body_loss_db,
            base_height_m: self.base_height_m,
            mobile_height_m: self.mobile_height_m,
        })
    }
}

/// Everything a report renderer needs: the resolved inputs and each
/// intermediate result of the pipeline.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct DimensioningReport {
    pub technology: Technology,
    pub environment: Environment,
    pub frequency_mhz: f64,
    pub surface_km2: f64,
    pub demand: TrafficDemand,
    pub link_budget: LinkBudget,
    pub cell: SizedCell,
    pub result: DimensioningResult,
    pub reuse: ReusePlan,
}

/// Runs the full pipeline: link budget, cell sizing, site count.
///
/// Stateless; concurrent plans over the same catalog need no
/// coordination.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    catalog: &'a Catalog,
}

impl<'a> Planner<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn plan(&self, request: &Request) -> Result<DimensioningReport, DimensionError> {
        let now = std::time::Instant::now();
        let profile = self.catalog.profile(request.technology);

        let frequency_mhz = request
            .frequency_mhz
            .unwrap_or_else(|| self.catalog.default_frequency(request.technology));
        if !self.catalog.contains_frequency(request.technology, frequency_mhz) {
            warn!(
                "{frequency_mhz} MHz is not in the {} band plan",
                request.technology
            );
        }

        let link_budget = LinkBudget::builder()
            .tx_power(request.tx_power_dbm.unwrap_or(profile.tx_power_dbm))
            .tx_antenna_gain(
                request
                    .tx_antenna_gain_dbi
                    .unwrap_or(DEFAULT_TX_ANTENNA_GAIN_DBI),
            )
            .tx_cable_loss(request.tx_cable_loss_db.unwrap_or(0.0))
            .rx_antenna_gain(request.rx_antenna_gain_dbi.unwrap_or(0.0))
            .rx_cable_loss(request.rx_cable_loss_db.unwrap_or(0.0))
            .rx_sensitivity(
                request
                    .rx_sensitivity_dbm
                    .unwrap_or(profile.rx_sensitivity_dbm),
            )
            .fade_margin(request.fade_margin_db.unwrap_or(profile.fade_margin_db))
            .interference_margin(
                request
                    .interference_margin_db
                    .unwrap_or(profile.interference_margin_db),
            )
            .body_loss(request.body_loss_db.unwrap_or(profile.body_loss_db))
            .build()?;

        let cell = CellSizer::new(self.catalog)
            .base_height(request.base_height_m.unwrap_or(DEFAULT_BASE_HEIGHT_M))
            .mobile_height(request.mobile_height_m.unwrap_or(DEFAULT_MOBILE_HEIGHT_M))
            .size(
                link_budget.mapl_db,
                frequency_mhz,
                request.environment,
                request.technology,
                &request.demand,
            )?;

        let result = dimension(
            request.surface_km2,
            &cell.geometry,
            cell.subscribers_per_cell,
            request.demand.subscriber_density,
        )?;
        let reuse = ReusePlan::select(
            request.technology,
            request.demand.qos_target,
            cell.geometry.radius_km,
        );

        debug!(
            "dimensioned {} over {} km²: {} sites ({}-bound), exec: {:?}",
            request.technology,
            request.surface_km2,
            result.base_stations,
            result.binding_constraint,
            now.elapsed()
        );

        Ok(DimensioningReport {
            technology: request.technology,
            environment: request.environment,
            frequency_mhz,
            surface_km2: request.surface_km2,
            demand: request.demand,
            link_budget,
            cell,
            result,
            reuse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Planner, Request};
    use crate::{BindingConstraint, Catalog, DimensionError, Technology, TrafficDemand};
    use hata::Environment;
    use linkbudget::LinkBudgetError;

    fn gsm_request() -> Request {
        Request::builder()
            .technology(Technology::Gsm)
            .environment(Environment::Urban)
            .surface(100.0)
            .demand(TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_gsm_urban_plan() {
        let planner = Planner::new(Catalog::builtin());
        let report = planner.plan(&gsm_request()).unwrap();

        // Catalog defaults: 43 dBm + 18 dBi, -104 dBm, 10 + 3 dB margins.
        assert_eq!(report.frequency_mhz, 900.0);
        assert_eq!(report.link_budget.eirp_dbm, 61.0);
        assert_eq!(report.link_budget.mapl_db, 152.0);
        assert!(report.cell.geometry.radius_km > 1.0);
        assert!(report.result.base_stations >= 1);
        assert_eq!(
            report.result.base_stations,
            report
                .result
                .cells_by_coverage
                .max(report.result.cells_by_capacity)
        );
    }

    #[test]
    fn test_dense_demand_binds_on_capacity() {
        let request = Request::builder()
            .technology(Technology::Gsm)
            .environment(Environment::Urban)
            .surface(100.0)
            .demand(TrafficDemand::new(0.025, 0.02, 50_000.0).unwrap())
            .build()
            .unwrap();
        let report = Planner::new(Catalog::builtin()).plan(&request).unwrap();
        assert_eq!(
            report.result.binding_constraint,
            BindingConstraint::Capacity
        );
        assert!(report.result.cells_by_capacity > report.result.cells_by_coverage);
    }

    #[test]
    fn test_margin_overrides_make_link_infeasible() {
        let request = Request::builder()
            .technology(Technology::Gsm)
            .environment(Environment::Urban)
            .surface(100.0)
            .demand(TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap())
            .tx_antenna_gain(0.0)
            .rx_sensitivity(-20.0)
            .fade_margin(70.0)
            .build();
        let res = Planner::new(Catalog::builtin()).plan(&request.unwrap());
        assert!(matches!(
            res,
            Err(DimensionError::LinkBudget(
                LinkBudgetError::Infeasible { .. }
            ))
        ));
    }

    #[test]
    fn test_missing_surface_rejected() {
        let res = Request::builder()
            .technology(Technology::Gsm)
            .environment(Environment::Urban)
            .demand(TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap())
            .build();
        assert!(matches!(
            res,
            Err(DimensionError::InvalidParameter("surface_km2"))
        ));
    }

    #[test]
    fn test_umts_plan_uses_cost231() {
        let request = Request::builder()
            .technology(Technology::Umts)
            .environment(Environment::Suburban)
            .surface(250.0)
            .demand(TrafficDemand::new(0.1, 0.02, 300.0).unwrap())
            .build()
            .unwrap();
        let report = Planner::new(Catalog::builtin()).plan(&request).unwrap();
        assert_eq!(report.frequency_mhz, 2100.0);
        assert_eq!(report.reuse.cluster_size, 1);
        assert!(report.cell.subscribers_per_cell > 0.0);
    }
}
