//! # Cellular Network Dimensioning
//!
//! `celldim` turns a coverage area, a radio technology and traffic
//! targets into a deployment: link budget, maximum cell radius under an
//! empirical propagation model, and the site count that satisfies both
//! the coverage and the capacity constraint.
//!
//! Every computation is a pure function of its request; nothing is
//! cached or shared, so concurrent requests need no coordination.

mod catalog;
mod demand;
mod dimension;
mod error;
mod planner;
mod report;
mod sizer;

pub use {
    crate::{
        catalog::{
            Band, CapacityModel, Catalog, SpectralEfficiency, Technology, TechnologyProfile,
        },
        demand::TrafficDemand,
        dimension::{dimension, BindingConstraint, DimensioningResult, ReusePlan},
        error::DimensionError,
        planner::{
            DimensioningReport, Planner, Request, RequestBuilder, DEFAULT_TX_ANTENNA_GAIN_DBI,
        },
        report::ReportRow,
        sizer::{CellCapacity, CellGeometry, CellSizer, SizedCell, HEX_AREA_FACTOR},
    },
    erlang, hata, linkbudget,
};
