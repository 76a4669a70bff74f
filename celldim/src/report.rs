use crate::{planner::DimensioningReport, sizer::CellCapacity};

/// One labeled, unit-tagged value of an exported result table.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl DimensioningReport {
    /// Flattens the report into rows for tabular export.
    ///
    /// Rows keep the waterfall order of the link budget, then the cell
    /// and site figures, so a renderer can chart them as-is.
    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = vec![
            row("frequency", self.frequency_mhz, "MHz"),
            row("surface", self.surface_km2, "km²"),
            row("tx power", self.link_budget.tx_power_dbm, "dBm"),
            row("tx antenna gain", self.link_budget.tx_antenna_gain_dbi, "dBi"),
            row("tx cable loss", self.link_budget.tx_cable_loss_db, "dB"),
            row("eirp", self.link_budget.eirp_dbm, "dBm"),
            row("rx antenna gain", self.link_budget.rx_antenna_gain_dbi, "dBi"),
            row("rx cable loss", self.link_budget.rx_cable_loss_db, "dB"),
            row("rx sensitivity", self.link_budget.rx_sensitivity_dbm, "dBm"),
            row("fade margin", self.link_budget.fade_margin_db, "dB"),
            row(
                "interference margin",
                self.link_budget.interference_margin_db,
                "dB",
            ),
            row("body loss", self.link_budget.body_loss_db, "dB"),
            row("max allowable path loss", self.link_budget.mapl_db, "dB"),
            row("cell radius", self.cell.geometry.radius_km, "km"),
            row("cell area", self.cell.geometry.area_km2, "km²"),
        ];

        match self.cell.capacity {
            CellCapacity::Circuit {
                traffic_channels,
                erlangs,
            } => {
                rows.push(row("traffic channels", traffic_channels as f64, ""));
                rows.push(row("cell traffic capacity", erlangs, "Erlang"));
            }
            CellCapacity::Shared { throughput_mbps } => {
                rows.push(row("cell throughput", throughput_mbps, "Mbit/s"));
            }
        }

        rows.extend([
            row("capacity per cell", self.cell.subscribers_per_cell, "subscribers"),
            row("cells by coverage", self.result.cells_by_coverage as f64, ""),
            row("cells by capacity", self.result.cells_by_capacity as f64, ""),
            row("base stations", self.result.base_stations as f64, ""),
            row("total coverage", self.result.total_coverage_km2, "km²"),
            row(
                "total capacity",
                self.result.total_subscriber_capacity,
                "subscribers",
            ),
            row("cluster size", f64::from(self.reuse.cluster_size), ""),
            row("reuse distance", self.reuse.reuse_distance_km, "km"),
        ]);
        rows
    }
}

fn row(label: &'static str, value: f64, unit: &'static str) -> ReportRow {
    ReportRow { label, value, unit }
}

#[cfg(test)]
mod tests {
    use crate::{Catalog, Planner, Request, Technology, TrafficDemand};
    use hata::Environment;

    #[test]
    fn test_rows_cover_the_pipeline() {
        let request = Request::builder()
            .technology(Technology::Gsm)
            .environment(Environment::Urban)
            .surface(100.0)
            .demand(TrafficDemand::new(0.025, 0.02, 1_000.0).unwrap())
            .build()
            .unwrap();
        let report = Planner::new(Catalog::builtin()).plan(&request).unwrap();
        let rows = report.rows();

        let value = |label: &str| {
            rows.iter()
                .find(|row| row.label == label)
                .map(|row| row.value)
                .unwrap()
        };
        assert_eq!(value("max allowable path loss"), report.link_budget.mapl_db);
        assert_eq!(value("base stations"), report.result.base_stations as f64);
        assert_eq!(value("traffic channels"), 30.0);

        // Labels are unique, so CSV consumers can key on them.
        let mut labels: Vec<_> = rows.iter().map(|row| row.label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), rows.len());
    }
}
