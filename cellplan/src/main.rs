mod options;

use anyhow::{anyhow, Error as AnyError};
use celldim::{
    erlang,
    hata::PathLossModel,
    Catalog, DimensioningReport, Planner, Request, Technology, TrafficDemand,
};
use clap::Parser;
use options::{Cli, Command as CliCmd};
use std::io::Write;
use textplots::{Chart, Plot, Shape};

fn main() -> Result<(), AnyError> {
    let cli = Cli::parse();
    env_logger::init();

    let catalog = Catalog::builtin();

    match cli.cmd {
        CliCmd::Bands => {
            print_bands(catalog, cli.technology);
            return Ok(());
        }
        CliCmd::Trunks { offered_erlangs } => {
            let trunks = erlang::trunks_for(offered_erlangs, cli.blocking)?;
            println!(
                "{trunks} trunks carry {offered_erlangs} Erlang at {} blocking",
                cli.blocking
            );
            return Ok(());
        }
        _ => {}
    }

    let surface = cli
        .surface
        .ok_or_else(|| anyhow!("--surface is required to dimension a network"))?;
    let per_subscriber = cli.per_subscriber.unwrap_or(match cli.technology {
        Technology::Gsm => 0.025,
        Technology::Umts => 0.1,
        Technology::Lte => 0.25,
    });
    let demand = TrafficDemand::new(per_subscriber, cli.blocking, cli.density)?;

    let mut builder = Request::builder()
        .technology(cli.technology)
        .environment(cli.environment)
        .surface(surface)
        .demand(demand);
    if let Some(mhz) = cli.frequency {
        builder = builder.frequency(mhz);
    }
    if let Some(dbm) = cli.tx_power {
        builder = builder.tx_power(dbm);
    }
    if let Some(dbi) = cli.tx_gain {
        builder = builder.tx_antenna_gain(dbi);
    }
    if let Some(db) = cli.tx_cable_loss {
        builder = builder.tx_cable_loss(db);
    }
    if let Some(dbi) = cli.rx_gain {
        builder = builder.rx_antenna_gain(dbi);
    }
    if let Some(db) = cli.rx_cable_loss {
        builder = builder.rx_cable_loss(db);
    }
    if let Some(dbm) = cli.rx_sensitivity {
        builder = builder.rx_sensitivity(dbm);
    }
    if let Some(db) = cli.fade_margin {
        builder = builder.fade_margin(db);
    }
    if let Some(db) = cli.interference_margin {
        builder = builder.interference_margin(db);
    }
    if let Some(db) = cli.body_loss {
        builder = builder.body_loss(db);
    }
    if let Some(meters) = cli.base_height {
        builder = builder.base_height(meters);
    }
    if let Some(meters) = cli.mobile_height {
        builder = builder.mobile_height(meters);
    }
    let request = builder.build()?;
    let report = Planner::new(catalog).plan(&request)?;

    match cli.cmd {
        CliCmd::Report => print_report(&report),
        CliCmd::Csv => print_csv(&report)?,
        CliCmd::Json => print_json(&report)?,
        CliCmd::Plot => plot_ascii(&report, &request)?,
        CliCmd::Bands | CliCmd::Trunks { .. } => unreachable!("handled above"),
    }
    Ok(())
}

fn print_bands(catalog: &Catalog, technology: Technology) {
    for band in catalog.frequencies(technology) {
        println!("{technology} {}: {} MHz", band.label, band.frequency_mhz);
    }
}

fn print_report(report: &DimensioningReport) {
    println!(
        "{} / {} / {} MHz over {} km²",
        report.technology, report.environment, report.frequency_mhz, report.surface_km2
    );
    for row in report.rows() {
        println!("{:<24} {:>12.3} {}", row.label, row.value, row.unit);
    }
    println!(
        "{:<24} {:>12}",
        "binding constraint", report.result.binding_constraint
    );
}

fn print_csv(report: &DimensioningReport) -> Result<(), AnyError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "label,value,unit")?;
    for row in report.rows() {
        writeln!(stdout, "{},{},{}", row.label, row.value, row.unit)?;
    }
    writeln!(
        stdout,
        "binding constraint,{},",
        report.result.binding_constraint
    )?;
    Ok(())
}

fn print_json(report: &DimensioningReport) -> Result<(), AnyError> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

/// Path loss over distance out to just past the cell edge, with the
/// MAPL ceiling overlaid.
fn plot_ascii(report: &DimensioningReport, request: &Request) -> Result<(), AnyError> {
    let model = PathLossModel::builder()
        .variant(report.technology.model_variant())
        .frequency(report.frequency_mhz)
        .environment(report.environment)
        .base_height(request.base_height_m.unwrap_or(celldim::hata::DEFAULT_BASE_HEIGHT_M))
        .mobile_height(request.mobile_height_m.unwrap_or(celldim::hata::DEFAULT_MOBILE_HEIGHT_M))
        .build()?;

    let radius_km = report.cell.geometry.radius_km;
    let x_max_km = radius_km * 1.5;
    let steps = 200;
    let loss_curve: Vec<(f32, f32)> = (1..=steps)
        .map(|n| {
            let d = x_max_km * f64::from(n) / f64::from(steps);
            // Unwrap is fine as every sampled distance is positive.
            (d as f32, model.path_loss(d).unwrap() as f32)
        })
        .collect();
    let mapl = report.link_budget.mapl_db as f32;
    let ceiling = [(loss_curve[0].0, mapl), (x_max_km as f32, mapl)];

    println!(
        "path loss (dB) over distance (km); cell edge at {radius_km:.2} km"
    );
    Chart::new(300, 150, 0.0, x_max_km as f32)
        .lineplot(&Shape::Lines(&loss_curve))
        .lineplot(&Shape::Lines(&ceiling))
        .display();
    Ok(())
}
