use celldim::{hata::Environment, Technology};
use clap::{Parser, Subcommand};

/// Dimension a cellular radio network over a service area.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Radio access technology: gsm, umts or lte.
    #[arg(short, long)]
    pub technology: Technology,

    /// Morphology class: urban, suburban or rural.
    #[arg(short, long, default_value = "urban")]
    pub environment: Environment,

    /// Carrier frequency in MHz (defaults to the technology's first
    /// band; see `bands`).
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Surface of the deployment area, km².
    #[arg(short, long)]
    pub surface: Option<f64>,

    /// Subscribers per km².
    #[arg(short, long, default_value_t = 100.0)]
    pub density: f64,

    /// Offered traffic per subscriber: Erlangs for GSM, Mbit/s
    /// otherwise (defaults per technology).
    #[arg(long)]
    pub per_subscriber: Option<f64>,

    /// Blocking probability target, exclusive on both bounds.
    #[arg(short, long, default_value_t = 0.02)]
    pub blocking: f64,

    /// Transmit power override, dBm.
    #[arg(long)]
    pub tx_power: Option<f64>,

    /// Transmit antenna gain override, dBi.
    #[arg(long)]
    pub tx_gain: Option<f64>,

    /// Transmit cable and connector loss override, dB.
    #[arg(long)]
    pub tx_cable_loss: Option<f64>,

    /// Receive antenna gain override, dBi.
    #[arg(long)]
    pub rx_gain: Option<f64>,

    /// Receive cable and connector loss override, dB.
    #[arg(long)]
    pub rx_cable_loss: Option<f64>,

    /// Receiver sensitivity override, dBm.
    #[arg(long)]
    pub rx_sensitivity: Option<f64>,

    /// Slow-fading margin override, dB.
    #[arg(long)]
    pub fade_margin: Option<f64>,

    /// Interference margin override, dB.
    #[arg(long)]
    pub interference_margin: Option<f64>,

    /// Body loss override, dB.
    #[arg(long)]
    pub body_loss: Option<f64>,

    /// Base-station antenna height, meters.
    #[arg(long)]
    pub base_height: Option<f64>,

    /// Mobile antenna height, meters.
    #[arg(long)]
    pub mobile_height: Option<f64>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the dimensioning report as a table.
    Report,

    /// Print `label,value,unit` rows to stdout.
    Csv,

    /// Print the full report as JSON.
    Json,

    /// Plot path loss over distance, with the MAPL ceiling.
    Plot,

    /// List the technology's band plan.
    Bands,

    /// Trunks required for an offered load at the blocking target.
    Trunks {
        /// Offered load, Erlangs.
        offered_erlangs: f64,
    },
}
