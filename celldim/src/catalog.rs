use crate::error::DimensionError;
use hata::{Environment, ModelVariant};
use std::{fmt, str::FromStr};

/// Radio access technologies the engine dimensions for.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Technology {
    Gsm,
    Umts,
    Lte,
}

impl Technology {
    pub const ALL: [Technology; 3] = [Technology::Gsm, Technology::Umts, Technology::Lte];

    /// Propagation model family used for this technology's bands.
    pub fn model_variant(self) -> ModelVariant {
        match self {
            Technology::Gsm => ModelVariant::OkumuraHata,
            Technology::Umts | Technology::Lte => ModelVariant::Cost231Hata,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technology::Gsm => write!(f, "GSM"),
            Technology::Umts => write!(f, "UMTS"),
            Technology::Lte => write!(f, "LTE"),
        }
    }
}

impl FromStr for Technology {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gsm" | "2g" => Ok(Technology::Gsm),
            "umts" | "3g" => Ok(Technology::Umts),
            "lte" | "4g" => Ok(Technology::Lte),
            _ => Err(DimensionError::UnknownTechnology(s.to_string())),
        }
    }
}

/// A labeled carrier frequency in a technology's band plan.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub label: &'static str,
    pub frequency_mhz: f64,
}

/// Spectral efficiency by morphology, in bit/s/Hz.
///
/// Urban cells lose efficiency to interference and indoor penetration;
/// the spread between classes widens with the technology generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralEfficiency {
    pub urban: f64,
    pub suburban: f64,
    pub rural: f64,
}

impl SpectralEfficiency {
    pub fn for_environment(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Urban => self.urban,
            Environment::Suburban => self.suburban,
            Environment::Rural => self.rural,
        }
    }
}

/// How a cell's traffic capacity is computed.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapacityModel {
    /// Circuit-switched trunk group; Erlang-B applies.
    CircuitSwitched { traffic_channels: usize },

    /// Shared-channel carrier: bandwidth times spectral efficiency.
    SharedResource {
        bandwidth_mhz: f64,
        spectral_efficiency: SpectralEfficiency,
    },
}

/// Radio and capacity defaults for one technology.
///
/// Figures follow common macro-cell planning guides; callers can
/// override any radio parameter per request.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechnologyProfile {
    pub technology: Technology,
    pub name: &'static str,
    pub bands: &'static [Band],
    pub tx_power_dbm: f64,
    pub rx_sensitivity_dbm: f64,
    pub fade_margin_db: f64,
    pub interference_margin_db: f64,
    pub body_loss_db: f64,
    pub capacity: CapacityModel,
}

/// Static technology catalog.
///
/// Passed to the planner by reference so tests and alternative band
/// plans never go through a shared global.
#[derive(Debug)]
pub struct Catalog {
    profiles: &'static [TechnologyProfile],
}

static PROFILES: [TechnologyProfile; 3] = [
    TechnologyProfile {
        technology: Technology::Gsm,
        name: "GSM (2G)",
        bands: &[
            Band { label: "900", frequency_mhz: 900.0 },
            Band { label: "1800", frequency_mhz: 1800.0 },
        ],
        tx_power_dbm: 43.0,
        rx_sensitivity_dbm: -104.0,
        fade_margin_db: 10.0,
        interference_margin_db: 3.0,
        body_loss_db: 0.0,
        // 4 TRX of 8 timeslots, minus 2 control channels.
        capacity: CapacityModel::CircuitSwitched { traffic_channels: 30 },
    },
    TechnologyProfile {
        technology: Technology::Umts,
        name: "UMTS (3G)",
        bands: &[
            Band { label: "2100", frequency_mhz: 2100.0 },
            Band { label: "900", frequency_mhz: 900.0 },
        ],
        tx_power_dbm: 43.0,
        rx_sensitivity_dbm: -117.0,
        fade_margin_db: 12.0,
        interference_margin_db: 5.0,
        body_loss_db: 3.0,
        capacity: CapacityModel::SharedResource {
            bandwidth_mhz: 5.0,
            spectral_efficiency: SpectralEfficiency {
                urban: 0.45,
                suburban: 0.55,
                rural: 0.65,
            },
        },
    },
    TechnologyProfile {
        technology: Technology::Lte,
        name: "LTE (4G)",
        bands: &[
            Band { label: "800", frequency_mhz: 800.0 },
            Band { label: "1800", frequency_mhz: 1800.0 },
            Band { label: "2600", frequency_mhz: 2600.0 },
        ],
        tx_power_dbm: 46.0,
        rx_sensitivity_dbm: -120.0,
        fade_margin_db: 8.0,
        interference_margin_db: 4.0,
        body_loss_db: 3.0,
        capacity: CapacityModel::SharedResource {
            bandwidth_mhz: 20.0,
            spectral_efficiency: SpectralEfficiency {
                urban: 1.4,
                suburban: 1.7,
                rural: 2.0,
            },
        },
    },
];

static BUILTIN: Catalog = Catalog {
    profiles: &PROFILES,
};

impl Catalog {
    /// The compiled-in band plans and radio defaults.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn profile(&self, technology: Technology) -> &TechnologyProfile {
        // Unwrap is fine as the catalog carries a profile per technology.
        self.profiles
            .iter()
            .find(|profile| profile.technology == technology)
            .unwrap()
    }

    /// Band plan for `technology`, keyed by band label.
    pub fn frequencies(&self, technology: Technology) -> &'static [Band] {
        self.profile(technology).bands
    }

    /// First band of the technology's plan.
    pub fn default_frequency(&self, technology: Technology) -> f64 {
        self.profile(technology).bands[0].frequency_mhz
    }

    pub fn contains_frequency(&self, technology: Technology, freq_mhz: f64) -> bool {
        self.profile(technology)
            .bands
            .iter()
            .any(|band| (band.frequency_mhz - freq_mhz).abs() < 1e-6)
    }
}
