use crate::{error::ModelError, DEFAULT_BASE_HEIGHT_M, DEFAULT_MOBILE_HEIGHT_M};
use std::{fmt, str::FromStr};

/// Morphology class of the area the mobile operates in.
///
/// Selects the clutter correction applied on top of the base model.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Urban,
    Suburban,
    Rural,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Urban => write!(f, "urban"),
            Environment::Suburban => write!(f, "suburban"),
            Environment::Rural => write!(f, "rural"),
        }
    }
}

impl FromStr for Environment {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "urban" => Ok(Environment::Urban),
            "suburban" => Ok(Environment::Suburban),
            "rural" => Ok(Environment::Rural),
            _ => Err(ModelError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Model family the coefficients are taken from.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    /// Okumura-Hata, valid for 150–1500 MHz macro cells.
    OkumuraHata,
    /// COST-231 extension of Hata for 1500–2600 MHz.
    Cost231Hata,
    /// Free-space reference with clutter offsets.
    FreeSpace,
}

/// A path loss model solved for one (frequency, environment, antenna
/// geometry) combination.
///
/// All variants reduce to `loss(d) = floor + slope · log10(d_km)`, with
/// `floor` the loss at 1 km. Being log-linear in distance makes the
/// inverse exact; no search is involved.
#[derive(Debug, Clone, PartialEq)]
pub struct PathLossModel {
    variant: ModelVariant,
    freq_mhz: f64,
    environment: Environment,

    /// Loss at 1 km, with frequency, antenna and clutter terms folded in.
    floor_db: f64,

    /// Loss added per decade of distance.
    slope_db: f64,
}

impl PathLossModel {
    pub fn builder() -> PathLossModelBuilder {
        PathLossModelBuilder {
            variant: None,
            freq_mhz: None,
            environment: None,
            base_height_m: DEFAULT_BASE_HEIGHT_M,
            mobile_height_m: DEFAULT_MOBILE_HEIGHT_M,
        }
    }

    /// Loss in dB at `distance_km` from the transmitter.
    pub fn path_loss(&self, distance_km: f64) -> Result<f64, ModelError> {
        if !(distance_km > 0.0) {
            return Err(ModelError::Range("distance_km"));
        }
        Ok(self.floor_db + self.slope_db * distance_km.log10())
    }

    /// Largest distance, in km, at which the loss stays within
    /// `max_loss_db`.
    ///
    /// Solved algebraically from the log-linear form. Budgets below the
    /// model's loss at 1 km would size a sub-kilometer cell, which this
    /// model family cannot represent.
    pub fn max_distance(&self, max_loss_db: f64) -> Result<f64, ModelError> {
        if max_loss_db < self.floor_db {
            return Err(ModelError::BelowFloor {
                max_loss_db,
                floor_db: self.floor_db,
            });
        }
        Ok(10f64.powf((max_loss_db - self.floor_db) / self.slope_db))
    }

    /// Loss at 1 km.
    pub fn floor_db(&self) -> f64 {
        self.floor_db
    }

    pub fn frequency_mhz(&self) -> f64 {
        self.freq_mhz
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }
}

pub struct PathLossModelBuilder {
    /// Coefficient family (required).
    variant: Option<ModelVariant>,

    /// Carrier frequency in MHz (required).
    freq_mhz: Option<f64>,

    /// Morphology class (required).
    environment: Option<Environment>,

    /// Base-station antenna height in meters (defaults to 30).
    base_height_m: f64,

    /// Mobile antenna height in meters (defaults to 1.5).
    mobile_height_m: f64,
}

impl PathLossModelBuilder {
    /// Coefficient family (required).
    #[must_use]
    pub fn variant(mut self, variant: ModelVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Carrier frequency in MHz (required).
    #[must_use]
    pub fn frequency(mut self, freq_mhz: f64) -> Self {
        self.freq_mhz = Some(freq_mhz);
        self
    }

    /// Morphology class (required).
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
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

    pub fn build(&self) -> Result<PathLossModel, ModelError> {
        let variant = self.variant.ok_or(ModelError::Builder("variant"))?;
        let freq_mhz = self.freq_mhz.ok_or(ModelError::Builder("frequency"))?;
        let environment = self.environment.ok_or(ModelError::Builder("environment"))?;

        if !(freq_mhz > 0.0) {
            return Err(ModelError::Range("frequency"));
        }
        if !(self.base_height_m > 0.0) {
            return Err(ModelError::Range("base_height"));
        }
        if !(self.mobile_height_m > 0.0) {
            return Err(ModelError::Range("mobile_height"));
        }

        let hb = self.base_height_m;
        let hm = self.mobile_height_m;
        let clutter = clutter_db(variant, environment, freq_mhz);

        let (floor_db, slope_db) = match variant {
            ModelVariant::OkumuraHata => (
                69.55 + 26.16 * freq_mhz.log10() - 13.82 * hb.log10()
                    - mobile_correction_db(freq_mhz, hm)
                    + clutter,
                44.9 - 6.55 * hb.log10(),
            ),
            ModelVariant::Cost231Hata => (
                46.3 + 33.9 * freq_mhz.log10() - 13.82 * hb.log10()
                    - mobile_correction_db(freq_mhz, hm)
                    + clutter,
                44.9 - 6.55 * hb.log10(),
            ),
            ModelVariant::FreeSpace => (32.45 + 20.0 * freq_mhz.log10() + clutter, 20.0),
        };

        Ok(PathLossModel {
            variant,
            freq_mhz,
            environment,
            floor_db,
            slope_db,
        })
    }
}

/// Mobile antenna height correction `a(hm)`.
///
/// The small-city form applies inside Hata's 150–1500 MHz validity band;
/// outside it the large-city form is used.
fn mobile_correction_db(freq_mhz: f64, hm: f64) -> f64 {
    if (150.0..=1500.0).contains(&freq_mhz) {
        (1.1 * freq_mhz.log10() - 0.7) * hm - (1.56 * freq_mhz.log10() - 0.8)
    } else {
        3.2 * (11.75 * hm).log10().powi(2) - 4.97
    }
}

/// Environment offset on top of the urban base model.
///
/// Strictly decreasing urban > suburban > rural over the whole supported
/// band. COST-231 adds its 3 dB metropolitan term in urban areas.
fn clutter_db(variant: ModelVariant, environment: Environment, freq_mhz: f64) -> f64 {
    match environment {
        Environment::Urban => match variant {
            ModelVariant::Cost231Hata => 3.0,
            _ => 0.0,
        },
        Environment::Suburban => -2.0 * (freq_mhz / 28.0).log10().powi(2) - 5.4,
        Environment::Rural => {
            -4.78 * freq_mhz.log10().powi(2) + 18.33 * freq_mhz.log10() - 40.94
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Environment, ModelError, ModelVariant, PathLossModel};
    use assert_approx_eq::assert_approx_eq;

    fn gsm900_urban() -> PathLossModel {
        PathLossModel::builder()
            .variant(ModelVariant::OkumuraHata)
            .frequency(900.0)
            .environment(Environment::Urban)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_missing_frequency() {
        let res = PathLossModel::builder()
            .variant(ModelVariant::OkumuraHata)
            .environment(Environment::Urban)
            .build();
        assert!(matches!(res, Err(ModelError::Builder("frequency"))));
    }

    #[test]
    fn test_okumura_hata_urban_900() {
        let model = gsm900_urban();
        assert_approx_eq!(model.floor_db(), 126.40328648085746, 1e-9);
        assert_approx_eq!(model.path_loss(2.0).unwrap(), 137.00702466405272, 1e-9);
    }

    #[test]
    fn test_cost231_urban_2100() {
        let model = PathLossModel::builder()
            .variant(ModelVariant::Cost231Hata)
            .frequency(2100.0)
            .environment(Environment::Urban)
            .build()
            .unwrap();
        assert_approx_eq!(model.floor_db(), 141.5103373982086, 1e-9);
    }

    #[test]
    fn test_free_space_900() {
        let model = PathLossModel::builder()
            .variant(ModelVariant::FreeSpace)
            .frequency(900.0)
            .environment(Environment::Urban)
            .build()
            .unwrap();
        assert_approx_eq!(model.path_loss(1.0).unwrap(), 91.53485018878649, 1e-9);
    }

    #[test]
    fn test_clutter_strictly_decreasing() {
        for variant in [ModelVariant::OkumuraHata, ModelVariant::Cost231Hata] {
            for freq in [800.0, 900.0, 1800.0, 2100.0, 2600.0] {
                let floor = |env| {
                    PathLossModel::builder()
                        .variant(variant)
                        .frequency(freq)
                        .environment(env)
                        .build()
                        .unwrap()
                        .floor_db()
                };
                let urban = floor(Environment::Urban);
                let suburban = floor(Environment::Suburban);
                let rural = floor(Environment::Rural);
                assert!(urban > suburban, "{variant:?} {freq} MHz");
                assert!(suburban > rural, "{variant:?} {freq} MHz");
            }
        }
    }

    #[test]
    fn test_max_distance_round_trip() {
        let model = gsm900_urban();
        for d in [1.0, 1.5, 2.0, 5.0, 10.0, 25.0] {
            let loss = model.path_loss(d).unwrap();
            let back = model.max_distance(loss).unwrap();
            assert!((back - d).abs() / d < 1e-6, "d = {d}, back = {back}");
        }
    }

    #[test]
    fn test_max_distance_at_mapl_134() {
        let radius = gsm900_urban().max_distance(134.0).unwrap();
        assert_approx_eq!(radius, 1.6430978921649044, 1e-9);
        assert!((1.0..10.0).contains(&radius));
    }

    #[test]
    fn test_max_distance_below_floor() {
        let res = gsm900_urban().max_distance(100.0);
        assert!(matches!(res, Err(ModelError::BelowFloor { .. })));
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("Urban".parse::<Environment>().unwrap(), Environment::Urban);
        assert_eq!("rural".parse::<Environment>().unwrap(), Environment::Rural);
        assert!("downtown".parse::<Environment>().is_err());
    }

    #[test]
    fn test_zero_distance_rejected() {
        assert!(matches!(
            gsm900_urban().path_loss(0.0),
            Err(ModelError::Range("distance_km"))
        ));
    }
}
