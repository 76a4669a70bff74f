use crate::error::LinkBudgetError;

/// A solved one-way link budget.
///
/// All inputs are echoed alongside the derived EIRP and MAPL so the
/// result can be rendered as a waterfall without recomputation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkBudget {
    pub tx_power_dbm: f64,
    pub tx_antenna_gain_dbi: f64,
    pub tx_cable_loss_db: f64,
    pub rx_antenna_gain_dbi: f64,
    pub rx_cable_loss_db: f64,
    pub rx_sensitivity_dbm: f64,
    pub fade_margin_db: f64,
    pub interference_margin_db: f64,
    pub body_loss_db: f64,

    /// Effective isotropic radiated power.
    pub eirp_dbm: f64,

    /// Maximum allowable path loss.
    pub mapl_db: f64,
}

impl LinkBudget {
    pub fn builder() -> LinkBudgetBuilder {
        LinkBudgetBuilder {
            tx_power_dbm: None,
            rx_sensitivity_dbm: None,
            tx_antenna_gain_dbi: 0.0,
            tx_cable_loss_db: 0.0,
            rx_antenna_gain_dbi: 0.0,
            rx_cable_loss_db: 0.0,
            fade_margin_db: 0.0,
            interference_margin_db: 0.0,
            body_loss_db: 0.0,
        }
    }
}

pub struct LinkBudgetBuilder {
    /// Transmit power in dBm (required).
    tx_power_dbm: Option<f64>,

    /// Receiver sensitivity in dBm (required).
    rx_sensitivity_dbm: Option<f64>,

    /// Transmit antenna gain in dBi (defaults to 0).
    tx_antenna_gain_dbi: f64,

    /// Transmit cable and connector loss in dB (defaults to 0).
    tx_cable_loss_db: f64,

    /// Receive antenna gain in dBi (defaults to 0).
    rx_antenna_gain_dbi: f64,

    /// Receive cable and connector loss in dB (defaults to 0).
    rx_cable_loss_db: f64,

    /// Slow-fading margin in dB (defaults to 0).
    fade_margin_db: f64,

    /// Interference margin in dB (defaults to 0).
    interference_margin_db: f64,

    /// Body loss in dB (defaults to 0).
    body_loss_db: f64,
}

impl LinkBudgetBuilder {
    /// Transmit power in dBm (required).
    #[must_use]
    pub fn tx_power(mut self, dbm: f64) -> Self {
        self.tx_power_dbm = Some(dbm);
        self
    }

    /// Receiver sensitivity in dBm (required).
    #[must_use]
    pub fn rx_sensitivity(mut self, dbm: f64) -> Self {
        self.rx_sensitivity_dbm = Some(dbm);
        self
    }

    /// Transmit antenna gain in dBi (defaults to 0).
    #[must_use]
    pub fn tx_antenna_gain(mut self, dbi: f64) -> Self {
        self.tx_antenna_gain_dbi = dbi;
        self
    }

    /// Transmit cable and connector loss in dB (defaults to 0).
    #[must_use]
    pub fn tx_cable_loss(mut self, db: f64) -> Self {
        self.tx_cable_loss_db = db;
        self
    }

    /// Receive antenna gain in dBi (defaults to 0).
    #[must_use]
    pub fn rx_antenna_gain(mut self, dbi: f64) -> Self {
        self.rx_antenna_gain_dbi = dbi;
        self
    }

    /// Receive cable and connector loss in dB (defaults to 0).
    #[must_use]
    pub fn rx_cable_loss(mut self, db: f64) -> Self {
        self.rx_cable_loss_db = db;
        self
    }

    /// Slow-fading margin in dB (defaults to 0).
    #[must_use]
    pub fn fade_margin(mut self, db: f64) -> Self {
        self.fade_margin_db = db;
        self
    }

    /// Interference margin in dB (defaults to 0).
    #[must_use]
    pub fn interference_margin(mut self, db: f64) -> Self {
        self.interference_margin_db = db;
        self
    }

    /// Body loss in dB (defaults to 0).
    #[must_use]
    pub fn body_loss(mut self, db: f64) -> Self {
        self.body_loss_db = db;
        self
    }

    pub fn build(&self) -> Result<LinkBudget, LinkBudgetError> {
        let tx_power_dbm = self.tx_power_dbm.ok_or(LinkBudgetError::Builder("tx_power"))?;
        let rx_sensitivity_dbm = self
            .rx_sensitivity_dbm
            .ok_or(LinkBudgetError::Builder("rx_sensitivity"))?;

        for (value, field) in [
            (self.tx_cable_loss_db, "tx_cable_loss"),
            (self.rx_cable_loss_db, "rx_cable_loss"),
            (self.fade_margin_db, "fade_margin"),
            (self.interference_margin_db, "interference_margin"),
            (self.body_loss_db, "body_loss"),
        ] {
            if !(value >= 0.0) {
                return Err(LinkBudgetError::Range(field));
            }
        }

        let eirp_dbm = tx_power_dbm + self.tx_antenna_gain_dbi - self.tx_cable_loss_db;
        let mapl_db = eirp_dbm + (self.rx_antenna_gain_dbi - self.rx_cable_loss_db)
            - rx_sensitivity_dbm
            - self.fade_margin_db
            - self.interference_margin_db
            - self.body_loss_db;

        if mapl_db <= 0.0 {
            return Err(LinkBudgetError::Infeasible { mapl_db });
        }

        Ok(LinkBudget {
            tx_power_dbm,
            tx_antenna_gain_dbi: self.tx_antenna_gain_dbi,
            tx_cable_loss_db: self.tx_cable_loss_db,
            rx_antenna_gain_dbi: self.rx_antenna_gain_dbi,
            rx_cable_loss_db: self.rx_cable_loss_db,
            rx_sensitivity_dbm,
            fade_margin_db: self.fade_margin_db,
            interference_margin_db: self.interference_margin_db,
            body_loss_db: self.body_loss_db,
            eirp_dbm,
            mapl_db,
        })
    }
}
