use crate::error::DimensionError;

/// Offered traffic and QoS target for the service area.
///
/// `per_subscriber` is in Erlangs for circuit-switched technologies and
/// Mbit/s of busy-hour throughput for shared-channel ones.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficDemand {
    pub per_subscriber: f64,

    /// Blocking probability target, exclusive on both bounds.
    pub qos_target: f64,

    /// Subscribers per km².
    pub subscriber_density: f64,
}

impl TrafficDemand {
    pub fn new(
        per_subscriber: f64,
        qos_target: f64,
        subscriber_density: f64,
    ) -> Result<Self, DimensionError> {
        if !per_subscriber.is_finite() || per_subscriber < 0.0 {
            return Err(DimensionError::InvalidParameter("per_subscriber"));
        }
        if !(qos_target > 0.0 && qos_target < 1.0) {
            return Err(DimensionError::InvalidParameter("qos_target"));
        }
        if !subscriber_density.is_finite() || subscriber_density < 0.0 {
            return Err(DimensionError::InvalidParameter("subscriber_density"));
        }
        Ok(Self {
            per_subscriber,
            qos_target,
            subscriber_density,
        })
    }
}
