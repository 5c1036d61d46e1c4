use crate::error::{GraphError, GraphResult};

/// Affine map between a data interval and a pixel interval.
///
/// Either interval may run "backwards"; the y axis uses this to flip data
/// space (origin bottom-left) into canvas space (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    pixel_start: f64,
    pixel_end: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        pixel_start: f64,
        pixel_end: f64,
    ) -> GraphResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(GraphError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !pixel_start.is_finite() || !pixel_end.is_finite() {
            return Err(GraphError::InvalidData(
                "scale pixel range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            pixel_start,
            pixel_end,
        })
    }

    pub fn domain_to_pixel(self, value: f64) -> GraphResult<f64> {
        if !value.is_finite() {
            return Err(GraphError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.pixel_start + normalized * (self.pixel_end - self.pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> GraphResult<f64> {
        if !pixel.is_finite() {
            return Err(GraphError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.pixel_end - self.pixel_start;
        if span == 0.0 {
            return Err(GraphError::InvalidData(
                "cannot invert a zero-width pixel range".to_owned(),
            ));
        }
        let normalized = (pixel - self.pixel_start) / span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
