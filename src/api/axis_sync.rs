//! Linked-axis synchronization between charts that share a variable.
//!
//! Shared limits are computed from each chart's natural bounds (its bounds
//! without overrides), so repeated syncs never ratchet a maximum upwards.

use tracing::trace;

use crate::api::chart::{AxisOverrides, Chart};
use crate::core::TickSource;
use crate::error::{GraphError, GraphResult};

/// Gives the world chart the domestic chart's current x and y maxima.
pub fn sync_world_to_domestic(domestic: &Chart, world: &mut Chart) -> GraphResult<()> {
    let x = domestic.x_bounds()?;
    let y = domestic.y_bounds()?;
    trace!(x_max = x.max, y_max = y.max, "world chart synced to domestic");
    world.set_overrides(AxisOverrides {
        x_max: Some(x.max),
        y_min: None,
        y_max: Some(y.max),
    })
}

/// Links the cumulative chain, given its charts in stage order
/// (MP, IS, AD, Phillips, Okun).
///
/// MP/IS share the rate maximum, IS/AD the output maximum, AD/Phillips the
/// inflation maximum and minimum, Phillips/Okun the unemployment maximum.
pub fn sync_chain(charts: &mut [Chart]) -> GraphResult<()> {
    let count = charts.len();
    let [mp, is, ad, pc, okun] = charts else {
        return Err(GraphError::InvalidData(format!(
            "cumulative chain needs 5 charts, got {count}"
        )));
    };

    let rate_max = mp.natural_y_bounds().max.max(is.natural_y_bounds().max);
    let output_max = is.natural_x_bounds().max.max(ad.natural_x_bounds().max);
    let inflation_max = ad.natural_y_bounds().max.max(pc.natural_y_bounds().max);
    let inflation_min = ad.natural_y_bounds().min.max(pc.natural_y_bounds().min);
    let unemployment_max = pc.natural_x_bounds().max.max(okun.natural_x_bounds().max);

    mp.set_overrides(AxisOverrides {
        y_max: Some(rate_max),
        ..AxisOverrides::default()
    })?;
    is.set_overrides(AxisOverrides {
        x_max: Some(output_max),
        y_min: None,
        y_max: Some(rate_max),
    })?;
    ad.set_overrides(AxisOverrides {
        x_max: Some(output_max),
        y_min: Some(inflation_min),
        y_max: Some(inflation_max),
    })?;
    pc.set_overrides(AxisOverrides {
        x_max: Some(unemployment_max),
        y_min: Some(inflation_min),
        y_max: Some(inflation_max),
    })?;
    okun.set_overrides(AxisOverrides {
        x_max: Some(unemployment_max),
        ..AxisOverrides::default()
    })?;

    trace!(
        rate_max,
        output_max,
        inflation_min,
        inflation_max,
        unemployment_max,
        "cumulative chain axes synced"
    );
    Ok(())
}
