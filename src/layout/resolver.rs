//! Resolution of sparse constraint sets into boxes
//!
//! The two axes never interact, so each is solved on its own in a fixed pass
//! order: edges, then size inference, then center override. A `bottom`,
//! `right` or center constraint only works once the extent on that axis is
//! known; placement is anchored top-left.

use tracing::trace;

use super::error::ConstraintError;
use super::types::{Constraints, Dimension, Frame, Measure, ResolvedBox};

/// Resolution state for one axis
#[derive(Debug)]
struct Span {
    axis: Dimension,
    frame: f64,
    start: Option<f64>,
    end: Option<f64>,
    center: Option<f64>,
    position: Option<f64>,
    extent: Option<f64>,
}

impl Span {
    fn new(
        axis: Dimension,
        frame: f64,
        start: Option<Measure>,
        end: Option<Measure>,
        extent: Option<Measure>,
        center: Option<Measure>,
    ) -> Self {
        let resolve = |m: Option<Measure>| m.map(|m| m.resolve(frame));
        Self {
            axis,
            frame,
            start: resolve(start),
            end: resolve(end),
            center: resolve(center),
            position: None,
            extent: resolve(extent),
        }
    }

    fn apply_edges(&mut self) -> Result<(), ConstraintError> {
        match (self.start, self.end) {
            (Some(_), Some(_)) if self.extent.is_some() => {
                return Err(ConstraintError::over_constrained(self.axis));
            }
            (Some(start), Some(end)) => {
                self.extent = Some(self.frame - start - end);
                self.position = Some(start);
            }
            (Some(start), None) => {
                self.position = Some(start);
            }
            (None, Some(end)) => {
                let extent = self
                    .extent
                    .ok_or_else(|| ConstraintError::missing_extent(self.axis.end_edge(), self.axis))?;
                self.position = Some(self.frame - (end + extent));
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn apply_center(&mut self) -> Result<(), ConstraintError> {
        if let Some(center) = self.center {
            let extent = self
                .extent
                .ok_or_else(|| ConstraintError::missing_extent("center", self.axis))?;
            self.position = Some(center - extent / 2.0);
        }
        Ok(())
    }

    fn finish(&self) -> Result<(f64, f64), ConstraintError> {
        match (self.position, self.extent) {
            (Some(position), Some(extent)) => Ok((position, extent)),
            _ => Err(ConstraintError::unresolved(self.axis)),
        }
    }
}

/// Resolve `constraints` inside `frame` into a fully determined box
///
/// Accepted per axis (vertical shown, horizontal mirrors it with
/// left/right/width):
///
/// - `top` + `bottom`: height is what remains of the frame
/// - `top` + `height`
/// - `bottom` + `height`
/// - `height` + center
/// - `top` + `height` + center (center wins for the position)
///
/// Giving `top`, `bottom` and `height` together is an error, as is any set that
/// leaves position or extent open.
#[tracing::instrument(level = "trace", skip_all)]
pub fn resolve(frame: Frame, constraints: &Constraints) -> Result<ResolvedBox, ConstraintError> {
    let mut vertical = Span::new(
        Dimension::Vertical,
        frame.height,
        constraints.top,
        constraints.bottom,
        constraints.effective_height(),
        constraints.center.map(|c| c.y),
    );
    let mut horizontal = Span::new(
        Dimension::Horizontal,
        frame.width,
        constraints.left,
        constraints.right,
        constraints.effective_width(),
        constraints.center.map(|c| c.x),
    );

    vertical.apply_edges()?;
    horizontal.apply_edges()?;
    vertical.apply_center()?;
    horizontal.apply_center()?;

    let (y, height) = vertical.finish()?;
    let (x, width) = horizontal.finish()?;

    let resolved = ResolvedBox::within(frame, x, y, width, height);
    trace!(?constraints, ?resolved, "resolved constraint set");
    Ok(resolved)
}
