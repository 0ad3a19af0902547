//! Viewport fitting over the displayed point set.

use crate::domain::GeoPoint;

/// Minimal axis-aligned region covering a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// True when the box has zero area (a single-point set). The
    /// rendering surface expands a degenerate box to a sane default
    /// zoom instead of zooming to the maximum.
    pub fn is_degenerate(&self) -> bool {
        self.min_latitude == self.max_latitude && self.min_longitude == self.max_longitude
    }

    /// True when the point lies inside or on the edge of the box.
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.latitude() >= self.min_latitude
            && point.latitude() <= self.max_latitude
            && point.longitude() >= self.min_longitude
            && point.longitude() <= self.max_longitude
    }
}

/// Instruction for the rendering surface's camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportCommand {
    /// Fit the view to the given region.
    FitBounds(BoundingBox),

    /// Keep the current view. Issued for an empty point set, which
    /// means "fetched data had no coordinates", not "no data at all" -
    /// recentering would throw the rider's view away for nothing.
    HoldView,
}

/// Compute the viewport command for a set of displayed points.
pub fn fit_viewport(points: &[GeoPoint]) -> ViewportCommand {
    let Some(first) = points.first() else {
        return ViewportCommand::HoldView;
    };

    let mut bounds = BoundingBox {
        min_latitude: first.latitude(),
        min_longitude: first.longitude(),
        max_latitude: first.latitude(),
        max_longitude: first.longitude(),
    };

    for point in &points[1..] {
        bounds.min_latitude = bounds.min_latitude.min(point.latitude());
        bounds.min_longitude = bounds.min_longitude.min(point.longitude());
        bounds.max_latitude = bounds.max_latitude.max(point.latitude());
        bounds.max_longitude = bounds.max_longitude.max(point.longitude());
    }

    ViewportCommand::FitBounds(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn empty_set_holds_current_view() {
        assert_eq!(fit_viewport(&[]), ViewportCommand::HoldView);
    }

    #[test]
    fn single_point_yields_degenerate_bounds_containing_it() {
        let p = point(1.0, 1.0);
        let ViewportCommand::FitBounds(bounds) = fit_viewport(&[p]) else {
            panic!("expected FitBounds");
        };

        assert!(bounds.is_degenerate());
        assert!(bounds.contains(p));
        assert_eq!(bounds.min_latitude, 1.0);
        assert_eq!(bounds.max_longitude, 1.0);
    }

    #[test]
    fn two_points_span_the_region() {
        let command = fit_viewport(&[point(0.0, 0.0), point(10.0, 10.0)]);

        assert_eq!(
            command,
            ViewportCommand::FitBounds(BoundingBox {
                min_latitude: 0.0,
                min_longitude: 0.0,
                max_latitude: 10.0,
                max_longitude: 10.0,
            })
        );
    }

    #[test]
    fn bounds_cover_every_point() {
        let points = vec![
            point(1.3, 103.8),
            point(1.4, 103.7),
            point(1.2, 103.9),
            point(1.35, 103.85),
        ];

        let ViewportCommand::FitBounds(bounds) = fit_viewport(&points) else {
            panic!("expected FitBounds");
        };

        for p in &points {
            assert!(bounds.contains(*p));
        }
        assert!(!bounds.is_degenerate());
        assert_eq!(bounds.min_latitude, 1.2);
        assert_eq!(bounds.max_latitude, 1.4);
        assert_eq!(bounds.min_longitude, 103.7);
        assert_eq!(bounds.max_longitude, 103.9);
    }

    #[test]
    fn mixed_sign_coordinates() {
        let ViewportCommand::FitBounds(bounds) =
            fit_viewport(&[point(-5.0, -10.0), point(5.0, 10.0)])
        else {
            panic!("expected FitBounds");
        };

        assert_eq!(bounds.min_latitude, -5.0);
        assert_eq!(bounds.max_latitude, 5.0);
        assert_eq!(bounds.min_longitude, -10.0);
        assert_eq!(bounds.max_longitude, 10.0);
    }
}
