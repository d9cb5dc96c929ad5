//! Mapping widget integration.
//!
//! The external mapping capability is expressed as the [`MapWidget`]
//! trait: place and remove markers, bind popups, move the viewport.
//! [`TerminalMap`] is the in-tree implementation rendered on a ratatui
//! canvas by the presentation layer. [`MapAdapter`] sits on top of the
//! widget and owns the marker registry that keeps map state in sync
//! with the filtered business subset.

use crate::domain::{escape_markup, Business, Coordinates};
use std::collections::HashMap;

/// Errors surfaced by the mapping widget.
#[derive(Debug, Clone, PartialEq)]
pub enum MapError {
    LoadFailed(String),
    ViewRejected(String),
    UnknownMarker(MarkerHandle),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::LoadFailed(msg) => write!(f, "Map failed to load: {}", msg),
            MapError::ViewRejected(msg) => write!(f, "Map rejected view change: {}", msg),
            MapError::UnknownMarker(handle) => write!(f, "Unknown marker: {:?}", handle),
        }
    }
}

impl std::error::Error for MapError {}

/// Opaque identifier for a marker placed on the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

/// A marker as the widget holds it: position plus bound popup markup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub handle: MarkerHandle,
    pub at: Coordinates,
    pub popup: String,
}

/// The viewport a widget currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
}

/// Rectangular bounds over a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest bounds containing all points, `None` for an empty set.
    pub fn around(points: &[Coordinates]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };
        for point in &points[1..] {
            bounds.south = bounds.south.min(point.lat);
            bounds.north = bounds.north.max(point.lat);
            bounds.west = bounds.west.min(point.lon);
            bounds.east = bounds.east.max(point.lon);
        }
        Some(bounds)
    }

    /// Grows the bounds by `ratio` of their span on every side.
    pub fn padded(&self, ratio: f64) -> Self {
        let lat_pad = (self.north - self.south) * ratio;
        let lon_pad = (self.east - self.west) * ratio;
        Self {
            south: self.south - lat_pad,
            west: self.west - lon_pad,
            north: self.north + lat_pad,
            east: self.east + lon_pad,
        }
    }

    pub fn center(&self) -> Coordinates {
        Coordinates {
            lat: (self.south + self.north) / 2.0,
            lon: (self.west + self.east) / 2.0,
        }
    }
}

/// The external mapping capability consumed by the directory.
///
/// Implementations keep whatever internal state they need; callers only
/// see marker handles and the viewport.
pub trait MapWidget {
    fn set_view(&mut self, center: Coordinates, zoom: u8, animate: bool) -> Result<(), MapError>;
    fn pan_to(&mut self, center: Coordinates) -> Result<(), MapError>;
    fn fit_bounds(&mut self, bounds: Bounds, pad_ratio: f64);
    fn add_marker(&mut self, at: Coordinates, popup_markup: String) -> MarkerHandle;
    fn clear_markers(&mut self);
    fn open_popup(&mut self, handle: MarkerHandle) -> Result<(), MapError>;
    fn close_popup(&mut self);
    fn viewport(&self) -> Viewport;
    fn markers(&self) -> &[PlacedMarker];
    fn open_popup_handle(&self) -> Option<MarkerHandle>;
}

/// Terminal-rendered map widget.
///
/// Holds the viewport and marker store; the presentation layer draws it
/// with ratatui's canvas world map. Zoom follows the usual slippy-map
/// convention: each level halves the visible span.
#[derive(Debug)]
pub struct TerminalMap {
    viewport: Viewport,
    markers: Vec<PlacedMarker>,
    open_popup: Option<MarkerHandle>,
    next_handle: u64,
}

impl TerminalMap {
    /// Loads the widget with an initial viewport.
    ///
    /// Loading is the widget's only fallible phase; callers must treat
    /// a failure as "no map" and surface it instead of a blank view.
    pub fn load(initial: Viewport) -> Result<Self, MapError> {
        Ok(Self {
            viewport: initial,
            markers: Vec::new(),
            open_popup: None,
            next_handle: 0,
        })
    }

    fn zoom_for(bounds: &Bounds) -> u8 {
        let span = (bounds.north - bounds.south)
            .abs()
            .max((bounds.east - bounds.west).abs())
            .max(1e-6);
        let zoom = (360.0 / span).log2().floor();
        zoom.clamp(3.0, 19.0) as u8
    }
}

impl MapWidget for TerminalMap {
    fn set_view(&mut self, center: Coordinates, zoom: u8, _animate: bool) -> Result<(), MapError> {
        self.viewport = Viewport { center, zoom };
        Ok(())
    }

    fn pan_to(&mut self, center: Coordinates) -> Result<(), MapError> {
        self.viewport.center = center;
        Ok(())
    }

    fn fit_bounds(&mut self, bounds: Bounds, pad_ratio: f64) {
        let padded = bounds.padded(pad_ratio);
        self.viewport = Viewport {
            center: padded.center(),
            zoom: Self::zoom_for(&padded),
        };
    }

    fn add_marker(&mut self, at: Coordinates, popup_markup: String) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.push(PlacedMarker {
            handle,
            at,
            popup: popup_markup,
        });
        handle
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
        self.open_popup = None;
    }

    fn open_popup(&mut self, handle: MarkerHandle) -> Result<(), MapError> {
        if self.markers.iter().any(|m| m.handle == handle) {
            self.open_popup = Some(handle);
            Ok(())
        } else {
            Err(MapError::UnknownMarker(handle))
        }
    }

    fn close_popup(&mut self) {
        self.open_popup = None;
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    fn open_popup_handle(&self) -> Option<MarkerHandle> {
        self.open_popup
    }
}

/// Viewport policy and zoom levels, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct MapConfig {
    /// Shown when no marker survives the filter.
    pub default_view: Viewport,
    /// Zoom when exactly one marker is placed.
    pub single_zoom: u8,
    /// Zoom when focusing a selected marker.
    pub focus_zoom: u8,
    /// Padding ratio applied before fitting bounds.
    pub bounds_pad: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // Curicó / Maule overview.
            default_view: Viewport {
                center: Coordinates { lat: -35.0, lon: -71.2 },
                zoom: 12,
            },
            single_zoom: 14,
            focus_zoom: 15,
            bounds_pad: 0.2,
        }
    }
}

/// Keeps the widget's markers in sync with the filtered subset.
///
/// The registry maps business id to marker handle and is rebuilt
/// wholesale on every [`MapAdapter::update_markers`] call; its keys are
/// exactly the ids of the coordinate-valid businesses last applied.
pub struct MapAdapter {
    widget: Box<dyn MapWidget>,
    registry: HashMap<u32, MarkerHandle>,
    order: Vec<u32>,
    config: MapConfig,
}

impl MapAdapter {
    /// Loads the terminal widget and wraps it.
    ///
    /// This is the single completion point for map readiness: on `Ok`
    /// the adapter is fully usable and dependent actions (marker
    /// updates, selection focus) can be chained immediately.
    pub fn load(config: MapConfig) -> Result<Self, MapError> {
        let widget = TerminalMap::load(config.default_view)?;
        Ok(Self::with_widget(Box::new(widget), config))
    }

    /// Wraps an already-loaded widget. Used by tests to substitute a
    /// recording fake.
    pub fn with_widget(widget: Box<dyn MapWidget>, config: MapConfig) -> Self {
        Self {
            widget,
            registry: HashMap::new(),
            order: Vec::new(),
            config,
        }
    }

    /// Rebuilds all markers from the given (filtered) businesses.
    ///
    /// Existing markers are removed first. Businesses without
    /// coordinates are skipped. Afterwards the viewport follows the
    /// fixed policy: no points shows the default region view, a single
    /// point centers on it, several points fit bounds with padding.
    pub fn update_markers(&mut self, businesses: &[&Business]) {
        self.widget.clear_markers();
        self.registry.clear();
        self.order.clear();

        let mut points = Vec::new();
        for business in businesses {
            let Some(coords) = business.coords else {
                continue;
            };
            let popup = format!(
                "<strong>{}</strong><br>{}<br><small>{}</small>",
                escape_markup(&business.name),
                escape_markup(&business.address),
                escape_markup(&business.phone),
            );
            let handle = self.widget.add_marker(coords, popup);
            self.registry.insert(business.id, handle);
            self.order.push(business.id);
            points.push(coords);
        }

        match points.as_slice() {
            [] => {
                let view = self.config.default_view;
                self.set_view_or_pan(view.center, view.zoom, false);
            }
            [only] => {
                self.set_view_or_pan(*only, self.config.single_zoom, false);
            }
            many => {
                if let Some(bounds) = Bounds::around(many) {
                    self.widget.fit_bounds(bounds, self.config.bounds_pad);
                }
            }
        }
    }

    /// Opens the popup for `id` and recenters on it.
    ///
    /// Returns `false` when no marker exists for the id (filtered out
    /// or no coordinates); that is not an error, the caller keeps its
    /// card-level selection effects. Recenter or popup failures degrade
    /// to a plain pan and are never propagated.
    pub fn focus(&mut self, id: u32) -> bool {
        let Some(&handle) = self.registry.get(&id) else {
            return false;
        };
        let Some(at) = self
            .widget
            .markers()
            .iter()
            .find(|m| m.handle == handle)
            .map(|m| m.at)
        else {
            return false;
        };

        if self.widget.open_popup(handle).is_err()
            || self
                .widget
                .set_view(at, self.config.focus_zoom, true)
                .is_err()
        {
            let _ = self.widget.pan_to(at);
        }
        true
    }

    pub fn close_popup(&mut self) {
        self.widget.close_popup();
    }

    pub fn has_marker(&self, id: u32) -> bool {
        self.registry.contains_key(&id)
    }

    pub fn marker_count(&self) -> usize {
        self.order.len()
    }

    /// Business ids with markers, in the order they were placed.
    pub fn marker_ids(&self) -> &[u32] {
        &self.order
    }

    /// The business id whose popup is open, if any.
    pub fn open_popup_business(&self) -> Option<u32> {
        let open = self.widget.open_popup_handle()?;
        self.registry
            .iter()
            .find(|&(_, &handle)| handle == open)
            .map(|(&id, _)| id)
    }

    /// Read access for the renderer.
    pub fn widget(&self) -> &dyn MapWidget {
        self.widget.as_ref()
    }

    fn set_view_or_pan(&mut self, center: Coordinates, zoom: u8, animate: bool) {
        if self.widget.set_view(center, zoom, animate).is_err() {
            let _ = self.widget.pan_to(center);
        }
    }
}
