//! Interaction hooks for rendered markers.
//!
//! A [`MapSession`] owns the one detail popup of a map and drives a
//! [`MapSurface`] (the external rendering capability) in response to hover,
//! activation, background and cluster clicks.

use crate::models::{GeolocationFailure, LatLng, MarkerDescriptor, MarkerIcon};
use crate::processors::event_log::{EventLog, LogEvent};
use crate::utils::constants::FOCUS_ZOOM;
use crate::utils::html::escape_html;

/// Where a popup is anchored.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupAnchor {
    Marker(String),
    Position(LatLng),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub anchor: PopupAnchor,
    pub content_html: String,
}

/// Rendering operations the session needs from the map platform.
pub trait MapSurface {
    fn open_popup(&mut self, popup: &Popup);
    fn close_popup(&mut self);
    fn set_center(&mut self, position: LatLng);
    fn center(&self) -> LatLng;
    fn zoom(&self) -> u8;
    fn set_zoom(&mut self, zoom: u8);
    fn set_marker_icon(&mut self, marker_id: &str, icon: &MarkerIcon);
    fn place_marker(&mut self, position: LatLng, icon: &MarkerIcon);
}

pub struct MapSession<'a, S: MapSurface> {
    surface: S,
    open_popup: Option<Popup>,
    log: &'a dyn EventLog,
}

impl<'a, S: MapSurface> MapSession<'a, S> {
    pub fn new(surface: S, log: &'a dyn EventLog) -> Self {
        Self {
            surface,
            open_popup: None,
            log,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn open_popup(&self) -> Option<&Popup> {
        self.open_popup.as_ref()
    }

    /// Pointer entered a marker: emphasize it and close the detail popup.
    pub fn on_hover(&mut self, marker: &MarkerDescriptor) {
        self.surface.set_marker_icon(&marker.id, &marker.hover_icon);
        self.close_popup();
    }

    /// Pointer left a marker: restore its normal icon.
    pub fn on_hover_end(&mut self, marker: &MarkerDescriptor) {
        self.surface.set_marker_icon(&marker.id, &marker.icon);
    }

    /// Marker clicked: replace the popup with this marker's details and
    /// recenter on it.
    pub fn on_activate(&mut self, marker: &MarkerDescriptor) {
        self.close_popup();
        self.show_popup(Popup {
            anchor: PopupAnchor::Marker(marker.id.clone()),
            content_html: marker.popup_html.clone(),
        });
        self.recenter(marker.position);
    }

    pub fn on_background_click(&mut self) {
        self.close_popup();
    }

    /// Cluster clicked: zoom in on it unless already zoomed in far enough.
    pub fn on_cluster_click(&mut self, cluster_center: LatLng) {
        if self.surface.zoom() < FOCUS_ZOOM {
            self.recenter(cluster_center);
            self.surface.set_zoom(FOCUS_ZOOM);
        }
    }

    /// A position request succeeded: focus the view there and mark it.
    pub fn show_current_position(&mut self, position: LatLng) {
        self.recenter(position);
        self.surface.set_zoom(FOCUS_ZOOM);
        self.surface
            .place_marker(position, &MarkerIcon::current_location());
    }

    /// A position request failed: explain why in a popup at the view center.
    pub fn show_location_error(&mut self, failure: GeolocationFailure) {
        self.log
            .record(LogEvent::LocationFailed, &[("reason", &failure.message())]);
        self.close_popup();
        let center = self.surface.center();
        self.show_popup(Popup {
            anchor: PopupAnchor::Position(center),
            content_html: format!("<div><p>{}</p></div>", escape_html(failure.message())),
        });
    }

    fn show_popup(&mut self, popup: Popup) {
        self.surface.open_popup(&popup);
        let anchor = match &popup.anchor {
            PopupAnchor::Marker(id) => id.clone(),
            PopupAnchor::Position(pos) => format!("{},{}", pos.lat, pos.lng),
        };
        self.log.record(LogEvent::PopupOpened, &[("anchor", &anchor)]);
        self.open_popup = Some(popup);
    }

    fn close_popup(&mut self) {
        if self.open_popup.take().is_some() {
            self.surface.close_popup();
            self.log.record(LogEvent::PopupClosed, &[]);
        }
    }

    fn recenter(&mut self, position: LatLng) {
        self.surface.set_center(position);
        self.log.record(
            LogEvent::ViewRecentered,
            &[("lat", &position.lat), ("lng", &position.lng)],
        );
    }
}
