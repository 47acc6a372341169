//! The platform map view, seen from the engine.
//!
//! A [`MapSurface`] owns whatever actually draws; the coordinator only ever
//! talks to it through flat [`AnnotationRender`] snapshots.

pub mod recording;

pub use recording::{RecordingSurface, SurfaceCommand};

use crate::{
    annotation::{layout_for, Annotation, AnnotationId, AnnotationKind, Layout, VisualState},
    core::{
        camera::{CameraCommand, CameraTicket},
        geo::LatLng,
    },
    floor::FloorOverlay,
    floorplan::AmenityType,
};
use std::sync::Arc;

/// Everything a platform view needs to draw one annotation
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRender {
    pub id: AnnotationId,
    pub floor: usize,
    pub coordinate: LatLng,
    pub state: VisualState,
    pub layout: Layout,
    pub alpha: f32,
    /// Tour stop number drawn over the marker
    pub badge: Option<u32>,
    pub title: Option<String>,
    pub amenity: Option<AmenityType>,
    pub image: Option<Arc<Vec<u8>>>,
    pub play_button: bool,
    pub playing: bool,
}

impl AnnotationRender {
    /// `None` when the annotation has no coordinate to draw at
    pub fn compose(
        annotation: &Annotation,
        state: &VisualState,
        alpha: f32,
        image: Option<Arc<Vec<u8>>>,
    ) -> Option<Self> {
        let coordinate = annotation.coordinate?;
        let layout = layout_for(annotation, state);

        let (has_audio, playing) = match &annotation.kind {
            AnnotationKind::Artwork(artwork) => (artwork.has_audio, false),
            AnnotationKind::TourStop(stop) => (stop.artwork.has_audio, stop.is_currently_playing),
            _ => (false, false),
        };

        Some(Self {
            id: annotation.id.clone(),
            floor: annotation.floor,
            coordinate,
            state: *state,
            layout,
            alpha,
            badge: if state.in_tour { state.tour_stop_number } else { None },
            title: annotation.title().map(str::to_string),
            amenity: annotation.amenity(),
            image: if layout.shows_image() { image } else { None },
            play_button: layout.is_card() && has_audio,
            playing,
        })
    }
}

/// Host map view the coordinator drives
pub trait MapSurface {
    /// Starts moving the camera; the host reports completion with `ticket`
    fn set_camera(&mut self, ticket: CameraTicket, command: &CameraCommand);

    fn add_overlay(&mut self, overlay: &FloorOverlay);

    fn remove_overlay(&mut self, floor: usize);

    /// Adds the annotation or replaces its previous render
    fn upsert_annotation(&mut self, render: &AnnotationRender);

    fn remove_annotation(&mut self, id: &AnnotationId);
}

impl<S: MapSurface + ?Sized> MapSurface for Box<S> {
    fn set_camera(&mut self, ticket: CameraTicket, command: &CameraCommand) {
        (**self).set_camera(ticket, command)
    }

    fn add_overlay(&mut self, overlay: &FloorOverlay) {
        (**self).add_overlay(overlay)
    }

    fn remove_overlay(&mut self, floor: usize) {
        (**self).remove_overlay(floor)
    }

    fn upsert_annotation(&mut self, render: &AnnotationRender) {
        (**self).upsert_annotation(render)
    }

    fn remove_annotation(&mut self, id: &AnnotationId) {
        (**self).remove_annotation(id)
    }
}
