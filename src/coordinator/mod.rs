//! Top-level map state: which mode is active, which floor is visible, what
//! is selected, and what the surface should be drawing because of it.
//!
//! Every public operation mutates that state and then reconciles: the
//! visible floor's desired annotations are resolved, and only renders that
//! actually changed reach the [`MapSurface`].

pub mod mode;

pub use mode::{AmenityFocus, MapMode};

use crate::{
    annotation::{
        layout_for, resolve_visual_state, visibility_alpha, Annotation, AnnotationId,
        AnnotationView, AnnotationViewPool, LiveLocationAnnotation, LiveLocationSource, ViewContext,
        VisualState,
    },
    building::BuildingConfig,
    catalog::{
        Artwork, ArtworkCatalog, AudioFile, Exhibition, Language, NewsItem, Tour, TourStopEntry,
    },
    core::{
        camera::{CameraAnimation, CameraCommand, CameraTicket, CameraTracker},
        config::MapEngineOptions,
        geo::{CoordinateWithFloor, LatLng, LatLngBounds},
    },
    floor::{FloorSet, TransientDelta},
    images::{ImageLoader, ImageRequest, ImageTarget},
    prelude::{HashMap, HashSet},
    surface::{AnnotationRender, MapSurface},
    zoom::{ZoomLevelController, ZoomTier},
    Result,
};
use std::collections::hash_map::Entry;

#[derive(Debug, Clone)]
struct ActiveTour {
    tour: Tour,
    language: Language,
    highlighted: Option<u32>,
    playing: Option<String>,
}

/// Drives a [`MapSurface`] from high-level navigation requests
pub struct MapCoordinator<S: MapSurface> {
    floors: FloorSet,
    surface: S,
    options: MapEngineOptions,
    mode: MapMode,
    current_floor: usize,
    overlay_shown: Option<usize>,
    selection: Option<AnnotationId>,
    amenity_focus: Option<AmenityFocus>,
    active_tour: Option<ActiveTour>,
    zoom: ZoomLevelController,
    camera: CameraTracker,
    views: HashMap<AnnotationId, AnnotationView>,
    pool: AnnotationViewPool,
    images: Option<ImageLoader>,
    home: LatLng,
}

impl<S: MapSurface> MapCoordinator<S> {
    /// Starts disabled on floor 0 with nothing on the surface
    pub fn new(floors: FloorSet, surface: S, options: MapEngineOptions) -> Result<Self> {
        options.validate()?;
        let home = match floors.building_bounds() {
            Some(bounds) => {
                log::info!(
                    "building spans {:.0} m across {} floors",
                    bounds.diagonal_meters(),
                    floors.len()
                );
                bounds.center()
            }
            None => {
                let anchors = floors.converter().anchors();
                anchors.first.geographic.midpoint(&anchors.second.geographic)
            }
        };

        Ok(Self {
            zoom: ZoomLevelController::new(options.zoom.clone()),
            floors,
            surface,
            options,
            mode: MapMode::Disabled,
            current_floor: 0,
            overlay_shown: None,
            selection: None,
            amenity_focus: None,
            active_tour: None,
            camera: CameraTracker::new(),
            views: HashMap::default(),
            pool: AnnotationViewPool::default(),
            images: None,
            home,
        })
    }

    /// Loads every floor a building config names
    pub fn from_building(
        config: &BuildingConfig,
        catalog: &dyn ArtworkCatalog,
        surface: S,
    ) -> Result<Self> {
        let floors = FloorSet::load(config, catalog)?;
        let mut coordinator = Self::new(floors, surface, config.options.clone())?
            .with_initial_floor(config.default_floor);
        if let Some(home) = config.home {
            coordinator.home = home;
        }
        Ok(coordinator)
    }

    /// Enables thumbnail loading; without a loader image layouts stay blank
    pub fn with_image_loader(mut self, loader: ImageLoader) -> Self {
        self.images = Some(loader);
        self
    }

    /// Starts on `floor`; out-of-range values are logged and ignored
    pub fn with_initial_floor(mut self, floor: usize) -> Self {
        if floor < self.floors.len() {
            self.current_floor = floor;
        } else {
            log::warn!("initial floor {} out of range; staying on {}", floor, self.current_floor);
        }
        self
    }

    // --- accessors ---

    /// Active map mode
    pub fn current_mode(&self) -> MapMode {
        self.mode
    }

    /// Tour currently shown, if any
    pub fn tour_model(&self) -> Option<&Tour> {
        self.active_tour.as_ref().map(|t| &t.tour)
    }

    /// Language the active tour was shown in
    pub fn tour_language(&self) -> Option<&Language> {
        self.active_tour.as_ref().map(|t| &t.language)
    }

    /// 1-based position of the highlighted tour stop
    pub fn highlighted_stop(&self) -> Option<u32> {
        self.active_tour.as_ref().and_then(|t| t.highlighted)
    }

    /// Artwork whose tour audio is playing
    pub fn playing_artwork(&self) -> Option<&str> {
        self.active_tour.as_ref().and_then(|t| t.playing.as_deref())
    }

    /// Index of the floor whose overlay and annotations are shown
    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    /// Every floor of the building with its current transient markers
    pub fn floors(&self) -> &FloorSet {
        &self.floors
    }

    /// Zoom tier from the latest camera change
    pub fn zoom_tier(&self) -> ZoomTier {
        self.zoom.current_tier()
    }

    /// Tier before the latest tier change
    pub fn previous_zoom_tier(&self) -> ZoomTier {
        self.zoom.previous_tier()
    }

    /// Selected annotation, if any. At most one is selected at a time.
    pub fn selection(&self) -> Option<&AnnotationId> {
        self.selection.as_ref()
    }

    /// Amenity kind the overview is narrowed to
    pub fn amenity_focus(&self) -> Option<AmenityFocus> {
        self.amenity_focus
    }

    pub fn options(&self) -> &MapEngineOptions {
        &self.options
    }

    /// Host view the coordinator drives
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// State of a currently rendered annotation
    pub fn visual_state(&self, id: &AnnotationId) -> Option<VisualState> {
        self.views.get(id).and_then(|v| v.state().copied())
    }

    /// Ticket of the newest camera command the host has not finished
    pub fn camera_in_flight(&self) -> Option<CameraTicket> {
        self.camera.in_flight()
    }

    // --- modes ---

    /// Overview of the whole floor: every amenity, label and artwork, with
    /// the camera back at the building's home position.
    pub fn show_all_information(&mut self) {
        log::info!("map mode {:?} -> AllInformation", self.mode);
        self.clear_transients();
        self.mode = MapMode::AllInformation;
        self.amenity_focus = None;
        self.selection = None;
        self.active_tour = None;
        self.show_overlay();
        self.move_camera(self.home, self.options.camera.default_altitude);
        self.refresh();
    }

    /// Shows a tour's stops, framing them all or highlighting `stop_index`
    /// (0-based, in tour order).
    ///
    /// Re-showing the active tour in the same language only moves the
    /// highlight.
    pub fn show_tour(&mut self, tour: &Tour, language: &Language, stop_index: Option<usize>) {
        let numbered = tour.numbered_stops();
        let requested_stop = stop_index.and_then(|i| {
            numbered
                .get(i)
                .map(|(number, stop)| (*number, stop.artwork.nid.clone()))
        });
        if stop_index.is_some() && requested_stop.is_none() {
            log::warn!("tour {} has no stop at index {:?}", tour.nid, stop_index);
        }

        if self.mode == MapMode::Tour {
            if let Some(active) = &self.active_tour {
                if active.tour.nid == tour.nid && &active.language == language {
                    match requested_stop {
                        Some((order, nid)) if active.highlighted != Some(order) => {
                            if self.focus_artwork(&nid) {
                                self.refresh();
                            }
                        }
                        _ => log::debug!("tour {} already shown", tour.nid),
                    }
                    return;
                }
            }
        }

        log::info!(
            "map mode {:?} -> Tour ({}, {} stops, {})",
            self.mode,
            tour.nid,
            tour.stops.len(),
            language
        );
        self.clear_transients();

        let mut delta = TransientDelta::default();
        for floor in self.floors.iter_mut() {
            delta.merge(floor.activate_tour_stops(&numbered));
        }
        let total = self.floors.len();
        let unplaced = tour
            .stops
            .iter()
            .filter(|s| !s.artwork.location.map_or(false, |l| l.is_on_building(total)))
            .count();
        if unplaced > 0 {
            log::warn!("tour {}: {} stops are not on any floor", tour.nid, unplaced);
        }
        log::debug!("tour {} placed {} stops", tour.nid, delta.added.len());

        self.mode = MapMode::Tour;
        self.amenity_focus = None;
        self.selection = None;
        self.active_tour = Some(ActiveTour {
            tour: tour.clone(),
            language: language.clone(),
            highlighted: None,
            playing: None,
        });

        let highlighted = match requested_stop {
            Some((_, nid)) => self.focus_artwork(&nid),
            None => false,
        };
        if !highlighted {
            self.frame_tour();
        }
        self.show_overlay();
        self.refresh();
    }

    /// Pins one artwork with its full info card and flies to it
    pub fn show_artwork(&mut self, artwork: &Artwork) {
        self.show_single_location(
            LiveLocationAnnotation {
                key: format!("artwork:{}", artwork.nid),
                source: LiveLocationSource::Artwork,
                title: Some(artwork.title.clone()),
                thumbnail_url: artwork.thumbnail_url.clone(),
                artwork_id: Some(artwork.nid.clone()),
            },
            artwork.location,
        );
    }

    /// Like [`Self::show_artwork`] with the compact card search results use
    pub fn show_searched_artwork(&mut self, artwork: &Artwork) {
        self.show_single_location(
            LiveLocationAnnotation {
                key: format!("search:{}", artwork.nid),
                source: LiveLocationSource::SearchedArtwork,
                title: Some(artwork.title.clone()),
                thumbnail_url: artwork.thumbnail_url.clone(),
                artwork_id: Some(artwork.nid.clone()),
            },
            artwork.location,
        );
    }

    /// Pins an exhibition; ignored when it has no location
    pub fn show_exhibition(&mut self, exhibition: &Exhibition) {
        self.show_single_location(
            LiveLocationAnnotation {
                key: format!("exhibition:{}", exhibition.nid),
                source: LiveLocationSource::Exhibition,
                title: Some(exhibition.title.clone()),
                thumbnail_url: exhibition.image_url.clone(),
                artwork_id: None,
            },
            exhibition.location,
        );
    }

    pub fn show_news_item(&mut self, item: &NewsItem) {
        self.show_single_location(
            LiveLocationAnnotation {
                key: format!("news:{}", item.nid),
                source: LiveLocationSource::NewsItem,
                title: Some(item.title.clone()),
                thumbnail_url: item.image_url.clone(),
                artwork_id: None,
            },
            item.location,
        );
    }

    pub fn show_dining(&mut self) {
        self.show_amenity_focus(AmenityFocus::Dining);
    }

    pub fn show_gift_shop(&mut self) {
        self.show_amenity_focus(AmenityFocus::GiftShop);
    }

    pub fn show_restrooms(&mut self) {
        self.show_amenity_focus(AmenityFocus::Restrooms);
    }

    pub fn show_member_lounge(&mut self) {
        self.show_amenity_focus(AmenityFocus::MembersLounge);
    }

    /// Hides every annotation. The floor overlay stays.
    pub fn disable(&mut self) {
        if self.mode == MapMode::Disabled {
            return;
        }
        log::info!("map mode {:?} -> Disabled", self.mode);
        self.clear_transients();
        self.mode = MapMode::Disabled;
        self.amenity_focus = None;
        self.selection = None;
        self.active_tour = None;
        self.refresh();
    }

    /// Returns false for an unknown floor or the floor already shown
    pub fn set_floor(&mut self, index: usize) -> bool {
        if index >= self.floors.len() {
            log::warn!("ignoring switch to unknown floor {}", index);
            return false;
        }
        if index == self.current_floor {
            return false;
        }
        self.switch_floor(index);
        self.refresh();
        true
    }

    /// Selects the annotation for an artwork wherever it is, switching floors
    /// and moving the camera. Does nothing when no floor has it.
    pub fn highlight_tour_stop(&mut self, artwork: &Artwork) -> bool {
        let found = self.focus_artwork(&artwork.nid);
        if found {
            self.refresh();
        }
        found
    }

    // --- taps ---

    /// Tap on a rendered annotation. Returns true when the selection changed.
    pub fn select_annotation(&mut self, id: &AnnotationId) -> bool {
        if !self.views.contains_key(id) {
            log::debug!("ignoring tap on {} which is not on screen", id);
            return false;
        }
        if self.selection.as_ref() == Some(id) {
            return false;
        }
        self.selection = Some(id.clone());
        if let (Some(active), AnnotationId::TourStop(nid)) = (self.active_tour.as_mut(), id) {
            active.highlighted = active.tour.stop_number(nid);
        }
        self.refresh();
        true
    }

    /// Clears the selection if `id` holds it
    pub fn deselect_annotation(&mut self, id: &AnnotationId) -> bool {
        if self.selection.as_ref() != Some(id) {
            return false;
        }
        self.selection = None;
        self.refresh();
        true
    }

    // --- audio ---

    /// Marks the tour stop that owns `audio` as playing and focuses it
    pub fn audio_playback_did_start(&mut self, audio: &AudioFile) {
        let Some(nid) = self.tour_stop_for_audio(audio) else {
            log::debug!("audio {} is not part of the active tour", audio.nid);
            return;
        };
        for floor in self.floors.iter_mut() {
            floor.set_playing(Some(&nid));
        }
        if let Some(active) = self.active_tour.as_mut() {
            active.playing = Some(nid.clone());
        }
        self.focus_artwork(&nid);
        self.refresh();
    }

    pub fn audio_playback_did_pause(&mut self, audio: &AudioFile) {
        if self.stop_playing(audio) {
            self.refresh();
        }
    }

    /// Returns the stop the host should queue next, when auto-advance is on
    pub fn audio_playback_did_finish(&mut self, audio: &AudioFile) -> Option<TourStopEntry> {
        let stopped = self.stop_playing(audio);
        let next = if self.options.auto_advance_tour {
            self.active_tour.as_ref().and_then(|active| {
                let current = active.tour.stop_for_audio(audio)?;
                active.tour.stop_after(current.order).cloned()
            })
        } else {
            None
        };

        if let Some(next) = &next {
            log::debug!("advancing tour to stop {}", next.order);
            self.focus_artwork(&next.artwork.nid);
        }
        if stopped || next.is_some() {
            self.refresh();
        }
        next
    }

    // --- host callbacks ---

    /// A layout pass happened; the zoom baseline is recaptured next time
    pub fn on_layout(&mut self) {
        self.zoom.invalidate_layout();
    }

    pub fn on_camera_changed(
        &mut self,
        altitude: f64,
        viewport_width: f64,
        visible_map_width: f64,
    ) -> ZoomTier {
        let tier = self.zoom.recompute(altitude, viewport_width, visible_map_width);
        if self.zoom.did_change() {
            self.refresh();
        }
        tier
    }

    /// Returns false for a completion of a superseded camera command
    pub fn camera_did_finish(&mut self, ticket: CameraTicket) -> bool {
        let live = self.camera.finish(ticket);
        if !live {
            log::debug!("ignoring completion of superseded camera command {:?}", ticket);
        }
        live
    }

    /// Applies finished image fetches; returns how many landed on a view
    pub fn pump_images(&mut self) -> usize {
        let Some(loader) = self.images.as_mut() else {
            return 0;
        };

        let mut applied = 0;
        for completion in loader.drain_completions() {
            let target = &completion.target;
            let view = match self.views.get_mut(&target.annotation) {
                Some(view)
                    if view.slot() == target.slot
                        && view.accepts_image(&target.annotation, &completion.url) =>
                {
                    view
                }
                _ => {
                    log::debug!(
                        "discarding stale image {} for {}",
                        completion.url,
                        target.annotation
                    );
                    continue;
                }
            };
            match completion.result {
                Ok(bytes) => {
                    view.set_image(&completion.url, bytes);
                    applied += 1;
                }
                Err(e) => {
                    log::warn!("no image for {}: {}", target.annotation, e);
                    view.clear_pending_image();
                }
            }
        }

        if applied > 0 {
            self.refresh();
        }
        applied
    }

    // --- internals ---

    fn show_single_location(
        &mut self,
        live: LiveLocationAnnotation,
        location: Option<CoordinateWithFloor>,
    ) {
        let total = self.floors.len();
        let Some(location) = location.filter(|l| l.is_on_building(total) && l.coordinate.is_valid())
        else {
            log::warn!("{} has no usable location; ignoring", live.key);
            return;
        };

        log::info!("map mode {:?} -> SingleLocation ({})", self.mode, live.key);
        self.clear_transients();
        let id = AnnotationId::LiveLocation(live.key.clone());
        if let Some(floor) = self.floors.get_mut(location.floor) {
            floor.activate_live_location(live, location.coordinate);
        }

        self.mode = MapMode::SingleLocation;
        self.amenity_focus = None;
        self.active_tour = None;
        self.selection = Some(id);
        self.switch_floor(location.floor);
        self.show_overlay();
        self.move_camera(location.coordinate, self.options.camera.single_location_altitude);
        self.refresh();
    }

    fn show_amenity_focus(&mut self, focus: AmenityFocus) {
        log::info!("map mode {:?} -> AllInformation ({:?})", self.mode, focus);
        self.clear_transients();
        self.mode = MapMode::AllInformation;
        self.amenity_focus = Some(focus);
        self.selection = None;
        self.active_tour = None;

        let has_focus = |floor: &crate::floor::Floor| {
            floor.amenities_where(move |a| focus.matches(a)).next().is_some()
        };
        let target = match self.floors.get(self.current_floor) {
            Some(floor) if has_focus(floor) => Some(floor.index()),
            _ => self.floors.iter().find(|f| has_focus(*f)).map(|f| f.index()),
        };

        match target {
            Some(index) => {
                self.switch_floor(index);
                let center = self.floors.get(index).and_then(|floor| {
                    let coordinates: Vec<LatLng> = floor
                        .amenities_where(move |a| focus.matches(a))
                        .filter_map(|a| a.coordinate)
                        .collect();
                    LatLngBounds::from_points(coordinates.iter()).map(|b| b.center())
                });
                if let Some(center) = center {
                    self.move_camera(center, self.options.camera.amenity_altitude);
                }
            }
            None => log::warn!("no {:?} amenities in the building", focus),
        }
        self.show_overlay();
        self.refresh();
    }

    /// Camera over the centre of every placed stop, on the first stop's floor
    fn frame_tour(&mut self) {
        let stops: Vec<&Annotation> = self
            .floors
            .iter()
            .flat_map(|f| f.tour_stops().iter())
            .collect();
        let coordinates: Vec<LatLng> = stops.iter().filter_map(|a| a.coordinate).collect();
        let first_floor = stops
            .iter()
            .min_by_key(|a| a.as_tour_stop().map(|s| s.order))
            .map(|a| a.floor);

        let Some(bounds) = LatLngBounds::from_points(coordinates.iter()) else {
            log::warn!("tour has no placed stops to frame");
            return;
        };
        if let Some(floor) = first_floor {
            self.switch_floor(floor);
        }
        self.move_camera(bounds.center(), self.options.camera.tour_overview_altitude);
    }

    /// Selects the annotation for `nid`, preferring tour stops on any floor
    /// over plain objects. No refresh.
    fn focus_artwork(&mut self, nid: &str) -> bool {
        let found = self
            .floors
            .iter()
            .find_map(|f| {
                f.tour_stops()
                    .iter()
                    .find(|a| a.artwork_id() == Some(nid))
            })
            .or_else(|| self.floors.iter().find_map(|f| f.find_annotation(nid)))
            .map(|a| {
                let number = a.as_tour_stop().map(|s| s.order);
                (a.floor, a.id.clone(), a.coordinate, number)
            });

        let Some((floor, id, coordinate, order)) = found else {
            log::debug!("no annotation for artwork {} on any floor", nid);
            return false;
        };

        self.switch_floor(floor);
        self.selection = Some(id);
        if let (Some(active), Some(order)) = (self.active_tour.as_mut(), order) {
            active.highlighted = Some(order);
        }
        if let Some(coordinate) = coordinate {
            self.move_camera(coordinate, self.options.camera.highlight_altitude);
        }
        true
    }

    fn tour_stop_for_audio(&self, audio: &AudioFile) -> Option<String> {
        let active = self.active_tour.as_ref()?;
        active
            .tour
            .stop_for_audio(audio)
            .map(|stop| stop.artwork.nid.clone())
    }

    fn stop_playing(&mut self, audio: &AudioFile) -> bool {
        if self.tour_stop_for_audio(audio).is_none() {
            return false;
        }
        let mut changed = false;
        for floor in self.floors.iter_mut() {
            changed |= floor.set_playing(None);
        }
        if let Some(active) = self.active_tour.as_mut() {
            active.playing = None;
        }
        changed
    }

    fn clear_transients(&mut self) {
        let mut delta = TransientDelta::default();
        for floor in self.floors.iter_mut() {
            delta.merge(floor.clear_transient());
        }
        if !delta.is_empty() {
            log::debug!("cleared {} transient annotations", delta.removed.len());
        }
    }

    fn switch_floor(&mut self, index: usize) {
        if index != self.current_floor {
            log::debug!("floor {} -> {}", self.current_floor, index);
            self.current_floor = index;
        }
        if self.mode != MapMode::Disabled {
            self.show_overlay();
        }
    }

    fn show_overlay(&mut self) {
        if self.overlay_shown == Some(self.current_floor) {
            return;
        }
        if let Some(previous) = self.overlay_shown.take() {
            self.surface.remove_overlay(previous);
        }
        if let Some(floor) = self.floors.get(self.current_floor) {
            self.surface.add_overlay(floor.overlay());
            self.overlay_shown = Some(self.current_floor);
        }
    }

    fn move_camera(&mut self, center: LatLng, altitude: f64) -> CameraTicket {
        let duration_ms = self.options.camera.duration_ms();
        let command = CameraCommand {
            center,
            altitude,
            heading: self.floors.converter().upright_heading(),
            animation: (duration_ms > 0).then_some(CameraAnimation {
                duration_ms,
                easing: self.options.camera.easing,
            }),
        };
        let (ticket, superseded) = self.camera.issue(command);
        if let Some(superseded) = superseded {
            log::debug!("camera {:?} supersedes {:?}", ticket, superseded);
        }
        self.surface.set_camera(ticket, &command);
        ticket
    }

    /// Brings the surface in line with the current state
    fn refresh(&mut self) {
        let tier = self.zoom.current_tier();
        let mut desired: Vec<(Annotation, VisualState, f32)> = Vec::new();
        if let Some(floor) = self.floors.get(self.current_floor) {
            for annotation in floor.annotations() {
                let Some(display_mode) =
                    mode::display_mode_for(self.mode, self.amenity_focus, annotation)
                else {
                    continue;
                };
                let ctx = ViewContext {
                    map_mode: self.mode,
                    display_mode,
                    selection: self.selection.as_ref(),
                    zoom_tier: tier,
                };
                let Some(state) = resolve_visual_state(annotation, &ctx) else {
                    continue;
                };
                let alpha = visibility_alpha(annotation, &state, tier, &self.options.visibility);
                desired.push((annotation.clone(), state, alpha));
            }
        }

        let stale: Vec<AnnotationId> = {
            let keep: HashSet<&AnnotationId> = desired.iter().map(|(a, _, _)| &a.id).collect();
            self.views
                .keys()
                .filter(|id| !keep.contains(id))
                .cloned()
                .collect()
        };
        for id in stale {
            if let Some(view) = self.views.remove(&id) {
                self.surface.remove_annotation(&id);
                if let Some(loader) = self.images.as_mut() {
                    loader.forget(view.slot());
                }
                self.pool.recycle(view);
            }
        }

        for (annotation, state, alpha) in desired {
            let view = match self.views.entry(annotation.id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.pool.dequeue(annotation.id.clone())),
            };

            let transitions = view.apply(state);
            if !transitions.is_empty() {
                log::trace!("{}: {:?}", annotation.id, transitions);
            }
            view.set_alpha(alpha);

            if layout_for(&annotation, &state).shows_image() {
                if let (Some(url), Some(loader)) =
                    (annotation.thumbnail_url(), self.images.as_mut())
                {
                    let known = view.image_url() == Some(url) || view.pending_image() == Some(url);
                    if !known {
                        let target = ImageTarget {
                            slot: view.slot(),
                            annotation: annotation.id.clone(),
                        };
                        match loader.request(url, target) {
                            ImageRequest::Cached(bytes) => view.set_image(url, bytes),
                            ImageRequest::Pending => view.await_image(url),
                        }
                    }
                }
            }

            let Some(render) =
                AnnotationRender::compose(&annotation, &state, view.alpha(), view.image().cloned())
            else {
                continue;
            };
            if view.update_render(&render) {
                self.surface.upsert_annotation(&render);
            }
        }
    }
}

impl<S: MapSurface + std::fmt::Debug> std::fmt::Debug for MapCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapCoordinator")
            .field("mode", &self.mode)
            .field("current_floor", &self.current_floor)
            .field("selection", &self.selection)
            .field("rendered", &self.views.len())
            .field("surface", &self.surface)
            .finish()
    }
}
