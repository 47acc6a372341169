use super::{
    model::AnnotationId,
    state::{DisplayMode, VisualState},
};
use crate::{core::constants::VIEW_POOL_CAPACITY, surface::AnnotationRender};
use std::sync::Arc;

/// Stable handle of a pooled view. Survives rebinding to another annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewSlot(pub u64);

/// A single step a view animates through
#[derive(Debug, Clone, PartialEq)]
pub enum ViewTransition {
    /// First state after binding
    Present(VisualState),
    Select(DisplayMode),
    Deselect(DisplayMode),
    ChangeMode { from: DisplayMode, to: DisplayMode },
    SetTourNumber(Option<u32>),
}

/// Stateful presentation of one annotation
#[derive(Debug)]
pub struct AnnotationView {
    slot: ViewSlot,
    bound: AnnotationId,
    state: Option<VisualState>,
    alpha: f32,
    image_url: Option<String>,
    image: Option<Arc<Vec<u8>>>,
    pending_image: Option<String>,
    last_render: Option<AnnotationRender>,
}

impl AnnotationView {
    pub fn new(slot: ViewSlot, bound: AnnotationId) -> Self {
        Self {
            slot,
            bound,
            state: None,
            alpha: 1.0,
            image_url: None,
            image: None,
            pending_image: None,
            last_render: None,
        }
    }

    pub fn slot(&self) -> ViewSlot {
        self.slot
    }

    pub fn bound(&self) -> &AnnotationId {
        &self.bound
    }

    pub fn state(&self) -> Option<&VisualState> {
        self.state.as_ref()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn image(&self) -> Option<&Arc<Vec<u8>>> {
        self.image.as_ref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn pending_image(&self) -> Option<&str> {
        self.pending_image.as_deref()
    }

    /// Moves the view to `next`, returning the transitions to animate.
    ///
    /// Re-applying the current state yields nothing. A mode change while
    /// selected deselects under the old mode before selecting under the new.
    pub fn apply(&mut self, next: VisualState) -> Vec<ViewTransition> {
        let Some(current) = self.state.replace(next) else {
            return vec![ViewTransition::Present(next)];
        };
        if current == next {
            return Vec::new();
        }

        let mut transitions = Vec::new();
        if current.mode != next.mode {
            if current.selected {
                transitions.push(ViewTransition::Deselect(current.mode));
            }
            transitions.push(ViewTransition::ChangeMode {
                from: current.mode,
                to: next.mode,
            });
            if next.selected {
                transitions.push(ViewTransition::Select(next.mode));
            }
        } else if current.selected != next.selected {
            transitions.push(if next.selected {
                ViewTransition::Select(next.mode)
            } else {
                ViewTransition::Deselect(next.mode)
            });
        }

        if current.in_tour != next.in_tour || current.tour_stop_number != next.tour_stop_number {
            transitions.push(ViewTransition::SetTourNumber(next.tour_stop_number));
        }
        transitions
    }

    /// Returns true when the alpha actually changed
    pub fn set_alpha(&mut self, alpha: f32) -> bool {
        if (self.alpha - alpha).abs() < f32::EPSILON {
            return false;
        }
        self.alpha = alpha;
        true
    }

    /// Records an outstanding request for `url`
    pub fn await_image(&mut self, url: &str) {
        self.pending_image = Some(url.to_string());
    }

    pub fn set_image(&mut self, url: &str, bytes: Arc<Vec<u8>>) {
        self.image_url = Some(url.to_string());
        self.image = Some(bytes);
        if self.pending_image.as_deref() == Some(url) {
            self.pending_image = None;
        }
    }

    pub fn clear_pending_image(&mut self) {
        self.pending_image = None;
    }

    /// Whether an image fetched for (`bound`, `url`) may still be shown here
    pub fn accepts_image(&self, bound: &AnnotationId, url: &str) -> bool {
        &self.bound == bound && self.pending_image.as_deref() == Some(url)
    }

    /// Stores `render` and reports whether it differs from the last one sent
    pub fn update_render(&mut self, render: &AnnotationRender) -> bool {
        if self.last_render.as_ref() == Some(render) {
            return false;
        }
        self.last_render = Some(render.clone());
        true
    }

    /// Resets everything tied to the previous annotation
    pub fn prepare_for_reuse(&mut self, bound: AnnotationId) {
        self.bound = bound;
        self.state = None;
        self.alpha = 1.0;
        self.image_url = None;
        self.image = None;
        self.pending_image = None;
        self.last_render = None;
    }
}

/// Free list of views waiting to be rebound
#[derive(Debug)]
pub struct AnnotationViewPool {
    free: Vec<AnnotationView>,
    capacity: usize,
    next_slot: u64,
}

impl AnnotationViewPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::new(),
            capacity,
            next_slot: 0,
        }
    }

    /// Reuses the most recently recycled view, or creates one
    pub fn dequeue(&mut self, bound: AnnotationId) -> AnnotationView {
        match self.free.pop() {
            Some(mut view) => {
                log::trace!("reusing view {:?} for {}", view.slot, bound);
                view.prepare_for_reuse(bound);
                view
            }
            None => {
                self.next_slot += 1;
                AnnotationView::new(ViewSlot(self.next_slot), bound)
            }
        }
    }

    pub fn recycle(&mut self, mut view: AnnotationView) {
        if self.free.len() >= self.capacity {
            return;
        }
        // a recycled view must never accept a late image
        view.clear_pending_image();
        self.free.push(view);
    }

    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

impl Default for AnnotationViewPool {
    fn default() -> Self {
        Self::new(VIEW_POOL_CAPACITY)
    }
}
