pub mod model;
pub mod state;
pub mod view;

pub use model::{
    Annotation, AnnotationId, AnnotationKind, ArtworkAnnotation, LiveLocationAnnotation,
    LiveLocationSource, TourStopAnnotation,
};
pub use state::{
    density_rank, layout_for, resolve_visual_state, visibility_alpha, DisplayMode, Layout,
    ThumbnailSize, ViewContext, VisualState,
};
pub use view::{AnnotationView, AnnotationViewPool, ViewSlot, ViewTransition};
