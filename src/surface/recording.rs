use super::{AnnotationRender, MapSurface};
use crate::{
    annotation::AnnotationId,
    core::camera::{CameraCommand, CameraTicket},
    floor::FloorOverlay,
    prelude::HashMap,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    SetCamera(CameraTicket, CameraCommand),
    AddOverlay(usize),
    RemoveOverlay(usize),
    Upsert(AnnotationId),
    Remove(AnnotationId),
}

/// Headless surface that keeps what a real view would be showing, plus the
/// command log that got it there.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    annotations: HashMap<AnnotationId, AnnotationRender>,
    overlays: Vec<usize>,
    camera: Option<(CameraTicket, CameraCommand)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&AnnotationRender> {
        self.annotations.get(id)
    }

    /// Current renders, sorted by id
    pub fn annotations(&self) -> Vec<&AnnotationRender> {
        let mut renders: Vec<_> = self.annotations.values().collect();
        renders.sort_by(|a, b| a.id.cmp(&b.id));
        renders
    }

    /// Renders with nonzero alpha
    pub fn visible_annotations(&self) -> Vec<&AnnotationRender> {
        self.annotations()
            .into_iter()
            .filter(|r| r.alpha > 0.0)
            .collect()
    }

    pub fn overlays(&self) -> &[usize] {
        &self.overlays
    }

    pub fn camera(&self) -> Option<&(CameraTicket, CameraCommand)> {
        self.camera.as_ref()
    }
}

impl MapSurface for RecordingSurface {
    fn set_camera(&mut self, ticket: CameraTicket, command: &CameraCommand) {
        self.camera = Some((ticket, *command));
        self.commands.push(SurfaceCommand::SetCamera(ticket, *command));
    }

    fn add_overlay(&mut self, overlay: &FloorOverlay) {
        if !self.overlays.contains(&overlay.floor) {
            self.overlays.push(overlay.floor);
        }
        self.commands.push(SurfaceCommand::AddOverlay(overlay.floor));
    }

    fn remove_overlay(&mut self, floor: usize) {
        self.overlays.retain(|f| *f != floor);
        self.commands.push(SurfaceCommand::RemoveOverlay(floor));
    }

    fn upsert_annotation(&mut self, render: &AnnotationRender) {
        self.annotations.insert(render.id.clone(), render.clone());
        self.commands.push(SurfaceCommand::Upsert(render.id.clone()));
    }

    fn remove_annotation(&mut self, id: &AnnotationId) {
        self.annotations.remove(id);
        self.commands.push(SurfaceCommand::Remove(id.clone()));
    }
}
