use crate::{MeshSettings, PointBuffer, SamplingRegion};
use log::*;
use pcm_core::nalgebra::Point2;
use pcm_core::{DebugOverlay, PointSource, SamplePoint, SceneQuery, Triangle};
use pcm_geom::DelaunayTriangulator;
use pcm_mesh::{
    GeometryAssembler, MeshBuffers, MeshGraph, QuadMeshBuilder, Renderer, TriangleFilter, UvMode,
    Verdict,
};
use std::sync::{mpsc, Mutex, PoisonError, TryLockError};

/// What a single pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Samples of this trigger that fell outside the sampling region.
    pub discarded: usize,
    /// Samples in the window that was triangulated.
    pub sampled: usize,
    pub triangles: usize,
    pub accepted: usize,
    pub rejected_size: usize,
    pub rejected_overlap: usize,
    pub rejected_unplaced: usize,
    /// Quads created by growing accepted quads.
    pub grown: usize,
    /// Quads in the mesh after the pass.
    pub quads: usize,
    /// Whether buffers were handed to the renderer.
    pub submitted: bool,
}

/// The result of [`MeshSession::trigger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Another pass was running, so nothing happened.
    Dropped,
    Built(BuildReport),
}

impl BuildOutcome {
    pub fn report(&self) -> Option<&BuildReport> {
        match self {
            BuildOutcome::Dropped => None,
            BuildOutcome::Built(report) => Some(report),
        }
    }
}

struct SessionState<S> {
    buffer: PointBuffer,
    graph: MeshGraph,
    scene: S,
}

/// The state that persists between passes, guarded so that only one pass mutates it at a time.
///
/// Every pass runs entirely inside the critical section, including the scene removals made by
/// the filter and the hand-off to the renderer.
pub struct MeshSession<S> {
    settings: MeshSettings,
    region: SamplingRegion,
    triangulator: DelaunayTriangulator,
    filter: TriangleFilter,
    builder: QuadMeshBuilder,
    assembler: GeometryAssembler,
    state: Mutex<SessionState<S>>,
}

impl<S> MeshSession<S>
where
    S: SceneQuery,
{
    /// Creates a session sampling from the part of a `width` by `height` viewport given by
    /// [`MeshSettings::screen_part`].
    pub fn new(settings: MeshSettings, width: f64, height: f64, scene: S) -> Self {
        Self {
            settings,
            region: settings.region(width, height),
            triangulator: settings.triangulator(),
            filter: settings.filter(),
            builder: settings.builder(),
            assembler: settings.assembler(),
            state: Mutex::new(SessionState {
                buffer: PointBuffer::new(settings.point_capacity),
                graph: MeshGraph::new(),
                scene,
            }),
        }
    }

    pub fn settings(&self) -> &MeshSettings {
        &self.settings
    }

    pub fn region(&self) -> &SamplingRegion {
        &self.region
    }

    /// Runs one pass over the window extended by `samples`.
    ///
    /// Returns [`BuildOutcome::Dropped`] without touching any state if another pass holds the
    /// session. The debug overlay, if any, receives the unfiltered triangulation.
    pub fn trigger<I, R>(
        &self,
        samples: I,
        renderer: &mut R,
        overlay: Option<&mut dyn DebugOverlay>,
    ) -> BuildOutcome
    where
        I: IntoIterator<Item = SamplePoint>,
        R: Renderer + ?Sized,
    {
        let mut guard = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                warn!("mesh build in progress, dropping trigger");
                return BuildOutcome::Dropped;
            }
            Err(TryLockError::Poisoned(poisoned)) => {
                warn!("a previous mesh build panicked, continuing with its state");
                poisoned.into_inner()
            }
        };
        let SessionState {
            buffer,
            graph,
            scene,
        } = &mut *guard;

        let mut report = BuildReport::default();
        for sample in samples {
            if self.region.contains(sample.screen()) {
                buffer.add(sample);
            } else {
                report.discarded += 1;
            }
        }

        let window = buffer.snapshot();
        report.sampled = window.len();
        let triangles = self.triangulator.triangulate(&window);
        report.triangles = triangles.len();
        if let Some(overlay) = overlay {
            overlay.draw_outlines(&triangles);
        }

        for triangle in &triangles {
            match self.filter.evaluate(triangle, graph, scene) {
                Verdict::Accepted => self.place(triangle, graph, scene, &mut report),
                Verdict::TooLarge => report.rejected_size += 1,
                Verdict::Overlapping(_) => report.rejected_overlap += 1,
                Verdict::Unplaced => report.rejected_unplaced += 1,
            }
        }
        report.quads = graph.len();

        if graph.is_empty() {
            debug!("no quads placed yet, nothing to render");
        } else {
            let buffers = self.assembler.assemble(graph.quads());
            renderer.submit(buffers, self.settings.uv_mode);
            report.submitted = true;
        }
        debug!("{:?}", report);
        BuildOutcome::Built(report)
    }

    fn place(
        &self,
        triangle: &Triangle,
        graph: &mut MeshGraph,
        scene: &mut S,
        report: &mut BuildReport,
    ) {
        let quad = match self.builder.quad_from_triangle(triangle) {
            Some(quad) => quad,
            None => {
                report.rejected_unplaced += 1;
                return;
            }
        };
        let key = graph.insert(quad);
        scene.place(key, triangle.screen_corners());
        report.accepted += 1;
        if self.settings.grow_accepted {
            report.grown += self.builder.grow(graph, key).len();
        }
    }

    /// Triggers a pass for every tick of `source` until it runs dry.
    ///
    /// Returns the reports of the passes that were not dropped.
    pub fn run<P, R>(&self, source: &mut P, renderer: &mut R) -> Vec<BuildReport>
    where
        P: PointSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut reports = vec![];
        while let Some(samples) = source.next_samples() {
            if let BuildOutcome::Built(report) = self.trigger(samples, renderer, None) {
                reports.push(report);
            }
        }
        info!("replayed {} passes", reports.len());
        reports
    }

    /// Forgets every sample and every quad, waiting for any running pass to finish.
    pub fn reset(&self) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let SessionState {
            buffer,
            graph,
            scene,
        } = &mut *guard;
        for key in graph.keys() {
            scene.remove(key);
        }
        graph.clear();
        buffer.clear();
        info!("mesh session reset");
    }

    /// The number of quads in the mesh, waiting for any running pass to finish.
    pub fn quad_count(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .graph
            .len()
    }

    /// The number of samples in the window, waiting for any running pass to finish.
    pub fn window_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .buffer
            .len()
    }
}

/// Finished buffers on their way to the rendering thread.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBatch {
    pub buffers: MeshBuffers,
    pub uv_mode: UvMode,
}

/// A [`Renderer`] that forwards every submission over a channel.
///
/// Sending never blocks, so the session can hand off buffers from inside its critical section.
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    sender: mpsc::Sender<RenderBatch>,
}

impl ChannelRenderer {
    /// Creates a renderer and the receiving end that the rendering thread drains.
    pub fn channel() -> (Self, mpsc::Receiver<RenderBatch>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }
}

impl Renderer for ChannelRenderer {
    fn submit(&mut self, buffers: MeshBuffers, uv_mode: UvMode) {
        if self.sender.send(RenderBatch { buffers, uv_mode }).is_err() {
            warn!("render target is gone, dropping batch");
        }
    }
}

/// A [`DebugOverlay`] that keeps the outlines of the latest triangulation.
#[derive(Debug, Clone, Default)]
pub struct OverlayRecorder {
    outlines: Vec<[Point2<f64>; 4]>,
    passes: usize,
}

impl OverlayRecorder {
    pub fn new() -> Self {
        Default::default()
    }

    /// The closed outlines drawn by the latest pass.
    pub fn outlines(&self) -> &[[Point2<f64>; 4]] {
        &self.outlines
    }

    /// The number of passes that have drawn so far.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

impl DebugOverlay for OverlayRecorder {
    fn draw_outlines(&mut self, triangles: &[Triangle]) {
        self.outlines = triangles.iter().map(Triangle::outline).collect();
        self.passes += 1;
    }
}
