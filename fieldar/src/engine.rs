//! The overlay engine: sensor-driven recomputation of the HUD frame and the
//! 3d scene bundle.

use fieldar_types::{FeatureCollection, GeoPoint, Size};

use crate::error::FieldarError;
use crate::hud::{HudFrame, HudProjector};
use crate::messenger::Messenger;
use crate::options::OverlayOptions;
use crate::render::{Scene, SceneBuilder, SceneBundle};
use crate::sensors::{ObserverState, PositionFix, SensorStatus};
use crate::target::{extract_targets, Target};

/// Tag under which the engine's primitives live in the shared scene.
pub const OVERLAY_TAG: &str = "fieldar-overlay";

/// Single-threaded, event-driven overlay engine.
///
/// Every sensor sample, data change or configuration change triggers one
/// synchronous, complete recomputation of the aim targets (when the origin
/// or the collection changed), the 2d HUD frame and the 3d scene bundle.
/// Nothing is cached across events beyond the latest origin and heading, so
/// the pipeline must stay cheap enough to re-run on every tick; for the
/// expected feature counts (hundreds of targets) it is.
///
/// The engine is inactive until [`activate`](OverlayEngine::activate) is
/// called and goes back to a blank state on
/// [`deactivate`](OverlayEngine::deactivate); while inactive no events are
/// processed.
pub struct OverlayEngine {
    features: FeatureCollection,
    targets: Vec<Target>,
    observer: ObserverState,
    options: OverlayOptions,
    projector: HudProjector,
    hud_frame: HudFrame,
    scene: Scene,
    status: SensorStatus,
    active: bool,
    messenger: Option<Box<dyn Messenger>>,
}

impl OverlayEngine {
    /// Creates an inactive engine with the given options.
    pub fn new(options: OverlayOptions) -> Result<Self, FieldarError> {
        options.validate()?;
        Ok(Self {
            features: FeatureCollection::new(),
            targets: Vec::new(),
            observer: ObserverState::new(),
            options,
            projector: HudProjector::default(),
            hud_frame: HudFrame::default(),
            scene: Scene::new(),
            status: SensorStatus::Idle,
            active: false,
            messenger: None,
        })
    }

    /// Sets the messenger notified after each recomputation.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = match messenger {
            Some(m) => Some(Box::new(m)),
            None => None,
        };
    }

    /// Starts processing events. The first recomputation happens right away
    /// (with whatever data is already set).
    pub fn activate(&mut self) {
        if self.active {
            return;
        }

        self.active = true;
        self.rebuild_targets();
        self.recompute();
    }

    /// Stops processing events and removes the engine's bundle from the
    /// scene.
    ///
    /// All sensor state is dropped, so a later [`activate`] re-derives
    /// everything from scratch. Externally owned scene bundles are left
    /// alone.
    ///
    /// [`activate`]: OverlayEngine::activate
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }

        self.active = false;
        self.observer.reset();
        self.targets.clear();
        self.hud_frame = HudFrame::default();
        self.scene.remove_bundle(OVERLAY_TAG);
        self.status = SensorStatus::Idle;
        self.request_redraw();
    }

    /// Replaces the feature collection.
    pub fn set_features(&mut self, features: FeatureCollection) {
        self.features = features;
        if self.active {
            self.rebuild_targets();
            self.recompute();
        }
    }

    /// Replaces the render options.
    pub fn set_options(&mut self, options: OverlayOptions) -> Result<(), FieldarError> {
        options.validate()?;
        self.options = options;

        if self.active {
            // Options never affect distances or bearings, so the targets
            // are kept; only the projections are rebuilt.
            self.recompute();
        }

        Ok(())
    }

    /// Sets the HUD viewport size in pixels.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.projector = self.projector.clone().with_viewport(viewport);
        if self.active {
            self.recompute();
        }
    }

    /// Replaces the HUD projector (field of view, visible radius, viewport).
    pub fn set_projector(&mut self, projector: HudProjector) {
        self.projector = projector;
        if self.active {
            self.recompute();
        }
    }

    /// Feeds a new position fix. Targets are re-derived because every
    /// distance and bearing depends on the origin.
    pub fn position_update(&mut self, fix: PositionFix) {
        if !self.active {
            return;
        }

        self.status = SensorStatus::Granted;
        self.observer.position_update(fix);
        self.rebuild_targets();
        self.recompute();
    }

    /// Feeds a new heading sample, or `None` when the signal is lost.
    ///
    /// A `None` reading transitions the HUD back to the calibration prompt;
    /// no previous heading is cached.
    pub fn heading_update(&mut self, heading: Option<f64>) {
        if !self.active {
            return;
        }

        self.observer.heading_update(heading);
        self.recompute();
    }

    /// Records that sensor permission was denied or the sensors are
    /// unavailable.
    ///
    /// Non-fatal: the engine keeps projecting with the origin and heading it
    /// already has. The status is exposed for the embedding surface to act
    /// on.
    pub fn permission_denied(&mut self) {
        self.status = SensorStatus::Denied;
        if self.active {
            self.recompute();
        }
    }

    /// The HUD frame produced by the latest recomputation.
    pub fn hud_frame(&self) -> &HudFrame {
        &self.hud_frame
    }

    /// The shared scene. The engine owns exactly one bundle in it, tagged
    /// [`OVERLAY_TAG`]; foreign bundles are never touched.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable access to the shared scene, for external producers to manage
    /// their own bundles.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The current aim targets.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Current sensor permission status.
    pub fn sensor_status(&self) -> SensorStatus {
        self.status
    }

    /// Smoothed observer origin, if any fix has arrived.
    pub fn origin(&self) -> Option<GeoPoint> {
        self.observer.origin()
    }

    /// Accuracy radius of the latest fix in meters, if reported.
    pub fn accuracy(&self) -> Option<f64> {
        self.observer.accuracy()
    }

    /// True once a heading sample has arrived and none has been lost since.
    pub fn is_calibrated(&self) -> bool {
        self.observer.heading().is_some()
    }

    /// True while the engine processes events.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current render options.
    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    fn rebuild_targets(&mut self) {
        self.targets = match self.observer.origin() {
            Some(origin) => extract_targets(&origin, &self.features),
            None => Vec::new(),
        };
    }

    /// One full recomputation: HUD frame and scene bundle, then a redraw
    /// request. Serialized by `&mut self`; never blocks.
    fn recompute(&mut self) {
        let total_features = distinct_feature_count(&self.targets);

        self.hud_frame = match self.observer.heading() {
            Some(heading) => self.projector.project(&self.targets, heading),
            None => HudFrame::uncalibrated(total_features),
        };

        let bundle = match self.observer.origin() {
            Some(origin) => {
                SceneBuilder::new(origin, &self.options).build(&self.features, OVERLAY_TAG)
            }
            // No origin yet: still replace the bundle so stale primitives
            // cannot outlive the data that produced them.
            None => SceneBundle::new(OVERLAY_TAG),
        };
        self.scene.replace_bundle(bundle);

        log::debug!(
            "recomputed overlay: {} targets, {} visible, {} primitives",
            self.targets.len(),
            self.hud_frame.overlay_count,
            self.scene
                .bundle(OVERLAY_TAG)
                .map(SceneBundle::len)
                .unwrap_or(0),
        );

        self.request_redraw();
    }

    fn request_redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

fn distinct_feature_count(targets: &[Target]) -> usize {
    let mut indices: Vec<usize> = targets.iter().map(Target::feature_index).collect();
    indices.sort_unstable();
    indices.dedup();
    indices.len()
}
