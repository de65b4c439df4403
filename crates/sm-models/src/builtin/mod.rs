//! Built-in Model Library (C2, §4.2): ~24 concrete animation models.

pub mod attract_repel;
pub mod bezier;
pub mod bounce;
pub mod catmull_rom;
pub mod circular;
pub mod circular_scan;
pub mod custom_keyframe;
pub mod doppler;
pub mod elliptical;
pub mod epicycloid;
pub mod formation;
pub mod helix;
pub mod linear;
pub mod lissajous;
pub mod orbit;
pub mod pendulum;
pub mod perlin;
pub mod random;
pub mod rose;
pub mod spiral;
pub mod spring;
pub mod wave;
pub mod zigzag;
pub mod zoom;

use crate::registry::ModelRegistry;
use std::sync::Arc;

/// Register every built-in model. Called once at process startup; the
/// returned registry is then treated as immutable (§4.1).
pub fn register_all(registry: &mut ModelRegistry) {
    let models: Vec<Arc<dyn crate::model::Model>> = vec![
        Arc::new(linear::LinearModel::default()),
        Arc::new(circular::CircularModel::default()),
        Arc::new(elliptical::EllipticalModel::default()),
        Arc::new(spiral::SpiralModel::default()),
        Arc::new(helix::HelixModel::default()),
        Arc::new(lissajous::LissajousModel::default()),
        Arc::new(wave::WaveModel::default()),
        Arc::new(bezier::BezierModel::default()),
        Arc::new(catmull_rom::CatmullRomModel::default()),
        Arc::new(zigzag::ZigzagModel::default()),
        Arc::new(pendulum::PendulumModel::default()),
        Arc::new(spring::SpringModel::default()),
        Arc::new(bounce::BounceModel::default()),
        Arc::new(attract_repel::AttractRepelModel::default()),
        Arc::new(orbit::OrbitModel::default()),
        Arc::new(perlin::PerlinModel::default()),
        Arc::new(rose::RoseCurveModel::default()),
        Arc::new(epicycloid::EpicycloidModel::default()),
        Arc::new(doppler::DopplerModel::default()),
        Arc::new(circular_scan::CircularScanModel::default()),
        Arc::new(zoom::ZoomModel::default()),
        Arc::new(random::RandomModel::default()),
        Arc::new(formation::FormationModel::default()),
        Arc::new(custom_keyframe::CustomKeyframeModel::default()),
    ];

    for model in models {
        if let Err(errors) = registry.register(model) {
            for err in errors {
                log::warn!("skipped built-in model registration: {}", err.message);
            }
        }
    }
}
