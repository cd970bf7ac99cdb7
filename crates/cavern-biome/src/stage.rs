//! Active-biome context: applies a biome's effects and tears them down again.

use cavern_audio::AudioDirector;
use tracing::{debug, info};

use crate::particles::{EmitterTuning, ParticleKind};
use crate::profile::{BiomeId, BiomeProfile, Color};
use crate::registry::BiomeRegistry;

/// Opaque handle to a spawned presentation effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectHandle(pub u64);

/// Presentation collaborator. Implementations draw; the stage only tracks
/// handles.
pub trait EffectsBackend {
    /// Set the camera clear color.
    fn set_background(&mut self, color: Color);

    /// Start an ambient particle emitter.
    fn spawn_particles(
        &mut self,
        kind: ParticleKind,
        color: Color,
        tuning: &EmitterTuning,
    ) -> EffectHandle;

    /// Add a full-screen fog overlay.
    fn spawn_fog(&mut self, color: Color, opacity: f32) -> EffectHandle;

    /// Remove a previously spawned effect.
    fn destroy(&mut self, handle: EffectHandle);
}

/// Backend for runs without a renderer. Counts live effects and logs calls.
#[derive(Debug, Default)]
pub struct HeadlessEffects {
    next: u64,
    live: Vec<EffectHandle>,
    background: Color,
}

impl HeadlessEffects {
    /// New backend with nothing spawned.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of effects spawned and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Last background color set.
    pub fn background(&self) -> Color {
        self.background
    }

    fn allocate(&mut self) -> EffectHandle {
        self.next += 1;
        let handle = EffectHandle(self.next);
        self.live.push(handle);
        handle
    }
}

impl EffectsBackend for HeadlessEffects {
    fn set_background(&mut self, color: Color) {
        debug!("background -> {color}");
        self.background = color;
    }

    fn spawn_particles(
        &mut self,
        kind: ParticleKind,
        color: Color,
        tuning: &EmitterTuning,
    ) -> EffectHandle {
        let handle = self.allocate();
        debug!(
            "particles {:?} {color} every {}ms -> {:?}",
            kind, tuning.frequency_ms, handle
        );
        handle
    }

    fn spawn_fog(&mut self, color: Color, opacity: f32) -> EffectHandle {
        let handle = self.allocate();
        debug!("fog {color} @ {opacity} -> {:?}", handle);
        handle
    }

    fn destroy(&mut self, handle: EffectHandle) {
        self.live.retain(|h| *h != handle);
    }
}

/// Owns the biome registry and the effects of the currently active biome.
pub struct BiomeStage {
    registry: BiomeRegistry,
    backend: Box<dyn EffectsBackend>,
    current: Option<BiomeProfile>,
    handles: Vec<EffectHandle>,
}

impl BiomeStage {
    /// Stage with no active biome.
    pub fn new(registry: BiomeRegistry, backend: Box<dyn EffectsBackend>) -> Self {
        Self {
            registry,
            backend,
            current: None,
            handles: Vec::new(),
        }
    }

    /// The registry biomes are resolved against.
    pub fn registry(&self) -> &BiomeRegistry {
        &self.registry
    }

    /// Mutable registry access for runtime registration.
    pub fn registry_mut(&mut self) -> &mut BiomeRegistry {
        &mut self.registry
    }

    /// Profile of the active biome.
    pub fn current(&self) -> Option<&BiomeProfile> {
        self.current.as_ref()
    }

    /// Number of effect handles held for the active biome.
    pub fn live_effects(&self) -> usize {
        self.handles.len()
    }

    /// Make `id` the active biome. The previous biome is fully deactivated
    /// before any new effect is spawned.
    pub fn activate(&mut self, id: &BiomeId, audio: &mut AudioDirector) -> BiomeProfile {
        self.deactivate(audio);

        let profile = self.registry.resolve(id).clone();
        let visuals = &profile.visuals;
        self.backend.set_background(visuals.background);
        if let Some(fog) = visuals.fog {
            self.handles
                .push(self.backend.spawn_fog(fog.color, fog.opacity));
        }
        if let Some(kind) = visuals.particles {
            let handle = self
                .backend
                .spawn_particles(kind, visuals.particle_color, &kind.tuning());
            self.handles.push(handle);
        }
        if let Some(key) = &profile.audio.ambient_sound {
            audio.start_ambient(key, profile.audio.ambient_volume);
        }

        info!("Activated biome '{}'", profile.id);
        self.current = Some(profile.clone());
        profile
    }

    /// Destroy every live effect, stop the ambient sound and clear the
    /// active biome.
    pub fn deactivate(&mut self, audio: &mut AudioDirector) {
        for handle in self.handles.drain(..) {
            self.backend.destroy(handle);
        }
        audio.stop_ambient();
        if let Some(previous) = self.current.take() {
            debug!("Deactivated biome '{}'", previous.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_audio::NullSink;
    use cavern_config::AudioConfig;
    use cavern_storage::MemoryStorage;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Background(Color),
        Particles(ParticleKind, EffectHandle),
        Fog(EffectHandle),
        Destroy(EffectHandle),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        live: HashSet<EffectHandle>,
        next: u64,
    }

    #[derive(Default, Clone)]
    struct RecordingBackend(Rc<RefCell<Recorder>>);

    impl EffectsBackend for RecordingBackend {
        fn set_background(&mut self, color: Color) {
            self.0.borrow_mut().calls.push(Call::Background(color));
        }

        fn spawn_particles(
            &mut self,
            kind: ParticleKind,
            _color: Color,
            _tuning: &EmitterTuning,
        ) -> EffectHandle {
            let mut rec = self.0.borrow_mut();
            rec.next += 1;
            let handle = EffectHandle(rec.next);
            rec.live.insert(handle);
            rec.calls.push(Call::Particles(kind, handle));
            handle
        }

        fn spawn_fog(&mut self, _color: Color, _opacity: f32) -> EffectHandle {
            let mut rec = self.0.borrow_mut();
            rec.next += 1;
            let handle = EffectHandle(rec.next);
            rec.live.insert(handle);
            rec.calls.push(Call::Fog(handle));
            handle
        }

        fn destroy(&mut self, handle: EffectHandle) {
            let mut rec = self.0.borrow_mut();
            rec.live.remove(&handle);
            rec.calls.push(Call::Destroy(handle));
        }
    }

    fn setup() -> (BiomeStage, Rc<RefCell<Recorder>>, AudioDirector) {
        let backend = RecordingBackend::default();
        let recorder = backend.0.clone();
        let stage = BiomeStage::new(BiomeRegistry::builtin(), Box::new(backend));
        let mut storage = MemoryStorage::new();
        cavern_storage::Storage::write(&mut storage, cavern_audio::MUSIC_ENABLED_KEY, "false")
            .unwrap();
        let audio = AudioDirector::new(
            Box::new(NullSink),
            Box::new(storage),
            AudioConfig::default(),
        );
        (stage, recorder, audio)
    }

    #[test]
    fn test_activate_spawns_fog_and_particles() {
        let (mut stage, recorder, mut audio) = setup();
        let profile = stage.activate(&BiomeId::Arctic, &mut audio);
        assert_eq!(profile.id, BiomeId::Arctic);
        assert_eq!(stage.live_effects(), 2);
        let rec = recorder.borrow();
        assert_eq!(rec.calls[0], Call::Background(Color(0x001a4d)));
        assert!(matches!(rec.calls[1], Call::Fog(_)));
        assert!(matches!(rec.calls[2], Call::Particles(ParticleKind::Snow, _)));
        assert_eq!(audio.ambient_key(), Some("wind-ambient"));
        assert!(audio.is_ambient_playing());
    }

    #[test]
    fn test_switching_destroys_previous_first() {
        let (mut stage, recorder, mut audio) = setup();
        stage.activate(&BiomeId::Lava, &mut audio);
        let lava_handles: Vec<EffectHandle> = recorder.borrow().live.iter().copied().collect();
        assert_eq!(lava_handles.len(), 2);

        stage.activate(&BiomeId::Toxic, &mut audio);
        let rec = recorder.borrow();
        let first_toxic_spawn = rec
            .calls
            .iter()
            .rposition(|c| matches!(c, Call::Background(Color(0x0a1a00))))
            .unwrap();
        for handle in lava_handles {
            let destroyed_at = rec
                .calls
                .iter()
                .position(|c| *c == Call::Destroy(handle))
                .unwrap();
            assert!(destroyed_at < first_toxic_spawn);
        }
        assert_eq!(rec.live.len(), 2);
        assert_eq!(audio.ambient_key(), Some("toxic-ambient"));
    }

    #[test]
    fn test_deactivate_leaves_no_handles() {
        let (mut stage, recorder, mut audio) = setup();
        stage.activate(&BiomeId::Slime, &mut audio);
        stage.activate(&BiomeId::Crystal, &mut audio);
        stage.deactivate(&mut audio);
        assert!(recorder.borrow().live.is_empty());
        assert_eq!(stage.live_effects(), 0);
        assert!(stage.current().is_none());
        assert_eq!(audio.ambient_key(), None);
    }

    #[test]
    fn test_cavern_spawns_no_effects() {
        let (mut stage, recorder, mut audio) = setup();
        stage.activate(&BiomeId::Cavern, &mut audio);
        assert_eq!(stage.live_effects(), 0);
        assert_eq!(recorder.borrow().calls, vec![Call::Background(Color::BLACK)]);
        assert_eq!(stage.current().map(|p| p.name.as_str()), Some("Cavern"));
    }

    #[test]
    fn test_unknown_biome_activates_neutral() {
        let (mut stage, _recorder, mut audio) = setup();
        let profile = stage.activate(&BiomeId::Custom("void".to_string()), &mut audio);
        assert_eq!(profile, BiomeProfile::neutral());
        assert_eq!(stage.live_effects(), 0);
    }

    #[test]
    fn test_headless_backend_tracks_live_effects() {
        let mut stage = BiomeStage::new(BiomeRegistry::builtin(), Box::new(HeadlessEffects::new()));
        let mut audio = AudioDirector::new(
            Box::new(NullSink),
            Box::new(MemoryStorage::new()),
            AudioConfig::default(),
        );
        stage.activate(&BiomeId::Forest, &mut audio);
        assert_eq!(stage.live_effects(), 1);
        stage.deactivate(&mut audio);
        assert_eq!(stage.live_effects(), 0);
    }
}
