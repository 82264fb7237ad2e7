//! The frame loop: steps every population once per frame, culls the dead,
//! runs deferred work and decides when new rockets go up.

use crate::audio::{Audio, Music, MusicLabel};
use crate::config::Config;
use crate::entities::Populations;
use crate::envelope::Envelope;
use crate::sequence::SequenceItem;
use crate::spawner::Spawner;
use crate::speech::{Speech, Utterance};
use crate::surface::{Blend, Point, Surface};
use crate::timers::{Deferred, Timers};
use fastrand::Rng;
use tracing::{debug, info};

/// Length of one frame of the simulation at 60 Hz.
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Share of the previous frame erased at the start of each frame.
pub const FADE: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// Per-frame probability of an ambient launch. Only ever raised once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnChance {
    current: f32,
    escalated: f32,
    has_escalated: bool,
}

impl SpawnChance {
    pub fn new(base: f32, escalated: f32) -> Self {
        Self { current: base, escalated, has_escalated: false }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    /// Switch to the escalated chance. Returns `false` if already done.
    pub fn escalate(&mut self) -> bool {
        if self.has_escalated {
            return false;
        }
        self.has_escalated = true;
        self.current = self.escalated;
        true
    }
}

/// Something the viewer did.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    PointerDown(Point),
    TouchStart(Vec<Point>),
    /// Open the envelope without pointing at it.
    OpenEnvelope,
    ToggleMusic,
}

pub struct Show<A: Audio> {
    state: LoopState,
    pops: Populations,
    spawner: Spawner,
    timers: Timers,
    chance: SpawnChance,
    sequence: Vec<SequenceItem>,
    escalate_after_ms: u64,
    open_delay_ms: u64,
    jitter_delay_ms: u64,
    greeting: String,
    envelope: Envelope,
    music: Music<A>,
    speech: Option<Box<dyn Speech>>,
    frame: u64,
}

impl<A: Audio> Show<A> {
    pub fn new(config: &Config, track: A) -> Self {
        let rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        Self {
            state: LoopState::Idle,
            pops: Populations::default(),
            spawner: Spawner::new(rng),
            timers: Timers::new(),
            chance: SpawnChance::new(config.base_chance, config.escalated_chance),
            sequence: config.sequence.clone(),
            escalate_after_ms: config.escalate_after_ms,
            open_delay_ms: config.open_delay_ms,
            jitter_delay_ms: config.jitter_delay_ms,
            greeting: config.greeting.clone(),
            envelope: Envelope::new(),
            music: Music::new(track, config.music_volume),
            speech: None,
            frame: 0,
        }
    }

    pub fn with_speech(mut self, speech: Box<dyn Speech>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_rng(mut self, rng: Rng) -> Self {
        self.spawner = Spawner::new(rng);
        self
    }

    /// Begin ticking. Has no effect once running.
    pub fn start(&mut self) {
        if self.state == LoopState::Idle {
            debug!("frame loop running");
            self.state = LoopState::Running;
        }
    }

    /// Run one frame, `elapsed_ms` after the previous one.
    pub fn tick(&mut self, surface: &mut dyn Surface, elapsed_ms: f64) {
        if self.state == LoopState::Idle {
            return;
        }
        self.frame += 1;
        let (width, height) = (surface.width(), surface.height());

        for action in self.timers.advance(elapsed_ms) {
            self.run_deferred(action, width, height);
        }

        surface.set_blend(Blend::SourceOver);
        surface.fade(FADE);

        let mut bursts = Vec::new();
        self.pops.fireworks.retain_mut(|firework| {
            if let Some(burst) = firework.update() {
                bursts.push(burst);
            }
            firework.draw(&mut *surface);
            !firework.is_dead()
        });
        for burst in bursts {
            self.spawner.burst(&mut self.pops, burst);
        }

        self.pops.particles.retain_mut(|particle| {
            particle.update();
            particle.draw(&mut *surface);
            !particle.is_dead()
        });

        self.pops.texts.retain_mut(|text| {
            text.update();
            text.draw(&mut *surface);
            !text.is_dead()
        });

        self.spawner
            .maybe_spawn_ambient(&mut self.pops, self.chance.current(), width, height);

        self.envelope.update(height);
        self.envelope.draw(surface);
    }

    pub fn handle_input(&mut self, input: Input, width: f32, height: f32) {
        match input {
            Input::PointerDown(point) => self.pointer_down(point, width, height),
            Input::TouchStart(points) => {
                for point in points {
                    self.pointer_down(point, width, height);
                }
            }
            Input::OpenEnvelope => {
                self.start_celebration();
            }
            Input::ToggleMusic => self.music.toggle(),
        }
    }

    fn pointer_down(&mut self, point: Point, width: f32, height: f32) {
        // The envelope swallows its own clicks.
        if self.envelope.contains(point, width, height) {
            self.start_celebration();
            return;
        }
        self.interact(point.x, point.y);
    }

    /// A pop where the viewer clicked, and a second one close by shortly after.
    pub fn interact(&mut self, x: f32, y: f32) {
        self.spawner.create_explosion(&mut self.pops, x, y, None);
        let (x, y) = self.spawner.jitter(x, y);
        self.timers.schedule(self.jitter_delay_ms, Deferred::Explosion { x, y });
        self.music.init();
    }

    /// Open the envelope: greet, start the music and queue the sequence.
    /// Returns `false` when the celebration had already started.
    pub fn start_celebration(&mut self) -> bool {
        if !self.envelope.activate() {
            return false;
        }
        info!(frame = self.frame, "celebration started");

        match self.speech.as_mut() {
            Some(speech) => speech.speak(&Utterance::greeting(&self.greeting)),
            None => debug!("no speech output, greeting skipped"),
        }
        self.music.init();
        self.timers.schedule(self.open_delay_ms, Deferred::StartSequence);
        true
    }

    /// Queue every captioned rocket at its own offset from now, and the
    /// escalation after them.
    pub fn launch_sequence(&mut self) {
        for item in &self.sequence {
            self.timers.schedule(item.delay_ms, Deferred::Launch(item.clone()));
        }
        self.timers.schedule(self.escalate_after_ms, Deferred::Escalate);
        debug!(items = self.sequence.len(), "greeting sequence queued");
    }

    fn run_deferred(&mut self, action: Deferred, width: f32, height: f32) {
        match action {
            Deferred::Explosion { x, y } => self.spawner.create_explosion(&mut self.pops, x, y, None),
            Deferred::Launch(item) => {
                debug!(text = %item.text, "launching captioned rocket");
                let firework = self.spawner.captioned_firework(&item, width, height);
                self.pops.fireworks.push(firework);
            }
            Deferred::StartSequence => self.launch_sequence(),
            Deferred::Escalate => {
                if self.chance.escalate() {
                    info!(chance = self.chance.current(), "ambient launches escalated");
                }
            }
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn populations(&self) -> &Populations {
        &self.pops
    }

    pub fn chance(&self) -> SpawnChance {
        self.chance
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn music(&self) -> &Music<A> {
        &self.music
    }

    pub fn music_label(&self) -> MusicLabel {
        self.music.label()
    }

    pub fn spawner(&mut self) -> &mut Spawner {
        &mut self.spawner
    }
}
