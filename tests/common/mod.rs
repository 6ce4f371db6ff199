#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use temporizador::{
    controller::{FeedbackPlayer, ManualTickScheduler, VibrationPattern},
    services::VolumeCell,
    state::{Phase, SoundVariant},
    CountdownController, TimerConfig,
};

/// A feedback request seen by [`RecordingPlayer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Sound(SoundVariant),
    Vibrate(VibrationPattern),
    SoundAndVibrate(SoundVariant),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    calls: Arc<Mutex<Vec<Feedback>>>,
}

impl RecordingPlayer {
    pub fn calls(&self) -> Vec<Feedback> {
        self.calls.lock().unwrap().clone()
    }
}

impl FeedbackPlayer for RecordingPlayer {
    fn play_sound(&self, variant: SoundVariant) {
        self.calls.lock().unwrap().push(Feedback::Sound(variant));
    }

    fn vibrate(&self, pattern: VibrationPattern) {
        self.calls.lock().unwrap().push(Feedback::Vibrate(pattern));
    }

    fn play_sound_and_vibrate(&self, variant: SoundVariant) {
        self.calls.lock().unwrap().push(Feedback::SoundAndVibrate(variant));
    }
}

pub struct Harness {
    pub controller: CountdownController,
    pub volume: VolumeCell,
    pub player: RecordingPlayer,
    pub ticks: ManualTickScheduler,
}

impl Harness {
    pub fn new(duration_seconds: u32) -> Self {
        let volume = VolumeCell::new();
        let player = RecordingPlayer::default();
        let ticks = ManualTickScheduler::new();
        let controller = CountdownController::new(
            TimerConfig::new(duration_seconds),
            Box::new(volume.clone()),
            Box::new(player.clone()),
            Box::new(ticks.clone()),
        );

        Self {
            controller,
            volume,
            player,
            ticks,
        }
    }

    pub fn tick_n(&mut self, n: usize) {
        for _ in 0..n {
            self.controller.tick();
        }
    }

    /// Harness with the controller already in `phase`
    pub fn in_phase(duration_seconds: u32, phase: Phase) -> Self {
        let mut harness = Self::new(duration_seconds);
        let controller = &mut harness.controller;

        if phase == Phase::Idle {
            return harness;
        }
        controller.begin().unwrap();
        if phase == Phase::Arming {
            return harness;
        }

        harness.volume.set(Some(1.0));
        harness.controller.tick();
        match phase {
            Phase::Running => {}
            Phase::Paused => harness.controller.pause().unwrap(),
            Phase::Completed => harness.tick_n(duration_seconds as usize),
            Phase::Idle | Phase::Arming => unreachable!(),
        }

        assert_eq!(harness.controller.phase(), phase);
        harness
    }
}
