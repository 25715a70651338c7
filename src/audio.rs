//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed. The simulation
//! only names a [`Cue`]; this module decides what it sounds like.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::Cue;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    /// Background drone, present while music is playing
    music: Option<(OscillatorNode, GainNode)>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
            music: None,
        }
    }

    /// Re-read volumes after the settings change
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        if let (Some(ctx), Some((_, gain))) = (&self.ctx, &self.music) {
            gain.gain()
                .set_value_at_time(self.music_volume * 0.15, ctx.current_time())
                .ok();
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a cue; failures are ignored
    pub fn play(&mut self, cue: Cue) {
        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.sfx_volume;
        if cue != Cue::Music && vol <= 0.0 {
            return;
        }

        match cue {
            Cue::Music => self.start_music(&ctx),
            Cue::CoinPickup => self.play_coin(&ctx, vol),
            Cue::MoneyPickup => self.play_money(&ctx, vol),
            Cue::EnemyCaught => self.play_caught(&ctx, vol),
            Cue::Damage => self.play_damage(&ctx, vol),
            Cue::VacuumOn => self.play_vacuum(&ctx, vol),
            Cue::InvincibilityOn => self.play_horn(&ctx, vol),
        }
    }

    /// Stop the background loop (tab hidden)
    pub fn pause_music(&mut self) {
        if let Some((osc, _)) = self.music.take() {
            osc.stop().ok();
        }
    }

    /// Restart the background loop if it is not running
    pub fn resume_music(&mut self) {
        if let Some(ctx) = self.ctx.clone() {
            self.start_music(&ctx);
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Low triangle drone, loops until paused
    fn start_music(&mut self, ctx: &AudioContext) {
        if self.music.is_some() || self.music_volume <= 0.0 {
            return;
        }
        let Some((osc, gain)) = self.create_osc(ctx, 55.0, OscillatorType::Triangle) else {
            return;
        };
        gain.gain()
            .set_value_at_time(self.music_volume * 0.15, ctx.current_time())
            .ok();
        osc.start().ok();
        self.music = Some((osc, gain));
    }

    /// Coin - quick upward sniff
    fn play_coin(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(700.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1400.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Money bag - cash register ding
    fn play_money(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [800.0, 1200.0, 1600.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.25).ok();
            }
        }
    }

    /// Enemy caught - high shriek sliding down
    fn play_caught(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(1800.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(600.0, t + 0.5)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.55).ok();
    }

    /// Damage - harsh low yell
    fn play_damage(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(90.0, t + 0.3)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.35).ok();
        }

        // Sub bass punch
        if let Some((osc, gain)) = self.create_osc(ctx, 50.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }

    /// Vacuum - rising hum
    fn play_vacuum(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.01, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.15, t + 0.2)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.8)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(480.0, t + 0.8)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.9).ok();
    }

    /// Invincibility - two-tone truck horn
    fn play_horn(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [311.0, 370.0].iter().enumerate() {
            let delay = i as f64 * 0.25;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.2, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}
