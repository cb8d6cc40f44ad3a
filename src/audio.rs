//! Audio synthesis using the Web Audio API
//!
//! Procedurally generated sound effects - no audio assets. The simulation
//! decides *when* an effect fires; this layer only decides how it sounds.

use web_sys::{
    AudioBufferSourceNode, AudioContext, BiquadFilterType, GainNode, OscillatorNode,
    OscillatorType,
};

use crate::sim::{AsteroidSize, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Asteroid destroyed; length and pitch follow the size
    Explosion(AsteroidSize),
    /// Ship destroyed
    ShipExplosion,
    /// New wave beyond the first
    LevelUp,
    /// Run ended
    GameOver,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Shoot => SoundEffect::Shoot,
            GameEvent::Explosion(size) => SoundEffect::Explosion(size),
            GameEvent::ShipExplosion => SoundEffect::ShipExplosion,
            GameEvent::LevelUp => SoundEffect::LevelUp,
            GameEvent::GameOver => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Looping thrust rumble, present while it plays
    thrust: Option<(AudioBufferSourceNode, GainNode)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            thrust: None,
        }
    }

    /// Resume the audio context (browsers require a user gesture first)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.stop_thrust();
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a fire-and-forget sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shoot => self.play_shoot(ctx, vol),
            SoundEffect::Explosion(size) => self.play_explosion(ctx, vol, size),
            SoundEffect::ShipExplosion => self.play_ship_explosion(ctx, vol),
            SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
        }
    }

    /// Level-triggered thrust rumble: starts on the rising edge, fades out
    /// on the falling edge.
    pub fn set_thrust(&mut self, active: bool) {
        if active && self.thrust.is_none() {
            self.start_thrust();
        } else if !active && self.thrust.is_some() {
            self.stop_thrust();
        }
    }

    // === Sound generators ===

    /// Create an oscillator wired through a gain node to the destination
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

    /// White-noise buffer source of the given duration
    fn create_noise(&self, ctx: &AudioContext, duration: f64) -> Option<AudioBufferSourceNode> {
        let sample_rate = ctx.sample_rate();
        let len = (sample_rate as f64 * duration) as u32;
        let buffer = ctx.create_buffer(1, len, sample_rate).ok()?;

        let mut data = vec![0.0f32; len as usize];
        for sample in data.iter_mut() {
            *sample = js_sys::Math::random() as f32 * 2.0 - 1.0;
        }
        buffer.copy_to_channel(&mut data, 0).ok()?;

        let source = ctx.create_buffer_source().ok()?;
        source.set_buffer(Some(&buffer));
        Some(source)
    }

    /// Shoot - descending square zap
    fn play_shoot(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 600.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(600.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(100.0, t + 0.15)
            .ok();
        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }

    /// Asteroid explosion - filtered noise burst; bigger rocks rumble longer
    /// and lower
    fn play_explosion(&self, ctx: &AudioContext, vol: f32, size: AsteroidSize) {
        let (duration, freq, boost) = match size {
            AsteroidSize::Large => (0.4, 200.0, 0.25),
            AsteroidSize::Medium => (0.3, 400.0, 0.2),
            AsteroidSize::Small => (0.2, 800.0, 0.15),
        };

        let Some(noise) = self.create_noise(ctx, duration) else {
            return;
        };
        let Some(filter) = ctx.create_biquad_filter().ok() else {
            return;
        };
        let Some(gain) = ctx.create_gain().ok() else {
            return;
        };
        let t = ctx.current_time();

        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value_at_time(freq, t).ok();
        filter
            .frequency()
            .exponential_ramp_to_value_at_time(60.0, t + duration)
            .ok();

        gain.gain().set_value_at_time(vol * boost, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + duration)
            .ok();

        noise.connect_with_audio_node(&filter).ok();
        filter.connect_with_audio_node(&gain).ok();
        gain.connect_with_audio_node(&ctx.destination()).ok();
        noise.start().ok();
        noise.stop_with_when(t + duration).ok();
    }

    /// Ship explosion - heavy noise burst plus a low sine sweep
    fn play_ship_explosion(&self, ctx: &AudioContext, vol: f32) {
        let duration = 0.6;
        let t = ctx.current_time();

        if let (Some(noise), Ok(filter), Ok(gain)) = (
            self.create_noise(ctx, duration),
            ctx.create_biquad_filter(),
            ctx.create_gain(),
        ) {
            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value_at_time(300.0, t).ok();
            filter
                .frequency()
                .exponential_ramp_to_value_at_time(40.0, t + duration)
                .ok();
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + duration)
                .ok();

            noise.connect_with_audio_node(&filter).ok();
            filter.connect_with_audio_node(&gain).ok();
            gain.connect_with_audio_node(&ctx.destination()).ok();
            noise.start().ok();
            noise.stop_with_when(t + duration).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 150.0, OscillatorType::Sine) {
            osc.frequency().set_value_at_time(150.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + duration)
                .ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + duration)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }
    }

    /// Level up - rising square arpeggio
    fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
        let now = ctx.current_time();
        for (i, freq) in [330.0, 440.0, 550.0, 660.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                continue;
            };
            let start = now + i as f64 * 0.1;
            gain.gain().set_value_at_time(0.0, start).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.1, start + 0.02)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, start + 0.12)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.12).ok();
        }
    }

    /// Game over - falling sawtooth dirge
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let now = ctx.current_time();
        for (i, freq) in [440.0, 370.0, 300.0, 220.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sawtooth) else {
                continue;
            };
            let start = now + i as f64 * 0.2;
            gain.gain().set_value_at_time(0.0, start).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.12, start + 0.02)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, start + 0.25)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.25).ok();
        }
    }

    /// Start the looping low-pass thrust rumble
    fn start_thrust(&mut self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some(noise) = self.create_noise(ctx, 0.5) else {
            return;
        };
        noise.set_loop(true);

        let Ok(filter) = ctx.create_biquad_filter() else {
            return;
        };
        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value(200.0);

        let Ok(gain) = ctx.create_gain() else { return };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.0, t).ok();
        gain.gain()
            .linear_ramp_to_value_at_time(vol * 0.25, t + 0.05)
            .ok();

        if noise.connect_with_audio_node(&filter).is_err()
            || filter.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }
        noise.start().ok();

        self.thrust = Some((noise, gain));
    }

    /// Fade out and stop the thrust rumble
    fn stop_thrust(&mut self) {
        let Some((noise, gain)) = self.thrust.take() else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();
        gain.gain().linear_ramp_to_value_at_time(0.0, t + 0.05).ok();
        noise.stop_with_when(t + 0.1).ok();
    }
}
