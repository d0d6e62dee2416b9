//! Tone builders
//!
//! Each builder combines sine primitives with an envelope into a single
//! voice and finishes with the default click-suppression [`Fade`].
//! Builders are pure: the same parameters always give the same samples.

use crate::envelope::{ExpDecay, Fade};
use crate::oscillators::{sine, sweep, SweepCurve};
use crate::synth::Synth;

/// One decaying sine component of an additive voice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Partial {
    /// Frequency in Hz
    pub frequency: f64,
    /// Linear amplitude
    pub amplitude: f64,
    /// Exponential decay rate (1/s)
    pub decay: f64,
}

impl Partial {
    pub const fn new(frequency: f64, amplitude: f64, decay: f64) -> Self {
        Self {
            frequency,
            amplitude,
            decay,
        }
    }
}

/// Bell overtone relative to the fundamental
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BellRatio {
    /// Multiple of the fundamental frequency
    pub ratio: f64,
    /// Linear amplitude
    pub amplitude: f64,
}

impl BellRatio {
    pub const fn new(ratio: f64, amplitude: f64) -> Self {
        Self { ratio, amplitude }
    }
}

/// Bell overtones: fundamental, soft octave, very soft fifth
pub const BELL_RATIOS: &[BellRatio] = &[
    BellRatio::new(1.0, 0.6),
    BellRatio::new(2.0, 0.25),
    BellRatio::new(1.5, 0.1),
];

/// Decay rate (1/s) shared by every bell overtone
pub const BELL_DECAY: f64 = 6.0;

/// Declarative tone builder invocation
///
/// Recipes store voices as data; [`Synth::voice`] renders them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Voice {
    /// Single sine with exponential decay
    Soft { frequency: f64, decay: f64 },
    /// Bell/chime built from [`BELL_RATIOS`]
    Bell { frequency: f64 },
    /// Very short UI click at half level
    Click { frequency: f64 },
    /// Falling water droplet
    WaterDrop,
    /// Sum of decaying partials (absolute frequencies)
    Partials(&'static [Partial]),
    /// Swept sine with exponential decay, scaled by `level`
    Swept {
        curve: SweepCurve,
        decay: f64,
        level: f64,
    },
}

impl Synth {
    /// Render a voice for `duration` seconds
    pub fn voice(&self, voice: &Voice, duration: f64) -> Vec<f64> {
        match *voice {
            Voice::Soft { frequency, decay } => self.soft_tone(frequency, duration, decay),
            Voice::Bell { frequency } => self.bell_tone(frequency, duration),
            Voice::Click { frequency } => self.soft_click(frequency, duration),
            Voice::WaterDrop => self.water_drop(duration),
            Voice::Partials(partials) => self.partials(partials, duration),
            Voice::Swept {
                curve,
                decay,
                level,
            } => self.swept_tone(curve, duration, decay, level),
        }
    }

    /// Clean sine tone with gentle exponential decay
    pub fn soft_tone(&self, frequency: f64, duration: f64, decay: f64) -> Vec<f64> {
        let mut samples = sine(frequency, duration, 0.0, self.sample_rate());
        ExpDecay::new(decay).apply(&mut samples, self.sample_rate());
        self.finish(samples)
    }

    /// Bell/chime: fundamental, octave and fifth under one e^(−6t) decay
    pub fn bell_tone(&self, frequency: f64, duration: f64) -> Vec<f64> {
        let overtones = BELL_RATIOS
            .iter()
            .map(|o| Partial::new(frequency * o.ratio, o.amplitude, BELL_DECAY));
        let mut samples = self.additive(overtones, duration);
        self.fade(&mut samples);
        samples
    }

    /// Subtle UI click: fast e^(−80t) decay at half level
    pub fn soft_click(&self, frequency: f64, duration: f64) -> Vec<f64> {
        let mut samples = sine(frequency, duration, 0.0, self.sample_rate());
        ExpDecay::new(80.0).apply(&mut samples, self.sample_rate());
        scale(&mut samples, 0.5);
        self.finish(samples)
    }

    /// Single water droplet: pitch glides from 1600 Hz down towards 400 Hz
    pub fn water_drop(&self, duration: f64) -> Vec<f64> {
        let curve = SweepCurve::Glide {
            base: 400.0,
            depth: 1200.0,
            rate: 20.0,
        };
        self.swept_tone(curve, duration, 15.0, 0.4)
    }

    /// Sum of independently decaying partials, faded as a whole
    pub fn partials(&self, partials: &[Partial], duration: f64) -> Vec<f64> {
        let mut samples = self.additive(partials.iter().copied(), duration);
        self.fade(&mut samples);
        samples
    }

    /// Swept sine using accumulated phase, with decay and output level
    pub fn swept_tone(&self, curve: SweepCurve, duration: f64, decay: f64, level: f64) -> Vec<f64> {
        let mut samples = sweep(duration, self.sample_rate(), |t| curve.frequency_at(t));
        ExpDecay::new(decay).apply(&mut samples, self.sample_rate());
        scale(&mut samples, level);
        self.finish(samples)
    }

    fn additive<I>(&self, partials: I, duration: f64) -> Vec<f64>
    where
        I: IntoIterator<Item = Partial>,
    {
        let rate = self.sample_rate();
        let mut sum = vec![0.0; crate::sample_count(duration, rate)];

        for partial in partials {
            let mut component = sine(partial.frequency, duration, 0.0, rate);
            ExpDecay::new(partial.decay).apply(&mut component, rate);
            for (out, s) in sum.iter_mut().zip(component) {
                *out += s * partial.amplitude;
            }
        }

        sum
    }

    fn fade(&self, samples: &mut [f64]) {
        Fade::default().apply(samples, self.sample_rate());
    }

    fn finish(&self, mut samples: Vec<f64>) -> Vec<f64> {
        self.fade(&mut samples);
        samples
    }
}

fn scale(samples: &mut [f64], factor: f64) {
    samples.iter_mut().for_each(|s| *s *= factor);
}
