//! Effect recipes
//!
//! Every sound effect is plain data: a duration, a list of layered voices
//! and an output level. [`Synth::render`](crate::Synth::render) is the only
//! composer; adding an effect means adding an entry to [`RECIPES`].

use crate::oscillators::SweepCurve;
use crate::tones::{Partial, Voice};

/// Output folder grouping for effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Movement,
    Combat,
    Collectibles,
    Ui,
}

impl Category {
    /// Subdirectory name for this category
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Movement => "movement",
            Category::Combat => "combat",
            Category::Collectibles => "collectibles",
            Category::Ui => "ui",
        }
    }
}

/// One voice placed in an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub voice: Voice,
    /// Voice duration in seconds
    pub duration: f64,
    /// Start time in seconds from the beginning of the effect
    pub offset: f64,
    /// Linear gain applied before mixing
    pub gain: f64,
}

/// Final level stage of an effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputLevel {
    /// Normalize so the peak amplitude equals the target
    Peak(f64),
    /// Multiply by a fixed factor, no normalization
    Gain(f64),
}

/// Declarative description of one sound effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectRecipe {
    /// File stem, e.g. `jump_small`
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    /// Total length in seconds
    pub duration: f64,
    pub layers: &'static [Layer],
    pub level: OutputLevel,
}

impl EffectRecipe {
    /// Path stem relative to the output root, e.g. `movement/jump_small`
    pub fn file_stem(&self) -> String {
        format!("{}/{}", self.category.dir_name(), self.name)
    }
}

const fn layer(voice: Voice, duration: f64, offset: f64, gain: f64) -> Layer {
    Layer {
        voice,
        duration,
        offset,
        gain,
    }
}

const LAND_PARTIALS: &[Partial] = &[
    // Low soft thump
    Partial::new(120.0, 1.0, 30.0),
    // Texture
    Partial::new(80.0, 0.3, 40.0),
];

const STOMP_PARTIALS: &[Partial] = &[
    // Clean pop
    Partial::new(600.0, 1.0, 40.0),
    // High sparkle
    Partial::new(1200.0, 0.3, 50.0),
];

/// All built-in effects
pub const RECIPES: &[EffectRecipe] = &[
    EffectRecipe {
        name: "jump_small",
        category: Category::Movement,
        description: "Light two-note rise (A4, C5)",
        duration: 0.15,
        layers: &[
            layer(
                Voice::Soft {
                    frequency: 440.0,
                    decay: 15.0,
                },
                0.15,
                0.0,
                0.4,
            ),
            layer(
                Voice::Soft {
                    frequency: 523.0,
                    decay: 15.0,
                },
                0.15,
                0.03,
                0.3,
            ),
        ],
        level: OutputLevel::Peak(0.5),
    },
    EffectRecipe {
        name: "jump_super",
        category: Category::Movement,
        description: "Ascending C major arpeggio of bells",
        duration: 0.4,
        layers: &[
            layer(Voice::Bell { frequency: 523.0 }, 0.25, 0.0, 0.3),
            layer(Voice::Bell { frequency: 659.0 }, 0.25, 0.08, 0.3),
            layer(Voice::Bell { frequency: 784.0 }, 0.25, 0.16, 0.3),
        ],
        level: OutputLevel::Peak(0.5),
    },
    EffectRecipe {
        name: "land_soft",
        category: Category::Movement,
        description: "Soft low thump",
        duration: 0.1,
        layers: &[layer(Voice::Partials(LAND_PARTIALS), 0.1, 0.0, 1.0)],
        level: OutputLevel::Peak(0.4),
    },
    EffectRecipe {
        name: "stomp",
        category: Category::Combat,
        description: "Quick pop with a high sparkle",
        duration: 0.12,
        layers: &[layer(Voice::Partials(STOMP_PARTIALS), 0.12, 0.0, 1.0)],
        level: OutputLevel::Peak(0.5),
    },
    EffectRecipe {
        name: "hurt",
        category: Category::Combat,
        description: "Gentle fall from E5 to C5",
        duration: 0.25,
        layers: &[layer(
            Voice::Swept {
                curve: SweepCurve::Linear {
                    start: 659.0,
                    end: 523.0,
                    duration: 0.25,
                },
                decay: 8.0,
                level: 1.0,
            },
            0.25,
            0.0,
            1.0,
        )],
        level: OutputLevel::Peak(0.4),
    },
    EffectRecipe {
        name: "flower",
        category: Category::Collectibles,
        description: "Soft chime with an octave shimmer (A5, A6)",
        duration: 0.2,
        layers: &[
            layer(Voice::Bell { frequency: 880.0 }, 0.2, 0.0, 0.4),
            layer(Voice::Bell { frequency: 1760.0 }, 0.2, 0.0, 0.15),
        ],
        level: OutputLevel::Peak(0.5),
    },
    EffectRecipe {
        name: "menu_select",
        category: Category::Ui,
        description: "Barely-there click",
        duration: 0.08,
        layers: &[layer(Voice::Click { frequency: 1500.0 }, 0.08, 0.0, 1.0)],
        level: OutputLevel::Gain(0.6),
    },
];

/// Look up a built-in effect by name
pub fn find_recipe(name: &str) -> Option<&'static EffectRecipe> {
    RECIPES.iter().find(|recipe| recipe.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{peak, Synth};
    use crate::{sample_count, to_pcm_i16, SAMPLE_RATE};

    #[test]
    fn test_recipes_are_well_formed() {
        assert_eq!(RECIPES.len(), 7);
        for recipe in RECIPES {
            assert!(recipe.duration > 0.0, "{} has no duration", recipe.name);
            assert!(!recipe.layers.is_empty(), "{} has no layers", recipe.name);
            for layer in recipe.layers {
                assert!(layer.duration > 0.0);
                assert!(layer.offset >= 0.0 && layer.offset < recipe.duration);
            }
        }
    }

    #[test]
    fn test_recipe_names_unique() {
        for (i, a) in RECIPES.iter().enumerate() {
            for b in &RECIPES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_find_recipe() {
        assert_eq!(find_recipe("stomp").unwrap().category, Category::Combat);
        assert!(find_recipe("explosion").is_none());
    }

    #[test]
    fn test_file_stem() {
        let recipe = find_recipe("flower").unwrap();
        assert_eq!(recipe.file_stem(), "collectibles/flower");
    }

    #[test]
    fn test_all_recipes_render_in_range() {
        let synth = Synth::new(SAMPLE_RATE);
        for recipe in RECIPES {
            let samples = synth.render(recipe);
            assert_eq!(samples.len(), sample_count(recipe.duration, SAMPLE_RATE));
            assert!(samples.iter().all(|s| s.is_finite() && (-1.0..=1.0).contains(s)));
            assert!(to_pcm_i16(&samples).iter().all(|&p| p != i16::MIN));
        }
    }

    #[test]
    fn test_normalized_recipes_hit_target_peak() {
        let synth = Synth::new(SAMPLE_RATE);
        for recipe in RECIPES {
            if let OutputLevel::Peak(target) = recipe.level {
                let samples = synth.render(recipe);
                assert!(
                    (peak(&samples) - target).abs() < 1e-9,
                    "{} peaks at {}",
                    recipe.name,
                    peak(&samples)
                );
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let synth = Synth::new(SAMPLE_RATE);
        for recipe in RECIPES {
            let a = to_pcm_i16(&synth.render(recipe));
            let b = to_pcm_i16(&synth.render(recipe));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_flower_collect() {
        let synth = Synth::new(SAMPLE_RATE);
        let samples = synth.render(find_recipe("flower").unwrap());

        assert_eq!(samples.len(), 8820);
        assert!((peak(&samples) - 0.5).abs() < 1e-9);
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn test_menu_select() {
        let synth = Synth::new(SAMPLE_RATE);
        let samples = synth.render(find_recipe("menu_select").unwrap());

        assert_eq!(samples.len(), 3528);
        assert!(samples.iter().all(|s| s.is_finite()));
        assert!(peak(&samples) <= 0.3);

        // Not renormalized: exactly 0.6 × the click voice
        let click = synth.soft_click(1500.0, 0.08);
        for (s, c) in samples.iter().zip(click.iter()) {
            assert_eq!(*s, c * 0.6);
        }
    }

    #[test]
    fn test_jump_small_second_note_is_delayed() {
        let synth = Synth::new(SAMPLE_RATE);
        let recipe = find_recipe("jump_small").unwrap();
        let mixed = synth.render(recipe);

        // Before the 30ms offset only the first note sounds
        let first = synth.soft_tone(440.0, 0.15, 15.0);
        let scale = mixed[500] / first[500];
        for i in 1..1323 {
            assert!((mixed[i] - first[i] * scale).abs() < 1e-9);
        }
    }
}
