use std::num::NonZeroUsize;
use std::path::Path;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use lru::LruCache;

const MEASURE_CACHE_SIZE: usize = 512;

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
    is_bold: bool,
}

/// Width and height of a single line of label text.
pub trait TextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32);
}

pub struct CosmicTextMeasure {
    font_system: FontSystem,
    /// `None` means the default sans-serif family.
    family: Option<String>,
    cache: LruCache<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            family: None,
            cache: LruCache::new(
                NonZeroUsize::new(MEASURE_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN),
            ),
        }
    }

    /// Measures with `family`, loading `font_path` first when given. Either
    /// one missing falls back to the default sans-serif face.
    pub fn with_font(family: &str, font_path: Option<&Path>) -> Self {
        let mut measure = Self::new();

        if let Some(path) = font_path {
            if let Err(e) = measure.font_system.db_mut().load_font_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "font file unavailable, using default font");
            }
        }

        let available = measure
            .font_system
            .db()
            .faces()
            .any(|face| face.families.iter().any(|(name, _)| name == family));
        if available {
            measure.family = Some(family.to_string());
        } else {
            tracing::warn!(family, "font family not installed, measuring with default sans-serif");
        }

        measure
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_text(&mut self, text: &str, font_size: f32, is_bold: bool) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: font_size.to_bits(),
            is_bold,
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let line_height = font_size * 1.2;
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size,
                line_height,
            },
        );

        buffer.set_size(&mut self.font_system, None, None);

        let family = match self.family.as_deref() {
            Some(name) => Family::Name(name),
            None => Family::SansSerif,
        };
        let attrs = Attrs::new().family(family).weight(if is_bold {
            Weight::BOLD
        } else {
            Weight::NORMAL
        });

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut total_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;

        for run in buffer.layout_runs() {
            total_width = total_width.max(run.line_w);
            total_height += run.line_height;
        }

        let measured = (total_width, total_height);
        self.cache.put(key, measured);
        measured
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}
