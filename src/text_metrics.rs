use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Width of an average glyph relative to the font size, used when no font
/// for the family can be found.
const FALLBACK_CHAR_WIDTH: f32 = 0.56;

/// Advance width of `text` in pixels. Falls back to an average glyph width
/// when the family cannot be resolved to an installed font.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> f32 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    let measured = TEXT_MEASURER
        .lock()
        .ok()
        .and_then(|mut measurer| measurer.measure(text, font_size, font_family));
    measured.unwrap_or_else(|| fallback_width(text, font_size))
}

fn fallback_width(text: &str, font_size: f32) -> f32 {
    text.chars().filter(|ch| *ch != '\n').count() as f32 * font_size * FALLBACK_CHAR_WIDTH
}

/// Greedy word wrap at `max_width`. Explicit newlines always break; a word
/// wider than the limit gets a line of its own rather than being split.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, font_family: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let space = measure_text_width(" ", font_size, font_family);
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0f32;
        for word in paragraph.split_whitespace() {
            let word_width = measure_text_width(word, font_size, font_family);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        lines.push(current);
    }
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            if face.is_none() {
                tracing::debug!(family = %key, "no installed font for family; estimating widths");
            }
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key)?.as_ref()?;
        Some(face.measure_width(text, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<FontFace> {
        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" | "-apple-system" => Family::SansSerif,
                "monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                _ => Family::Name(name.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::parse(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    ascii_advances: [u16; 128],
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1) as f32;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
        })
    }

    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * FALLBACK_CHAR_WIDTH;
        let advance_width = |advance: u16| {
            if advance == 0 {
                fallback
            } else {
                advance as f32 * scale
            }
        };

        if text.is_ascii() {
            return text
                .bytes()
                .filter(|byte| *byte != b'\n')
                .map(|byte| advance_width(self.ascii_advances[byte as usize]))
                .sum();
        }

        let Ok(face) = Face::parse(&self.data, self.index) else {
            return fallback_width(text, font_size);
        };
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let advance = face
                    .glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(0);
                advance_width(advance)
            })
            .sum()
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_no_width() {
        assert_eq!(measure_text_width("", 14.0, "Arial"), 0.0);
        assert_eq!(measure_text_width("abc", 0.0, "Arial"), 0.0);
    }

    #[test]
    fn width_grows_with_text() {
        let short = measure_text_width("ab", 14.0, "Arial, sans-serif");
        let long = measure_text_width("abababab", 14.0, "Arial, sans-serif");
        assert!(short > 0.0);
        assert!(long > short);
    }

    #[test]
    fn wraps_at_max_width() {
        let text = "the quick brown fox jumps over the lazy dog";
        let lines = wrap_text(text, 60.0, 14.0, "Arial, sans-serif");
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn keeps_explicit_breaks_and_overlong_words() {
        let lines = wrap_text("a\nsupercalifragilistic", 10.0, 14.0, "Arial");
        assert_eq!(lines, vec!["a".to_string(), "supercalifragilistic".to_string()]);
        assert!(wrap_text("", 100.0, 14.0, "Arial").is_empty());
    }
}
