use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Color;
use crate::foundation::error::{CoverError, CoverResult};
use crate::render::surface::TextStyle;

/// Shaped line of text ready to be emitted as glyph runs.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<Color>,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShapeKey {
    text: String,
    size_bits: u32,
    weight_bits: u32,
}

/// Stateful helper that shapes title text with a single resolved font.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Color>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    cache: HashMap<ShapeKey, Arc<ShapedText>>,
}

impl TextEngine {
    /// Build an engine around raw TTF/OTF bytes.
    pub fn from_font_bytes(font_bytes: Vec<u8>) -> CoverResult<Self> {
        Self::from_face(font_bytes, 0)
    }

    /// Build an engine around face `index` of a font file, which may be a TTC collection.
    pub fn from_face(font_bytes: Vec<u8>, index: u32) -> CoverResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                CoverError::validation(format!("no font family registered for face {index}"))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CoverError::validation("registered font family has no name"))?
            .to_string();

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), index);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
            cache: HashMap::new(),
        })
    }

    pub fn from_path(path: &Path) -> CoverResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CoverError::validation(format!("read font '{}': {e}", path.display()))
        })?;
        Self::from_font_bytes(bytes)
    }

    /// Pick a sans-serif face close to `weight` from the system font database.
    pub fn from_system(weight: u16) -> CoverResult<Self> {
        use usvg::fontdb;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            weight: fontdb::Weight(weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| CoverError::render("system font database is empty"))?;
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CoverError::render("failed to load system font face data"))?;
        Self::from_face(bytes, index)
    }

    /// Resolve a font from `path` when given, otherwise from the system.
    ///
    /// Returns `None` (after logging) when nothing usable is found; text is then skipped.
    pub fn resolve(path: Option<&Path>, weight: u16) -> Option<Self> {
        let resolved = match path {
            Some(p) => Self::from_path(p),
            None => Self::from_system(weight),
        };
        match resolved {
            Ok(engine) => {
                tracing::debug!(family = %engine.family_name, "resolved title font");
                Some(engine)
            }
            Err(err) => {
                tracing::warn!(error = %err, "no title font available, text layer disabled");
                None
            }
        }
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    pub(crate) fn shape(&mut self, text: &str, style: TextStyle) -> CoverResult<Arc<ShapedText>> {
        if !style.size_px.is_finite() || style.size_px <= 0.0 {
            return Err(CoverError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let key = ShapeKey {
            text: text.to_owned(),
            size_bits: style.size_px.to_bits(),
            weight_bits: style.weight.to_bits(),
        };
        if let Some(shaped) = self.cache.get(&key) {
            return Ok(Arc::clone(shaped));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(style.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(style.weight),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(Color::default()));

        let mut layout: parley::Layout<Color> = builder.build(text);
        layout.break_all_lines(None);

        let shaped = Arc::new(ShapedText {
            width: layout.width(),
            height: layout.height(),
            layout,
        });
        self.cache.insert(key, Arc::clone(&shaped));
        Ok(shaped)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
