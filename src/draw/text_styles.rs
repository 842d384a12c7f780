use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::{Gray8, GrayColor},
};
use paste::paste;

use crate::error::{PanelError, Result};

pub type StyleType = MonoTextStyle<'static, Gray8>;

pub const BLACK: Gray8 = Gray8::BLACK;
pub const WHITE: Gray8 = Gray8::WHITE;
/// Fill of days that have events
pub const LIGHT_GRAY: Gray8 = Gray8::new(200);
/// Footer text
pub const MID_GRAY: Gray8 = Gray8::new(100);

macro_rules! make_profont_lookup {
    ([$($size:literal),+]) => {
        paste! {
            /// Point sizes of the bundled ProFont faces
            pub const PROFONT_SIZES: &[u32] = &[$($size),+];

            /// Bundled ProFont face for a point size
            pub fn profont(size: u32) -> Option<&'static MonoFont<'static>> {
                match size {
                    $(
                        $size => Some(&profont::[<PROFONT_ $size _POINT>]),
                    )+
                    _ => None,
                }
            }
        }
    };
}

make_profont_lookup!([7, 9, 10, 12, 14, 18, 24]);

const TITLE_SIZE: u32 = 24;
const TEXT_SIZE: u32 = 18;
const FOOTER_SIZE: u32 = 9;

fn require(size: u32) -> Result<&'static MonoFont<'static>> {
    profont(size).ok_or_else(|| PanelError::RenderResource(format!("no ProFont face at {size} pt")))
}

/// The three faces a panel is drawn with
#[derive(Clone, Copy)]
pub struct FontSet {
    pub title: &'static MonoFont<'static>,
    pub text: &'static MonoFont<'static>,
    pub footer: &'static MonoFont<'static>,
}

impl FontSet {
    pub const DEFAULT_REFERENCE: &'static str = "profont";

    /// Resolve a font reference: `profont`, or `profont-<size>` to pick the agenda text size
    pub fn from_reference(reference: &str) -> Result<Self> {
        let text_size = match reference.trim().strip_prefix("profont") {
            Some("") => TEXT_SIZE,
            Some(rest) => rest
                .strip_prefix('-')
                .and_then(|size| size.parse::<u32>().ok())
                .ok_or_else(|| {
                    PanelError::RenderResource(format!("malformed font reference {reference:?}"))
                })?,
            None => {
                return Err(PanelError::RenderResource(format!(
                    "unknown font {reference:?}"
                )))
            }
        };
        Ok(Self {
            title: require(TITLE_SIZE)?,
            text: require(text_size)?,
            footer: require(FOOTER_SIZE)?,
        })
    }

    pub fn title_style(&self) -> StyleType {
        StyleType::new(self.title, BLACK)
    }

    pub fn text_style(&self, color: Gray8) -> StyleType {
        StyleType::new(self.text, color)
    }

    pub fn footer_style(&self) -> StyleType {
        StyleType::new(self.footer, MID_GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_size_resolves() {
        for &size in PROFONT_SIZES {
            assert!(profont(size).is_some(), "{size}");
        }
        assert!(profont(11).is_none());
    }

    #[test]
    fn test_default_reference() {
        let fonts = FontSet::from_reference(FontSet::DEFAULT_REFERENCE).unwrap();
        assert_eq!(
            fonts.text.character_size,
            profont::PROFONT_18_POINT.character_size
        );
        assert_eq!(
            fonts.title.character_size,
            profont::PROFONT_24_POINT.character_size
        );
    }

    #[test]
    fn test_sized_reference() {
        let fonts = FontSet::from_reference("profont-12").unwrap();
        assert_eq!(
            fonts.text.character_size,
            profont::PROFONT_12_POINT.character_size
        );
    }

    #[test]
    fn test_unknown_references_are_resource_errors() {
        for reference in ["arial.ttf", "profont-11", "profont-", "profont12", ""] {
            assert!(
                matches!(
                    FontSet::from_reference(reference),
                    Err(PanelError::RenderResource(_))
                ),
                "{reference:?}"
            );
        }
    }
}
