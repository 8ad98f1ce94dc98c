//! Interpretation of decoded resources for presentation
//!
//! [`view_resource`] routes a decoded payload by type: images are converted
//! to RGBA with the active palette, palettes replace the active palette,
//! sounds are handed over as PCM, and everything else with a schema becomes
//! a list of fields.

use crate::error::Result;
use crate::image::Image;
use crate::palette::{Palette, PaletteUpdate};
use crate::schema::{Description, ResourceType};
use crate::sound::Sound;

/// A decoded resource ready for display
#[derive(Debug, Clone)]
pub enum ResourceView<'a> {
    Image {
        image: Image<'a>,
        /// `width * height * 4` bytes
        rgba: Vec<u8>,
        fields: Description,
    },
    Sound {
        sound: Sound<'a>,
        fields: Description,
    },
    Palette {
        update: PaletteUpdate,
        fields: Description,
    },
    Fields(Description),
    /// Type without a schema; only the raw bytes are meaningful
    Raw,
}

impl ResourceView<'_> {
    pub fn fields(&self) -> Option<&Description> {
        match self {
            ResourceView::Image { fields, .. }
            | ResourceView::Sound { fields, .. }
            | ResourceView::Palette { fields, .. }
            | ResourceView::Fields(fields) => Some(fields),
            ResourceView::Raw => None,
        }
    }
}

/// Interpret `data` as a resource of type `type_code`.
///
/// Palette resources replace `palette` wholesale, and only once the whole
/// resource has been parsed; on error `palette` is unchanged.
pub fn view_resource<'a>(
    type_code: u32,
    data: &'a [u8],
    palette: &mut Palette,
) -> Result<ResourceView<'a>> {
    let Some(ty) = ResourceType::from_code(type_code) else {
        return Ok(ResourceView::Raw);
    };
    let fields = ty.schema(data)?.describe(data)?;

    Ok(match ty {
        ResourceType::Image => {
            let image = Image::parse(data)?;
            let rgba = image.to_rgba(palette)?;
            ResourceView::Image {
                image,
                rgba,
                fields,
            }
        }
        ResourceType::Sound => ResourceView::Sound {
            sound: Sound::new(data),
            fields,
        },
        ResourceType::Palette => {
            let update = PaletteUpdate::parse(data)?;
            palette.apply(&update);
            ResourceView::Palette { update, fields }
        }
        _ => ResourceView::Fields(fields),
    })
}
