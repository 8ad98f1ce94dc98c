//! Resource type registry
//!
//! Maps the numeric type codes found in resource records to a schema. Codes
//! that are not listed here are valid; such resources simply have no
//! structured interpretation.

use super::field::{FieldDescriptor as F, FieldKind as K, NameTable, read_u8, read_u16, read_u32};
use super::{Description, ResourceSchema};
use crate::error::Result;
use crate::ids::BltId;
use crate::image::IMAGE_COMPRESSION_NAMES;
use crate::sound::Sound;

/// Button graphics kinds (type 30)
pub const BUTTON_GRAPHICS_TYPES: NameTable = &[(1, "Palette Mods"), (2, "Sprites")];

/// Button kinds (type 31)
pub const BUTTON_TYPES: NameTable = &[(1, "Rectangle"), (2, "Display Query"), (3, "Hotspot Query")];

/// Potion movies referenced by potion combo tables (type 63)
pub const POTION_MOVIES: NameTable = &[
    (0, "ELEC"),
    (1, "EXPL"),
    (2, "FLAM"),
    (3, "FLSH"),
    (4, "MIST"),
    (5, "OOZE"),
    (6, "SHMR"),
    (7, "SWRL"),
    (8, "WIND"),
    (9, "BOIL"),
    (10, "BUBL"),
    (11, "BSPK"),
    (12, "FBRS"),
    (13, "FCLD"),
    (14, "FFLS"),
    (15, "FSWR"),
    (16, "LAVA"),
    (17, "LFIR"),
    (18, "LSMK"),
    (19, "SBLS"),
    (20, "SCLM"),
    (21, "SFLS"),
    (22, "SPRE"),
    (23, "WSTM"),
    (24, "WSWL"),
    (25, "BUGS"),
    (26, "CRYS"),
    (27, "DNCR"),
    (28, "FISH"),
    (29, "GLAC"),
    (30, "GOLM"),
    (31, "EYEB"),
    (32, "MOLE"),
    (33, "MOTH"),
    (34, "MUDB"),
    (35, "ROCK"),
    (36, "SHTR"),
    (37, "SLUG"),
    (38, "SNAK"),
    (39, "SPKB"),
    (40, "SPKM"),
    (41, "SPDR"),
    (42, "SQID"),
    (43, "CLOD"),
    (44, "SWIR"),
    (45, "VOLC"),
    (46, "WORM"),
];

/// Known resource types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    U8Values,
    S16Values,
    U16Values,
    ResourceList,
    Sound,
    Image,
    Palette,
    ColorCycles,
    ColorCycleSlot,
    Rect,
    Plane,
    SpriteList,
    Colors,
    PaletteMods,
    ButtonGraphicsList,
    ButtonList,
    Scene,
    MainMenu,
    Hub,
    HubItem,
    SlidingPuzzle,
    ParticleDeaths,
    PotionPuzzle,
    PotionComboTable,
}

impl ResourceType {
    pub const ALL: [ResourceType; 24] = [
        ResourceType::U8Values,
        ResourceType::S16Values,
        ResourceType::U16Values,
        ResourceType::ResourceList,
        ResourceType::Sound,
        ResourceType::Image,
        ResourceType::Palette,
        ResourceType::ColorCycles,
        ResourceType::ColorCycleSlot,
        ResourceType::Rect,
        ResourceType::Plane,
        ResourceType::SpriteList,
        ResourceType::Colors,
        ResourceType::PaletteMods,
        ResourceType::ButtonGraphicsList,
        ResourceType::ButtonList,
        ResourceType::Scene,
        ResourceType::MainMenu,
        ResourceType::Hub,
        ResourceType::HubItem,
        ResourceType::SlidingPuzzle,
        ResourceType::ParticleDeaths,
        ResourceType::PotionPuzzle,
        ResourceType::PotionComboTable,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn code(self) -> u32 {
        match self {
            ResourceType::U8Values => 1,
            ResourceType::S16Values => 2,
            ResourceType::U16Values => 3,
            ResourceType::ResourceList => 6,
            ResourceType::Sound => 7,
            ResourceType::Image => 8,
            ResourceType::Palette => 10,
            ResourceType::ColorCycles => 11,
            ResourceType::ColorCycleSlot => 12,
            ResourceType::Rect => 24,
            ResourceType::Plane => 26,
            ResourceType::SpriteList => 27,
            ResourceType::Colors => 28,
            ResourceType::PaletteMods => 29,
            ResourceType::ButtonGraphicsList => 30,
            ResourceType::ButtonList => 31,
            ResourceType::Scene => 32,
            ResourceType::MainMenu => 33,
            ResourceType::Hub => 40,
            ResourceType::HubItem => 41,
            ResourceType::SlidingPuzzle => 44,
            ResourceType::ParticleDeaths => 45,
            ResourceType::PotionPuzzle => 59,
            ResourceType::PotionComboTable => 63,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ResourceType::U8Values => "Unsigned 8-Bit Value List",
            ResourceType::S16Values => "Signed 16-Bit Value List",
            ResourceType::U16Values => "Unsigned 16-Bit Value List",
            ResourceType::ResourceList => "Resource List",
            ResourceType::Sound => "Sound",
            ResourceType::Image => "Image",
            ResourceType::Palette => "Palette",
            ResourceType::ColorCycles => "Color Cycles",
            ResourceType::ColorCycleSlot => "Color Cycle Slot",
            ResourceType::Rect => "Rectangle",
            ResourceType::Plane => "Plane",
            ResourceType::SpriteList => "Sprite List",
            ResourceType::Colors => "Colors",
            ResourceType::PaletteMods => "Palette Mods",
            ResourceType::ButtonGraphicsList => "Button Graphics",
            ResourceType::ButtonList => "Button List",
            ResourceType::Scene => "Scene",
            ResourceType::MainMenu => "Main Menu",
            ResourceType::Hub => "Hub",
            ResourceType::HubItem => "Hub Item",
            ResourceType::SlidingPuzzle => "Sliding Puzzle",
            ResourceType::ParticleDeaths => "Particle Deaths",
            ResourceType::PotionPuzzle => "Potion Puzzle",
            ResourceType::PotionComboTable => "Potion Combo List",
        }
    }

    /// Schema for a resource of this type.
    ///
    /// A few types fold several scattered values into one display field, so
    /// the schema depends on the resource bytes.
    ///
    /// # Errors
    /// [`crate::BoltError::Truncated`] if those values lie past the end of `data`
    pub fn schema(self, data: &[u8]) -> Result<ResourceSchema> {
        let title = self.title();
        Ok(match self {
            ResourceType::U8Values => ResourceSchema::array(title, 1, vec![F::new("Value", K::U8, 0)]),
            ResourceType::S16Values => {
                ResourceSchema::array(title, 2, vec![F::new("Value", K::I16, 0)])
            }
            ResourceType::U16Values => {
                ResourceSchema::array(title, 2, vec![F::new("Value", K::U16, 0)])
            }
            ResourceType::ResourceList => {
                ResourceSchema::array(title, 4, vec![F::new("Value", K::LongResId, 0)])
            }
            ResourceType::Sound => {
                let sound = Sound::new(data);
                ResourceSchema::record(
                    title,
                    vec![
                        F::custom("Samples", sound.len().to_string()),
                        F::custom("Sample Rate", format!("{} Hz", sound.sample_rate())),
                        F::custom("Duration", format!("{:.3} s", sound.duration_secs())),
                    ],
                )
            }
            ResourceType::Image => ResourceSchema::record(
                title,
                vec![
                    F::new("Compression", K::Named8(IMAGE_COMPRESSION_NAMES), 0),
                    F::new("Offset", K::Pair, 6),
                    F::new("Size", K::Pair, 0xA),
                ],
            ),
            ResourceType::Palette => ResourceSchema::record(
                title,
                vec![
                    F::new("Plane", K::U16, 0),
                    F::new("Start Index", K::U16, 2),
                    F::new("End Index", K::U16, 4),
                ],
            ),
            ResourceType::ColorCycles => {
                let mut fields = Vec::with_capacity(4);
                for slot in 0..4 {
                    fields.push(F::custom(
                        format!("Slot {slot}"),
                        counted_ref(data, 8 + slot * 4, read_u16(data, slot * 2)? as u32)?,
                    ));
                }
                ResourceSchema::record(title, fields)
            }
            ResourceType::ColorCycleSlot => ResourceSchema::record(
                title,
                vec![
                    F::new("Start Index", K::U16, 0),
                    F::new("End Index", K::U16, 2),
                    F::new("Frames", K::U8, 4),
                    F::new("Plane", K::U8, 5),
                ],
            ),
            ResourceType::Rect => ResourceSchema::record(title, vec![F::new("Rect", K::Rect, 0)]),
            ResourceType::Plane => ResourceSchema::record(
                title,
                vec![
                    F::new("Image", K::LongResId, 0),
                    F::new("Palette", K::LongResId, 4),
                    F::new("Hotspots", K::LongResId, 8),
                ],
            ),
            ResourceType::SpriteList => ResourceSchema::array(
                title,
                8,
                vec![F::new("Position", K::Pair, 0), F::new("Image", K::LongResId, 4)],
            ),
            ResourceType::Colors => ResourceSchema::array(
                title,
                3,
                vec![
                    F::new("Red", K::U8, 0),
                    F::new("Green", K::U8, 1),
                    F::new("Blue", K::U8, 2),
                ],
            ),
            ResourceType::PaletteMods => ResourceSchema::array(
                title,
                6,
                vec![
                    F::new("First", K::U8, 0),
                    F::new("Count", K::U8, 1),
                    F::new("Colors", K::LongResId, 2),
                ],
            ),
            ResourceType::ButtonGraphicsList => ResourceSchema::array(
                title,
                0xE,
                vec![
                    F::new("Type", K::Named16(BUTTON_GRAPHICS_TYPES), 0),
                    F::new("Hovered Resource", K::LongResId, 6),
                    F::new("Idle Resource", K::LongResId, 0xA),
                ],
            ),
            ResourceType::ButtonList => ResourceSchema::array(
                title,
                0x14,
                vec![
                    F::new("Type", K::Named16(BUTTON_TYPES), 0),
                    F::new("Hitbox", K::Rect, 2),
                    F::new("Plane", K::U16, 0xA),
                    F::new("Button Graphics", K::LongResId, 0x10),
                ],
            ),
            ResourceType::Scene => ResourceSchema::record(
                title,
                vec![
                    F::new("Foreground", K::LongResId, 0),
                    F::new("Background", K::LongResId, 4),
                    F::custom("Sprites", counted_ref(data, 0xA, read_u8(data, 8)? as u32)?),
                    F::new("Color Cycles", K::LongResId, 0x16),
                    F::new("Buttons", K::LongResListId, 0x1A),
                    F::new("Origin", K::Pair, 0x20),
                ],
            ),
            ResourceType::MainMenu => ResourceSchema::record(
                title,
                vec![
                    F::new("Scene", K::LongResId, 0),
                    F::new("Color Bars Image", K::LongResId, 4),
                    F::new("Color Bars Palette", K::LongResId, 8),
                ],
            ),
            ResourceType::Hub => ResourceSchema::record(
                title,
                vec![
                    F::new("Scene", K::LongResId, 0),
                    F::new("Background", K::LongResId, 6),
                    F::custom("Item List", counted_ref(data, 0xC, read_u8(data, 0xB)? as u32)?),
                ],
            ),
            ResourceType::HubItem => ResourceSchema::array(
                title,
                0x10,
                vec![
                    F::new("Challenge", K::I8, 0),
                    F::new("Win Movie", K::I8, 3),
                    F::new("Image", K::LongResId, 4),
                ],
            ),
            ResourceType::SlidingPuzzle => ResourceSchema::record(
                title,
                vec![
                    F::new("Difficulty 1", K::ShortResId, 2),
                    F::new("Difficulty 2", K::ShortResId, 6),
                    F::new("Difficulty 3", K::ShortResId, 0xA),
                ],
            ),
            ResourceType::ParticleDeaths => ResourceSchema::record(
                title,
                vec![
                    F::new("Type 1 Frames", K::LongResListId, 0),
                    F::new("Type 2 Frames", K::LongResListId, 6),
                    F::new("Type 3 Frames", K::LongResListId, 0xC),
                ],
            ),
            ResourceType::PotionPuzzle => ResourceSchema::record(
                title,
                vec![
                    F::new("Difficulties", K::LongResId, 0),
                    F::new("Background Image", K::LongResId, 4),
                    F::new("Background Palette", K::LongResId, 8),
                    F::new("Shelf Points", K::LongResListId, 0x16),
                    F::new("Basin Points", K::LongResId, 0x20),
                    F::new("Origin", K::Pair, 0x42),
                ],
            ),
            ResourceType::PotionComboTable => ResourceSchema::array(
                title,
                6,
                vec![
                    F::new("A", K::I8, 0),
                    F::new("B", K::I8, 1),
                    F::new("C", K::I8, 2),
                    F::new("D", K::I8, 3),
                    F::new("Movie", K::U16, 4),
                    F::new("Movie Name", K::Named16(POTION_MOVIES), 4),
                ],
            ),
        })
    }
}

/// `"<long id> x <count>"` for references whose count is stored elsewhere
fn counted_ref(data: &[u8], id_offset: usize, count: u32) -> Result<String> {
    Ok(format!("{} x {}", BltId(read_u32(data, id_offset)?), count))
}

/// Structured fields of a decoded resource.
///
/// Returns `Ok(None)` for type codes without a registered schema.
pub fn describe_resource(type_code: u32, data: &[u8]) -> Result<Option<Description>> {
    let Some(ty) = ResourceType::from_code(type_code) else {
        return Ok(None);
    };
    ty.schema(data)?.describe(data).map(Some)
}
