/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const PRIMARY_LIGHT: Rgb = Rgb(0x42, 0xa5, 0xf5);
    pub const PRIMARY: Rgb = Rgb(0x19, 0x76, 0xd2);
    pub const PRIMARY_DARK: Rgb = Rgb(0x15, 0x65, 0xc0);
    pub const SECONDARY: Rgb = Rgb(0xdc, 0x00, 0x4e);
}

/// Semantic colour of a chip or trend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Default,
    Success,
    Info,
    Error,
}

impl Tone {
    /// Tone for a signed change: gains are good, losses are bad
    pub fn for_change(is_positive: bool) -> Tone {
        if is_positive {
            Tone::Success
        } else {
            Tone::Error
        }
    }
}
