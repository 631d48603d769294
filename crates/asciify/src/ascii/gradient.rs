/// Ordered glyph ramp. Index 0 is selected by the brightest pixels when
/// the mapping is not inverted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphRamp {
    chars: Vec<char>,
}

impl GlyphRamp {
    /// Build a ramp from any string. An empty string becomes a single space
    /// so indexing can never fail.
    pub fn new(chars: impl AsRef<str>) -> Self {
        let mut chars: Vec<char> = chars.as_ref().chars().collect();
        if chars.is_empty() {
            chars.push(' ');
        }
        Self { chars }
    }

    pub fn complex() -> Self {
        Self::new("@$B%8&WM#*oahkbdpqwmZO0QLCJUYXzcvunxrjft/|()1{}[]?-_+~<>i!lI;:,\"^`'. ")
    }

    pub fn classic() -> Self {
        Self::new("@#%*+=-:. ")
    }

    pub fn blocks() -> Self {
        Self::new("█▓▒░ .")
    }

    pub fn dots() -> Self {
        Self::new("@o+=-:. ")
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Quantise `t` in [0, 1] to `round(t * (len - 1))`, clamped to the ramp.
    pub fn clamp_index(&self, value: f32) -> usize {
        let levels = (self.chars.len() - 1) as f32;
        let idx = (value * levels).round();
        if idx.is_nan() {
            return 0;
        }
        idx.clamp(0.0, levels) as usize
    }

    pub fn char_at(&self, index: usize) -> char {
        self.chars.get(index).copied().unwrap_or(' ')
    }
}

impl Default for GlyphRamp {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RampPreset {
    Complex,
    Classic,
    Blocks,
    Dots,
}

impl RampPreset {
    pub const ALL: [RampPreset; 4] =
        [RampPreset::Complex, RampPreset::Classic, RampPreset::Blocks, RampPreset::Dots];

    /// Unknown names resolve to the classic ramp.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "complex" => RampPreset::Complex,
            "blocks" => RampPreset::Blocks,
            "dots" => RampPreset::Dots,
            _ => RampPreset::Classic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RampPreset::Complex => "complex",
            RampPreset::Classic => "classic",
            RampPreset::Blocks => "blocks",
            RampPreset::Dots => "dots",
        }
    }

    pub fn ramp(self) -> GlyphRamp {
        match self {
            RampPreset::Complex => GlyphRamp::complex(),
            RampPreset::Classic => GlyphRamp::classic(),
            RampPreset::Blocks => GlyphRamp::blocks(),
            RampPreset::Dots => GlyphRamp::dots(),
        }
    }
}
