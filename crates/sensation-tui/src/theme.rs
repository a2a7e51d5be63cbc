use crossterm::style::Color;

/// Color theme for the board and panels.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Box border color (3x3 separators)
    pub box_border: Color,
    /// Given (puzzle) cell color
    pub given: Color,
    /// Player-entered value color
    pub filled: Color,
    /// Pencil-mark color
    pub note: Color,
    /// Selected cell background
    pub selected_bg: Color,
    /// Conflict/error color
    pub conflict: Color,
    /// Success/complete color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn all() -> [Theme; 3] {
        [Self::classic(), Self::dark(), Self::pastel()]
    }

    /// Light board on a neutral background.
    pub fn classic() -> Self {
        Self {
            name: "Classic",
            bg: Color::Rgb { r: 248, g: 248, b: 250 },
            fg: Color::Rgb { r: 35, g: 35, b: 45 },
            border: Color::Rgb { r: 175, g: 175, b: 190 },
            box_border: Color::Rgb { r: 70, g: 70, b: 95 },
            given: Color::Rgb { r: 0, g: 0, b: 0 },
            filled: Color::Rgb { r: 30, g: 100, b: 205 },
            note: Color::Rgb { r: 135, g: 135, b: 155 },
            selected_bg: Color::Rgb { r: 185, g: 205, b: 255 },
            conflict: Color::Rgb { r: 215, g: 45, b: 45 },
            success: Color::Rgb { r: 35, g: 150, b: 60 },
            info: Color::Rgb { r: 95, g: 95, b: 115 },
            key: Color::Rgb { r: 190, g: 115, b: 20 },
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark",
            bg: Color::Rgb { r: 22, g: 24, b: 32 },
            fg: Color::Rgb { r: 228, g: 228, b: 238 },
            border: Color::Rgb { r: 72, g: 77, b: 92 },
            box_border: Color::Rgb { r: 135, g: 145, b: 175 },
            given: Color::Rgb { r: 255, g: 255, b: 255 },
            filled: Color::Rgb { r: 85, g: 180, b: 255 },
            note: Color::Rgb { r: 140, g: 150, b: 180 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            conflict: Color::Rgb { r: 255, g: 95, b: 95 },
            success: Color::Rgb { r: 95, g: 255, b: 135 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    pub fn pastel() -> Self {
        Self {
            name: "Pastel",
            bg: Color::Rgb { r: 253, g: 242, b: 248 },
            fg: Color::Rgb { r: 80, g: 55, b: 70 },
            border: Color::Rgb { r: 230, g: 190, b: 210 },
            box_border: Color::Rgb { r: 205, g: 115, b: 160 },
            given: Color::Rgb { r: 90, g: 40, b: 70 },
            filled: Color::Rgb { r: 175, g: 85, b: 135 },
            note: Color::Rgb { r: 195, g: 160, b: 180 },
            selected_bg: Color::Rgb { r: 245, g: 200, b: 225 },
            conflict: Color::Rgb { r: 225, g: 75, b: 95 },
            success: Color::Rgb { r: 110, g: 185, b: 130 },
            info: Color::Rgb { r: 155, g: 120, b: 140 },
            key: Color::Rgb { r: 200, g: 125, b: 60 },
        }
    }
}
