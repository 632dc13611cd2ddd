use ratatui::style::Color;

/// Nord palette with the semantic names the card uses.
pub struct NordTheme {
    // Polar Night
    pub nord0: Color, // #2E3440 background
    pub nord1: Color, // #3B4252 raised background
    pub nord2: Color, // #434C5E borders
    pub nord3: Color, // #4C566A muted text

    // Snow Storm
    pub nord4: Color, // #D8DEE9 body text
    pub nord5: Color, // #E5E9F0 headings

    // Frost
    pub nord7: Color, // #8FBCBB journal line
    pub nord8: Color, // #88C0D0 links, selection
    pub nord9: Color, // #81A1C1 MeSH tags
    pub nord10: Color, // #5E81AC identifier tags

    // Aurora
    pub nord13: Color, // #EBCB8B featured card
    pub nord14: Color, // #A3BE8C citation count
}

impl Default for NordTheme {
    fn default() -> Self {
        Self {
            nord0: Color::Rgb(46, 52, 64),
            nord1: Color::Rgb(59, 66, 82),
            nord2: Color::Rgb(67, 76, 94),
            nord3: Color::Rgb(76, 86, 106),
            nord4: Color::Rgb(216, 222, 233),
            nord5: Color::Rgb(229, 233, 240),
            nord7: Color::Rgb(143, 188, 187),
            nord8: Color::Rgb(136, 192, 208),
            nord9: Color::Rgb(129, 161, 193),
            nord10: Color::Rgb(94, 129, 172),
            nord13: Color::Rgb(235, 203, 139),
            nord14: Color::Rgb(163, 190, 140),
        }
    }
}

impl NordTheme {
    pub fn bg(&self) -> Color {
        self.nord0
    }
    pub fn bg_secondary(&self) -> Color {
        self.nord1
    }
    pub fn border(&self) -> Color {
        self.nord2
    }
    pub fn muted(&self) -> Color {
        self.nord3
    }
    pub fn fg(&self) -> Color {
        self.nord4
    }
    pub fn fg_bright(&self) -> Color {
        self.nord5
    }
    pub fn frost_mint(&self) -> Color {
        self.nord7
    }
    pub fn frost_ice(&self) -> Color {
        self.nord8
    }
    pub fn frost_blue(&self) -> Color {
        self.nord9
    }
    pub fn frost_dark(&self) -> Color {
        self.nord10
    }
    pub fn yellow(&self) -> Color {
        self.nord13
    }
    pub fn green(&self) -> Color {
        self.nord14
    }

    // Card aliases
    pub fn main_border(&self) -> Color {
        self.yellow()
    }
    pub fn main_bg(&self) -> Color {
        self.bg_secondary()
    }
    pub fn selected_border(&self) -> Color {
        self.frost_ice()
    }
    pub fn link_color(&self) -> Color {
        self.frost_ice()
    }
    pub fn identifier_tag_bg(&self) -> Color {
        self.frost_dark()
    }
    pub fn citation_tag_bg(&self) -> Color {
        self.green()
    }
    pub fn mesh_tag_bg(&self) -> Color {
        self.frost_blue()
    }
}
