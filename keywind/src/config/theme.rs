use ratatui::style::Color;

/// A frozen colour palette. Read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,

    /// Main background.
    pub bg: Color,
    /// Slightly lighter background for panels and borders.
    pub bg_alt: Color,

    /// Main accent: cursor highlight, selected items.
    pub primary: Color,
    /// Secondary accent: stats, labels.
    pub secondary: Color,
    pub error: Color,
    /// Already-typed text and hints.
    pub dim: Color,

    pub text: Color,
    /// Upcoming text in the typing view.
    pub text_muted: Color,

    pub progress: Color,
    pub graph_line: Color,
}

const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub const CYBERPUNK: Theme = Theme {
    name: "cyberpunk",
    bg: rgb(0x0a0e27),
    bg_alt: rgb(0x151b3d),
    primary: rgb(0x00ff9f),
    secondary: rgb(0x00d4ff),
    error: rgb(0xff4466),
    dim: rgb(0x3a3a5c),
    text: rgb(0xe0e0f0),
    text_muted: rgb(0x555577),
    progress: rgb(0x00ff9f),
    graph_line: rgb(0x00d4ff),
};

pub const NORD: Theme = Theme {
    name: "nord",
    bg: rgb(0x2e3440),
    bg_alt: rgb(0x3b4252),
    primary: rgb(0x88c0d0),
    secondary: rgb(0x81a1c1),
    error: rgb(0xbf616a),
    dim: rgb(0x4c566a),
    text: rgb(0xeceff4),
    text_muted: rgb(0x4c566a),
    progress: rgb(0x88c0d0),
    graph_line: rgb(0x81a1c1),
};

pub const DRACULA: Theme = Theme {
    name: "dracula",
    bg: rgb(0x282a36),
    bg_alt: rgb(0x383a47),
    primary: rgb(0xbd93f9),
    secondary: rgb(0xff79c6),
    error: rgb(0xff5555),
    dim: rgb(0x44475a),
    text: rgb(0xf8f8f2),
    text_muted: rgb(0x6272a4),
    progress: rgb(0xbd93f9),
    graph_line: rgb(0xff79c6),
};

pub const MONOKAI: Theme = Theme {
    name: "monokai",
    bg: rgb(0x272822),
    bg_alt: rgb(0x3e3d32),
    primary: rgb(0xa6e22e),
    secondary: rgb(0x66d9ef),
    error: rgb(0xf92672),
    dim: rgb(0x49483e),
    text: rgb(0xf8f8f2),
    text_muted: rgb(0x75715e),
    progress: rgb(0xa6e22e),
    graph_line: rgb(0x66d9ef),
};

pub const MINIMAL: Theme = Theme {
    name: "minimal",
    bg: rgb(0x000000),
    bg_alt: rgb(0x111111),
    primary: rgb(0xffffff),
    secondary: rgb(0xaaaaaa),
    error: rgb(0xff4444),
    dim: rgb(0x333333),
    text: rgb(0xffffff),
    text_muted: rgb(0x444444),
    progress: rgb(0xffffff),
    graph_line: rgb(0x888888),
};

pub const ALL: [Theme; 5] = [CYBERPUNK, NORD, DRACULA, MONOKAI, MINIMAL];

pub const DEFAULT: Theme = CYBERPUNK;

/// Look up a theme by name. Unknown names fall back to the default.
pub fn by_name(name: &str) -> Theme {
    ALL.iter()
        .find(|theme| theme.name == name)
        .copied()
        .unwrap_or(DEFAULT)
}
