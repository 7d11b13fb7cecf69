use ratatui::style::Color;

/// Light or dark background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

/// Colours for every kind of cell and the chrome around the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub empty: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub obstacle: Color,
    pub border: Color,
    pub label: Color,
    pub text: Color,
}

/// Current look of the game: background mode plus the colorblind switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colorblind: bool,
}

impl Theme {
    pub fn new(mode: ThemeMode, colorblind: bool) -> Self {
        Self { mode, colorblind }
    }

    pub fn palette(&self) -> Palette {
        match (self.mode, self.colorblind) {
            (ThemeMode::Dark, false) => Palette {
                background: Color::Black,
                empty: Color::DarkGray,
                snake_head: Color::Cyan,
                snake_body: Color::Green,
                food: Color::Red,
                obstacle: Color::Gray,
                border: Color::White,
                label: Color::Yellow,
                text: Color::White,
            },
            (ThemeMode::Light, false) => Palette {
                background: Color::White,
                empty: Color::Gray,
                snake_head: Color::Blue,
                snake_body: Color::Green,
                food: Color::Red,
                obstacle: Color::DarkGray,
                border: Color::Black,
                label: Color::Magenta,
                text: Color::Black,
            },
            // Blue / orange / yellow stay apart for red-green colour blindness
            (ThemeMode::Dark, true) => Palette {
                background: Color::Black,
                empty: Color::DarkGray,
                snake_head: Color::Rgb(86, 180, 233),
                snake_body: Color::Rgb(0, 114, 178),
                food: Color::Rgb(230, 159, 0),
                obstacle: Color::Rgb(240, 228, 66),
                border: Color::White,
                label: Color::Rgb(230, 159, 0),
                text: Color::White,
            },
            (ThemeMode::Light, true) => Palette {
                background: Color::White,
                empty: Color::Gray,
                snake_head: Color::Rgb(0, 114, 178),
                snake_body: Color::Rgb(86, 180, 233),
                food: Color::Rgb(213, 94, 0),
                obstacle: Color::Black,
                border: Color::Black,
                label: Color::Rgb(213, 94, 0),
                text: Color::Black,
            },
        }
    }
}
