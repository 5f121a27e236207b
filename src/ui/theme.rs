use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub selection_bg: Color,
    pub badge_bg: Color, // Red badge behind white text
    pub badge_fg: Color,
    pub toast_bg: Color,
    pub toast_fg: Color,
    pub status_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    selection_bg: Color::Rgb(50, 50, 70),      // Slightly lighter BG for the selected row
    badge_bg: Color::Rgb(210, 15, 57),
    badge_fg: Color::Rgb(255, 255, 255),
    toast_bg: Color::Rgb(69, 71, 90),
    toast_fg: Color::Rgb(205, 214, 244),
    status_bg: Color::Rgb(50, 50, 70),
};
