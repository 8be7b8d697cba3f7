//! # Theme System
//!
//! Colors for the page, the console tray and the output log categories.
//!
//! ## Built-in Themes
//!
//! - **Catppuccin Mocha** (default)
//! - **Catppuccin Macchiato**
//! - **Catppuccin Frappe**
//! - **Dracula**
//! - **Nord**
//! - **Gruvbox Dark**
//!
//! The theme is chosen by name in the site configuration or with `--theme`.

use crate::ui::output::Category;
use ratatui::style::Color;

/// All colors used by the termfolio TUI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name, as used in the config file.
    pub name: &'static str,

    /// Page and tray background.
    pub bg: Color,
    /// Primary text and `Category::None` entries.
    pub fg: Color,
    /// Placeholder text, hints, unfocused borders.
    pub fg_dim: Color,

    /// Prompt glyph, focused borders, `<code>` runs.
    pub accent: Color,
    /// Background of the selected menu item.
    pub selection_bg: Color,

    // -- Output categories --
    pub system: Color,
    pub command: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// Foreground color of an output entry.
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::System => self.system,
            Category::Command => self.command,
            Category::Error => self.error,
            Category::Success => self.success,
            Category::None => self.fg,
        }
    }
}

static BUILT_IN_THEMES: [Theme; 6] = [
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),             // base
        fg: Color::Rgb(205, 214, 244),          // text
        fg_dim: Color::Rgb(108, 112, 134),      // overlay0
        accent: Color::Rgb(137, 180, 250),      // blue
        selection_bg: Color::Rgb(69, 71, 90),   // surface1
        system: Color::Rgb(148, 226, 213),      // teal
        command: Color::Rgb(249, 226, 175),     // yellow
        error: Color::Rgb(243, 139, 168),       // red
        success: Color::Rgb(166, 227, 161),     // green
    },
    Theme {
        name: "Catppuccin Macchiato",
        bg: Color::Rgb(36, 39, 58),
        fg: Color::Rgb(202, 211, 245),
        fg_dim: Color::Rgb(110, 115, 141),
        accent: Color::Rgb(138, 173, 244),
        selection_bg: Color::Rgb(73, 77, 100),
        system: Color::Rgb(139, 213, 202),
        command: Color::Rgb(238, 212, 159),
        error: Color::Rgb(237, 135, 150),
        success: Color::Rgb(166, 218, 149),
    },
    Theme {
        name: "Catppuccin Frappe",
        bg: Color::Rgb(48, 52, 70),
        fg: Color::Rgb(198, 208, 245),
        fg_dim: Color::Rgb(115, 121, 148),
        accent: Color::Rgb(140, 170, 238),
        selection_bg: Color::Rgb(81, 87, 109),
        system: Color::Rgb(129, 200, 190),
        command: Color::Rgb(229, 200, 144),
        error: Color::Rgb(231, 130, 132),
        success: Color::Rgb(166, 209, 137),
    },
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(189, 147, 249), // purple
        selection_bg: Color::Rgb(68, 71, 90),
        system: Color::Rgb(139, 233, 253),
        command: Color::Rgb(241, 250, 140),
        error: Color::Rgb(255, 85, 85),
        success: Color::Rgb(80, 250, 123),
    },
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208), // frost
        selection_bg: Color::Rgb(67, 76, 94),
        system: Color::Rgb(129, 161, 193),
        command: Color::Rgb(235, 203, 139),
        error: Color::Rgb(191, 97, 106),
        success: Color::Rgb(163, 190, 140),
    },
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(254, 128, 25), // orange
        selection_bg: Color::Rgb(80, 73, 69),
        system: Color::Rgb(131, 165, 152),
        command: Color::Rgb(250, 189, 47),
        error: Color::Rgb(251, 73, 52),
        success: Color::Rgb(184, 187, 38),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// Convert a catppuccin color to a ratatui Color via its RGB values.
    fn ctp(color: catppuccin::Color) -> Color {
        Color::Rgb(color.rgb.r, color.rgb.g, color.rgb.b)
    }

    #[test]
    fn test_default_is_mocha() {
        assert_eq!(Theme::default_theme().name, "Catppuccin Mocha");
    }

    #[test]
    fn test_by_name_case_insensitive() {
        assert!(Theme::by_name("catppuccin mocha").is_some());
        assert!(Theme::by_name("NORD").is_some());
        assert!(Theme::by_name("nonexistent").is_none());
    }

    #[test]
    fn test_catppuccin_mocha_matches_palette() {
        let mocha = catppuccin::PALETTE.mocha.colors;
        let theme = Theme::default_theme();
        assert_eq!(theme.bg, ctp(mocha.base));
        assert_eq!(theme.fg, ctp(mocha.text));
        assert_eq!(theme.accent, ctp(mocha.blue));
        assert_eq!(theme.system, ctp(mocha.teal));
        assert_eq!(theme.command, ctp(mocha.yellow));
        assert_eq!(theme.error, ctp(mocha.red));
        assert_eq!(theme.success, ctp(mocha.green));
    }

    #[test]
    fn test_catppuccin_macchiato_matches_palette() {
        let macchiato = catppuccin::PALETTE.macchiato.colors;
        let theme = Theme::by_name("Catppuccin Macchiato").expect("theme exists");
        assert_eq!(theme.bg, ctp(macchiato.base));
        assert_eq!(theme.system, ctp(macchiato.teal));
        assert_eq!(theme.error, ctp(macchiato.red));
    }

    #[test]
    fn test_catppuccin_frappe_matches_palette() {
        let frappe = catppuccin::PALETTE.frappe.colors;
        let theme = Theme::by_name("Catppuccin Frappe").expect("theme exists");
        assert_eq!(theme.bg, ctp(frappe.base));
        assert_eq!(theme.system, ctp(frappe.teal));
        assert_eq!(theme.success, ctp(frappe.green));
    }

    #[test]
    fn test_category_colors() {
        let theme = Theme::default_theme();
        assert_eq!(theme.category_color(Category::Error), theme.error);
        assert_eq!(theme.category_color(Category::None), theme.fg);
        assert_ne!(
            theme.category_color(Category::System),
            theme.category_color(Category::Success)
        );
    }

    #[test]
    fn test_all_themes_have_distinct_names() {
        let names: Vec<&str> = Theme::all().iter().map(|t| t.name).collect();
        let mut unique = names.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(names.len(), unique.len(), "duplicate theme names found");
    }
}
