use std::fmt;

#[derive(Clone, Copy, Debug)]
pub struct PaletteColor {
    ansi: &'static str,
}

impl PaletteColor {
    pub const fn new(ansi: &'static str) -> Self {
        Self { ansi }
    }

    pub const fn ansi(self) -> &'static str {
        self.ansi
    }
}

pub struct Palette;

impl Palette {
    pub const RESET: &'static str = "\x1b[0m";
    pub const DIM: &'static str = "\x1b[2m";

    pub const ACCENT: PaletteColor = PaletteColor::new("\x1b[34m");
    pub const INFO: PaletteColor = PaletteColor::new("\x1b[36m");
    pub const SUCCESS: PaletteColor = PaletteColor::new("\x1b[32m");
    pub const WARNING: PaletteColor = PaletteColor::new("\x1b[33m");

    pub fn paint(color: PaletteColor, value: impl fmt::Display) -> String {
        format!("{}{}{}", color.ansi(), value, Self::RESET)
    }

    pub fn dim(value: impl fmt::Display) -> String {
        format!("{}{}{}", Self::DIM, value, Self::RESET)
    }

    /// Status line on stderr so that `--dry-run` output on stdout stays clean.
    pub fn status(color: PaletteColor, label: &str, message: impl fmt::Display) {
        eprintln!("{} {}", Self::paint(color, label), message);
    }

    pub fn warn(message: impl fmt::Display) {
        Self::status(Self::WARNING, "warning:", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_value_in_color_and_reset() {
        let painted = Palette::paint(Palette::SUCCESS, "saved");
        assert_eq!(painted, "\x1b[32msaved\x1b[0m");
    }

    #[test]
    fn dim_wraps_value() {
        assert_eq!(Palette::dim(3), "\x1b[2m3\x1b[0m");
    }
}
