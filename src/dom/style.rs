use std::fmt::Write;

/// Layout mode override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Static,
    Absolute,
}

impl Position {
    pub fn as_css(&self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Absolute => "absolute",
        }
    }

    pub fn from_css(value: &str) -> Option<Position> {
        match value.trim() {
            "static" => Some(Position::Static),
            "absolute" => Some(Position::Absolute),
            _ => None,
        }
    }
}

/// Inline style overrides of one element.
///
/// `None` means "not overridden": the element falls back to its natural
/// layout for that property.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub position: Option<Position>,
    pub left: Option<f32>,
    pub top: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub opacity: Option<f32>,
}

impl Style {
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Renders the overrides as an inline `style` attribute value.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(position) = self.position {
            let _ = write!(css, "position: {};", position.as_css());
        }
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ] {
            if let Some(value) = value {
                if !css.is_empty() {
                    css.push(' ');
                }
                let _ = write!(css, "{name}: {value}px;");
            }
        }
        if let Some(opacity) = self.opacity {
            if !css.is_empty() {
                css.push(' ');
            }
            let _ = write!(css, "opacity: {opacity};");
        }
        css
    }

    /// Parses an inline `style` attribute value. Unknown properties are ignored.
    pub fn from_css(css: &str) -> Style {
        let mut style = Style::default();
        for declaration in css.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            let px = || value.trim_end_matches("px").trim().parse::<f32>().ok();
            match name.trim() {
                "position" => style.position = Position::from_css(value),
                "left" => style.left = px(),
                "top" => style.top = px(),
                "width" => style.width = px(),
                "height" => style.height = px(),
                "opacity" => style.opacity = value.parse().ok(),
                _ => {}
            }
        }
        style
    }
}
