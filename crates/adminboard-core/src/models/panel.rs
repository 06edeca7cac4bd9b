/// Pixels of the original layout per terminal column
const PIXELS_PER_COLUMN: u16 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPosition {
    Left,
    Right,
}

/// A side panel that toggles between an expanded and a collapsed width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsiblePanel {
    pub title: String,
    pub position: PanelPosition,
    pub expanded_width: u16,
    pub collapsed_width: u16,
    pub collapsed: bool,
}

impl CollapsiblePanel {
    pub fn new(title: &str, position: PanelPosition, expanded_width: u16, collapsed_width: u16) -> Self {
        Self {
            title: title.to_string(),
            position,
            expanded_width,
            collapsed_width,
            collapsed: false,
        }
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
    }

    /// Current width in layout pixels
    pub fn width(&self) -> u16 {
        if self.collapsed {
            self.collapsed_width
        } else {
            self.expanded_width
        }
    }

    /// Current width in terminal columns
    pub fn columns(&self) -> u16 {
        (self.width() / PIXELS_PER_COLUMN).max(1)
    }

    /// Chevron pointing the way the panel will move when toggled
    pub fn toggle_glyph(&self) -> &'static str {
        match (self.position, self.collapsed) {
            (PanelPosition::Left, true) | (PanelPosition::Right, false) => "›",
            (PanelPosition::Left, false) | (PanelPosition::Right, true) => "‹",
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.collapsed {
            "Expand panel"
        } else {
            "Collapse panel"
        }
    }
}

/// The Spark workspace: two left panels, a main area and one right panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkLayout {
    pub notebooks: CollapsiblePanel,
    pub sources: CollapsiblePanel,
    pub studio: CollapsiblePanel,
}

impl Default for SparkLayout {
    fn default() -> Self {
        Self {
            notebooks: CollapsiblePanel::new("Notebooks", PanelPosition::Left, 240, 48),
            sources: CollapsiblePanel::new("Sources", PanelPosition::Left, 280, 48),
            studio: CollapsiblePanel::new("Studio", PanelPosition::Right, 320, 48),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_width() {
        let mut panel = CollapsiblePanel::new("Notebooks", PanelPosition::Left, 240, 48);
        assert_eq!(panel.width(), 240);
        assert_eq!(panel.columns(), 30);

        panel.toggle();
        assert!(panel.collapsed);
        assert_eq!(panel.width(), 48);
        assert_eq!(panel.columns(), 6);

        panel.toggle();
        assert_eq!(panel.width(), 240);
    }

    #[test]
    fn test_toggle_glyph() {
        let mut left = CollapsiblePanel::new("L", PanelPosition::Left, 240, 48);
        assert_eq!(left.toggle_glyph(), "‹");
        assert_eq!(left.toggle_label(), "Collapse panel");
        left.toggle();
        assert_eq!(left.toggle_glyph(), "›");
        assert_eq!(left.toggle_label(), "Expand panel");

        let mut right = CollapsiblePanel::new("R", PanelPosition::Right, 320, 48);
        assert_eq!(right.toggle_glyph(), "›");
        right.toggle();
        assert_eq!(right.toggle_glyph(), "‹");
    }

    #[test]
    fn test_spark_layout_panels_independent() {
        let mut layout = SparkLayout::default();
        layout.sources.toggle();

        assert!(!layout.notebooks.collapsed);
        assert!(layout.sources.collapsed);
        assert!(!layout.studio.collapsed);
        assert_eq!(layout.studio.columns(), 40);
    }
}
