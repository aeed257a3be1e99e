use serde::Serialize;

pub const DEFAULT_COMPACT_BREAKPOINT: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    Compact,
    Wide,
}

/// Width at or below the breakpoint is compact.
#[derive(Debug, Clone, Copy)]
pub struct ViewportClassifier {
    breakpoint: u16,
    class: ViewportClass,
}

impl ViewportClassifier {
    pub fn new(breakpoint: u16, width: u16) -> Self {
        Self {
            breakpoint,
            class: classify(breakpoint, width),
        }
    }

    pub fn class(&self) -> ViewportClass {
        self.class
    }

    /// Reclassifies for a new width; returns true when the class changed.
    pub fn resize(&mut self, width: u16) -> bool {
        let next = classify(self.breakpoint, width);
        let changed = next != self.class;
        if changed {
            tracing::debug!(width, class = ?next, "viewport class changed");
        }
        self.class = next;
        changed
    }
}

impl Default for ViewportClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACT_BREAKPOINT, u16::MAX)
    }
}

fn classify(breakpoint: u16, width: u16) -> ViewportClass {
    if width <= breakpoint {
        ViewportClass::Compact
    } else {
        ViewportClass::Wide
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_itself_is_compact() {
        let classifier = ViewportClassifier::new(768, 768);
        assert_eq!(classifier.class(), ViewportClass::Compact);
        assert_eq!(
            ViewportClassifier::new(768, 769).class(),
            ViewportClass::Wide
        );
    }

    #[test]
    fn repeated_resizes_are_idempotent() {
        let mut classifier = ViewportClassifier::new(100, 200);
        assert!(classifier.resize(80));
        assert!(!classifier.resize(80));
        assert!(!classifier.resize(60));
        assert_eq!(classifier.class(), ViewportClass::Compact);
        assert!(classifier.resize(101));
        assert_eq!(classifier.class(), ViewportClass::Wide);
    }
}
