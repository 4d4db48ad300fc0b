//! Series color assignment
//!
//! The palette is an explicit ordered value. Assigning colors returns a new
//! palette with the colors in use moved to the back, so the next assignment
//! starts from colors nobody is showing.

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const TEXT_PRIMARY: &str = "#222222";
    pub const TEXT_MUTED: &str = "#666666";
    pub const BORDER: &str = "#999999";
    pub const GRID: &str = "#dddddd";

    /// Default series colors, in assignment order
    pub const PALETTE: [&str; 10] = [
        "#3b82f6", "#ef4444", "#22c55e", "#fbbf24", "#a855f7", "#06b6d4", "#f97316",
        "#ec4899", "#84cc16", "#64748b",
    ];
}

// ============================================================================
// PALETTE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(colors::PALETTE.iter().map(|c| c.to_string()).collect())
    }
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fill every empty slot with the first palette color not in `used` and
    /// not handed out earlier in this call. Once the palette is exhausted,
    /// colors are reused in palette order.
    pub fn assign<'a>(
        self,
        used: &[String],
        slots: impl IntoIterator<Item = &'a mut Option<String>>,
    ) -> Palette {
        let mut in_use: Vec<String> = used.to_vec();
        let mut cycle = 0usize;

        for slot in slots {
            if slot.is_some() {
                continue;
            }
            let free = self.colors.iter().find(|c| !in_use.contains(c)).cloned();
            let color = match free {
                Some(color) => color,
                None if self.colors.is_empty() => colors::TEXT_PRIMARY.to_string(),
                None => {
                    let color = self.colors[cycle % self.colors.len()].clone();
                    cycle += 1;
                    tracing::warn!(color = %color, "palette exhausted, reusing color");
                    color
                }
            };
            in_use.push(color.clone());
            *slot = Some(color);
        }

        self.in_use_last(&in_use)
    }

    /// Move `colors` to the back so they are handed out last
    pub fn recycle(self, colors: &[String]) -> Palette {
        let (back, front): (Vec<String>, Vec<String>) =
            self.colors.into_iter().partition(|c| colors.contains(c));
        Palette::new(front.into_iter().chain(back).collect())
    }

    fn in_use_last(self, in_use: &[String]) -> Palette {
        let (back, front): (Vec<String>, Vec<String>) =
            self.colors.into_iter().partition(|c| in_use.contains(c));
        Palette::new(front.into_iter().chain(back).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(colors: &[&str]) -> Palette {
        Palette::new(colors.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_assign_skips_used_and_preset() {
        let mut slots = vec![None, Some("red".to_string()), None];
        let used = vec!["red".to_string()];
        let next = palette(&["red", "green", "blue"]).assign(&used, slots.iter_mut());

        assert_eq!(slots[0].as_deref(), Some("green"));
        assert_eq!(slots[1].as_deref(), Some("red"));
        assert_eq!(slots[2].as_deref(), Some("blue"));
        assert_eq!(next.colors(), ["red", "green", "blue"]);
    }

    #[test]
    fn test_assign_moves_in_use_to_back() {
        let mut slots = vec![None];
        let next = palette(&["a", "b", "c"]).assign(&[], slots.iter_mut());
        assert_eq!(next.colors(), ["b", "c", "a"]);
    }

    #[test]
    fn test_exhausted_palette_cycles() {
        let mut slots = vec![None, None, None];
        palette(&["a", "b"]).assign(&[], slots.iter_mut());
        assert_eq!(slots[2].as_deref(), Some("a"));
    }

    #[test]
    fn test_recycle_moves_to_back() {
        let next = palette(&["a", "b", "c"]).recycle(&["a".to_string()]);
        assert_eq!(next.colors(), ["b", "c", "a"]);
    }
}
