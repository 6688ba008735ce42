/// Checklist over the current recipe's ingredient lines. Lives only as long as the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<(String, bool)>,
}

impl ShoppingList {
    pub fn new(lines: &[String]) -> Self {
        Self {
            items: lines.iter().map(|line| (line.clone(), false)).collect(),
        }
    }

    pub fn items(&self) -> &[(String, bool)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flips one item, returning its new state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let (_, checked) = self.items.get_mut(index)?;
        *checked = !*checked;

        Some(*checked)
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|(_, checked)| !checked)
            .map(|(line, _)| line.as_str())
    }
}
