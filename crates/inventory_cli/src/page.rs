//! Navigation state for the form UI.

/// The form currently on screen.
///
/// Passed by value through the render loop; each step returns the next page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Add,
    Update,
    Delete,
    Search,
    ViewList,
    Quit,
}

impl Page {
    /// Header menu entries in display order.
    pub const MENU: [(&'static str, Page); 6] = [
        ("1", Page::Add),
        ("2", Page::Update),
        ("3", Page::Delete),
        ("4", Page::Search),
        ("5", Page::ViewList),
        ("q", Page::Quit),
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Inventory Management",
            Self::Add => "Add Item",
            Self::Update => "Update Item",
            Self::Delete => "Delete Item",
            Self::Search => "Search Items",
            Self::ViewList => "View the List of Items",
            Self::Quit => "Quit",
        }
    }

    /// Resolves a menu key; unknown keys yield `None`.
    pub fn from_menu_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::MENU
            .iter()
            .find(|(menu_key, _)| menu_key.eq_ignore_ascii_case(key))
            .map(|(_, page)| *page)
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn menu_keys_resolve_to_pages() {
        assert_eq!(Page::from_menu_key("1"), Some(Page::Add));
        assert_eq!(Page::from_menu_key(" 5 "), Some(Page::ViewList));
        assert_eq!(Page::from_menu_key("Q"), Some(Page::Quit));
        assert_eq!(Page::from_menu_key("9"), None);
    }
}
