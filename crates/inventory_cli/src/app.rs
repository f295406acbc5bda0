//! Line-oriented form UI.
//!
//! # Invariants
//! - Navigation state lives only in the `Page` value threaded through `run`.
//! - The update form always re-fetches the item before showing its fields.
//! - End of input ends the session after the current step.

use crate::api::InventoryApi;
use crate::page::Page;
use inventory_core::{Item, ItemId, ItemInput};
use log::debug;
use std::io::{self, BufRead, Write};

pub struct App<A, R, W> {
    api: A,
    input: R,
    output: W,
    input_closed: bool,
}

impl<A: InventoryApi, R: BufRead, W: Write> App<A, R, W> {
    pub fn new(api: A, input: R, output: W) -> Self {
        Self {
            api,
            input,
            output,
            input_closed: false,
        }
    }

    /// Runs from `start` until the user quits or input ends.
    pub fn run(&mut self, start: Page) -> io::Result<()> {
        let mut page = start;
        while page != Page::Quit {
            page = self.step(page)?;
            if self.input_closed {
                page = Page::Quit;
            }
        }
        Ok(())
    }

    /// Renders one page and returns the page to show next.
    pub fn step(&mut self, page: Page) -> io::Result<Page> {
        debug!("event=ui_render module=cli status=start page={page:?}");
        writeln!(self.output, "== {} ==", page.title())?;
        match page {
            Page::Home => self.home(),
            Page::Add => self.add(),
            Page::Update => self.update(),
            Page::Delete => self.delete(),
            Page::Search => self.search(),
            Page::ViewList => self.view_list(),
            Page::Quit => Ok(Page::Quit),
        }
    }

    fn home(&mut self) -> io::Result<Page> {
        writeln!(self.output, "Welcome to the Inventory Management App!")?;
        for (key, page) in Page::MENU {
            writeln!(self.output, "  [{key}] {}", page.title())?;
        }
        let choice = self.prompt("Choose an action: ")?;
        match Page::from_menu_key(&choice) {
            Some(page) => Ok(page),
            None => {
                if !self.input_closed {
                    writeln!(self.output, "Unknown choice `{}`.", choice.trim())?;
                }
                Ok(Page::Home)
            }
        }
    }

    fn add(&mut self) -> io::Result<Page> {
        let name = self.prompt("Name: ")?;
        let description = self.prompt("Description: ")?;
        let Some(price) = self.prompt_count("Price", None)? else {
            return Ok(Page::Home);
        };
        let Some(quantity) = self.prompt_count("Quantity", None)? else {
            return Ok(Page::Home);
        };

        let input = ItemInput {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            quantity: Some(quantity),
        };
        match self.api.create_item(&input) {
            Ok(item) => writeln!(self.output, "Item created successfully (ID {}).", item.id)?,
            Err(err) => writeln!(self.output, "Error creating item: {err}")?,
        }
        Ok(Page::Home)
    }

    fn update(&mut self) -> io::Result<Page> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Page::Home);
        };
        // Ids shift on every delete, so never reuse values from an earlier screen.
        let current = match self.api.get_item(id) {
            Ok(item) => item,
            Err(err) => {
                writeln!(self.output, "Error fetching item: {err}")?;
                return Ok(Page::Home);
            }
        };
        writeln!(self.output, "{}", describe(&current))?;

        let name = self.prompt_with_default("Name", &current.name)?;
        let description = self.prompt_with_default("Description", &current.description)?;
        let Some(price) = self.prompt_count("Price", Some(current.price))? else {
            return Ok(Page::Home);
        };
        let Some(quantity) = self.prompt_count("Quantity", Some(current.quantity))? else {
            return Ok(Page::Home);
        };

        let input = ItemInput {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            quantity: Some(quantity),
        };
        match self.api.update_item(id, &input) {
            Ok(_) => writeln!(self.output, "Item updated successfully.")?,
            Err(err) => writeln!(self.output, "Error updating item: {err}")?,
        }
        Ok(Page::Home)
    }

    fn delete(&mut self) -> io::Result<Page> {
        let Some(id) = self.prompt_id()? else {
            return Ok(Page::Home);
        };
        match self.api.delete_item(id) {
            Ok(item) => writeln!(self.output, "Item deleted successfully: {}", describe(&item))?,
            Err(err) => writeln!(self.output, "Error deleting item: {err}")?,
        }
        Ok(Page::Home)
    }

    fn search(&mut self) -> io::Result<Page> {
        let name = self.prompt("Item Name: ")?;
        match self.api.search_items(&name) {
            Ok(items) if items.is_empty() => writeln!(self.output, "No items found.")?,
            Ok(items) => {
                for item in &items {
                    writeln!(self.output, "{}", describe(item))?;
                }
            }
            Err(err) => writeln!(self.output, "Error searching items: {err}")?,
        }
        Ok(Page::Home)
    }

    fn view_list(&mut self) -> io::Result<Page> {
        match self.api.list_items() {
            Ok(items) if items.is_empty() => writeln!(self.output, "No items found.")?,
            Ok(items) => self.write_table(&items)?,
            Err(err) => writeln!(self.output, "Error fetching items: {err}")?,
        }
        Ok(Page::Home)
    }

    fn write_table(&mut self, items: &[Item]) -> io::Result<()> {
        let name_width = column_width("Name", items.iter().map(|item| item.name.as_str()));
        let description_width = column_width(
            "Description",
            items.iter().map(|item| item.description.as_str()),
        );
        writeln!(
            self.output,
            "{:>4}  {:<name_width$}  {:<description_width$}  {:>8}  {:>8}",
            "ID", "Name", "Description", "Price", "Quantity"
        )?;
        for item in items {
            writeln!(
                self.output,
                "{:>4}  {:<name_width$}  {:<description_width$}  {:>8}  {:>8}",
                item.id, item.name, item.description, item.price, item.quantity
            )?;
        }
        Ok(())
    }

    /// Reads one line without its terminator; empty once input has ended.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.input_closed = true;
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_with_default(&mut self, label: &str, current: &str) -> io::Result<String> {
        let value = self.prompt(&format!("{label} [{current}]: "))?;
        if value.is_empty() {
            return Ok(current.to_string());
        }
        Ok(value)
    }

    /// Reads a non-negative integer; `None` after reporting bad input.
    fn prompt_count(&mut self, label: &str, current: Option<i64>) -> io::Result<Option<i64>> {
        let raw = match current {
            Some(value) => self.prompt(&format!("{label} [{value}]: "))?,
            None => self.prompt(&format!("{label}: "))?,
        };
        let text = raw.trim();
        if text.is_empty() {
            if let Some(value) = current {
                return Ok(Some(value));
            }
        }
        match parse_count(text) {
            Some(value) => Ok(Some(value)),
            None => {
                writeln!(self.output, "{label} must be a non-negative integer.")?;
                Ok(None)
            }
        }
    }

    fn prompt_id(&mut self) -> io::Result<Option<ItemId>> {
        let raw = self.prompt("Item ID: ")?;
        match parse_count(raw.trim()) {
            Some(id) => Ok(Some(id)),
            None => {
                writeln!(self.output, "Item ID must be a non-negative integer.")?;
                Ok(None)
            }
        }
    }
}

fn parse_count(text: &str) -> Option<i64> {
    text.parse::<i64>().ok().filter(|value| *value >= 0)
}

fn describe(item: &Item) -> String {
    format!(
        "ID: {}, Name: {}, Description: {}, Price: {}, Quantity: {}",
        item.id, item.name, item.description, item.price, item.quantity
    )
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|value| value.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::api::{ClientError, ClientResult, InventoryApi};
    use crate::page::Page;
    use inventory_core::{Item, ItemDraft, ItemId, ItemInput};
    use std::cell::RefCell;
    use std::io::Cursor;

    #[derive(Default)]
    struct FakeApi {
        items: RefCell<Vec<Item>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeApi {
        fn with_items(names: &[&str]) -> Self {
            let api = Self::default();
            for name in names {
                let draft = ItemDraft::new(*name, format!("{name} desc"), 3, 4).unwrap();
                api.create_item(&ItemInput::from(draft)).unwrap();
            }
            api.calls.borrow_mut().clear();
            api
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn not_found() -> ClientError {
            ClientError::Status {
                code: 404,
                detail: "Item not found".to_string(),
            }
        }

        fn draft(input: &ItemInput) -> ItemDraft {
            ItemDraft::try_from(input.clone()).unwrap()
        }
    }

    impl InventoryApi for FakeApi {
        fn list_items(&self) -> ClientResult<Vec<Item>> {
            self.record("list".to_string());
            Ok(self.items.borrow().clone())
        }

        fn get_item(&self, id: ItemId) -> ClientResult<Item> {
            self.record(format!("get {id}"));
            self.items
                .borrow()
                .iter()
                .find(|item| item.id == id)
                .cloned()
                .ok_or_else(Self::not_found)
        }

        fn search_items(&self, name: &str) -> ClientResult<Vec<Item>> {
            self.record(format!("search {name}"));
            Ok(self
                .items
                .borrow()
                .iter()
                .filter(|item| item.name.contains(name))
                .cloned()
                .collect())
        }

        fn create_item(&self, input: &ItemInput) -> ClientResult<Item> {
            self.record("create".to_string());
            let mut items = self.items.borrow_mut();
            let item = Item::from_draft(items.len() as ItemId + 1, Self::draft(input));
            items.push(item.clone());
            Ok(item)
        }

        fn update_item(&self, id: ItemId, input: &ItemInput) -> ClientResult<Item> {
            self.record(format!("update {id}"));
            let mut items = self.items.borrow_mut();
            let slot = items
                .iter_mut()
                .find(|item| item.id == id)
                .ok_or_else(Self::not_found)?;
            *slot = Item::from_draft(id, Self::draft(input));
            Ok(slot.clone())
        }

        fn delete_item(&self, id: ItemId) -> ClientResult<Item> {
            self.record(format!("delete {id}"));
            let mut items = self.items.borrow_mut();
            let index = items
                .iter()
                .position(|item| item.id == id)
                .ok_or_else(Self::not_found)?;
            let removed = items.remove(index);
            for (new_id, item) in (1..).zip(items.iter_mut()) {
                item.id = new_id;
            }
            Ok(removed)
        }
    }

    fn run_script(api: FakeApi, script: &str) -> (FakeApi, String) {
        let mut app = App::new(api, Cursor::new(script.as_bytes().to_vec()), Vec::new());
        app.run(Page::Home).unwrap();
        let App { api, output, .. } = app;
        (api, String::from_utf8(output).unwrap())
    }

    #[test]
    fn add_flow_creates_item_and_returns_home() {
        let (api, output) = run_script(FakeApi::default(), "1\nbolt\nm6 zinc\n5\n10\nq\n");

        assert!(output.contains("Item created successfully (ID 1)."));
        assert_eq!(output.matches("== Inventory Management ==").count(), 2);
        assert_eq!(api.items.borrow()[0].name, "bolt");
        assert_eq!(api.items.borrow()[0].quantity, 10);
    }

    #[test]
    fn add_flow_rejects_negative_price_without_calling_api() {
        let (api, output) = run_script(FakeApi::default(), "1\nbolt\nm6\n-5\nq\n");

        assert!(output.contains("Price must be a non-negative integer."));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn update_flow_refetches_and_keeps_blank_fields() {
        let api = FakeApi::with_items(&["a", "b"]);
        let (api, output) = run_script(api, "2\n2\nb2\n\n\n9\nq\n");

        assert_eq!(*api.calls.borrow(), vec!["get 2", "update 2"]);
        assert!(output.contains("Name [b]: "));
        assert!(output.contains("Item updated successfully."));
        let updated = api.items.borrow()[1].clone();
        assert_eq!(updated.name, "b2");
        assert_eq!(updated.description, "b desc");
        assert_eq!(updated.price, 3);
        assert_eq!(updated.quantity, 9);
    }

    #[test]
    fn update_flow_reports_missing_item() {
        let (api, output) = run_script(FakeApi::with_items(&["a"]), "2\n7\nq\n");

        assert!(output.contains("Error fetching item: 404: Item not found"));
        assert_eq!(*api.calls.borrow(), vec!["get 7"]);
    }

    #[test]
    fn delete_then_view_list_shows_renumbered_ids() {
        let api = FakeApi::with_items(&["A", "B"]);
        let (_, output) = run_script(api, "3\n1\n5\nq\n");

        assert!(output.contains("Item deleted successfully: ID: 1, Name: A"));
        let table_row = output
            .lines()
            .find(|line| line.contains("B desc"))
            .unwrap();
        assert!(table_row.trim_start().starts_with("1 "));
    }

    #[test]
    fn search_flow_lists_matches_or_reports_none() {
        let api = FakeApi::with_items(&["steel bolt", "brass nut"]);
        let (_, output) = run_script(api, "4\nsteel\n4\ncopper\nq\n");

        assert!(output.contains("ID: 1, Name: steel bolt"));
        assert!(!output.contains("Name: brass nut"));
        assert!(output.contains("No items found."));
    }

    #[test]
    fn unknown_choice_stays_home_and_eof_quits() {
        let (api, output) = run_script(FakeApi::default(), "x\n");

        assert!(output.contains("Unknown choice `x`."));
        assert!(api.calls.borrow().is_empty());
    }
}
