//! Interactive inventory menu.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the menu drives a prompt/answer loop over any reader/writer pair
//!
//! End of input ends the session the same way `q` does.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::domain::ItemKind;
use crate::error::AppError;
use crate::inventory::Inventory;

/// Actions offered by the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddItem,
    ItemInfo,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::AddItem, MenuAction::ItemInfo, MenuAction::Quit];

    pub fn key(self) -> &'static str {
        match self {
            MenuAction::AddItem => "1",
            MenuAction::ItemInfo => "2",
            MenuAction::Quit => "q",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::AddItem => "Add a new item to the inventory",
            MenuAction::ItemInfo => "Get item information",
            MenuAction::Quit => "Quit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// A menu session owning its inventory.
pub struct MenuSession<R, W> {
    input: R,
    output: W,
    inventory: Inventory,
}

impl<R: BufRead, W: Write> MenuSession<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            inventory: Inventory::new(),
        }
    }

    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    /// Run the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), AppError> {
        loop {
            debug!(items = self.inventory.len(), "Showing main menu.");

            let Some(action) = self.choose_action()? else {
                return Ok(());
            };
            let flow = match action {
                MenuAction::AddItem => self.add_new_item()?,
                MenuAction::ItemInfo => self.item_info()?,
                MenuAction::Quit => Flow::Stop,
            };
            if flow == Flow::Stop {
                return Ok(());
            }

            if self.prompt("Press Enter to continue...........")?.is_none() {
                return Ok(());
            }
        }
    }

    /// Show the menu until a valid key is entered. `None` on end of input.
    fn choose_action(&mut self) -> Result<Option<MenuAction>, AppError> {
        let keys: Vec<&str> = MenuAction::ALL.iter().map(|a| a.key()).collect();
        loop {
            self.say(&format!("Choose from the following options ({}):", keys.join(", ")))?;
            for action in MenuAction::ALL {
                self.say(&format!("{}. {}", action.key(), action.label()))?;
            }

            let Some(answer) = self.prompt("> ")? else {
                return Ok(None);
            };
            if let Some(action) = MenuAction::from_key(&answer) {
                return Ok(Some(action));
            }
        }
    }

    fn add_new_item(&mut self) -> Result<Flow, AppError> {
        let Some(code) = self.prompt("Enter item code: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(description) = self.prompt("Enter item description: ")? else {
            return Ok(Flow::Stop);
        };
        let Some(rental_price) = self.prompt("Enter item rental price: ")? else {
            return Ok(Flow::Stop);
        };

        let Some(kind) = self.ask_item_kind()? else {
            return Ok(Flow::Stop);
        };

        self.inventory.add(code, description, rental_price, kind);
        self.say("New inventory item added")?;
        Ok(Flow::Continue)
    }

    fn ask_item_kind(&mut self) -> Result<Option<ItemKind>, AppError> {
        let Some(is_furniture) = self.prompt("Is this item a piece of furniture? (Y/N): ")? else {
            return Ok(None);
        };
        if is_furniture.eq_ignore_ascii_case("y") {
            let Some(material) = self.prompt("Enter item material: ")? else {
                return Ok(None);
            };
            let Some(size) = self.prompt("Enter item size (S,M,L,XL): ")? else {
                return Ok(None);
            };
            return Ok(Some(ItemKind::Furniture { material, size }));
        }

        let Some(is_appliance) = self.prompt("Is this an electric appliance? (Y/N): ")? else {
            return Ok(None);
        };
        if is_appliance.eq_ignore_ascii_case("y") {
            let Some(brand) = self.prompt("Enter item brand: ")? else {
                return Ok(None);
            };
            let Some(voltage) = self.prompt("Enter item voltage: ")? else {
                return Ok(None);
            };
            return Ok(Some(ItemKind::ElectricAppliance { brand, voltage }));
        }

        Ok(Some(ItemKind::Plain))
    }

    fn item_info(&mut self) -> Result<Flow, AppError> {
        let Some(code) = self.prompt("Enter item code: ")? else {
            return Ok(Flow::Stop);
        };

        let lines: Option<Vec<String>> = self.inventory.get(&code).map(|item| {
            item.fields()
                .into_iter()
                .map(|(key, value)| format!("{key}:{value}"))
                .collect()
        });
        match lines {
            Some(lines) => {
                for line in lines {
                    self.say(&line)?;
                }
            }
            None => self.say("Item not found in inventory")?,
        }
        Ok(Flow::Continue)
    }

    fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}").map_err(|e| AppError::usage(format!("Failed to write output: {e}")))
    }

    /// Print a prompt and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{label}")
            .and_then(|_| self.output.flush())
            .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

        let mut input = String::new();
        let bytes = self
            .input
            .read_line(&mut input)
            .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}
