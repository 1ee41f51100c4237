// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Result, anyhow, bail};
use stockpile_app::{InventoryBackend, Item, ItemId};

const CATALOG: [(&str, &str, i64, f64); 8] = [
    ("Bolt", "Hardware", 100, 0.5),
    ("Wrench", "Tools", 12, 14.99),
    ("Hex Nut", "Hardware", 450, 0.1),
    ("Drill", "Tools", 4, 89.0),
    ("Duct Tape", "Supplies", 36, 3.25),
    ("Pliers", "Tools", 9, 11.5),
    ("Washer", "Hardware", 800, 0.05),
    ("Sandpaper", "Supplies", 60, 0.75),
];

pub fn item(id: i64, name: &str, category: &str, stock: i64, price: f64) -> Item {
    Item {
        id: ItemId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        stock,
        price,
    }
}

/// `{id:1, name:"Bolt", category:"Hardware", stock:100, price:0.5}`.
pub fn bolt() -> Item {
    sample_items(1).remove(0)
}

/// First `count` catalog entries with ids starting at 1.
pub fn sample_items(count: usize) -> Vec<Item> {
    CATALOG
        .iter()
        .cycle()
        .take(count)
        .zip(1_i64..)
        .map(|((name, category, stock, price), id)| item(id, name, category, *stock, *price))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(ItemId),
    Add(Item),
    Update(Item),
    Delete(ItemId),
}

/// Which backend operations should fail on their next invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Failures {
    pub list: bool,
    pub get: bool,
    pub add: bool,
    pub update: bool,
    pub delete: bool,
}

/// In-memory inventory service that records every call.
#[derive(Debug, Clone, Default)]
pub struct FakeInventory {
    items: Vec<Item>,
    calls: Vec<Call>,
    pub failures: Failures,
    pub delete_message: Option<String>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn fail_all(&mut self) {
        self.failures = Failures {
            list: true,
            get: true,
            add: true,
            update: true,
            delete: true,
        };
    }
}

impl InventoryBackend for FakeInventory {
    fn list_items(&mut self) -> Result<Vec<Item>> {
        self.calls.push(Call::List);
        if self.failures.list {
            bail!("list failed: connection refused");
        }
        Ok(self.items.clone())
    }

    fn get_item(&mut self, id: ItemId) -> Result<Item> {
        self.calls.push(Call::Get(id));
        if self.failures.get {
            bail!("get failed: connection refused");
        }
        self.items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("server returned 404"))
    }

    fn add_item(&mut self, item: &Item) -> Result<()> {
        self.calls.push(Call::Add(item.clone()));
        if self.failures.add {
            bail!("add failed: server returned 500");
        }
        self.items.push(item.clone());
        Ok(())
    }

    fn update_item(&mut self, item: &Item) -> Result<()> {
        self.calls.push(Call::Update(item.clone()));
        if self.failures.update {
            bail!("update failed: server returned 500");
        }
        let Some(existing) = self.items.iter_mut().find(|row| row.id == item.id) else {
            bail!("server returned 404");
        };
        *existing = item.clone();
        Ok(())
    }

    fn delete_item(&mut self, id: ItemId) -> Result<String> {
        self.calls.push(Call::Delete(id));
        if self.failures.delete {
            bail!("delete failed: server returned 500");
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            bail!("server returned 404");
        }
        Ok(self
            .delete_message
            .clone()
            .unwrap_or_else(|| format!("Item with ID {id} deleted")))
    }
}

/// A [`FakeInventory`] that can be handed to a worker thread while the test
/// keeps a handle for inspecting calls.
#[derive(Debug, Clone, Default)]
pub struct SharedInventory(Arc<Mutex<FakeInventory>>);

impl SharedInventory {
    pub fn new(fake: FakeInventory) -> Self {
        Self(Arc::new(Mutex::new(fake)))
    }

    pub fn lock(&self) -> MutexGuard<'_, FakeInventory> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InventoryBackend for SharedInventory {
    fn list_items(&mut self) -> Result<Vec<Item>> {
        self.lock().list_items()
    }

    fn get_item(&mut self, id: ItemId) -> Result<Item> {
        self.lock().get_item(id)
    }

    fn add_item(&mut self, item: &Item) -> Result<()> {
        self.lock().add_item(item)
    }

    fn update_item(&mut self, item: &Item) -> Result<()> {
        self.lock().update_item(item)
    }

    fn delete_item(&mut self, id: ItemId) -> Result<String> {
        self.lock().delete_item(id)
    }
}
