// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{Item, ItemId};

/// Remote inventory service as seen by the view-model. Each call is a single
/// attempt; errors are reduced to status text by the caller.
pub trait InventoryBackend {
    fn list_items(&mut self) -> Result<Vec<Item>>;
    fn get_item(&mut self, id: ItemId) -> Result<Item>;
    fn add_item(&mut self, item: &Item) -> Result<()>;
    fn update_item(&mut self, item: &Item) -> Result<()>;
    /// Returns the server's confirmation text.
    fn delete_item(&mut self, id: ItemId) -> Result<String>;
}
