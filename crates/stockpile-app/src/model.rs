// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// One inventory record as exchanged with the inventory service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    Id,
    Name,
    Category,
    Stock,
    Price,
}

impl ItemField {
    /// Validation and display order.
    pub const ALL: [Self; 5] = [
        Self::Id,
        Self::Name,
        Self::Category,
        Self::Stock,
        Self::Price,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Stock => "stock",
            Self::Price => "price",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Category => "Category",
            Self::Stock => "Stock",
            Self::Price => "Price",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Id | Self::Stock | Self::Price)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "category" => Some(Self::Category),
            "stock" => Some(Self::Stock),
            "price" => Some(Self::Price),
            _ => None,
        }
    }

    pub fn display_value(self, item: &Item) -> String {
        match self {
            Self::Id => item.id.to_string(),
            Self::Name => item.name.clone(),
            Self::Category => item.category.clone(),
            Self::Stock => item.stock.to_string(),
            Self::Price => item.price.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing,
}

impl FormMode {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Creating => "Add Item",
            Self::Editing => "Edit Item",
        }
    }
}

/// Transient banner text shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage(String);

impl StatusMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Styling only: any message mentioning "error" renders as a failure.
    pub fn is_error(&self) -> bool {
        self.0.to_lowercase().contains("error")
    }
}
