// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

use crate::{Item, ItemField, ItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out the {} field.", .0.as_str())]
    Missing(ItemField),
    #[error("Please enter a valid number for the {} field.", .0.as_str())]
    NotANumber(ItemField),
}

impl ValidationError {
    pub const fn field(self) -> ItemField {
        match self {
            Self::Missing(field) | Self::NotANumber(field) => field,
        }
    }
}

/// Staging copy of an item while it is being created or edited. Inputs stay
/// text until submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub id: String,
    pub name: String,
    pub category: String,
    pub stock: String,
    pub price: String,
}

impl ItemForm {
    pub fn get(&self, field: ItemField) -> &str {
        match field {
            ItemField::Id => &self.id,
            ItemField::Name => &self.name,
            ItemField::Category => &self.category,
            ItemField::Stock => &self.stock,
            ItemField::Price => &self.price,
        }
    }

    pub fn field_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::Id => &mut self.id,
            ItemField::Name => &mut self.name,
            ItemField::Category => &mut self.category,
            ItemField::Stock => &mut self.stock,
            ItemField::Price => &mut self.price,
        }
    }

    pub fn set(&mut self, field: ItemField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// First empty or whitespace-only field in [`ItemField::ALL`] order.
    pub fn first_missing(&self) -> Option<ItemField> {
        ItemField::ALL
            .into_iter()
            .find(|field| self.get(*field).trim().is_empty())
    }

    /// Checks presence of every field before any numeric parsing, so the
    /// reported field is always the first empty one.
    pub fn validate(&self) -> Result<Item, ValidationError> {
        if let Some(field) = self.first_missing() {
            return Err(ValidationError::Missing(field));
        }

        let id = ItemId::parse(&self.id).ok_or(ValidationError::NotANumber(ItemField::Id))?;
        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::NotANumber(ItemField::Stock))?;
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
            .ok_or(ValidationError::NotANumber(ItemField::Price))?;

        Ok(Item {
            id,
            name: self.name.clone(),
            category: self.category.clone(),
            stock,
            price,
        })
    }
}

impl From<&Item> for ItemForm {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            category: item.category.clone(),
            stock: item.stock.to_string(),
            price: item.price.to_string(),
        }
    }
}
