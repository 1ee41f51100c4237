// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Error, Result};
use tracing::{debug, info, warn};

use crate::{
    FormMode, InventoryBackend, Item, ItemField, ItemForm, ItemId, StatusMessage, ValidationError,
};

pub const MSG_ADDED: &str = "Item added successfully.";
pub const MSG_UPDATED: &str = "Item updated successfully.";
pub const MSG_ADD_FAILED: &str = "Error adding item.";
pub const MSG_UPDATE_FAILED: &str = "Error updating item.";
pub const MSG_DELETE_FAILED: &str = "Error deleting item.";
pub const MSG_LIST_FAILED: &str = "Error fetching inventory items.";
pub const MSG_NOT_FOUND: &str = "Item not found.";

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryCommand {
    ChangeField(ItemField, String),
    BeginEdit(Item),
    CancelEdit,
    SetLookupInput(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    FieldChanged(ItemField),
    ModeChanged(FormMode),
    FormReset,
    ListReplaced(usize),
    LookupChanged(Option<ItemId>),
    StatusUpdated(String),
    StatusCleared,
}

/// A backend round trip, built on the UI side and runnable anywhere the
/// backend lives.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    List,
    Get(ItemId),
    Save { item: Item, mode: FormMode },
    Delete(ItemId),
}

/// What a [`Request`] produced. A successful mutation carries the list
/// fetched right after it.
#[derive(Debug)]
pub enum Outcome {
    Listed(Result<Vec<Item>>),
    Fetched {
        id: ItemId,
        result: Result<Item>,
    },
    Saved {
        id: ItemId,
        mode: FormMode,
        result: Result<()>,
        refreshed: Option<Result<Vec<Item>>>,
    },
    Deleted {
        id: ItemId,
        result: Result<String>,
        refreshed: Option<Result<Vec<Item>>>,
    },
}

impl Request {
    /// Runs the request. The refresh after a mutation is issued only once
    /// the mutation has returned successfully.
    pub fn execute<B>(self, backend: &mut B) -> Outcome
    where
        B: InventoryBackend + ?Sized,
    {
        match self {
            Self::List => Outcome::Listed(backend.list_items()),
            Self::Get(id) => Outcome::Fetched {
                id,
                result: backend.get_item(id),
            },
            Self::Save { item, mode } => {
                let result = match mode {
                    FormMode::Creating => backend.add_item(&item),
                    FormMode::Editing => backend.update_item(&item),
                };
                let refreshed = result.is_ok().then(|| backend.list_items());
                Outcome::Saved {
                    id: item.id,
                    mode,
                    result,
                    refreshed,
                }
            }
            Self::Delete(id) => {
                let result = backend.delete_item(id);
                let refreshed = result.is_ok().then(|| backend.list_items());
                Outcome::Deleted {
                    id,
                    result,
                    refreshed,
                }
            }
        }
    }

    /// The outcome of a request that never reached the backend.
    pub fn fail(self, error: Error) -> Outcome {
        match self {
            Self::List => Outcome::Listed(Err(error)),
            Self::Get(id) => Outcome::Fetched {
                id,
                result: Err(error),
            },
            Self::Save { item, mode } => Outcome::Saved {
                id: item.id,
                mode,
                result: Err(error),
                refreshed: None,
            },
            Self::Delete(id) => Outcome::Deleted {
                id,
                result: Err(error),
                refreshed: None,
            },
        }
    }
}

/// View-model for the inventory screen.
///
/// Each piece of state has one writer: the form is written by field edits,
/// edit transitions and successful submits; the item list only by list
/// outcomes; the lookup result only by fetch-by-id outcomes. Backend
/// failures never escape: they become status text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryView {
    form: ItemForm,
    mode: FormMode,
    items: Vec<Item>,
    lookup_input: String,
    lookup: Option<Item>,
    status: Option<StatusMessage>,
}

impl InventoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ItemForm {
        &self.form
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn edit_mode(&self) -> bool {
        self.mode == FormMode::Editing
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn lookup_input(&self) -> &str {
        &self.lookup_input
    }

    pub fn lookup(&self) -> Option<&Item> {
        self.lookup.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn dispatch(&mut self, command: InventoryCommand) -> Vec<InventoryEvent> {
        match command {
            InventoryCommand::ChangeField(field, value) => self.on_field_change(field, value),
            InventoryCommand::BeginEdit(item) => self.begin_edit(&item),
            InventoryCommand::CancelEdit => self.cancel_edit(),
            InventoryCommand::SetLookupInput(value) => {
                self.lookup_input = value;
                Vec::new()
            }
            InventoryCommand::ClearStatus => vec![self.set_status("")],
        }
    }

    pub fn on_field_change(
        &mut self,
        field: ItemField,
        value: impl Into<String>,
    ) -> Vec<InventoryEvent> {
        self.form.set(field, value);
        vec![InventoryEvent::FieldChanged(field)]
    }

    pub fn begin_edit(&mut self, item: &Item) -> Vec<InventoryEvent> {
        self.form = ItemForm::from(item);
        self.mode = FormMode::Editing;
        debug!(id = item.id.get(), "begin edit");
        vec![
            InventoryEvent::ModeChanged(self.mode),
            self.set_status(&format!("Editing item with ID {}", item.id)),
        ]
    }

    pub fn cancel_edit(&mut self) -> Vec<InventoryEvent> {
        self.reset_form()
    }

    /// Validates the staged form, setting a field-specific prompt on failure.
    pub fn validate(&mut self) -> Result<Item, ValidationError> {
        let result = self.form.validate();
        if let Err(error) = &result {
            self.set_status(&error.to_string());
        }
        result
    }

    /// Initial load.
    pub fn mount<B>(&mut self, backend: &mut B) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        self.refresh(backend)
    }

    /// Replaces the list wholesale on success. On failure the previous list
    /// stays on screen.
    pub fn refresh<B>(&mut self, backend: &mut B) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        self.apply(Request::List.execute(backend))
    }

    /// Adds or updates depending on the form mode. Nothing is sent when the
    /// form does not validate; a failed request keeps the form for retry.
    pub fn submit<B>(&mut self, backend: &mut B) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        match self.prepare_submit() {
            Ok(request) => self.apply(request.execute(backend)),
            Err(events) => events,
        }
    }

    /// The server's confirmation text is shown as-is.
    pub fn delete<B>(&mut self, backend: &mut B, id: ItemId) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        self.apply(Request::Delete(id).execute(backend))
    }

    pub fn fetch_by_id<B>(&mut self, backend: &mut B, id: ItemId) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        self.apply(Request::Get(id).execute(backend))
    }

    /// Looks up the id typed into the lookup input. Input that is not an
    /// integer id cannot exist on the server and is reported as not found.
    pub fn fetch_lookup_input<B>(&mut self, backend: &mut B) -> Vec<InventoryEvent>
    where
        B: InventoryBackend + ?Sized,
    {
        match self.prepare_lookup() {
            Ok(request) => self.apply(request.execute(backend)),
            Err(events) => events,
        }
    }

    /// Validates the form and builds the save request for the current mode.
    /// On failure the prompt is already in the status and no request exists.
    pub fn prepare_submit(&mut self) -> Result<Request, Vec<InventoryEvent>> {
        match self.validate() {
            Ok(item) => Ok(Request::Save {
                item,
                mode: self.mode,
            }),
            Err(error) => {
                debug!(field = error.field().as_str(), "submit rejected by validation");
                Err(vec![InventoryEvent::StatusUpdated(error.to_string())])
            }
        }
    }

    pub fn prepare_lookup(&mut self) -> Result<Request, Vec<InventoryEvent>> {
        match ItemId::parse(&self.lookup_input) {
            Some(id) => Ok(Request::Get(id)),
            None => Err(self.lookup_not_found()),
        }
    }

    /// Folds a finished request back into the view. Outcomes may arrive from
    /// another thread; the view itself is only touched here.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<InventoryEvent> {
        match outcome {
            Outcome::Listed(result) => self.apply_list(result),
            Outcome::Fetched { id, result } => match result {
                Ok(item) => {
                    debug!(id = id.get(), "lookup hit");
                    self.lookup = Some(item);
                    vec![InventoryEvent::LookupChanged(Some(id)), self.set_status("")]
                }
                Err(error) => {
                    debug!(?error, id = id.get(), "lookup miss");
                    self.lookup_not_found()
                }
            },
            Outcome::Saved {
                id,
                mode,
                result,
                refreshed,
            } => {
                let (success, failure) = match mode {
                    FormMode::Creating => (MSG_ADDED, MSG_ADD_FAILED),
                    FormMode::Editing => (MSG_UPDATED, MSG_UPDATE_FAILED),
                };
                match result {
                    Ok(()) => {
                        info!(id = id.get(), ?mode, "item saved");
                        let mut events = vec![self.set_status(success)];
                        if let Some(list) = refreshed {
                            events.extend(self.apply_list(list));
                        }
                        events.extend(self.reset_form());
                        events
                    }
                    Err(error) => {
                        warn!(?error, id = id.get(), ?mode, "save item failed");
                        vec![self.set_status(failure)]
                    }
                }
            }
            Outcome::Deleted {
                id,
                result,
                refreshed,
            } => match result {
                Ok(message) => {
                    info!(id = id.get(), "item deleted");
                    let mut events = vec![self.set_status(&message)];
                    if let Some(list) = refreshed {
                        events.extend(self.apply_list(list));
                    }
                    events
                }
                Err(error) => {
                    warn!(?error, id = id.get(), "delete item failed");
                    vec![self.set_status(MSG_DELETE_FAILED)]
                }
            },
        }
    }

    pub fn set_lookup_input(&mut self, value: impl Into<String>) -> Vec<InventoryEvent> {
        self.dispatch(InventoryCommand::SetLookupInput(value.into()))
    }

    pub fn clear_status(&mut self) -> Vec<InventoryEvent> {
        self.dispatch(InventoryCommand::ClearStatus)
    }

    fn apply_list(&mut self, result: Result<Vec<Item>>) -> Vec<InventoryEvent> {
        match result {
            Ok(items) => {
                debug!(count = items.len(), "inventory list refreshed");
                self.items = items;
                vec![InventoryEvent::ListReplaced(self.items.len())]
            }
            Err(error) => {
                warn!(?error, "list inventory failed");
                vec![self.set_status(MSG_LIST_FAILED)]
            }
        }
    }

    fn lookup_not_found(&mut self) -> Vec<InventoryEvent> {
        self.lookup = None;
        vec![
            InventoryEvent::LookupChanged(None),
            self.set_status(MSG_NOT_FOUND),
        ]
    }

    fn reset_form(&mut self) -> Vec<InventoryEvent> {
        self.form = ItemForm::default();
        self.mode = FormMode::Creating;
        vec![
            InventoryEvent::FormReset,
            InventoryEvent::ModeChanged(self.mode),
        ]
    }

    fn set_status(&mut self, message: &str) -> InventoryEvent {
        if message.is_empty() {
            self.status = None;
            return InventoryEvent::StatusCleared;
        }
        self.status = Some(StatusMessage::new(message));
        InventoryEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::{
        InventoryCommand, InventoryEvent, InventoryView, MSG_ADD_FAILED, MSG_UPDATED, Outcome,
        Request,
    };
    use crate::{FormMode, Item, ItemField, ItemForm, ItemId};

    fn bolt() -> Item {
        Item {
            id: ItemId::new(1),
            name: "Bolt".to_owned(),
            category: "Hardware".to_owned(),
            stock: 100,
            price: 0.5,
        }
    }

    #[test]
    fn starts_empty_in_creating_mode() {
        let view = InventoryView::new();
        assert!(view.form().is_empty());
        assert_eq!(view.mode(), FormMode::Creating);
        assert!(!view.edit_mode());
        assert!(view.items().is_empty());
        assert!(view.lookup().is_none());
        assert!(view.status().is_none());
    }

    #[test]
    fn field_change_touches_only_the_form() {
        let mut view = InventoryView::new();
        let events = view.on_field_change(ItemField::Name, "Bolt");
        assert_eq!(events, vec![InventoryEvent::FieldChanged(ItemField::Name)]);
        assert_eq!(view.form().name, "Bolt");
        assert!(view.status().is_none());
        assert_eq!(view.mode(), FormMode::Creating);
    }

    #[test]
    fn begin_edit_copies_item_and_announces_id() {
        let mut view = InventoryView::new();
        let events = view.dispatch(InventoryCommand::BeginEdit(bolt()));

        assert_eq!(view.form(), &ItemForm::from(&bolt()));
        assert!(view.edit_mode());
        assert_eq!(
            events,
            vec![
                InventoryEvent::ModeChanged(FormMode::Editing),
                InventoryEvent::StatusUpdated("Editing item with ID 1".to_owned()),
            ]
        );
    }

    #[test]
    fn cancel_edit_always_resets_form_and_mode() {
        let mut view = InventoryView::new();
        view.begin_edit(&bolt());
        view.on_field_change(ItemField::Stock, "7");

        let events = view.cancel_edit();
        assert!(view.form().is_empty());
        assert!(!view.edit_mode());
        assert_eq!(
            events,
            vec![
                InventoryEvent::FormReset,
                InventoryEvent::ModeChanged(FormMode::Creating),
            ]
        );

        view.on_field_change(ItemField::Name, "draft");
        view.cancel_edit();
        assert!(view.form().is_empty());
        assert!(!view.edit_mode());
    }

    #[test]
    fn validate_sets_prompt_for_first_missing_field() {
        let mut view = InventoryView::new();
        view.on_field_change(ItemField::Id, "3");

        assert!(view.validate().is_err());
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Please fill out the name field.")
        );
    }

    #[test]
    fn clear_status_hides_banner() {
        let mut view = InventoryView::new();
        view.begin_edit(&bolt());
        let events = view.clear_status();
        assert_eq!(events, vec![InventoryEvent::StatusCleared]);
        assert!(view.status().is_none());
    }

    #[test]
    fn lookup_input_is_independent_of_form() {
        let mut view = InventoryView::new();
        view.on_field_change(ItemField::Id, "9");
        view.set_lookup_input("4");
        assert_eq!(view.lookup_input(), "4");
        assert_eq!(view.form().id, "9");
    }

    #[test]
    fn prepare_submit_carries_mode_and_typed_item() {
        let mut view = InventoryView::new();
        view.begin_edit(&bolt());
        assert_eq!(
            view.prepare_submit(),
            Ok(Request::Save {
                item: bolt(),
                mode: FormMode::Editing,
            })
        );

        view.on_field_change(ItemField::Price, "");
        assert_eq!(
            view.prepare_submit(),
            Err(vec![InventoryEvent::StatusUpdated(
                "Please fill out the price field.".to_owned()
            )])
        );
    }

    #[test]
    fn prepare_lookup_rejects_non_integer_input() {
        let mut view = InventoryView::new();
        view.set_lookup_input(" 4 ");
        assert_eq!(view.prepare_lookup(), Ok(Request::Get(ItemId::new(4))));

        view.set_lookup_input("four");
        assert!(view.prepare_lookup().is_err());
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Item not found.")
        );
    }

    #[test]
    fn applied_save_uses_mode_from_the_request() {
        let mut view = InventoryView::new();
        view.on_field_change(ItemField::Name, "draft");

        let events = view.apply(Outcome::Saved {
            id: ItemId::new(1),
            mode: FormMode::Editing,
            result: Ok(()),
            refreshed: Some(Ok(vec![bolt()])),
        });

        assert_eq!(
            events,
            vec![
                InventoryEvent::StatusUpdated(MSG_UPDATED.to_owned()),
                InventoryEvent::ListReplaced(1),
                InventoryEvent::FormReset,
                InventoryEvent::ModeChanged(FormMode::Creating),
            ]
        );
        assert_eq!(view.items(), &[bolt()]);
        assert!(view.form().is_empty());
    }

    #[test]
    fn unsent_request_reports_failure_and_keeps_form() {
        let mut view = InventoryView::new();
        view.on_field_change(ItemField::Name, "draft");
        let request = Request::Save {
            item: bolt(),
            mode: FormMode::Creating,
        };

        let events = view.apply(request.fail(anyhow!("worker stopped")));

        assert_eq!(
            events,
            vec![InventoryEvent::StatusUpdated(MSG_ADD_FAILED.to_owned())]
        );
        assert_eq!(view.form().name, "draft");
        assert!(view.items().is_empty());
    }
}
