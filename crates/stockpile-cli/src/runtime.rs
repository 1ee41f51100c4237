// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use stockpile_api::Client;
use stockpile_app::{InventoryBackend, Item, ItemId};

/// Adapts the HTTP client to the view-model's backend seam.
pub struct ApiRuntime {
    client: Client,
}

impl ApiRuntime {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl InventoryBackend for ApiRuntime {
    fn list_items(&mut self) -> Result<Vec<Item>> {
        self.client.list_all()
    }

    fn get_item(&mut self, id: ItemId) -> Result<Item> {
        self.client.get(id)
    }

    fn add_item(&mut self, item: &Item) -> Result<()> {
        self.client.add(item)
    }

    fn update_item(&mut self, item: &Item) -> Result<()> {
        self.client.update(item)
    }

    fn delete_item(&mut self, id: ItemId) -> Result<String> {
        self.client.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiRuntime;
    use anyhow::{Result, anyhow};
    use std::thread;
    use std::time::Duration;
    use stockpile_api::Client;
    use stockpile_app::{InventoryView, ItemId, MSG_LIST_FAILED};
    use tiny_http::{Header, Response, Server};

    #[test]
    fn delete_through_http_echoes_message_then_refreshes() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}", server.server_addr());

        let handle = thread::spawn(move || {
            let mut urls = Vec::new();
            for body in ["Item deleted", "[]"] {
                let request = server.recv().expect("request expected");
                urls.push(request.url().to_owned());
                let response = Response::from_string(body).with_header(
                    Header::from_bytes("Content-Type", "application/json")
                        .expect("valid content type header"),
                );
                request.respond(response).expect("response should succeed");
            }
            urls
        });

        let client = Client::new(&addr, Some(Duration::from_secs(1)))?;
        let mut runtime = ApiRuntime::new(client);
        let mut view = InventoryView::new();
        view.delete(&mut runtime, ItemId::new(1));

        let urls = handle.join().expect("server thread should join");
        assert_eq!(urls, vec!["/inventoryapi/delete/1", "/inventoryapi/all"]);
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some("Item deleted")
        );
        assert!(view.items().is_empty());
        Ok(())
    }

    #[test]
    fn unreachable_server_becomes_status_text() -> Result<()> {
        let client = Client::new("http://127.0.0.1:1", Some(Duration::from_millis(50)))?;
        let mut runtime = ApiRuntime::new(client);
        let mut view = InventoryView::new();

        view.mount(&mut runtime);
        assert_eq!(
            view.status().map(|status| status.as_str()),
            Some(MSG_LIST_FAILED)
        );
        Ok(())
    }
}
