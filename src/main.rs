//! Todo Keep entry point
//!
//! Handles platform-specific initialization and wires the list to the page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlInputElement};

    use todo_keep::platform::{self, LocalStorageBackend};
    use todo_keep::{Item, ItemId, StoreConfig, StoreEvent, TodoStore};

    type SharedStore = Rc<RefCell<TodoStore<LocalStorageBackend>>>;

    // Page elements: #todo-form, #todo-input, #todo-list, #todo-count,
    // #todo-warning, #todo-clear-completed, optional #todo-app root.

    pub fn run() {
        platform::init_logging(log::Level::Info);
        log::info!("Todo Keep starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = read_config(&document);
        let backend = match LocalStorageBackend::open() {
            Ok(backend) => backend,
            Err(e) => {
                log::error!("Cannot start without storage: {}", e);
                show_warning(&document, Some("Saving is unavailable in this browser."));
                return;
            }
        };

        let store = Rc::new(RefCell::new(TodoStore::from_config(backend, &config)));

        // Re-render from events; the listener runs while the store is
        // borrowed, so it only touches the DOM.
        {
            let document = document.clone();
            store.borrow_mut().subscribe(move |event| match event {
                StoreEvent::Loaded(items) | StoreEvent::Changed(items) => {
                    render_items(&document, items)
                }
                StoreEvent::Persisted => show_warning(&document, None),
                StoreEvent::PersistFailed(_) => show_warning(
                    &document,
                    Some("Changes could not be saved and will be lost on reload."),
                ),
            });
        }

        store.borrow_mut().initialize();

        setup_form(&document, store.clone());
        setup_list_actions(&document, store.clone());
        setup_clear_completed(&document, store);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        log::info!("Todo Keep running with key {:?}", config.storage_key);
    }

    /// Storage key from `<div id="todo-app" data-storage-key="...">`
    fn read_config(document: &Document) -> StoreConfig {
        let key = document
            .get_element_by_id("todo-app")
            .and_then(|root| root.get_attribute("data-storage-key"))
            .filter(|key| !key.trim().is_empty());

        match key {
            Some(key) => StoreConfig::new().with_storage_key(key),
            None => StoreConfig::default(),
        }
    }

    fn render_items(document: &Document, items: &[Item]) {
        if let Some(list) = document.get_element_by_id("todo-list") {
            list.set_inner_html("");
            for item in items {
                match render_row(document, item) {
                    Ok(row) => {
                        let _ = list.append_child(&row);
                    }
                    Err(e) => log::warn!("Failed to render item {}: {:?}", item.id, e),
                }
            }
        }

        if let Some(count) = document.get_element_by_id("todo-count") {
            let remaining = items.iter().filter(|item| !item.completed).count();
            let label = if remaining == 1 { "item" } else { "items" };
            count.set_text_content(Some(&format!("{} {} left", remaining, label)));
        }
    }

    fn render_row(document: &Document, item: &Item) -> Result<Element, JsValue> {
        let row = document.create_element("li")?;
        row.set_attribute("data-id", &item.id.to_string())?;
        row.set_class_name(if item.completed {
            "todo-item completed"
        } else {
            "todo-item"
        });

        let toggle = document.create_element("input")?;
        toggle.set_attribute("type", "checkbox")?;
        toggle.set_attribute("data-action", "toggle")?;
        if item.completed {
            toggle.set_attribute("checked", "")?;
        }

        let text = document.create_element("span")?;
        text.set_class_name("todo-text");
        text.set_text_content(Some(&item.text));

        let delete = document.create_element("button")?;
        delete.set_attribute("type", "button")?;
        delete.set_attribute("data-action", "remove")?;
        delete.set_attribute("aria-label", "Delete")?;
        delete.set_text_content(Some("×"));

        row.append_child(&toggle)?;
        row.append_child(&text)?;
        row.append_child(&delete)?;
        Ok(row)
    }

    fn show_warning(document: &Document, message: Option<&str>) {
        if let Some(el) = document.get_element_by_id("todo-warning") {
            match message {
                Some(message) => {
                    el.set_text_content(Some(message));
                    let _ = el.set_attribute("class", "warning");
                }
                None => {
                    let _ = el.set_attribute("class", "warning hidden");
                }
            }
        }
    }

    fn setup_form(document: &Document, store: SharedStore) {
        let Some(form) = document.get_element_by_id("todo-form") else {
            log::warn!("No #todo-form on the page, adding is disabled");
            return;
        };

        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(input) = document
                .get_element_by_id("todo-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };

            if store.borrow_mut().add(&input.value()).is_some() {
                input.set_value("");
            }
        });
        let _ = form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One delegated click handler for every row's checkbox and delete button
    fn setup_list_actions(document: &Document, store: SharedStore) {
        let Some(list) = document.get_element_by_id("todo-list") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let Some(action) = target.get_attribute("data-action") else {
                return;
            };
            let Some(id) = target
                .closest("[data-id]")
                .ok()
                .flatten()
                .and_then(|row| row.get_attribute("data-id"))
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(ItemId)
            else {
                return;
            };

            let mut store = store.borrow_mut();
            match action.as_str() {
                "toggle" => {
                    store.toggle_completed(id);
                }
                "remove" => {
                    store.remove(id);
                }
                other => log::warn!("Unknown list action {:?}", other),
            }
        });
        let _ = list.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_clear_completed(document: &Document, store: SharedStore) {
        if let Some(btn) = document.get_element_by_id("todo-clear-completed") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let removed = store.borrow_mut().clear_completed();
                log::info!("Cleared {} completed items", removed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    todo_keep::platform::init_logging(log::Level::Info);
    log::info!("Todo Keep (native) starting...");
    log::info!("The widget runs in the browser - build the web version with `trunk serve`");

    println!("\nRunning store smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Exercise add/toggle/remove against in-memory storage
#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use todo_keep::{MemoryBackend, StoreConfig, TodoStore};

    let config = StoreConfig::default();
    let mut store = TodoStore::open(MemoryBackend::new(), &config);

    let id = store.add("Buy milk").expect("text is not blank");
    store.toggle_completed(id);
    assert!(store.list()[0].completed, "toggle should complete the item");
    store.remove(id);
    assert!(store.is_empty(), "remove should empty the list");

    println!("✓ Store smoke check passed!");
}
