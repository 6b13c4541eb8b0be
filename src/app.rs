//! Accounting UI App
//!
//! Builds the context and runs every enhancer once the DOM is ready.

use std::rc::Rc;

use leptos::prelude::*;
use ui_timers::BrowserScheduler;

use crate::api;
use crate::components::ToastHost;
use crate::config::UiConfig;
use crate::context::{provide_ui_context, UiContext};
use crate::dom::{listen, select_all};
use crate::draft;
use crate::error::{UiError, UiResult};
use crate::feedback::{alerts, loading};
use crate::locale::BrowserLocale;
use crate::logger;
use crate::shortcuts;
use crate::sidebar::{self, SidebarElements};
use crate::storage::{KeyValueStore, LocalStorage, MemoryStore};
use crate::store::new_store;
use crate::table;
use crate::validation;

fn report(component: &str, result: UiResult<()>) {
    if let Err(e) = result {
        log::warn!("[APP] {} enhancement failed: {}", component, e);
    }
}

fn mount_toast_host(ctx: &UiContext) -> UiResult<()> {
    let body = ctx.document.body().ok_or(UiError::MissingElement("body"))?;
    let (store, fade_ms) = (ctx.store, ctx.config.toast_fade_ms);
    leptos::mount::mount_to(body, move || view! { <ToastHost store=store fade_ms=fade_ms /> }).forget();
    Ok(())
}

/// Run every enhancer against the current document
pub fn enhance_page(ctx: &UiContext) {
    let doc = &ctx.document;

    // Collect alerts before the toast host adds its own
    let page_alerts = select_all(doc, ".alert");
    report("toast host", mount_toast_host(ctx));

    let sidebar = SidebarElements::find(doc);
    if let Some(elements) = &sidebar {
        report("sidebar", sidebar::init(ctx, elements));
    }
    report("alerts", page_alerts.and_then(|found| alerts::init(ctx, found)));
    report(
        "validation",
        select_all(doc, "form").and_then(|forms| validation::init(ctx, &forms)),
    );

    let search_inputs = match select_all(doc, ".table") {
        Ok(tables) => table::init(ctx, &tables),
        Err(e) => {
            report("tables", Err(e));
            Vec::new()
        }
    };

    report(
        "loading",
        select_all(doc, "[data-loading]").and_then(|buttons| loading::init(ctx, &buttons)),
    );
    report(
        "autosave",
        select_all(doc, "form[data-autosave]").and_then(|forms| draft::init(ctx, &forms)),
    );
    report(
        "shortcuts",
        shortcuts::init(
            ctx,
            sidebar.map(|elements| elements.sidebar),
            search_inputs.into_iter().next(),
        ),
    );
    log::info!("[APP] Page enhanced");
}

/// Build the context, expose the script API and schedule page enhancement
pub fn start() -> UiResult<()> {
    logger::init(log::LevelFilter::Info);

    let window = web_sys::window().ok_or(UiError::MissingElement("window"))?;
    let document = window.document().ok_or(UiError::MissingElement("document"))?;
    let config = UiConfig::from_window(&window);
    logger::init(config.level_filter());

    let storage: Rc<dyn KeyValueStore> = match LocalStorage::open(&window) {
        Ok(local) => Rc::new(local),
        Err(e) => {
            log::warn!("[APP] {}; drafts and sidebar state will not persist", e);
            Rc::new(MemoryStore::new())
        }
    };

    let ctx = UiContext {
        window,
        document,
        storage,
        scheduler: Rc::new(BrowserScheduler),
        config: Rc::new(config),
        locale: Rc::new(BrowserLocale::new()),
        store: new_store(),
    };
    provide_ui_context(ctx.clone());
    report("script api", api::expose(&ctx.window));

    if ctx.document.ready_state() == "loading" {
        let ready_ctx = ctx.clone();
        listen(&ctx.document, "DOMContentLoaded", move |_: web_sys::Event| {
            enhance_page(&ready_ctx)
        })?;
    } else {
        enhance_page(&ctx);
    }
    Ok(())
}
