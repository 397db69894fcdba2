//! Component Showcase
//!
//! Drives a handful of components the way a host event loop would and prints
//! the views a renderer would receive.
//!
//! Run with: RUST_LOG=lumen_cn=debug cargo run -p lumen_cn --example showcase

use lumen_cn::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn main() -> lumen_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = LumenConfig::from_toml_str(
        r#"
        [pagination]
        max_visible_pages = 5
        "#,
    )?;
    let ctx = LumenContext::with_config(config);

    // Pagination, uncontrolled
    let pager = cn::pagination(&ctx)
        .total_pages(10)
        .default_page(5)
        .on_page_change(|page| tracing::info!("page -> {}", page))
        .build_component();
    println!("pages: {:?}", pager.entries());
    pager.next();
    println!("pages: {:?}", pager.entries());

    // Checkbox, controlled by a value the "parent" owns
    let accepted = Arc::new(Mutex::new(false));
    let parent = accepted.clone();
    let terms = cn::checkbox(&ctx)
        .label("Accept terms")
        .checked(false)
        .on_change(move |checked| {
            if let Ok(mut value) = parent.lock() {
                *value = checked;
            }
        })
        .build_component();
    terms.toggle();
    let owned = accepted.lock().map(|v| *v).unwrap_or(false);
    terms.set_checked(Some(owned));
    println!("checkbox: {:?}", terms.view());

    // Autocomplete with outside-click dismissal
    let fruit = cn::autocomplete(&ctx)
        .options(["Apple", "Apricot", "Banana"])
        .build_component();
    fruit.input("ap");
    println!("suggestions: {:?}", fruit.suggestions());
    ctx.document().dispatch_pointer_down(&PointerEvent::outside());
    println!("open after outside click: {}", fruit.is_open());

    // Tooltip and toast on the virtual clock
    let mut tip = cn::tooltip(&ctx, "Copy").build_component();
    tip.hover_enter();
    ctx.advance(Duration::from_millis(250));
    println!("tooltip visible: {}", tip.is_visible());

    let saved = cn::toast(&ctx, "Saved")
        .variant(ToastVariant::Success)
        .auto_close(Duration::from_secs(2))
        .on_close(|| tracing::info!("toast closed"))
        .build_component();
    ctx.advance(Duration::from_secs(2));
    println!("toast: {:?}", saved.view());

    // Menu closes on Escape
    let actions = cn::menu(&ctx)
        .trigger_label("Actions")
        .item(MenuItem::new("Rename"))
        .item(MenuItem::new("Delete").disabled())
        .build_component();
    actions.toggle();
    ctx.document().dispatch_key(&KeyCode::Escape.into());
    println!("menu open after escape: {}", actions.is_open());

    tracing::info!("reactive graph: {:?}", ctx.stats());
    Ok(())
}
