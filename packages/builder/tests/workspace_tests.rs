//! Integration tests for pages, themes and view flags

use linq_builder::{
    BlockKind, BuilderStore, ContentPatch, Mutation, PageId, PageSettingsPatch, Panel,
    StoreOptions, ThemeSection, ViewMode, WorkspaceSnapshot,
};
use serde_json::json;

#[test]
fn test_page_isolation() {
    let mut store = BuilderStore::new();
    let page_a = store.active_page_id().clone();

    for kind in [BlockKind::Header, BlockKind::Link, BlockKind::Socials] {
        store.add_block(kind).unwrap();
    }
    let blocks_a = store.blocks().clone();

    let page_b = store.create_page("Shop", "shop");
    assert_eq!(store.active_page_id(), &page_b);
    assert!(store.blocks().is_empty());
    assert_eq!(store.history().undo_levels(), 0);
    assert_eq!(store.history().redo_levels(), 0);
    assert_eq!(store.page_settings().slug, "shop");
    assert_eq!(store.active_page().slug, "shop");

    store.add_block(BlockKind::Commerce).unwrap();

    assert!(store.set_active_page(&page_a));
    assert_eq!(*store.blocks(), blocks_a);
    assert_eq!(store.history().undo_levels(), 3);

    assert!(store.set_active_page(&page_b));
    assert_eq!(store.blocks().len(), 1);
}

#[test]
fn test_undo_is_per_page() {
    let mut store = BuilderStore::new();
    let page_a = store.active_page_id().clone();
    store.add_block(BlockKind::Link).unwrap();

    store.create_page("Second", "second");
    // Fresh page: undo has nothing to do and must not touch page A
    assert!(!store.undo());

    store.set_active_page(&page_a);
    assert!(store.undo());
    assert!(store.blocks().is_empty());
}

#[test]
fn test_page_switch_forces_editor_view() {
    let mut store = BuilderStore::new();
    let first = store.active_page_id().clone();
    let second = store.create_page("Second", "second");

    store.set_view(ViewMode::Analytics);
    store.set_active_page(&first);
    assert_eq!(store.view().view, ViewMode::Editor);

    store.set_view(ViewMode::Analytics);
    store.create_page("Third", "third");
    assert_eq!(store.view().view, ViewMode::Editor);

    assert_eq!(store.pages().len(), 3);
    assert!(store.pages().iter().any(|p| p.id == second));
}

#[test]
fn test_switch_to_unknown_page_changes_nothing() {
    let mut store = BuilderStore::new();
    store.add_block(BlockKind::Text).unwrap();
    store.set_view(ViewMode::Analytics);
    let before = store.snapshot();

    assert!(!store.set_active_page(&PageId::new("missing")));
    assert_eq!(store.snapshot(), before);
}

#[test]
fn test_theme_and_settings_follow_the_page() {
    let mut store = BuilderStore::new();
    let first = store.active_page_id().clone();

    store.set_theme_by_id("retro-pop").unwrap();
    store
        .update_theme_property(ThemeSection::Colors, "blockLabelColor", json!("#64748b"))
        .unwrap();
    store.update_page_settings(PageSettingsPatch {
        seo_title: Some("Home".to_string()),
        ..Default::default()
    });

    store.create_page("Second", "second");
    assert_eq!(store.current_theme().id, "clean");
    assert_eq!(store.page_settings().seo_title, "My Linq Page");

    store.set_active_page(&first);
    assert_eq!(store.current_theme().id, "retro-pop");
    assert_eq!(
        store.current_theme().colors.extra.get("blockLabelColor"),
        Some(&json!("#64748b"))
    );
    assert_eq!(store.page_settings().seo_title, "Home");
}

#[test]
fn test_panel_and_preview_flags() {
    let mut store = BuilderStore::new();

    store.toggle_panel(Panel::Blocks);
    assert_eq!(store.view().active_panel, Some(Panel::Blocks));
    store.toggle_panel(Panel::Blocks);
    assert_eq!(store.view().active_panel, None);

    store.set_active_panel(Some(Panel::Settings));
    store.set_view(ViewMode::Analytics);
    assert_eq!(store.view().active_panel, Some(Panel::Settings));

    store.toggle_preview();
    assert!(store.view().is_preview);

    store.open_create_page();
    store.open_support();
    assert!(store.view().is_create_page_open);
    assert!(store.view().is_support_open);
    store.close_create_page();
    store.close_support();
    assert!(!store.view().is_create_page_open);
    assert!(!store.view().is_support_open);
}

#[test]
fn test_custom_options() {
    let options = StoreOptions {
        history_limit: 2,
        default_page_name: "Landing".to_string(),
        default_theme: "retro-pop".to_string(),
        ..Default::default()
    };
    let mut store = BuilderStore::with_options(options).unwrap();
    assert_eq!(store.active_page().name, "Landing");
    assert_eq!(store.current_theme().id, "retro-pop");

    for _ in 0..5 {
        store.add_block(BlockKind::Link).unwrap();
    }
    assert_eq!(store.history().undo_levels(), 2);

    // New pages inherit both the limit and the theme
    store.create_page("Other", "other");
    assert_eq!(store.history().max_levels(), 2);
    assert_eq!(store.current_theme().id, "retro-pop");
}

#[test]
fn test_replay_script() {
    let script = r#"[
        { "op": "addBlock", "type": "link" },
        { "op": "addBlock", "type": "timer" },
        { "op": "togglePanel", "panel": "themes" },
        { "op": "setThemeById", "id": "retro-pop" },
        { "op": "updatePageSettings", "settings": { "slug": "me", "cookieBanner": false } },
        { "op": "undo" },
        { "op": "createPage", "name": "Shop", "slug": "shop" },
        { "op": "addBlock", "type": "commerce" }
    ]"#;

    let mutations: Vec<Mutation> = serde_json::from_str(script).unwrap();
    let mut store = BuilderStore::new();
    for mutation in mutations {
        store.apply(mutation).unwrap();
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.pages.len(), 2);
    assert_eq!(snapshot.pages[0].blocks.len(), 1);
    assert_eq!(snapshot.pages[0].current_theme.id, "retro-pop");
    assert_eq!(snapshot.pages[0].page_settings.slug, "me");
    assert_eq!(snapshot.pages[1].blocks.len(), 1);
    assert_eq!(snapshot.view.active_panel, Some(Panel::Themes));
    assert_eq!(snapshot.stats.top_links.len(), 3);

    // The snapshot survives a JSON round trip
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: WorkspaceSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}

#[test]
fn test_update_block_through_apply() {
    let mut store = BuilderStore::new();
    let id = store
        .apply(Mutation::AddBlock { kind: BlockKind::Map })
        .unwrap()
        .block_id
        .unwrap();

    let outcome = store
        .apply(Mutation::UpdateBlock {
            id: id.clone(),
            content: ContentPatch::new().set("address", "Berlin"),
        })
        .unwrap();
    assert!(outcome.changed);

    let err = store.apply(Mutation::UpdateBlock {
        id,
        content: ContentPatch::new().set("type", "video"),
    });
    assert!(err.is_err());
}
