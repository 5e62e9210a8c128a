//! Integration tests for the study materials list.

use std::sync::Arc;

use studydash::materials::{MaterialError, MaterialRegistry};
use studydash::store::InMemoryStore;
use studydash_core::material::{PLACEHOLDER_ICON, favicon_url};

fn make_registry() -> (MaterialRegistry, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    (MaterialRegistry::load(store.clone()), store)
}

fn snapshot(reg: &MaterialRegistry) -> Vec<(String, usize)> {
    reg.materials()
        .iter()
        .map(|m| (m.id.clone(), m.order))
        .collect()
}

#[test]
fn drag_index_three_to_index_zero() {
    let (mut reg, _) = make_registry();
    let dragged = reg.materials()[3].id.clone();
    let target = reg.materials()[0].id.clone();

    assert!(reg.reorder(&dragged, &target));

    let orders: Vec<usize> = reg.materials().iter().map(|m| m.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
    assert_eq!(reg.materials()[0].id, dragged);
    assert_eq!(reg.materials()[1].id, target);
}

#[test]
fn reorder_is_persisted() {
    let (mut reg, store) = make_registry();
    reg.reorder("docs", "chatgpt");
    let expected = snapshot(&reg);

    let reloaded = MaterialRegistry::load(store);
    assert_eq!(snapshot(&reloaded), expected);
    assert_eq!(reloaded.materials()[1].id, "docs");
}

#[test]
fn added_material_can_move_and_be_deleted() {
    let (mut reg, _) = make_registry();
    let added = reg
        .add_material("MIT OCW", "ocw.mit.edu", Some("Lecture notes"))
        .unwrap();
    assert_eq!(added.url, "https://ocw.mit.edu");
    assert_eq!(added.description.as_deref(), Some("Lecture notes"));

    assert!(reg.reorder(&added.id, "chatgpt"));
    assert_eq!(reg.materials()[1].id, added.id);

    assert!(reg.delete_material(&added.id));
    let orders: Vec<usize> = reg.materials().iter().map(|m| m.order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3]);
}

#[test]
fn urls_with_scheme_are_kept() {
    let (mut reg, _) = make_registry();
    let plain = reg.add_material("Plain", "http://example.org", None).unwrap();
    assert_eq!(plain.url, "http://example.org");
}

#[test]
fn blank_fields_are_rejected() {
    let (mut reg, _) = make_registry();
    assert_eq!(
        reg.add_material(" ", "x.org", None).unwrap_err(),
        MaterialError::TitleEmpty
    );
    assert_eq!(
        reg.add_material("X", "", None).unwrap_err(),
        MaterialError::UrlEmpty
    );
}

#[test]
fn seeds_are_permanent() {
    let (mut reg, _) = make_registry();
    for id in ["youtube", "chatgpt", "docs", "scholar"] {
        assert!(!reg.delete_material(id), "{id} should not be deletable");
    }
    assert_eq!(reg.len(), 4);
}

#[test]
fn favicon_for_material_host() {
    let (reg, _) = make_registry();
    let youtube = reg.get("youtube").unwrap();
    assert_eq!(
        favicon_url(&youtube.url),
        "https://www.google.com/s2/favicons?domain=youtube.com&sz=32"
    );
    assert_eq!(favicon_url("not a url"), PLACEHOLDER_ICON);
}
