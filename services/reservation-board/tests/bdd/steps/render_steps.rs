//! BDD step definitions for the rendered reservation list

use std::collections::HashSet;

use cucumber::{then, when};

use reservation_board::config::DisplayConfig;

use crate::world::BoardWorld;

fn display() -> DisplayConfig {
    DisplayConfig {
        utc: true,
        ..DisplayConfig::default()
    }
}

fn list_keys(html: &str) -> Vec<String> {
    html.split("<li data-key=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

#[when("the view is rendered")]
async fn render_view(world: &mut BoardWorld) {
    world.rendered = Some(world.view().render(&display()).await);
}

#[when(expr = "the view is rendered {int} times")]
async fn render_view_repeatedly(world: &mut BoardWorld, times: usize) {
    for _ in 0..times {
        world.rendered = Some(world.view().render(&display()).await);
    }
}

#[when("the view is rendered again")]
async fn render_view_again(world: &mut BoardWorld) {
    world.previous_keys = Some(list_keys(world.rendered()));
    world.rendered = Some(world.view().render(&display()).await);
}

#[then(expr = "the rendered view contains {string}")]
fn rendered_contains(world: &mut BoardWorld, expected: String) {
    let html = world.rendered();
    assert!(
        html.contains(&expected),
        "Expected rendered view to contain '{}'.\nRendered:\n{}",
        expected,
        html
    );
}

#[then(expr = "the rendered view does not contain {string}")]
fn rendered_does_not_contain(world: &mut BoardWorld, unexpected: String) {
    let html = world.rendered();
    assert!(
        !html.contains(&unexpected),
        "Expected rendered view not to contain '{}'.\nRendered:\n{}",
        unexpected,
        html
    );
}

#[then(expr = "the rendered list has {int} entr(y)(ies)")]
fn rendered_entry_count(world: &mut BoardWorld, count: usize) {
    assert_eq!(list_keys(world.rendered()).len(), count);
}

#[then(expr = "the rendered error line contains {string}")]
fn rendered_error_contains(world: &mut BoardWorld, expected: String) {
    let html = world.rendered();
    let line = html
        .lines()
        .find(|l| l.contains("class=\"error\""))
        .unwrap_or_else(|| panic!("no error line in:\n{}", html));
    assert!(line.contains("Error: "), "{}", line);
    assert!(line.contains(&expected), "{}", line);
}

#[then("the rendered view has no error line")]
fn rendered_has_no_error(world: &mut BoardWorld) {
    assert!(!world.rendered().contains("class=\"error\""));
}

#[then(expr = "the list item keys are {string}")]
fn list_item_keys_are(world: &mut BoardWorld, expected: String) {
    let keys = list_keys(world.rendered());
    let expected: Vec<String> = expected.split(',').map(|k| k.trim().to_string()).collect();
    assert_eq!(keys, expected);
}

#[then("every list item key is unique")]
fn keys_unique(world: &mut BoardWorld) {
    let keys = list_keys(world.rendered());
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len(), "duplicate keys in {:?}", keys);
}

#[then("the list item keys are unchanged")]
fn keys_unchanged(world: &mut BoardWorld) {
    let before = world
        .previous_keys
        .clone()
        .expect("no keys recorded before the last render");
    assert_eq!(list_keys(world.rendered()), before);
}
