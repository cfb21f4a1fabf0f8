use anyhow::anyhow;

use crate::list::{ListPresenter, ListRecord, PageView};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    name: String,
    group: String,
}

impl Row {
    fn new(name: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
        }
    }
}

impl ListRecord for Row {
    fn sort_value(&self, key: &str) -> Option<&str> {
        match key {
            "name" => Some(&self.name),
            "group" => Some(&self.group),
            _ => None,
        }
    }
}

fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|index| Row::new(&format!("row-{index:02}"), "shared"))
        .collect()
}

fn page_at(presenter: &mut ListPresenter<Row>, source: &[Row], page: usize) -> PageView<Row> {
    presenter.set_page(page);
    let (view, filter_error) = presenter.visible_page(source);
    assert!(filter_error.is_none());
    view
}

#[test]
fn pages_partition_the_filtered_sorted_list() {
    let source = rows(25);
    let mut presenter = ListPresenter::new("name");

    let (first, _) = presenter.visible_page(&source);
    assert_eq!(first.total_count, 25);
    assert_eq!(first.total_pages, 3);

    let mut seen = Vec::new();
    for page in 1..=first.total_pages {
        let view = page_at(&mut presenter, &source, page);
        seen.extend(view.items);
    }

    assert_eq!(seen.len(), 25);
    let mut expected = source.clone();
    expected.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(seen, expected);
}

#[test]
fn sort_is_stable_for_equal_keys() {
    let source = vec![
        Row::new("zeta", "same"),
        Row::new("alpha", "same"),
        Row::new("mid", "same"),
    ];
    let mut presenter = ListPresenter::new("group");
    presenter.set_page_size(10);

    let (view, _) = presenter.visible_page(&source);
    // All group keys tie, so the original relative order survives the sort.
    assert_eq!(view.items, source);

    presenter.set_sort("group", false);
    let (descending, _) = presenter.visible_page(&source);
    assert_eq!(descending.items, source);
}

#[test]
fn empty_query_passes_everything() {
    let source = rows(7);
    let mut presenter = ListPresenter::new("name");
    presenter.set_query("");

    let (view, filter_error) = presenter.visible_page(&source);
    assert!(filter_error.is_none());
    assert_eq!(view.total_count, source.len());
}

#[test]
fn default_filter_matches_sort_field_substring() {
    let source = vec![
        Row::new("http://one.example/foo", "a"),
        Row::new("http://two.example/bar", "a"),
        Row::new("http://three.example/FOO", "a"),
    ];
    let mut presenter = ListPresenter::new("name");
    presenter.set_query("foo");

    let (view, _) = presenter.visible_page(&source);
    assert_eq!(view.total_count, 2);
}

#[test]
fn out_of_range_pages_clamp() {
    let source = rows(25);
    let mut presenter = ListPresenter::new("name");

    presenter.set_page(99);
    let (view, _) = presenter.visible_page(&source);
    assert_eq!(view.page_number, 3);
    assert_eq!(view.items.len(), 5);

    presenter.set_page(0);
    let (view, _) = presenter.visible_page(&source);
    assert_eq!(view.page_number, 1);
    assert_eq!(view.items.len(), 10);
}

#[test]
fn page_size_change_keeps_the_offset() {
    let source = rows(25);
    let mut presenter = ListPresenter::new("name");
    presenter.set_page(2);

    presenter.set_page_size(5);
    let (view, _) = presenter.visible_page(&source);
    // Offset 10 re-bucketed under the new size lands on page 3 of 5.
    assert_eq!(view.page_number, 3);
    assert_eq!(view.total_pages, 5);
    assert_eq!(view.items.first().map(|row| row.name.as_str()), Some("row-10"));

    presenter.set_page_size(0);
    assert_eq!(presenter.page_size(), 5);
}

#[test]
fn query_change_resets_to_the_first_page() {
    let source = vec![
        Row::new("foo-1", "a"),
        Row::new("foo-2", "a"),
        Row::new("foo-3", "a"),
        Row::new("bar-1", "a"),
    ];
    let mut presenter = ListPresenter::new("name");
    presenter.set_page(3);

    presenter.set_query("foo");
    let (view, _) = presenter.visible_page(&source);
    assert_eq!(view.page_number, 1);
    assert_eq!(view.total_count, 3);
    assert_eq!(view.total_pages, 1);
}

#[test]
fn failing_predicate_falls_back_to_the_unfiltered_list() {
    let source = rows(4);
    let mut presenter =
        ListPresenter::new("name").with_predicate(Box::new(|_: &Row, _: &str| Err(anyhow!("boom"))));
    presenter.set_query("anything");

    let (view, filter_error) = presenter.visible_page(&source);
    assert_eq!(view.total_count, 4);
    let err = filter_error.expect("filter error");
    assert_eq!(err.query, "anything");
    assert!(err.reason.contains("boom"));
}

#[test]
fn empty_source_has_zero_pages() {
    let presenter: ListPresenter<Row> = ListPresenter::new("name");
    let (view, _) = presenter.visible_page(&[]);
    assert_eq!(view.total_count, 0);
    assert_eq!(view.total_pages, 0);
    assert!(view.items.is_empty());
}

#[test]
fn twenty_five_records_then_narrow_search() {
    let mut source = rows(22);
    source.push(Row::new("foo-a", "x"));
    source.push(Row::new("foo-b", "x"));
    source.push(Row::new("foo-c", "x"));

    let mut presenter = ListPresenter::new("name");
    let (view, _) = presenter.visible_page(&source);
    assert_eq!(view.items.len(), 10);
    assert_eq!(view.total_pages, 3);

    presenter.set_page(3);
    presenter.set_query("foo");
    let (narrowed, _) = presenter.visible_page(&source);
    assert_eq!(narrowed.total_count, 3);
    assert_eq!(narrowed.total_pages, 1);
    assert_eq!(narrowed.page_number, 1);
}
