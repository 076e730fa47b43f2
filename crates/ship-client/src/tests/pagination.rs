use crate::{DEFAULT_ROWS_PER_PAGE, Paginator};

use googletest::prelude::*;

#[test]
fn given_new_paginator_then_first_page_with_default_size() {
    let paginator = Paginator::new(23);

    assert_that!(paginator.current_page(), eq(1));
    assert_that!(paginator.rows_per_page(), eq(DEFAULT_ROWS_PER_PAGE));
    assert_that!(paginator.total_pages(), eq(3));
}

#[test]
fn given_empty_list_then_zero_pages_and_empty_range() {
    let mut paginator = Paginator::new(0);

    assert_that!(paginator.total_pages(), eq(0));
    assert_that!(paginator.range(), eq(&(0..0)));
    assert!(!paginator.next());
}

#[test]
fn given_last_page_then_range_is_partial() {
    let mut paginator = Paginator::new(23);

    assert!(paginator.go_to(3));

    assert_that!(paginator.range(), eq(&(20..23)));
}

#[test]
fn given_out_of_range_page_then_ignored() {
    let mut paginator = Paginator::new(23);
    paginator.go_to(2);

    assert!(!paginator.go_to(0));
    assert!(!paginator.go_to(4));

    assert_that!(paginator.current_page(), eq(2));
}

#[test]
fn given_page_size_change_then_back_to_first_page() {
    let mut paginator = Paginator::new(100);
    paginator.go_to(4);

    assert!(paginator.set_rows_per_page(20));

    assert_that!(paginator.current_page(), eq(1));
    assert_that!(paginator.total_pages(), eq(5));
}

#[test]
fn given_unsupported_page_size_then_unchanged() {
    let mut paginator = Paginator::new(100);
    paginator.go_to(4);

    assert!(!paginator.set_rows_per_page(7));

    assert_that!(paginator.rows_per_page(), eq(10));
    assert_that!(paginator.current_page(), eq(4));
}

#[test]
fn given_first_page_when_previous_then_ignored() {
    let mut paginator = Paginator::new(30);

    assert!(!paginator.previous());
    assert!(paginator.next());
    assert!(paginator.previous());
    assert_that!(paginator.current_page(), eq(1));
}

#[test]
fn given_items_then_page_of_slices_current_page() {
    let items: Vec<u32> = (1..=12).collect();
    let mut paginator = Paginator::new(items.len());
    paginator.set_rows_per_page(5);
    paginator.go_to(3);

    assert_that!(paginator.page_of(&items), elements_are![eq(&11), eq(&12)]);
}
