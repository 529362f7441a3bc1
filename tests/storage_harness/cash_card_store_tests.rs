//! Macro-generated test suite for `CashCardStore` contract validation.
//!
//! The `cash_card_store_tests!` macro generates a test module that validates
//! any `CashCardStore` implementation: id assignment, keyed reads, owner
//! scoped paging and sorting, existence checks, deletes and concurrent saves.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use cashcard::storage::InMemoryCashCardStore;
//!
//! cash_card_store_tests!(
//!     InMemoryCashCardStore::new(),
//!     InMemoryCashCardStore::with_cards(seed_cards())
//! );
//! ```
//!
//! # Generated Tests
//!
//! ## Save & Get
//! - `test_save_assigns_id`: unsaved card gets a fresh id
//! - `test_assigned_ids_are_unique`: consecutive saves never reuse an id
//! - `test_save_with_id_overwrites`: saving an existing id replaces it
//! - `test_get_nonexistent`: unknown id returns None
//! - `test_assigned_id_skips_seeded_ids`: sequence starts above seeded ids
//!
//! ## Queries
//! - `test_find_by_owner_default_order`: amount ascending
//! - `test_find_by_owner_descending`
//! - `test_find_by_owner_paged`: page boundaries and the total
//! - `test_find_by_owner_past_last_page`: empty page, total intact
//! - `test_find_by_owner_unknown_owner`: empty result, not an error
//! - `test_find_by_id_and_owner`: foreign card is invisible
//! - `test_exists_by_id_and_owner`
//! - `test_equal_amounts_ordered_by_id`: ties follow the sort direction
//!
//! ## Delete
//! - `test_delete_existing`
//! - `test_delete_nonexistent`: removing a missing id is Ok
//!
//! ## Concurrency
//! - `test_concurrent_saves`: parallel saves get distinct ids

/// Generate a full `CashCardStore` conformance test suite.
///
/// `$empty` must evaluate to an empty store and `$seeded` to a store holding
/// [`seed_cards`](super::seed_cards). Both are re-evaluated for each test.
/// For the concurrency test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! cash_card_store_tests {
    ($empty:expr, $seeded:expr) => {
        mod cash_card_store_contract_tests {
            use super::*;
            use cashcard::core::query::{PageSpec, SortDirection, SortField};
            use cashcard::core::record::CashCard;
            use cashcard::core::store::CashCardStore;
            use std::collections::HashSet;

            // ==================================================================
            // Save & Get
            // ==================================================================

            #[tokio::test]
            async fn test_save_assigns_id() {
                let store = $empty;

                let saved = store.save(unsaved_card(12345, "sarah1")).await.unwrap();
                let id = saved.id.expect("saved card should carry an id");
                assert_eq!(saved.amount, amount(12345));
                assert_eq!(saved.owner, "sarah1");

                let fetched = store.get(id).await.unwrap();
                assert_eq!(fetched, Some(saved));
            }

            #[tokio::test]
            async fn test_assigned_ids_are_unique() {
                let store = $empty;

                let first = store.save(unsaved_card(100, "sarah1")).await.unwrap();
                let second = store.save(unsaved_card(100, "sarah1")).await.unwrap();
                assert_ne!(first.id, second.id);
            }

            #[tokio::test]
            async fn test_save_with_id_overwrites() {
                let store = $seeded;

                store
                    .save(CashCard::with_id(99, amount(1999), "sarah1"))
                    .await
                    .unwrap();

                let fetched = store.get(99).await.unwrap().unwrap();
                assert_eq!(fetched.amount, amount(1999));
                assert_eq!(fetched.owner, "sarah1");
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let store = $seeded;
                assert!(store.get(1000).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_assigned_id_skips_seeded_ids() {
                let store = $seeded;

                let saved = store.save(unsaved_card(25000, "sarah1")).await.unwrap();
                let id = saved.id.unwrap();
                assert!(
                    !ids(&seed_cards()).contains(&id),
                    "new id {} collides with a seeded card",
                    id
                );
                assert_eq!(store.get(99).await.unwrap().unwrap().amount, amount(12345));
            }

            // ==================================================================
            // Queries
            // ==================================================================

            #[tokio::test]
            async fn test_find_by_owner_default_order() {
                let store = $seeded;

                let page = store
                    .find_by_owner("sarah1", &unpaged(), &Default::default())
                    .await
                    .unwrap();
                assert_eq!(ids(&page.content), vec![100, 99, 101]);
                assert_eq!(page.total, 3);
            }

            #[tokio::test]
            async fn test_find_by_owner_descending() {
                let store = $seeded;

                let page = store
                    .find_by_owner(
                        "sarah1",
                        &unpaged(),
                        &sort(SortField::Amount, SortDirection::Descending),
                    )
                    .await
                    .unwrap();
                assert_eq!(ids(&page.content), vec![101, 99, 100]);
            }

            #[tokio::test]
            async fn test_find_by_owner_paged() {
                let store = $seeded;
                let order = sort(SortField::Id, SortDirection::Ascending);

                let first = store
                    .find_by_owner("sarah1", &PageSpec::of(0, 2), &order)
                    .await
                    .unwrap();
                assert_eq!(ids(&first.content), vec![99, 100]);
                assert_eq!(first.total, 3);

                let second = store
                    .find_by_owner("sarah1", &PageSpec::of(1, 2), &order)
                    .await
                    .unwrap();
                assert_eq!(ids(&second.content), vec![101]);
            }

            #[tokio::test]
            async fn test_find_by_owner_past_last_page() {
                let store = $seeded;

                let page = store
                    .find_by_owner("sarah1", &PageSpec::of(5, 2), &Default::default())
                    .await
                    .unwrap();
                assert!(page.is_empty());
                assert_eq!(page.total, 3);
            }

            #[tokio::test]
            async fn test_find_by_owner_unknown_owner() {
                let store = $seeded;

                let page = store
                    .find_by_owner("hank-owns-no-cards", &unpaged(), &Default::default())
                    .await
                    .unwrap();
                assert!(page.is_empty());
                assert_eq!(page.total, 0);
            }

            #[tokio::test]
            async fn test_find_by_id_and_owner() {
                let store = $seeded;

                let own = store.find_by_id_and_owner(99, "sarah1").await.unwrap();
                assert_eq!(own.map(|card| card.amount), Some(amount(12345)));

                let foreign = store.find_by_id_and_owner(102, "sarah1").await.unwrap();
                assert!(foreign.is_none(), "kumar2's card must not be visible to sarah1");
            }

            #[tokio::test]
            async fn test_exists_by_id_and_owner() {
                let store = $seeded;

                assert!(store.exists_by_id_and_owner(102, "kumar2").await.unwrap());
                assert!(!store.exists_by_id_and_owner(102, "sarah1").await.unwrap());
                assert!(!store.exists_by_id_and_owner(1000, "sarah1").await.unwrap());
            }

            #[tokio::test]
            async fn test_equal_amounts_ordered_by_id() {
                let store = $empty;

                let a = store.save(unsaved_card(500, "sarah1")).await.unwrap();
                let b = store.save(unsaved_card(500, "sarah1")).await.unwrap();
                let c = store.save(unsaved_card(500, "sarah1")).await.unwrap();

                let page = store
                    .find_by_owner(
                        "sarah1",
                        &unpaged(),
                        &sort(SortField::Amount, SortDirection::Descending),
                    )
                    .await
                    .unwrap();

                let mut expected = vec![a.id.unwrap(), b.id.unwrap(), c.id.unwrap()];
                expected.sort_unstable_by(|x, y| y.cmp(x));
                assert_eq!(ids(&page.content), expected);

                let ascending = store
                    .find_by_owner("sarah1", &unpaged(), &Default::default())
                    .await
                    .unwrap();
                let mut reversed = ids(&ascending.content);
                reversed.reverse();
                assert_eq!(ids(&page.content), reversed);
            }

            // ==================================================================
            // Delete
            // ==================================================================

            #[tokio::test]
            async fn test_delete_existing() {
                let store = $seeded;

                store.delete_by_id(99).await.unwrap();
                assert!(store.get(99).await.unwrap().is_none());
                assert!(store.get(100).await.unwrap().is_some());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let store = $seeded;
                assert!(store.delete_by_id(1000).await.is_ok());
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_saves() {
                let store = $empty;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.save(unsaved_card(100 + i, "sarah1")).await.unwrap()
                    }));
                }

                let mut seen = HashSet::new();
                for handle in handles {
                    let saved = handle.await.unwrap();
                    assert!(seen.insert(saved.id.unwrap()), "duplicate id assigned");
                }

                let page = store
                    .find_by_owner("sarah1", &PageSpec::unpaged(), &Default::default())
                    .await
                    .unwrap();
                assert_eq!(page.total, 10);
            }
        }
    };
}
