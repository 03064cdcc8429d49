//! Strategy parity tests: the sequential and concurrent searchers must be
//! interchangeable behind the `Searcher` trait.

use std::sync::Arc;

use vacanza_core::{
    listing::ListingClient,
    searcher::{ConcurrentSearcher, SearchQuery, Searcher, SequentialSearcher},
    testing::{fixtures, MockListingClient},
};

async fn fixture_client() -> Arc<MockListingClient> {
    let client = MockListingClient::new();
    client
        .set_pages(vec![
            fixtures::page(0, 4, &["10", "11", "12"]),
            fixtures::page(1, 4, &["20", "21"]),
            fixtures::page(2, 4, &["30"]),
            fixtures::page(3, 4, &["40", "41", "42"]),
        ])
        .await;
    // Uneven latency per page, so completion order differs from page order.
    client.set_page_delays(vec![5, 60, 10, 30]).await;
    Arc::new(client)
}

#[tokio::test]
async fn sequential_and_concurrent_return_identical_sequences() {
    let query = SearchQuery::new("rust developer");

    let sequential_client = fixture_client().await;
    let sequential =
        SequentialSearcher::new(Arc::clone(&sequential_client) as Arc<dyn ListingClient>);
    let sequential_results = sequential.search(&query).await.unwrap();

    let concurrent_client = fixture_client().await;
    let concurrent =
        ConcurrentSearcher::new(Arc::clone(&concurrent_client) as Arc<dyn ListingClient>, 3);
    let concurrent_results = concurrent.search(&query).await.unwrap();

    assert_eq!(sequential_results, concurrent_results);
    let ids: Vec<&str> = sequential_results.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["10", "11", "12", "20", "21", "30", "40", "41", "42"]);
}

#[tokio::test]
async fn variants_agree_under_page_and_result_limits() {
    let mut query = SearchQuery::new("rust developer");
    query.max_pages = 2;
    query.max_results = Some(4);

    let sequential = SequentialSearcher::new(fixture_client().await as Arc<dyn ListingClient>);
    let concurrent = ConcurrentSearcher::new(fixture_client().await as Arc<dyn ListingClient>, 2);

    let sequential_results = sequential.search(&query).await.unwrap();
    let concurrent_results = concurrent.search(&query).await.unwrap();

    assert_eq!(sequential_results, concurrent_results);
    assert_eq!(sequential_results.len(), 4);
}

#[tokio::test]
async fn variants_agree_on_single_page_results() {
    let client = MockListingClient::new();
    client.set_pages(vec![fixtures::page(0, 1, &["1", "2"])]).await;
    let client = Arc::new(client);

    let query = SearchQuery::new("rust");
    let sequential =
        SequentialSearcher::new(Arc::clone(&client) as Arc<dyn ListingClient>);
    let concurrent =
        ConcurrentSearcher::new(Arc::clone(&client) as Arc<dyn ListingClient>, 8);

    assert_eq!(
        sequential.search(&query).await.unwrap(),
        concurrent.search(&query).await.unwrap()
    );
}
