//! Ordering behaviour through the public API.

use std::cmp::Ordering;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use lazyq::prelude::*;

type Pair = (i32, &'static str);

fn pairs(items: Vec<Pair>) -> VecSequence<Pair> {
    from_vec::<_, Error>(items)
}

async fn drain<S>(seq: &S) -> Result<Vec<S::Item>>
where
    S: AsyncSequence<Error = Error>,
{
    to_vec(seq, &CancelSignal::new()).await
}

#[tokio::test]
async fn tie_break_key_reorders_equal_primary_keys() {
    let seq = pairs(vec![(1, "b"), (2, "a"), (1, "a")])
        .order_by(|p: &Pair| p.0)
        .then_by(|p: &Pair| p.1);

    let out = drain(&seq).await.unwrap();
    assert_eq!(out, vec![(1, "a"), (1, "b"), (2, "a")]);
}

#[tokio::test]
async fn single_key_both_directions() {
    let asc = from_vec::<i32, Error>(vec![3, 1, 2]).order_by(|v: &i32| *v);
    let desc = from_vec::<i32, Error>(vec![3, 1, 2]).order_by_descending(|v: &i32| *v);

    assert_eq!(drain(&asc).await.unwrap(), vec![1, 2, 3]);
    assert_eq!(drain(&desc).await.unwrap(), vec![3, 2, 1]);
}

#[tokio::test]
async fn equal_keys_keep_arrival_order() {
    let input = vec![(2, "w"), (1, "x"), (2, "y"), (1, "z"), (2, "a")];
    let seq = pairs(input).order_by(|p: &Pair| p.0);
    assert_eq!(
        drain(&seq).await.unwrap(),
        vec![(1, "x"), (1, "z"), (2, "w"), (2, "y"), (2, "a")]
    );

    // Descending reverses keys, not ties.
    let seq =
        pairs(vec![(1, "x"), (2, "w"), (1, "z"), (2, "y")]).order_by_descending(|p: &Pair| p.0);
    assert_eq!(
        drain(&seq).await.unwrap(),
        vec![(2, "w"), (2, "y"), (1, "x"), (1, "z")]
    );
}

#[tokio::test]
async fn first_composed_key_has_first_priority() {
    let input = vec![(2, "a"), (1, "c"), (1, "a"), (2, "b"), (3, "a")];
    let seq = pairs(input)
        .order_by_descending(|p: &Pair| p.1)
        .then_by(|p: &Pair| p.0);

    assert_eq!(
        drain(&seq).await.unwrap(),
        vec![(1, "c"), (2, "b"), (1, "a"), (2, "a"), (3, "a")]
    );
}

#[tokio::test]
async fn three_key_chain() {
    type Row = (u8, u8, u8, usize);
    let rows: Vec<Row> = vec![
        (1, 2, 3, 0),
        (1, 1, 3, 1),
        (0, 9, 9, 2),
        (1, 1, 1, 3),
        (1, 2, 3, 4),
    ];
    let seq = from_vec::<_, Error>(rows)
        .order_by(|r: &Row| r.0)
        .then_by_descending(|r: &Row| r.1)
        .then_by(|r: &Row| r.2);
    assert_eq!(seq.depth(), 3);

    let ids: Vec<usize> = drain(&seq).await.unwrap().into_iter().map(|r| r.3).collect();
    assert_eq!(ids, vec![2, 0, 4, 3, 1]);
}

#[tokio::test]
async fn output_is_a_permutation_of_input() {
    let input: Vec<i64> = (0..500).map(|i| (i * 7919) % 113 - 50).collect();
    let seq = from_vec::<_, Error>(input.clone()).order_by(|v: &i64| *v);
    let out = drain(&seq).await.unwrap();

    assert_eq!(out.len(), input.len());
    assert!(out.windows(2).all(|w| w[0] <= w[1]));
    let mut expected = input;
    expected.sort();
    assert_eq!(out, expected);
}

#[tokio::test]
async fn sorting_sorted_output_is_identity() {
    let input = vec![(3, "c"), (1, "b"), (3, "a"), (1, "b"), (2, "z")];
    let once = drain(&pairs(input).order_by(|p: &Pair| p.0).then_by(|p: &Pair| p.1))
        .await
        .unwrap();
    let twice = drain(&pairs(once.clone()).order_by(|p: &Pair| p.0).then_by(|p: &Pair| p.1))
        .await
        .unwrap();
    assert_eq!(once, twice);
}

#[tokio::test]
async fn empty_input_never_extracts_or_compares() {
    let extracted = Arc::new(AtomicUsize::new(0));
    let compared = Arc::new(AtomicUsize::new(0));

    let e = Arc::clone(&extracted);
    let c = Arc::clone(&compared);
    let seq = empty::<i32, Error>().order_by_key(
        key_fn(move |v: &i32| {
            e.fetch_add(1, AtomicOrdering::SeqCst);
            *v
        }),
        comparer_fn(move |a: &i32, b: &i32| {
            c.fetch_add(1, AtomicOrdering::SeqCst);
            a.cmp(b)
        }),
        Direction::Ascending,
    );

    assert!(drain(&seq).await.unwrap().is_empty());
    assert_eq!(extracted.load(AtomicOrdering::SeqCst), 0);
    assert_eq!(compared.load(AtomicOrdering::SeqCst), 0);
}

#[tokio::test]
async fn composition_does_not_touch_the_source() {
    let begun = Arc::new(AtomicUsize::new(0));
    let b = Arc::clone(&begun);
    let source = from_fn(move || {
        b.fetch_add(1, AtomicOrdering::SeqCst);
        stream::iter(vec![Ok::<i32, Error>(2), Ok(1)])
    });

    let seq = source.order_by(|v: &i32| *v).then_by_descending(|v: &i32| -v);
    assert_eq!(begun.load(AtomicOrdering::SeqCst), 0);

    assert_eq!(drain(&seq).await.unwrap(), vec![1, 2]);
    assert_eq!(drain(&seq).await.unwrap(), vec![1, 2]);
    // One materialization per drain, no caching across drains.
    assert_eq!(begun.load(AtomicOrdering::SeqCst), 2);
}

#[tokio::test]
async fn redrain_sees_fresh_source_contents() {
    let round = Arc::new(AtomicUsize::new(0));
    let r = Arc::clone(&round);
    let source = from_fn(move || {
        let n = r.fetch_add(1, AtomicOrdering::SeqCst) as i32;
        stream::iter((0..3).map(move |i| Ok::<i32, Error>(n * 10 - i)))
    });
    let seq = source.order_by(|v: &i32| *v);

    assert_eq!(drain(&seq).await.unwrap(), vec![-2, -1, 0]);
    assert_eq!(drain(&seq).await.unwrap(), vec![8, 9, 10]);
}

#[tokio::test]
async fn custom_comparer_is_applied_then_oriented() {
    let words = vec!["Banana", "apple", "cherry", "Apple"];
    let by_lower = comparer_fn(|a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase()));

    let asc = from_vec::<_, Error>(words.clone()).order_by_with(|w: &&str| w.to_string(), by_lower);
    assert_eq!(
        drain(&asc).await.unwrap(),
        vec!["apple", "Apple", "Banana", "cherry"]
    );

    let by_len = comparer_fn(|a: &usize, b: &usize| a.cmp(b));
    let desc = from_vec::<_, Error>(words)
        .order_by_descending_with(|w: &&str| w.len(), by_len)
        .then_by_with(|w: &&str| w.to_string(), comparer_fn(|a: &String, b: &String| b.cmp(a)));
    assert_eq!(
        drain(&desc).await.unwrap(),
        vec!["cherry", "Banana", "apple", "Apple"]
    );
}

#[tokio::test]
async fn async_key_extraction_suspends() {
    let seq = pairs(vec![(3, "c"), (1, "a"), (2, "b")]).order_by_key(
        async_key(|p: &Pair| {
            let key = p.1;
            async move {
                tokio::task::yield_now().await;
                Ok::<_, Error>(key)
            }
        }),
        NaturalOrder,
        Direction::Descending,
    );
    assert_eq!(
        drain(&seq).await.unwrap(),
        vec![(3, "c"), (2, "b"), (1, "a")]
    );
}

#[tokio::test]
async fn upstream_error_propagates_unchanged() {
    let source = from_fn(|| {
        stream::iter(vec![
            Ok(3),
            Ok(1),
            Err(Error::upstream(io::Error::new(io::ErrorKind::Other, "disk gone"))),
            Ok(2),
        ])
    });
    let seq = source.order_by(|v: &i32| *v);

    let mut out = seq.begin();
    match out.next().await {
        Some(Err(Error::Upstream(err))) => assert_eq!(err.to_string(), "disk gone"),
        other => panic!("expected upstream error, got {other:?}"),
    }
    assert!(out.next().await.is_none());
}

#[tokio::test]
async fn key_extractor_error_aborts_without_partial_output() {
    let seq = from_vec::<i32, Error>(vec![4, 2, -1, 3]).order_by_key(
        try_key(|v: &i32| {
            if *v < 0 {
                Err(Error::null_source("negative"))
            } else {
                Ok(*v)
            }
        }),
        NaturalOrder,
        Direction::Ascending,
    );

    let items: Vec<_> = seq.begin().collect().await;
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(Error::NullSource { .. })));
}

#[tokio::test]
async fn early_abandonment_leaves_sequence_reusable() {
    let seq = from_vec::<i32, Error>((0..100).rev().collect()).order_by(|v: &i32| *v);

    let head: Vec<i32> = seq
        .begin()
        .take(3)
        .map(|r| r.unwrap())
        .collect()
        .await;
    assert_eq!(head, vec![0, 1, 2]);

    assert_eq!(drain(&seq).await.unwrap().len(), 100);
}

#[tokio::test]
async fn ordered_sequence_can_be_reordered() {
    let sorted = pairs(vec![(2, "b"), (1, "a"), (2, "a"), (1, "b")]).order_by(|p: &Pair| p.1);
    let resorted = sorted.clone().order_by(|p: &Pair| p.0);

    // Fresh primary key; ties keep the inner ordering's output order.
    assert_eq!(resorted.depth(), 1);
    assert_eq!(
        drain(&resorted).await.unwrap(),
        vec![(1, "a"), (1, "b"), (2, "a"), (2, "b")]
    );
    assert_eq!(
        drain(&sorted).await.unwrap(),
        vec![(1, "a"), (2, "a"), (2, "b"), (1, "b")]
    );
}

#[tokio::test]
async fn strategies_agree() {
    let input: Vec<Pair> = (0..300)
        .map(|i| ((i * 31 % 17) as i32, if i % 3 == 0 { "x" } else { "y" }))
        .collect();
    let base = pairs(input).order_by(|p: &Pair| p.0).then_by(|p: &Pair| p.1);

    let quick = base
        .clone()
        .with_config(SortConfig::default().with_strategy(SortStrategy::PartitionExchange));
    let merge = base.with_config(
        SortConfig::default()
            .with_strategy(SortStrategy::StableMerge)
            .with_buffer_capacity_hint(300),
    );

    assert_eq!(drain(&quick).await.unwrap(), drain(&merge).await.unwrap());
}

#[tokio::test]
async fn concurrent_drains_are_isolated() {
    let seq = from_vec::<i32, Error>(vec![5, 3, 9, 1]).order_by_descending(|v: &i32| *v);
    let (a, b) = futures::join!(drain(&seq), drain(&seq));
    assert_eq!(a.unwrap(), vec![9, 5, 3, 1]);
    assert_eq!(b.unwrap(), vec![9, 5, 3, 1]);
}

#[test]
fn irreflexive_comparer_still_finishes_the_drain() {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let seq = from_vec::<i32, Error>(vec![3, 1, 2, 5, 4])
            .order_by_with(|v: &i32| *v, comparer_fn(|_: &i32, _: &i32| Ordering::Greater));
        let out = futures::executor::block_on(drain(&seq));
        let _ = tx.send(out);
    });

    let mut out = rx
        .recv_timeout(std::time::Duration::from_secs(10))
        .expect("drain did not finish")
        .unwrap();
    // Order is unspecified for an invalid comparer; the elements are not.
    out.sort();
    assert_eq!(out, vec![1, 2, 3, 4, 5]);
}

#[test]
fn comparer_fn_sees_raw_keys() {
    let cmp = comparer_fn(|a: &i32, b: &i32| b.cmp(a));
    assert_eq!(cmp.compare(&1, &2), Ordering::Greater);
    assert_eq!(Direction::Descending.apply(cmp.compare(&1, &2)), Ordering::Less);
}
