use super::*;
use crate::comparison::MockComparator;
use crate::retrieval::MockRetriever;
use std::time::Duration;

fn pipeline(
    retriever: MockRetriever,
    comparator: MockComparator,
) -> ComparisonPipeline<MockRetriever, MockComparator> {
    ComparisonPipeline::new(Arc::new(retriever), Arc::new(comparator))
}

fn ids(results: &[RankedResult]) -> Vec<&str> {
    results.iter().map(|r| r.item.id.as_str()).collect()
}

fn drain(receiver: &mut tokio::sync::broadcast::Receiver<String>) -> Vec<String> {
    let mut seen = Vec::new();
    while let Ok(state) = receiver.try_recv() {
        seen.push(state);
    }
    seen
}

mod ranking_tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_one_result_per_item() {
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b")]);
        let results = pipeline(retriever, MockComparator::new())
            .execute("query", 5)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_results_sorted_descending() {
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b"), ("3", "c"), ("4", "d")]);
        let comparator =
            MockComparator::with_scores(&[("a", 0.2), ("b", 0.9), ("c", 0.4), ("d", 0.9)]);

        let results = pipeline(retriever, comparator)
            .execute("query", 4)
            .await
            .unwrap();

        assert!(results.windows(2).all(|w| w[0].score() >= w[1].score()));
        assert_eq!(ids(&results), ["2", "4", "3", "1"]);
    }

    #[tokio::test]
    async fn test_ties_keep_retrieval_order() {
        let retriever = MockRetriever::from_pairs(&[("A", "a"), ("B", "b"), ("C", "c")]);
        let comparator = MockComparator::with_scores(&[("a", 0.5), ("b", 0.7), ("c", 0.5)]);

        let results = pipeline(retriever, comparator)
            .execute("query", 3)
            .await
            .unwrap();

        assert_eq!(ids(&results), ["B", "A", "C"]);
    }

    #[tokio::test]
    async fn test_ties_stable_when_completion_order_reversed() {
        let retriever = MockRetriever::from_pairs(&[("A", "a"), ("B", "b"), ("C", "c")]);
        let comparator = Arc::new(
            MockComparator::new()
                .delay("a", Duration::from_millis(60))
                .delay("b", Duration::from_millis(30)),
        );

        let results = ComparisonPipeline::new(Arc::new(retriever), Arc::clone(&comparator))
            .with_config(PipelineConfig::new(3))
            .execute("query", 3)
            .await
            .unwrap();

        assert_eq!(comparator.completion_order(), ["c", "b", "a"]);
        assert_eq!(ids(&results), ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_empty_retrieval_is_empty_result() {
        let comparator = Arc::new(MockComparator::new());
        let results = ComparisonPipeline::new(Arc::new(MockRetriever::default()), Arc::clone(&comparator))
            .execute("query", 3)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(comparator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_judgments_stay_paired_with_items() {
        let retriever = MockRetriever::from_pairs(&[("1", "first"), ("2", "second"), ("3", "third")]);
        let comparator =
            MockComparator::with_scores(&[("first", 0.1), ("second", 0.3), ("third", 0.2)]);

        let results = pipeline(retriever, comparator)
            .execute("query", 3)
            .await
            .unwrap();

        for result in &results {
            assert_eq!(
                result.judgment.summary,
                format!("Summary of {}", result.item.description)
            );
        }
    }

    #[tokio::test]
    async fn test_workout_app_scenario() {
        let retriever = MockRetriever::from_pairs(&[
            ("1", "Fitness AI"),
            ("2", "Diet tracker"),
            ("3", "Workout planner"),
        ]);
        let comparator = MockComparator::with_scores(&[
            ("Fitness AI", 0.60),
            ("Diet tracker", 0.85),
            ("Workout planner", 0.60),
        ]);

        let results = pipeline(retriever, comparator)
            .execute("AI workout app", 3)
            .await
            .unwrap();

        assert_eq!(ids(&results), ["2", "1", "3"]);
        assert_eq!(results[0].score(), 0.85);
    }
}

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_zero_k() {
        let retriever = Arc::new(MockRetriever::from_pairs(&[("1", "a")]));
        let err = ComparisonPipeline::new(Arc::clone(&retriever), Arc::new(MockComparator::new()))
            .execute("query", 0)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(retriever.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_blank_query() {
        let err = pipeline(MockRetriever::default(), MockComparator::new())
            .execute("   ", 3)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn test_comparator_failure_fails_whole_run() {
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b"), ("3", "c")]);
        let comparator = MockComparator::new().fail_on("b");

        let err = pipeline(retriever, comparator)
            .execute("query", 3)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ComparisonFailure);
        assert!(!err.is_malformed_judgment());
    }

    #[tokio::test]
    async fn test_malformed_judgment_classified_as_comparison_failure() {
        let retriever = MockRetriever::from_pairs(&[("1", "a")]);
        let comparator = MockComparator::with_scores(&[("a", 85.0)]);

        let err = pipeline(retriever, comparator)
            .execute("query", 1)
            .await
            .unwrap_err();

        assert!(err.is_malformed_judgment());
        assert_eq!(err.kind(), ErrorKind::ComparisonFailure);
    }

    #[tokio::test]
    async fn test_oversized_candidate_is_invalid_input() {
        let retriever = MockRetriever::from_pairs(&[("1", "a very long description")]);
        let comparator = MockComparator::new().max_text_chars(8);

        let err = pipeline(retriever, comparator)
            .execute("query", 1)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn test_retrieval_failure_propagates() {
        let retriever = MockRetriever::from_pairs(&[("1", "a")]);
        retriever.set_failing(true);
        let comparator = Arc::new(MockComparator::new());

        let err = ComparisonPipeline::new(Arc::new(retriever), Arc::clone(&comparator))
            .execute("query", 1)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RetrievalFailure);
        assert_eq!(comparator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_retriever_returning_too_many() {
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b"), ("3", "c")]);
        retriever.set_ignore_limit(true);

        let err = pipeline(retriever, MockComparator::new())
            .execute("query", 2)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Retrieval(RetrievalError::TooManyItems { k: 2, returned: 3 })
        ));
    }

    #[tokio::test]
    async fn test_timeout_expires() {
        let retriever = MockRetriever::from_pairs(&[("1", "slow")]);
        let comparator = MockComparator::new().delay("slow", Duration::from_millis(500));

        let err = pipeline(retriever, comparator)
            .with_config(PipelineConfig::default().with_timeout(Some(Duration::from_millis(20))))
            .execute("query", 1)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TimedOut);
    }

    #[tokio::test]
    async fn test_failure_cancels_outstanding_comparisons() {
        let retriever = MockRetriever::from_pairs(&[("1", "fail"), ("2", "slow")]);
        let comparator = Arc::new(
            MockComparator::new()
                .fail_on("fail")
                .delay("slow", Duration::from_millis(200)),
        );

        let err = ComparisonPipeline::new(Arc::new(retriever), Arc::clone(&comparator))
            .with_config(PipelineConfig::new(4))
            .execute("query", 2)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComparisonFailure);
        assert_eq!(comparator.call_count(), 2);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(comparator.completion_order().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_cancels_outstanding_comparisons() {
        let retriever = MockRetriever::from_pairs(&[("1", "slow"), ("2", "slower")]);
        let comparator = Arc::new(
            MockComparator::new()
                .delay("slow", Duration::from_millis(200))
                .delay("slower", Duration::from_millis(250)),
        );

        let err = ComparisonPipeline::new(Arc::new(retriever), Arc::clone(&comparator))
            .with_config(
                PipelineConfig::new(4).with_timeout(Some(Duration::from_millis(20))),
            )
            .execute("query", 2)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TimedOut);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(comparator.completion_order().is_empty());
    }
}

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn test_in_flight_comparisons_respect_bound() {
        let pairs: Vec<(String, String)> = (0..8)
            .map(|i| (i.to_string(), format!("item {}", i)))
            .collect();
        let borrowed: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(id, d)| (id.as_str(), d.as_str()))
            .collect();

        let mut comparator = MockComparator::new();
        for (_, description) in &borrowed {
            comparator = comparator.delay(description, Duration::from_millis(10));
        }
        let comparator = Arc::new(comparator);

        let results = ComparisonPipeline::new(
            Arc::new(MockRetriever::from_pairs(&borrowed)),
            Arc::clone(&comparator),
        )
        .with_config(PipelineConfig::new(2))
        .execute("query", 8)
        .await
        .unwrap();

        assert_eq!(results.len(), 8);
        assert_eq!(comparator.call_count(), 8);
        assert!(comparator.peak_concurrency() <= 2);
        assert!(comparator.peak_concurrency() >= 1);
    }

    #[tokio::test]
    async fn test_concurrency_of_one_is_sequential() {
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b"), ("3", "c")]);
        let comparator = Arc::new(MockComparator::new());

        ComparisonPipeline::new(Arc::new(retriever), Arc::clone(&comparator))
            .with_config(PipelineConfig::new(1))
            .execute("query", 3)
            .await
            .unwrap();

        assert_eq!(comparator.peak_concurrency(), 1);
        assert_eq!(comparator.completion_order(), ["a", "b", "c"]);
    }

    #[test]
    fn test_config_clamps_concurrency() {
        assert_eq!(PipelineConfig::new(0).concurrency, 1);
        assert!(
            PipelineConfig::default()
                .with_timeout(Some(Duration::ZERO))
                .validate()
                .is_err()
        );
    }
}

mod progress_tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_phases_in_order() {
        let broadcaster = Arc::new(ProgressBroadcaster::default());
        let mut receiver = broadcaster.subscribe();
        let retriever = MockRetriever::from_pairs(&[("1", "a"), ("2", "b")]);

        pipeline(retriever, MockComparator::new())
            .with_progress(broadcaster.clone())
            .execute("query", 2)
            .await
            .unwrap();

        assert_eq!(
            drain(&mut receiver),
            [
                "Searching for similar items...",
                "Comparing item 1/2...",
                "Comparing item 2/2...",
                "Sorting results by similarity score...",
                "Done",
            ]
        );
        assert_eq!(broadcaster.current(), "Done");
    }

    #[tokio::test]
    async fn test_broadcaster_without_subscribers() {
        let broadcaster = ProgressBroadcaster::new(4);
        assert_eq!(broadcaster.current(), progress::IDLE);

        broadcaster.on_progress("working");

        assert_eq!(broadcaster.current(), "working");
        assert_eq!(broadcaster.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_broadcaster_fans_out() {
        let broadcaster = ProgressBroadcaster::default();
        let mut first = broadcaster.subscribe();
        let mut second = broadcaster.subscribe();

        broadcaster.on_progress("Done");

        assert_eq!(first.recv().await.unwrap(), "Done");
        assert_eq!(second.recv().await.unwrap(), "Done");
    }
}
