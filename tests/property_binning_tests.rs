use drinkviz::core::{BinningStrategy, Record, bin_records, extent};
use proptest::prelude::*;

fn total(record: &Record) -> f64 {
    record.value("total") as f64
}

fn strategy() -> impl Strategy<Value = BinningStrategy> {
    prop_oneof![
        (0usize..40).prop_map(|count| BinningStrategy::Uniform { count }),
        (1usize..40).prop_map(|count| BinningStrategy::NiceTicks { count }),
        proptest::collection::vec(-50.0f64..1_050.0, 0..12)
            .prop_map(|values| BinningStrategy::Thresholds { values }),
    ]
}

proptest! {
    #[test]
    fn every_record_lands_in_exactly_one_bucket(
        values in proptest::collection::vec(0i64..1_000, 1..200),
        strategy in strategy(),
    ) {
        let records: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(format!("r{i}")).with_field("total", *v))
            .collect();
        let domain = extent(&records, total).expect("non-empty");
        let binned = bin_records(&records, total, domain, &strategy).expect("bin");

        prop_assert!(binned.dropped.is_empty());
        let mut seen = vec![0usize; records.len()];
        let last = binned.buckets.len() - 1;
        for (b, bucket) in binned.buckets.iter().enumerate() {
            prop_assert!(bucket.x0 <= bucket.x1);
            if b > 0 {
                prop_assert_eq!(binned.buckets[b - 1].x1, bucket.x0);
            }
            for member in &bucket.members {
                seen[*member] += 1;
                let value = total(&records[*member]);
                prop_assert!(value >= bucket.x0);
                if b == last {
                    prop_assert!(value <= bucket.x1);
                } else {
                    prop_assert!(value < bucket.x1);
                }
            }
            prop_assert!(bucket.members.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(seen.iter().all(|count| *count == 1));
    }

    #[test]
    fn binning_is_deterministic(
        values in proptest::collection::vec(-500i64..500, 0..100),
        count in 0usize..30,
    ) {
        let records: Vec<Record> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Record::new(format!("r{i}")).with_field("total", *v))
            .collect();
        let domain = extent(&records, total).unwrap_or((0.0, 0.0));
        let strategy = BinningStrategy::Uniform { count };
        let first = bin_records(&records, total, domain, &strategy).expect("bin");
        let second = bin_records(&records, total, domain, &strategy).expect("bin");
        prop_assert_eq!(first, second);
    }
}
