use drinkviz::core::{
    BinningStrategy, MAX_BUCKETS, Record, bin_records, bin_thresholds, bin_uniform, extent,
};

fn total(record: &Record) -> f64 {
    record.value("total") as f64
}

fn records(values: &[i64]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| Record::new(format!("r{i}")).with_field("total", *value))
        .collect()
}

#[test]
fn two_record_example_splits_into_two_buckets() {
    let records = vec![
        Record::new("A").with_field("total", 10),
        Record::new("B").with_field("total", 25),
    ];
    let binned = bin_uniform(&records, total, (10.0, 25.0), 2).expect("bin");

    assert_eq!(binned.buckets.len(), 2);
    assert_eq!(binned.buckets[0].members, vec![0]);
    assert_eq!(binned.buckets[1].members, vec![1]);
    assert_eq!(binned.buckets[0].x0, 10.0);
    assert_eq!(binned.buckets[0].x1, 17.5);
    assert_eq!(binned.buckets[1].x1, 25.0);
}

#[test]
fn interior_edge_value_belongs_to_upper_bucket() {
    let records = records(&[0, 5, 10]);
    let binned = bin_uniform(&records, total, (0.0, 10.0), 2).expect("bin");
    assert_eq!(binned.buckets[0].members, vec![0]);
    assert_eq!(binned.buckets[1].members, vec![1, 2]);
}

#[test]
fn empty_buckets_are_kept() {
    let records = records(&[0, 10]);
    let binned = bin_uniform(&records, total, (0.0, 10.0), 5).expect("bin");
    assert_eq!(binned.buckets.len(), 5);
    assert_eq!(binned.buckets[2].len(), 0);
    assert_eq!(binned.max_bucket_len(), 1);
}

#[test]
fn degenerate_domain_yields_single_bucket() {
    let records = records(&[7, 7, 7]);
    let binned = bin_uniform(&records, total, (7.0, 7.0), 14).expect("bin");
    assert_eq!(binned.buckets.len(), 1);
    assert_eq!(binned.buckets[0].members, vec![0, 1, 2]);
}

#[test]
fn zero_records_yield_zero_buckets() {
    let binned = bin_uniform(&[], total, (0.0, 1.0), 14).expect("bin");
    assert!(binned.buckets.is_empty());
    assert!(binned.dropped.is_empty());
}

#[test]
fn zero_bucket_count_is_raised_to_one() {
    let records = records(&[1, 2, 3]);
    let binned = bin_uniform(&records, total, (1.0, 3.0), 0).expect("bin");
    assert_eq!(binned.buckets.len(), 1);
    assert_eq!(binned.buckets[0].len(), 3);
}

#[test]
fn out_of_domain_records_are_dropped() {
    let records = records(&[1, 5, 50]);
    let binned = bin_uniform(&records, total, (0.0, 10.0), 2).expect("bin");
    assert_eq!(binned.dropped, vec![2]);
    assert_eq!(binned.bucket_of(2), None);
    assert_eq!(binned.bucket_of(1), Some(1));
}

#[test]
fn invalid_domains_are_rejected() {
    let records = records(&[1]);
    assert!(bin_uniform(&records, total, (5.0, 1.0), 2).is_err());
    assert!(bin_uniform(&records, total, (f64::NAN, 1.0), 2).is_err());
}

#[test]
fn nice_ticks_strategy_splits_on_round_values() {
    let records = records(&[0, 4, 12]);
    let binned = bin_records(
        &records,
        total,
        (0.0, 12.0),
        &BinningStrategy::NiceTicks { count: 14 },
    )
    .expect("bin");

    assert_eq!(binned.buckets.len(), 13);
    assert_eq!(binned.buckets[4].x0, 4.0);
    assert_eq!(binned.buckets[4].members, vec![1]);
    assert_eq!(binned.buckets[12].x0, 12.0);
    assert_eq!(binned.buckets[12].members, vec![2]);
}

#[test]
fn explicit_thresholds_are_sorted_and_deduplicated() {
    let records = records(&[1, 6, 9]);
    let binned = bin_thresholds(&records, total, (0.0, 10.0), &[5.0, 5.0, 0.0, 20.0]).expect("bin");

    assert_eq!(binned.buckets.len(), 2);
    assert_eq!(binned.buckets[0].x1, 5.0);
    assert_eq!(binned.buckets[0].members, vec![0]);
    assert_eq!(binned.buckets[1].members, vec![1, 2]);
}

#[test]
fn default_strategy_is_fourteen_uniform_buckets() {
    assert_eq!(BinningStrategy::default(), BinningStrategy::Uniform { count: 14 });
}

#[test]
fn extent_spans_observed_values() {
    let records = records(&[3, -2, 8]);
    assert_eq!(extent(&records, total), Some((-2.0, 8.0)));
    assert_eq!(extent(&[], total), None);
}

#[test]
fn bucket_counts_above_the_limit_are_errors() {
    let records = records(&[1, 3, 5]);
    for strategy in [
        BinningStrategy::Uniform { count: usize::MAX },
        BinningStrategy::NiceTicks { count: usize::MAX },
        BinningStrategy::Uniform {
            count: MAX_BUCKETS + 1,
        },
    ] {
        assert!(bin_records(&records, total, (1.0, 5.0), &strategy).is_err());
    }
    assert!(bin_uniform(&[], total, (1.0, 5.0), usize::MAX).is_err());

    let binned = bin_uniform(&records, total, (1.0, 5.0), MAX_BUCKETS).expect("bin");
    assert_eq!(binned.buckets.len(), MAX_BUCKETS);
    assert_eq!(binned.buckets.iter().map(|b| b.len()).sum::<usize>(), 3);
}
