use drinkviz::core::{CategorySet, DEFAULT_KEY_COLUMN, Dataset, Record};
use drinkviz::interaction::{SelectionController, SelectionOutcome, SelectionSource};

fn drink(key: &str, beer: i64, wine: i64, spirit: i64) -> Record {
    Record::new(key)
        .with_field("beer_servings", beer)
        .with_field("wine_servings", wine)
        .with_field("spirit_servings", spirit)
}

fn dataset() -> Dataset {
    Dataset::from_records(
        DEFAULT_KEY_COLUMN,
        vec![drink("Albania", 89, 54, 132), drink("Andorra", 245, 312, 138)],
    )
}

#[test]
fn random_pick_on_single_record_always_returns_it() {
    let dataset = Dataset::from_records(DEFAULT_KEY_COLUMN, vec![drink("Solo", 1, 2, 3)]);
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(42, 1.5);

    let first = controller.select_random(&dataset, &categories, SelectionSource::Initial);
    assert_eq!(
        first,
        SelectionOutcome::Changed {
            previous: None,
            current: 0
        }
    );
    for _ in 0..10 {
        let again = controller.select_random(&dataset, &categories, SelectionSource::Random);
        assert_eq!(again, SelectionOutcome::Reaffirmed { current: 0 });
    }
    assert_eq!(controller.session().current(), Some(0));
}

#[test]
fn unknown_key_reports_not_found_and_keeps_selection() {
    let dataset = dataset();
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(1, 1.5);
    controller.select(&dataset, &categories, 1, SelectionSource::Click);
    let before = controller.session().clone();

    let outcome = controller.select_by_key(&dataset, &categories, "Atlantis");

    assert_eq!(outcome, SelectionOutcome::NotFound);
    assert_eq!(outcome.selected(), None);
    assert_eq!(controller.session(), &before);
}

#[test]
fn key_selection_is_case_sensitive() {
    let dataset = dataset();
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(1, 1.5);
    assert_eq!(
        controller.select_by_key(&dataset, &categories, "albania"),
        SelectionOutcome::NotFound
    );
    assert!(controller
        .select_by_key(&dataset, &categories, "Albania")
        .is_changed());
}

#[test]
fn empty_dataset_random_pick_is_a_no_op() {
    let dataset = Dataset::from_records(DEFAULT_KEY_COLUMN, Vec::new());
    let mut controller = SelectionController::with_seed(3, 1.5);
    let outcome =
        controller.select_random(&dataset, &CategorySet::default(), SelectionSource::Initial);
    assert_eq!(outcome, SelectionOutcome::Empty);
    assert_eq!(controller.session().current(), None);
    assert!(!controller.session().input_suppressed());
}

#[test]
fn out_of_range_index_is_not_found() {
    let mut controller = SelectionController::with_seed(3, 1.5);
    let outcome = controller.select(&dataset(), &CategorySet::default(), 9, SelectionSource::Click);
    assert_eq!(outcome, SelectionOutcome::NotFound);
}

#[test]
fn selection_change_recomputes_breakdown() {
    let dataset = dataset();
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(5, 1.5);

    controller.select(&dataset, &categories, 0, SelectionSource::Hover);
    let albania = controller.session().breakdown().expect("breakdown").clone();
    assert_eq!(albania.key, "Albania");

    let outcome = controller.select(&dataset, &categories, 1, SelectionSource::Hover);
    assert_eq!(
        outcome,
        SelectionOutcome::Changed {
            previous: Some(0),
            current: 1
        }
    );
    let andorra = controller.session().breakdown().expect("breakdown");
    assert_eq!(andorra.key, "Andorra");
    assert_eq!(andorra.total(), 695);
}

#[test]
fn hover_does_not_open_the_cooldown() {
    let mut controller = SelectionController::with_seed(5, 1.5);
    controller.select(&dataset(), &CategorySet::default(), 0, SelectionSource::Hover);
    assert!(!controller.session().input_suppressed());
}

#[test]
fn programmatic_selection_and_click_open_the_cooldown() {
    for source in [
        SelectionSource::Initial,
        SelectionSource::Click,
        SelectionSource::Search,
        SelectionSource::Random,
    ] {
        let mut controller = SelectionController::with_seed(5, 1.5);
        controller.select(&dataset(), &CategorySet::default(), 0, source);
        assert!(controller.session().input_suppressed(), "{source:?}");
    }
}

#[test]
fn cooldown_is_not_renewed_by_later_selections() {
    let dataset = dataset();
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(5, 1.5);

    controller.select(&dataset, &categories, 0, SelectionSource::Random);
    assert!(!controller.tick(1.0));
    controller.select_by_key(&dataset, &categories, "Andorra");
    assert!(controller.session().input_suppressed());

    assert!(controller.tick(0.5));
    assert!(!controller.session().input_suppressed());
    assert_eq!(controller.session().cooldown().remaining_seconds(), 0.0);
}

#[test]
fn reaffirming_still_opens_a_closed_cooldown() {
    let dataset = dataset();
    let categories = CategorySet::default();
    let mut controller = SelectionController::with_seed(5, 1.5);
    controller.select(&dataset, &categories, 0, SelectionSource::Hover);

    let outcome = controller.select(&dataset, &categories, 0, SelectionSource::Click);
    assert_eq!(outcome, SelectionOutcome::Reaffirmed { current: 0 });
    assert!(controller.session().input_suppressed());
}
