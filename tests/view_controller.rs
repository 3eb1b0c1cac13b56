use isotopos::{
    Dataset, FigureComposer, Selection, SelectionEvent, SelectionSource, ViewController,
    ViewState,
};

fn controller() -> ViewController {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/isotopes_sample.csv");
    let ds = Dataset::from_reader(path, std::fs::File::open(path).unwrap()).unwrap();
    ViewController::new(FigureComposer::new(ds))
}

#[test]
fn starts_unfiltered_with_every_sample() {
    let view = controller();
    assert_eq!(view.state(), &ViewState::Unfiltered);
    assert_eq!(view.displayed().samples().len(), 5);
}

#[test]
fn select_then_clear_round_trip() {
    let mut view = controller();

    let chart = view.on_selection(Some(&SelectionEvent::from_indices([0, 2])));
    assert_eq!(chart.samples().x, vec![-9.8, -8.9]);
    assert_eq!(
        view.state(),
        &ViewState::Filtered(Selection::from_indices([0, 2]))
    );

    let chart = view.on_selection(Some(&SelectionEvent::default()));
    assert_eq!(chart.samples().len(), 5);
    assert_eq!(view.state(), &ViewState::Unfiltered);
}

#[test]
fn missing_payload_clears_the_filter() {
    let mut view = controller();
    view.on_selection(Some(&SelectionEvent::from_indices([4])));
    assert_eq!(view.displayed().samples().len(), 1);

    view.on_selection(None);
    assert_eq!(view.state(), &ViewState::Unfiltered);
    assert_eq!(view.displayed().samples().len(), 5);
}

#[test]
fn only_invalid_identifiers_behave_like_no_selection() {
    let mut view = controller();
    let event = SelectionEvent::from_json(r#"{"points":[{"pointNumber":17},{"pointNumber":"a"}]}"#)
        .unwrap();
    let chart = view.on_selection(event.as_ref());
    assert_eq!(chart.samples().len(), 5);
    assert_eq!(view.state(), &ViewState::Unfiltered);
}

#[test]
fn json_payload_with_extra_fields() {
    let mut view = controller();
    let payload = r#"{"points":[
        {"curveNumber":0,"pointNumber":3,"pointIndex":3,"lat":5.1,"lon":-73.8,"text":"Aljibe"},
        {"curveNumber":0,"pointNumber":1,"pointIndex":1,"lat":4.75,"lon":-74.05,"text":"Manantial"}
    ]}"#;
    let event = SelectionEvent::from_json(payload).unwrap();
    let chart = view.on_selection(event.as_ref());
    assert_eq!(chart.samples().x, vec![-11.2, -10.4]);
}

#[test]
fn newest_event_wins() {
    let mut view = controller();
    view.on_selection(Some(&SelectionEvent::from_indices([0, 1, 2])));
    view.on_selection(Some(&SelectionEvent::from_indices([4])));
    assert_eq!(view.displayed().samples().x, vec![-9.1]);
}

#[test]
fn source_delivers_events_to_attached_controller() {
    let mut source = SelectionSource::new();
    assert!(!source.is_subscribed());
    assert!(source.emit(None).is_none());

    controller().attach(&mut source);
    assert!(source.is_subscribed());

    let chart = source
        .emit(Some(&SelectionEvent::from_indices([1, 3])))
        .unwrap();
    assert_eq!(chart.samples().len(), 2);

    let chart = source.emit(None).unwrap();
    assert_eq!(chart.samples().len(), 5);
}

#[test]
fn subscribing_again_replaces_the_handler() {
    let mut source = SelectionSource::new();
    controller().attach(&mut source);
    let fixed = controller().displayed().clone();
    source.subscribe(move |_| fixed.clone());

    let chart = source
        .emit(Some(&SelectionEvent::from_indices([0])))
        .unwrap();
    assert_eq!(chart.samples().len(), 5);
}

#[test]
fn null_point_list_clears_the_filter() {
    let mut view = controller();
    view.on_selection(Some(&SelectionEvent::from_indices([2])));
    let event = SelectionEvent::from_json(r#"{"points": null}"#).unwrap();
    let chart = view.on_selection(event.as_ref());
    assert_eq!(chart.samples().len(), 5);
    assert_eq!(view.state(), &ViewState::Unfiltered);
}

#[test]
fn unusual_point_fields_do_not_reject_the_event() {
    let mut view = controller();
    let payload = r#"{"points":[{"pointNumber":1,"curveNumber":-1},{"pointNumber":2,"lat":"4.7"}]}"#;
    let event = SelectionEvent::from_json(payload).unwrap();
    let chart = view.on_selection(event.as_ref());
    assert_eq!(chart.samples().x, vec![-10.4, -8.9]);
    assert_eq!(
        view.state(),
        &ViewState::Filtered(Selection::from_indices([1, 2]))
    );
}

#[test]
fn controller_and_map_resolve_events_the_same_way() {
    let mut view = controller();
    let event = SelectionEvent::from_json(
        r#"{"points":[{"pointNumber":3},{"pointNumber":3},{"pointNumber":99},{"pointNumber":0}]}"#,
    )
    .unwrap();
    let (resolved, dropped) = Selection::from_event(event.as_ref(), 5);
    assert_eq!(resolved.indices(), &[3, 0]);
    assert_eq!(dropped, 1);

    view.on_selection(event.as_ref());
    assert_eq!(view.state(), &ViewState::Filtered(resolved));
    assert_eq!(view.displayed().samples().len(), 2);
}
