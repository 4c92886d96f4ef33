use super::*;
use crate::testing::{choice_question, dropdown_question, text_question, FakeForm, FakePage, Interaction};
use autoapply_protocols::FieldKind;

fn actuator() -> WidgetActuator {
    WidgetActuator::new(Pacer::instant(), &ActuatorConfig::default())
}

fn options(labels: &[&str]) -> Vec<ChoiceOption> {
    labels
        .iter()
        .map(|l| ChoiceOption {
            element: ElementRef::new(*l),
            label: Some(l.to_string()),
            ..Default::default()
        })
        .collect()
}

fn dropdown_options(labels: &[&str]) -> Vec<DropdownOption> {
    labels
        .iter()
        .map(|l| DropdownOption {
            element: ElementRef::new(*l),
            text: l.to_string(),
            value: l.to_string(),
        })
        .collect()
}

fn widget_of(snapshot: &autoapply_protocols::ContainerSnapshot) -> Widget {
    snapshot.widget.clone().unwrap()
}

#[test]
fn test_match_choice_exact() {
    let opts = options(&["Yes", "No"]);
    assert_eq!(match_choice(&opts, "No").map(|m| m.index), Some(1));
    assert_eq!(match_choice(&opts, " yes ").map(|m| m.index), Some(0));
}

#[test]
fn test_match_choice_tolerant_yes_no() {
    let opts = options(&["Yeah, definitely", "Nope"]);
    assert_eq!(match_choice(&opts, "Yes").map(|m| m.index), Some(0));
    assert_eq!(match_choice(&opts, "No").map(|m| m.index), Some(1));
}

#[test]
fn test_match_choice_no_guess() {
    let opts = options(&["Full time", "Part time"]);
    assert_eq!(match_choice(&opts, "Contract"), None);
    assert_eq!(match_choice(&opts, "Yes"), None);
}

#[test]
fn test_match_choice_reports_already_checked() {
    let mut opts = options(&["Yes", "No"]);
    opts[0].checked = true;
    assert_eq!(
        match_choice(&opts, "Yes"),
        Some(ChoiceMatch {
            index: 0,
            already_checked: true
        })
    );
}

#[test]
fn test_match_dropdown_exact_before_substring() {
    let opts = dropdown_options(&["Select an option", "Bangalore Urban", "Bangalore"]);
    assert_eq!(match_dropdown(&opts, "bangalore"), Some(2));
    assert_eq!(match_dropdown(&opts, "urban"), Some(1));
}

#[test]
fn test_match_dropdown_skips_placeholder() {
    let mut opts = dropdown_options(&["Select an option", "Yes", "No"]);
    opts[0].value = String::new();
    assert_eq!(match_dropdown(&opts, "select"), None);
    assert_eq!(match_dropdown(&opts, "No"), Some(2));
}

#[test]
fn test_match_dropdown_numeric_word_bounded() {
    let opts = dropdown_options(&["10 days", "1 day"]);
    assert_eq!(match_dropdown(&opts, "1"), Some(1));
}

#[test]
fn test_match_dropdown_numeric_variants() {
    let opts = dropdown_options(&["Immediately", "1 Month", "2 Months", "3 Months or more"]);
    assert_eq!(match_dropdown(&opts, "0"), Some(0));
    assert_eq!(match_dropdown(&opts, "30"), Some(1));
    assert_eq!(match_dropdown(&opts, "90"), Some(3));

    let opts = dropdown_options(&["Within a week", "Within a month"]);
    assert_eq!(match_dropdown(&opts, "5"), Some(0));
}

#[test]
fn test_match_dropdown_digits() {
    let opts = dropdown_options(&["United States (+1)", "India (+91)"]);
    assert_eq!(match_dropdown(&opts, "+91"), Some(1));
}

#[test]
fn test_match_dropdown_miss() {
    let opts = dropdown_options(&["Red", "Blue"]);
    assert_eq!(match_dropdown(&opts, "green"), None);
}

#[tokio::test]
async fn test_apply_choice_activates_once() {
    let q = choice_question("hybrid", "Hybrid?", &["Yes", "No"]);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![FakeForm {
        containers: vec![q],
        ..Default::default()
    }]);
    let applied = actuator()
        .apply(&page, &widget, "Yes", NumericDemand::None)
        .await
        .unwrap();
    assert!(applied);
    assert_eq!(page.activations(), vec!["hybrid-yes".to_string()]);
}

#[tokio::test]
async fn test_apply_choice_no_match_is_not_applied() {
    let q = choice_question("shift", "Shift?", &["Day", "Night"]);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![FakeForm {
        containers: vec![q],
        ..Default::default()
    }]);
    let applied = actuator()
        .apply(&page, &widget, "Evening", NumericDemand::None)
        .await
        .unwrap();
    assert!(!applied);
    assert!(page.interactions().is_empty());
}

#[tokio::test]
async fn test_apply_dropdown_event_sequence() {
    let q = dropdown_question("notice", "Notice period", &["15 days", "30 days"]);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![]);
    let applied = actuator()
        .apply(&page, &widget, "30", NumericDemand::None)
        .await
        .unwrap();
    assert!(applied);

    let select = "notice-select".to_string();
    let option = "notice-30-days".to_string();
    assert_eq!(
        page.interactions(),
        vec![
            Interaction::Select(select.clone(), "30 days".to_string()),
            Interaction::Dispatch(select.clone(), DomEvent::Input),
            Interaction::Dispatch(select.clone(), DomEvent::Change),
            Interaction::Dispatch(option.clone(), DomEvent::MouseDown),
            Interaction::Dispatch(option.clone(), DomEvent::MouseUp),
            Interaction::Dispatch(option, DomEvent::Click),
            Interaction::Dispatch(select.clone(), DomEvent::Focus),
            Interaction::Dispatch(select, DomEvent::Blur),
        ]
    );
}

#[tokio::test]
async fn test_apply_fallback_picks_first_real_option() {
    let q = dropdown_question("colour", "Favourite colour", &["Red", "Blue"]);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![]);
    let actuator = actuator();
    assert!(!actuator.apply(&page, &widget, "green", NumericDemand::None).await.unwrap());
    assert!(actuator.apply_fallback(&page, &widget).await.unwrap());
    assert_eq!(page.value_of("colour-select").as_deref(), Some("Red"));
}

#[tokio::test]
async fn test_apply_text_types_each_character() {
    let q = text_question("city", "City", FieldKind::Text);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![]);
    assert!(actuator().apply(&page, &widget, "Pune", NumericDemand::None).await.unwrap());

    let input = "city-input".to_string();
    let typed: Vec<char> = page
        .interactions()
        .into_iter()
        .filter_map(|i| match i {
            Interaction::AppendChar(_, c) => Some(c),
            _ => None,
        })
        .collect();
    assert_eq!(typed, vec!['P', 'u', 'n', 'e']);
    assert_eq!(page.value_of(&input).as_deref(), Some("Pune"));

    let interactions = page.interactions();
    assert_eq!(interactions[0], Interaction::Focus(input.clone()));
    assert_eq!(interactions[1], Interaction::SetValue(input.clone(), String::new()));
    assert_eq!(
        interactions[interactions.len() - 2..],
        [
            Interaction::Dispatch(input.clone(), DomEvent::Change),
            Interaction::Dispatch(input, DomEvent::Blur),
        ]
    );
}

#[tokio::test]
async fn test_apply_text_clamps_whole_numbers() {
    let q = text_question("years", "Years of experience", FieldKind::Number);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![]);
    assert!(actuator()
        .apply(&page, &widget, "120", NumericDemand::WholeNumber)
        .await
        .unwrap());
    assert_eq!(page.value_of("years-input").as_deref(), Some("99"));
}

#[tokio::test]
async fn test_apply_text_rejects_non_numeric_for_numeric_field() {
    let q = text_question("ctc", "Expected CTC", FieldKind::Number);
    let widget = widget_of(&q);
    let page = FakePage::new(vec![]);
    assert!(!actuator()
        .apply(&page, &widget, "negotiable", NumericDemand::Decimal)
        .await
        .unwrap());
    assert!(page.interactions().is_empty());
}
