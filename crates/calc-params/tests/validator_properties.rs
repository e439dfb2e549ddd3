//! Property tests for parameter validation.
//!
//! A value map is valid exactly when every required input has a non-empty
//! value, every present number lies within its bounds, and every present
//! pattern-constrained text matches.

use calc_params::{ParameterStore, ParameterValidator, MSG_REQUIRED};
use calc_template::{CalculationTemplate, ParameterValue, ParameterValueMap, TemplateParameter};
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct NumberSlot {
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    value: Option<f64>,
}

#[derive(Debug, Clone)]
struct TextSlot {
    required: bool,
    digits_only: bool,
    value: Option<String>,
}

fn number_slot() -> impl Strategy<Value = NumberSlot> {
    (
        any::<bool>(),
        proptest::option::of(-100i32..100),
        proptest::option::of(0i32..200),
        proptest::option::of(-300i32..300),
    )
        .prop_map(|(required, min, span, value)| NumberSlot {
            required,
            min: min.map(f64::from),
            max: min.zip(span).map(|(m, s)| f64::from(m + s)),
            value: value.map(f64::from),
        })
}

fn text_slot() -> impl Strategy<Value = TextSlot> {
    (
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[a-z0-9]{0,6}"),
    )
        .prop_map(|(required, digits_only, value)| TextSlot {
            required,
            digits_only,
            value,
        })
}

fn build(numbers: &[NumberSlot], texts: &[TextSlot]) -> (CalculationTemplate, ParameterValueMap) {
    let mut template = CalculationTemplate::new("prop", "Property template", "test");
    let mut values = ParameterValueMap::new();

    for (i, slot) in numbers.iter().enumerate() {
        let name = format!("n{i}");
        let mut param = TemplateParameter::number(&name, &name);
        if slot.required {
            param = param.required();
        }
        if let Some(min) = slot.min {
            param = param.with_min(min);
        }
        if let Some(max) = slot.max {
            param = param.with_max(max);
        }
        template = template.with_parameter(param);
        if let Some(v) = slot.value {
            values.insert(name, ParameterValue::Number(v));
        }
    }

    for (i, slot) in texts.iter().enumerate() {
        let name = format!("t{i}");
        let mut param = TemplateParameter::text(&name, &name);
        if slot.required {
            param = param.required();
        }
        if slot.digits_only {
            param = param.with_pattern("^[0-9]+$", Some("digits only"));
        }
        template = template.with_parameter(param);
        if let Some(v) = &slot.value {
            values.insert(name, ParameterValue::text(v.clone()));
        }
    }

    (template, values)
}

fn expected_valid(numbers: &[NumberSlot], texts: &[TextSlot]) -> bool {
    let numbers_ok = numbers.iter().all(|s| match s.value {
        None => !s.required,
        Some(v) => s.min.map_or(true, |m| v >= m) && s.max.map_or(true, |m| v <= m),
    });
    let texts_ok = texts.iter().all(|s| match s.value.as_deref() {
        None | Some("") => !s.required,
        Some(v) => !s.digits_only || v.chars().all(|c| c.is_ascii_digit()),
    });
    numbers_ok && texts_ok
}

proptest! {
    #[test]
    fn prop_validator_completeness(
        numbers in proptest::collection::vec(number_slot(), 0..6),
        texts in proptest::collection::vec(text_slot(), 0..4),
    ) {
        let (template, values) = build(&numbers, &texts);
        let result = ParameterValidator::new().validate(&template, &values);

        prop_assert_eq!(result.is_valid(), expected_valid(&numbers, &texts));
        prop_assert_eq!(result.is_valid(), result.errors().is_empty());
        prop_assert!(result.warnings().is_empty());
    }

    #[test]
    fn prop_required_missing_always_reported(
        numbers in proptest::collection::vec(number_slot(), 1..6),
    ) {
        let (template, values) = build(&numbers, &[]);
        let result = ParameterValidator::new().validate(&template, &values);

        for (i, slot) in numbers.iter().enumerate() {
            if slot.required && slot.value.is_none() {
                prop_assert_eq!(result.error_for(&format!("n{i}")), Some(MSG_REQUIRED));
            }
        }
    }

    #[test]
    fn prop_validation_is_pure(
        numbers in proptest::collection::vec(number_slot(), 0..6),
    ) {
        let (template, values) = build(&numbers, &[]);
        let validator = ParameterValidator::new();
        prop_assert_eq!(
            validator.validate(&template, &values),
            validator.validate(&template, &values)
        );
    }
}

#[test]
fn store_and_validator_agree_on_partial_input() {
    let template = Arc::new(
        CalculationTemplate::new("beam", "Beam deflection", "structural")
            .with_parameter(TemplateParameter::number("span", "Span").required().with_min(0.5))
            .with_parameter(TemplateParameter::number("load", "Load").required()),
    );
    let mut store = ParameterStore::new(template);
    let validator = ParameterValidator::new();

    store.set_input("span", "4.").unwrap();
    let result = store.validate(&validator);
    assert!(result.error_for("span").is_none());
    assert_eq!(result.error_for("load"), Some(MSG_REQUIRED));

    store.set_input("load", "12kN").unwrap();
    let result = store.validate(&validator);
    assert_eq!(result.error_for("load"), Some("must be a valid number"));

    store.commit_field("load").unwrap();
    let result = store.validate(&validator);
    assert_eq!(result.error_for("load"), Some(MSG_REQUIRED));
}
