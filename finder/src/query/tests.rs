//! Tests for fragment composition and buffer edits.

use super::*;
use crate::catalog::{AttributeDescriptor, Choice, SemanticType};
use crate::config::ExampleValues;
use crate::labels::Labels;

fn attr(name: &str, semantic_type: SemanticType) -> AttributeDescriptor {
    AttributeDescriptor::new(name, name, semantic_type)
}

fn example(name: &str, semantic_type: SemanticType, code: OperatorCode) -> String {
    let examples = ExampleValues::default();
    Composer::new(&examples).example(&attr(name, semantic_type), code).text
}

fn codes(actions: &[Action]) -> Vec<OperatorCode> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Operator(op) => Some(op.code),
            Action::Choice(_) => None,
        })
        .collect()
}

// Literal escaping

#[test]
fn test_escape_value() {
    assert_eq!(escape_value(r#"He said "hi""#), r#"He said \"hi\""#);
    assert_eq!(escape_value(r"back\slash"), r"back\\slash");
    assert_eq!(escape_value(r#"\""#), r#"\\\""#);
}

#[test]
fn test_unquote_reverses_quote() {
    for raw in [r#"He said "hi""#, r"back\slash", r#"\""#, ""] {
        assert_eq!(unquote(&quote(raw)).as_deref(), Some(raw));
    }
    assert_eq!(unquote("bare"), None);
}

#[test]
fn test_escape_key() {
    assert_eq!(escape_key("NTP > set"), r"NTP \> set");
    assert_eq!(escape_key("a]b"), r"a\]b");
    assert_eq!(escape_key(r#"say "x""#), r#"say \"x\""#);
    assert_eq!(escape_key("plain"), "plain");
}

#[test]
fn test_relative_date_display() {
    assert_eq!(RelativeDate::now(-1).to_string(), "NOW -1d");
    assert_eq!(RelativeDate::now(0).to_string(), "NOW");
    let rel = RelativeDate {
        anchor: DateAnchor::Today,
        days: 2,
        hours: -3,
    };
    assert_eq!(rel.to_string(), "TODAY +2d -3h");
    assert_eq!(RelativeDate::now(1).with_hours(4).to_string(), "NOW +1d +4h");
}

#[test]
fn test_mac_address_forms() {
    let dotted: MacAddress = "0011.2233.44ff".parse().unwrap();
    let colon: MacAddress = "00:11:22:33:44:FF".parse().unwrap();
    let dash: MacAddress = "00-11-22-33-44-ff".parse().unwrap();
    assert_eq!(dotted, colon);
    assert_eq!(dotted, dash);
    assert_eq!(colon.to_string(), "0011.2233.44ff");
    assert!("0011.2233".parse::<MacAddress>().is_err());
    assert!("zz11.2233.4455".parse::<MacAddress>().is_err());
}

// Operator table

#[test]
fn test_operators_by_type() {
    use OperatorCode::*;
    assert_eq!(
        operators_for(SemanticType::Text),
        &[Is, Contains, ContainsNoCase, StartsWith, EndsWith, Matches]
    );
    assert_eq!(operators_for(SemanticType::LongText), operators_for(SemanticType::Text));
    assert_eq!(operators_for(SemanticType::DeviceType), operators_for(SemanticType::Text));
    assert_eq!(operators_for(SemanticType::Numeric), &[Is, LessThan, GreaterThan]);
    assert_eq!(operators_for(SemanticType::Id), &[Is]);
    assert_eq!(operators_for(SemanticType::Date), &[Is, Before, After, BeforeRelative]);
    assert_eq!(operators_for(SemanticType::IpAddress), &[Is, In]);
    assert_eq!(operators_for(SemanticType::MacAddress), &[Is, In]);
    assert_eq!(operators_for(SemanticType::Binary), &[True, False]);
}

#[test]
fn test_unknown_type_has_no_actions() {
    let labels = OperatorLabels::localized(&Labels::new());
    assert!(actions_for(&attr("X", SemanticType::Unknown), &labels).is_empty());
    assert!(operators_for(SemanticType::Unknown).is_empty());
}

#[test]
fn test_actions_are_pure() {
    let labels = OperatorLabels::localized(&Labels::new());
    let a = attr("Name", SemanticType::Text);
    assert_eq!(actions_for(&a, &labels), actions_for(&a, &labels));
    assert_eq!(codes(&actions_for(&a, &labels)), operators_for(SemanticType::Text));
}

#[test]
fn test_enum_actions_are_choices() {
    let labels = OperatorLabels::localized(&Labels::new());
    let a = attr("Level", SemanticType::Enum)
        .with_choices(vec![Choice::text("Gold", "GOLD"), Choice::text("Silver", "SILVER")]);
    let actions = actions_for(&a, &labels);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].label(), "Gold");
    assert!(codes(&actions).is_empty());
    assert!(operators_for(SemanticType::Enum).is_empty());
}

#[test]
fn test_operator_labels_localized() {
    let mut tr = Labels::new();
    tr.insert("contains (no case)", "contient (casse ignorée)");
    let labels = OperatorLabels::localized(&tr);
    assert_eq!(labels.label(OperatorCode::ContainsNoCase), "contient (casse ignorée)");
    assert_eq!(labels.label(OperatorCode::Is), "is");
}

#[test]
fn test_operator_code_parse() {
    assert_eq!("containsnocase".parse::<OperatorCode>().unwrap(), OperatorCode::ContainsNoCase);
    assert_eq!("BEFORERELATIVE".parse::<OperatorCode>().unwrap(), OperatorCode::BeforeRelative);
    assert!("LIKE".parse::<OperatorCode>().is_err());
}

// Fragments

#[test]
fn test_text_fragments() {
    assert_eq!(
        example("Name", SemanticType::Text, OperatorCode::ContainsNoCase),
        r#"[Name] CONTAINSNOCASE "text""#
    );
    assert_eq!(
        example("Name", SemanticType::Text, OperatorCode::Matches),
        r#"[Name] MATCHES "pattern""#
    );
}

#[test]
fn test_numeric_fragment() {
    assert_eq!(
        example(r#"Diagnostic "Uptime""#, SemanticType::Numeric, OperatorCode::GreaterThan),
        r#"[Diagnostic "Uptime"] GREATERTHAN 42"#
    );
}

#[test]
fn test_date_fragments() {
    assert_eq!(
        example("Creation date", SemanticType::Date, OperatorCode::After),
        r#"[Creation date] AFTER "2023-01-01""#
    );
    assert_eq!(
        example("Creation date", SemanticType::Date, OperatorCode::BeforeRelative),
        r#"[Creation date] BEFORE "NOW -1d""#
    );
}

#[test]
fn test_address_fragments() {
    assert_eq!(example("IP", SemanticType::IpAddress, OperatorCode::Is), "[IP] IS 16.16.16.16");
    assert_eq!(example("IP", SemanticType::IpAddress, OperatorCode::In), "[IP] IN 16.16.0.0/16");
    assert_eq!(example("MAC", SemanticType::MacAddress, OperatorCode::Is), "[MAC] IS 1616.1616.1616");
    assert_eq!(
        example("MAC", SemanticType::MacAddress, OperatorCode::In),
        "[MAC] IN 1616.1616.1616/32"
    );
}

#[test]
fn test_binary_fragments() {
    assert_eq!(example("Flag", SemanticType::Binary, OperatorCode::True), "[Flag] IS TRUE");
    assert_eq!(example("Flag", SemanticType::Binary, OperatorCode::False), "[Flag] IS FALSE");
}

#[test]
fn test_attribute_example_wins() {
    let examples = ExampleValues::default();
    let composer = Composer::new(&examples);
    let a = attr("Type", SemanticType::DeviceType).with_example("Cisco IOS and IOS-XE");
    assert_eq!(
        composer.example(&a, OperatorCode::Is).text,
        r#"[Type] IS "Cisco IOS and IOS-XE""#
    );

    let d = attr("Seen", SemanticType::Date).with_example("2024-05-06T07:08:09");
    assert_eq!(
        composer.example(&d, OperatorCode::Before).text,
        r#"[Seen] BEFORE "2024-05-06T07:08:09""#
    );
}

#[test]
fn test_choice_literal_typing() {
    let examples = ExampleValues::default();
    let composer = Composer::new(&examples);
    let level = attr("Level", SemanticType::Enum);
    let domain = attr("Domain", SemanticType::Enum);
    assert_eq!(
        composer.choice(&level, &Choice::text("Gold", "GOLD")).text,
        r#"[Level] IS "GOLD""#
    );
    assert_eq!(composer.choice(&domain, &Choice::number("DMZ", 3)).text, "[Domain] IS 3");
}

#[test]
fn test_choice_value_is_escaped() {
    let examples = ExampleValues::default();
    let composer = Composer::new(&examples);
    let a = attr("Level", SemanticType::Enum);
    assert_eq!(
        composer.choice(&a, &Choice::text("Odd", r#"A "B""#)).text,
        r#"[Level] IS "A \"B\"""#
    );
}

#[test]
fn test_fragment_value_span() {
    let fragment = compose("Name", "IS", &Literal::text("text"));
    let value: String = fragment.text.chars().skip(fragment.value.start).take(fragment.value.len()).collect();
    assert_eq!(value, "text");

    let fragment = compose("Domain", "IS", &Literal::Number(3));
    assert_eq!(fragment.value, 12..13);
}

// Buffer edits

#[test]
fn test_insert_into_empty_buffer() {
    let mut buf = QueryBuffer::new("");
    let update = buf.insert_fragment(r#"[Name] CONTAINSNOCASE "text""#);
    assert_eq!(buf.text(), r#" [Name] CONTAINSNOCASE "text" "#);
    assert_eq!(buf.selection(), Selection::caret(buf.len() - 1));
    assert_eq!(update, CaretUpdate::Now(buf.selection()));
}

#[test]
fn test_insert_preserves_surrounding_text() {
    let mut buf = QueryBuffer::new("abcdef");
    buf.set_selection(Selection::caret(3));
    buf.insert_fragment("X");
    assert_eq!(buf.text(), "abc X def");
    assert_eq!(buf.selection(), Selection::caret(5));
}

#[test]
fn test_insert_replaces_selection() {
    let mut buf = QueryBuffer::new("abcdef");
    buf.set_selection(Selection::new(4, 1));
    buf.insert_fragment("X");
    assert_eq!(buf.text(), "a X ef");
    assert_eq!(buf.selection(), Selection::caret(3));
}

#[test]
fn test_insert_counts_characters() {
    let mut buf = QueryBuffer::new("été");
    buf.set_selection(Selection::caret(1));
    buf.insert_fragment("ü");
    assert_eq!(buf.text(), "é ü té");
    assert_eq!(buf.selection(), Selection::caret(3));
}

#[test]
fn test_stale_caret_appends() {
    let mut buf = QueryBuffer::new("abc");
    buf.set_selection(Selection::caret(99));
    assert_eq!(buf.selection(), Selection::caret(3));
    buf.insert_fragment("X");
    assert_eq!(buf.text(), "abc X ");
}

#[test]
fn test_partly_stale_selection_appends() {
    let mut buf = QueryBuffer::new("abcdef");
    buf.set_selection(Selection::new(2, 40));
    assert_eq!(buf.selection(), Selection::caret(6));
    buf.insert_fragment("X");
    assert_eq!(buf.text(), "abcdef X ");
}

#[test]
fn test_editor_partly_stale_surface_selection() {
    let mut editor = Editor::new("abcdef", HeadlessSurface::default());
    editor.surface_mut().selection = Some(Selection::new(2, 40));
    editor.insert_fragment("X");
    assert_eq!(editor.text(), "abcdef X ");
}

#[test]
fn test_selection_clamp() {
    assert_eq!(Selection::new(1, 3).clamp(5), Selection::new(1, 3));
    assert_eq!(Selection::new(1, 9).clamp(5), Selection::caret(5));
    assert_eq!(Selection::caret(7).clamp(5), Selection::caret(5));
}

#[test]
fn test_wrap_not() {
    let mut buf = QueryBuffer::new(r#"[Name] IS "a""#);
    let before = buf.selection();
    assert_eq!(buf.wrap_not(), CaretUpdate::Keep);
    assert_eq!(buf.text(), r#"NOT ([Name] IS "a")"#);
    assert_eq!(buf.selection(), before);
}

#[test]
fn test_wrap_or() {
    let mut buf = QueryBuffer::new(r#"[Status] IS "PRODUCTION""#);
    let update = buf.wrap_boolean(Connective::Or);
    assert_eq!(buf.text(), r#"([Status] IS "PRODUCTION") OR ()"#);
    assert_eq!(update, CaretUpdate::AfterRender(Selection::caret(buf.len() - 1)));
}

#[test]
fn test_wrap_and_empty() {
    let mut buf = QueryBuffer::new("");
    buf.wrap_boolean(Connective::And);
    assert_eq!(buf.text(), "() AND ()");
    assert_eq!(buf.selection(), Selection::caret(8));
}

#[test]
fn test_wrap_boolean_not() {
    let mut buf = QueryBuffer::new("x");
    assert_eq!(buf.wrap_boolean(Connective::Not), CaretUpdate::Keep);
    assert_eq!(buf.text(), "NOT (x)");
}

#[test]
fn test_clear() {
    let mut buf = QueryBuffer::new("abc");
    assert_eq!(buf.clear(), CaretUpdate::Now(Selection::caret(0)));
    assert!(buf.is_empty());
}

// Editor and surface

#[test]
fn test_editor_reads_surface_selection() {
    let mut editor = Editor::new("abcdef", HeadlessSurface::default());
    editor.surface_mut().selection = Some(Selection::caret(2));
    let caret = editor.insert_fragment("X");
    assert_eq!(editor.text(), "ab X cdef");
    assert_eq!(caret, Selection::caret(4));
    assert_eq!(editor.surface().text, "ab X cdef");
    assert_eq!(editor.surface().selection, Some(caret));
}

#[test]
fn test_editor_surface_without_selection() {
    let mut editor = Editor::new("abc", HeadlessSurface::default());
    editor.surface_mut().selection = None;
    editor.insert_fragment("X");
    assert_eq!(editor.text(), "abc X ");
}

#[test]
fn test_editor_defers_wrap_caret() {
    let mut editor = Editor::new("x", HeadlessSurface::default());
    editor.wrap(Connective::And);
    assert_eq!(editor.surface().text, "(x) AND ()");
    assert!(editor.has_pending_caret());
    assert_eq!(editor.surface().selection, Some(Selection::caret(1)));

    editor.after_render();
    assert!(!editor.has_pending_caret());
    assert_eq!(editor.surface().selection, Some(Selection::caret(9)));
    assert!(editor.surface().focused);
}

#[test]
fn test_typing_drops_pending_caret() {
    let mut editor = Editor::new("x", HeadlessSurface::default());
    editor.wrap(Connective::Or);
    editor.type_text("y");
    assert_eq!(editor.surface().text, "y");
    editor.after_render();
    assert_eq!(editor.text(), "y");
    assert_eq!(editor.surface().selection, Some(Selection::caret(1)));
}
