use super::*;
use pretty_assertions::assert_eq;
use snip_diagnostic::ErrorKind;

fn parse(text: &str) -> MarkedText {
    match parse_markers(text, &LineMap::new()) {
        Ok(marked) => marked,
        Err(e) => panic!("unexpected error: {e}"),
    }
}

fn parse_err(text: &str) -> HarnessError {
    match parse_markers(text, &LineMap::new()) {
        Ok(marked) => panic!("expected an error, got {marked:?}"),
        Err(e) => e,
    }
}

#[test]
fn test_single_underline() {
    let text = "\
const ab12: AB12 = ab;
   // ~~~~ Type 'AB12' is not assignable...
";
    let marked = parse(text);
    assert_eq!(marked.text, "const ab12: AB12 = ab;\n");
    assert_eq!(marked.expectations.len(), 1);

    let exp = &marked.expectations[0];
    assert_eq!(exp.line, 1);
    assert_eq!(exp.columns, Some(ColumnRange::new(7, 11)));
    assert!(exp.message.contains("not assignable"));
    assert_eq!(exp.marker_line, 2);
}

#[test]
fn test_caret_underline() {
    let text = "let x = foo;\n//      ^^^ Cannot find name 'foo'.\n";
    let marked = parse(text);
    assert_eq!(
        marked.expectations,
        vec![Expectation::new(1, ColumnRange::new(9, 12), "Cannot find name 'foo'.").at_marker_line(2)]
    );
}

#[test]
fn test_stacked_segments_share_message_left_to_right() {
    let text = "\
add(a, b);
 // ~  ~ Argument of type 'string' is not assignable
";
    let marked = parse(text);
    let columns: Vec<_> = marked.expectations.iter().map(|e| e.columns).collect();
    assert_eq!(
        columns,
        vec![Some(ColumnRange::new(5, 6)), Some(ColumnRange::new(8, 9))]
    );
    assert!(marked
        .expectations
        .iter()
        .all(|e| e.message == "Argument of type 'string' is not assignable" && e.line == 1));
}

#[test]
fn test_stacked_marker_lines_attach_to_same_code_line() {
    let text = "\
const p: Person = { name: 1, age: 'x' };
//                  ~~~~ Type 'number' is not assignable to type 'string'.
//                           ~~~ Type 'string' is not assignable to type 'number'.
const q = 1;
";
    let marked = parse(text);
    assert_eq!(marked.text, "const p: Person = { name: 1, age: 'x' };\nconst q = 1;\n");
    assert_eq!(marked.expectations.len(), 2);
    assert!(marked.expectations.iter().all(|e| e.line == 1));
    assert_eq!(marked.expectations[0].columns, Some(ColumnRange::new(21, 25)));
    assert_eq!(marked.expectations[1].columns, Some(ColumnRange::new(30, 33)));
}

#[test]
fn test_continuation_lines_join_with_space() {
    let text = "\
const x: Foo = bar;
   // ~ Type 'Bar' is not assignable to type 'Foo'.
   //     Property 'x' is missing in type 'Bar'.
// unrelated note
";
    let marked = parse(text);
    assert_eq!(marked.expectations.len(), 1);
    assert_eq!(
        marked.expectations[0].message,
        "Type 'Bar' is not assignable to type 'Foo'. Property 'x' is missing in type 'Bar'."
    );
    assert_eq!(marked.text, "const x: Foo = bar;\n// unrelated note\n");
}

#[test]
fn test_message_on_continuation_only() {
    let text = "let v = w;\n//      ~\n//          Cannot find name 'w'.\n";
    let marked = parse(text);
    assert_eq!(marked.expectations[0].message, "Cannot find name 'w'.");
}

#[test]
fn test_message_only_marker_is_unbounded() {
    let text = "function f(x) { return x; }\n//~ Parameter 'x' implicitly has an 'any' type.\n";
    let marked = parse(text);
    assert_eq!(
        marked.expectations,
        vec![Expectation::unbounded(1, "Parameter 'x' implicitly has an 'any' type.").at_marker_line(2)]
    );
    assert_eq!(marked.text, "function f(x) { return x; }\n");
}

#[test]
fn test_line_numbers_refer_to_marker_free_text() {
    let text = "\
let a: string = 1;
//  ~ Type 'number' is not assignable to type 'string'.
let b: number = 'b';
//  ~ Type 'string' is not assignable to type 'number'.
";
    let marked = parse(text);
    let lines: Vec<_> = marked.expectations.iter().map(|e| (e.line, e.marker_line)).collect();
    assert_eq!(lines, vec![(1, 2), (2, 4)]);
    assert_eq!(marked.line_map.original_line(2), Some(3));
}

#[test]
fn test_original_lines_follow_input_map() {
    let mut map = LineMap::new();
    map.push(5);
    map.push(6);
    let marked = parse_markers("let a = b;\n//      ~ Cannot find name 'b'.\n", &map);
    let Ok(marked) = marked else {
        panic!("should parse");
    };
    assert_eq!(marked.expectations[0].marker_line, 6);
    assert_eq!(marked.line_map.original_line(1), Some(5));
}

#[test]
fn test_underline_without_message_is_malformed() {
    let err = parse_err("let x = y;\n//      ~\n");
    assert_eq!(err.kind(), ErrorKind::MalformedMarker);
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_underline_past_end_of_line_is_malformed() {
    let err = parse_err("let x;\n//   ~~~~~~~~ Variable 'x' is used before being assigned.\n");
    assert_eq!(err.kind(), ErrorKind::MalformedMarker);
    assert!(err.to_string().contains("extends past the end of line 1"));
}

#[test]
fn test_marker_without_code_line_is_malformed() {
    let err = parse_err("// ~~~ Nothing above me\n");
    assert_eq!(err.kind(), ErrorKind::MalformedMarker);
    assert_eq!(err.line(), Some(1));
}

#[test]
fn test_plain_comments_are_not_markers() {
    let text = "// Item 7: Think of types as sets of values\nlet x = 1; // ~ not a marker\n";
    let marked = parse(text);
    assert!(marked.expectations.is_empty());
    assert_eq!(marked.text, text);
}

#[test]
fn test_no_markers_is_identity() {
    let text = "interface Vector2D { x: number; y: number }\n";
    let marked = parse(text);
    assert_eq!(marked.text, text);
    assert!(marked.expectations.is_empty());
}

#[test]
fn test_message_below_underline_at_same_column() {
    let text = "\
type FirstMiddle = Pick<Name, 'first' | 'middle'>;
                           // ~~~~~~~~~~~~~~~~~~
                           // Type '\"middle\"' is not assignable
                           // to type '\"first\" | \"last\"'
";
    let marked = parse(text);
    assert_eq!(
        marked.expectations,
        vec![Expectation::new(
            1,
            ColumnRange::new(31, 49),
            "Type '\"middle\"' is not assignable to type '\"first\" | \"last\"'"
        )
        .at_marker_line(2)]
    );
    assert_eq!(marked.text, "type FirstMiddle = Pick<Name, 'first' | 'middle'>;\n");
}

#[test]
fn test_bare_underlines_share_following_message() {
    let text = "\
const states: State[] = [
  {name: 'Alabama', capitol: 'Montgomery'},
                 // ~~~~~~~~~~~~~~~~~~~~~
  {name: 'Alaska',  capitol: 'Juneau'},
                 // ~~~~~~~~~~~~~~~~~
  {name: 'Arizona', capitol: 'Phoenix'},
                 // ~~~~~~~~~~~~~~~~~~ Object literal may only specify known
                 //         properties, but 'capitol' does not exist in type
                 //         'State'.  Did you mean to write 'capital'?
  // ...
];
";
    let marked = parse(text);
    let lines: Vec<_> = marked.expectations.iter().map(|e| (e.line, e.marker_line)).collect();
    assert_eq!(lines, vec![(2, 3), (3, 5), (4, 7)]);
    assert_eq!(
        marked.expectations[0].columns,
        Some(ColumnRange::new(21, 42))
    );
    assert!(marked.expectations.iter().all(|e| e.message
        == "Object literal may only specify known properties, but 'capitol' does not exist \
            in type 'State'.  Did you mean to write 'capital'?"));
    assert_eq!(
        marked.text,
        "const states: State[] = [\n  {name: 'Alabama', capitol: 'Montgomery'},\n  \
         {name: 'Alaska',  capitol: 'Juneau'},\n  {name: 'Arizona', capitol: 'Phoenix'},\n  \
         // ...\n];\n"
    );
}

#[test]
fn test_bare_underline_before_unannotated_code_is_malformed() {
    let text = "let a = b;\n//      ~\nlet c = 1;\nlet d = e;\n//      ~ Cannot find name 'e'.\n";
    let err = parse_err(text);
    assert_eq!(err.kind(), ErrorKind::MalformedMarker);
    assert_eq!(err.line(), Some(2));
}
